use std::iter::Peekable;

use crate::{
    ast::{Expr, LiteralKind, UnaryOperator},
    error::ParseError,
    interpreter::{
        lexer::{Token, TokenKind},
        parser::{
            core::{ParseResult, parse_expression},
            utils::{expect, parse_comma_separated, unexpected},
        },
    },
    util::stack::ensure_sufficient_stack,
};

/// Parses prefix minus.
///
/// The rule is: `unary := "-" unary | primary`
///
/// Minus nests, so `--x` negates twice. Only `--/` opens a block comment.
pub fn parse_unary<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a Token> + Clone
{
    if let Some(minus) = tokens.next_if(|t| t.kind == TokenKind::Minus) {
        let operand = ensure_sufficient_stack(|| parse_unary(tokens))?;
        return Ok(Expr::Unary { op:      UnaryOperator::Negate,
                                operand: Box::new(operand),
                                line:    minus.line, });
    }
    parse_primary(tokens)
}

/// Parses a primary expression.
///
/// Primary expressions are:
/// - integer, float, string and boolean literals,
/// - parenthesized expressions,
/// - names, optionally dotted, optionally called.
///
/// # Errors
/// - `UnexpectedKeyword` for a keyword that cannot start an expression.
/// - `UnexpectedToken` for anything else that is not an expression.
pub fn parse_primary<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a Token> + Clone
{
    let Some(&token) = tokens.peek() else {
        return Err(unexpected(None, "expression"));
    };

    let literal = match token.kind {
        TokenKind::IntLiteral => Some(LiteralKind::Int),
        TokenKind::FloatLiteral => Some(LiteralKind::Float),
        TokenKind::StringLiteral => Some(LiteralKind::String),
        TokenKind::True | TokenKind::False => Some(LiteralKind::Bool),
        _ => None,
    };
    if let Some(kind) = literal {
        tokens.next();
        return Ok(Expr::Literal { kind,
                                  text: token.lexeme.clone(),
                                  line: token.line });
    }

    match token.kind {
        TokenKind::LParen => {
            tokens.next();
            let expr = parse_expression(tokens)?;
            expect(tokens, TokenKind::RParen, "')' after expression")?;
            Ok(expr)
        },
        TokenKind::Identifier => parse_name(tokens),
        kind if kind.is_namespace_keyword() => parse_name(tokens),
        kind if kind.is_keyword() => Err(keyword_error(token)),
        _ => Err(unexpected(Some(token), "expression")),
    }
}

/// Parses a name, a dotted name, or a call of either.
///
/// ```text
/// name                    -> Identifier
/// name(args)              -> Call "name"
/// object.member           -> MemberAccess
/// object.member(args)     -> Call "object.member"
/// ```
///
/// Type keywords such as `string` are only accepted as the object of a
/// dotted name.
fn parse_name<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a Token> + Clone
{
    let Some(first) = tokens.next() else {
        return Err(unexpected(None, "expression"));
    };
    let line = first.line;

    let member = if tokens.next_if(|t| t.kind == TokenKind::Dot).is_some() {
        match tokens.next_if(|t| t.kind == TokenKind::Identifier || t.kind.is_namespace_keyword())
        {
            Some(member) => Some(member.lexeme.clone()),
            None => return Err(unexpected(tokens.peek().copied(), "member name after '.'")),
        }
    } else if first.kind.is_keyword() {
        return Err(keyword_error(first));
    } else {
        None
    };

    let callee = match &member {
        Some(member) => format!("{}.{member}", first.lexeme),
        None => first.lexeme.clone(),
    };

    if tokens.next_if(|t| t.kind == TokenKind::LParen).is_some() {
        let arguments = parse_comma_separated(tokens, parse_expression, TokenKind::RParen, "')'")?;
        return Ok(Expr::Call { callee,
                               arguments,
                               line });
    }

    Ok(match member {
        Some(member) => Expr::MemberAccess { object: first.lexeme.clone(),
                                             member,
                                             line },
        None => Expr::Identifier { name: callee,
                                   line },
    })
}

fn keyword_error(token: &Token) -> ParseError {
    ParseError::UnexpectedKeyword { keyword: token.lexeme.clone(),
                                    line:    token.line,
                                    column:  token.column, }
}

use std::iter::Peekable;

use crate::{
    ast::{ElseIfBranch, Expr, Statement},
    interpreter::{
        lexer::{Token, TokenKind},
        parser::{
            core::{ParseResult, parse_expression},
            definition::parse_definition,
            utils::{expect, parse_identifier, peek_kind, unexpected},
        },
    },
    util::stack::ensure_sufficient_stack,
};

/// Parses a single statement.
///
/// A statement may be one of:
/// - a nested `define` form,
/// - an `if` chain,
/// - a `for` loop,
/// - a `return`,
/// - an assignment `name: value;`,
/// - an expression followed by `;`.
///
/// An identifier directly followed by `:` is an assignment; any other
/// identifier starts an expression statement. Telling them apart takes one
/// token of lookahead past the identifier.
pub fn parse_statement<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Statement>
    where I: Iterator<Item = &'a Token> + Clone
{
    let line = tokens.peek().map_or(0, |t| t.line);

    match peek_kind(tokens) {
        TokenKind::Define => parse_definition(tokens).map(Statement::Definition),
        TokenKind::If => parse_if(tokens),
        TokenKind::For => parse_for(tokens),
        TokenKind::Return => parse_return(tokens),
        TokenKind::Identifier if is_assignment(tokens) => {
            let identifier = parse_identifier(tokens, "variable name")?;
            expect(tokens, TokenKind::Colon, "':'")?;
            let value = parse_expression(tokens)?;
            expect(tokens, TokenKind::Semicolon, "';' after assignment")?;
            Ok(Statement::Assignment { identifier,
                                       value,
                                       line })
        },
        _ => {
            let expr = parse_expression(tokens)?;
            expect(tokens, TokenKind::Semicolon, "';' after expression")?;
            Ok(Statement::Expression { expr, line })
        },
    }
}

/// Checks, without consuming anything, whether the token after the current
/// one is `:`.
fn is_assignment<'a, I>(tokens: &Peekable<I>) -> bool
    where I: Iterator<Item = &'a Token> + Clone
{
    let mut ahead = tokens.clone();
    ahead.next();
    peek_kind(&mut ahead) == TokenKind::Colon
}

/// Parses a block delimited by braces.
///
/// Grammar: `block := "{" statement* "}"`
///
/// # Errors
/// Returns a `ParseError` if the opening brace is missing, a statement fails
/// to parse, or the input ends before the closing brace.
pub fn parse_block<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Vec<Statement>>
    where I: Iterator<Item = &'a Token> + Clone
{
    expect(tokens, TokenKind::LBrace, "'{'")?;

    let mut statements = Vec::new();
    loop {
        match peek_kind(tokens) {
            TokenKind::RBrace => {
                tokens.next();
                return Ok(statements);
            },
            TokenKind::Eof => return Err(unexpected(tokens.peek().copied(), "'}'")),
            _ => statements.push(ensure_sufficient_stack(|| parse_statement(tokens))?),
        }
    }
}

/// Parses an `if` statement with any number of `elseif` arms and an optional
/// `else`.
///
/// Syntax:
/// ```text
///     if (condition) { ... }
///     elseif (condition) { ... }
///     else { ... }
/// ```
fn parse_if<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Statement>
    where I: Iterator<Item = &'a Token> + Clone
{
    let line = expect(tokens, TokenKind::If, "'if'")?.line;
    let condition = parse_condition(tokens, "if")?;
    let then_body = parse_block(tokens)?;

    let mut else_if_branches = Vec::new();
    while tokens.next_if(|t| t.kind == TokenKind::ElseIf).is_some() {
        let condition = parse_condition(tokens, "elseif")?;
        let body = parse_block(tokens)?;
        else_if_branches.push(ElseIfBranch { condition, body });
    }

    let else_body = if tokens.next_if(|t| t.kind == TokenKind::Else).is_some() {
        parse_block(tokens)?
    } else {
        Vec::new()
    };

    Ok(Statement::If { condition,
                       then_body,
                       else_if_branches,
                       else_body,
                       line })
}

/// Parses a parenthesized condition.
fn parse_condition<'a, I>(tokens: &mut Peekable<I>, keyword: &str) -> ParseResult<Expr>
    where I: Iterator<Item = &'a Token> + Clone
{
    expect(tokens, TokenKind::LParen, &format!("'(' after '{keyword}'"))?;
    let condition = parse_expression(tokens)?;
    expect(tokens, TokenKind::RParen, "')' after condition")?;
    Ok(condition)
}

/// Parses `for name: [start, end], { ... }`.
fn parse_for<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Statement>
    where I: Iterator<Item = &'a Token> + Clone
{
    let line = expect(tokens, TokenKind::For, "'for'")?.line;
    let iterator = parse_identifier(tokens, "loop variable name")?;

    expect(tokens, TokenKind::Colon, "':' after loop variable")?;
    expect(tokens, TokenKind::LBracket, "'[' before loop range")?;
    let start = parse_expression(tokens)?;
    expect(tokens, TokenKind::Comma, "',' between loop bounds")?;
    let end = parse_expression(tokens)?;
    expect(tokens, TokenKind::RBracket, "']' after loop range")?;
    expect(tokens, TokenKind::Comma, "',' before loop body")?;
    let body = parse_block(tokens)?;

    Ok(Statement::For { iterator,
                        start,
                        end,
                        body,
                        line })
}

/// Parses `return;` or `return value;`.
fn parse_return<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Statement>
    where I: Iterator<Item = &'a Token> + Clone
{
    let line = expect(tokens, TokenKind::Return, "'return'")?.line;

    let value = if peek_kind(tokens) == TokenKind::Semicolon {
        None
    } else {
        Some(parse_expression(tokens)?)
    };
    expect(tokens, TokenKind::Semicolon, "';' after return")?;

    Ok(Statement::Return { value, line })
}

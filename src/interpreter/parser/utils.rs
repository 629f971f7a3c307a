use std::iter::Peekable;

use crate::{
    ast::Parameter,
    error::ParseError,
    interpreter::{
        lexer::{Token, TokenKind},
        parser::core::ParseResult,
    },
};

/// Returns the kind of the next token, treating an exhausted stream as
/// [`TokenKind::Eof`].
pub(in crate::interpreter::parser) fn peek_kind<'a, I>(tokens: &mut Peekable<I>) -> TokenKind
    where I: Iterator<Item = &'a Token>
{
    tokens.peek().map_or(TokenKind::Eof, |token| token.kind)
}

/// Builds the error for finding `token` where `expected` was required.
///
/// The end-of-input token, or no token at all, produces
/// `UnexpectedEndOfInput`.
pub(in crate::interpreter::parser) fn unexpected(token: Option<&Token>, expected: &str)
                                                 -> ParseError {
    match token {
        Some(token) if token.kind != TokenKind::Eof => {
            ParseError::UnexpectedToken { expected: expected.to_string(),
                                          found:    token.lexeme.clone(),
                                          line:     token.line,
                                          column:   token.column, }
        },
        Some(token) => ParseError::UnexpectedEndOfInput { expected: expected.to_string(),
                                                          line:     token.line,
                                                          column:   token.column, },
        None => ParseError::UnexpectedEndOfInput { expected: expected.to_string(),
                                                   line:     0,
                                                   column:   0, },
    }
}

/// Consumes the next token if it has the given kind.
///
/// # Errors
/// Returns `unexpected(next, expected)` otherwise, leaving the token in place.
pub(in crate::interpreter::parser) fn expect<'a, I>(tokens: &mut Peekable<I>,
                                                    kind: TokenKind,
                                                    expected: &str)
                                                    -> ParseResult<&'a Token>
    where I: Iterator<Item = &'a Token>
{
    if let Some(token) = tokens.next_if(|t| t.kind == kind) {
        return Ok(token);
    }
    Err(unexpected(tokens.peek().copied(), expected))
}

/// Parses a comma-separated list of items until a closing token.
///
/// This utility is shared by bracketed name lists, value lists, parameter
/// lists and call arguments. An immediately encountered closing token
/// produces an empty list.
///
/// Grammar (simplified): `list := (item ("," item)*)? closing`
///
/// # Parameters
/// - `tokens`: Token iterator positioned after the opening delimiter.
/// - `parse_item`: Function used to parse each list element.
/// - `closing`: The token kind that terminates the list.
/// - `expected`: How to describe the closing token in errors, e.g. `']'`.
pub(in crate::interpreter::parser) fn parse_comma_separated<'a, I, T>(
    tokens: &mut Peekable<I>,
    parse_item: impl Fn(&mut Peekable<I>) -> ParseResult<T>,
    closing: TokenKind,
    expected: &str)
    -> ParseResult<Vec<T>>
    where I: Iterator<Item = &'a Token> + Clone
{
    let mut items = Vec::new();
    if tokens.next_if(|t| t.kind == closing).is_some() {
        return Ok(items);
    }
    loop {
        items.push(parse_item(tokens)?);
        match tokens.peek() {
            Some(token) if token.kind == TokenKind::Comma => {
                tokens.next();
            },
            Some(token) if token.kind == closing => {
                tokens.next();
                break;
            },
            other => {
                return Err(unexpected(other.copied(), &format!("',' or {expected}")));
            },
        }
    }
    Ok(items)
}

/// Parses a plain identifier and returns its name.
///
/// # Errors
/// Returns `unexpected(next, expected)` if the next token is not an
/// identifier.
pub(in crate::interpreter::parser) fn parse_identifier<'a, I>(tokens: &mut Peekable<I>,
                                                              expected: &str)
                                                              -> ParseResult<String>
    where I: Iterator<Item = &'a Token>
{
    expect(tokens, TokenKind::Identifier, expected).map(|token| token.lexeme.clone())
}

/// Parses a type name: one of the built-in type keywords or a struct name.
pub(in crate::interpreter::parser) fn parse_type<'a, I>(tokens: &mut Peekable<I>)
                                                        -> ParseResult<String>
    where I: Iterator<Item = &'a Token>
{
    let is_type = |t: &&Token| {
        matches!(t.kind,
                 TokenKind::Int
                 | TokenKind::Float
                 | TokenKind::String
                 | TokenKind::Bool
                 | TokenKind::Identifier)
    };
    match tokens.next_if(is_type) {
        Some(token) => Ok(token.lexeme.clone()),
        None => Err(unexpected(tokens.peek().copied(), "type name")),
    }
}

/// Parses a `type name` pair, as used in parameter and field lists.
pub(in crate::interpreter::parser) fn parse_parameter<'a, I>(tokens: &mut Peekable<I>)
                                                             -> ParseResult<Parameter>
    where I: Iterator<Item = &'a Token>
{
    let type_name = parse_type(tokens)?;
    let name = parse_identifier(tokens, "parameter name")?;
    Ok(Parameter { type_name, name })
}

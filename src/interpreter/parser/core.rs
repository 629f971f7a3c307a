use std::iter::Peekable;

use tracing::debug;

use crate::{
    ast::{Expr, Program},
    error::ParseError,
    interpreter::{
        lexer::{Token, TokenKind},
        parser::{binary::parse_ternary, definition::parse_definition, utils::peek_kind},
    },
    util::stack::ensure_sufficient_stack,
};

pub type ParseResult<T> = Result<T, ParseError>;

/// Parses a complete program.
///
/// A program is a sequence of `define` forms terminated by the end-of-input
/// token. Parsing stops at the first error. Before the error is returned the
/// stream is advanced past the next `;`, so the failed definition does not
/// leak into whatever the caller does with the remaining tokens.
///
/// # Parameters
/// - `tokens`: The output of [`tokenize`](crate::interpreter::lexer::tokenize).
///
/// # Returns
/// The parsed [`Program`].
///
/// # Example
/// ```
/// use npp::{
///     ast::Definition,
///     interpreter::{lexer::tokenize, parser::core::parse},
/// };
///
/// let tokens = tokenize("define func[Main]: [], { return 1; }").unwrap();
/// let program = parse(&tokens).unwrap();
///
/// assert!(matches!(&program.definitions[0], Definition::Func(f) if f.name == "Main"));
/// ```
pub fn parse(tokens: &[Token]) -> ParseResult<Program> {
    let mut iter = tokens.iter().peekable();
    let mut definitions = Vec::new();

    while peek_kind(&mut iter) != TokenKind::Eof {
        match parse_definition(&mut iter) {
            Ok(definition) => definitions.push(definition),
            Err(e) => {
                synchronize(&mut iter);
                debug!(error = %e, "parse failed");
                return Err(e);
            },
        }
    }

    debug!(definitions = definitions.len(), "parsed program");
    Ok(Program { definitions })
}

/// Skips forward to just past the next `;`, or to the end of input.
fn synchronize<'a, I>(tokens: &mut Peekable<I>)
    where I: Iterator<Item = &'a Token>
{
    while let Some(token) = tokens.next_if(|t| t.kind != TokenKind::Eof) {
        if token.kind == TokenKind::Semicolon {
            break;
        }
    }
}

/// Parses a full expression.
///
/// This is the entry point for expression parsing. It begins at the
/// lowest-precedence level, the ternary, and recursively descends through the
/// precedence hierarchy.
///
/// Grammar: `expression := ternary`
///
/// Parenthesized expressions come back through here, so this is where the
/// native stack is grown for deep nesting.
pub fn parse_expression<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a Token> + Clone
{
    ensure_sufficient_stack(|| parse_ternary(tokens))
}

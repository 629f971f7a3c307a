use std::iter::Peekable;

use crate::{
    ast::{Definition, FuncDefinition, StructDefinition, VarDefinition},
    interpreter::{
        lexer::{Token, TokenKind},
        parser::{
            core::{ParseResult, parse_expression},
            statement::parse_block,
            utils::{expect, parse_comma_separated, parse_identifier, parse_parameter, parse_type,
                    peek_kind},
        },
    },
};

/// Parses one `define` form.
///
/// The word after `define` selects the form:
///
/// ```text
/// define struct[Name]: [type field, ...];
/// define func[Name]: [type param, ...], { statements }
/// define type[name, ...]: [expr, ...];
/// ```
///
/// # Errors
/// Returns a `ParseError` if `define` is missing or the selected form is
/// malformed.
pub fn parse_definition<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Definition>
    where I: Iterator<Item = &'a Token> + Clone
{
    let line = expect(tokens, TokenKind::Define, "'define'")?.line;

    match peek_kind(tokens) {
        TokenKind::Struct => parse_struct_definition(tokens, line).map(Definition::Struct),
        TokenKind::Func => parse_func_definition(tokens, line).map(Definition::Func),
        _ => parse_var_definition(tokens, line).map(Definition::Var),
    }
}

/// Parses `struct[Name]: [type field, ...];` after `define`.
fn parse_struct_definition<'a, I>(tokens: &mut Peekable<I>,
                                  line: usize)
                                  -> ParseResult<StructDefinition>
    where I: Iterator<Item = &'a Token> + Clone
{
    expect(tokens, TokenKind::Struct, "'struct'")?;
    let name = parse_bracketed_name(tokens, "struct name")?;

    expect(tokens, TokenKind::Colon, "':' after struct name")?;
    expect(tokens, TokenKind::LBracket, "'[' before struct fields")?;
    let fields = parse_comma_separated(tokens, parse_parameter, TokenKind::RBracket, "']'")?;
    expect(tokens, TokenKind::Semicolon, "';' after definition")?;

    Ok(StructDefinition { name, fields, line })
}

/// Parses `func[Name]: [type param, ...], { statements }` after `define`.
///
/// Unlike the other forms, a function definition is closed by its body and
/// takes no trailing `;`.
fn parse_func_definition<'a, I>(tokens: &mut Peekable<I>, line: usize) -> ParseResult<FuncDefinition>
    where I: Iterator<Item = &'a Token> + Clone
{
    expect(tokens, TokenKind::Func, "'func'")?;
    let name = parse_bracketed_name(tokens, "function name")?;

    expect(tokens, TokenKind::Colon, "':' after function name")?;
    expect(tokens, TokenKind::LBracket, "'[' before parameters")?;
    let parameters = parse_comma_separated(tokens, parse_parameter, TokenKind::RBracket, "']'")?;
    expect(tokens, TokenKind::Comma, "',' before function body")?;
    let body = parse_block(tokens)?;

    Ok(FuncDefinition { name,
                        parameters,
                        body,
                        line })
}

/// Parses `type[name, ...]: [expr, ...];` after `define`.
///
/// The counts of names and values are not compared here; a mismatch is a
/// runtime error when the definition executes.
fn parse_var_definition<'a, I>(tokens: &mut Peekable<I>, line: usize) -> ParseResult<VarDefinition>
    where I: Iterator<Item = &'a Token> + Clone
{
    let type_name = parse_type(tokens)?;

    expect(tokens, TokenKind::LBracket, "'[' after type")?;
    let names = parse_comma_separated(tokens,
                                      |t| parse_identifier(t, "variable name"),
                                      TokenKind::RBracket,
                                      "']'")?;

    expect(tokens, TokenKind::Colon, "':' after variable names")?;
    expect(tokens, TokenKind::LBracket, "'[' before values")?;
    let values = parse_comma_separated(tokens, parse_expression, TokenKind::RBracket, "']'")?;
    expect(tokens, TokenKind::Semicolon, "';' after definition")?;

    Ok(VarDefinition { type_name,
                       names,
                       values,
                       line })
}

/// Parses `[Name]`.
fn parse_bracketed_name<'a, I>(tokens: &mut Peekable<I>, what: &str) -> ParseResult<String>
    where I: Iterator<Item = &'a Token>
{
    expect(tokens, TokenKind::LBracket, &format!("'[' before {what}"))?;
    let name = parse_identifier(tokens, what)?;
    expect(tokens, TokenKind::RBracket, &format!("']' after {what}"))?;
    Ok(name)
}

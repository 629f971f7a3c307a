/// Parser entry points.
///
/// Holds `parse`, which turns a whole token stream into a [`Program`], and
/// `parse_expression`, the root of the expression grammar.
///
/// [`Program`]: crate::ast::Program
pub mod core;

/// Shared token helpers.
///
/// Peeking, expecting specific tokens, comma separated lists, and the error
/// constructor used by every grammar rule.
pub mod utils;

/// `define` forms.
///
/// Variable groups, struct declarations and function declarations, which
/// appear both at the top level and inside bodies.
pub mod definition;

/// Statements and blocks.
///
/// `if`/`elseif`/`else`, `for`, `return`, assignments and expression
/// statements.
pub mod statement;

/// Binary operator precedence levels.
///
/// Ternary down to multiplicative; each level is left-associative except the
/// ternary.
pub mod binary;

/// Unary minus and primary expressions.
///
/// Literals, parenthesized expressions, names, dotted names and calls.
pub mod unary;

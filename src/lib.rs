//! # npp
//!
//! npp is an embeddable interpreter for a small, explicitly typed scripting
//! language written in Rust. Programs are sequences of `define` forms; an
//! optional `Main` function is the entry point. The host decides which dotted
//! functions (`console.print`, `math.sqrt`, ...) scripts may call.

#![warn(
    clippy::redundant_clone,
    clippy::needless_pass_by_value,
    clippy::similar_names,
    clippy::large_enum_variant,
    clippy::string_lit_as_bytes,
    clippy::match_same_arms,
    clippy::cargo,
    clippy::nursery,
    clippy::perf,
    clippy::style,
    clippy::suspicious,
    clippy::correctness,
    clippy::complexity,
    clippy::pedantic,
)]
#![allow(clippy::missing_errors_doc)]

use crate::{
    error::Error,
    interpreter::{evaluator::Interpreter, value::Value},
};

/// Defines the structure of parsed programs.
///
/// This module declares the definitions, statements and expressions that
/// make up a program as a tree. The tree is built by the parser and walked by
/// the evaluator; every node carries the source line it came from.
pub mod ast;
/// Provides unified error types for lexing, parsing and evaluation.
///
/// Every failure is reported under one of five kinds (lexer, parser,
/// runtime, type, name) together with its source location.
pub mod error;
/// Orchestrates the entire process of program execution.
///
/// This module ties together lexing, parsing, evaluation, runtime values,
/// scopes and host functions.
pub mod interpreter;
/// General utilities for safe numeric conversion and stack growth.
pub mod util;

/// The interpreter version reported by `system.version` and the REPL banner.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Runs a program in a fresh interpreter with the standard host functions.
///
/// # Returns
/// The value returned by `Main`, or `None` if the program defines no `Main`.
///
/// # Errors
/// Returns the first lexical, parse or runtime error. A `system.exit` call
/// surfaces as an error whose [`Error::exit_code`] is set.
///
/// # Examples
/// ```
/// use npp::{interpreter::value::Value, run};
///
/// let source = "define func[Main]: [], { return 2 + 2; }";
/// assert_eq!(run(source).unwrap(), Some(Value::Integer(4)));
///
/// // `x` is never defined.
/// let err = run("define int[y]: [x + 1];").unwrap_err();
/// assert_eq!(err.to_string(), "NameError: Undefined variable 'x' (line 1)");
/// ```
pub fn run(source: &str) -> Result<Option<Value>, Error> {
    Interpreter::default().run(source)
}

use std::fmt;

use thiserror::Error;

/// Lexical errors.
///
/// Raised while turning raw source text into tokens: unknown characters,
/// half-written operators, and unterminated strings or block comments.
pub mod lex_error;
/// Parsing errors.
///
/// Raised when the token stream does not match the grammar. Every variant
/// carries the line and column of the offending token.
pub mod parse_error;
/// Runtime errors.
///
/// Contains all error types that can be raised during evaluation, grouped by
/// [`ErrorKind`] into plain runtime failures, type errors, and name errors.
pub mod runtime_error;

pub use lex_error::LexError;
pub use parse_error::ParseError;
pub use runtime_error::RuntimeError;

/// The category an error is reported under.
///
/// Type and name errors are refinements of runtime errors; they are kept
/// distinct so that hosts can tell operand mismatches and unbound names apart
/// from other failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Malformed token text.
    Lexer,
    /// Grammar violation.
    Parser,
    /// Any evaluation failure not covered by a more specific kind.
    Runtime,
    /// Operand or argument of the wrong kind.
    Type,
    /// Unbound variable or function.
    Name,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Lexer => "LexerError",
            Self::Parser => "ParserError",
            Self::Runtime => "RuntimeError",
            Self::Type => "TypeError",
            Self::Name => "NameError",
        };
        f.write_str(name)
    }
}

/// A source position suffix such as ` (line 3, column 7)`.
///
/// Renders nothing when the line is unknown and drops the column when only the
/// line is known. Zero counts as unknown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Location {
    pub line:   Option<usize>,
    pub column: Option<usize>,
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.line.filter(|&l| l > 0), self.column.filter(|&c| c > 0)) {
            (Some(line), Some(column)) => write!(f, " (line {line}, column {column})"),
            (Some(line), None) => write!(f, " (line {line})"),
            (None, _) => Ok(()),
        }
    }
}

/// Any error that can escape from running a program.
///
/// The `Display` output is the formatted diagnostic shown to users, e.g.
/// `NameError: Undefined function: foo (line 1)`.
#[derive(Debug, Error)]
pub enum Error {
    #[error("{kind}: {0}{location}", kind = ErrorKind::Lexer, location = .0.location())]
    Lex(#[from] LexError),
    #[error("{kind}: {0}{location}", kind = ErrorKind::Parser, location = .0.location())]
    Parse(#[from] ParseError),
    #[error("{kind}: {0}{location}", kind = .0.kind(), location = .0.location())]
    Runtime(#[from] RuntimeError),
}

impl Error {
    /// Returns the category this error is reported under.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Lex(_) => ErrorKind::Lexer,
            Self::Parse(_) => ErrorKind::Parser,
            Self::Runtime(e) => e.kind(),
        }
    }

    /// Returns the process exit code requested by `system.exit`, if this error
    /// is that request rather than a failure.
    #[must_use]
    pub const fn exit_code(&self) -> Option<i32> {
        match self {
            Self::Runtime(RuntimeError::Exit { code }) => Some(*code),
            _ => None,
        }
    }
}

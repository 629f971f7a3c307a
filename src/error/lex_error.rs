use thiserror::Error;

use crate::error::Location;

/// Represents all errors that can occur while tokenizing source text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LexError {
    /// A character that starts no token.
    #[error("Unexpected character '{character}'")]
    UnexpectedCharacter {
        /// The offending character.
        character: char,
        /// The source line where the error occurred.
        line:      usize,
        /// The source column where the error occurred.
        column:    usize,
    },
    /// One of `=`, `!`, `&`, `|` without the second character that would make
    /// it an operator.
    #[error("Unexpected '{character}', did you mean '{expected}'?")]
    IncompleteOperator {
        /// The lone character.
        character: char,
        /// The two-character operator it most likely belongs to.
        expected:  &'static str,
        /// The source line where the error occurred.
        line:      usize,
        /// The source column where the error occurred.
        column:    usize,
    },
    /// A string literal with no closing quote.
    #[error("Unterminated string literal")]
    UnterminatedString {
        /// The line of the opening quote.
        line:   usize,
        /// The column of the opening quote.
        column: usize,
    },
    /// A `--/` block comment with no closing `\--`.
    #[error("Unterminated block comment")]
    UnterminatedComment {
        /// The line where the comment opens.
        line:   usize,
        /// The column where the comment opens.
        column: usize,
    },
}

impl LexError {
    /// Where the error was detected.
    #[must_use]
    pub const fn location(&self) -> Location {
        let (Self::UnexpectedCharacter { line, column, .. }
             | Self::IncompleteOperator { line, column, .. }
             | Self::UnterminatedString { line, column }
             | Self::UnterminatedComment { line, column }) = self;
        Location { line:   Some(*line),
                   column: Some(*column), }
    }
}

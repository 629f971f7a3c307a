use thiserror::Error;

use crate::error::Location;

/// Represents all errors that can occur while parsing a token stream.
///
/// Messages follow the shape `Expected <what>, got '<lexeme>'` so that the
/// offending token is always visible.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// Found a token other than the one the grammar requires here.
    #[error("Expected {expected}, got '{found}'")]
    UnexpectedToken {
        /// Description of what the grammar required.
        expected: String,
        /// The lexeme that was found instead.
        found:    String,
        /// The source line where the error occurred.
        line:     usize,
        /// The source column where the error occurred.
        column:   usize,
    },
    /// Reached the end of input while a construct was still open.
    #[error("Expected {expected}, got end of input")]
    UnexpectedEndOfInput {
        /// Description of what the grammar required.
        expected: String,
        /// The source line where the error occurred.
        line:     usize,
        /// The source column where the error occurred.
        column:   usize,
    },
    /// A keyword that cannot begin or continue an expression.
    #[error("Unexpected keyword '{keyword}' in expression")]
    UnexpectedKeyword {
        /// The keyword lexeme.
        keyword: String,
        /// The source line where the error occurred.
        line:    usize,
        /// The source column where the error occurred.
        column:  usize,
    },
}

impl ParseError {
    /// Where the error was detected.
    #[must_use]
    pub const fn location(&self) -> Location {
        let (Self::UnexpectedToken { line, column, .. }
             | Self::UnexpectedEndOfInput { line, column, .. }
             | Self::UnexpectedKeyword { line, column, .. }) = self;
        Location { line:   Some(*line),
                   column: Some(*column), }
    }

    /// The source line where the error occurred.
    #[must_use]
    pub const fn line(&self) -> usize {
        match self {
            Self::UnexpectedToken { line, .. }
            | Self::UnexpectedEndOfInput { line, .. }
            | Self::UnexpectedKeyword { line, .. } => *line,
        }
    }
}

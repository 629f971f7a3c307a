use thiserror::Error;

use crate::error::{ErrorKind, Location};

/// Represents all errors that can occur during evaluation.
///
/// Every variant except [`RuntimeError::Exit`] is a failure. `Exit` is the
/// request made by `system.exit`; it unwinds like an error so that the host
/// decides how to end the process.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RuntimeError {
    /// Read of a variable that is bound nowhere in the scope chain.
    #[error("Undefined variable '{name}'")]
    UndefinedVariable {
        /// The name of the variable.
        name: String,
        /// The source line where the error occurred.
        line: usize,
    },
    /// Call of a name that is neither a host function nor a user function.
    #[error("Undefined function: {name}")]
    UndefinedFunction {
        /// The name of the function.
        name: String,
        /// The source line where the error occurred.
        line: usize,
    },
    /// A user function called with the wrong number of arguments.
    #[error("Function '{name}' expects {expected} arguments, got {found}")]
    ArityMismatch {
        /// The name of the function.
        name:     String,
        /// Number of declared parameters.
        expected: usize,
        /// Number of arguments supplied.
        found:    usize,
        /// The source line where the error occurred.
        line:     usize,
    },
    /// A host function called with an unsupported number of arguments.
    #[error("{name}() expects {expected}")]
    HostArity {
        /// The dotted host function name.
        name:     String,
        /// Human readable argument count, e.g. `2 arguments`.
        expected: String,
        /// The source line where the error occurred.
        line:     usize,
    },
    /// A host function received an argument of the wrong kind.
    #[error("{name}() requires {expected}")]
    HostArgument {
        /// The dotted host function name.
        name:     String,
        /// What the function accepts, e.g. `integer arguments`.
        expected: String,
        /// The source line where the error occurred.
        line:     usize,
    },
    /// A host function received a well-typed but unusable argument.
    #[error("{name}() requires {details}")]
    InvalidArgument {
        /// The dotted host function name.
        name:    String,
        /// Why the argument was rejected.
        details: String,
        /// The source line where the error occurred.
        line:    usize,
    },
    /// A file operation failed.
    #[error("Failed to {action} file: {path}")]
    Io {
        /// What was attempted: `open`, `write`, `create`.
        action: &'static str,
        /// The path involved.
        path:   String,
        /// The source line where the error occurred.
        line:   usize,
    },
    /// Binary operator applied to operands it does not support.
    #[error("Unsupported operand types for '{op}': {left} and {right}")]
    OperandMismatch {
        /// The operator symbol.
        op:    &'static str,
        /// Type name of the left operand.
        left:  &'static str,
        /// Type name of the right operand.
        right: &'static str,
        /// The source line where the error occurred.
        line:  usize,
    },
    /// Unary operator applied to an operand it does not support.
    #[error("Unary '{op}' requires integer operand, got {found}")]
    UnaryOperand {
        /// The operator symbol.
        op:    &'static str,
        /// Type name of the operand.
        found: &'static str,
        /// The source line where the error occurred.
        line:  usize,
    },
    /// `&&` or `||` applied to a non-boolean operand.
    #[error("Logical '{op}' requires boolean operands, got {found}")]
    LogicalOperand {
        /// The operator symbol.
        op:    &'static str,
        /// Type name of the offending operand.
        found: &'static str,
        /// The source line where the error occurred.
        line:  usize,
    },
    /// A `for` range bound that is not an integer.
    #[error("For loop range must be integers")]
    LoopBounds {
        /// The source line where the error occurred.
        line: usize,
    },
    /// A `define` with a different number of names and values.
    #[error("Mismatch between number of names and values in definition ({names} names, {values} values)")]
    DefinitionMismatch {
        /// Number of names.
        names:  usize,
        /// Number of values.
        values: usize,
        /// The source line where the error occurred.
        line:   usize,
    },
    /// Integer division by zero.
    #[error("Division by zero")]
    DivisionByZero {
        /// The source line where the error occurred.
        line: usize,
    },
    /// Integer remainder by zero.
    #[error("Modulo by zero")]
    ModuloByZero {
        /// The source line where the error occurred.
        line: usize,
    },
    /// Arithmetic operation overflowed 32 bits.
    #[error("Integer overflow in '{op}'")]
    Overflow {
        /// The operator symbol.
        op:   &'static str,
        /// The source line where the error occurred.
        line: usize,
    },
    /// A numeric literal that does not fit its value type.
    #[error("Invalid numeric literal '{text}'")]
    InvalidLiteral {
        /// The literal text.
        text: String,
        /// The source line where the error occurred.
        line: usize,
    },
    /// An integer too large to take part in float arithmetic without rounding.
    #[error("Integer {value} cannot be represented exactly as a float")]
    PrecisionLoss {
        /// The integer operand.
        value: i32,
        /// The source line where the error occurred.
        line:  usize,
    },
    /// A dotted name used as a value instead of being called.
    #[error("Member access not yet implemented for non-function contexts ('{object}.{member}')")]
    MemberAccess {
        /// The part before the dot.
        object: String,
        /// The part after the dot.
        member: String,
        /// The source line where the error occurred.
        line:   usize,
    },
    /// Too many nested user function calls.
    #[error("Maximum recursion depth exceeded ({limit})")]
    RecursionLimit {
        /// The configured ceiling.
        limit: usize,
        /// The source line where the error occurred.
        line:  usize,
    },
    /// Program requested termination through `system.exit`.
    #[error("Program exited with code {code}")]
    Exit {
        /// The requested process exit code.
        code: i32,
    },
}

impl RuntimeError {
    /// Returns the reporting category of this error.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::UndefinedVariable { .. } | Self::UndefinedFunction { .. } => ErrorKind::Name,
            Self::HostArgument { .. }
            | Self::OperandMismatch { .. }
            | Self::UnaryOperand { .. }
            | Self::LogicalOperand { .. }
            | Self::LoopBounds { .. } => ErrorKind::Type,
            _ => ErrorKind::Runtime,
        }
    }

    /// The source line where the error occurred, if known.
    #[must_use]
    pub const fn line(&self) -> Option<usize> {
        match self {
            Self::UndefinedVariable { line, .. }
            | Self::UndefinedFunction { line, .. }
            | Self::ArityMismatch { line, .. }
            | Self::HostArity { line, .. }
            | Self::HostArgument { line, .. }
            | Self::InvalidArgument { line, .. }
            | Self::Io { line, .. }
            | Self::OperandMismatch { line, .. }
            | Self::UnaryOperand { line, .. }
            | Self::LogicalOperand { line, .. }
            | Self::LoopBounds { line }
            | Self::DefinitionMismatch { line, .. }
            | Self::DivisionByZero { line }
            | Self::ModuloByZero { line }
            | Self::Overflow { line, .. }
            | Self::InvalidLiteral { line, .. }
            | Self::PrecisionLoss { line, .. }
            | Self::MemberAccess { line, .. }
            | Self::RecursionLimit { line, .. } => Some(*line),
            Self::Exit { .. } => None,
        }
    }

    /// Where the error was detected. Runtime errors are located by line only.
    #[must_use]
    pub const fn location(&self) -> Location {
        Location { line:   self.line(),
                   column: None, }
    }
}

/// Core evaluation state and program execution.
///
/// Contains the [`Interpreter`] itself, the control-flow signal returned by
/// statements, and the program execution protocol.
pub mod core;

/// Statement execution.
///
/// Variable definitions, assignments, `if` chains, `for` loops, `return`, and
/// expression statements.
pub mod statement;

/// Expression evaluation.
///
/// Literals, names, ternaries, member access and call argument evaluation.
pub mod expression;

/// Binary operator evaluation.
///
/// Arithmetic, comparison and logical operators over every supported pair of
/// operand types, with a type error for every other pair.
pub mod binary;

/// Unary operator evaluation.
///
/// Implements arithmetic negation.
pub mod unary;

/// Function calls.
///
/// Resolves a callee to a host function or a user function and invokes it
/// with the recursion ceiling enforced.
pub mod function;

pub use self::core::{EvalResult, Flow, Interpreter, MAIN_FUNCTION, MAX_RECURSION_DEPTH};

/// Numeric conversion helpers.
///
/// This module provides checked conversions used by the evaluator: literal
/// text to 32-bit values, and integer to float promotion that refuses to round.
pub mod num;
/// Stack growth for deep recursion.
///
/// The parser and the evaluator both recurse once per nested expression,
/// statement and call. Wrapping those entry points keeps deep but legal
/// programs from overflowing the native stack.
pub mod stack;

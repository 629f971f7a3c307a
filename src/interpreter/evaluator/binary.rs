use std::cmp::Ordering;

use crate::{
    ast::{BinaryOperator, Expr},
    error::RuntimeError,
    interpreter::{
        evaluator::core::{EvalResult, Interpreter},
        value::Value,
    },
    util::num::i32_to_f32_checked,
};

impl Interpreter {
    /// Evaluates `left op right`.
    ///
    /// `&&` and `||` short-circuit: the right operand is not evaluated when
    /// the left one decides the result. Every other operator evaluates both
    /// operands, left first, and hands them to [`apply_binary`].
    pub(crate) fn evaluate_binary(&mut self,
                                  op: BinaryOperator,
                                  left: &Expr,
                                  right: &Expr,
                                  line: usize)
                                  -> EvalResult<Value> {
        if matches!(op, BinaryOperator::And | BinaryOperator::Or) {
            let lhs = logical_operand(op, &self.evaluate(left)?, line)?;
            if lhs == (op == BinaryOperator::Or) {
                return Ok(Value::Boolean(lhs));
            }
            let rhs = logical_operand(op, &self.evaluate(right)?, line)?;
            return Ok(Value::Boolean(rhs));
        }

        let lhs = self.evaluate(left)?;
        let rhs = self.evaluate(right)?;
        apply_binary(op, &lhs, &rhs, line)
    }
}

/// Applies a binary operator to two evaluated operands.
///
/// | operands              | operators                        |
/// |-----------------------|----------------------------------|
/// | int, int              | arithmetic, comparison, equality |
/// | float or mixed number | arithmetic, comparison, equality |
/// | string, string        | `+`, comparison, equality        |
/// | bool, bool            | equality, `&&`, `||`             |
/// | nil, nil              | equality                         |
///
/// Integer arithmetic is checked and division truncates toward zero. In mixed
/// arithmetic the integer is converted to a float, which fails if it is too
/// large to convert exactly.
///
/// # Errors
/// - `OperandMismatch` for any operand pair not listed above.
/// - `DivisionByZero` / `ModuloByZero` for a zero divisor.
/// - `Overflow` when an integer result does not fit in 32 bits.
///
/// # Example
/// ```
/// use npp::{
///     ast::BinaryOperator,
///     interpreter::{evaluator::binary::apply_binary, value::Value},
/// };
///
/// let v = apply_binary(BinaryOperator::Div, &Value::Integer(-7), &Value::Integer(2), 1).unwrap();
/// assert_eq!(v, Value::Integer(-3));
///
/// let v = apply_binary(BinaryOperator::Add, &Value::Integer(1), &Value::Float(0.5), 1).unwrap();
/// assert_eq!(v, Value::Float(1.5));
///
/// assert!(apply_binary(BinaryOperator::Add, &Value::Integer(1), &Value::from("a"), 1).is_err());
/// ```
pub fn apply_binary(op: BinaryOperator,
                    left: &Value,
                    right: &Value,
                    line: usize)
                    -> EvalResult<Value> {
    match (left, right) {
        (Value::Integer(a), Value::Integer(b)) => integer_op(op, *a, *b, line),
        (Value::Float(a), Value::Float(b)) => float_op(op, *a, *b, line),
        (Value::Integer(a), Value::Float(b)) => {
            float_op(op, i32_to_f32_checked(*a, line)?, *b, line)
        },
        (Value::Float(a), Value::Integer(b)) => {
            float_op(op, *a, i32_to_f32_checked(*b, line)?, line)
        },
        (Value::String(a), Value::String(b)) => string_op(op, a, b, line),
        (Value::Boolean(a), Value::Boolean(b)) => match op {
            BinaryOperator::Equal => Ok(Value::Boolean(a == b)),
            BinaryOperator::NotEqual => Ok(Value::Boolean(a != b)),
            BinaryOperator::And => Ok(Value::Boolean(*a && *b)),
            BinaryOperator::Or => Ok(Value::Boolean(*a || *b)),
            _ => Err(mismatch(op, left, right, line)),
        },
        (Value::Nil, Value::Nil) => match op {
            BinaryOperator::Equal => Ok(Value::Boolean(true)),
            BinaryOperator::NotEqual => Ok(Value::Boolean(false)),
            _ => Err(mismatch(op, left, right, line)),
        },
        _ => Err(mismatch(op, left, right, line)),
    }
}

fn integer_op(op: BinaryOperator, a: i32, b: i32, line: usize) -> EvalResult<Value> {
    let overflow = || RuntimeError::Overflow { op: op.symbol(),
                                               line };
    let result = match op {
        BinaryOperator::Add => a.checked_add(b).ok_or_else(overflow)?,
        BinaryOperator::Sub => a.checked_sub(b).ok_or_else(overflow)?,
        BinaryOperator::Mul => a.checked_mul(b).ok_or_else(overflow)?,
        BinaryOperator::Div => {
            if b == 0 {
                return Err(RuntimeError::DivisionByZero { line });
            }
            a.checked_div(b).ok_or_else(overflow)?
        },
        BinaryOperator::Mod => {
            if b == 0 {
                return Err(RuntimeError::ModuloByZero { line });
            }
            a.checked_rem(b).ok_or_else(overflow)?
        },
        _ => return compared(op, a.cmp(&b), "int", line),
    };
    Ok(Value::Integer(result))
}

fn float_op(op: BinaryOperator, a: f32, b: f32, line: usize) -> EvalResult<Value> {
    let result = match op {
        BinaryOperator::Add => a + b,
        BinaryOperator::Sub => a - b,
        BinaryOperator::Mul => a * b,
        BinaryOperator::Div => {
            if b == 0.0 {
                return Err(RuntimeError::DivisionByZero { line });
            }
            a / b
        },
        BinaryOperator::Mod => {
            if b == 0.0 {
                return Err(RuntimeError::ModuloByZero { line });
            }
            a % b
        },
        // NaN compares unequal and unordered to everything.
        BinaryOperator::Equal => return Ok(Value::Boolean(a == b)),
        BinaryOperator::NotEqual => return Ok(Value::Boolean(a != b)),
        BinaryOperator::Less => return Ok(Value::Boolean(a < b)),
        BinaryOperator::Greater => return Ok(Value::Boolean(a > b)),
        BinaryOperator::LessEqual => return Ok(Value::Boolean(a <= b)),
        BinaryOperator::GreaterEqual => return Ok(Value::Boolean(a >= b)),
        BinaryOperator::And | BinaryOperator::Or => {
            return Err(RuntimeError::LogicalOperand { op: op.symbol(),
                                                      found: "float",
                                                      line });
        },
    };
    Ok(Value::Float(result))
}

fn string_op(op: BinaryOperator, a: &str, b: &str, line: usize) -> EvalResult<Value> {
    match op {
        BinaryOperator::Add => Ok(Value::String(format!("{a}{b}"))),
        BinaryOperator::Sub | BinaryOperator::Mul | BinaryOperator::Div | BinaryOperator::Mod => {
            Err(RuntimeError::OperandMismatch { op: op.symbol(),
                                                left: "string",
                                                right: "string",
                                                line })
        },
        _ => compared(op, a.cmp(b), "string", line),
    }
}

/// Result of a comparison or equality operator for `ordering`, or `None` if
/// `op` is not one.
const fn compare(op: BinaryOperator, ordering: Ordering) -> Option<bool> {
    match op {
        BinaryOperator::Equal => Some(ordering.is_eq()),
        BinaryOperator::NotEqual => Some(ordering.is_ne()),
        BinaryOperator::Less => Some(ordering.is_lt()),
        BinaryOperator::Greater => Some(ordering.is_gt()),
        BinaryOperator::LessEqual => Some(ordering.is_le()),
        BinaryOperator::GreaterEqual => Some(ordering.is_ge()),
        _ => None,
    }
}

fn compared(op: BinaryOperator,
            ordering: Ordering,
            operand: &'static str,
            line: usize)
            -> EvalResult<Value> {
    compare(op, ordering).map(Value::Boolean)
                         .ok_or(RuntimeError::LogicalOperand { op: op.symbol(),
                                                               found: operand,
                                                               line })
}

fn logical_operand(op: BinaryOperator, value: &Value, line: usize) -> EvalResult<bool> {
    match value {
        Value::Boolean(b) => Ok(*b),
        other => Err(RuntimeError::LogicalOperand { op: op.symbol(),
                                                    found: other.type_name(),
                                                    line }),
    }
}

fn mismatch(op: BinaryOperator, left: &Value, right: &Value, line: usize) -> RuntimeError {
    if matches!(op, BinaryOperator::And | BinaryOperator::Or) {
        let found = if matches!(left, Value::Boolean(_)) { right } else { left };
        return RuntimeError::LogicalOperand { op: op.symbol(),
                                              found: found.type_name(),
                                              line };
    }
    RuntimeError::OperandMismatch { op: op.symbol(),
                                    left: left.type_name(),
                                    right: right.type_name(),
                                    line }
}

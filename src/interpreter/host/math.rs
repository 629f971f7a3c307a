use crate::{
    error::RuntimeError,
    interpreter::{evaluator::EvalResult, host::int_arg, value::Value},
};

/// Absolute value of an integer.
///
/// # Example
/// ```
/// use npp::interpreter::{host::math::abs, value::Value};
///
/// assert_eq!(abs(&[Value::Integer(-7)], 1).unwrap(), Value::Integer(7));
/// assert!(abs(&[Value::Integer(i32::MIN)], 1).is_err());
/// ```
pub fn abs(args: &[Value], line: usize) -> EvalResult<Value> {
    let value = int_arg("math.abs", args, 0, "integer argument", line)?;
    value.checked_abs()
         .map(Value::Integer)
         .ok_or(RuntimeError::Overflow { op: "math.abs", line })
}

/// Smaller (`math.min`) or larger (`math.max`) of two integers.
pub fn min_max(name: &'static str, args: &[Value], line: usize) -> EvalResult<Value> {
    let a = int_arg(name, args, 0, "integer arguments", line)?;
    let b = int_arg(name, args, 1, "integer arguments", line)?;
    Ok(Value::Integer(if name == "math.min" { a.min(b) } else { a.max(b) }))
}

/// Integer power.
///
/// A negative exponent yields the truncated reciprocal: `0` for every base
/// except `1` and `-1`. Zero to a negative power has no value.
///
/// # Example
/// ```
/// use npp::interpreter::{host::math::pow, value::Value};
///
/// assert_eq!(pow(&[Value::Integer(2), Value::Integer(10)], 1).unwrap(), Value::Integer(1024));
/// assert_eq!(pow(&[Value::Integer(-1), Value::Integer(-3)], 1).unwrap(), Value::Integer(-1));
/// assert_eq!(pow(&[Value::Integer(5), Value::Integer(-1)], 1).unwrap(), Value::Integer(0));
/// ```
pub fn pow(args: &[Value], line: usize) -> EvalResult<Value> {
    let base = int_arg("math.pow", args, 0, "integer arguments", line)?;
    let exponent = int_arg("math.pow", args, 1, "integer arguments", line)?;

    if exponent < 0 {
        return match base {
            0 => {
                let details = "non-zero base for a negative exponent".to_string();
                Err(RuntimeError::InvalidArgument { name: "math.pow".to_string(),
                                                    details,
                                                    line })
            },
            1 => Ok(Value::Integer(1)),
            -1 => Ok(Value::Integer(if exponent % 2 == 0 { 1 } else { -1 })),
            _ => Ok(Value::Integer(0)),
        };
    }

    base.checked_pow(exponent.unsigned_abs())
        .map(Value::Integer)
        .ok_or(RuntimeError::Overflow { op: "math.pow", line })
}

/// Integer square root, rounded down.
pub fn sqrt(args: &[Value], line: usize) -> EvalResult<Value> {
    let value = int_arg("math.sqrt", args, 0, "integer argument", line)?;
    if value < 0 {
        return Err(RuntimeError::InvalidArgument { name: "math.sqrt".to_string(),
                                                   details: "non-negative argument".to_string(),
                                                   line });
    }
    Ok(Value::Integer(value.isqrt()))
}

/// `math.floor` and `math.ceil`. Integers are already whole, so the argument
/// is returned unchanged once its type is checked.
pub fn identity(name: &'static str, args: &[Value], line: usize) -> EvalResult<Value> {
    int_arg(name, args, 0, "integer argument", line).map(Value::Integer)
}

use rand::Rng;

use crate::interpreter::{
    evaluator::EvalResult,
    host::{float_arg, int_arg},
    value::Value,
};

/// Uniform integer in the inclusive range between the two bounds, in either
/// order.
///
/// # Example
/// ```
/// use npp::interpreter::{host::random::int, value::Value};
///
/// let Value::Integer(n) = int(&[Value::Integer(6), Value::Integer(1)], 1).unwrap() else {
///     panic!("expected an integer");
/// };
/// assert!((1..=6).contains(&n));
/// ```
pub fn int(args: &[Value], line: usize) -> EvalResult<Value> {
    let a = int_arg("random.int", args, 0, "integer arguments", line)?;
    let b = int_arg("random.int", args, 1, "integer arguments", line)?;
    let (low, high) = if a <= b { (a, b) } else { (b, a) };
    Ok(Value::Integer(rand::thread_rng().gen_range(low..=high)))
}

/// Uniform float in the half-open range between the two bounds, in either
/// order. Equal bounds return that bound.
pub fn float(args: &[Value], line: usize) -> EvalResult<Value> {
    let a = float_arg("random.float", args, 0, "decimal arguments", line)?;
    let b = float_arg("random.float", args, 1, "decimal arguments", line)?;
    let (low, high) = if a <= b { (a, b) } else { (b, a) };
    if low == high || !(high - low).is_finite() {
        return Ok(Value::Float(low));
    }
    Ok(Value::Float(rand::thread_rng().gen_range(low..high)))
}

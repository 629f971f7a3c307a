use crate::{
    ast::UnaryOperator,
    error::RuntimeError,
    interpreter::{
        evaluator::core::{EvalResult, Interpreter},
        value::Value,
    },
};

impl Interpreter {
    /// Evaluates a unary operation on a value.
    ///
    /// `Negate` is defined for integers only and is checked, so negating
    /// `i32::MIN` is an overflow rather than a wrap.
    ///
    /// # Example
    /// ```
    /// use npp::{
    ///     ast::UnaryOperator,
    ///     interpreter::{evaluator::Interpreter, value::Value},
    /// };
    ///
    /// let v = Interpreter::evaluate_unary(UnaryOperator::Negate, &Value::Integer(5), 1).unwrap();
    /// assert_eq!(v, Value::Integer(-5));
    ///
    /// assert!(Interpreter::evaluate_unary(UnaryOperator::Negate, &Value::Float(1.5), 1).is_err());
    /// ```
    pub fn evaluate_unary(op: UnaryOperator, value: &Value, line: usize) -> EvalResult<Value> {
        match (op, value) {
            (UnaryOperator::Negate, Value::Integer(n)) => {
                n.checked_neg()
                 .map(Value::Integer)
                 .ok_or(RuntimeError::Overflow { op: op.symbol(),
                                                 line })
            },
            (UnaryOperator::Negate, other) => {
                Err(RuntimeError::UnaryOperand { op: op.symbol(),
                                                 found: other.type_name(),
                                                 line })
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn negating_min_overflows() {
        let err = Interpreter::evaluate_unary(UnaryOperator::Negate, &Value::Integer(i32::MIN), 4);
        assert!(matches!(err, Err(RuntimeError::Overflow { op: "-", line: 4 })));
    }

    #[test]
    fn non_integer_operand() {
        let err = Interpreter::evaluate_unary(UnaryOperator::Negate, &Value::from("x"), 1).unwrap_err();
        assert_eq!(err.to_string(), "Unary '-' requires integer operand, got string");
    }
}

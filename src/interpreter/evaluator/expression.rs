use crate::{
    ast::{Expr, LiteralKind},
    error::RuntimeError,
    interpreter::{
        evaluator::core::{EvalResult, Interpreter},
        value::Value,
    },
    util::{
        num::{parse_float_literal, parse_integer_literal},
        stack::ensure_sufficient_stack,
    },
};

impl Interpreter {
    /// Evaluates an expression to a value.
    ///
    /// Deeply nested expressions grow the native stack on demand instead of
    /// overflowing it.
    ///
    /// # Example
    /// ```
    /// use npp::{
    ///     ast::{BinaryOperator, Expr, LiteralKind},
    ///     interpreter::{evaluator::Interpreter, value::Value},
    /// };
    ///
    /// let int = |text: &str| Expr::Literal { kind: LiteralKind::Int,
    ///                                        text: text.to_string(),
    ///                                        line: 1 };
    /// let expr = Expr::Binary { op:    BinaryOperator::Mul,
    ///                           left:  Box::new(int("6")),
    ///                           right: Box::new(int("7")),
    ///                           line:  1 };
    ///
    /// let mut interpreter = Interpreter::default();
    /// assert_eq!(interpreter.evaluate(&expr).unwrap(), Value::Integer(42));
    /// ```
    pub fn evaluate(&mut self, expr: &Expr) -> EvalResult<Value> {
        ensure_sufficient_stack(|| self.evaluate_inner(expr))
    }

    fn evaluate_inner(&mut self, expr: &Expr) -> EvalResult<Value> {
        match expr {
            Expr::Literal { kind, text, line } => evaluate_literal(*kind, text, *line),
            Expr::Identifier { name, line } => self.env.get(name, *line),
            Expr::Unary { op, operand, line } => {
                let value = self.evaluate(operand)?;
                Self::evaluate_unary(*op, &value, *line)
            },
            Expr::Binary { op,
                           left,
                           right,
                           line, } => self.evaluate_binary(*op, left, right, *line),
            Expr::Ternary { condition,
                            true_expr,
                            false_expr,
                            .. } => {
                if self.evaluate(condition)?.is_truthy() {
                    self.evaluate(true_expr)
                } else {
                    self.evaluate(false_expr)
                }
            },
            Expr::Call { callee,
                         arguments,
                         line, } => {
                let args = arguments.iter()
                                    .map(|arg| self.evaluate(arg))
                                    .collect::<EvalResult<Vec<_>>>()?;
                self.call_function(callee, args, *line)
            },
            Expr::MemberAccess { object,
                                 member,
                                 line, } => Err(RuntimeError::MemberAccess { object: object.clone(),
                                                                             member: member.clone(),
                                                                             line:   *line, }),
        }
    }
}

/// Turns literal text into a value of the literal's kind.
fn evaluate_literal(kind: LiteralKind, text: &str, line: usize) -> EvalResult<Value> {
    Ok(match kind {
        LiteralKind::Int => Value::Integer(parse_integer_literal(text, line)?),
        LiteralKind::Float => Value::Float(parse_float_literal(text, line)?),
        LiteralKind::String => Value::String(text.to_string()),
        LiteralKind::Bool => Value::Boolean(text == "true"),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn literals() {
        assert_eq!(evaluate_literal(LiteralKind::Int, "12", 1).unwrap(), Value::Integer(12));
        assert_eq!(evaluate_literal(LiteralKind::Float, "0.5", 1).unwrap(), Value::Float(0.5));
        assert_eq!(evaluate_literal(LiteralKind::Bool, "false", 1).unwrap(), Value::Boolean(false));
        assert_eq!(evaluate_literal(LiteralKind::String, "a b", 1).unwrap(),
                   Value::String("a b".to_string()));
    }

    #[test]
    fn oversized_integer_literal() {
        let err = evaluate_literal(LiteralKind::Int, "99999999999", 3).unwrap_err();
        assert!(matches!(err, RuntimeError::InvalidLiteral { line: 3, .. }));
    }

    #[test]
    fn member_access_is_not_a_value() {
        let expr = Expr::MemberAccess { object: "console".to_string(),
                                        member: "print".to_string(),
                                        line:   2, };
        let err = Interpreter::default().evaluate(&expr).unwrap_err();
        assert_eq!(err.to_string(),
                   "Member access not yet implemented for non-function contexts ('console.print')");
    }
}

use crate::{
    ast::{Definition, ElseIfBranch, Expr, Statement, VarDefinition},
    error::RuntimeError,
    interpreter::{
        evaluator::core::{EvalResult, Flow, Interpreter},
        value::Value,
    },
    util::stack::ensure_sufficient_stack,
};

impl Interpreter {
    /// Executes a single statement.
    ///
    /// Nested `define func` and `define struct` forms inside bodies are
    /// accepted but do nothing; only top-level ones are registered.
    ///
    /// # Returns
    /// `Flow::Return` if a `return` ran, `Flow::Continue` otherwise.
    pub fn execute_statement(&mut self, statement: &Statement) -> EvalResult<Flow> {
        match statement {
            Statement::Definition(Definition::Var(definition)) => {
                self.define_variables(definition)?;
                Ok(Flow::Continue)
            },
            Statement::Definition(Definition::Func(_) | Definition::Struct(_)) => {
                Ok(Flow::Continue)
            },
            Statement::Assignment { identifier,
                                    value,
                                    line, } => {
                let value = self.evaluate(value)?;
                self.env.set(identifier, value, *line)?;
                Ok(Flow::Continue)
            },
            Statement::Return { value, .. } => {
                let value = match value {
                    Some(expr) => self.evaluate(expr)?,
                    None => Value::Nil,
                };
                Ok(Flow::Return(value))
            },
            Statement::If { condition,
                            then_body,
                            else_if_branches,
                            else_body,
                            .. } => {
                self.execute_if(condition, then_body, else_if_branches, else_body)
            },
            Statement::For { iterator,
                             start,
                             end,
                             body,
                             line, } => self.execute_for(iterator, start, end, body, *line),
            Statement::Expression { expr, .. } => {
                self.evaluate(expr)?;
                Ok(Flow::Continue)
            },
        }
    }

    /// Executes statements in order, stopping at the first `return`.
    pub fn execute_block(&mut self, statements: &[Statement]) -> EvalResult<Flow> {
        for statement in statements {
            if let Flow::Return(value) =
                ensure_sufficient_stack(|| self.execute_statement(statement))?
            {
                return Ok(Flow::Return(value));
            }
        }
        Ok(Flow::Continue)
    }

    /// Binds each name of a variable group in the active frame.
    ///
    /// Initializers run left to right and each name is bound as soon as its
    /// value is known, so later initializers can read earlier names.
    ///
    /// # Errors
    /// `DefinitionMismatch` if the group has a different number of names and
    /// values; nothing is evaluated in that case.
    pub(crate) fn define_variables(&mut self, definition: &VarDefinition) -> EvalResult<()> {
        if definition.names.len() != definition.values.len() {
            return Err(RuntimeError::DefinitionMismatch { names:  definition.names.len(),
                                                          values: definition.values.len(),
                                                          line:   definition.line, });
        }

        for (name, expr) in definition.names.iter().zip(&definition.values) {
            let value = self.evaluate(expr)?;
            self.env.define(name, value);
        }
        Ok(())
    }

    /// Runs the body of the first arm whose condition is truthy, or the
    /// `else` body if none is. At most one body runs.
    fn execute_if(&mut self,
                  condition: &Expr,
                  then_body: &[Statement],
                  else_if_branches: &[ElseIfBranch],
                  else_body: &[Statement])
                  -> EvalResult<Flow> {
        if self.evaluate(condition)?.is_truthy() {
            return self.execute_block(then_body);
        }
        for branch in else_if_branches {
            if self.evaluate(&branch.condition)?.is_truthy() {
                return self.execute_block(&branch.body);
            }
        }
        self.execute_block(else_body)
    }

    /// Runs a `for` loop over the inclusive integer range `[start, end]`.
    ///
    /// The bounds are evaluated once. The loop variable is bound in the active
    /// frame and reset to the next integer before every pass, so assignments
    /// to it inside the body do not change the iteration count. An empty range
    /// runs nothing and leaves the loop variable unbound.
    ///
    /// # Errors
    /// `LoopBounds` if either bound is not an integer.
    fn execute_for(&mut self,
                   iterator: &str,
                   start: &Expr,
                   end: &Expr,
                   body: &[Statement],
                   line: usize)
                   -> EvalResult<Flow> {
        let start = self.evaluate(start)?;
        let end = self.evaluate(end)?;
        let (Value::Integer(start), Value::Integer(end)) = (start, end) else {
            return Err(RuntimeError::LoopBounds { line });
        };

        if start > end {
            return Ok(Flow::Continue);
        }

        self.env.define(iterator, Value::Integer(start));
        for i in start..=end {
            self.env.set(iterator, Value::Integer(i), line)?;
            if let Flow::Return(value) = self.execute_block(body)? {
                return Ok(Flow::Return(value));
            }
        }
        Ok(Flow::Continue)
    }
}

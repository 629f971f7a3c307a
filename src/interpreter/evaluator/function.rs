use std::rc::Rc;

use tracing::trace;

use crate::{
    ast::FuncDefinition,
    error::RuntimeError,
    interpreter::{
        evaluator::core::{EvalResult, Flow, Interpreter},
        value::Value,
    },
    util::stack::ensure_sufficient_stack,
};

impl Interpreter {
    /// Calls `name` with already evaluated arguments.
    ///
    /// Host functions take precedence over user functions of the same name.
    /// The outcome of each lookup is cached per name; registering a user
    /// function drops its cached entry so a redefinition takes effect.
    ///
    /// # Errors
    /// - `UndefinedFunction` if `name` resolves to nothing.
    /// - Any error raised by the callee.
    pub fn call_function(&mut self,
                         name: &str,
                         args: Vec<Value>,
                         line: usize)
                         -> EvalResult<Value> {
        if self.is_builtin(name) {
            return self.host.call(name, &args, line);
        }

        let function = match self.function_cache.get(name) {
            Some(function) => Rc::clone(function),
            None => {
                let function =
                    self.env
                        .get_function(name)
                        .ok_or_else(|| RuntimeError::UndefinedFunction { name: name.to_string(),
                                                                         line })?;
                self.function_cache.insert(name.to_string(), Rc::clone(&function));
                function
            },
        };
        self.invoke(&function, args, line)
    }

    fn is_builtin(&mut self, name: &str) -> bool {
        if let Some(&cached) = self.builtin_cache.get(name) {
            return cached;
        }
        let builtin = self.host.contains(name);
        trace!(name, builtin, "resolved callee");
        self.builtin_cache.insert(name.to_string(), builtin);
        builtin
    }

    /// Runs a user function body in a fresh frame.
    ///
    /// The ceiling is checked before the arity, and neither failure pushes a
    /// frame. The frame is popped on every exit path, errors included.
    fn invoke(&mut self,
              function: &FuncDefinition,
              args: Vec<Value>,
              line: usize)
              -> EvalResult<Value> {
        if self.depth >= self.max_depth {
            return Err(RuntimeError::RecursionLimit { limit: self.max_depth,
                                                      line });
        }
        if args.len() != function.parameters.len() {
            return Err(RuntimeError::ArityMismatch { name: function.name.clone(),
                                                     expected: function.parameters.len(),
                                                     found: args.len(),
                                                     line });
        }

        self.env.push_frame();
        for (parameter, value) in function.parameters.iter().zip(args) {
            self.env.define(&parameter.name, value);
        }
        self.depth += 1;
        trace!(name = %function.name, depth = self.depth, "call");

        let result = ensure_sufficient_stack(|| self.execute_block(&function.body));

        self.depth -= 1;
        self.env.pop_frame();

        match result? {
            Flow::Return(value) => Ok(value),
            Flow::Continue => Ok(Value::Nil),
        }
    }
}

use std::{collections::HashMap, rc::Rc};

use tracing::debug;

use crate::{
    ast::{Definition, FuncDefinition, Program},
    error::{Error, RuntimeError},
    interpreter::{
        environment::Environment, host::HostRegistry, lexer::tokenize, parser::core::parse,
        value::Value,
    },
};

/// Result type used by the evaluator.
///
/// All evaluation functions return either a value of type `T` or a
/// `RuntimeError` describing the failure.
pub type EvalResult<T> = Result<T, RuntimeError>;

/// Default ceiling on nested user function calls.
pub const MAX_RECURSION_DEPTH: usize = 1000;

/// Name of the function a program starts in.
pub const MAIN_FUNCTION: &str = "Main";

/// How a statement finished.
///
/// `Return` carries the value of a `return` statement up through enclosing
/// blocks and loops to the nearest function call, which turns it into the
/// call's result.
#[derive(Debug, Clone, PartialEq)]
pub enum Flow {
    /// Run the next statement.
    Continue,
    /// Leave the current function with this value.
    Return(Value),
}

/// Stores the runtime evaluation state.
///
/// This struct holds the scope chain, the host functions, the call-site
/// resolution caches, and the current call depth.
///
/// ## Usage
///
/// An `Interpreter` is created once and can execute any number of programs.
/// Globals and functions from earlier programs stay visible to later ones,
/// which is how the REPL keeps state between lines.
///
/// ```
/// use npp::interpreter::{evaluator::Interpreter, value::Value};
///
/// let mut interpreter = Interpreter::default();
/// interpreter.run("define int[x]: [5];").unwrap();
/// interpreter.run("define func[Main]: [], { x: x + 1; }").unwrap();
///
/// assert_eq!(interpreter.environment().lookup("x"), Some(&Value::Integer(6)));
/// ```
#[derive(Debug)]
pub struct Interpreter {
    pub(crate) env:            Environment,
    pub(crate) host:           HostRegistry,
    /// Callee name to whether it resolved to a host function.
    pub(crate) builtin_cache:  HashMap<String, bool>,
    /// Callee name to the user function it resolved to.
    pub(crate) function_cache: HashMap<String, Rc<FuncDefinition>>,
    pub(crate) depth:          usize,
    pub(crate) max_depth:      usize,
}

impl Default for Interpreter {
    /// An interpreter with the standard host functions.
    fn default() -> Self {
        Self::new(HostRegistry::standard())
    }
}

impl Interpreter {
    /// Creates an interpreter that calls into `host` for builtin names.
    #[must_use]
    pub fn new(host: HostRegistry) -> Self {
        Self { env: Environment::new(),
               host,
               builtin_cache: HashMap::new(),
               function_cache: HashMap::new(),
               depth: 0,
               max_depth: MAX_RECURSION_DEPTH }
    }

    /// Sets the ceiling on nested user function calls.
    #[must_use]
    pub const fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// The scope chain.
    #[must_use]
    pub const fn environment(&self) -> &Environment {
        &self.env
    }

    /// The host functions this interpreter calls into.
    #[must_use]
    pub const fn host(&self) -> &HostRegistry {
        &self.host
    }

    /// Number of user function calls currently in progress.
    #[must_use]
    pub const fn depth(&self) -> usize {
        self.depth
    }

    /// Tokenizes, parses and executes `source`.
    ///
    /// # Errors
    /// Returns the first lexical, parse or runtime error.
    pub fn run(&mut self, source: &str) -> Result<Option<Value>, Error> {
        let tokens = tokenize(source)?;
        let program = parse(&tokens)?;
        Ok(self.execute(program)?)
    }

    /// Executes a parsed program.
    ///
    /// 1. Every function and struct definition is registered first, so
    ///    functions may call functions defined further down.
    /// 2. Variable definitions run in source order.
    /// 3. If a function named `Main` is registered, by this program or an
    ///    earlier one run on the same interpreter, it is called with no
    ///    arguments.
    ///
    /// # Returns
    /// The value `Main` returned, or `None` if no `Main` is registered.
    pub fn execute(&mut self, program: Program) -> EvalResult<Option<Value>> {
        let mut variables = Vec::new();
        let mut function_count = 0;
        let mut struct_count = 0;

        for definition in program.definitions {
            match definition {
                Definition::Func(function) => {
                    self.register_function(function);
                    function_count += 1;
                },
                Definition::Struct(definition) => {
                    self.env.define_struct(Rc::new(definition));
                    struct_count += 1;
                },
                Definition::Var(definition) => variables.push(definition),
            }
        }
        debug!(functions = function_count,
               structs = struct_count,
               variables = variables.len(),
               "registered definitions");

        for definition in &variables {
            self.define_variables(definition)?;
        }

        let Some(main) = self.env.get_function(MAIN_FUNCTION) else {
            return Ok(None);
        };
        debug!("calling {MAIN_FUNCTION}");
        self.call_function(MAIN_FUNCTION, Vec::new(), main.line).map(Some)
    }

    /// Makes `function` callable, replacing any earlier function of the same
    /// name.
    fn register_function(&mut self, function: FuncDefinition) {
        self.function_cache.remove(&function.name);
        self.env.define_function(Rc::new(function));
    }
}

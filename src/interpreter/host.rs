use std::{collections::HashMap, fmt};

use crate::{
    error::RuntimeError,
    interpreter::{evaluator::EvalResult, value::Value},
};

/// `console.print`, `console.write` and `console.error`.
pub mod console;
/// `file.read`, `file.write`, `file.create` and `file.exists`.
pub mod file;
/// Integer math: `math.abs`, `math.min`, `math.max`, `math.pow`, `math.sqrt`,
/// `math.floor` and `math.ceil`.
pub mod math;
/// `random.int` and `random.float`.
pub mod random;
/// String helpers under the `string.` namespace.
pub mod string;
/// `system.exit`, `system.pause` and `system.version`.
pub mod system;

/// Type alias for host function handlers.
///
/// A host function receives the evaluated arguments and the line of the call
/// site, and returns a value or a runtime error.
pub type HostFn = fn(&[Value], usize) -> EvalResult<Value>;

/// Specifies the allowed number of arguments for a host function.
///
/// - `Exact(n)` means the function must receive exactly `n` arguments.
/// - `Range(min, max)` accepts any count in the inclusive range.
/// - `Any` accepts every count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arity {
    Exact(usize),
    Range(usize, usize),
    Any,
}

impl Arity {
    /// Tests whether the given argument count satisfies this arity constraint.
    #[must_use]
    pub const fn check(self, n: usize) -> bool {
        match self {
            Self::Exact(m) => n == m,
            Self::Range(min, max) => min <= n && n <= max,
            Self::Any => true,
        }
    }
}

impl fmt::Display for Arity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Exact(1) => f.write_str("1 argument"),
            Self::Exact(n) => write!(f, "{n} arguments"),
            Self::Range(min, max) if min + 1 == *max => write!(f, "{min} or {max} arguments"),
            Self::Range(min, max) => write!(f, "{min} to {max} arguments"),
            Self::Any => f.write_str("any number of arguments"),
        }
    }
}

/// Defines the standard host functions by generating a lookup table and a
/// name list.
///
/// Each entry provides a dotted name, an arity specification and the function
/// implementing it. The macro produces `STANDARD_TABLE` (used by
/// [`HostRegistry::standard`]) and `STANDARD_FUNCTIONS` (the public list of
/// names).
macro_rules! host_functions {
    (
        $(
            $name:literal => {
                arity: $arity:expr,
                func: $func:expr $(,)?
            }
        ),* $(,)?
    ) => {
        static STANDARD_TABLE: &[(&str, Arity, HostFn)] = &[
            $(
                ($name, $arity, $func),
            )*
        ];
        /// Names of every function in [`HostRegistry::standard`].
        pub const STANDARD_FUNCTIONS: &[&str] = &[
            $($name,)*
        ];
    };
}

host_functions! {
    "console.print"    => { arity: Arity::Any, func: console::print },
    "console.write"    => { arity: Arity::Any, func: console::write },
    "console.error"    => { arity: Arity::Any, func: console::error },

    "math.abs"         => { arity: Arity::Exact(1), func: math::abs },
    "math.min"         => { arity: Arity::Exact(2), func: |args, line| math::min_max("math.min", args, line) },
    "math.max"         => { arity: Arity::Exact(2), func: |args, line| math::min_max("math.max", args, line) },
    "math.pow"         => { arity: Arity::Exact(2), func: math::pow },
    "math.sqrt"        => { arity: Arity::Exact(1), func: math::sqrt },
    "math.floor"       => { arity: Arity::Exact(1), func: |args, line| math::identity("math.floor", args, line) },
    "math.ceil"        => { arity: Arity::Exact(1), func: |args, line| math::identity("math.ceil", args, line) },

    "string.length"    => { arity: Arity::Exact(1), func: string::length },
    "string.substring" => { arity: Arity::Exact(3), func: string::substring },
    "string.upper"     => { arity: Arity::Exact(1), func: |args, line| string::change_case("string.upper", args, line) },
    "string.lower"     => { arity: Arity::Exact(1), func: |args, line| string::change_case("string.lower", args, line) },
    "string.contains"  => { arity: Arity::Exact(2), func: string::contains },
    "string.replace"   => { arity: Arity::Exact(3), func: string::replace },
    "string.split"     => { arity: Arity::Exact(2), func: string::split },
    "string.trim"      => { arity: Arity::Exact(1), func: string::trim },

    "system.exit"      => { arity: Arity::Range(0, 1), func: system::exit },
    "system.pause"     => { arity: Arity::Exact(0), func: system::pause },
    "system.version"   => { arity: Arity::Exact(0), func: system::version },

    "file.read"        => { arity: Arity::Exact(1), func: file::read },
    "file.write"       => { arity: Arity::Exact(2), func: file::write },
    "file.create"      => { arity: Arity::Exact(1), func: file::create },
    "file.exists"      => { arity: Arity::Exact(1), func: file::exists },

    "random.int"       => { arity: Arity::Exact(2), func: random::int },
    "random.float"     => { arity: Arity::Exact(2), func: random::float },
}

#[derive(Debug, Clone, Copy)]
struct HostDef {
    arity: Arity,
    func:  HostFn,
}

/// The table of functions the host makes callable from programs.
///
/// A registry is filled before any program runs and handed to the
/// [`Interpreter`](crate::interpreter::evaluator::Interpreter), which only
/// reads it. Names are dotted by convention (`math.sqrt`) but any name is
/// accepted.
///
/// # Example
/// ```
/// use npp::interpreter::{
///     host::{Arity, HostRegistry},
///     value::Value,
/// };
///
/// let mut registry = HostRegistry::standard();
/// registry.register("test.answer", Arity::Exact(0), |_, _| Ok(Value::Integer(42)));
///
/// assert!(registry.contains("math.sqrt"));
/// assert_eq!(registry.call("test.answer", &[], 1).unwrap(), Value::Integer(42));
/// assert!(registry.call("math.sqrt", &[], 1).is_err());
/// ```
#[derive(Debug, Clone, Default)]
pub struct HostRegistry {
    functions: HashMap<String, HostDef>,
}

impl HostRegistry {
    /// Creates a registry with no functions.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a registry holding every function in [`STANDARD_FUNCTIONS`].
    #[must_use]
    pub fn standard() -> Self {
        let mut registry = Self::new();
        for &(name, arity, func) in STANDARD_TABLE {
            registry.register(name, arity, func);
        }
        registry
    }

    /// Adds or replaces a function.
    pub fn register(&mut self, name: impl Into<String>, arity: Arity, func: HostFn) {
        self.functions.insert(name.into(), HostDef { arity, func });
    }

    /// Returns `true` if `name` is registered.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.functions.contains_key(name)
    }

    /// Number of registered functions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.functions.len()
    }

    /// Returns `true` if no function is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.functions.is_empty()
    }

    /// Checks the argument count and invokes the function registered as
    /// `name`.
    ///
    /// # Errors
    /// - `UndefinedFunction` if `name` is not registered.
    /// - `HostArity` if the argument count is not accepted.
    /// - Whatever the function itself returns.
    pub fn call(&self, name: &str, args: &[Value], line: usize) -> EvalResult<Value> {
        let def = self.functions
                      .get(name)
                      .ok_or_else(|| RuntimeError::UndefinedFunction { name: name.to_string(),
                                                                       line })?;
        if !def.arity.check(args.len()) {
            return Err(RuntimeError::HostArity { name: name.to_string(),
                                                 expected: def.arity.to_string(),
                                                 line });
        }
        (def.func)(args, line)
    }
}

/// Extracts the integer at `args[index]` or reports that `name` requires
/// `expected`. A missing argument is reported the same way.
pub(crate) fn int_arg(name: &str,
                      args: &[Value],
                      index: usize,
                      expected: &str,
                      line: usize)
                      -> EvalResult<i32> {
    match args.get(index) {
        Some(Value::Integer(i)) => Ok(*i),
        _ => Err(argument_error(name, expected, line)),
    }
}

/// Extracts the float at `args[index]`.
pub(crate) fn float_arg(name: &str,
                        args: &[Value],
                        index: usize,
                        expected: &str,
                        line: usize)
                        -> EvalResult<f32> {
    match args.get(index) {
        Some(Value::Float(f)) => Ok(*f),
        _ => Err(argument_error(name, expected, line)),
    }
}

/// Extracts the string at `args[index]`.
pub(crate) fn str_arg<'v>(name: &str,
                          args: &'v [Value],
                          index: usize,
                          expected: &str,
                          line: usize)
                          -> EvalResult<&'v str> {
    match args.get(index) {
        Some(Value::String(s)) => Ok(s),
        _ => Err(argument_error(name, expected, line)),
    }
}

fn argument_error(name: &str, expected: &str, line: usize) -> RuntimeError {
    RuntimeError::HostArgument { name: name.to_string(),
                                 expected: expected.to_string(),
                                 line }
}

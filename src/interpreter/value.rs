use std::{collections::BTreeMap, fmt};

/// A runtime value.
///
/// Values are owned and cloned on every read and assignment; two bindings
/// never share mutable state.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Value {
    /// 32-bit signed integer.
    Integer(i32),
    /// 32-bit float.
    Float(f32),
    /// UTF-8 string.
    String(String),
    /// `true` or `false`.
    Boolean(bool),
    /// Absence of a value; the result of a bare `return;` or a body that falls
    /// through.
    #[default]
    Nil,
    /// A reference to a function by name.
    FunctionRef(String),
    /// An instance of a declared struct type.
    StructInstance {
        /// The struct type name.
        type_name: String,
        /// Field values by name.
        fields:    BTreeMap<String, Self>,
    },
}

impl Value {
    /// The language-level name of this value's type, used in diagnostics.
    ///
    /// # Example
    /// ```
    /// use npp::interpreter::value::Value;
    ///
    /// assert_eq!(Value::Integer(1).type_name(), "int");
    /// assert_eq!(Value::Nil.type_name(), "nil");
    /// ```
    #[must_use]
    pub const fn type_name(&self) -> &'static str {
        match self {
            Self::Integer(_) => "int",
            Self::Float(_) => "float",
            Self::String(_) => "string",
            Self::Boolean(_) => "bool",
            Self::Nil => "nil",
            Self::FunctionRef(_) => "function",
            Self::StructInstance { .. } => "struct",
        }
    }

    /// Converts the value to a boolean for use as a condition.
    ///
    /// Booleans are themselves, numbers are true when non-zero, strings are
    /// true when non-empty, and everything else is false.
    ///
    /// # Example
    /// ```
    /// use npp::interpreter::value::Value;
    ///
    /// assert!(Value::Integer(-3).is_truthy());
    /// assert!(!Value::String(String::new()).is_truthy());
    /// assert!(!Value::FunctionRef("f".into()).is_truthy());
    /// ```
    #[must_use]
    pub fn is_truthy(&self) -> bool {
        match self {
            Self::Boolean(b) => *b,
            Self::Integer(i) => *i != 0,
            Self::Float(f) => *f != 0.0,
            Self::String(s) => !s.is_empty(),
            Self::Nil | Self::FunctionRef(_) | Self::StructInstance { .. } => false,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Integer(i) => write!(f, "{i}"),
            Self::Float(x) => write!(f, "{x:.6}"),
            Self::String(s) => f.write_str(s),
            Self::Boolean(b) => write!(f, "{b}"),
            Self::Nil => f.write_str("nil"),
            Self::FunctionRef(name) => write!(f, "<function {name}>"),
            Self::StructInstance { type_name, .. } => write!(f, "<struct {type_name}>"),
        }
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Self::Integer(value)
    }
}

impl From<f32> for Value {
    fn from(value: f32) -> Self {
        Self::Float(value)
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Self::Boolean(value)
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

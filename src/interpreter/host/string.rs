use crate::{
    error::RuntimeError,
    interpreter::{
        evaluator::EvalResult,
        host::{int_arg, str_arg},
        value::Value,
    },
};

fn count_to_value(name: &'static str, count: usize, line: usize) -> EvalResult<Value> {
    i32::try_from(count).map(Value::Integer)
                        .map_err(|_| RuntimeError::Overflow { op: name, line })
}

/// Number of characters in a string.
pub fn length(args: &[Value], line: usize) -> EvalResult<Value> {
    let s = str_arg("string.length", args, 0, "string argument", line)?;
    count_to_value("string.length", s.chars().count(), line)
}

/// Characters `start..end` of a string.
///
/// Indices count characters. They are clamped to the string, and an empty
/// or inverted range gives an empty string.
///
/// # Example
/// ```
/// use npp::interpreter::{host::string::substring, value::Value};
///
/// let args = [Value::from("interpreter"), Value::Integer(-4), Value::Integer(5)];
/// assert_eq!(substring(&args, 1).unwrap(), Value::from("inter"));
///
/// let args = [Value::from("abc"), Value::Integer(2), Value::Integer(1)];
/// assert_eq!(substring(&args, 1).unwrap(), Value::from(""));
/// ```
pub fn substring(args: &[Value], line: usize) -> EvalResult<Value> {
    let s = str_arg("string.substring", args, 0, "string as first argument", line)?;
    let start = int_arg("string.substring", args, 1, "integer indices", line)?;
    let end = int_arg("string.substring", args, 2, "integer indices", line)?;

    let start = usize::try_from(start).unwrap_or(0);
    let end = usize::try_from(end).unwrap_or(0);
    if start >= end {
        return Ok(Value::from(""));
    }
    Ok(Value::String(s.chars().skip(start).take(end - start).collect()))
}

/// `string.upper` and `string.lower`: ASCII case mapping.
pub fn change_case(name: &'static str, args: &[Value], line: usize) -> EvalResult<Value> {
    let s = str_arg(name, args, 0, "string argument", line)?;
    Ok(Value::String(if name == "string.upper" {
                         s.to_ascii_uppercase()
                     } else {
                         s.to_ascii_lowercase()
                     }))
}

/// Whether the first string contains the second.
pub fn contains(args: &[Value], line: usize) -> EvalResult<Value> {
    let haystack = str_arg("string.contains", args, 0, "string arguments", line)?;
    let needle = str_arg("string.contains", args, 1, "string arguments", line)?;
    Ok(Value::Boolean(haystack.contains(needle)))
}

/// Replaces every occurrence of the second string with the third.
pub fn replace(args: &[Value], line: usize) -> EvalResult<Value> {
    let s = str_arg("string.replace", args, 0, "string arguments", line)?;
    let from = str_arg("string.replace", args, 1, "string arguments", line)?;
    let to = str_arg("string.replace", args, 2, "string arguments", line)?;
    if from.is_empty() {
        return Ok(Value::from(s));
    }
    Ok(Value::String(s.replace(from, to)))
}

/// Number of pieces the string splits into at the delimiter.
///
/// The language has no arrays, so only the count is returned.
///
/// # Example
/// ```
/// use npp::interpreter::{host::string::split, value::Value};
///
/// let args = [Value::from("a,b,,c"), Value::from(",")];
/// assert_eq!(split(&args, 1).unwrap(), Value::Integer(4));
/// ```
pub fn split(args: &[Value], line: usize) -> EvalResult<Value> {
    let s = str_arg("string.split", args, 0, "string arguments", line)?;
    let delimiter = str_arg("string.split", args, 1, "string arguments", line)?;
    if delimiter.is_empty() {
        return Err(RuntimeError::InvalidArgument { name: "string.split".to_string(),
                                                   details: "non-empty delimiter".to_string(),
                                                   line });
    }
    count_to_value("string.split", s.split(delimiter).count(), line)
}

/// Strips spaces, tabs and line breaks from both ends.
pub fn trim(args: &[Value], line: usize) -> EvalResult<Value> {
    let s = str_arg("string.trim", args, 0, "string argument", line)?;
    Ok(Value::from(s.trim_matches([' ', '\t', '\n', '\r'])))
}

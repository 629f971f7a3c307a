use std::{fs, path::Path};

use crate::{
    error::RuntimeError,
    interpreter::{evaluator::EvalResult, host::str_arg, value::Value},
};

/// Whole contents of a file as a string.
pub fn read(args: &[Value], line: usize) -> EvalResult<Value> {
    let path = str_arg("file.read", args, 0, "string filename", line)?;
    fs::read_to_string(path).map(Value::String)
                            .map_err(|_| RuntimeError::Io { action: "open",
                                                            path: path.to_string(),
                                                            line })
}

/// Replaces a file's contents, creating it if needed. Returns `true`.
pub fn write(args: &[Value], line: usize) -> EvalResult<Value> {
    let path = str_arg("file.write", args, 0, "string filename", line)?;
    let content = str_arg("file.write", args, 1, "string content", line)?;
    fs::write(path, content).map_err(|_| RuntimeError::Io { action: "write",
                                                            path: path.to_string(),
                                                            line })?;
    Ok(Value::Boolean(true))
}

/// Creates an empty file, truncating any existing one. Returns `true`.
pub fn create(args: &[Value], line: usize) -> EvalResult<Value> {
    let path = str_arg("file.create", args, 0, "string filename", line)?;
    fs::File::create(path).map_err(|_| RuntimeError::Io { action: "create",
                                                          path: path.to_string(),
                                                          line })?;
    Ok(Value::Boolean(true))
}

/// Whether a file exists at the path.
pub fn exists(args: &[Value], line: usize) -> EvalResult<Value> {
    let path = str_arg("file.exists", args, 0, "string filename", line)?;
    Ok(Value::Boolean(Path::new(path).is_file()))
}

use std::io::{self, Write};

use crate::{
    error::RuntimeError,
    interpreter::{evaluator::EvalResult, value::Value},
};

/// Renders the arguments separated by single spaces.
fn join(args: &[Value]) -> String {
    args.iter().map(ToString::to_string).collect::<Vec<_>>().join(" ")
}

/// Writes the arguments and a newline to standard output.
///
/// With no arguments, prints an empty line.
pub fn print(args: &[Value], _line: usize) -> EvalResult<Value> {
    println!("{}", join(args));
    Ok(Value::Nil)
}

/// Writes the arguments to standard output without a newline and flushes.
pub fn write(args: &[Value], line: usize) -> EvalResult<Value> {
    let mut stdout = io::stdout().lock();
    write!(stdout, "{}", join(args)).and_then(|()| stdout.flush())
                                    .map_err(|_| RuntimeError::Io { action: "write",
                                                                    path: "<stdout>".to_string(),
                                                                    line })?;
    Ok(Value::Nil)
}

/// Writes the arguments and a newline to standard error.
pub fn error(args: &[Value], _line: usize) -> EvalResult<Value> {
    eprintln!("{}", join(args));
    Ok(Value::Nil)
}

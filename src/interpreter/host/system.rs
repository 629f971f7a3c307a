use std::io::{self, BufRead, Write};

use crate::{
    VERSION,
    error::RuntimeError,
    interpreter::{evaluator::EvalResult, host::int_arg, value::Value},
};

/// Requests process termination with an optional integer code (default `0`).
///
/// The request unwinds as [`RuntimeError::Exit`]; the embedding host decides
/// how to end the process.
pub fn exit(args: &[Value], line: usize) -> EvalResult<Value> {
    let code = if args.is_empty() {
        0
    } else {
        int_arg("system.exit", args, 0, "integer argument", line)?
    };
    Err(RuntimeError::Exit { code })
}

/// Prompts on standard output and waits for a line on standard input.
pub fn pause(_args: &[Value], line: usize) -> EvalResult<Value> {
    let io_error = |_| RuntimeError::Io { action: "read",
                                          path: "<stdin>".to_string(),
                                          line };

    let mut stdout = io::stdout().lock();
    write!(stdout, "Press Enter to continue...").and_then(|()| stdout.flush())
                                                .map_err(io_error)?;

    let mut buffer = String::new();
    io::stdin().lock().read_line(&mut buffer).map_err(io_error)?;
    Ok(Value::Nil)
}

/// The interpreter version string.
pub fn version(_args: &[Value], _line: usize) -> EvalResult<Value> {
    Ok(Value::from(VERSION))
}

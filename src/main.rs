use std::{fs, path::PathBuf, process};

use anyhow::{Context, Result};
use clap::Parser;
use npp::{VERSION, error::Error, interpreter::evaluator::Interpreter};
use rustyline::{DefaultEditor, error::ReadlineError};
use tracing::debug;
use tracing_subscriber::EnvFilter;

/// npp runs programs written in a small, explicitly typed scripting language.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Script to execute. Without one, an interactive session starts.
    file: Option<PathBuf>,

    /// Start an interactive session even when a file is given; the file runs
    /// first and its definitions stay available.
    #[arg(short, long)]
    repl: bool,

    /// Raise the log level (-v info, -vv debug, -vvv trace). `RUST_LOG`
    /// takes precedence.
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(args.verbose);

    let mut interpreter = Interpreter::default();

    if let Some(path) = &args.file {
        let source = fs::read_to_string(path).with_context(|| {
                                                  format!("Failed to read the input file '{}'",
                                                          path.display())
                                              })?;
        debug!(path = %path.display(), "running file");
        if let Err(e) = interpreter.run(&source) {
            report(&e);
            if !args.repl {
                process::exit(1);
            }
        }
    }

    if args.repl || args.file.is_none() {
        repl(&mut interpreter)?;
    }
    Ok(())
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt().with_env_filter(filter)
                             .with_writer(std::io::stderr)
                             .init();
}

/// Prints `error` to stderr, or ends the process if it is a `system.exit`
/// request.
fn report(error: &Error) {
    if let Some(code) = error.exit_code() {
        process::exit(code);
    }
    eprintln!("{error}");
}

fn repl(interpreter: &mut Interpreter) -> Result<()> {
    let mut editor = DefaultEditor::new().context("Failed to start the line editor")?;

    println!("npp REPL v{VERSION}");
    println!("Type 'exit' to quit");

    loop {
        match editor.readline("> ") {
            Ok(line) => {
                let line = line.trim();
                if line.is_empty() {
                    continue;
                }
                if line == "exit" || line == "quit" {
                    break;
                }
                let _ = editor.add_history_entry(line);
                if let Err(e) = interpreter.run(line) {
                    report(&e);
                }
            },
            Err(ReadlineError::Interrupted) => println!("^C"),
            Err(ReadlineError::Eof) => break,
            Err(e) => return Err(e).context("Failed to read input"),
        }
    }
    Ok(())
}

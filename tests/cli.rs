use std::{
    fs,
    io::Write,
    path::Path,
    process::{Command, Output, Stdio},
};

use pretty_assertions::assert_eq;
use tempfile::TempDir;

fn npp() -> Command {
    let mut command = Command::new(env!("CARGO_BIN_EXE_npp"));
    command.env_remove("RUST_LOG");
    command
}

/// Writes `source` to a script in `dir` and runs it.
fn run_script(dir: &Path, source: &str) -> Output {
    let path = dir.join("script.npp");
    fs::write(&path, source).unwrap();
    npp().arg(&path).output().unwrap()
}

fn run_repl(input: &str) -> Output {
    let mut child = npp().arg("--repl")
                         .stdin(Stdio::piped())
                         .stdout(Stdio::piped())
                         .stderr(Stdio::piped())
                         .spawn()
                         .unwrap();
    child.stdin.take().unwrap().write_all(input.as_bytes()).unwrap();
    child.wait_with_output().unwrap()
}

fn text(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes).into_owned()
}

#[test]
fn successful_script_is_silent() {
    let dir = TempDir::new().unwrap();
    let output = run_script(dir.path(), "define func[Main]: [], { return 1 + 2 * 3; }");

    assert_eq!(output.status.code(), Some(0));
    assert_eq!(text(&output.stdout), "");
    assert_eq!(text(&output.stderr), "");
}

#[test]
fn script_output_goes_to_stdout() {
    let dir = TempDir::new().unwrap();
    let output = run_script(dir.path(), "define func[Main]: [], { console.print(\"hi\", 2); }");

    assert_eq!(output.status.code(), Some(0));
    assert_eq!(text(&output.stdout), "hi 2\n");
}

#[test]
fn runtime_error_exits_with_one() {
    let dir = TempDir::new().unwrap();
    let output = run_script(dir.path(), "define func[Main]: [], {\n    return foo();\n}");

    assert_eq!(output.status.code(), Some(1));
    assert_eq!(text(&output.stderr), "NameError: Undefined function: foo (line 2)\n");
}

#[test]
fn parse_error_exits_with_one() {
    let dir = TempDir::new().unwrap();
    let output = run_script(dir.path(), "define int[x]: [1]");

    assert_eq!(output.status.code(), Some(1));
    let stderr = text(&output.stderr);
    assert!(stderr.starts_with("ParserError: "), "unexpected stderr: {stderr}");
    assert!(stderr.contains("(line 1, column "), "unexpected stderr: {stderr}");
}

#[test]
fn system_exit_sets_the_status() {
    let dir = TempDir::new().unwrap();
    let output = run_script(dir.path(),
                            "define func[Main]: [], { system.exit(7); console.print(\"no\"); }");

    assert_eq!(output.status.code(), Some(7));
    assert_eq!(text(&output.stdout), "");
    assert_eq!(text(&output.stderr), "");
}

#[test]
fn missing_file_fails() {
    let dir = TempDir::new().unwrap();
    let output = npp().arg(dir.path().join("absent.npp")).output().unwrap();

    assert!(!output.status.success());
    assert!(text(&output.stderr).contains("Failed to read the input file"));
}

#[test]
fn repl_reports_errors_and_continues() {
    let output = run_repl("define int[x]: [1 / 0];\n\ndefine int[y]: [2];\nconsole.print(y);\n\
                           define func[Show]: [], { console.print(\"y =\", y); }\n\
                           define int[z]: [Show()];\nexit\ndefine int[never]: [Show()];\n");

    assert_eq!(output.status.code(), Some(0));
    assert_eq!(text(&output.stderr),
               "RuntimeError: Division by zero (line 1)\n\
                ParserError: Expected 'define', got 'console' (line 1, column 1)\n");

    let stdout = text(&output.stdout);
    assert!(stdout.contains(&format!("npp REPL v{}", npp::VERSION)));
    assert_eq!(stdout.matches("y = 2").count(), 1, "unexpected stdout: {stdout}");
}

#[test]
fn repl_keeps_file_definitions() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("lib.npp");
    fs::write(&path, "define func[Twice]: [int n], { return n * 2; }").unwrap();

    let mut child = npp().arg(&path)
                         .arg("--repl")
                         .stdin(Stdio::piped())
                         .stdout(Stdio::piped())
                         .stderr(Stdio::piped())
                         .spawn()
                         .unwrap();
    child.stdin
         .take()
         .unwrap()
         .write_all(b"define int[r]: [Twice(21)];\ndefine func[Main]: [], { console.print(r); }\n")
         .unwrap();
    let output = child.wait_with_output().unwrap();

    assert_eq!(output.status.code(), Some(0));
    assert_eq!(text(&output.stderr), "");
    assert!(text(&output.stdout).contains("42"));
}

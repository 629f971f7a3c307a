use std::fs;

use npp::{
    error::{Error, ErrorKind, RuntimeError},
    interpreter::{
        evaluator::{Interpreter, MAX_RECURSION_DEPTH},
        host::{Arity, HostRegistry},
        value::Value,
    },
    run,
};
use pretty_assertions::assert_eq;
use walkdir::WalkDir;

#[test]
fn demo_programs_run() {
    let mut count = 0;

    for entry in WalkDir::new("demos").into_iter()
                                      .filter_map(Result::ok)
                                      .filter(|e| e.path().extension().is_some_and(|ext| ext == "npp"))
    {
        let path = entry.path();
        let source =
            fs::read_to_string(path).unwrap_or_else(|e| panic!("Failed to read {path:?}: {e}"));

        count += 1;
        if let Err(e) = run(&source) {
            panic!("Demo {path:?} failed:\n{e}");
        }
    }

    assert!(count > 0, "No demo programs found in demos/");
}

/// Runs `src` and returns what `Main` returned.
fn main_value(src: &str) -> Value {
    match run(src) {
        Ok(Some(value)) => value,
        Ok(None) => panic!("Program has no Main"),
        Err(e) => panic!("Program failed: {e}"),
    }
}

/// Runs `src` with `body` as the body of `Main` and returns its result.
fn eval_main(body: &str) -> Value {
    main_value(&format!("define func[Main]: [], {{ {body} }}"))
}

fn assert_success(src: &str) {
    if let Err(e) = run(src) {
        panic!("Program failed: {e}");
    }
}

fn assert_failure(src: &str, kind: ErrorKind, message: &str) {
    match run(src) {
        Ok(_) => panic!("Program succeeded but was expected to fail"),
        Err(e) => {
            assert_eq!(e.kind(), kind, "unexpected kind for: {e}");
            assert_eq!(e.to_string(), message);
        },
    }
}

#[test]
fn literals() {
    assert_eq!(eval_main("return 42;"), Value::Integer(42));
    assert_eq!(eval_main("return 2.5;"), Value::Float(2.5));
    assert_eq!(eval_main("return \"hi\";"), Value::from("hi"));
    assert_eq!(eval_main("return true;"), Value::Boolean(true));
    assert_eq!(eval_main("return;"), Value::Nil);
    assert_eq!(eval_main(""), Value::Nil);
}

#[test]
fn main_result() {
    assert_eq!(main_value("define func[Main]: [], { return 1 + 2 * 3; }"), Value::Integer(7));
}

#[test]
fn program_without_main() {
    assert_eq!(run("define int[x]: [1];").unwrap(), None);
    assert_eq!(run("").unwrap(), None);
}

#[test]
fn integer_arithmetic() {
    assert_eq!(eval_main("return 7 / 2;"), Value::Integer(3));
    assert_eq!(eval_main("return -7 / 2;"), Value::Integer(-3));
    assert_eq!(eval_main("return -7 % 3;"), Value::Integer(-1));
    assert_eq!(eval_main("return 2 - 3 - 4;"), Value::Integer(-5));
    assert_eq!(eval_main("return - -4;"), Value::Integer(4));
}

#[test]
fn float_arithmetic() {
    assert_eq!(eval_main("return 1 + 0.5;"), Value::Float(1.5));
    assert_eq!(eval_main("return 7.5 / 2.5;"), Value::Float(3.0));
    assert_eq!(eval_main("return 2 * 1.5 == 3;"), Value::Boolean(true));
}

#[test]
fn zero_divisors_fail() {
    assert_failure("define func[Main]: [], { return 1 / 0; }",
                   ErrorKind::Runtime,
                   "RuntimeError: Division by zero (line 1)");
    assert_failure("define func[Main]: [],\n{ return 1 % 0; }",
                   ErrorKind::Runtime,
                   "RuntimeError: Modulo by zero (line 2)");
    assert_failure("define int[x]: [1.0 / 0];",
                   ErrorKind::Runtime,
                   "RuntimeError: Division by zero (line 1)");
}

#[test]
fn integer_overflow_fails() {
    assert_failure("define int[x]: [2147483647 + 1];",
                   ErrorKind::Runtime,
                   "RuntimeError: Integer overflow in '+' (line 1)");
    assert_failure("define int[x]: [2147483648];",
                   ErrorKind::Runtime,
                   "RuntimeError: Invalid numeric literal '2147483648' (line 1)");
}

#[test]
fn strings() {
    assert_eq!(eval_main("return \"ab\" + \"cd\";"), Value::from("abcd"));
    assert_eq!(eval_main("return \"abc\" < \"abd\";"), Value::Boolean(true));
    assert_eq!(eval_main("return \"tab\\there\";"), Value::from("tab\there"));
}

#[test]
fn mismatched_operands_fail() {
    assert_failure("define int[x]: [1 + \"a\"];",
                   ErrorKind::Type,
                   "TypeError: Unsupported operand types for '+': int and string (line 1)");
    assert_failure("define int[x]: [true < false];",
                   ErrorKind::Type,
                   "TypeError: Unsupported operand types for '<': bool and bool (line 1)");
    assert_failure("define float[x]: [-1.5];",
                   ErrorKind::Type,
                   "TypeError: Unary '-' requires integer operand, got float (line 1)");
}

#[test]
fn logical_operators_short_circuit() {
    assert_eq!(eval_main("return false && Missing();"), Value::Boolean(false));
    assert_eq!(eval_main("return true || Missing();"), Value::Boolean(true));
    assert_eq!(eval_main("return true && 1 < 2;"), Value::Boolean(true));
    assert_failure("define bool[x]: [1 && true];",
                   ErrorKind::Type,
                   "TypeError: Logical '&&' requires boolean operands, got int (line 1)");
}

#[test]
fn ternary_evaluates_one_branch() {
    assert_eq!(eval_main("return 1 < 2 ? 10 : Missing();"), Value::Integer(10));
    assert_eq!(eval_main("return 0 ? Missing() : 20;"), Value::Integer(20));
}

#[test]
fn truthiness() {
    let pick = |cond: &str| eval_main(&format!("if ({cond}) {{ return 1; }} return 0;"));
    assert_eq!(pick("3"), Value::Integer(1));
    assert_eq!(pick("0"), Value::Integer(0));
    assert_eq!(pick("0.0"), Value::Integer(0));
    assert_eq!(pick("\"x\""), Value::Integer(1));
    assert_eq!(pick("\"\""), Value::Integer(0));
    assert_eq!(pick("false"), Value::Integer(0));
}

#[test]
fn assignment_updates_global() {
    let mut interpreter = Interpreter::default();
    interpreter.run("define int[x]: [5];\ndefine func[Main]: [], { x: x + 1; }")
               .unwrap();
    assert_eq!(interpreter.environment().lookup("x"), Some(&Value::Integer(6)));
}

#[test]
fn assignment_never_creates() {
    assert_failure("define func[Main]: [], { y: 1; }",
                   ErrorKind::Name,
                   "NameError: Undefined variable 'y' (line 1)");
}

#[test]
fn variable_groups() {
    assert_eq!(eval_main("define int[a, b]: [1, 2]; return a * 10 + b;"), Value::Integer(12));
    assert_eq!(eval_main("define int[a, b]: [3, a + 1]; return b;"), Value::Integer(4));
    assert_failure("define int[a, b]: [1];",
                   ErrorKind::Runtime,
                   "RuntimeError: Mismatch between number of names and values in definition (2 \
                    names, 1 values) (line 1)");
}

#[test]
fn top_level_variables_run_in_order() {
    assert_success("define int[a]: [1];\ndefine int[b]: [a + 1];");
    assert_failure("define int[b]: [a + 1];\ndefine int[a]: [1];",
                   ErrorKind::Name,
                   "NameError: Undefined variable 'a' (line 1)");
}

#[test]
fn if_return_composition() {
    let src = "
define func[Pick]: [int n], {
    if (n > 5) {
        return 10;
    } elseif (n > 0) {
        return 5;
    } else {
        return 0;
    }
    return -1;
}
define func[Main]: [], { return Pick(7); }
";
    assert_eq!(main_value(src), Value::Integer(10));
}

#[test]
fn only_first_matching_arm_runs() {
    let body = "
define int[hits]: [0];
if (false) { hits: hits + 1; }
elseif (true) { hits: hits + 10; }
elseif (true) { hits: hits + 100; }
else { hits: hits + 1000; }
return hits;";
    assert_eq!(eval_main(body), Value::Integer(10));
}

#[test]
fn for_loop_order_and_count() {
    assert_eq!(eval_main("define int[n]: [0]; for i: [1, 4], { n: n * 10 + i; } return n;"),
               Value::Integer(1234));
    assert_eq!(eval_main("define int[n]: [0]; for i: [5, 5], { n: n + 1; } return n;"),
               Value::Integer(1));
    assert_eq!(eval_main("define int[n]: [0]; for i: [3, 1], { n: n + 1; } return n;"),
               Value::Integer(0));
}

#[test]
fn for_loop_bounds_are_evaluated_once() {
    let body = "define int[n, end]: [0, 3];
for i: [1, end], { end: end + 1; i: 100; n: n + 1; }
return n;";
    assert_eq!(eval_main(body), Value::Integer(3));
}

#[test]
fn for_loop_reaches_max_integer() {
    assert_eq!(eval_main("define int[n]: [0]; for i: [2147483646, 2147483647], { n: n + 1; } return n;"),
               Value::Integer(2));
}

#[test]
fn for_loop_variable_survives_the_loop() {
    assert_eq!(eval_main("for i: [1, 3], { } return i;"), Value::Integer(3));
}

#[test]
fn return_inside_loop() {
    assert_eq!(eval_main("for i: [1, 10], { if (i == 4) { return i; } } return 0;"),
               Value::Integer(4));
}

#[test]
fn for_loop_bounds_must_be_integers() {
    assert_failure("define func[Main]: [], { for i: [1, 2.0], { } }",
                   ErrorKind::Type,
                   "TypeError: For loop range must be integers (line 1)");
}

#[test]
fn functions_can_be_called_before_their_definition() {
    let src = "define func[Main]: [], { return Twice(4); }
define func[Twice]: [int x], { return x * 2; }";
    assert_eq!(main_value(src), Value::Integer(8));
}

#[test]
fn undefined_function() {
    assert_failure("define func[Main]: [], { foo(); }",
                   ErrorKind::Name,
                   "NameError: Undefined function: foo (line 1)");
}

#[test]
fn wrong_argument_count_never_runs_the_body() {
    let mut interpreter = Interpreter::default();
    interpreter.run("define bool[ran]: [false];
define func[Mark]: [int x], { ran: true; }")
               .unwrap();

    let err = interpreter.run("define func[Main]: [], { Mark(1, 2); }").unwrap_err();
    assert_eq!(err.to_string(),
               "RuntimeError: Function 'Mark' expects 1 arguments, got 2 (line 1)");
    assert_eq!(interpreter.environment().lookup("ran"), Some(&Value::Boolean(false)));
    assert_eq!(interpreter.depth(), 0);
    assert_eq!(interpreter.environment().depth(), 1);
}

#[test]
fn recursion() {
    let src = "
define func[Fib]: [int n], {
    if (n < 2) { return n; }
    return Fib(n - 1) + Fib(n - 2);
}
define func[Main]: [], { return Fib(15); }";
    assert_eq!(main_value(src), Value::Integer(610));
}

const COUNTDOWN: &str = "define func[Down]: [int n], {
    if (n == 0) { return 0; }
    return Down(n - 1);
}";

#[test]
fn recursion_ceiling_allows_the_full_depth() {
    let mut interpreter = Interpreter::default();
    interpreter.run(COUNTDOWN).unwrap();

    // Down(999) nests 1000 calls.
    interpreter.run("define int[r]: [Down(999)];").unwrap();
    assert_eq!(interpreter.environment().lookup("r"), Some(&Value::Integer(0)));
}

#[test]
fn recursion_ceiling_is_fatal() {
    let mut interpreter = Interpreter::default();
    interpreter.run(COUNTDOWN).unwrap();

    let err = interpreter.run("define int[r]: [Down(1000)];").unwrap_err();
    assert!(matches!(err,
                     Error::Runtime(RuntimeError::RecursionLimit { limit: MAX_RECURSION_DEPTH,
                                                                   .. })));
    assert_eq!(interpreter.depth(), 0);
    assert_eq!(interpreter.environment().depth(), 1);
}

#[test]
fn deeply_nested_expressions_run() {
    let depth = 10_000;

    let parens = format!("{}1{}", "(".repeat(depth), ")".repeat(depth));
    assert_eq!(eval_main(&format!("return {parens};")), Value::Integer(1));

    let negations = format!("{}1", "- ".repeat(depth));
    assert_eq!(eval_main(&format!("return {negations};")), Value::Integer(1));

    let sum = format!("{}1", "1 + ".repeat(depth));
    assert_eq!(eval_main(&format!("return {sum};")), Value::Integer(10_001));
}

#[test]
fn unbounded_recursion_fails() {
    assert_failure("define func[Loop]: [], { return Loop(); }\ndefine func[Main]: [], { Loop(); }",
                   ErrorKind::Runtime,
                   "RuntimeError: Maximum recursion depth exceeded (1000) (line 1)");
}

#[test]
fn custom_recursion_ceiling() {
    let mut interpreter = Interpreter::default().with_max_depth(3);
    interpreter.run(COUNTDOWN).unwrap();

    interpreter.run("define int[a]: [Down(2)];").unwrap();
    let err = interpreter.run("define int[b]: [Down(3)];").unwrap_err();
    assert_eq!(err.to_string(), "RuntimeError: Maximum recursion depth exceeded (3) (line 3)");
}

#[test]
fn callee_sees_caller_locals() {
    let src = "
define func[Peek]: [], { return secret; }
define func[Main]: [], {
    define int[secret]: [7];
    return Peek();
}";
    assert_eq!(main_value(src), Value::Integer(7));
}

#[test]
fn callee_locals_do_not_leak() {
    let src = "
define func[Hide]: [], { define int[inner]: [1]; }
define func[Main]: [], {
    Hide();
    return inner;
}";
    assert_failure(src, ErrorKind::Name, "NameError: Undefined variable 'inner' (line 5)");
}

#[test]
fn parameters_shadow_globals() {
    let src = "
define int[x]: [1];
define func[Inc]: [int x], { x: x + 1; return x; }
define func[Main]: [], { return Inc(10) + x; }";
    assert_eq!(main_value(src), Value::Integer(12));
}

#[test]
fn nested_function_definitions_are_inert() {
    assert_failure("define func[Main]: [], {
    define func[Inner]: [], { return 1; }
    return Inner();
}",
                   ErrorKind::Name,
                   "NameError: Undefined function: Inner (line 3)");
}

#[test]
fn member_access_is_not_a_value() {
    assert_failure("define int[x]: [console.print];",
                   ErrorKind::Runtime,
                   "RuntimeError: Member access not yet implemented for non-function contexts \
                    ('console.print') (line 1)");
}

#[test]
fn structs_are_registered() {
    let mut interpreter = Interpreter::default();
    interpreter.run("define struct[Point]: [int x, int y];").unwrap();
    assert!(interpreter.environment().has_struct("Point"));
    assert_eq!(interpreter.environment().get_struct("Point").unwrap().fields.len(), 2);
}

#[test]
fn state_persists_between_runs() {
    let mut interpreter = Interpreter::default();
    interpreter.run("define int[count]: [1];").unwrap();
    interpreter.run("define func[Bump]: [], { count: count + 1; return count; }")
               .unwrap();

    assert_eq!(interpreter.run("define func[Main]: [], { return Bump(); }").unwrap(),
               Some(Value::Integer(2)));
    assert_eq!(interpreter.run("define func[Main]: [], { return Bump(); }").unwrap(),
               Some(Value::Integer(3)));
}

#[test]
fn registered_main_runs_for_later_programs() {
    let mut interpreter = Interpreter::default();
    interpreter.run("define int[hits]: [0];").unwrap();
    assert_eq!(interpreter.run("define func[Main]: [], { hits: hits + 1; }").unwrap(),
               Some(Value::Nil));

    assert_eq!(interpreter.run("define int[other]: [1];").unwrap(), Some(Value::Nil));
    assert_eq!(interpreter.environment().lookup("hits"), Some(&Value::Integer(2)));
}

#[test]
fn redefinition_replaces_the_function() {
    let mut interpreter = Interpreter::default();
    interpreter.run("define func[F]: [], { return 1; }").unwrap();
    assert_eq!(interpreter.run("define func[Main]: [], { return F(); }").unwrap(),
               Some(Value::Integer(1)));

    interpreter.run("define func[F]: [], { return 2; }").unwrap();
    assert_eq!(interpreter.run("define func[Main]: [], { return F(); }").unwrap(),
               Some(Value::Integer(2)));
}

#[test]
fn function_defined_after_a_failed_lookup() {
    let mut interpreter = Interpreter::default();
    assert!(interpreter.run("define func[Main]: [], { Later(); }").is_err());

    interpreter.run("define func[Later]: [], { return 5; }").unwrap();
    assert_eq!(interpreter.run("define func[Main]: [], { return Later(); }").unwrap(),
               Some(Value::Integer(5)));
}

#[test]
fn host_registry_is_injected() {
    let mut registry = HostRegistry::new();
    registry.register("test.double", Arity::Exact(1), |args, _| match &args[0] {
                Value::Integer(n) => Ok(Value::Integer(n * 2)),
                _ => Ok(Value::Nil),
            });
    let mut interpreter = Interpreter::new(registry);

    assert_eq!(interpreter.run("define func[Main]: [], { return test.double(21); }")
                          .unwrap(),
               Some(Value::Integer(42)));

    let err = interpreter.run("define func[Main]: [], { console.print(1); }").unwrap_err();
    assert_eq!(err.to_string(), "NameError: Undefined function: console.print (line 1)");
}

#[test]
fn host_functions_win_over_user_functions() {
    let mut registry = HostRegistry::new();
    registry.register("Shadowed", Arity::Exact(0), |_, _| Ok(Value::from("host")));
    let mut interpreter = Interpreter::new(registry);

    let src = "define func[Shadowed]: [], { return \"user\"; }
define func[Main]: [], { return Shadowed(); }";
    assert_eq!(interpreter.run(src).unwrap(), Some(Value::from("host")));
}

#[test]
fn exit_request_carries_the_code() {
    let err = run("define func[Main]: [], { system.exit(3); return 1; }").unwrap_err();
    assert_eq!(err.exit_code(), Some(3));

    let err = run("define func[Main]: [], { system.exit(); }").unwrap_err();
    assert_eq!(err.exit_code(), Some(0));

    let err = run("define func[Main]: [], { return 1 / 0; }").unwrap_err();
    assert_eq!(err.exit_code(), None);
}

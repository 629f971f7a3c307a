/// The environment module holds the scope chain.
///
/// Variables, functions and struct declarations are bound in frames. The
/// global frame lives for the whole run and every user function call pushes
/// one more.
pub mod environment;
/// The evaluator module executes parsed programs.
///
/// The evaluator walks the tree produced by the parser, evaluates
/// expressions, runs statements, calls functions and reports runtime errors
/// such as division by zero or mismatched operand types.
pub mod evaluator;
/// The host module defines the functions scripts call into.
///
/// Host functions are native Rust functions registered under dotted names.
/// The standard set covers console output, math, strings, files, random
/// numbers and process control.
pub mod host;
/// The lexer module tokenizes source code for further parsing.
///
/// The lexer reads the raw source text and produces a stream of tokens, each
/// carrying its kind, text and source position. Whitespace and comments are
/// dropped; malformed input is reported as a lexer error.
pub mod lexer;
/// The parser module builds the syntax tree from tokens.
///
/// A recursive-descent parser that turns the token stream into a
/// [`Program`](crate::ast::Program), reporting the first grammar violation
/// with its position.
pub mod parser;
/// The value module defines the runtime data types for evaluation.
///
/// Integers and floats are 32 bits wide. Strings, booleans and nil complete
/// the set used by scripts.
pub mod value;

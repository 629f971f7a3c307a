use npp::{
    error::{Error, LexError},
    interpreter::lexer::{TokenKind, tokenize},
    run,
};
use pretty_assertions::assert_eq;

fn kinds(src: &str) -> Vec<TokenKind> {
    tokenize(src).unwrap().into_iter().map(|t| t.kind).collect()
}

#[test]
fn definition_tokens() {
    use TokenKind::*;
    assert_eq!(kinds("define int[x, y]: [1, 2.5];"),
               vec![Define, Int, LBracket, Identifier, Comma, Identifier, RBracket, Colon, LBracket,
                    IntLiteral, Comma, FloatLiteral, RBracket, Semicolon, Eof]);
}

#[test]
fn keywords_win_over_identifiers() {
    use TokenKind::*;
    assert_eq!(kinds("if elseif else iffy define_x"),
               vec![If, ElseIf, Else, Identifier, Identifier, Eof]);
}

#[test]
fn two_character_operators() {
    use TokenKind::*;
    assert_eq!(kinds("== != && || <= >= < > ? . %"),
               vec![EqualEqual, BangEqual, AndAnd, OrOr, LessEqual, GreaterEqual, Less, Greater,
                    Question, Dot, Percent, Eof]);
}

#[test]
fn comments_are_skipped() {
    use TokenKind::*;
    let src = "1 // trailing\n--/ spans\nlines \\-- 2";
    assert_eq!(kinds(src), vec![IntLiteral, IntLiteral, Eof]);
}

#[test]
fn positions_on_a_long_line() {
    let src = format!("{}1", "1 + ".repeat(50_000));
    let tokens = tokenize(&src).unwrap();
    assert_eq!(tokens.len(), 100_002);

    let last = &tokens[tokens.len() - 2];
    assert_eq!((last.line, last.column), (1, 200_001));
    let eof = &tokens[tokens.len() - 1];
    assert_eq!((eof.line, eof.column), (1, 200_002));
}

#[test]
fn positions_after_a_multiline_string() {
    let tokens = tokenize("\"a\nbc\" x").unwrap();
    assert_eq!((tokens[1].line, tokens[1].column), (2, 5));
}

#[test]
fn double_minus_is_two_tokens() {
    use TokenKind::*;
    assert_eq!(kinds("--1"), vec![Minus, Minus, IntLiteral, Eof]);
}

#[test]
fn positions_are_one_based() {
    let tokens = tokenize("define\n  int").unwrap();
    assert_eq!((tokens[0].line, tokens[0].column), (1, 1));
    assert_eq!((tokens[1].line, tokens[1].column), (2, 3));
    assert_eq!((tokens[2].line, tokens[2].column), (2, 6));
}

#[test]
fn string_escapes_are_resolved() {
    let tokens = tokenize(r#""a\"b\n""#).unwrap();
    assert_eq!(tokens[0].kind, TokenKind::StringLiteral);
    assert_eq!(tokens[0].lexeme, "a\"b\n");
}

#[test]
fn float_needs_digits_after_the_dot() {
    use TokenKind::*;
    assert_eq!(kinds("3."), vec![IntLiteral, Dot, Eof]);
}

#[test]
fn lone_operator_characters() {
    let err = tokenize("x = 1").unwrap_err();
    assert_eq!(err,
               LexError::IncompleteOperator { character: '=',
                                              expected:  "==",
                                              line:      1,
                                              column:    3, });
    assert_eq!(err.to_string(), "Unexpected '=', did you mean '=='?");

    assert!(matches!(tokenize("a & b"), Err(LexError::IncompleteOperator { expected: "&&", .. })));
    assert!(matches!(tokenize("!a"), Err(LexError::IncompleteOperator { expected: "!=", .. })));
}

#[test]
fn unexpected_character() {
    let err = tokenize("\n  @").unwrap_err();
    assert_eq!(err,
               LexError::UnexpectedCharacter { character: '@',
                                               line:      2,
                                               column:    3, });
}

#[test]
fn unterminated_string_is_reported_at_the_quote() {
    let err = tokenize("x \"abc").unwrap_err();
    assert_eq!(err, LexError::UnterminatedString { line: 1, column: 3 });
}

#[test]
fn unterminated_comment() {
    let err = tokenize("1 --/ never closed").unwrap_err();
    assert_eq!(err, LexError::UnterminatedComment { line: 1, column: 3 });
}

#[test]
fn lexer_errors_render_with_kind_and_position() {
    let err = run("define int[x]: [1 # 2];").unwrap_err();
    assert!(matches!(err, Error::Lex(_)));
    assert_eq!(err.to_string(), "LexerError: Unexpected character '#' (line 1, column 19)");
}

use logos::{FilterResult, Lexer, Logos};
use tracing::trace;

use crate::error::LexError;

/// Result type used by the lexer.
pub type LexResult<T> = Result<T, LexError>;

/// The kind of a lexical token.
///
/// This enum defines all recognized tokens in the language. Literal and
/// identifier kinds carry no payload; their text lives in [`Token::lexeme`].
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[logos(error = LexFault)]
pub enum TokenKind {
    /// Spaces, tabs and line breaks.
    #[regex(r"[ \t\r\n]+", logos::skip)]
    Whitespace,
    /// `// Comments.`
    #[regex(r"//[^\n]*", logos::skip, allow_greedy = true)]
    LineComment,
    /// `--/ Block comments. \--`
    #[token("--/", block_comment)]
    BlockComment,

    /// `define`
    #[token("define")]
    Define,
    /// `int`
    #[token("int")]
    Int,
    /// `float`
    #[token("float")]
    Float,
    /// `string`
    #[token("string")]
    String,
    /// `bool`
    #[token("bool")]
    Bool,
    /// `struct`
    #[token("struct")]
    Struct,
    /// `func`
    #[token("func")]
    Func,
    /// `return`
    #[token("return")]
    Return,
    /// `if`
    #[token("if")]
    If,
    /// `elseif`
    #[token("elseif")]
    ElseIf,
    /// `else`
    #[token("else")]
    Else,
    /// `for`
    #[token("for")]
    For,
    /// `true`
    #[token("true")]
    True,
    /// `false`
    #[token("false")]
    False,

    /// Identifier tokens; variable, function or namespace names.
    #[regex(r"[A-Za-z_][A-Za-z0-9_]*")]
    Identifier,
    /// Integer literal tokens, such as `42`.
    #[regex(r"[0-9]+")]
    IntLiteral,
    /// Float literal tokens, such as `3.14`. A trailing `.` is not part of the
    /// number.
    #[regex(r"[0-9]+\.[0-9]+")]
    FloatLiteral,
    /// Double quoted string literal. The lexeme holds the unescaped content.
    #[token("\"", string_literal)]
    StringLiteral,

    /// `==`
    #[token("==")]
    EqualEqual,
    /// `!=`
    #[token("!=")]
    BangEqual,
    /// `&&`
    #[token("&&")]
    AndAnd,
    /// `||`
    #[token("||")]
    OrOr,
    /// `<=`
    #[token("<=")]
    LessEqual,
    /// `>=`
    #[token(">=")]
    GreaterEqual,
    /// `<`
    #[token("<")]
    Less,
    /// `>`
    #[token(">")]
    Greater,
    /// `+`
    #[token("+")]
    Plus,
    /// `-`
    #[token("-")]
    Minus,
    /// `*`
    #[token("*")]
    Star,
    /// `/`
    #[token("/")]
    Slash,
    /// `%`
    #[token("%")]
    Percent,
    /// `:`
    #[token(":")]
    Colon,
    /// `;`
    #[token(";")]
    Semicolon,
    /// `,`
    #[token(",")]
    Comma,
    /// `.`
    #[token(".")]
    Dot,
    /// `?`
    #[token("?")]
    Question,
    /// `(`
    #[token("(")]
    LParen,
    /// `)`
    #[token(")")]
    RParen,
    /// `[`
    #[token("[")]
    LBracket,
    /// `]`
    #[token("]")]
    RBracket,
    /// `{`
    #[token("{")]
    LBrace,
    /// `}`
    #[token("}")]
    RBrace,

    /// Synthetic end-of-input marker appended by [`tokenize`].
    Eof,
}

impl TokenKind {
    /// Returns `true` for reserved words.
    #[must_use]
    pub const fn is_keyword(self) -> bool {
        matches!(self,
                 Self::Define
                 | Self::Int
                 | Self::Float
                 | Self::String
                 | Self::Bool
                 | Self::Struct
                 | Self::Func
                 | Self::Return
                 | Self::If
                 | Self::ElseIf
                 | Self::Else
                 | Self::For
                 | Self::True
                 | Self::False)
    }

    /// Returns `true` for the keywords that may prefix a dotted name, as in
    /// `string.length(s)`.
    #[must_use]
    pub const fn is_namespace_keyword(self) -> bool {
        matches!(self,
                 Self::Int | Self::Float | Self::String | Self::Bool | Self::Struct | Self::Func)
    }
}

/// A token together with its text and 1-based source position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    /// What kind of token this is.
    pub kind:   TokenKind,
    /// Source text; for strings, the unescaped content without quotes.
    pub lexeme: String,
    /// 1-based line.
    pub line:   usize,
    /// 1-based column, counted in characters.
    pub column: usize,
}

/// Errors raised from inside the generated lexer.
///
/// `Unrecognized` is what logos reports for input no pattern accepts;
/// [`tokenize`] refines it using the offending character.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LexFault {
    #[default]
    Unrecognized,
    UnterminatedString,
    UnterminatedComment,
}

/// Skips a block comment whose `--/` opener was just matched.
///
/// The comment runs to the next `\--`. Without one, the rest of the input is
/// consumed and an error is reported at the opener.
fn block_comment(lex: &mut Lexer<TokenKind>) -> FilterResult<(), LexFault> {
    if let Some(end) = lex.remainder().find("\\--") {
        lex.bump(end + 3);
        FilterResult::Skip
    } else {
        lex.bump(lex.remainder().len());
        FilterResult::Error(LexFault::UnterminatedComment)
    }
}

/// Consumes the rest of a string literal after its opening quote.
///
/// A backslash always consumes the following character, so `\"` does not end
/// the literal. Strings may span lines.
fn string_literal(lex: &mut Lexer<TokenKind>) -> Result<(), LexFault> {
    let mut chars = lex.remainder().char_indices();
    while let Some((i, c)) = chars.next() {
        match c {
            '"' => {
                lex.bump(i + 1);
                return Ok(());
            },
            '\\' => {
                chars.next();
            },
            _ => {},
        }
    }
    lex.bump(lex.remainder().len());
    Err(LexFault::UnterminatedString)
}

/// Resolves the escapes `\n`, `\t`, `\"` and `\\`. Any other escaped character
/// stands for itself.
///
/// # Example
/// ```
/// use npp::interpreter::lexer::unescape;
///
/// assert_eq!(unescape(r#"a\tb\"c\q"#), "a\tb\"cq");
/// ```
#[must_use]
pub fn unescape(body: &str) -> String {
    let mut out = String::with_capacity(body.len());
    let mut chars = body.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('t') => out.push('\t'),
            Some(other) => out.push(other),
            None => {},
        }
    }
    out
}

/// Maps byte offsets to 1-based line and column numbers.
///
/// Offsets must be requested in non-decreasing order; each request only scans
/// the text since the previous one.
struct Cursor<'s> {
    source: &'s str,
    offset: usize,
    line:   usize,
    column: usize,
}

impl<'s> Cursor<'s> {
    const fn new(source: &'s str) -> Self {
        Self { source,
               offset: 0,
               line: 1,
               column: 1 }
    }

    fn advance_to(&mut self, offset: usize) -> (usize, usize) {
        for c in self.source[self.offset..offset].chars() {
            if c == '\n' {
                self.line += 1;
                self.column = 1;
            } else {
                self.column += 1;
            }
        }
        self.offset = offset;
        (self.line, self.column)
    }
}

/// Converts source text into tokens, ending with a single [`TokenKind::Eof`].
///
/// Whitespace and both comment styles are dropped. The first malformed token
/// aborts tokenization.
///
/// # Errors
/// - `UnexpectedCharacter` for a character no token starts with.
/// - `IncompleteOperator` for a lone `=`, `!`, `&` or `|`.
/// - `UnterminatedString` / `UnterminatedComment`, located at the opener.
///
/// # Example
/// ```
/// use npp::interpreter::lexer::{TokenKind, tokenize};
///
/// let tokens = tokenize("define int[x]: [3.5];").unwrap();
/// assert_eq!(tokens[0].kind, TokenKind::Define);
/// assert_eq!(tokens[7].kind, TokenKind::FloatLiteral);
/// assert_eq!(tokens.last().unwrap().kind, TokenKind::Eof);
/// ```
pub fn tokenize(source: &str) -> LexResult<Vec<Token>> {
    let mut cursor = Cursor::new(source);
    let mut tokens = Vec::new();
    let mut lexer = TokenKind::lexer(source);

    while let Some(result) = lexer.next() {
        let span = lexer.span();
        let (line, column) = cursor.advance_to(span.start);

        let kind = match result {
            Ok(kind) => kind,
            Err(fault) => return Err(lex_error(fault, &source[span.start..], line, column)),
        };

        let lexeme = match kind {
            TokenKind::StringLiteral => {
                let slice = lexer.slice();
                unescape(&slice[1..slice.len() - 1])
            },
            _ => lexer.slice().to_string(),
        };

        tokens.push(Token { kind,
                            lexeme,
                            line,
                            column });
    }

    let (line, column) = cursor.advance_to(source.len());
    tokens.push(Token { kind: TokenKind::Eof,
                        lexeme: String::new(),
                        line,
                        column });

    trace!(count = tokens.len(), "tokenized source");
    Ok(tokens)
}

/// Builds the public error for a fault raised at the start of `rest`.
fn lex_error(fault: LexFault, rest: &str, line: usize, column: usize) -> LexError {
    match fault {
        LexFault::UnterminatedString => LexError::UnterminatedString { line, column },
        LexFault::UnterminatedComment => LexError::UnterminatedComment { line, column },
        LexFault::Unrecognized => {
            let character = rest.chars().next().unwrap_or('\0');
            let expected = match character {
                '=' => Some("=="),
                '!' => Some("!="),
                '&' => Some("&&"),
                '|' => Some("||"),
                _ => None,
            };
            match expected {
                Some(expected) => LexError::IncompleteOperator { character,
                                                                 expected,
                                                                 line,
                                                                 column },
                None => LexError::UnexpectedCharacter { character,
                                                        line,
                                                        column },
            }
        },
    }
}

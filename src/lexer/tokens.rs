use lazy_static::lazy_static;
use std::{collections::HashMap, fmt::Display};

use crate::{Position, Span};

lazy_static! {
    pub static ref RESERVED_LOOKUP: HashMap<&'static str, TokenKind> = {
        let mut map = HashMap::new();
        map.insert("let", TokenKind::Let);
        map.insert("func", TokenKind::Func);
        map.insert("fn", TokenKind::Fn);
        map.insert("match", TokenKind::Match);
        map.insert("import", TokenKind::Import);
        map.insert("enum", TokenKind::Enum);
        map.insert("true", TokenKind::True);
        map.insert("false", TokenKind::False);
        map
    };
}

#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum TokenKind {
    EOF,
    Error,
    Number,
    String,
    Identifier,
    Underscore,

    OpenBracket,
    CloseBracket,
    OpenCurly,
    CloseCurly,
    OpenParen,
    CloseParen,

    Assignment, // =
    Equals,     // ==
    Not,        // !
    NotEquals,  // !=

    Less,
    LessEquals,
    Greater,
    GreaterEquals,

    Or,
    And,

    Dot,
    Semicolon,
    DoubleColon, // ::
    Comma,
    Arrow,     // ->
    LeftArrow, // <-
    Pipeline,  // |>
    Pipe,      // |

    Plus,
    Dash,
    Slash,
    Star,

    // Reserved
    Let,
    LetBang,
    Func,
    Fn,
    Match,
    Import,
    Enum,
    True,
    False,
}

impl Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// A lexical token. Tokens are plain values: the parser copies them into
/// nodes and never changes them afterwards.
#[derive(Debug, Clone)]
pub struct Token {
    pub kind: TokenKind,
    /// Lexeme text; for strings, the unescaped contents without quotes.
    pub value: String,
    pub span: Span,
    pub line: u32,
}

impl Token {
    /// End-of-input token anchored at `position`.
    pub fn eof(position: Position) -> Self {
        Token {
            kind: TokenKind::EOF,
            value: String::from("EOF"),
            span: Span {
                start: position.clone(),
                end: position,
            },
            line: 0,
        }
    }
}

// Only kind and lexeme take part; span and line are ignored.
impl PartialEq for Token {
    fn eq(&self, other: &Self) -> bool {
        self.kind == other.kind && self.value == other.value
    }
}

impl Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.kind {
            TokenKind::String => write!(f, "{:?}", self.value),
            _ => write!(f, "{}", self.value),
        }
    }
}

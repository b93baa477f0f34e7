use pylite_common::Span;
use serde::ser::{Serialize, SerializeStruct, Serializer};
use std::fmt;

/// A single token produced by the scanner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub lexeme: String,
    pub span: Span,
}

impl Token {
    pub fn new(kind: TokenKind, lexeme: impl Into<String>, span: Span) -> Self {
        Self {
            kind,
            lexeme: lexeme.into(),
            span,
        }
    }

    pub fn line(&self) -> u32 {
        self.span.start.line
    }

    pub fn column(&self) -> u32 {
        self.span.start.column
    }

    /// True for a keyword token spelled exactly `word`.
    pub fn is_keyword(&self, word: &str) -> bool {
        self.kind == TokenKind::Keyword && self.lexeme == word
    }

    /// True for a symbol token spelled exactly `symbol`.
    pub fn is_symbol(&self, symbol: &str) -> bool {
        self.kind == TokenKind::Symbol && self.lexeme == symbol
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({})", self.kind, self.lexeme)
    }
}

impl Serialize for Token {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("Token", 4)?;
        state.serialize_field("type", &self.kind)?;
        state.serialize_field("value", &self.lexeme)?;
        state.serialize_field("line", &self.line())?;
        state.serialize_field("column", &self.column())?;
        state.end()
    }
}

/// Token classes of the language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TokenKind {
    Keyword,
    Identifier,
    Number,
    String,
    Symbol,
    Whitespace,
    Newline,
    Error,
}

impl TokenKind {
    /// Whitespace and newlines carry no meaning for the parser.
    pub fn is_trivia(self) -> bool {
        matches!(self, TokenKind::Whitespace | TokenKind::Newline)
    }

    /// Whether the parser sees tokens of this kind. Error tokens were
    /// already reported by the scanner and are skipped along with trivia.
    pub fn is_significant(self) -> bool {
        !self.is_trivia() && self != TokenKind::Error
    }

    pub fn name(self) -> &'static str {
        match self {
            TokenKind::Keyword => "KEYWORD",
            TokenKind::Identifier => "IDENTIFIER",
            TokenKind::Number => "NUMBER",
            TokenKind::String => "STRING",
            TokenKind::Symbol => "SYMBOL",
            TokenKind::Whitespace => "WHITESPACE",
            TokenKind::Newline => "NEWLINE",
            TokenKind::Error => "ERROR",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Reserved words, classified as `Keyword` instead of `Identifier`.
pub const RESERVED_WORDS: &[&str] = &[
    "def", "if", "else", "elif", "while", "for", "in", "try", "except", "finally", "with", "as",
    "pass", "break", "continue", "return", "yield", "import", "from", "class", "and", "or",
    "not", "is", "lambda", "None", "True", "False", "print",
];

/// Recognized symbols. Two-character entries are tried before
/// one-character ones regardless of their position in this list.
pub const SYMBOLS: &[&str] = &[
    "==", "!=", "<=", ">=", ">>", "<<", "**", "//", "+=", "-=", "*=", "/=", "=", "+", "-", "*",
    "/", "%", "<", ">", "(", ")", "[", "]", "{", "}", ":", ";", ",", ".", "&", "|", "^", "~",
    "!", "@", "#", "$", "?",
];

pub fn is_reserved_word(lexeme: &str) -> bool {
    RESERVED_WORDS.contains(&lexeme)
}

pub fn is_symbol(lexeme: &str) -> bool {
    SYMBOLS.contains(&lexeme)
}

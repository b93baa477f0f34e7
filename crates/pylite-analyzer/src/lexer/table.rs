use pylite_common::DiagnosticBag;
use serde::Serialize;

use super::token::{Token, TokenKind};

/// Lexemes grouped by category, in source order.
///
/// String literals are deliberately absent; they only show up in
/// [`TokenStatistics::strings`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CategoryTable {
    #[serde(rename = "PR")]
    pub reserved_words: Vec<String>,
    #[serde(rename = "ID")]
    pub identifiers: Vec<String>,
    #[serde(rename = "Numeros")]
    pub numbers: Vec<String>,
    #[serde(rename = "Simbolos")]
    pub symbols: Vec<String>,
    #[serde(rename = "Error")]
    pub errors: Vec<String>,
}

/// Aggregate token counts per category.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct TokenStatistics {
    pub keywords: usize,
    pub identifiers: usize,
    pub numbers: usize,
    pub strings: usize,
    pub symbols: usize,
    pub errors: usize,
}

/// Everything the scanner produces for one source text.
#[derive(Debug, Clone, Default, Serialize)]
pub struct LexicalReport {
    pub tokens: Vec<Token>,
    pub table: CategoryTable,
    pub statistics: TokenStatistics,
    /// Unrecognized-character diagnostics only.
    #[serde(rename = "errors", serialize_with = "crate::report::serialize_messages")]
    pub diagnostics: DiagnosticBag,
    /// Same as `statistics.keywords`.
    pub reserved_words: usize,
}

impl LexicalReport {
    /// Append a token and fold it into the table and the statistics.
    pub(super) fn record(&mut self, token: Token) {
        let lexeme = token.lexeme.clone();
        match token.kind {
            TokenKind::Keyword => {
                self.table.reserved_words.push(lexeme);
                self.statistics.keywords += 1;
                self.reserved_words = self.statistics.keywords;
            }
            TokenKind::Identifier => {
                self.table.identifiers.push(lexeme);
                self.statistics.identifiers += 1;
            }
            TokenKind::Number => {
                self.table.numbers.push(lexeme);
                self.statistics.numbers += 1;
            }
            TokenKind::String => {
                self.statistics.strings += 1;
            }
            TokenKind::Symbol => {
                self.table.symbols.push(lexeme);
                self.statistics.symbols += 1;
            }
            TokenKind::Error => {
                self.table.errors.push(lexeme);
                self.statistics.errors += 1;
            }
            TokenKind::Whitespace | TokenKind::Newline => {}
        }
        self.tokens.push(token);
    }

    /// Tokens the parser cares about: no trivia, no error tokens.
    pub fn significant_tokens(&self) -> Vec<Token> {
        self.tokens
            .iter()
            .filter(|t| t.kind.is_significant())
            .cloned()
            .collect()
    }

    pub fn has_errors(&self) -> bool {
        !self.diagnostics.is_empty()
    }
}

pub mod cursor;
pub mod table;
pub mod token;

mod scanner;

pub use scanner::Scanner;
pub use table::{CategoryTable, LexicalReport, TokenStatistics};
pub use token::{Token, TokenKind};

/// Scan `source` with default settings.
pub fn scan(source: &str) -> LexicalReport {
    Scanner::new(source).scan()
}

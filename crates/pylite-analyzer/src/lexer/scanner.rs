use pylite_common::{Diagnostic, Position};

use super::cursor::Cursor;
use super::table::LexicalReport;
use super::token::{is_reserved_word, is_symbol, Token, TokenKind};

/// Hand-written scanner for the Python subset.
///
/// Never fails: unknown characters become `Error` tokens with a
/// diagnostic, unterminated strings become `Error` tokens without one.
pub struct Scanner<'src> {
    cursor: Cursor<'src>,
    keep_trivia: bool,
    report: LexicalReport,
}

impl<'src> Scanner<'src> {
    pub fn new(source: &'src str) -> Self {
        Self {
            cursor: Cursor::new(source),
            keep_trivia: false,
            report: LexicalReport::default(),
        }
    }

    /// Emit `Whitespace` and `Newline` tokens instead of dropping them.
    pub fn keep_trivia(mut self, keep: bool) -> Self {
        self.keep_trivia = keep;
        self
    }

    /// Scan the entire source.
    #[tracing::instrument(level = "debug", skip_all, fields(keep_trivia = self.keep_trivia))]
    pub fn scan(mut self) -> LexicalReport {
        while let Some(ch) = self.cursor.peek() {
            self.scan_token(ch);
        }

        tracing::debug!(
            tokens = self.report.tokens.len(),
            errors = self.report.diagnostics.len(),
            "scan finished"
        );
        self.report
    }

    /// Dispatch on the next character, in priority order.
    fn scan_token(&mut self, ch: char) {
        let start = self.cursor.position();

        match ch {
            '\n' => {
                self.cursor.advance();
                if self.keep_trivia {
                    self.push(TokenKind::Newline, start);
                }
            }
            c if is_space(c) => {
                if self.keep_trivia {
                    self.cursor.eat_while(|c| is_space(c) && c != '\n');
                    self.push(TokenKind::Whitespace, start);
                } else {
                    self.cursor.advance();
                }
            }
            '#' => self.cursor.eat_line(),
            '"' | '\'' => self.scan_string(start, ch),
            c if c.is_ascii_digit() => self.scan_number(start),
            c if is_ident_start(c) => self.scan_identifier(start),
            _ => self.scan_symbol(start, ch),
        }
    }

    // ---------------------------------------------------------------
    // Literals
    // ---------------------------------------------------------------

    /// Scan a quoted string. The lexeme keeps both quotes.
    fn scan_string(&mut self, start: Position, quote: char) {
        self.cursor.advance(); // opening quote

        loop {
            match self.cursor.peek() {
                // Unterminated: the rest of the line becomes an Error token.
                None | Some('\n') => {
                    self.push(TokenKind::Error, start);
                    return;
                }
                Some('\\') => {
                    self.cursor.advance();
                    if self.cursor.peek().is_some_and(|c| c != '\n') {
                        self.cursor.advance();
                    }
                }
                Some(c) if c == quote => {
                    self.cursor.advance();
                    self.push(TokenKind::String, start);
                    return;
                }
                Some(_) => {
                    self.cursor.advance();
                }
            }
        }
    }

    /// Scan digits with at most one `.`; a second `.` ends the number.
    fn scan_number(&mut self, start: Position) {
        let mut seen_dot = false;
        while let Some(ch) = self.cursor.peek() {
            match ch {
                c if c.is_ascii_digit() => {}
                '.' if !seen_dot => seen_dot = true,
                _ => break,
            }
            self.cursor.advance();
        }
        self.push(TokenKind::Number, start);
    }

    fn scan_identifier(&mut self, start: Position) {
        self.cursor.eat_while(is_ident_continue);
        let kind = if is_reserved_word(self.cursor.slice_from(start.offset)) {
            TokenKind::Keyword
        } else {
            TokenKind::Identifier
        };
        self.push(kind, start);
    }

    // ---------------------------------------------------------------
    // Symbols
    // ---------------------------------------------------------------

    /// Longest match first: two-character symbols, then one-character ones.
    fn scan_symbol(&mut self, start: Position, ch: char) {
        if let Some(second) = self.cursor.peek_second() {
            let pair: String = [ch, second].iter().collect();
            if is_symbol(&pair) {
                self.cursor.advance();
                self.cursor.advance();
                self.push(TokenKind::Symbol, start);
                return;
            }
        }

        self.cursor.advance();
        if is_symbol(self.cursor.slice_from(start.offset)) {
            self.push(TokenKind::Symbol, start);
            return;
        }

        let span = self.cursor.span_from(start);
        self.report.diagnostics.report(Diagnostic::lexical(
            format!("unrecognized character '{}'", ch),
            span,
        ));
        self.push(TokenKind::Error, start);
    }

    // ---------------------------------------------------------------
    // Helpers
    // ---------------------------------------------------------------

    /// Record a token spanning from `start` to the current position.
    fn push(&mut self, kind: TokenKind, start: Position) {
        let lexeme = self.cursor.slice_from(start.offset);
        let span = self.cursor.span_from(start);
        self.report.record(Token::new(kind, lexeme, span));
    }
}

/// ASCII whitespace, including the vertical tab.
fn is_space(c: char) -> bool {
    c.is_ascii_whitespace() || c == '\x0B'
}

fn is_ident_start(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_'
}

fn is_ident_continue(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

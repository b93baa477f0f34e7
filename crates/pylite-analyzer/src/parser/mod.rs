mod declarations;
mod expressions;
mod statements;

use pylite_common::{Diagnostic, DiagnosticBag, Limits, Position, Span};

use crate::ast::*;
use crate::lexer::token::{Token, TokenKind};

/// Recursive descent parser for the Python subset.
///
/// Precedence is a fixed ladder: comparison, then additive terms, then
/// factors. On a grammar violation the current production yields `None`
/// and the enclosing statement loop skips one token.
pub struct Parser {
    tokens: Vec<Token>,
    pos: usize,
    diagnostics: DiagnosticBag,
    max_depth: usize,
    depth: usize,
    /// Set once the nesting ceiling is hit; parsing stops and no further
    /// diagnostics are recorded.
    depth_exceeded: bool,
}

impl Parser {
    /// Create a parser over `tokens`. Whitespace, newline and error
    /// tokens are dropped.
    pub fn new(tokens: Vec<Token>) -> Self {
        let tokens = tokens.into_iter().filter(|t| t.kind.is_significant()).collect();
        Self {
            tokens,
            pos: 0,
            diagnostics: DiagnosticBag::new(),
            max_depth: Limits::default().max_depth,
            depth: 0,
            depth_exceeded: false,
        }
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Parse the entire token stream into a `Program` node.
    ///
    /// Always returns a tree, possibly partial, plus every syntax
    /// diagnostic collected on the way.
    #[tracing::instrument(level = "debug", skip_all, fields(tokens = self.tokens.len()))]
    pub fn parse(mut self) -> (Node, DiagnosticBag) {
        let mut statements = Vec::new();

        while !self.is_at_end() {
            match self.parse_statement() {
                Some(stmt) => statements.push(stmt),
                None => {
                    // Resynchronize by skipping exactly one token.
                    self.advance();
                }
            }
        }

        let origin = Position::new(1, 1, 0);
        let span = Span::new(origin, origin).merge(&self.previous_span());
        let program = Node::with_children(NodeKind::Program, span, statements);

        tracing::debug!(
            statements = program.children.len(),
            errors = self.diagnostics.len(),
            "parse finished"
        );
        (program, self.diagnostics)
    }

    // ========================================================================
    // Token manipulation helpers
    // ========================================================================

    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    fn peek_next(&self) -> Option<&Token> {
        self.tokens.get(self.pos + 1)
    }

    /// Advance past the current token and return it.
    fn advance(&mut self) -> Option<&Token> {
        let token = self.tokens.get(self.pos)?;
        self.pos += 1;
        Some(token)
    }

    fn is_at_end(&self) -> bool {
        self.pos >= self.tokens.len()
    }

    fn check_kind(&self, kind: TokenKind) -> bool {
        self.peek().is_some_and(|t| t.kind == kind)
    }

    fn check_keyword(&self, word: &str) -> bool {
        self.peek().is_some_and(|t| t.is_keyword(word))
    }

    fn check_next_keyword(&self, word: &str) -> bool {
        self.peek_next().is_some_and(|t| t.is_keyword(word))
    }

    fn check_symbol(&self, symbol: &str) -> bool {
        self.peek().is_some_and(|t| t.is_symbol(symbol))
    }

    fn check_next_symbol(&self, symbol: &str) -> bool {
        self.peek_next().is_some_and(|t| t.is_symbol(symbol))
    }

    /// Consume the symbol if it is the current token.
    fn eat_symbol(&mut self, symbol: &str) -> bool {
        if self.check_symbol(symbol) {
            self.advance();
            true
        } else {
            false
        }
    }

    /// Consume the symbol or report `expected <what>`.
    fn expect_symbol(&mut self, symbol: &str, what: &str) -> bool {
        if self.eat_symbol(symbol) {
            true
        } else {
            self.error(format!("expected {}", what));
            false
        }
    }

    /// Consume an identifier, returning its name and span.
    fn eat_identifier(&mut self) -> Option<(String, Span)> {
        if !self.check_kind(TokenKind::Identifier) {
            return None;
        }
        self.advance().map(|t| (t.lexeme.clone(), t.span))
    }

    /// Span of the current token, or of the last one at end of input.
    fn current_span(&self) -> Span {
        self.peek()
            .or_else(|| self.tokens.last())
            .map(|t| t.span)
            .unwrap_or_else(|| {
                let origin = Position::new(1, 1, 0);
                Span::new(origin, origin)
            })
    }

    /// Span of the token just consumed.
    fn previous_span(&self) -> Span {
        match self.pos.checked_sub(1).and_then(|i| self.tokens.get(i)) {
            Some(token) => token.span,
            None => self.current_span(),
        }
    }

    fn error(&mut self, message: impl Into<String>) {
        if self.depth_exceeded {
            return;
        }
        let span = self.current_span();
        self.diagnostics.report(Diagnostic::syntax(message, span));
    }

    // ========================================================================
    // Nesting ceiling
    // ========================================================================

    //
    // `depth` is the tree level of the node being built: the program is
    // level 0 and no node may sit below level `max_depth`.

    /// Enter one nesting level, or stop parsing if the ceiling is reached.
    fn descend(&mut self) -> bool {
        if self.depth >= self.max_depth {
            self.stop_at_ceiling();
            return false;
        }
        self.depth += 1;
        true
    }

    /// Whether a subtree of `height` placed at `level` would reach past
    /// the ceiling.
    fn exceeds_ceiling(&self, level: usize, height: usize) -> bool {
        level + height > self.max_depth + 1
    }

    /// Report the ceiling once and skip the rest of the input.
    fn stop_at_ceiling(&mut self) {
        if self.depth_exceeded {
            return;
        }
        let message = format!("maximum nesting depth of {} exceeded", self.max_depth);
        self.error(message);
        self.depth_exceeded = true;
        self.pos = self.tokens.len();
    }

    fn ascend(&mut self, levels: usize) {
        self.depth = self.depth.saturating_sub(levels);
    }

    /// Run `production` one nesting level deeper.
    fn nested(&mut self, production: fn(&mut Self) -> Option<Node>) -> Option<Node> {
        if !self.descend() {
            return None;
        }
        let node = production(self);
        self.ascend(1);
        node
    }
}

/// Compact rendering of a tree for assertions: `(Kind:value child...)`.
#[cfg(test)]
pub(crate) fn sexp(node: &Node) -> String {
    let mut out = format!("({}", node.type_name());
    if let Some(value) = node.value() {
        out.push(':');
        out.push_str(&value);
    }
    for child in &node.children {
        out.push(' ');
        out.push_str(&sexp(child));
    }
    out.push(')');
    out
}

#[cfg(test)]
pub(crate) fn parse_source(source: &str) -> (Node, DiagnosticBag) {
    Parser::new(crate::lexer::scan(source).tokens).parse()
}

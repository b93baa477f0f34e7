use crate::ast::*;
use crate::lexer::token::TokenKind;

use super::Parser;

impl Parser {
    /// Parse one statement, one nesting level deeper.
    pub(super) fn parse_statement(&mut self) -> Option<Node> {
        self.nested(Self::parse_statement_kind)
    }

    fn parse_statement_kind(&mut self) -> Option<Node> {
        if self.check_keyword("def") {
            return self.parse_function_def();
        }
        if self.check_keyword("if") {
            return self.parse_if_stmt();
        }
        if self.check_keyword("print") {
            return self.parse_expr_stmt();
        }
        if self.check_kind(TokenKind::Identifier) && self.check_next_symbol("=") {
            return self.parse_assignment();
        }
        self.parse_expr_stmt()
    }

    /// Parse `if condition: block`. There is no `elif`/`else`.
    fn parse_if_stmt(&mut self) -> Option<Node> {
        let start = self.current_span();
        self.advance(); // consume 'if'

        let condition = self.parse_expression()?;

        if !self.expect_symbol(":", "':' after if condition") {
            return None;
        }

        let then_block = self.parse_block();
        let span = start.merge(&self.previous_span());

        Some(Node::with_children(
            NodeKind::IfStatement,
            span,
            vec![condition, then_block],
        ))
    }

    /// Parse a block body.
    ///
    /// Blocks are not delimited by indentation: a block ends as soon as
    /// the current or the next token is the keyword `def` or `if`, or at
    /// end of input.
    pub(super) fn parse_block(&mut self) -> Node {
        let start = self.current_span();
        let mut statements = Vec::new();

        // The block node takes a level of its own between header and body.
        if self.descend() {
            while !self.is_at_end() && !self.at_block_boundary() {
                match self.parse_statement() {
                    Some(stmt) => statements.push(stmt),
                    None => {
                        self.advance();
                    }
                }
            }
            self.ascend(1);
        }

        let span = if statements.is_empty() {
            start
        } else {
            start.merge(&self.previous_span())
        };
        Node::with_children(NodeKind::Block, span, statements)
    }

    fn at_block_boundary(&self) -> bool {
        ["def", "if"]
            .iter()
            .any(|word| self.check_keyword(word) || self.check_next_keyword(word))
    }

    /// Parse `name = expression`.
    fn parse_assignment(&mut self) -> Option<Node> {
        let start = self.current_span();
        let (target, _) = self.eat_identifier()?;

        if !self.expect_symbol("=", "'=' in assignment") {
            return None;
        }

        let value = self.parse_expression()?;
        let span = start.merge(&self.previous_span());

        Some(Node::with_children(
            NodeKind::Assignment { target },
            span,
            vec![value],
        ))
    }

    /// Parse a bare expression used as a statement.
    fn parse_expr_stmt(&mut self) -> Option<Node> {
        let expr = self.parse_expression()?;
        let span = expr.span;
        Some(Node::with_children(
            NodeKind::ExpressionStatement,
            span,
            vec![expr],
        ))
    }
}

use pylite_common::Span;

use crate::ast::*;
use crate::lexer::token::{Token, TokenKind};

use super::Parser;

// ============================================================================
// Precedence ladder
// ============================================================================
//
//  expression := comparison
//  comparison := term   (('>' | '<' | '>=' | '<=' | '==' | '!=') term)*
//  term       := factor (('+' | '-') factor)*
//
// There is no multiplicative level: `*` and `/` are scanned as symbols but
// never become binary operators.

const COMPARISON_OPERATORS: &[&str] = &[">", "<", ">=", "<=", "==", "!="];
const TERM_OPERATORS: &[&str] = &["+", "-"];

impl Parser {
    /// Parse an expression one nesting level deeper.
    pub(super) fn parse_expression(&mut self) -> Option<Node> {
        self.nested(Self::parse_comparison)
    }

    fn parse_comparison(&mut self) -> Option<Node> {
        self.parse_left_assoc(COMPARISON_OPERATORS, Self::parse_term)
    }

    fn parse_term(&mut self) -> Option<Node> {
        self.parse_left_assoc(TERM_OPERATORS, Self::parse_factor)
    }

    /// Parse `operand (op operand)*` into a left-leaning chain of `BinaryOp`s.
    ///
    /// A missing left operand yields `None` without consuming an operator.
    /// A missing right operand still builds the node, with a single child.
    ///
    /// Each link pushes the whole left side one level down, so the chain
    /// is also checked by height against the level it starts at.
    fn parse_left_assoc(
        &mut self,
        operators: &[&str],
        operand: fn(&mut Self) -> Option<Node>,
    ) -> Option<Node> {
        let level = self.depth;
        let mut expr = operand(self)?;
        let mut height = expr.height();
        let mut chained = 0;

        while let Some(op) = self.peek_operator(operators) {
            if !self.descend() {
                break;
            }
            chained += 1;
            self.advance(); // consume operator

            let right = operand(self);
            let linked = 1 + height.max(right.as_ref().map_or(0, Node::height));
            if self.exceeds_ceiling(level, linked) {
                self.stop_at_ceiling();
                break;
            }
            height = linked;

            let start = expr.span;
            let mut children = vec![expr];
            children.extend(right);
            let span = start.merge(&self.previous_span());
            expr = Node::with_children(NodeKind::BinaryOp(op), span, children);
        }

        self.ascend(chained);
        Some(expr)
    }

    fn peek_operator(&self, operators: &[&str]) -> Option<BinaryOp> {
        let token = self.peek()?;
        if token.kind == TokenKind::Symbol && operators.contains(&token.lexeme.as_str()) {
            BinaryOp::from_symbol(&token.lexeme)
        } else {
            None
        }
    }

    // ========================================================================
    // Factors
    // ========================================================================

    fn parse_factor(&mut self) -> Option<Node> {
        let Some(token) = self.peek().cloned() else {
            self.error("expected expression");
            return None;
        };

        match token.kind {
            TokenKind::Symbol if token.lexeme == "(" => {
                self.advance();
                let expr = self.parse_expression();
                self.expect_symbol(")", "')' after expression");
                expr
            }
            TokenKind::Number => {
                self.advance();
                Some(Node::new(NodeKind::Number(token.lexeme), token.span))
            }
            TokenKind::String => {
                self.advance();
                Some(Node::new(NodeKind::String(token.lexeme), token.span))
            }
            TokenKind::Identifier => {
                self.advance();
                self.parse_name(token)
            }
            TokenKind::Keyword if token.lexeme == "print" => {
                self.advance();
                if !self.expect_symbol("(", "'(' after print") {
                    return None;
                }
                let kind = NodeKind::FunctionCall { name: token.lexeme };
                Some(self.finish_call(kind, token.span))
            }
            _ => {
                self.error("expected expression");
                None
            }
        }
    }

    /// After an identifier: a call, a method call, or a plain name.
    fn parse_name(&mut self, name_token: Token) -> Option<Node> {
        if self.eat_symbol("(") {
            let kind = NodeKind::FunctionCall {
                name: name_token.lexeme,
            };
            return Some(self.finish_call(kind, name_token.span));
        }

        if self.eat_symbol(".") {
            let Some((method, _)) = self.eat_identifier() else {
                self.error("expected method name after '.'");
                return None;
            };
            if !self.expect_symbol("(", "'(' after method name") {
                return None;
            }
            let kind = NodeKind::MethodCall {
                object: name_token.lexeme,
                method,
            };
            return Some(self.finish_call(kind, name_token.span));
        }

        Some(Node::new(
            NodeKind::Identifier(name_token.lexeme),
            name_token.span,
        ))
    }

    /// Parse `args? ')'` after an opening parenthesis.
    ///
    /// A missing `)` is reported but the call node is still produced.
    fn finish_call(&mut self, kind: NodeKind, start: Span) -> Node {
        let mut args = Vec::new();
        if !self.check_symbol(")") {
            loop {
                if let Some(arg) = self.parse_expression() {
                    args.push(arg);
                }
                if !self.eat_symbol(",") {
                    break;
                }
            }
        }
        self.expect_symbol(")", "')' after arguments");

        let span = start.merge(&self.previous_span());
        Node::with_children(kind, span, args)
    }
}

use crate::ast::*;

use super::Parser;

impl Parser {
    /// Parse `def name(param, ...): block`.
    ///
    /// Parameters become `Parameter` children ahead of the body block.
    pub(super) fn parse_function_def(&mut self) -> Option<Node> {
        let start = self.current_span();
        self.advance(); // consume 'def'

        let Some((name, _)) = self.eat_identifier() else {
            self.error("expected function name");
            return None;
        };

        if !self.expect_symbol("(", "'(' after function name") {
            return None;
        }

        let mut children = Vec::new();
        if !self.check_symbol(")") {
            loop {
                let Some((param, span)) = self.eat_identifier() else {
                    self.error("expected parameter name");
                    break;
                };
                children.push(Node::new(NodeKind::Parameter(param), span));

                if !self.eat_symbol(",") {
                    break;
                }
            }
        }

        if !self.expect_symbol(")", "')' after parameters") {
            return None;
        }
        if !self.expect_symbol(":", "':' after function definition") {
            return None;
        }

        children.push(self.parse_block());
        let span = start.merge(&self.previous_span());

        Some(Node::with_children(
            NodeKind::FunctionDef { name },
            span,
            children,
        ))
    }
}

#[cfg(test)]
mod tests {
    use crate::parser::{parse_source, sexp};

    #[test]
    fn function_with_parameters() {
        let (program, diags) = parse_source("def greet(name, times):\n  print(name)");
        assert!(diags.is_empty(), "{:?}", diags.messages());
        assert_eq!(
            sexp(&program),
            "(Program (FunctionDef:greet (Parameter:name) (Parameter:times) \
             (Block (ExpressionStatement (FunctionCall:print (Identifier:name))))))"
        );
    }

    #[test]
    fn function_without_parameters() {
        let (program, diags) = parse_source("def f():\n  x = 1");
        assert!(diags.is_empty(), "{:?}", diags.messages());
        assert_eq!(
            sexp(&program),
            "(Program (FunctionDef:f (Block (Assignment:x (Number:1)))))"
        );
    }

    #[test]
    fn pass_is_not_a_statement() {
        let (program, diags) = parse_source("def f():\n  pass");
        assert_eq!(
            diags.messages(),
            vec!["error at line 2: expected expression".to_string()]
        );
        assert_eq!(sexp(&program), "(Program (FunctionDef:f (Block)))");
    }

    #[test]
    fn missing_name() {
        let (_, diags) = parse_source("def (x):\n  y = 1");
        assert_eq!(
            diags.messages()[0],
            "error at line 1: expected function name"
        );
    }

    #[test]
    fn bad_parameter_then_missing_paren() {
        let (_, diags) = parse_source("def f(1):\n  y = 1");
        let messages = diags.messages();
        assert_eq!(messages[0], "error at line 1: expected parameter name");
        assert_eq!(messages[1], "error at line 1: expected ')' after parameters");
    }

    #[test]
    fn missing_colon() {
        let (_, diags) = parse_source("def f()\n  y = 1");
        assert_eq!(
            diags.messages()[0],
            "error at line 2: expected ':' after function definition"
        );
    }

    #[test]
    fn function_body_ends_at_nested_if() {
        // The heuristic is not indentation-aware: the `if` leaves the body.
        let (program, diags) = parse_source("def f(a):\n  if a > 1:\n    b = 2");
        assert!(diags.is_empty(), "{:?}", diags.messages());
        assert_eq!(
            sexp(&program),
            "(Program (FunctionDef:f (Parameter:a) (Block)) \
             (IfStatement (BinaryOp:> (Identifier:a) (Number:1)) (Block (Assignment:b (Number:2)))))"
        );
    }
}

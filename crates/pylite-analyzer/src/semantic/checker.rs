use pylite_common::{Diagnostic, DiagnosticBag, Limits};

use crate::ast::*;

use super::scope::VariableTable;
use super::type_checker;
use super::types::VariableType;
use super::SemanticReport;

/// Single-pass tree walker: infers variable types, records assignments
/// in the flat variable table, and reports type misuse.
///
/// Nodes are visited in source order, so a use before the first
/// assignment sees the name as undefined (or with its previous type).
pub struct Checker {
    variables: VariableTable,
    diagnostics: DiagnosticBag,
    max_depth: usize,
    depth: usize,
    depth_exceeded: bool,
}

impl Default for Checker {
    fn default() -> Self {
        Self::new()
    }
}

impl Checker {
    pub fn new() -> Self {
        Self {
            variables: VariableTable::new(),
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

    /// Walk the tree and build the report. A missing tree yields an
    /// empty, successful report.
    #[tracing::instrument(level = "debug", skip_all)]
    pub fn check(mut self, program: Option<&Node>) -> SemanticReport {
        if let Some(program) = program {
            self.walk(program);
        }

        tracing::debug!(
            variables = self.variables.len(),
            errors = self.diagnostics.len(),
            "semantic check finished"
        );
        SemanticReport::new(self.diagnostics, self.variables)
    }

    // ====================================================================
    // Traversal
    // ====================================================================

    /// Visit `node` at tree level `self.depth`, the root being level 0.
    fn walk(&mut self, node: &Node) {
        if self.depth > self.max_depth {
            if !self.depth_exceeded {
                self.depth_exceeded = true;
                let message = format!("maximum nesting depth of {} exceeded", self.max_depth);
                self.error(node, message);
            }
            return;
        }

        self.depth += 1;
        match &node.kind {
            NodeKind::Assignment { target } => self.check_assignment(node, target),
            NodeKind::IfStatement => self.check_if(node),
            NodeKind::BinaryOp(op) => self.check_binary(node, *op),
            NodeKind::MethodCall { object, method } => {
                self.check_method_call(node, object, method);
                self.walk_children(node);
            }
            // Calls, containers and leaves.
            _ => self.walk_children(node),
        }
        self.depth -= 1;
    }

    fn walk_children(&mut self, node: &Node) {
        for child in &node.children {
            self.walk(child);
        }
    }

    fn check_assignment(&mut self, node: &Node, target: &str) {
        let [value] = node.children.as_slice() else {
            self.error(node, "assignment without value");
            return;
        };

        let ty = self.infer(value);
        self.variables.define(target, ty, node.line());
        self.walk(value);
    }

    fn check_if(&mut self, node: &Node) {
        if node.children.is_empty() {
            self.error(node, "if statement without condition");
            return;
        }
        self.walk_children(node);
    }

    fn check_binary(&mut self, node: &Node, op: BinaryOp) {
        let [left, right] = node.children.as_slice() else {
            self.error(node, "incomplete binary operation");
            self.walk_children(node);
            return;
        };

        let left_ty = self.infer(left);
        let right_ty = self.infer(right);
        if let Err(message) = type_checker::check_binary_op(left_ty, op, right_ty) {
            self.error(node, message);
        }

        self.walk(left);
        self.walk(right);
    }

    fn check_method_call(&mut self, node: &Node, object: &str, method: &str) {
        match self.variables.type_of(object) {
            None => self.error(node, format!("variable '{}' is not defined", object)),
            Some(ty) if method == "lower" && ty != VariableType::String => self.error(
                node,
                format!("method 'lower()' is not available for the type of '{}'", object),
            ),
            Some(_) => {}
        }
    }

    // ====================================================================
    // Inference
    // ====================================================================

    /// Type of an expression against the current table. Reports nothing.
    fn infer(&self, node: &Node) -> VariableType {
        self.infer_at(node, self.depth)
    }

    fn infer_at(&self, node: &Node, depth: usize) -> VariableType {
        if depth > self.max_depth {
            return VariableType::Unknown;
        }
        match &node.kind {
            NodeKind::Number(_) => VariableType::Int,
            NodeKind::String(_) => VariableType::String,
            NodeKind::Identifier(name) => self
                .variables
                .type_of(name)
                .unwrap_or(VariableType::Unknown),
            NodeKind::BinaryOp(op) if op.is_comparison() => VariableType::Bool,
            NodeKind::BinaryOp(op) => match node.children.as_slice() {
                [left, right, ..] => type_checker::binary_result(
                    self.infer_at(left, depth + 1),
                    *op,
                    self.infer_at(right, depth + 1),
                ),
                _ => VariableType::Unknown,
            },
            NodeKind::MethodCall { method, .. } => type_checker::method_result(method),
            _ => VariableType::Unknown,
        }
    }

    fn error(&mut self, node: &Node, message: impl Into<String>) {
        self.diagnostics
            .report(Diagnostic::semantic(message, node.span));
    }
}

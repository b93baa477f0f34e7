mod checker;
pub mod scope;
pub mod type_checker;
pub mod types;

use pylite_common::DiagnosticBag;
use serde::Serialize;

use crate::ast::Node;

pub use checker::Checker;
pub use scope::{Variable, VariableTable};
pub use types::VariableType;

/// Outcome of the semantic stage.
#[derive(Debug, Clone, Default, Serialize)]
pub struct SemanticReport {
    /// Rendered diagnostics, in traversal order.
    pub errors: Vec<String>,
    pub variables: VariableTable,
    /// The subset of `errors` about comparing incompatible types.
    pub type_mismatches: Vec<String>,
    pub success: bool,
    #[serde(skip)]
    pub diagnostics: DiagnosticBag,
}

impl SemanticReport {
    fn new(diagnostics: DiagnosticBag, variables: VariableTable) -> Self {
        let errors = diagnostics.messages();
        let type_mismatches = errors
            .iter()
            .filter(|e| e.contains("compare") || e.contains("comparison"))
            .cloned()
            .collect();
        Self {
            success: errors.is_empty(),
            errors,
            variables,
            type_mismatches,
            diagnostics,
        }
    }
}

/// Check `program` with the default nesting ceiling.
pub fn check(program: Option<&Node>) -> SemanticReport {
    Checker::new().check(program)
}

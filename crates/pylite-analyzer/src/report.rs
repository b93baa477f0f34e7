use pylite_common::DiagnosticBag;
use serde::{Serialize, Serializer};

use crate::ast::Node;
use crate::lexer::LexicalReport;
use crate::semantic::SemanticReport;

/// Serialize a bag as its rendered message strings.
pub(crate) fn serialize_messages<S: Serializer>(
    bag: &DiagnosticBag,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.collect_seq(bag.diagnostics().iter().map(ToString::to_string))
}

/// Outcome of the parsing stage.
#[derive(Debug, Clone, Serialize)]
pub struct SyntaxReport {
    pub ast: Node,
    #[serde(rename = "errors", serialize_with = "serialize_messages")]
    pub diagnostics: DiagnosticBag,
    pub success: bool,
    /// Line of the first syntax diagnostic, 0 if there is none.
    pub error_line: u32,
}

impl SyntaxReport {
    pub fn new(ast: Node, diagnostics: DiagnosticBag) -> Self {
        Self {
            ast,
            success: diagnostics.is_empty(),
            error_line: diagnostics.first_line().unwrap_or(0),
            diagnostics,
        }
    }
}

/// Combined result of one analysis run.
///
/// Lexical diagnostics are reported but never affect `success`.
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisReport {
    pub lexical: LexicalReport,
    pub syntax: SyntaxReport,
    pub semantic: SemanticReport,
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl AnalysisReport {
    pub fn new(lexical: LexicalReport, syntax: SyntaxReport, semantic: SemanticReport) -> Self {
        let error = if !syntax.success {
            Some(format!(
                "syntax errors: {}",
                syntax.diagnostics.messages().join("; ")
            ))
        } else if !semantic.success {
            Some(format!("semantic errors: {}", semantic.errors.join("; ")))
        } else {
            None
        };

        Self {
            success: syntax.success && semantic.success,
            lexical,
            syntax,
            semantic,
            error,
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    /// Every diagnostic from every stage, in stage order.
    pub fn diagnostics(&self) -> impl Iterator<Item = &pylite_common::Diagnostic> {
        self.lexical
            .diagnostics
            .diagnostics()
            .iter()
            .chain(self.syntax.diagnostics.diagnostics())
            .chain(self.semantic.diagnostics.diagnostics())
    }
}

use serde::Serialize;

/// Inferred type of a variable or expression.
///
/// The checker never fails on `Unknown`; it only suppresses the checks
/// that would need a concrete type.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum VariableType {
    Int,
    String,
    Bool,
    #[default]
    Unknown,
}

impl VariableType {
    /// Name used in reports.
    pub fn name(self) -> &'static str {
        match self {
            VariableType::Int => "int",
            VariableType::String => "string",
            VariableType::Bool => "bool",
            VariableType::Unknown => "unknown",
        }
    }

    /// Word used in comparison diagnostics (`number`, `string`).
    pub(super) fn display_name(self) -> &'static str {
        match self {
            VariableType::Int => "number",
            other => other.name(),
        }
    }
}

impl std::fmt::Display for VariableType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

use std::collections::BTreeMap;

use serde::Serialize;

use super::types::VariableType;

/// A name bound by an assignment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Variable {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: VariableType,
    /// Line of the assignment that last defined it.
    pub line: u32,
}

/// One flat name table for the whole unit.
///
/// There is no nesting: assignments inside function bodies and `if`
/// blocks land here too, and function parameters are never entered.
/// Entries are keyed by name so iteration (and the JSON report) is
/// ordered. Redefinition overwrites.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct VariableTable {
    variables: BTreeMap<String, Variable>,
}

impl VariableTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace the binding for `name`.
    pub fn define(&mut self, name: &str, ty: VariableType, line: u32) {
        self.variables.insert(
            name.to_string(),
            Variable {
                name: name.to_string(),
                ty,
                line,
            },
        );
    }

    pub fn lookup(&self, name: &str) -> Option<&Variable> {
        self.variables.get(name)
    }

    pub fn type_of(&self, name: &str) -> Option<VariableType> {
        self.lookup(name).map(|v| v.ty)
    }

    pub fn len(&self) -> usize {
        self.variables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.variables.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Variable> {
        self.variables.values()
    }
}

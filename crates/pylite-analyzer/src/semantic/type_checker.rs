use crate::ast::{BinaryOp, OperatorClass};

use super::types::VariableType;

/// Check the operand types of a binary operation.
///
/// Only number/string mixes are rejected. `Unknown` and `Bool` operands
/// never produce an error.
pub fn check_binary_op(
    left: VariableType,
    op: BinaryOp,
    right: VariableType,
) -> Result<(), String> {
    use VariableType::{Int, String};

    match op.class() {
        OperatorClass::Relational => match (left, right) {
            (Int, String) | (String, Int) => Err(format!(
                "cannot compare {} with {} using '{}'",
                left.display_name(),
                right.display_name(),
                op
            )),
            _ => Ok(()),
        },
        OperatorClass::Equality => match (left, right) {
            (Int, String) | (String, Int) => Err(format!(
                "comparison between incompatible types: {} and {}",
                left.display_name(),
                right.display_name()
            )),
            _ => Ok(()),
        },
        OperatorClass::Arithmetic => {
            // `+` doubles as concatenation.
            if op != BinaryOp::Add && (left == String || right == String) {
                Err(format!("operator '{}' is not valid for strings", op))
            } else {
                Ok(())
            }
        }
    }
}

/// Result type of a binary operation.
///
/// Comparisons are always `Bool`. Arithmetic is `Int` over two ints and
/// `String` as soon as one side is a string; anything else is `Unknown`.
pub fn binary_result(left: VariableType, op: BinaryOp, right: VariableType) -> VariableType {
    if op.is_comparison() {
        return VariableType::Bool;
    }
    match (left, right) {
        (VariableType::Int, VariableType::Int) => VariableType::Int,
        (VariableType::String, _) | (_, VariableType::String) => VariableType::String,
        _ => VariableType::Unknown,
    }
}

/// Result type of `object.method(...)`: `lower` yields a string.
pub fn method_result(method: &str) -> VariableType {
    if method.starts_with("lower") {
        VariableType::String
    } else {
        VariableType::Unknown
    }
}

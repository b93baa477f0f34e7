use std::borrow::Cow;

use pylite_common::Span;
use serde::ser::{Serialize, SerializeStruct, Serializer};

// ============================================================================
// Nodes
// ============================================================================

/// A syntax tree node. Each node exclusively owns its children.
///
/// The payload lives in [`NodeKind`]; the children list keeps the shape
/// of the tree uniform so a walker can always fall back to visiting
/// children for kinds it does not care about.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    pub kind: NodeKind,
    pub span: Span,
    pub children: Vec<Node>,
}

/// Node kinds and their typed payloads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeKind {
    /// Root of every tree.
    Program,
    /// `def name(params): block`. Children: parameters, then the body block.
    FunctionDef { name: String },
    /// `if cond: block`. Children: condition, then block.
    IfStatement,
    /// Statement list of a function or `if` body.
    Block,
    /// `target = value`. Child: the value expression.
    Assignment { target: String },
    /// Bare expression used as a statement. Child: the expression.
    ExpressionStatement,
    /// Children: left operand, right operand.
    BinaryOp(BinaryOp),
    /// `name(args)`. Children: arguments.
    FunctionCall { name: String },
    /// `object.method(args)`. Children: arguments.
    MethodCall { object: String, method: String },
    Identifier(String),
    /// Numeric literal, exactly as written.
    Number(String),
    /// String literal including its quotes.
    String(String),
    Parameter(String),
}

impl Node {
    pub fn new(kind: NodeKind, span: Span) -> Self {
        Self {
            kind,
            span,
            children: Vec::new(),
        }
    }

    pub fn with_children(kind: NodeKind, span: Span, children: Vec<Node>) -> Self {
        Self {
            kind,
            span,
            children,
        }
    }

    /// Line of the leftmost token of this node.
    pub fn line(&self) -> u32 {
        self.span.line()
    }

    /// Number of levels in this subtree; a leaf has height 1.
    pub fn height(&self) -> usize {
        1 + self.children.iter().map(Node::height).max().unwrap_or(0)
    }

    /// Name of the node kind as it appears in reports.
    pub fn type_name(&self) -> &'static str {
        match self.kind {
            NodeKind::Program => "Program",
            NodeKind::FunctionDef { .. } => "FunctionDef",
            NodeKind::IfStatement => "IfStatement",
            NodeKind::Block => "Block",
            NodeKind::Assignment { .. } => "Assignment",
            NodeKind::ExpressionStatement => "ExpressionStatement",
            NodeKind::BinaryOp(_) => "BinaryOp",
            NodeKind::FunctionCall { .. } => "FunctionCall",
            NodeKind::MethodCall { .. } => "MethodCall",
            NodeKind::Identifier(_) => "Identifier",
            NodeKind::Number(_) => "Number",
            NodeKind::String(_) => "String",
            NodeKind::Parameter(_) => "Parameter",
        }
    }

    /// Operator symbol, name, or literal text carried by this node.
    pub fn value(&self) -> Option<Cow<'_, str>> {
        match &self.kind {
            NodeKind::Program
            | NodeKind::IfStatement
            | NodeKind::Block
            | NodeKind::ExpressionStatement => None,
            NodeKind::FunctionDef { name }
            | NodeKind::Assignment { target: name }
            | NodeKind::FunctionCall { name }
            | NodeKind::Identifier(name)
            | NodeKind::Number(name)
            | NodeKind::String(name)
            | NodeKind::Parameter(name) => Some(Cow::Borrowed(name.as_str())),
            NodeKind::BinaryOp(op) => Some(Cow::Borrowed(op.symbol())),
            NodeKind::MethodCall { object, method } => {
                Some(Cow::Owned(format!("{}.{}", object, method)))
            }
        }
    }
}

impl Serialize for Node {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let value = self.value();
        let len = 2 + usize::from(value.is_some()) + usize::from(!self.children.is_empty());
        let mut state = serializer.serialize_struct("Node", len)?;
        state.serialize_field("type", self.type_name())?;
        if let Some(value) = value {
            state.serialize_field("value", &value)?;
        }
        state.serialize_field("line", &self.line())?;
        if !self.children.is_empty() {
            state.serialize_field("children", &self.children)?;
        }
        state.end()
    }
}

// ============================================================================
// Operators
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinaryOp {
    Gt,
    Lt,
    Ge,
    Le,
    Eq,
    Ne,
    Add,
    Sub,
    Mul,
    Div,
}

/// Families of operators that share a compatibility rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperatorClass {
    /// `>`, `<`, `>=`, `<=`
    Relational,
    /// `==`, `!=`
    Equality,
    /// `+`, `-`, `*`, `/`
    Arithmetic,
}

impl BinaryOp {
    pub fn from_symbol(symbol: &str) -> Option<Self> {
        match symbol {
            ">" => Some(BinaryOp::Gt),
            "<" => Some(BinaryOp::Lt),
            ">=" => Some(BinaryOp::Ge),
            "<=" => Some(BinaryOp::Le),
            "==" => Some(BinaryOp::Eq),
            "!=" => Some(BinaryOp::Ne),
            "+" => Some(BinaryOp::Add),
            "-" => Some(BinaryOp::Sub),
            "*" => Some(BinaryOp::Mul),
            "/" => Some(BinaryOp::Div),
            _ => None,
        }
    }

    pub fn symbol(self) -> &'static str {
        match self {
            BinaryOp::Gt => ">",
            BinaryOp::Lt => "<",
            BinaryOp::Ge => ">=",
            BinaryOp::Le => "<=",
            BinaryOp::Eq => "==",
            BinaryOp::Ne => "!=",
            BinaryOp::Add => "+",
            BinaryOp::Sub => "-",
            BinaryOp::Mul => "*",
            BinaryOp::Div => "/",
        }
    }

    pub fn class(self) -> OperatorClass {
        match self {
            BinaryOp::Gt | BinaryOp::Lt | BinaryOp::Ge | BinaryOp::Le => OperatorClass::Relational,
            BinaryOp::Eq | BinaryOp::Ne => OperatorClass::Equality,
            BinaryOp::Add | BinaryOp::Sub | BinaryOp::Mul | BinaryOp::Div => {
                OperatorClass::Arithmetic
            }
        }
    }

    /// Relational and equality operators always produce a Bool.
    pub fn is_comparison(self) -> bool {
        self.class() != OperatorClass::Arithmetic
    }
}

impl std::fmt::Display for BinaryOp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.symbol())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pylite_common::Position;

    fn span(line: u32) -> Span {
        let pos = Position::new(line, 1, 0);
        Span::new(pos, pos)
    }

    #[test]
    fn operator_symbols_round_trip() {
        for symbol in [">", "<", ">=", "<=", "==", "!=", "+", "-", "*", "/"] {
            let op = BinaryOp::from_symbol(symbol).unwrap();
            assert_eq!(op.symbol(), symbol);
        }
        assert_eq!(BinaryOp::from_symbol("**"), None);
    }

    #[test]
    fn operator_classes() {
        assert_eq!(BinaryOp::Ge.class(), OperatorClass::Relational);
        assert_eq!(BinaryOp::Ne.class(), OperatorClass::Equality);
        assert_eq!(BinaryOp::Div.class(), OperatorClass::Arithmetic);
        assert!(BinaryOp::Eq.is_comparison());
        assert!(!BinaryOp::Add.is_comparison());
    }

    #[test]
    fn leaf_serialization_omits_children() {
        let node = Node::new(NodeKind::Number("42".into()), span(3));
        assert_eq!(
            serde_json::to_value(&node).unwrap(),
            serde_json::json!({"type": "Number", "value": "42", "line": 3})
        );
    }

    #[test]
    fn method_call_value_is_dotted() {
        let node = Node::with_children(
            NodeKind::MethodCall {
                object: "s".into(),
                method: "lower".into(),
            },
            span(1),
            vec![],
        );
        assert_eq!(node.value().as_deref(), Some("s.lower"));
    }

    #[test]
    fn block_serialization_omits_value() {
        let block = Node::with_children(
            NodeKind::Block,
            span(2),
            vec![Node::new(NodeKind::Identifier("x".into()), span(2))],
        );
        assert_eq!(
            serde_json::to_value(&block).unwrap(),
            serde_json::json!({
                "type": "Block",
                "line": 2,
                "children": [{"type": "Identifier", "value": "x", "line": 2}]
            })
        );
    }
}

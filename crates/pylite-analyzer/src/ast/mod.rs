pub mod nodes;

pub use nodes::{BinaryOp, Node, NodeKind, OperatorClass};

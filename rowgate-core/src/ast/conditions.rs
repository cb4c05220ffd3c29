use serde::{Deserialize, Serialize};

use crate::ast::{LogicalOp, Operator, Value};

/// A single column comparison.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Condition {
    /// Column name, resolved against the reflected table at compile time
    pub column: String,
    /// Comparison operator
    pub op: Operator,
    /// Value to compare against
    pub value: Value,
}

/// A node in the condition tree: either a boolean group or a leaf
/// comparison. Groups own an ordered list of children; the order only
/// matters for reproducible SQL and error messages.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ConditionNode {
    Group {
        logic: LogicalOp,
        conditions: Vec<ConditionNode>,
    },
    Leaf(Condition),
}

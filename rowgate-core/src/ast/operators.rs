use serde::{Deserialize, Serialize};

/// Comparison operators understood by the condition compiler.
///
/// This is the closed set; dialects only change how the names are spelled
/// on the wire. Unknown spellings are rejected when the condition tree is
/// parsed, never inside the compile recursion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Operator {
    /// Equal (=)
    Eq,
    /// Not equal (!=)
    Ne,
    /// Greater than (>)
    Gt,
    /// Less than (<)
    Lt,
    /// Greater than or equal (>=)
    Gte,
    /// Less than or equal (<=)
    Lte,
    /// Substring match; the value is wrapped in `%` wildcards
    Like,
    /// Membership in a set; the value must be an array
    In,
}

/// Logical combinator between sibling conditions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum LogicalOp {
    #[default]
    And,
    Or,
}

impl LogicalOp {
    pub fn keyword(self) -> &'static str {
        match self {
            LogicalOp::And => "AND",
            LogicalOp::Or => "OR",
        }
    }
}

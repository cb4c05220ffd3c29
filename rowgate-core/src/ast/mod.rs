pub mod conditions;
pub mod operators;
pub mod values;

pub use self::conditions::{Condition, ConditionNode};
pub use self::operators::{LogicalOp, Operator};
pub use self::values::Value;

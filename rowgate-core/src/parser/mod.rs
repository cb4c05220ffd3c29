//! JSON condition tree parsing.
//!
//! The read path and the write paths speak two spellings of the same
//! condition language: the operator names and the group discriminator key
//! differ, the recursive shape does not. A [`Dialect`] carries the string
//! tables so the recursion exists exactly once.
//!
//! A child node is a sub-group exactly when it carries the dialect's group
//! key; there is no explicit type discriminator. Unknown operator spellings
//! abort the whole parse.

use serde_json::Value as Json;

use crate::ast::{Condition, ConditionNode, LogicalOp, Operator, Value};
use crate::error::{Error, Result};

/// Operator-name table plus group-discriminator key for one call path.
#[derive(Debug, Clone, Copy)]
pub struct Dialect {
    pub name: &'static str,
    group_key: &'static str,
    operators: &'static [(&'static str, Operator)],
}

/// Read-path dialect: `logic` groups, bare operator spellings.
pub const PLAIN: Dialect = Dialect {
    name: "plain",
    group_key: "logic",
    operators: &[
        ("=", Operator::Eq),
        ("!=", Operator::Ne),
        (">", Operator::Gt),
        ("<", Operator::Lt),
        (">=", Operator::Gte),
        ("<=", Operator::Lte),
        ("like", Operator::Like),
        ("in", Operator::In),
    ],
};

/// Update/delete-path dialect: `$logic` groups, `$`-prefixed spellings.
pub const PREFIXED: Dialect = Dialect {
    name: "prefixed",
    group_key: "$logic",
    operators: &[
        ("=", Operator::Eq),
        ("!=", Operator::Ne),
        ("$gt", Operator::Gt),
        ("$lt", Operator::Lt),
        ("$gte", Operator::Gte),
        ("$lte", Operator::Lte),
        ("$like", Operator::Like),
        ("$in", Operator::In),
    ],
};

impl Dialect {
    /// Parse a JSON condition tree.
    ///
    /// Anything that is not a JSON object yields `Ok(None)`: the caller
    /// treats that as the absence of filtering.
    pub fn parse(&self, input: &Json) -> Result<Option<ConditionNode>> {
        match input {
            Json::Object(map) => Ok(Some(self.parse_group(map)?)),
            _ => Ok(None),
        }
    }

    fn parse_group(&self, map: &serde_json::Map<String, Json>) -> Result<ConditionNode> {
        let logic = match map.get(self.group_key) {
            Some(Json::String(s)) if s.eq_ignore_ascii_case("or") => LogicalOp::Or,
            // TODO: unrecognized logic values silently fall back to AND;
            // product decision pending on rejecting them instead.
            _ => LogicalOp::And,
        };

        let children: &[Json] = match map.get("conditions") {
            Some(Json::Array(items)) => items,
            _ => &[],
        };

        let mut conditions = Vec::with_capacity(children.len());
        for child in children {
            let Json::Object(obj) = child else {
                return Err(Error::validation(format!(
                    "condition entries must be objects, got: {child}"
                )));
            };
            if obj.contains_key(self.group_key) {
                conditions.push(self.parse_group(obj)?);
            } else {
                conditions.push(ConditionNode::Leaf(self.parse_leaf(obj)?));
            }
        }

        Ok(ConditionNode::Group { logic, conditions })
    }

    fn parse_leaf(&self, obj: &serde_json::Map<String, Json>) -> Result<Condition> {
        let column = obj
            .get("column")
            .and_then(Json::as_str)
            .ok_or_else(|| Error::validation("condition is missing a 'column' string"))?;
        let spelled = obj
            .get("operator")
            .and_then(Json::as_str)
            .ok_or_else(|| {
                Error::validation(format!(
                    "condition on column '{column}' is missing an 'operator' string"
                ))
            })?;
        let raw = obj.get("value").ok_or_else(|| {
            Error::validation(format!("condition on column '{column}' is missing a 'value'"))
        })?;
        if raw.is_object() {
            return Err(Error::validation(format!(
                "condition value for column '{column}' must not be an object"
            )));
        }

        Ok(Condition {
            column: column.to_string(),
            op: self.lookup(spelled)?,
            value: Value::from(raw.clone()),
        })
    }

    fn lookup(&self, spelled: &str) -> Result<Operator> {
        self.operators
            .iter()
            .find(|(name, _)| *name == spelled)
            .map(|(_, op)| *op)
            .ok_or_else(|| Error::validation(format!("Unsupported operator: {spelled}")))
    }
}

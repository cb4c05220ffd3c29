//! The condition compiler: recursive translation of a parsed condition
//! tree into a parameterized SQL predicate.
//!
//! Used identically by the read, update, and delete paths; only the parse
//! dialect upstream differs. Any error aborts the whole compile, no partial
//! predicate is ever returned.

use crate::ast::{Condition, ConditionNode, LogicalOp, Operator, Value};
use crate::error::{Error, Result};
use crate::schema::TableSchema;

use super::{ParamContext, Predicate, SqlDialect};

/// Compile a condition tree into a standalone [`Predicate`].
pub fn compile_predicate(
    table: &TableSchema,
    node: &ConditionNode,
    dialect: SqlDialect,
) -> Result<Predicate> {
    let mut params = ParamContext::new(dialect);
    let sql = compile(table, node, &mut params)?;
    Ok(Predicate {
        sql,
        params: params.into_params(),
    })
}

/// Compile a condition tree into a SQL fragment, appending bind parameters
/// to an existing [`ParamContext`] (used when a statement already carries
/// parameters of its own, e.g. UPDATE ... SET).
pub fn compile(
    table: &TableSchema,
    node: &ConditionNode,
    params: &mut ParamContext,
) -> Result<String> {
    match node {
        ConditionNode::Leaf(cond) => compile_leaf(table, cond, params),
        ConditionNode::Group { logic, conditions } => {
            if conditions.is_empty() {
                // Vacuous AND matches every row, vacuous OR matches none.
                return Ok(match logic {
                    LogicalOp::And => "TRUE",
                    LogicalOp::Or => "FALSE",
                }
                .to_string());
            }

            let mut clauses = Vec::with_capacity(conditions.len());
            for child in conditions {
                clauses.push(compile(table, child, params)?);
            }
            if clauses.len() == 1 {
                Ok(clauses.remove(0))
            } else {
                Ok(format!(
                    "({})",
                    clauses.join(&format!(" {} ", logic.keyword()))
                ))
            }
        }
    }
}

fn compile_leaf(table: &TableSchema, cond: &Condition, params: &mut ParamContext) -> Result<String> {
    if !table.has_column(&cond.column) {
        return Err(Error::column_not_found(
            &table.name,
            &cond.column,
            table.column_names(),
        ));
    }
    let col = params.dialect().quote_identifier(&cond.column);

    let sql = match cond.op {
        // NULL never compares equal through a placeholder; spell it out.
        Operator::Eq if cond.value == Value::Null => format!("{col} IS NULL"),
        Operator::Ne if cond.value == Value::Null => format!("{col} IS NOT NULL"),
        Operator::Eq => format!("{col} = {}", bind(&cond.value, params)),
        Operator::Ne => format!("{col} != {}", bind(&cond.value, params)),
        Operator::Gt => format!("{col} > {}", bind(&cond.value, params)),
        Operator::Lt => format!("{col} < {}", bind(&cond.value, params)),
        Operator::Gte => format!("{col} >= {}", bind(&cond.value, params)),
        Operator::Lte => format!("{col} <= {}", bind(&cond.value, params)),
        Operator::Like => {
            // Substring match: the value is wrapped in wildcards. Wildcard
            // characters already inside the value are NOT escaped, so
            // "100%" matches more than the literal string.
            let pattern = format!("%{}%", cond.value.raw_text());
            format!("{col} LIKE {}", params.add_param(Value::String(pattern)))
        }
        Operator::In => {
            let Value::Array(items) = &cond.value else {
                return Err(Error::validation(format!(
                    "operator 'in' on column '{}' requires an array value",
                    cond.column
                )));
            };
            if items.is_empty() {
                // Membership in the empty set is false for every row.
                "FALSE".to_string()
            } else {
                let placeholders: Vec<String> =
                    items.iter().map(|item| bind(item, params)).collect();
                format!("{col} IN ({})", placeholders.join(", "))
            }
        }
    };

    Ok(sql)
}

fn bind(value: &Value, params: &mut ParamContext) -> String {
    match value {
        Value::Null => "NULL".to_string(),
        other => params.add_param(other.clone()),
    }
}

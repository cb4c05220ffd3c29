//! The five table operations.
//!
//! Thin call sites around the condition compiler: each reflects the target
//! table, builds one statement, and runs it inside a scoped transaction.
//! Counts come from the engine; zero matching rows is a zero count, not an
//! error.

use rowgate_core::transpiler::conditions;
use rowgate_core::transpiler::ddl::build_create_table;
use rowgate_core::{Error, ParamContext, Result, TableSpec, Value, parser};
use serde_json::{Map, Value as Json};
use tracing::debug;

use crate::reflect::{reflect_table, validate_table_name};
use crate::rows::row_to_json;
use crate::{Client, map_sqlx_err};

type AnyQuery<'q> = sqlx::query::Query<'q, sqlx::Any, sqlx::any::AnyArguments<'q>>;

fn bind_value(query: AnyQuery<'_>, value: Value) -> AnyQuery<'_> {
    match value {
        Value::Null => query.bind(None::<String>),
        Value::Bool(b) => query.bind(b),
        Value::Int(i) => query.bind(i),
        Value::Float(f) => query.bind(f),
        Value::String(s) => query.bind(s),
        // Arrays are expanded to per-element placeholders upstream; an
        // array reaching here is bound as its JSON text.
        Value::Array(_) => query.bind(value.to_string()),
    }
}

impl Client {
    /// Read matching rows, optionally projected to a column list.
    /// The condition tree uses the plain dialect. Rows come back in
    /// database-native order.
    pub async fn read_rows(
        &self,
        table_name: &str,
        columns: Option<&[String]>,
        condition: Option<&Json>,
    ) -> Result<Vec<Map<String, Json>>> {
        let table = reflect_table(self.pool(), self.dialect(), table_name).await?;

        let selected = match columns {
            None => table.column_names(),
            Some(cols) => {
                for col in cols {
                    if !table.has_column(col) {
                        return Err(Error::column_not_found(
                            &table.name,
                            col,
                            table.column_names(),
                        ));
                    }
                }
                cols.to_vec()
            }
        };

        let projection: Vec<String> = selected
            .iter()
            .map(|c| self.dialect().quote_identifier(c))
            .collect();
        let mut sql = format!(
            "SELECT {} FROM {}",
            projection.join(", "),
            self.dialect().quote_identifier(table_name)
        );

        let mut params = ParamContext::new(self.dialect());
        if let Some(tree) = condition {
            if let Some(node) = parser::PLAIN.parse(tree)? {
                let clause = conditions::compile(&table, &node, &mut params)?;
                sql.push_str(" WHERE ");
                sql.push_str(&clause);
            }
        }

        debug!(table = table_name, %sql, "read");
        let mut query = sqlx::query(&sql);
        for value in params.into_params() {
            query = bind_value(query, value);
        }
        let rows = query.fetch_all(self.pool()).await.map_err(map_sqlx_err)?;
        Ok(rows.iter().map(row_to_json).collect())
    }

    /// Insert rows as one batch in one transaction.
    ///
    /// Each entry is either a column-keyed object or a positional array
    /// zipped against `columns` (or the table's column order when no list
    /// is given).
    pub async fn insert_rows(
        &self,
        table_name: &str,
        values: &[Json],
        columns: Option<&[String]>,
    ) -> Result<()> {
        if values.is_empty() {
            return Err(Error::validation("no values provided for insert"));
        }
        let table = reflect_table(self.pool(), self.dialect(), table_name).await?;

        // Positional rows zip against the explicit list (or every table
        // column); object rows supply their own keys.
        let column_list: Vec<String> = match (columns, values.first()) {
            (Some(cols), _) => cols.to_vec(),
            (None, Some(Json::Object(first))) => first.keys().cloned().collect(),
            (None, _) => table.column_names(),
        };
        for col in &column_list {
            if !table.has_column(col) {
                return Err(Error::column_not_found(&table.name, col, table.column_names()));
            }
        }

        let mut rows: Vec<Vec<Value>> = Vec::with_capacity(values.len());
        for entry in values {
            let row = match entry {
                Json::Object(map) => column_list
                    .iter()
                    .map(|col| map.get(col).cloned().map(Value::from).unwrap_or(Value::Null))
                    .collect(),
                Json::Array(items) => column_list
                    .iter()
                    .enumerate()
                    .map(|(i, _)| items.get(i).cloned().map(Value::from).unwrap_or(Value::Null))
                    .collect(),
                other => {
                    return Err(Error::validation(format!(
                        "insert values must be objects or arrays, got: {other}"
                    )));
                }
            };
            rows.push(row);
        }

        let mut params = ParamContext::new(self.dialect());
        let quoted: Vec<String> = column_list
            .iter()
            .map(|c| self.dialect().quote_identifier(c))
            .collect();
        let tuples: Vec<String> = rows
            .into_iter()
            .map(|row| {
                let placeholders: Vec<String> = row
                    .into_iter()
                    .map(|value| match value {
                        Value::Null => "NULL".to_string(),
                        other => params.add_param(other),
                    })
                    .collect();
                format!("({})", placeholders.join(", "))
            })
            .collect();
        let sql = format!(
            "INSERT INTO {} ({}) VALUES {}",
            self.dialect().quote_identifier(table_name),
            quoted.join(", "),
            tuples.join(", ")
        );

        debug!(table = table_name, rows = values.len(), "insert");
        let mut tx = self.pool().begin().await.map_err(map_sqlx_err)?;
        let mut query = sqlx::query(&sql);
        for value in params.into_params() {
            query = bind_value(query, value);
        }
        query.execute(&mut *tx).await.map_err(map_sqlx_err)?;
        tx.commit().await.map_err(map_sqlx_err)?;
        Ok(())
    }

    /// Update every row matching the condition (prefixed dialect); absent
    /// condition updates the whole table. Returns the number of rows
    /// updated.
    pub async fn update_rows(
        &self,
        table_name: &str,
        updates: &Map<String, Json>,
        condition: Option<&Json>,
    ) -> Result<u64> {
        if updates.is_empty() {
            return Err(Error::validation("no update values provided"));
        }
        let table = reflect_table(self.pool(), self.dialect(), table_name).await?;

        let mut params = ParamContext::new(self.dialect());
        let mut sets = Vec::with_capacity(updates.len());
        for (col, value) in updates {
            if !table.has_column(col) {
                return Err(Error::column_not_found(&table.name, col, table.column_names()));
            }
            let quoted = self.dialect().quote_identifier(col);
            let rhs = match Value::from(value.clone()) {
                Value::Null => "NULL".to_string(),
                other => params.add_param(other),
            };
            sets.push(format!("{quoted} = {rhs}"));
        }

        let mut sql = format!(
            "UPDATE {} SET {}",
            self.dialect().quote_identifier(table_name),
            sets.join(", ")
        );
        if let Some(tree) = condition {
            if let Some(node) = parser::PREFIXED.parse(tree)? {
                let clause = conditions::compile(&table, &node, &mut params)?;
                sql.push_str(" WHERE ");
                sql.push_str(&clause);
            }
        }

        debug!(table = table_name, %sql, "update");
        let mut tx = self.pool().begin().await.map_err(map_sqlx_err)?;
        let mut query = sqlx::query(&sql);
        for value in params.into_params() {
            query = bind_value(query, value);
        }
        let result = query.execute(&mut *tx).await.map_err(map_sqlx_err)?;
        tx.commit().await.map_err(map_sqlx_err)?;
        Ok(result.rows_affected())
    }

    /// Delete every row matching the condition (prefixed dialect). The
    /// condition is mandatory and checked before anything touches the
    /// database; an empty object does not count.
    pub async fn delete_rows(&self, table_name: &str, condition: &Json) -> Result<u64> {
        let node = match condition.as_object() {
            Some(map) if !map.is_empty() => parser::PREFIXED.parse(condition)?,
            _ => None,
        };
        let Some(node) = node else {
            return Err(Error::validation(
                "Condition is required for deletion to avoid accidental data loss.",
            ));
        };

        let table = reflect_table(self.pool(), self.dialect(), table_name).await?;

        let mut params = ParamContext::new(self.dialect());
        let clause = conditions::compile(&table, &node, &mut params)?;
        let sql = format!(
            "DELETE FROM {} WHERE {clause}",
            self.dialect().quote_identifier(table_name)
        );

        debug!(table = table_name, %sql, "delete");
        let mut tx = self.pool().begin().await.map_err(map_sqlx_err)?;
        let mut query = sqlx::query(&sql);
        for value in params.into_params() {
            query = bind_value(query, value);
        }
        let result = query.execute(&mut *tx).await.map_err(map_sqlx_err)?;
        tx.commit().await.map_err(map_sqlx_err)?;
        Ok(result.rows_affected())
    }

    /// Physically create a table from a declarative spec. All DDL
    /// statements (table, indexes, comments) run in one transaction.
    pub async fn create_table(&self, spec: &TableSpec) -> Result<()> {
        validate_table_name(&spec.table_name)?;
        let statements = build_create_table(spec, self.dialect())?;

        debug!(table = %spec.table_name, statements = statements.len(), "create table");
        let mut tx = self.pool().begin().await.map_err(map_sqlx_err)?;
        for statement in &statements {
            sqlx::query(statement)
                .execute(&mut *tx)
                .await
                .map_err(map_sqlx_err)?;
        }
        tx.commit().await.map_err(map_sqlx_err)?;
        Ok(())
    }
}

//! DDL generation for create-table requests.
//!
//! A [`TableSpec`] becomes an ordered statement list: the CREATE TABLE
//! itself, one CREATE INDEX per `index: true` column, and COMMENT ON
//! statements where the engine supports them. The caller executes the list
//! inside a single transaction.

use crate::error::{Error, Result};
use crate::schema::{ColumnSpec, ColumnType, TableSpec};

use super::SqlDialect;

/// Build the ordered DDL statement list for a table spec.
pub fn build_create_table(spec: &TableSpec, dialect: SqlDialect) -> Result<Vec<String>> {
    if spec.columns.is_empty() {
        return Err(Error::validation(format!(
            "table '{}' must declare at least one column",
            spec.table_name
        )));
    }

    let table = dialect.quote_identifier(&spec.table_name);
    let pk: &[String] = spec.primary_key.as_deref().unwrap_or(&[]);

    let mut items = Vec::new();
    let mut inline_pk = false;
    for col in &spec.columns {
        let (def, consumed_pk) = column_def(col, pk, dialect)?;
        inline_pk |= consumed_pk;
        items.push(def);
    }

    if !pk.is_empty() && !inline_pk {
        let cols: Vec<String> = pk.iter().map(|c| dialect.quote_identifier(c)).collect();
        items.push(format!("PRIMARY KEY ({})", cols.join(", ")));
    }

    // Foreign keys whose source column is not declared are skipped, the
    // same way the reference implementation only attached matching ones.
    for fk in spec.foreign_keys.as_deref().unwrap_or(&[]) {
        if !spec.columns.iter().any(|c| c.name == fk.column) {
            continue;
        }
        let mut clause = format!(
            "FOREIGN KEY ({}) REFERENCES {} ({})",
            dialect.quote_identifier(&fk.column),
            dialect.quote_identifier(&fk.referenced_table),
            dialect.quote_identifier(&fk.referenced_column),
        );
        if let Some(action) = &fk.ondelete {
            clause.push_str(&format!(" ON DELETE {}", action.to_uppercase()));
        }
        if let Some(action) = &fk.onupdate {
            clause.push_str(&format!(" ON UPDATE {}", action.to_uppercase()));
        }
        items.push(clause);
    }

    let mut statements = vec![format!("CREATE TABLE {table} ({})", items.join(", "))];

    for col in &spec.columns {
        if col.index {
            statements.push(format!(
                "CREATE INDEX {} ON {table} ({})",
                dialect.quote_identifier(&format!("ix_{}_{}", spec.table_name, col.name)),
                dialect.quote_identifier(&col.name),
            ));
        }
    }

    if dialect == SqlDialect::Postgres {
        for col in &spec.columns {
            if let Some(comment) = col.comment.as_deref().filter(|c| !c.is_empty()) {
                statements.push(format!(
                    "COMMENT ON COLUMN {table}.{} IS {}",
                    dialect.quote_identifier(&col.name),
                    quote_string(comment),
                ));
            }
        }
    }

    Ok(statements)
}

/// Render one column definition. Returns the definition plus whether it
/// consumed the table's primary key inline (sqlite AUTOINCREMENT form).
fn column_def(col: &ColumnSpec, pk: &[String], dialect: SqlDialect) -> Result<(String, bool)> {
    let ty = col.logical_type()?;
    let name = dialect.quote_identifier(&col.name);
    let single_pk = pk.len() == 1 && pk[0] == col.name;

    if col.autoincrement && ty == ColumnType::Integer && single_pk {
        // sqlite only honors AUTOINCREMENT in this exact inline form.
        let def = match dialect {
            SqlDialect::Postgres => {
                format!("{name} INTEGER GENERATED BY DEFAULT AS IDENTITY PRIMARY KEY")
            }
            SqlDialect::Sqlite => format!("{name} INTEGER PRIMARY KEY AUTOINCREMENT"),
        };
        return Ok((def, true));
    }

    let mut parts = vec![format!("{name} {}", type_sql(ty, dialect))];
    if !col.nullable {
        parts.push("NOT NULL".to_string());
    }
    if col.unique {
        parts.push("UNIQUE".to_string());
    }
    if let Some(server_default) = &col.server_default {
        if server_default.eq_ignore_ascii_case("CURRENT_TIMESTAMP") {
            parts.push("DEFAULT CURRENT_TIMESTAMP".to_string());
        } else {
            parts.push(format!("DEFAULT {}", quote_string(server_default)));
        }
    } else if let Some(default) = &col.default {
        parts.push(format!("DEFAULT {}", literal(default)?));
    }

    Ok((parts.join(" "), false))
}

fn type_sql(ty: ColumnType, dialect: SqlDialect) -> String {
    match ty {
        ColumnType::Integer => "INTEGER".to_string(),
        ColumnType::String(len) => format!("VARCHAR({len})"),
        ColumnType::Float => match dialect {
            SqlDialect::Postgres => "DOUBLE PRECISION".to_string(),
            SqlDialect::Sqlite => "REAL".to_string(),
        },
        ColumnType::Boolean => "BOOLEAN".to_string(),
        ColumnType::Text => "TEXT".to_string(),
        ColumnType::DateTime => "TIMESTAMP".to_string(),
        ColumnType::Date => "DATE".to_string(),
        ColumnType::Decimal(precision, scale) => format!("NUMERIC({precision}, {scale})"),
    }
}

/// SQL literal for a JSON default value.
fn literal(value: &serde_json::Value) -> Result<String> {
    match value {
        serde_json::Value::Null => Ok("NULL".to_string()),
        serde_json::Value::Bool(b) => Ok(if *b { "TRUE" } else { "FALSE" }.to_string()),
        serde_json::Value::Number(n) => Ok(n.to_string()),
        serde_json::Value::String(s) => Ok(quote_string(s)),
        other => Err(Error::validation(format!(
            "unsupported default value: {other}"
        ))),
    }
}

fn quote_string(s: &str) -> String {
    format!("'{}'", s.replace('\'', "''"))
}

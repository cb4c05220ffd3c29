//! Live table reflection.
//!
//! The column set is always derived from the running database, never from
//! static declarations, so tables created out-of-band are immediately
//! usable.

use rowgate_core::schema::{ReflectedColumn, TableSchema};
use rowgate_core::{Error, Result, SqlDialect};
use sqlx::{AnyPool, Row};

use crate::map_sqlx_err;

/// Table names are spliced into reflection SQL (PRAGMA cannot take bind
/// parameters), so they are restricted to plain identifiers.
pub(crate) fn validate_table_name(name: &str) -> Result<()> {
    let mut chars = name.chars();
    let valid = matches!(chars.next(), Some(c) if c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_');
    if valid {
        Ok(())
    } else {
        Err(Error::validation(format!("invalid table name: '{name}'")))
    }
}

/// Reflect a table's column set from the live schema.
pub async fn reflect_table(
    pool: &AnyPool,
    dialect: SqlDialect,
    table: &str,
) -> Result<TableSchema> {
    validate_table_name(table)?;

    let columns: Vec<ReflectedColumn> = match dialect {
        SqlDialect::Postgres => {
            let rows = sqlx::query(
                "SELECT column_name, data_type FROM information_schema.columns \
                 WHERE table_schema = 'public' AND table_name = $1 \
                 ORDER BY ordinal_position",
            )
            .bind(table)
            .fetch_all(pool)
            .await
            .map_err(map_sqlx_err)?;

            rows.iter()
                .map(|row| {
                    Ok(ReflectedColumn {
                        name: row.try_get(0).map_err(map_sqlx_err)?,
                        type_name: row.try_get(1).map_err(map_sqlx_err)?,
                    })
                })
                .collect::<Result<_>>()?
        }
        SqlDialect::Sqlite => {
            let sql = format!("PRAGMA table_info({})", dialect.quote_identifier(table));
            let rows = sqlx::query(&sql)
                .fetch_all(pool)
                .await
                .map_err(map_sqlx_err)?;

            rows.iter()
                .map(|row| {
                    Ok(ReflectedColumn {
                        name: row.try_get("name").map_err(map_sqlx_err)?,
                        type_name: row.try_get("type").map_err(map_sqlx_err)?,
                    })
                })
                .collect::<Result<_>>()?
        }
    };

    if columns.is_empty() {
        return Err(Error::validation(format!("Table '{table}' not found")));
    }

    Ok(TableSchema {
        name: table.to_string(),
        columns,
    })
}

//! sqlx execution layer for rowgate.
//!
//! A [`Client`] owns an `Any` pool (postgres or sqlite, chosen by URL
//! scheme) and exposes the five table operations: read, insert, update,
//! delete, create. Each call reflects the target table, compiles any
//! condition tree through rowgate-core, and runs exactly one statement
//! inside a scoped transaction.
//!
//! # Example
//! ```no_run
//! use rowgate_sqlx::Client;
//!
//! async fn example() -> rowgate_core::Result<()> {
//!     let client = Client::connect("sqlite::memory:").await?;
//!     let rows = client.read_rows("users", None, None).await?;
//!     println!("{} rows", rows.len());
//!     Ok(())
//! }
//! ```

pub mod crud;
pub mod reflect;
pub mod rows;

use rowgate_core::{Error, Result, SqlDialect};
use sqlx::AnyPool;
use sqlx::any::{AnyPoolOptions, install_default_drivers};

/// A connected database client with the SQL dialect inferred from the URL.
#[derive(Debug, Clone)]
pub struct Client {
    pool: AnyPool,
    dialect: SqlDialect,
}

impl Client {
    /// Connect to the database behind `url` (`postgres://` or `sqlite:`).
    pub async fn connect(url: &str) -> Result<Self> {
        install_default_drivers();
        let dialect = dialect_from_url(url)?;

        // An in-memory sqlite database exists per connection; more than one
        // pooled connection would each see an empty schema.
        let max_connections = if url.contains(":memory:") { 1 } else { 5 };

        let pool = AnyPoolOptions::new()
            .max_connections(max_connections)
            .connect(url)
            .await
            .map_err(map_sqlx_err)?;

        Ok(Self { pool, dialect })
    }

    pub fn dialect(&self) -> SqlDialect {
        self.dialect
    }

    pub fn pool(&self) -> &AnyPool {
        &self.pool
    }
}

fn dialect_from_url(url: &str) -> Result<SqlDialect> {
    match url.split(':').next().unwrap_or_default() {
        "postgres" | "postgresql" => Ok(SqlDialect::Postgres),
        "sqlite" => Ok(SqlDialect::Sqlite),
        scheme => Err(Error::validation(format!(
            "unsupported database URL scheme: '{scheme}'"
        ))),
    }
}

/// Map a sqlx error onto the rowgate taxonomy: constraint violations are
/// integrity errors, everything else engine-level is a database error.
pub(crate) fn map_sqlx_err(err: sqlx::Error) -> Error {
    match &err {
        sqlx::Error::Database(db)
            if db.is_unique_violation()
                || db.is_foreign_key_violation()
                || db.is_check_violation() =>
        {
            Error::Integrity(db.message().to_string())
        }
        sqlx::Error::Database(db) => Error::Database(db.message().to_string()),
        _ => Error::Database(err.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dialect_from_url() {
        assert_eq!(
            dialect_from_url("postgres://localhost/db").unwrap(),
            SqlDialect::Postgres
        );
        assert_eq!(
            dialect_from_url("postgresql://localhost/db").unwrap(),
            SqlDialect::Postgres
        );
        assert_eq!(
            dialect_from_url("sqlite::memory:").unwrap(),
            SqlDialect::Sqlite
        );
        assert!(dialect_from_url("mysql://localhost/db").is_err());
    }
}

//! Error taxonomy shared across the rowgate crates.
//!
//! Every fault a request can hit maps onto one of these variants; the
//! gateway turns the variant into an HTTP status without inspecting
//! messages.

use thiserror::Error;

/// Convenience result type for rowgate operations.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// Malformed request input: unknown operator, bad condition shape,
    /// unsupported column type, missing required condition.
    #[error("{0}")]
    Validation(String),

    /// A condition or projection named a column the reflected table does
    /// not have.
    #[error(
        "column '{column}' not found in table '{table}'. Available columns: [{}]{}",
        .available.join(", "),
        hint(.column, .available)
    )]
    ColumnNotFound {
        table: String,
        column: String,
        available: Vec<String>,
    },

    /// Constraint violation reported by the database engine.
    #[error("integrity error: {0}")]
    Integrity(String),

    /// Any other engine-level failure. The transaction has already been
    /// rolled back when this is returned.
    #[error("database error: {0}")]
    Database(String),

    /// Anything unanticipated. The caller gets a generic message; the
    /// detail is logged server-side only.
    #[error("unexpected error: {0}")]
    Unexpected(String),
}

impl Error {
    pub fn validation(message: impl Into<String>) -> Self {
        Error::Validation(message.into())
    }

    pub fn column_not_found(
        table: impl Into<String>,
        column: impl Into<String>,
        available: Vec<String>,
    ) -> Self {
        Error::ColumnNotFound {
            table: table.into(),
            column: column.into(),
            available,
        }
    }
}

/// Nearest-name suggestion appended to column lookup failures.
fn hint(column: &str, available: &[String]) -> String {
    available
        .iter()
        .map(|candidate| (candidate, strsim::jaro_winkler(column, candidate)))
        .filter(|(_, score)| *score > 0.8)
        .max_by(|(_, a), (_, b)| a.total_cmp(b))
        .map(|(candidate, _)| format!(" (did you mean '{candidate}'?)"))
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_column_not_found_lists_available_columns() {
        let err = Error::column_not_found(
            "users",
            "emial",
            vec!["id".into(), "email".into(), "name".into()],
        );
        let msg = err.to_string();
        assert!(msg.contains("column 'emial' not found in table 'users'"));
        assert!(msg.contains("id, email, name"));
        assert!(msg.contains("did you mean 'email'?"));
    }

    #[test]
    fn test_no_hint_when_nothing_is_close() {
        let err = Error::column_not_found("users", "zzz", vec!["id".into(), "email".into()]);
        assert!(!err.to_string().contains("did you mean"));
    }
}

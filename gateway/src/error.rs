//! HTTP-facing error mapping.
//!
//! The core taxonomy maps onto status codes here and nowhere else:
//! validation and lookup failures are the client's fault, integrity
//! violations get their own status, and anything unanticipated is a
//! generic 500 whose detail is logged but never echoed back.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use rowgate_core::Error;
use serde_json::json;

#[derive(Debug, thiserror::Error)]
#[error(transparent)]
pub struct ApiError(#[from] pub Error);

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self.0 {
            Error::Validation(_) | Error::ColumnNotFound { .. } | Error::Database(_) => {
                (StatusCode::BAD_REQUEST, self.0.to_string())
            }
            Error::Integrity(_) => (StatusCode::CONFLICT, self.0.to_string()),
            Error::Unexpected(detail) => {
                tracing::error!(%detail, "unexpected failure");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "An unexpected error occurred".to_string(),
                )
            }
        };
        (status, Json(json!({ "error": message }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        let cases = [
            (Error::validation("bad operator"), StatusCode::BAD_REQUEST),
            (
                Error::column_not_found("t", "c", vec![]),
                StatusCode::BAD_REQUEST,
            ),
            (
                Error::Database("engine exploded".into()),
                StatusCode::BAD_REQUEST,
            ),
            (Error::Integrity("dup".into()), StatusCode::CONFLICT),
            (
                Error::Unexpected("secret detail".into()),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];
        for (err, expected) in cases {
            let response = ApiError(err).into_response();
            assert_eq!(response.status(), expected);
        }
    }
}

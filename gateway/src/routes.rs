//! The REST surface: five table operations plus a health probe.
//!
//! Handlers are deliberately thin; every real decision lives in
//! rowgate-core (condition parsing and compilation) or rowgate-sqlx
//! (statement execution). Request-level timing comes from the tracing
//! layer, not from per-function instrumentation.

use std::sync::Arc;
use std::time::Duration;

use axum::extract::{Path, Query, State};
use axum::routing::{delete, get, post, put};
use axum::{Json, Router};
use serde::Deserialize;
use serde_json::{Map, Value as JsonValue, json};
use tower_http::cors::CorsLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use rowgate_core::{Error, TableSpec};
use rowgate_sqlx::Client;

use crate::error::ApiError;

type AppState = Arc<Client>;

pub fn router(client: Client, request_timeout: Duration) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/read_table/", get(read_table))
        .route("/insert/{table_name}", post(insert_records))
        .route("/update/{table_name}", put(update_records))
        .route("/delete/{table_name}", delete(delete_records))
        .route("/create_table", post(create_table))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .layer(TimeoutLayer::new(request_timeout))
        .with_state(Arc::new(client))
}

async fn health() -> Json<JsonValue> {
    Json(json!({ "status": "ok" }))
}

#[derive(Debug, Deserialize)]
struct ReadParams {
    table_name: String,
    /// Comma-separated column names; absent means all columns.
    columns: Option<String>,
    /// JSON-encoded condition tree, plain dialect.
    condition: Option<String>,
}

async fn read_table(
    State(client): State<AppState>,
    Query(params): Query<ReadParams>,
) -> Result<Json<JsonValue>, ApiError> {
    // An empty query value means the parameter was not supplied.
    let columns: Option<Vec<String>> = params
        .columns
        .filter(|list| !list.is_empty())
        .map(|list| list.split(',').map(str::to_string).collect());

    let condition: Option<JsonValue> = match params.condition.as_deref() {
        Some("") | None => None,
        Some(raw) => Some(
            serde_json::from_str(raw)
                .map_err(|e| Error::validation(format!("invalid condition JSON: {e}")))?,
        ),
    };

    let data = client
        .read_rows(&params.table_name, columns.as_deref(), condition.as_ref())
        .await?;
    Ok(Json(json!({ "data": data })))
}

#[derive(Debug, Deserialize)]
struct InsertRequest {
    #[serde(default)]
    columns: Option<Vec<String>>,
    values: Vec<JsonValue>,
}

async fn insert_records(
    State(client): State<AppState>,
    Path(table_name): Path<String>,
    Json(request): Json<InsertRequest>,
) -> Result<Json<JsonValue>, ApiError> {
    client
        .insert_rows(&table_name, &request.values, request.columns.as_deref())
        .await?;
    Ok(Json(json!({ "message": "Records inserted successfully" })))
}

#[derive(Debug, Deserialize)]
struct UpdateRequest {
    updates: Map<String, JsonValue>,
    /// Condition tree, prefixed dialect. Absent means every row.
    #[serde(default)]
    condition: Option<JsonValue>,
}

async fn update_records(
    State(client): State<AppState>,
    Path(table_name): Path<String>,
    Json(request): Json<UpdateRequest>,
) -> Result<Json<JsonValue>, ApiError> {
    let rows_updated = client
        .update_rows(&table_name, &request.updates, request.condition.as_ref())
        .await?;
    Ok(Json(json!({ "rows_updated": rows_updated })))
}

#[derive(Debug, Deserialize)]
struct DeleteRequest {
    /// Condition tree, prefixed dialect. Required.
    condition: JsonValue,
}

async fn delete_records(
    State(client): State<AppState>,
    Path(table_name): Path<String>,
    Json(request): Json<DeleteRequest>,
) -> Result<Json<JsonValue>, ApiError> {
    let deleted_rows = client.delete_rows(&table_name, &request.condition).await?;
    Ok(Json(json!({
        "message": "Records deleted successfully",
        "deleted_rows": deleted_rows
    })))
}

async fn create_table(
    State(client): State<AppState>,
    Json(spec): Json<TableSpec>,
) -> Result<Json<JsonValue>, ApiError> {
    client.create_table(&spec).await?;
    Ok(Json(json!({
        "message": format!("Table '{}' created successfully", spec.table_name)
    })))
}

//! End-to-end tests for the REST surface over an in-memory SQLite
//! database, driven through the router with `tower::ServiceExt`.

use std::time::Duration;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use http_body_util::BodyExt;
use rowgate_sqlx::Client;
use serde_json::{Value as JsonValue, json};
use tower::ServiceExt;

use rowgate_gateway::routes::router;

async fn test_app() -> Router {
    let client = Client::connect("sqlite::memory:").await.unwrap();

    sqlx::query(
        "CREATE TABLE users (
            id INTEGER PRIMARY KEY,
            name TEXT NOT NULL,
            email TEXT UNIQUE,
            age INTEGER
        )",
    )
    .execute(client.pool())
    .await
    .unwrap();
    for (name, email, age) in [
        ("Anna", "anna@example.com", 34),
        ("Joanna", "joanna@example.com", 28),
        ("Bob", "bob@example.com", 45),
    ] {
        sqlx::query("INSERT INTO users (name, email, age) VALUES (?, ?, ?)")
            .bind(name)
            .bind(email)
            .bind(age)
            .execute(client.pool())
            .await
            .unwrap();
    }

    router(client, Duration::from_secs(5))
}

async fn send(app: Router, request: Request<Body>) -> (StatusCode, JsonValue) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body = serde_json::from_slice(&bytes).unwrap_or(JsonValue::Null);
    (status, body)
}

fn json_request(method: &str, uri: &str, body: JsonValue) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn read_uri(table: &str, columns: Option<&str>, condition: Option<&JsonValue>) -> String {
    let mut pairs = vec![("table_name".to_string(), table.to_string())];
    if let Some(cols) = columns {
        pairs.push(("columns".to_string(), cols.to_string()));
    }
    if let Some(cond) = condition {
        pairs.push(("condition".to_string(), cond.to_string()));
    }
    format!("/read_table/?{}", serde_urlencoded::to_string(pairs).unwrap())
}

#[tokio::test]
async fn test_health() {
    let app = test_app().await;
    let request = Request::builder().uri("/health").body(Body::empty()).unwrap();
    let (status, body) = send(app, request).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn test_read_table_returns_all_rows() {
    let app = test_app().await;
    let request = Request::builder()
        .uri(read_uri("users", None, None))
        .body(Body::empty())
        .unwrap();
    let (status, body) = send(app, request).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"].as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn test_read_table_with_columns_and_condition() {
    let app = test_app().await;
    let condition = json!({
        "logic": "and",
        "conditions": [{"column": "age", "operator": ">=", "value": 30}]
    });
    let request = Request::builder()
        .uri(read_uri("users", Some("name,age"), Some(&condition)))
        .body(Body::empty())
        .unwrap();
    let (status, body) = send(app, request).await;
    assert_eq!(status, StatusCode::OK);
    let data = body["data"].as_array().unwrap();
    assert_eq!(data.len(), 2);
    assert_eq!(data[0], json!({"name": "Anna", "age": 34}));
}

#[tokio::test]
async fn test_read_table_with_empty_query_values_reads_everything() {
    let app = test_app().await;
    let uri = format!(
        "/read_table/?{}",
        serde_urlencoded::to_string([
            ("table_name", "users"),
            ("columns", ""),
            ("condition", ""),
        ])
        .unwrap()
    );
    let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
    let (status, body) = send(app, request).await;
    assert_eq!(status, StatusCode::OK);
    let data = body["data"].as_array().unwrap();
    assert_eq!(data.len(), 3);
    assert!(data[0].as_object().unwrap().contains_key("email"));
}

#[tokio::test]
async fn test_read_table_with_invalid_condition_json() {
    let app = test_app().await;
    let uri = format!(
        "/read_table/?{}",
        serde_urlencoded::to_string([("table_name", "users"), ("condition", "{not json")])
            .unwrap()
    );
    let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
    let (status, body) = send(app, request).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("invalid condition JSON"));
}

#[tokio::test]
async fn test_read_table_with_unknown_column_names_alternatives() {
    let app = test_app().await;
    let condition = json!({"conditions": [{"column": "emial", "operator": "=", "value": "x"}]});
    let request = Request::builder()
        .uri(read_uri("users", None, Some(&condition)))
        .body(Body::empty())
        .unwrap();
    let (status, body) = send(app, request).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let message = body["error"].as_str().unwrap();
    assert!(message.contains("column 'emial' not found"));
    assert!(message.contains("email"));
}

#[tokio::test]
async fn test_insert_positional_values() {
    let app = test_app().await;
    let request = json_request(
        "POST",
        "/insert/users",
        json!({"columns": ["name", "email"], "values": [["Aditya", "a@x.com"]]}),
    );
    let (status, body) = send(app.clone(), request).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Records inserted successfully");

    let request = Request::builder()
        .uri(read_uri("users", None, None))
        .body(Body::empty())
        .unwrap();
    let (_, body) = send(app, request).await;
    assert_eq!(body["data"].as_array().unwrap().len(), 4);
}

#[tokio::test]
async fn test_insert_duplicate_email_is_an_integrity_fault() {
    let app = test_app().await;
    let request = json_request(
        "POST",
        "/insert/users",
        json!({"values": [{"name": "Dup", "email": "anna@example.com"}]}),
    );
    let (status, body) = send(app, request).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert!(body["error"].as_str().unwrap().contains("integrity error"));
}

#[tokio::test]
async fn test_update_with_prefixed_condition() {
    let app = test_app().await;
    let request = json_request(
        "PUT",
        "/update/users",
        json!({
            "updates": {"age": 50},
            "condition": {"conditions": [{"column": "name", "operator": "$like", "value": "ann"}]}
        }),
    );
    let (status, body) = send(app, request).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["rows_updated"], 2);
}

#[tokio::test]
async fn test_update_without_condition_touches_every_row() {
    let app = test_app().await;
    let request = json_request("PUT", "/update/users", json!({"updates": {"age": 1}}));
    let (status, body) = send(app, request).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["rows_updated"], 3);
}

#[tokio::test]
async fn test_update_with_plain_spelling_is_rejected() {
    let app = test_app().await;
    let request = json_request(
        "PUT",
        "/update/users",
        json!({
            "updates": {"age": 50},
            "condition": {"conditions": [{"column": "age", "operator": ">=", "value": 30}]}
        }),
    );
    let (status, body) = send(app, request).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Unsupported operator: >=");
}

#[tokio::test]
async fn test_delete_with_condition() {
    let app = test_app().await;
    let request = json_request(
        "DELETE",
        "/delete/users",
        json!({"condition": {"conditions": [{"column": "age", "operator": "$lt", "value": 30}]}}),
    );
    let (status, body) = send(app, request).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Records deleted successfully");
    assert_eq!(body["deleted_rows"], 1);
}

#[tokio::test]
async fn test_delete_with_empty_condition_is_rejected() {
    let app = test_app().await;
    let request = json_request("DELETE", "/delete/users", json!({"condition": {}}));
    let (status, body) = send(app.clone(), request).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("Condition is required"));

    // Nothing was deleted.
    let request = Request::builder()
        .uri(read_uri("users", None, None))
        .body(Body::empty())
        .unwrap();
    let (_, body) = send(app, request).await;
    assert_eq!(body["data"].as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn test_create_table_roundtrip() {
    let app = test_app().await;
    let request = json_request(
        "POST",
        "/create_table",
        json!({
            "table_name": "books",
            "columns": [
                {"name": "id", "type": "Integer", "autoincrement": true},
                {"name": "title", "type": "String", "length": 120, "nullable": false},
                {"name": "price", "type": "Decimal", "precision": 8, "scale": 2}
            ],
            "primary_key": ["id"]
        }),
    );
    let (status, body) = send(app.clone(), request).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Table 'books' created successfully");

    let request = json_request(
        "POST",
        "/insert/books",
        json!({"columns": ["title", "price"], "values": [["Dune", 9.99]]}),
    );
    let (status, _) = send(app.clone(), request).await;
    assert_eq!(status, StatusCode::OK);

    let request = Request::builder()
        .uri(read_uri("books", None, None))
        .body(Body::empty())
        .unwrap();
    let (_, body) = send(app, request).await;
    assert_eq!(body["data"][0]["title"], "Dune");
}

#[tokio::test]
async fn test_create_table_with_unknown_type() {
    let app = test_app().await;
    let request = json_request(
        "POST",
        "/create_table",
        json!({
            "table_name": "bad",
            "columns": [{"name": "payload", "type": "Jsonb"}]
        }),
    );
    let (status, body) = send(app, request).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("Unsupported column type"));
}

//! Dynamic row decoding.
//!
//! Result rows are decoded into JSON maps without any static row type:
//! each column is tried as integer, float, boolean, then text. NULLs pass
//! through as JSON null; anything undecodable (e.g. a blob) becomes null
//! rather than failing the whole read.

use serde_json::{Map, Value as Json};
use sqlx::any::AnyRow;
use sqlx::{Column, Row, ValueRef};

/// Decode a row into a column-name → value map, preserving column order.
pub fn row_to_json(row: &AnyRow) -> Map<String, Json> {
    let mut out = Map::new();
    for (idx, col) in row.columns().iter().enumerate() {
        out.insert(col.name().to_string(), decode_column(row, idx));
    }
    out
}

fn decode_column(row: &AnyRow, idx: usize) -> Json {
    if let Ok(raw) = row.try_get_raw(idx) {
        if raw.is_null() {
            return Json::Null;
        }
    }
    if let Ok(v) = row.try_get::<i64, _>(idx) {
        return Json::from(v);
    }
    if let Ok(v) = row.try_get::<f64, _>(idx) {
        return serde_json::Number::from_f64(v)
            .map(Json::Number)
            .unwrap_or(Json::Null);
    }
    if let Ok(v) = row.try_get::<bool, _>(idx) {
        return Json::from(v);
    }
    if let Ok(v) = row.try_get::<String, _>(idx) {
        return Json::from(v);
    }
    Json::Null
}

//! Table schema model: reflected column sets and create-table
//! specifications.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Column set reflected from a live table. This is what the condition
/// compiler resolves leaf columns against.
#[derive(Debug, Clone, PartialEq)]
pub struct TableSchema {
    pub name: String,
    pub columns: Vec<ReflectedColumn>,
}

/// One reflected column: name plus the engine's reported type name.
#[derive(Debug, Clone, PartialEq)]
pub struct ReflectedColumn {
    pub name: String,
    pub type_name: String,
}

impl TableSchema {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            columns: Vec::new(),
        }
    }

    /// Builder: append a column.
    pub fn column(mut self, name: impl Into<String>, type_name: impl Into<String>) -> Self {
        self.columns.push(ReflectedColumn {
            name: name.into(),
            type_name: type_name.into(),
        });
        self
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.columns.iter().any(|c| c.name == name)
    }

    pub fn column_names(&self) -> Vec<String> {
        self.columns.iter().map(|c| c.name.clone()).collect()
    }
}

/// Logical column types accepted by create-table requests.
///
/// The closed enumeration; request type strings resolve into it up front,
/// unknown names fail validation before any DDL is generated.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ColumnType {
    Integer,
    String(u32),
    Float,
    Boolean,
    Text,
    DateTime,
    Date,
    Decimal(u32, u32),
}

/// Type names recognized in create-table requests, in the spelling clients
/// send.
pub const SUPPORTED_TYPE_NAMES: &[&str] = &[
    "Integer", "String", "Float", "Boolean", "Text", "DateTime", "Date", "Decimal",
];

/// One column of a create-table request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ColumnSpec {
    pub name: String,
    #[serde(rename = "type")]
    pub type_name: String,
    /// Only used when `type` is String
    #[serde(default)]
    pub length: Option<u32>,
    /// Only used when `type` is Decimal
    #[serde(default)]
    pub precision: Option<u32>,
    #[serde(default)]
    pub scale: Option<u32>,
    #[serde(default = "default_true")]
    pub nullable: bool,
    #[serde(default)]
    pub autoincrement: bool,
    #[serde(default)]
    pub unique: bool,
    #[serde(default)]
    pub index: bool,
    #[serde(default)]
    pub default: Option<serde_json::Value>,
    /// Update-time default. Accepted for compatibility; neither target
    /// engine has DDL for it, so it emits nothing.
    #[serde(default)]
    pub onupdate: Option<String>,
    #[serde(default)]
    pub server_default: Option<String>,
    #[serde(default)]
    pub comment: Option<String>,
}

fn default_true() -> bool {
    true
}

impl ColumnSpec {
    /// Minimal spec for the given name and type string; used by tests and
    /// programmatic callers.
    pub fn new(name: impl Into<String>, type_name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            type_name: type_name.into(),
            length: None,
            precision: None,
            scale: None,
            nullable: true,
            autoincrement: false,
            unique: false,
            index: false,
            default: None,
            onupdate: None,
            server_default: None,
            comment: None,
        }
    }

    /// Resolve the declared type string into the closed enumeration.
    pub fn logical_type(&self) -> Result<ColumnType> {
        match self.type_name.as_str() {
            "Integer" => Ok(ColumnType::Integer),
            "String" => Ok(ColumnType::String(self.length.unwrap_or(255))),
            "Float" => Ok(ColumnType::Float),
            "Boolean" => Ok(ColumnType::Boolean),
            "Text" => Ok(ColumnType::Text),
            "DateTime" => Ok(ColumnType::DateTime),
            "Date" => Ok(ColumnType::Date),
            "Decimal" => Ok(ColumnType::Decimal(
                self.precision.unwrap_or(10),
                self.scale.unwrap_or(2),
            )),
            other => Err(Error::validation(format!(
                "Unsupported column type: {other}. Supported types: [{}]",
                SUPPORTED_TYPE_NAMES.join(", ")
            ))),
        }
    }
}

/// Foreign key constraint in a create-table request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForeignKeySpec {
    pub column: String,
    pub referenced_table: String,
    pub referenced_column: String,
    #[serde(default)]
    pub ondelete: Option<String>,
    #[serde(default)]
    pub onupdate: Option<String>,
}

/// A complete create-table request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TableSpec {
    pub table_name: String,
    pub columns: Vec<ColumnSpec>,
    #[serde(default)]
    pub primary_key: Option<Vec<String>>,
    #[serde(default)]
    pub foreign_keys: Option<Vec<ForeignKeySpec>>,
}

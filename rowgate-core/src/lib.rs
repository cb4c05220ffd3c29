//! Core library for rowgate: a generic CRUD-over-HTTP backend.
//!
//! The one piece of real logic here is the condition compiler: a JSON
//! condition tree is parsed against a [`parser::Dialect`] (the read path and
//! the write paths spell their operators differently) and compiled against a
//! reflected [`schema::TableSchema`] into a parameterized SQL predicate.
//!
//! # Example
//! ```
//! use rowgate_core::parser::PLAIN;
//! use rowgate_core::schema::TableSchema;
//! use rowgate_core::transpiler::{compile_predicate, SqlDialect};
//!
//! let table = TableSchema::new("users").column("age", "INTEGER");
//! let tree = serde_json::json!({
//!     "conditions": [{"column": "age", "operator": ">=", "value": 21}]
//! });
//!
//! let node = PLAIN.parse(&tree).unwrap().unwrap();
//! let predicate = compile_predicate(&table, &node, SqlDialect::Postgres).unwrap();
//! assert_eq!(predicate.sql, r#""age" >= $1"#);
//! ```

pub mod ast;
pub mod error;
pub mod parser;
pub mod schema;
pub mod transpiler;

pub use self::ast::{Condition, ConditionNode, LogicalOp, Operator, Value};
pub use self::error::{Error, Result};
pub use self::parser::{Dialect, PLAIN, PREFIXED};
pub use self::schema::{ColumnSpec, ColumnType, ForeignKeySpec, TableSchema, TableSpec};
pub use self::transpiler::{ParamContext, Predicate, SqlDialect, compile_predicate};

//! SQL generation: predicates from condition trees, DDL from table specs.

pub mod conditions;
pub mod ddl;

pub use self::conditions::{compile, compile_predicate};
pub use self::ddl::build_create_table;

use crate::ast::Value;

/// Target SQL engine, selected from the database URL scheme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SqlDialect {
    #[default]
    Postgres,
    Sqlite,
}

impl SqlDialect {
    /// Positional placeholder for the given 1-based index.
    pub fn placeholder(self, index: usize) -> String {
        match self {
            SqlDialect::Postgres => format!("${index}"),
            SqlDialect::Sqlite => "?".to_string(),
        }
    }

    pub fn quote_identifier(self, ident: &str) -> String {
        format!("\"{}\"", ident.replace('"', "\"\""))
    }
}

/// A compiled WHERE clause with its bind parameters in order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Predicate {
    pub sql: String,
    pub params: Vec<Value>,
}

/// Collects bind parameters while SQL is being built.
///
/// Shared between the condition compiler and the statement builders so a
/// statement's SET/VALUES parameters and its WHERE parameters share one
/// numbering sequence.
#[derive(Debug)]
pub struct ParamContext {
    index: usize,
    params: Vec<Value>,
    dialect: SqlDialect,
}

impl ParamContext {
    pub fn new(dialect: SqlDialect) -> Self {
        Self {
            index: 0,
            params: Vec::new(),
            dialect,
        }
    }

    pub fn dialect(&self) -> SqlDialect {
        self.dialect
    }

    /// Add a value and return the placeholder for it.
    pub fn add_param(&mut self, value: Value) -> String {
        self.index += 1;
        self.params.push(value);
        self.dialect.placeholder(self.index)
    }

    pub fn into_params(self) -> Vec<Value> {
        self.params
    }
}

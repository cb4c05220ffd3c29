//! rowgate gateway: a generic CRUD REST surface over relational tables.
//!
//! The library target exists so integration tests can build the router
//! against an in-memory database; the binary in `main.rs` is the real
//! entrypoint.

pub mod config;
pub mod error;
pub mod routes;

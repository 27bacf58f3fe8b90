//! Database layer - connection provider, schema and repositories
//!
//! # Design Principles
//!
//! - One pool (max 10 connections) shared by every repository
//! - Bound parameters only; no SQL built from request text
//! - Multi-table writes run in a transaction
//! - Affected-row count of zero on an update/delete by id is `NotFound`

pub mod error;
pub mod memory;
pub mod pool;
pub mod repos;
pub mod schema;

pub use error::DbError;
pub use memory::MemoryStore;
pub use pool::ConnectionProvider;
pub use repos::*;

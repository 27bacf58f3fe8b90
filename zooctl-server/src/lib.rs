//! zooctl-server: zoo catalog HTTP backend
//!
//! Birds, habitats and attractions stored in PostgreSQL, served over
//! axum. Repositories sit behind traits so the handlers can also run
//! against the in-memory store.

pub mod db;
pub mod http;
pub mod models;

pub use db::{ConnectionProvider, DbError, MemoryStore};
pub use http::{build_router, run_server, ApiError, AppState, ServerConfig, ServerError};

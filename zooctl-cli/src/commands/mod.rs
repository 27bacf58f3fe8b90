//! Command implementations for the zooctl CLI

use std::path::Path;

use anyhow::{Context, Result};
use zooctl_core::ZooConfig;
use zooctl_server::ConnectionProvider;

pub mod check;
pub mod config;
pub mod schema;
pub mod serve;

pub use check::run_check;
pub use config::run_config;
pub use schema::run_init_schema;
pub use serve::run_serve;

/// Resolve configuration from the optional `--config` path and environment.
pub fn load_config(path: Option<&Path>) -> Result<ZooConfig> {
    ZooConfig::load(path).context("Failed to load configuration")
}

/// Build a connection provider and confirm the database answers.
pub async fn connect(config: &ZooConfig) -> Result<ConnectionProvider> {
    let provider =
        ConnectionProvider::new(&config.database).context("Invalid database configuration")?;

    if let Err(err) = provider.check_connection().await {
        tracing::error!(
            host = %config.database.host,
            port = config.database.port,
            error = %err,
            "database connection failed"
        );
        return Err(anyhow::Error::from(err).context("Database is unreachable"));
    }
    Ok(provider)
}

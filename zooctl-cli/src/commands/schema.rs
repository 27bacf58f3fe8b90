use std::path::Path;

use anyhow::{Context, Result};
use zooctl_server::db::schema;

/// Create the catalog tables if they are missing.
pub async fn run_init_schema(config_path: Option<&Path>) -> Result<()> {
    let config = super::load_config(config_path)?;
    let provider = super::connect(&config).await?;

    schema::ensure(provider.pool())
        .await
        .context("Failed to create schema")?;

    println!("schema ready");
    Ok(())
}

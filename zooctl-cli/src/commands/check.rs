//! Database connectivity check

use std::path::Path;

use anyhow::Result;

pub async fn run_check(config_path: Option<&Path>) -> Result<()> {
    let config = super::load_config(config_path)?;
    super::connect(&config).await?;

    println!(
        "database reachable: {}:{}/{}",
        config.database.host, config.database.port, config.database.name
    );
    Ok(())
}

//! Print the resolved configuration

use std::path::Path;

use anyhow::Result;

/// Secrets are masked before printing.
pub fn run_config(config_path: Option<&Path>) -> Result<()> {
    let config = super::load_config(config_path)?;
    print!("{}", config.to_redacted_toml());
    Ok(())
}

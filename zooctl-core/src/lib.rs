pub mod config;
pub mod error;

pub use config::{DatabaseConfig, ServerSettings, ZooConfig, DEFAULT_CONFIG_FILE};
pub use error::{ConfigError, Result};

//! HTTP server command
//!
//! Checks the database connection before binding; a failed check exits non-zero
//! without ever opening the listener.

use std::net::SocketAddr;
use std::path::Path;

use anyhow::{Context, Result};
use clap::Parser;

use zooctl_server::db::schema;
use zooctl_server::http::{run_server, AppState, ServerConfig};

/// Arguments for the serve command
#[derive(Parser, Debug)]
pub struct ServeArgs {
    /// Address to bind to (overrides ZOOCTL_BIND, default 127.0.0.1:3000)
    #[arg(long, short = 'b')]
    pub bind: Option<SocketAddr>,

    /// Allow permissive CORS (all origins) - use with caution
    #[arg(long)]
    pub cors_permissive: bool,

    /// Database URL (overrides DB_* settings)
    #[arg(long)]
    pub database_url: Option<String>,

    /// Create missing tables before serving
    #[arg(long, conflicts_with = "in_memory")]
    pub init_schema: bool,

    /// Serve from a throwaway in-memory store instead of PostgreSQL
    #[arg(long)]
    pub in_memory: bool,
}

pub async fn run_serve(args: ServeArgs, config_path: Option<&Path>) -> Result<()> {
    let mut config = super::load_config(config_path)?;
    if let Some(bind) = args.bind {
        config.server.bind = bind;
    }
    if args.cors_permissive {
        config.server.cors_permissive = true;
    }
    if let Some(url) = args.database_url {
        config.database.url = Some(url);
    }

    let state = if args.in_memory {
        tracing::warn!("serving from in-memory store; data is lost on exit");
        AppState::in_memory()
    } else {
        let provider = super::connect(&config).await?;
        if args.init_schema {
            schema::ensure(provider.pool())
                .await
                .context("Failed to create schema")?;
        }
        AppState::postgres(provider.pool().clone())
    };

    tracing::info!("Starting zooctl server on {}", config.server.bind);
    run_server(state, ServerConfig::from(&config.server))
        .await
        .context("Server error")?;

    Ok(())
}

//! Database connection provider
//!
//! Owns the sqlx PgPool used by every repository, plus a one-shot
//! connectivity check run before the HTTP listener starts.

use std::str::FromStr;
use std::time::Duration;

use sqlx::postgres::{PgConnectOptions, PgPoolOptions};
use sqlx::{ConnectOptions, Connection, PgPool};
use zooctl_core::DatabaseConfig;

use super::DbError;

/// Maximum connections held by the pool.
pub const MAX_CONNECTIONS: u32 = 10;

/// Idle connections are closed after this long.
pub const IDLE_TIMEOUT: Duration = Duration::from_secs(10);

/// Owns the pool and the options used to open the startup connection.
///
/// Pool settings are fixed at construction.
#[derive(Clone)]
pub struct ConnectionProvider {
    options: PgConnectOptions,
    pool: PgPool,
}

impl ConnectionProvider {
    /// Build a provider from configuration.
    ///
    /// The pool connects lazily; nothing touches the network until the
    /// first query or `check_connection()`.
    ///
    /// # Errors
    ///
    /// Returns an error if `config.url` is set but cannot be parsed.
    pub fn new(config: &DatabaseConfig) -> Result<Self, DbError> {
        let options = connect_options(config)?;
        let pool = PgPoolOptions::new()
            .max_connections(MAX_CONNECTIONS)
            .idle_timeout(IDLE_TIMEOUT)
            .connect_lazy_with(options.clone());

        Ok(Self { options, pool })
    }

    /// Open a dedicated connection outside the pool and close it again.
    pub async fn check_connection(&self) -> Result<(), DbError> {
        let conn = self
            .options
            .connect()
            .await
            .map_err(DbError::Connection)?;
        conn.close().await.map_err(DbError::Connection)?;

        tracing::info!(
            host = self.options.get_host(),
            port = self.options.get_port(),
            "database connected"
        );
        Ok(())
    }

    /// Pool handle for issuing queries.
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

/// Translate configuration into sqlx connect options.
///
/// A full URL wins over the individual host/port/user/password/name parts.
pub fn connect_options(config: &DatabaseConfig) -> Result<PgConnectOptions, DbError> {
    if let Some(url) = config.url.as_deref() {
        return PgConnectOptions::from_str(url).map_err(DbError::Connection);
    }

    let mut options = PgConnectOptions::new()
        .host(&config.host)
        .port(config.port)
        .username(&config.user)
        .database(&config.name);
    if !config.password.is_empty() {
        options = options.password(&config.password);
    }
    Ok(options)
}

#[cfg(test)]
mod tests {
    use super::*;

    // Integration tests require a real database
    // Run with: DATABASE_URL=postgres://... cargo test -p zooctl-server -- --ignored

    #[test]
    fn options_from_parts() {
        let config = DatabaseConfig {
            host: "db.internal".into(),
            port: 6543,
            user: "keeper".into(),
            password: "s3cret".into(),
            name: "zoo".into(),
            url: None,
        };
        let options = connect_options(&config).unwrap();
        assert_eq!(options.get_host(), "db.internal");
        assert_eq!(options.get_port(), 6543);
        assert_eq!(options.get_username(), "keeper");
        assert_eq!(options.get_database(), Some("zoo"));
    }

    #[test]
    fn url_takes_precedence() {
        let config = DatabaseConfig {
            url: Some("postgres://other:pw@pg.example:5433/catalog".into()),
            ..DatabaseConfig::default()
        };
        let options = connect_options(&config).unwrap();
        assert_eq!(options.get_host(), "pg.example");
        assert_eq!(options.get_port(), 5433);
        assert_eq!(options.get_database(), Some("catalog"));
    }

    #[test]
    fn malformed_url_is_rejected() {
        let config = DatabaseConfig {
            url: Some("not a url".into()),
            ..DatabaseConfig::default()
        };
        assert!(connect_options(&config).is_err());
    }

    #[tokio::test]
    async fn pool_uses_fixed_limits() {
        let provider = ConnectionProvider::new(&DatabaseConfig::default()).unwrap();
        let options = provider.pool().options();
        assert_eq!(options.get_max_connections(), MAX_CONNECTIONS);
        assert_eq!(options.get_idle_timeout(), Some(IDLE_TIMEOUT));
    }

    #[tokio::test]
    async fn connection_check_fails_without_server() {
        // Port 1 is reserved; nothing listens there.
        let config = DatabaseConfig {
            host: "127.0.0.1".into(),
            port: 1,
            ..DatabaseConfig::default()
        };
        let provider = ConnectionProvider::new(&config).unwrap();
        let err = provider.check_connection().await.unwrap_err();
        assert!(matches!(err, DbError::Connection(_)));
    }

    #[tokio::test]
    #[ignore = "requires database"]
    async fn connection_check_succeeds_against_live_database() {
        let url = std::env::var("DATABASE_URL").expect("DATABASE_URL required");
        let config = DatabaseConfig {
            url: Some(url),
            ..DatabaseConfig::default()
        };
        let provider = ConnectionProvider::new(&config).unwrap();
        provider.check_connection().await.expect("connection check failed");

        let result: (i32,) = sqlx::query_as("SELECT 1")
            .fetch_one(provider.pool())
            .await
            .expect("query failed");
        assert_eq!(result.0, 1);
    }
}

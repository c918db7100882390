//! Connection provider
//!
//! Opens a fresh PostgreSQL connection per request. There is no pool: every
//! caller owns the connection it receives and hands it back through
//! [`ConnectionProvider::release`].

use crate::errors::StoreError;
use config::DatabaseConfig;
use sqlx::postgres::{PgConnectOptions, PgConnection};
use sqlx::Connection;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

/// Opens store connections from an immutable configuration
#[derive(Debug, Clone)]
pub struct ConnectionProvider {
    config: Arc<DatabaseConfig>,
}

impl ConnectionProvider {
    /// Validate the configuration and build a provider around it
    pub fn new(config: DatabaseConfig) -> Result<Self, StoreError> {
        config
            .validate()
            .map_err(|e| StoreError::ConnectionFailure(e.to_string()))?;
        Ok(Self {
            config: Arc::new(config),
        })
    }

    pub fn config(&self) -> &DatabaseConfig {
        &self.config
    }

    /// An explicit URL is parsed as given; otherwise the options are set
    /// field by field so credentials never pass through URL syntax.
    fn connect_options(&self) -> Result<PgConnectOptions, StoreError> {
        let config = &self.config;
        match &config.url {
            Some(url) => PgConnectOptions::from_str(url).map_err(|e| {
                StoreError::ConnectionFailure(format!("invalid connection string: {}", e))
            }),
            None => Ok(PgConnectOptions::new()
                .host(&config.host)
                .port(config.port)
                .database(&config.database)
                .username(&config.username)
                .password(&config.password)),
        }
    }

    /// Open a new connection, bounded by the configured connect timeout
    pub async fn connect(&self) -> Result<PgConnection, StoreError> {
        let options = self.connect_options()?;
        let timeout = Duration::from_secs(self.config.connection_timeout_seconds);

        crate::trace_log!("Opening connection to {}", self.config.host);
        match tokio::time::timeout(timeout, PgConnection::connect_with(&options)).await {
            Ok(Ok(conn)) => Ok(conn),
            Ok(Err(e)) => Err(StoreError::ConnectionFailure(e.to_string())),
            Err(_) => Err(StoreError::ConnectionFailure(format!(
                "timed out after {}s",
                self.config.connection_timeout_seconds
            ))),
        }
    }

    /// Close a connection this caller opened. Close failures are logged only.
    pub async fn release(&self, conn: PgConnection) {
        if let Err(e) = conn.close().await {
            tracing::warn!("Failed to close store connection: {}", e);
        }
    }
}

//! # Configuration Management for the Person Registry
//!
//! This crate provides the database configuration consumed by the connection
//! provider. Values come from a TOML file, a `.env` file, the process
//! environment, or built-in defaults, in that order of preference.
//!
//! ## Quick Start
//!
//! ### Programmatic Configuration
//! ```rust
//! use config::DatabaseConfig;
//!
//! let db_config = DatabaseConfig::new(
//!     "localhost".to_string(), 5432, "registry".to_string(),
//!     "postgres".to_string(), "password".to_string(),
//!     30,
//! );
//! assert!(db_config.validate().is_ok());
//! ```
//!
//! ### TOML File Configuration
//! ```toml
//! [database]
//! host = "localhost"
//! port = 5432
//! database = "registry"
//! username = "postgres"
//! password = "password"
//! connection_timeout_seconds = 30
//! ```
//!
//! Load configuration:
//! ```rust,no_run
//! use config::DatabaseConfig;
//!
//! // registry.toml, REGISTRY_CONFIG, or DB_* environment variables
//! let config = DatabaseConfig::load()?;
//!
//! // Or load from custom path
//! let config = DatabaseConfig::from_file("config/production.toml")?;
//! # Ok::<(), config::ConfigError>(())
//! ```

use percent_encoding::{utf8_percent_encode, NON_ALPHANUMERIC};
use serde::{Deserialize, Serialize};
use std::{env, path::Path};
use thiserror::Error;

const DEFAULT_CONFIG_PATH: &str = "./registry.toml";
const CONFIG_PATH_VAR: &str = "REGISTRY_CONFIG";

const DEFAULT_HOST: &str = "localhost";
const DEFAULT_PORT: u16 = 5432;
const DEFAULT_DATABASE: &str = "registry";
const DEFAULT_USERNAME: &str = "postgres";
const DEFAULT_CONNECTION_TIMEOUT_SECONDS: u64 = 30;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Dotenvy error: {0}")]
    Dotenvy(#[from] dotenvy::Error),
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Shape of the TOML configuration file
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ConfigFile {
    database: DatabaseConfig,
}

/// Database configuration
///
/// When `url` is set it is used verbatim as the connection string and is
/// expected to carry its own credentials; the discrete fields are used otherwise.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    pub url: Option<String>,
    pub host: String,
    pub port: u16,
    pub database: String,
    pub username: String,
    pub password: String,
    pub connection_timeout_seconds: u64,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: None,
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            database: DEFAULT_DATABASE.to_string(),
            username: DEFAULT_USERNAME.to_string(),
            password: String::new(),
            connection_timeout_seconds: DEFAULT_CONNECTION_TIMEOUT_SECONDS,
        }
    }
}

impl DatabaseConfig {
    /// Create a new database configuration
    pub fn new(
        host: String,
        port: u16,
        database: String,
        username: String,
        password: String,
        connection_timeout_seconds: u64,
    ) -> Self {
        Self {
            url: None,
            host,
            port,
            database,
            username,
            password,
            connection_timeout_seconds,
        }
    }

    /// Configuration that connects through a complete connection URL
    pub fn from_url(url: impl Into<String>) -> Self {
        Self {
            url: Some(url.into()),
            ..Self::default()
        }
    }

    /// Load configuration from the TOML file named in `.env`/environment,
    /// the default config file, or `DB_*` environment variables
    pub fn load() -> Result<Self, ConfigError> {
        match dotenvy::dotenv() {
            Ok(_) => {}
            // No .env file is fine; fall through to the process environment
            Err(e) if e.not_found() => {}
            Err(e) => return Err(e.into()),
        }

        let config = if let Ok(config_path) = env::var(CONFIG_PATH_VAR) {
            Self::from_file(&config_path)?
        } else if Path::new(DEFAULT_CONFIG_PATH).exists() {
            Self::from_file(DEFAULT_CONFIG_PATH)?
        } else {
            Self::from_env_with(|key| env::var(key).ok())?
        };

        config.validate()?;
        Ok(config)
    }

    /// Load configuration from the `[database]` table of a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Parse configuration from TOML text
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let file: ConfigFile = toml::from_str(content)?;
        file.database.validate()?;
        Ok(file.database)
    }

    /// Build configuration from `DB_*` variables resolved through `lookup`.
    /// Unset or empty variables keep their defaults, except the password,
    /// where an empty value is accepted as given.
    pub fn from_env_with<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|value| !value.is_empty());
        let mut config = Self::default();

        config.url = non_empty("DB_URL");
        if let Some(host) = non_empty("DB_HOST") {
            config.host = host;
        }
        if let Some(port) = non_empty("DB_PORT") {
            config.port = port
                .parse()
                .map_err(|_| ConfigError::Invalid(format!("DB_PORT is not a valid port: {}", port)))?;
        }
        if let Some(database) = non_empty("DB_NAME") {
            config.database = database;
        }
        if let Some(username) = non_empty("DB_USER") {
            config.username = username;
        }
        if let Some(password) = lookup("DB_USER_PASSWORD") {
            config.password = password;
        }
        if let Some(timeout) = non_empty("DB_CONNECT_TIMEOUT") {
            config.connection_timeout_seconds = timeout.parse().map_err(|_| {
                ConfigError::Invalid(format!("DB_CONNECT_TIMEOUT is not a number: {}", timeout))
            })?;
        }

        config.validate()?;
        Ok(config)
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(url) = &self.url {
            if !(url.starts_with("postgres://") || url.starts_with("postgresql://")) {
                return Err(ConfigError::Invalid(
                    "Database URL must start with postgres:// or postgresql://".to_string(),
                ));
            }
        } else {
            if self.host.is_empty() {
                return Err(ConfigError::Invalid(
                    "Database host cannot be empty".to_string(),
                ));
            }
            if self.port == 0 {
                return Err(ConfigError::Invalid(
                    "Database port cannot be zero".to_string(),
                ));
            }
            if self.database.is_empty() {
                return Err(ConfigError::Invalid(
                    "Database name cannot be empty".to_string(),
                ));
            }
            if self.username.is_empty() {
                return Err(ConfigError::Invalid(
                    "Database username cannot be empty".to_string(),
                ));
            }
        }
        if self.connection_timeout_seconds == 0 {
            return Err(ConfigError::Invalid(
                "Database connection_timeout_seconds must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }

    /// Build connection string. Credentials and database name are
    /// percent-encoded so reserved URL characters stay inside their component.
    pub fn connection_string(&self) -> String {
        match &self.url {
            Some(url) => url.clone(),
            None => format!(
                "postgresql://{}:{}@{}:{}/{}",
                utf8_percent_encode(&self.username, NON_ALPHANUMERIC),
                utf8_percent_encode(&self.password, NON_ALPHANUMERIC),
                self.host,
                self.port,
                utf8_percent_encode(&self.database, NON_ALPHANUMERIC)
            ),
        }
    }
}

//! Configuration management for the hxtodo server.
//!
//! Loads configuration from environment variables with sensible defaults.
//! A `.env` file in the working directory is honoured by the binary.
//!
//! | Variable | Default |
//! |---|---|
//! | `HOST` | `0.0.0.0` |
//! | `PORT` | `8080` |
//! | `ASSETS_DIR` | `public` |
//! | `SHUTDOWN_TIMEOUT` | `30` (seconds) |
//! | `STORE_BACKEND` | `memory` (`memory` or `postgres`) |
//! | `DATABASE_URL` | required when `STORE_BACKEND=postgres` |
//! | `DATABASE_MAX_CONNECTIONS` | `10` |
//! | `DATABASE_CONNECT_TIMEOUT` | `30` (seconds) |

use std::env;
use std::path::PathBuf;
use std::str::FromStr;
use thiserror::Error;

/// Reasons the environment cannot be turned into a [`Config`].
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    /// A variable is set but does not parse.
    #[error("Invalid value for {name}: {value:?}")]
    InvalidValue {
        /// Variable name.
        name: &'static str,
        /// Raw value found.
        value: String,
    },

    /// `STORE_BACKEND` names something other than `memory` or `postgres`.
    #[error("Unknown store backend {0:?} (expected \"memory\" or \"postgres\")")]
    UnknownBackend(String),

    /// A variable the chosen setup depends on is missing.
    #[error("{0} must be set")]
    Missing(&'static str),
}

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// HTTP server configuration
    pub server: ServerConfig,
    /// Where todos are persisted
    pub store: StoreBackend,
}

/// Server configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// Host to bind to
    pub host: String,
    /// Port to bind to
    pub port: u16,
    /// Directory served under `/assets`
    pub assets_dir: PathBuf,
    /// Graceful shutdown timeout in seconds
    pub shutdown_timeout: u64,
}

impl ServerConfig {
    /// `host:port` for binding the listener.
    #[must_use]
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Record store selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreBackend {
    /// Process-local store; data is lost on restart.
    Memory,
    /// `PostgreSQL` via a connection pool.
    Postgres(DatabaseConfig),
}

impl StoreBackend {
    /// Short name for logs.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Memory => "memory",
            Self::Postgres(_) => "postgres",
        }
    }
}

/// `PostgreSQL` configuration
#[derive(Clone, PartialEq, Eq)]
pub struct DatabaseConfig {
    /// `PostgreSQL` connection URL
    pub url: String,
    /// Maximum number of connections in the pool
    pub max_connections: u32,
    /// Connection timeout in seconds
    pub connect_timeout: u64,
}

// The URL usually embeds a password.
impl std::fmt::Debug for DatabaseConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DatabaseConfig")
            .field("url", &"<redacted>")
            .field("max_connections", &self.max_connections)
            .field("connect_timeout", &self.connect_timeout)
            .finish()
    }
}

impl Config {
    /// Load configuration from the process environment.
    ///
    /// # Errors
    ///
    /// See [`Config::from_lookup`].
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Load configuration from any variable source.
    ///
    /// Unset and empty variables take their defaults.
    ///
    /// # Errors
    ///
    /// - `InvalidValue`: a numeric variable does not parse
    /// - `UnknownBackend`: `STORE_BACKEND` is not `memory` or `postgres`
    /// - `Missing`: `DATABASE_URL` is unset while `STORE_BACKEND=postgres`
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let server = ServerConfig {
            host: var("HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            port: parse_or(&var, "PORT", 8080)?,
            assets_dir: var("ASSETS_DIR").map_or_else(|| PathBuf::from("public"), PathBuf::from),
            shutdown_timeout: parse_or(&var, "SHUTDOWN_TIMEOUT", 30)?,
        };

        let backend = var("STORE_BACKEND").unwrap_or_else(|| "memory".to_string());
        let store = match backend.trim().to_ascii_lowercase().as_str() {
            "memory" => StoreBackend::Memory,
            "postgres" => StoreBackend::Postgres(DatabaseConfig {
                url: var("DATABASE_URL").ok_or(ConfigError::Missing("DATABASE_URL"))?,
                max_connections: parse_or(&var, "DATABASE_MAX_CONNECTIONS", 10)?,
                connect_timeout: parse_or(&var, "DATABASE_CONNECT_TIMEOUT", 30)?,
            }),
            _ => return Err(ConfigError::UnknownBackend(backend)),
        };

        Ok(Self { server, store })
    }
}

fn parse_or<T, F>(var: &F, name: &'static str, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    F: Fn(&str) -> Option<String>,
{
    match var(name) {
        None => Ok(default),
        Some(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidValue { name, value }),
    }
}

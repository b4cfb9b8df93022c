use std::fmt;
use std::net::SocketAddr;
use std::str::FromStr;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid BIND_ADDR: {source}")]
    InvalidBindAddr { source: std::net::AddrParseError },

    #[error("invalid STORE_BACKEND {value:?}, expected \"redis\" or \"memory\"")]
    InvalidStoreBackend { value: String },
}

/// Which `TaskStore` implementation the server runs against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreBackend {
    Redis,
    Memory,
}

impl FromStr for StoreBackend {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "redis" => Ok(StoreBackend::Redis),
            "memory" => Ok(StoreBackend::Memory),
            _ => Err(ConfigError::InvalidStoreBackend {
                value: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for StoreBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreBackend::Redis => f.write_str("redis"),
            StoreBackend::Memory => f.write_str("memory"),
        }
    }
}

/// Server configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Bind address (default: 0.0.0.0:3000)
    pub bind_addr: SocketAddr,

    /// Redis connection URL (default: redis://127.0.0.1:6379)
    pub redis_url: String,

    /// Store backend to run against (default: redis)
    pub store_backend: StoreBackend,

    /// Reject blank or whitespace-only titles on create and patch
    /// (default: true)
    pub reject_blank_titles: bool,
}

impl Config {
    /// Load configuration from the environment, reading `.env` first when
    /// present.
    pub fn from_env() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();

        let bind_addr = std::env::var("BIND_ADDR")
            .unwrap_or_else(|_| "0.0.0.0:3000".to_string())
            .parse()
            .map_err(|source| ConfigError::InvalidBindAddr { source })?;

        let store_backend = match std::env::var("STORE_BACKEND") {
            Ok(value) => value.parse()?,
            Err(_) => StoreBackend::Redis,
        };

        Ok(Self {
            bind_addr,
            redis_url: std::env::var("REDIS_URL")
                .unwrap_or_else(|_| "redis://127.0.0.1:6379".to_string()),
            store_backend,
            reject_blank_titles: std::env::var("REJECT_BLANK_TITLES")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(true),
        })
    }
}

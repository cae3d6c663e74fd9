//! Server configuration module.
//!
//! Configuration is loaded from environment variables with fallback to
//! development defaults. A `.env` file is honored via dotenvy.

use serde::{Deserialize, Serialize};
use std::env;

/// Server configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Socket address the HTTP server binds to
    pub bind_addr: String,

    /// SQLite database file path
    pub database_path: String,

    /// Session inactivity expiry in seconds
    pub session_expiry_secs: i64,
}

impl ServerConfig {
    /// Load configuration from environment variables.
    pub fn load() -> Result<Self, ConfigError> {
        let config = ServerConfig {
            bind_addr: env::var("BIND_ADDR").unwrap_or_else(|_| "127.0.0.1:8080".to_string()),

            database_path: env::var("DATABASE_PATH")
                .unwrap_or_else(|_| "./data/stockroom.db".to_string()),

            session_expiry_secs: env::var("SESSION_EXPIRY_SECS")
                .unwrap_or_else(|_| "86400".to_string()) // 24 hours
                .parse()
                .map_err(|_| ConfigError::InvalidValue("SESSION_EXPIRY_SECS".to_string()))?,
        };

        if config.bind_addr.parse::<std::net::SocketAddr>().is_err() {
            return Err(ConfigError::InvalidValue("BIND_ADDR".to_string()));
        }

        Ok(config)
    }
}

/// Configuration error types.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}")]
    InvalidValue(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        // With no overriding env vars set the defaults must parse
        let config = ServerConfig {
            bind_addr: "127.0.0.1:8080".to_string(),
            database_path: "./data/stockroom.db".to_string(),
            session_expiry_secs: 86400,
        };
        assert!(config.bind_addr.parse::<std::net::SocketAddr>().is_ok());
    }
}

//! Configuration management

use serde::{Deserialize, Serialize};

/// Default bearer token lifetime: 30 days.
pub const DEFAULT_TOKEN_TTL_SECS: u64 = 30 * 24 * 60 * 60;

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub auth: AuthConfig,
}

/// HTTP server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

/// Database configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub path: String,
    pub pool_size: u32,
}

/// Token issuing configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    #[serde(skip_serializing)]
    pub token_secret: String,
    pub token_ttl_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                host: "0.0.0.0".to_string(),
                port: 3000,
            },
            database: DatabaseConfig {
                path: "tutorium.db".to_string(),
                pool_size: 8,
            },
            auth: AuthConfig {
                token_secret: String::new(),
                token_ttl_secs: DEFAULT_TOKEN_TTL_SECS,
            },
        }
    }
}

//! Configuration loader
//!
//! Loads application configuration from environment variables or files.
//!
//! ## Loading Strategy
//! 1. First, attempts to load from environment variables
//! 2. If incomplete, falls back to loading from file
//! 3. Probes multiple paths for config files
//! 4. Supports JSON and TOML formats
//!
//! ## Environment Variables
//! - `TUTORIUM_DB_PATH`: Database file path (required)
//! - `TUTORIUM_TOKEN_SECRET`: Secret used to sign bearer tokens (required)
//! - `TUTORIUM_DB_POOL_SIZE`: Connection pool size
//! - `TUTORIUM_TOKEN_TTL_SECS`: Token lifetime in seconds
//! - `TUTORIUM_HOST`: Listen address
//! - `TUTORIUM_PORT`: Listen port
//!
//! ## File Locations
//! The loader probes the following paths (in order):
//! 1. `./config.json` or `./config.toml` (current working directory)
//! 2. `./tutorium.json` or `./tutorium.toml` (current working directory)
//! 3. `../config.json` or `../config.toml` (parent directory)
//! 4. `../../config.json` or `../../config.toml` (grandparent directory)
//! 5. Relative to executable location

use std::path::{Path, PathBuf};
use std::str::FromStr;

use tutorium_domain::{
    AuthConfig, Config, DatabaseConfig, Result, ServerConfig, TutoriumError,
};

/// Load configuration with automatic fallback strategy
///
/// First attempts to load from environment variables. If any required
/// variables are missing, falls back to loading from a config file.
///
/// # Errors
/// Returns `TutoriumError::Config` if:
/// - Configuration cannot be loaded from either source
/// - File format is invalid
/// - Required fields are missing
pub fn load() -> Result<Config> {
    // Try loading from environment first
    match load_from_env() {
        Ok(config) => {
            tracing::info!("Configuration loaded from environment variables");
            Ok(config)
        }
        Err(e) => {
            tracing::debug!(error = ?e, "Failed to load from environment, trying file");
            // Fall back to file
            load_from_file(None)
        }
    }
}

/// Load configuration from environment variables
///
/// The database path and token secret must be present. All other settings
/// fall back to their defaults when unset.
///
/// # Errors
/// Returns `TutoriumError::Config` if required variables are missing
/// or have invalid values.
pub fn load_from_env() -> Result<Config> {
    let defaults = Config::default();

    let db_path = env_var("TUTORIUM_DB_PATH")?;
    let token_secret = env_var("TUTORIUM_TOKEN_SECRET")?;

    let pool_size =
        env_parse("TUTORIUM_DB_POOL_SIZE")?.unwrap_or(defaults.database.pool_size);
    let token_ttl_secs =
        env_parse("TUTORIUM_TOKEN_TTL_SECS")?.unwrap_or(defaults.auth.token_ttl_secs);
    let host = std::env::var("TUTORIUM_HOST").unwrap_or(defaults.server.host);
    let port = env_parse("TUTORIUM_PORT")?.unwrap_or(defaults.server.port);

    let config = Config {
        server: ServerConfig { host, port },
        database: DatabaseConfig { path: db_path, pool_size },
        auth: AuthConfig { token_secret, token_ttl_secs },
    };

    validate(&config)?;
    Ok(config)
}

/// Load configuration from a file
///
/// If `path` is `None`, probes multiple locations for config files.
/// Supports both JSON and TOML formats (detected by file extension).
///
/// # Arguments
/// * `path` - Optional path to config file. If `None`, uses
///   [`probe_config_paths`].
///
/// # Errors
/// Returns `TutoriumError::Config` if:
/// - File not found (when path is specified)
/// - No config file found (when path is `None`)
/// - File format is invalid
/// - Required fields are missing
pub fn load_from_file(path: Option<PathBuf>) -> Result<Config> {
    let config_path = match path {
        Some(p) => {
            if !p.exists() {
                return Err(TutoriumError::Config(format!(
                    "Config file not found: {}",
                    p.display()
                )));
            }
            p
        }
        None => probe_config_paths().ok_or_else(|| {
            TutoriumError::Config(
                "No config file found in any of the standard locations".to_string(),
            )
        })?,
    };

    tracing::info!(path = %config_path.display(), "Loading configuration from file");

    let contents = std::fs::read_to_string(&config_path)
        .map_err(|e| TutoriumError::Config(format!("Failed to read config file: {}", e)))?;

    let config = parse_config(&contents, &config_path)?;
    validate(&config)?;
    Ok(config)
}

/// Parse configuration from string content
///
/// Format is detected by file extension (`.json` or `.toml`).
///
/// # Errors
/// Returns `TutoriumError::Config` if format is invalid or parsing fails.
fn parse_config(contents: &str, path: &Path) -> Result<Config> {
    let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("json");

    match extension {
        "toml" => toml::from_str(contents)
            .map_err(|e| TutoriumError::Config(format!("Invalid TOML format: {}", e))),
        "json" => serde_json::from_str(contents)
            .map_err(|e| TutoriumError::Config(format!("Invalid JSON format: {}", e))),
        _ => Err(TutoriumError::Config(format!("Unsupported config format: {}", extension))),
    }
}

/// Probe multiple paths for configuration files
///
/// Searches the current working directory, up to two parent directories,
/// and the executable's directory.
///
/// # Returns
/// The first config file found, or `None` if no file exists.
pub fn probe_config_paths() -> Option<PathBuf> {
    let mut candidates = Vec::new();

    // Try current working directory
    if let Ok(cwd) = std::env::current_dir() {
        candidates.extend(vec![
            cwd.join("config.json"),
            cwd.join("config.toml"),
            cwd.join("tutorium.json"),
            cwd.join("tutorium.toml"),
            cwd.join("../config.json"),
            cwd.join("../config.toml"),
            cwd.join("../../config.json"),
            cwd.join("../../config.toml"),
        ]);
    }

    // Try relative to executable
    if let Ok(exe_path) = std::env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            candidates.extend(vec![
                exe_dir.join("config.json"),
                exe_dir.join("config.toml"),
                exe_dir.join("tutorium.json"),
                exe_dir.join("tutorium.toml"),
                exe_dir.join("../config.json"),
                exe_dir.join("../config.toml"),
                exe_dir.join("../../config.json"),
                exe_dir.join("../../config.toml"),
            ]);
        }
    }

    // Return first existing candidate
    candidates.into_iter().find(|path| path.exists())
}

/// Reject configurations the server cannot safely start with
fn validate(config: &Config) -> Result<()> {
    if config.database.path.trim().is_empty() {
        return Err(TutoriumError::Config("Database path must not be empty".to_string()));
    }
    if config.auth.token_secret.trim().is_empty() {
        return Err(TutoriumError::Config("Token secret must not be empty".to_string()));
    }
    Ok(())
}

/// Get required environment variable
///
/// # Errors
/// Returns `TutoriumError::Config` if the variable is not set.
fn env_var(key: &str) -> Result<String> {
    std::env::var(key).map_err(|_| {
        TutoriumError::Config(format!("Missing required environment variable: {}", key))
    })
}

/// Parse an optional environment variable
///
/// Returns `Ok(None)` when the variable is unset and an error when it is
/// set to a value that does not parse.
fn env_parse<T: FromStr>(key: &str) -> Result<Option<T>>
where
    T::Err: std::fmt::Display,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .parse::<T>()
            .map(Some)
            .map_err(|e| TutoriumError::Config(format!("Invalid value for {}: {}", key, e))),
        Err(_) => Ok(None),
    }
}

//! Configuration loading
//!
//! Loads the service configuration from environment variables, with a
//! config-file fallback for local development.

pub mod loader;

pub use loader::{load, load_from_env, load_from_file, probe_config_paths};

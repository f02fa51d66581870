//! Error types used throughout the application

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Main error type for Tutorium
#[derive(Error, Debug, Serialize, Deserialize)]
#[serde(tag = "type", content = "message")]
pub enum TutoriumError {
    #[error("Database error: {0}")]
    Database(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl TutoriumError {
    /// Returns the human-readable message carried by the error, without the
    /// variant prefix added by `Display`.
    #[must_use]
    pub fn message(&self) -> &str {
        match self {
            Self::Database(msg)
            | Self::Config(msg)
            | Self::Unauthorized(msg)
            | Self::Forbidden(msg)
            | Self::NotFound(msg)
            | Self::Conflict(msg)
            | Self::InvalidInput(msg)
            | Self::Internal(msg) => msg,
        }
    }
}

/// Result type alias for Tutorium operations
pub type Result<T> = std::result::Result<T, TutoriumError>;

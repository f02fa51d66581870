//! # Tutorium Infrastructure
//!
//! Infrastructure implementations of core domain ports.
//!
//! This crate contains:
//! - Database implementations (SQLite)
//! - Password hashing and bearer token handling
//! - Configuration loading
//!
//! ## Architecture
//! - Implements traits defined in `tutorium-core`
//! - Depends on `tutorium-domain` and `tutorium-core`
//! - Contains all "impure" code (I/O, crypto, environment)

pub mod auth;
pub mod config;
pub mod database;
pub mod errors;

// Re-export commonly used items
pub use auth::*;
pub use database::*;
pub use errors::*;

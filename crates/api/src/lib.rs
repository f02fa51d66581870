//! # Tutorium API
//!
//! HTTP application layer - routes, handlers and main entry point.
//!
//! This crate contains:
//! - Axum handlers (HTTP → service bridge)
//! - Application context (dependency injection)
//! - Main entry point and setup
//!
//! ## Architecture
//! - Depends on `domain`, `core`, and `infra`
//! - Wires up the hexagonal architecture
//! - Exposes the REST surface consumed by clients

pub mod context;
pub mod http;

// Re-export for convenience
pub use context::{AppContext, ComponentHealth, HealthReport};
pub use http::{build_router, ApiError, ApiResult, Identity};

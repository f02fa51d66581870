//! HTTP surface: routing, extractors, request and response shapes

pub mod dto;
pub mod error;
pub mod extract;
pub mod handlers;
pub mod router;

pub use error::{ApiError, ApiResult};
pub use extract::Identity;
pub use router::build_router;

//! Infrastructure error conversions

pub mod conversions;

// Re-export commonly used items
pub use conversions::InfraError;

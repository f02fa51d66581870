//! Database implementations

pub mod appointment_repository;
pub mod availability_repository;
pub mod manager;
pub mod principal_repository;

pub use appointment_repository::*;
pub use availability_repository::*;
pub use manager::*;
pub use principal_repository::*;

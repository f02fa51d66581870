//! # Tutorium Core
//!
//! Pure business logic layer - no infrastructure dependencies.
//!
//! This crate contains:
//! - Scheduling business rules (availability, booking, cancellation)
//! - Port/adapter interfaces (traits)
//! - Role-based access checks
//!
//! ## Architecture Principles
//! - Only depends on `tutorium-domain`
//! - No database or HTTP code
//! - All external dependencies via traits
//! - Pure, testable business logic

pub mod access;
pub mod identity;
pub mod scheduling;

// Re-export specific items to avoid ambiguity
pub use access::require_role;
pub use identity::ports::PrincipalDirectory;
pub use scheduling::ports::{AppointmentStore, AvailabilityStore};
pub use scheduling::{AvailabilityLedger, ReservationEngine};

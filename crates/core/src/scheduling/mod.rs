//! Scheduling module: availability publication and appointment booking

pub mod engine;
pub mod ledger;
pub mod ports;

pub use engine::ReservationEngine;
pub use ledger::AvailabilityLedger;
pub use ports::{AppointmentStore, AvailabilityStore};

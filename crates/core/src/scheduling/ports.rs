//! Port interfaces for availability and appointment storage
//!
//! These traits define the boundaries between core business logic
//! and infrastructure implementations for scheduling operations.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tutorium_domain::{Appointment, Result};

/// Trait for the append-only availability log of a professor
#[async_trait]
pub trait AvailabilityStore: Send + Sync {
    /// Get all declared instants for a professor, in insertion order
    async fn get_slots(&self, professor_id: &str) -> Result<Vec<DateTime<Utc>>>;

    /// Append instants to a professor's availability
    ///
    /// Instants already present must be ignored, not duplicated.
    async fn add_slots(&self, professor_id: &str, slots: &[DateTime<Utc>]) -> Result<()>;
}

/// Trait for appointment persistence and retrieval
#[async_trait]
pub trait AppointmentStore: Send + Sync {
    /// Insert a new appointment
    ///
    /// Returns `Conflict` when a confirmed appointment already holds the
    /// same professor and instant. Exactly one of any set of concurrent
    /// inserts for the same slot may succeed.
    async fn create(&self, appointment: Appointment) -> Result<()>;

    /// Get an appointment by ID
    async fn get_by_id(&self, id: &str) -> Result<Option<Appointment>>;

    /// Get the confirmed appointment holding a professor's instant, if any
    async fn get_confirmed_at(
        &self,
        professor_id: &str,
        time_slot: DateTime<Utc>,
    ) -> Result<Option<Appointment>>;

    /// Get all confirmed appointments of a professor
    async fn get_confirmed_for_professor(&self, professor_id: &str) -> Result<Vec<Appointment>>;

    /// Get all appointments of a professor, newest slot first
    async fn get_for_professor(&self, professor_id: &str) -> Result<Vec<Appointment>>;

    /// Get all appointments of a student, newest slot first
    async fn get_for_student(&self, student_id: &str) -> Result<Vec<Appointment>>;

    /// Get confirmed appointments of a professor at or after `as_of`, newest slot first
    async fn get_upcoming_for_professor(
        &self,
        professor_id: &str,
        as_of: DateTime<Utc>,
    ) -> Result<Vec<Appointment>>;

    /// Move a confirmed appointment to cancelled
    ///
    /// Returns `false` when the appointment was not in the confirmed state,
    /// so exactly one of any set of concurrent cancellations observes the
    /// transition.
    async fn cancel(&self, id: &str, updated_at: i64) -> Result<bool>;
}

//! Scheduling types
//!
//! Availability instants are held at second precision; `SlotView` is the
//! calendar-date / wall-clock-time split shown to clients.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::identity::PublicIdentity;

/// Lifecycle state of an appointment
///
/// `Cancelled` is terminal; there is no reactivation path.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum AppointmentStatus {
    Confirmed,
    Cancelled,
}

impl AppointmentStatus {
    /// Returns the canonical lowercase name used in storage and on the wire
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Confirmed => "confirmed",
            Self::Cancelled => "cancelled",
        }
    }

    /// Parses the canonical lowercase name, `None` for anything else
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "confirmed" => Some(Self::Confirmed),
            "cancelled" => Some(Self::Cancelled),
            _ => None,
        }
    }
}

/// Appointment stored in the local database
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Appointment {
    pub id: String,
    pub student_id: String,
    pub professor_id: String,
    pub time_slot: DateTime<Utc>,
    pub status: AppointmentStatus,
    pub created_at: i64,
    pub updated_at: i64,
}

/// One availability instant split into its date and time parts
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SlotView {
    pub date: String,
    pub time: String,
}

impl SlotView {
    /// Splits an instant into `YYYY-MM-DD` and `HH:MM:SS` parts (UTC)
    #[must_use]
    pub fn from_instant(instant: DateTime<Utc>) -> Self {
        Self {
            date: instant.format("%Y-%m-%d").to_string(),
            time: instant.format("%H:%M:%S").to_string(),
        }
    }
}

/// Open slots of one professor, as seen by a student
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OpenSlots {
    pub professor: PublicIdentity,
    pub slots: Vec<SlotView>,
}

/// Result of a successful reservation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookingConfirmation {
    pub appointment_id: String,
    pub student: PublicIdentity,
    pub professor: PublicIdentity,
    pub time_slot: DateTime<Utc>,
    pub status: AppointmentStatus,
}

/// Appointment joined with the identity of the other party
///
/// For a professor listing, `counterpart` is the student; for a student
/// listing it is the professor.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppointmentView {
    pub id: String,
    pub counterpart: PublicIdentity,
    pub time_slot: DateTime<Utc>,
    pub status: AppointmentStatus,
}

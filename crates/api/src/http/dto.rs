//! Request and response bodies
//!
//! Wire field names are camelCase. Timestamps are RFC 3339 in UTC with
//! millisecond precision.
//!
//! Request fields are optional on the wire; handlers substitute empty
//! strings so the services produce the canonical validation errors
//! instead of a deserialization rejection.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use tutorium_domain::{AppointmentView, BookingConfirmation, Principal, PublicIdentity, SlotView};

// ============================================================================
// Requests
// ============================================================================

/// Body of `POST /api/auth/register`
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub role: Option<String>,
}

/// Body of `POST /api/auth/login`
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

/// Body of `POST /api/prof/set-availability`
#[derive(Debug, Deserialize)]
pub struct SetAvailabilityRequest {
    /// RFC 3339 instants; an absent field behaves like an empty list
    #[serde(default)]
    pub availability: Vec<String>,
}

/// Body of `POST /api/stud/book-appointment`
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookAppointmentRequest {
    pub prof_id: Option<String>,
    pub date: Option<String>,
    pub time: Option<String>,
}

/// Body of `POST /api/prof/cancel-appointment`
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CancelAppointmentRequest {
    #[serde(default)]
    pub appointment_id: String,
}

// ============================================================================
// Responses
// ============================================================================

/// Bare message body, also used for every error response
#[derive(Debug, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

/// Account data plus a fresh bearer token
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: String,
    pub token: String,
}

impl AuthResponse {
    pub(crate) fn new(principal: &Principal, token: String) -> Self {
        Self {
            id: principal.id.clone(),
            name: principal.name.clone(),
            email: principal.email.clone(),
            role: principal.role.as_str().to_string(),
            token,
        }
    }
}

/// Declared availability of the calling professor
#[derive(Debug, Serialize)]
pub struct AvailabilityResponse {
    pub message: String,
    pub availability: Vec<SlotView>,
}

/// Open slots of one professor, as seen by a student
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OpenSlotsResponse {
    pub message: String,
    pub available_slots: Vec<SlotView>,
    pub professor: PublicIdentity,
}

/// Appointment list wrapper shared by the professor and student listings
#[derive(Debug, Serialize)]
pub struct AppointmentsResponse<T> {
    pub message: String,
    pub appointments: Vec<T>,
}

/// An appointment as the professor sees it
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfessorAppointmentDto {
    pub id: String,
    pub student: PublicIdentity,
    pub time_slot: String,
    pub status: String,
}

impl ProfessorAppointmentDto {
    pub(crate) fn from_view(view: AppointmentView) -> Self {
        Self {
            id: view.id,
            student: view.counterpart,
            time_slot: format_instant(view.time_slot),
            status: view.status.as_str().to_string(),
        }
    }
}

/// An appointment as the student sees it
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentAppointmentDto {
    pub id: String,
    pub professor: PublicIdentity,
    pub time_slot: String,
    pub status: String,
}

impl StudentAppointmentDto {
    pub(crate) fn from_view(view: AppointmentView) -> Self {
        Self {
            id: view.id,
            professor: view.counterpart,
            time_slot: format_instant(view.time_slot),
            status: view.status.as_str().to_string(),
        }
    }
}

/// A freshly booked appointment with both parties resolved
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookedAppointmentDto {
    pub id: String,
    pub student: PublicIdentity,
    pub professor: PublicIdentity,
    pub time_slot: String,
    pub status: String,
}

impl BookedAppointmentDto {
    pub(crate) fn from_confirmation(confirmation: BookingConfirmation) -> Self {
        Self {
            id: confirmation.appointment_id,
            student: confirmation.student,
            professor: confirmation.professor,
            time_slot: format_instant(confirmation.time_slot),
            status: confirmation.status.as_str().to_string(),
        }
    }
}

/// Booking response wrapping the new appointment
#[derive(Debug, Serialize)]
pub struct BookingResponse {
    pub message: String,
    pub appointment: BookedAppointmentDto,
}

fn format_instant(instant: DateTime<Utc>) -> String {
    instant.to_rfc3339_opts(SecondsFormat::Millis, true)
}

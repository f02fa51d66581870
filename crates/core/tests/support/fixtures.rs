//! Fixture builders for scheduling tests.

use chrono::{DateTime, Duration, Utc};
use tutorium_domain::{Appointment, AppointmentStatus, Principal, Role};

/// Create a professor principal with a predictable identity.
pub fn professor(id: &str) -> Principal {
    Principal {
        id: id.to_string(),
        name: format!("Prof {id}"),
        email: format!("{id}@faculty.example.edu"),
        role: Role::Professor,
        password_hash: String::new(),
        created_at: 0,
        updated_at: 0,
    }
}

/// Create a student principal with a predictable identity.
pub fn student(id: &str) -> Principal {
    Principal {
        id: id.to_string(),
        name: format!("Student {id}"),
        email: format!("{id}@students.example.edu"),
        role: Role::Student,
        password_hash: String::new(),
        created_at: 0,
        updated_at: 0,
    }
}

/// An instant `hours` whole hours in the future, truncated to the second.
pub fn hours_from_now(hours: i64) -> DateTime<Utc> {
    truncate(Utc::now() + Duration::hours(hours))
}

/// An instant `hours` whole hours in the past, truncated to the second.
pub fn hours_ago(hours: i64) -> DateTime<Utc> {
    truncate(Utc::now() - Duration::hours(hours))
}

/// RFC 3339 rendering of an instant, for declare payloads.
pub fn rfc3339(instant: DateTime<Utc>) -> String {
    instant.to_rfc3339()
}

/// Create an appointment record with fixed bookkeeping timestamps.
pub fn appointment(
    id: &str,
    student_id: &str,
    professor_id: &str,
    time_slot: DateTime<Utc>,
    status: AppointmentStatus,
) -> Appointment {
    Appointment {
        id: id.to_string(),
        student_id: student_id.to_string(),
        professor_id: professor_id.to_string(),
        time_slot,
        status,
        created_at: 0,
        updated_at: 0,
    }
}

fn truncate(instant: DateTime<Utc>) -> DateTime<Utc> {
    DateTime::from_timestamp(instant.timestamp(), 0).unwrap()
}

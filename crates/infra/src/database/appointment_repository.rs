//! Appointment repository implementation using SQLite
//!
//! A partial unique index on `(professor_id, time_slot) WHERE status =
//! 'confirmed'` is the arbiter for double bookings: two concurrent inserts
//! for the same slot cannot both commit, and a cancelled row frees the slot
//! for a later booking.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, Row, ToSql};
use tokio::task;
use tutorium_core::scheduling::ports::AppointmentStore as AppointmentStorePort;
use tutorium_domain::{Appointment, AppointmentStatus, Result as DomainResult, TutoriumError};

use super::manager::{map_sql_error, DbManager};

const APPOINTMENT_COLUMNS: &str =
    "id, student_id, professor_id, time_slot, status, created_at, updated_at";

/// SQLite-backed implementation of `AppointmentStore`
pub struct SqliteAppointmentRepository {
    db: Arc<DbManager>,
}

impl SqliteAppointmentRepository {
    /// Create a new repository instance
    pub fn new(db: Arc<DbManager>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl AppointmentStorePort for SqliteAppointmentRepository {
    async fn create(&self, appointment: Appointment) -> DomainResult<()> {
        let db = Arc::clone(&self.db);

        task::spawn_blocking(move || -> DomainResult<()> {
            let conn = db.get_connection()?;
            insert_appointment(&conn, &appointment).map_err(map_sql_error)?;
            Ok(())
        })
        .await
        .map_err(map_join_error)?
    }

    async fn get_by_id(&self, id: &str) -> DomainResult<Option<Appointment>> {
        let db = Arc::clone(&self.db);
        let id = id.to_string();

        task::spawn_blocking(move || -> DomainResult<Option<Appointment>> {
            let conn = db.get_connection()?;

            let result = conn.query_row(
                &format!("SELECT {APPOINTMENT_COLUMNS} FROM appointments WHERE id = ?1"),
                params![&id],
                map_appointment_row,
            );

            match result {
                Ok(appointment) => Ok(Some(appointment)),
                Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
                Err(err) => Err(map_sql_error(err)),
            }
        })
        .await
        .map_err(map_join_error)?
    }

    async fn get_confirmed_at(
        &self,
        professor_id: &str,
        time_slot: DateTime<Utc>,
    ) -> DomainResult<Option<Appointment>> {
        let db = Arc::clone(&self.db);
        let professor_id = professor_id.to_string();

        task::spawn_blocking(move || -> DomainResult<Option<Appointment>> {
            let conn = db.get_connection()?;

            let result = conn.query_row(
                &format!(
                    "SELECT {APPOINTMENT_COLUMNS} FROM appointments
                     WHERE professor_id = ?1 AND time_slot = ?2 AND status = 'confirmed'"
                ),
                params![&professor_id, time_slot.timestamp()],
                map_appointment_row,
            );

            match result {
                Ok(appointment) => Ok(Some(appointment)),
                Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
                Err(err) => Err(map_sql_error(err)),
            }
        })
        .await
        .map_err(map_join_error)?
    }

    async fn get_confirmed_for_professor(
        &self,
        professor_id: &str,
    ) -> DomainResult<Vec<Appointment>> {
        let db = Arc::clone(&self.db);
        let professor_id = professor_id.to_string();

        task::spawn_blocking(move || -> DomainResult<Vec<Appointment>> {
            let conn = db.get_connection()?;
            query_appointments(
                &conn,
                &format!(
                    "SELECT {APPOINTMENT_COLUMNS} FROM appointments
                     WHERE professor_id = ?1 AND status = 'confirmed'
                     ORDER BY time_slot DESC"
                ),
                params![&professor_id],
            )
        })
        .await
        .map_err(map_join_error)?
    }

    async fn get_for_professor(&self, professor_id: &str) -> DomainResult<Vec<Appointment>> {
        let db = Arc::clone(&self.db);
        let professor_id = professor_id.to_string();

        task::spawn_blocking(move || -> DomainResult<Vec<Appointment>> {
            let conn = db.get_connection()?;
            query_appointments(
                &conn,
                &format!(
                    "SELECT {APPOINTMENT_COLUMNS} FROM appointments
                     WHERE professor_id = ?1 ORDER BY time_slot DESC"
                ),
                params![&professor_id],
            )
        })
        .await
        .map_err(map_join_error)?
    }

    async fn get_for_student(&self, student_id: &str) -> DomainResult<Vec<Appointment>> {
        let db = Arc::clone(&self.db);
        let student_id = student_id.to_string();

        task::spawn_blocking(move || -> DomainResult<Vec<Appointment>> {
            let conn = db.get_connection()?;
            query_appointments(
                &conn,
                &format!(
                    "SELECT {APPOINTMENT_COLUMNS} FROM appointments
                     WHERE student_id = ?1 ORDER BY time_slot DESC"
                ),
                params![&student_id],
            )
        })
        .await
        .map_err(map_join_error)?
    }

    async fn get_upcoming_for_professor(
        &self,
        professor_id: &str,
        as_of: DateTime<Utc>,
    ) -> DomainResult<Vec<Appointment>> {
        let db = Arc::clone(&self.db);
        let professor_id = professor_id.to_string();

        task::spawn_blocking(move || -> DomainResult<Vec<Appointment>> {
            let conn = db.get_connection()?;
            query_appointments(
                &conn,
                &format!(
                    "SELECT {APPOINTMENT_COLUMNS} FROM appointments
                     WHERE professor_id = ?1 AND status = 'confirmed' AND time_slot >= ?2
                     ORDER BY time_slot DESC"
                ),
                params![&professor_id, as_of.timestamp()],
            )
        })
        .await
        .map_err(map_join_error)?
    }

    async fn cancel(&self, id: &str, updated_at: i64) -> DomainResult<bool> {
        let db = Arc::clone(&self.db);
        let id = id.to_string();

        task::spawn_blocking(move || -> DomainResult<bool> {
            let conn = db.get_connection()?;

            let rows = conn
                .execute(
                    "UPDATE appointments SET status = 'cancelled', updated_at = ?2
                     WHERE id = ?1 AND status = 'confirmed'",
                    params![&id, updated_at],
                )
                .map_err(map_sql_error)?;

            Ok(rows == 1)
        })
        .await
        .map_err(map_join_error)?
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Map a row to an Appointment
fn map_appointment_row(row: &Row) -> rusqlite::Result<Appointment> {
    let slot_ts: i64 = row.get(3)?;
    let time_slot = DateTime::from_timestamp(slot_ts, 0).ok_or_else(|| {
        rusqlite::Error::FromSqlConversionFailure(
            3,
            rusqlite::types::Type::Integer,
            format!("timestamp out of range: {slot_ts}").into(),
        )
    })?;

    let status_text: String = row.get(4)?;
    let status = AppointmentStatus::parse(&status_text).ok_or_else(|| {
        rusqlite::Error::FromSqlConversionFailure(
            4,
            rusqlite::types::Type::Text,
            format!("unknown appointment status: {status_text}").into(),
        )
    })?;

    Ok(Appointment {
        id: row.get(0)?,
        student_id: row.get(1)?,
        professor_id: row.get(2)?,
        time_slot,
        status,
        created_at: row.get(5)?,
        updated_at: row.get(6)?,
    })
}

/// Insert an appointment
fn insert_appointment(conn: &Connection, appointment: &Appointment) -> rusqlite::Result<()> {
    let params: [&dyn ToSql; 7] = [
        &appointment.id,
        &appointment.student_id,
        &appointment.professor_id,
        &appointment.time_slot.timestamp(),
        &appointment.status.as_str(),
        &appointment.created_at,
        &appointment.updated_at,
    ];

    conn.execute(
        "INSERT INTO appointments (
            id, student_id, professor_id, time_slot, status, created_at, updated_at
         ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
        params.as_slice(),
    )?;

    Ok(())
}

/// Run a SELECT over the appointments table and collect the mapped rows
fn query_appointments(
    conn: &Connection,
    sql: &str,
    params: &[&dyn ToSql],
) -> DomainResult<Vec<Appointment>> {
    let mut stmt = conn.prepare(sql).map_err(map_sql_error)?;
    let rows = stmt
        .query_map(params, map_appointment_row)
        .map_err(map_sql_error)?;

    let mut appointments = Vec::new();
    for row in rows {
        appointments.push(row.map_err(map_sql_error)?);
    }
    Ok(appointments)
}

// =============================================================================
// Error Mapping
// =============================================================================

fn map_join_error(err: task::JoinError) -> TutoriumError {
    TutoriumError::Internal(format!("Task join error: {err}"))
}

// =============================================================================
// Tests
// =============================================================================

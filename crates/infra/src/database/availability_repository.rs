//! Availability repository implementation using SQLite
//!
//! Stores the instants a professor has declared themselves available at.
//! The table is append-only from the service's point of view; instants are
//! keyed by `(professor_id, slot_ts)` so re-declaring one is a no-op.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rusqlite::{params, Row};
use tokio::task;
use tutorium_core::scheduling::ports::AvailabilityStore as AvailabilityStorePort;
use tutorium_domain::{Result as DomainResult, TutoriumError};

use super::manager::{map_sql_error, DbManager};

/// SQLite-backed implementation of `AvailabilityStore`
pub struct SqliteAvailabilityRepository {
    db: Arc<DbManager>,
}

impl SqliteAvailabilityRepository {
    /// Create a new repository instance
    pub fn new(db: Arc<DbManager>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl AvailabilityStorePort for SqliteAvailabilityRepository {
    async fn get_slots(&self, professor_id: &str) -> DomainResult<Vec<DateTime<Utc>>> {
        let db = Arc::clone(&self.db);
        let professor_id = professor_id.to_string();

        task::spawn_blocking(move || -> DomainResult<Vec<DateTime<Utc>>> {
            let conn = db.get_connection()?;

            let mut stmt = conn
                .prepare(
                    "SELECT slot_ts FROM availability_slots
                     WHERE professor_id = ?1 ORDER BY rowid ASC",
                )
                .map_err(map_sql_error)?;

            let rows = stmt
                .query_map(params![&professor_id], map_slot_row)
                .map_err(map_sql_error)?;

            let mut slots = Vec::new();
            for row in rows {
                slots.push(row.map_err(map_sql_error)?);
            }
            Ok(slots)
        })
        .await
        .map_err(map_join_error)?
    }

    async fn add_slots(&self, professor_id: &str, slots: &[DateTime<Utc>]) -> DomainResult<()> {
        let db = Arc::clone(&self.db);
        let professor_id = professor_id.to_string();
        let slots = slots.to_vec();

        task::spawn_blocking(move || -> DomainResult<()> {
            let mut conn = db.get_connection()?;
            let now = Utc::now().timestamp();

            let tx = conn.transaction().map_err(map_sql_error)?;
            for slot in &slots {
                tx.execute(
                    "INSERT OR IGNORE INTO availability_slots (professor_id, slot_ts, created_at)
                     VALUES (?1, ?2, ?3)",
                    params![&professor_id, slot.timestamp(), now],
                )
                .map_err(map_sql_error)?;
            }
            tx.commit().map_err(map_sql_error)?;

            Ok(())
        })
        .await
        .map_err(map_join_error)?
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Map a row to an availability instant
fn map_slot_row(row: &Row) -> rusqlite::Result<DateTime<Utc>> {
    let ts: i64 = row.get(0)?;
    DateTime::from_timestamp(ts, 0).ok_or_else(|| {
        rusqlite::Error::FromSqlConversionFailure(
            0,
            rusqlite::types::Type::Integer,
            format!("timestamp out of range: {ts}").into(),
        )
    })
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

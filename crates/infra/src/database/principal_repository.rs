//! Principal repository implementation using SQLite
//!
//! Provides persistence for the accounts (students and professors) known
//! to the scheduling service.

use std::sync::Arc;

use async_trait::async_trait;
use rusqlite::{params, Row, ToSql};
use tokio::task;
use tutorium_core::identity::ports::PrincipalDirectory as PrincipalDirectoryPort;
use tutorium_domain::{Principal, Result as DomainResult, Role, TutoriumError};

use super::manager::{map_sql_error, DbManager};

/// SQLite-backed implementation of `PrincipalDirectory`
pub struct SqlitePrincipalRepository {
    db: Arc<DbManager>,
}

impl SqlitePrincipalRepository {
    /// Create a new repository instance
    pub fn new(db: Arc<DbManager>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl PrincipalDirectoryPort for SqlitePrincipalRepository {
    async fn get_by_id(&self, id: &str) -> DomainResult<Option<Principal>> {
        let db = Arc::clone(&self.db);
        let id = id.to_string();

        task::spawn_blocking(move || -> DomainResult<Option<Principal>> {
            let conn = db.get_connection()?;

            let result = conn.query_row(
                "SELECT id, name, email, role, password_hash, created_at, updated_at
                 FROM principals WHERE id = ?1",
                params![&id],
                map_principal_row,
            );

            match result {
                Ok(principal) => Ok(Some(principal)),
                Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
                Err(err) => Err(map_sql_error(err)),
            }
        })
        .await
        .map_err(map_join_error)?
    }

    async fn get_by_email(&self, email: &str) -> DomainResult<Option<Principal>> {
        let db = Arc::clone(&self.db);
        let email = email.to_string();

        task::spawn_blocking(move || -> DomainResult<Option<Principal>> {
            let conn = db.get_connection()?;

            let result = conn.query_row(
                "SELECT id, name, email, role, password_hash, created_at, updated_at
                 FROM principals WHERE email = ?1",
                params![&email],
                map_principal_row,
            );

            match result {
                Ok(principal) => Ok(Some(principal)),
                Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
                Err(err) => Err(map_sql_error(err)),
            }
        })
        .await
        .map_err(map_join_error)?
    }

    async fn create(&self, principal: Principal) -> DomainResult<()> {
        let db = Arc::clone(&self.db);

        task::spawn_blocking(move || -> DomainResult<()> {
            let conn = db.get_connection()?;
            insert_principal(&conn, &principal).map_err(map_sql_error)?;
            Ok(())
        })
        .await
        .map_err(map_join_error)?
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Map a row to a Principal
fn map_principal_row(row: &Row) -> rusqlite::Result<Principal> {
    let role_text: String = row.get(3)?;
    let role = Role::parse(&role_text).ok_or_else(|| {
        rusqlite::Error::FromSqlConversionFailure(
            3,
            rusqlite::types::Type::Text,
            format!("unknown role: {role_text}").into(),
        )
    })?;

    Ok(Principal {
        id: row.get(0)?,
        name: row.get(1)?,
        email: row.get(2)?,
        role,
        password_hash: row.get(4)?,
        created_at: row.get(5)?,
        updated_at: row.get(6)?,
    })
}

/// Insert a principal
fn insert_principal(conn: &rusqlite::Connection, principal: &Principal) -> rusqlite::Result<()> {
    let params: [&dyn ToSql; 7] = [
        &principal.id,
        &principal.name,
        &principal.email,
        &principal.role.as_str(),
        &principal.password_hash,
        &principal.created_at,
        &principal.updated_at,
    ];

    conn.execute(
        "INSERT INTO principals (
            id, name, email, role, password_hash, created_at, updated_at
         ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
        params.as_slice(),
    )?;

    Ok(())
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

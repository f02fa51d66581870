//! Database connection manager backed by an r2d2 SQLite pool.

use std::path::{Path, PathBuf};
use std::time::Duration;

use r2d2::{Pool, PooledConnection};
use r2d2_sqlite::SqliteConnectionManager;
use rusqlite::params;
use tracing::info;
use tutorium_domain::{Result, TutoriumError};

use crate::errors::InfraError;

const SCHEMA_VERSION: i32 = 1;
const SCHEMA_SQL: &str = include_str!("schema.sql");
const BUSY_TIMEOUT: Duration = Duration::from_secs(5);
const CONNECTION_TIMEOUT: Duration = Duration::from_secs(5);

/// Pooled SQLite connection handle.
pub type DbConnection = PooledConnection<SqliteConnectionManager>;

/// Database manager that wraps an r2d2 pool of SQLite connections.
pub struct DbManager {
    pool: Pool<SqliteConnectionManager>,
    path: PathBuf,
}

impl DbManager {
    /// Create a new manager with the given pool size.
    ///
    /// Connections run in WAL mode with a busy timeout so concurrent
    /// writers queue instead of failing immediately.
    pub fn new<P: AsRef<Path>>(db_path: P, pool_size: u32) -> Result<Self> {
        let path = db_path.as_ref().to_path_buf();

        let manager = SqliteConnectionManager::file(&path).with_init(|conn| {
            conn.pragma_update(None, "journal_mode", "WAL")?;
            conn.pragma_update(None, "synchronous", "NORMAL")?;
            conn.pragma_update(None, "foreign_keys", "ON")?;
            conn.busy_timeout(BUSY_TIMEOUT)
        });

        let max_size = pool_size.max(1);
        let pool = Pool::builder()
            .max_size(max_size)
            .connection_timeout(CONNECTION_TIMEOUT)
            .build(manager)
            .map_err(|err| TutoriumError::Database(format!("failed to build pool: {err}")))?;

        info!(
            db_path = %path.display(),
            max_connections = max_size,
            "sqlite pool initialised"
        );

        Ok(Self { pool, path })
    }

    /// Acquire a connection from the pool.
    pub fn get_connection(&self) -> Result<DbConnection> {
        self.pool
            .get()
            .map_err(|err| TutoriumError::Database(format!("failed to acquire connection: {err}")))
    }

    /// Ensure the full schema exists on the current database.
    pub fn run_migrations(&self) -> Result<()> {
        let conn = self.get_connection()?;
        create_schema(&conn)?;
        Ok(())
    }

    /// Return the configured database path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Perform a health check to verify database connectivity.
    ///
    /// This method acquires a connection from the pool and executes a simple
    /// query to verify the database is accessible and responding.
    pub fn health_check(&self) -> Result<()> {
        let conn = self.get_connection()?;
        // Simple query to verify database is responsive
        conn.query_row("SELECT 1", params![], |row| row.get::<_, i32>(0))
            .map_err(map_sql_error)?;
        Ok(())
    }
}

fn create_schema(conn: &DbConnection) -> Result<()> {
    conn.execute_batch(SCHEMA_SQL).map_err(map_sql_error)?;
    conn.execute(
        "INSERT OR IGNORE INTO schema_version (version, applied_at) VALUES (?, CAST(strftime('%s','now') AS INTEGER))",
        params![SCHEMA_VERSION],
    )
    .map_err(map_sql_error)?;
    Ok(())
}

pub(crate) fn map_sql_error(err: rusqlite::Error) -> TutoriumError {
    TutoriumError::from(InfraError::from(err))
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;

    #[test]
    fn migrations_create_schema_version() {
        let temp_dir = TempDir::new().expect("temp dir created");
        let db_path = temp_dir.path().join("test.db");

        let manager = DbManager::new(&db_path, 4).expect("manager created");
        manager.run_migrations().expect("migrations run");

        let conn = manager.get_connection().expect("connection acquired");
        let version: i32 =
            conn.query_row("SELECT version FROM schema_version", [], |row| row.get(0)).unwrap();
        assert_eq!(version, SCHEMA_VERSION);
    }

    #[test]
    fn migrations_are_idempotent() {
        let temp_dir = TempDir::new().expect("temp dir created");
        let db_path = temp_dir.path().join("test.db");

        let manager = DbManager::new(&db_path, 4).expect("manager created");
        manager.run_migrations().expect("first run");
        manager.run_migrations().expect("second run");

        let conn = manager.get_connection().expect("connection acquired");
        let count: i64 = conn
            .query_row("SELECT COUNT(*) FROM schema_version", [], |row| row.get(0))
            .unwrap();
        assert_eq!(count, 1);
    }

    #[test]
    fn health_check_succeeds_for_valid_database() {
        let temp_dir = TempDir::new().expect("temp dir created");
        let db_path = temp_dir.path().join("test.db");

        let manager = DbManager::new(&db_path, 4).expect("manager created");
        manager.run_migrations().expect("migrations run");

        // Health check should succeed
        manager.health_check().expect("health check passed");
    }

    #[test]
    fn pool_size_is_clamped_to_at_least_one() {
        let temp_dir = TempDir::new().expect("temp dir created");
        let db_path = temp_dir.path().join("test.db");

        let manager = DbManager::new(&db_path, 0).expect("manager created");
        manager.run_migrations().expect("migrations run");
        manager.health_check().expect("health check passed");
    }
}

//! Application context - dependency injection container

use std::sync::Arc;

use serde::Serialize;
use tokio::task;
use tutorium_core::{
    AppointmentStore, AvailabilityLedger, AvailabilityStore, PrincipalDirectory, ReservationEngine,
};
use tutorium_domain::{Config, Result};
use tutorium_infra::{
    DbManager, IdentityService, SqliteAppointmentRepository, SqliteAvailabilityRepository,
    SqlitePrincipalRepository, TokenSigner,
};

/// Health of a single component
#[derive(Debug, Clone, Serialize)]
pub struct ComponentHealth {
    /// Component name
    pub name: &'static str,
    /// Whether the component responded
    pub healthy: bool,
    /// Failure detail, absent when healthy
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl ComponentHealth {
    fn healthy(name: &'static str) -> Self {
        Self { name, healthy: true, message: None }
    }

    fn unhealthy(name: &'static str, message: String) -> Self {
        Self { name, healthy: false, message: Some(message) }
    }
}

/// Aggregated service health
#[derive(Debug, Clone, Serialize)]
pub struct HealthReport {
    /// `"ok"` when every component is healthy, `"degraded"` otherwise
    pub status: &'static str,
    /// Per-component detail
    pub components: Vec<ComponentHealth>,
}

impl HealthReport {
    fn from_components(components: Vec<ComponentHealth>) -> Self {
        let status = if components.iter().all(|c| c.healthy) {
            "ok"
        } else {
            "degraded"
        };
        Self { status, components }
    }

    /// True when every component reported healthy
    #[must_use]
    pub fn is_healthy(&self) -> bool {
        self.status == "ok"
    }
}

/// Application context holding all initialized services
///
/// Built once at startup and shared behind an `Arc` with every request
/// handler.
pub struct AppContext {
    /// Application configuration
    pub config: Config,
    /// Database manager (SQLite connection pool)
    pub db: Arc<DbManager>,
    /// Account registration, login and token verification
    pub identity: Arc<IdentityService>,
    /// Professor availability declarations
    pub ledger: Arc<AvailabilityLedger>,
    /// Slot listing, booking and cancellation
    pub engine: Arc<ReservationEngine>,
}

impl AppContext {
    /// Create a new application context with default configuration
    ///
    /// # Errors
    /// Fails when the database cannot be opened or migrated.
    pub fn new() -> Result<Self> {
        Self::new_with_config(Config::default())
    }

    /// Create a new application context with custom configuration
    ///
    /// Tests use this to point the context at a temporary database.
    ///
    /// # Errors
    /// Fails when the database cannot be opened or migrated.
    pub fn new_with_config(config: Config) -> Result<Self> {
        let db = Arc::new(DbManager::new(
            &config.database.path,
            config.database.pool_size,
        )?);
        db.run_migrations()?;

        let directory: Arc<dyn PrincipalDirectory> =
            Arc::new(SqlitePrincipalRepository::new(db.clone()));
        let availability: Arc<dyn AvailabilityStore> =
            Arc::new(SqliteAvailabilityRepository::new(db.clone()));
        let appointments: Arc<dyn AppointmentStore> =
            Arc::new(SqliteAppointmentRepository::new(db.clone()));

        let tokens = TokenSigner::new(&config.auth.token_secret, config.auth.token_ttl_secs);
        let identity = Arc::new(IdentityService::new(Arc::clone(&directory), tokens));
        let ledger = Arc::new(AvailabilityLedger::new(
            Arc::clone(&directory),
            Arc::clone(&availability),
        ));
        let engine = Arc::new(ReservationEngine::new(directory, availability, appointments));

        tracing::info!(db_path = %config.database.path, "application context initialized");

        Ok(Self { config, db, identity, ledger, engine })
    }

    /// Check the health of all components
    pub async fn health_check(&self) -> HealthReport {
        HealthReport::from_components(vec![self.check_database_health().await])
    }

    async fn check_database_health(&self) -> ComponentHealth {
        let db = self.db.clone();
        // Pool checkout and the probe query both block.
        match task::spawn_blocking(move || db.health_check()).await {
            Ok(Ok(())) => ComponentHealth::healthy("database"),
            Ok(Err(e)) => ComponentHealth::unhealthy("database", format!("query failed: {e}")),
            Err(e) => ComponentHealth::unhealthy("database", format!("task panic: {e}")),
        }
    }
}

//! Port interfaces for account storage
//!
//! These traits define the boundaries between core business logic
//! and infrastructure implementations for account operations.

use async_trait::async_trait;
use tutorium_domain::{Principal, Result};

/// Trait for principal persistence and retrieval
#[async_trait]
pub trait PrincipalDirectory: Send + Sync {
    /// Get a principal by ID
    async fn get_by_id(&self, id: &str) -> Result<Option<Principal>>;

    /// Get a principal by email address
    async fn get_by_email(&self, email: &str) -> Result<Option<Principal>>;

    /// Create a new principal
    ///
    /// Returns `Conflict` when the email address is already registered.
    async fn create(&self, principal: Principal) -> Result<()>;
}

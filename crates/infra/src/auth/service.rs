//! Account registration, login, and token authentication

use std::sync::Arc;

use chrono::Utc;
use tokio::task;
use tracing::debug;
use tutorium_core::identity::ports::PrincipalDirectory;
use tutorium_domain::{Principal, Result as DomainResult, Role, TutoriumError};
use uuid::Uuid;

use super::password::{hash_password, verify_password};
use super::token::TokenSigner;

/// Registers accounts and authenticates callers
pub struct IdentityService {
    directory: Arc<dyn PrincipalDirectory>,
    tokens: TokenSigner,
}

impl IdentityService {
    /// Create a new service instance
    pub fn new(directory: Arc<dyn PrincipalDirectory>, tokens: TokenSigner) -> Self {
        Self { directory, tokens }
    }

    /// Register a new account and return it with a fresh token
    pub async fn register(
        &self,
        name: &str,
        email: &str,
        password: &str,
        role_text: &str,
    ) -> DomainResult<(Principal, String)> {
        if name.trim().is_empty()
            || email.trim().is_empty()
            || password.trim().is_empty()
            || role_text.trim().is_empty()
        {
            return Err(TutoriumError::InvalidInput(
                "Please fill all fields".to_string(),
            ));
        }

        let role = Role::parse(role_text)
            .ok_or_else(|| TutoriumError::InvalidInput("Invalid role".to_string()))?;

        if self.directory.get_by_email(email).await?.is_some() {
            return Err(TutoriumError::Conflict("User already exists".to_string()));
        }

        // Argon2 is deliberately slow; keep it off the async threads.
        let password = password.to_string();
        let password_hash = task::spawn_blocking(move || hash_password(&password))
            .await
            .map_err(map_join_error)??;

        let now = Utc::now().timestamp();
        let principal = Principal {
            id: Uuid::new_v4().to_string(),
            name: name.to_string(),
            email: email.to_string(),
            role,
            password_hash,
            created_at: now,
            updated_at: now,
        };

        // A concurrent registration can still win the unique email index.
        self.directory
            .create(principal.clone())
            .await
            .map_err(|err| match err {
                TutoriumError::Conflict(_) => {
                    TutoriumError::Conflict("User already exists".to_string())
                }
                other => other,
            })?;

        let token = self.tokens.issue(&principal.id)?;
        debug!(principal_id = %principal.id, role = %principal.role, "account registered");

        Ok((principal, token))
    }

    /// Verify credentials and return the account with a fresh token
    pub async fn login(&self, email: &str, password: &str) -> DomainResult<(Principal, String)> {
        if email.trim().is_empty() || password.trim().is_empty() {
            return Err(TutoriumError::InvalidInput(
                "Please fill all fields".to_string(),
            ));
        }

        let principal = self
            .directory
            .get_by_email(email)
            .await?
            .ok_or_else(invalid_credentials)?;

        let password = password.to_string();
        let stored_hash = principal.password_hash.clone();
        let matches = task::spawn_blocking(move || verify_password(&password, &stored_hash))
            .await
            .map_err(map_join_error)??;
        if !matches {
            return Err(invalid_credentials());
        }

        let token = self.tokens.issue(&principal.id)?;
        Ok((principal, token))
    }

    /// Resolve a bearer token to the account it was issued to
    pub async fn authenticate(&self, token: &str) -> DomainResult<Principal> {
        let claims = self.tokens.verify(token)?;

        self.directory
            .get_by_id(&claims.sub)
            .await?
            .ok_or_else(|| TutoriumError::NotFound("User not found".to_string()))
    }
}

fn invalid_credentials() -> TutoriumError {
    TutoriumError::InvalidInput("Invalid credentials".to_string())
}

fn map_join_error(err: task::JoinError) -> TutoriumError {
    TutoriumError::Internal(format!("Task join error: {err}"))
}

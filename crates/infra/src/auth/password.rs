//! Password hashing using Argon2
//!
//! Passwords are stored as PHC strings, so the salt and parameters travel
//! with the hash and verification needs no extra state.

use argon2::password_hash::SaltString;
use argon2::{Argon2, PasswordHash, PasswordHasher, PasswordVerifier};
use rand::rngs::OsRng;
use tutorium_domain::{Result as DomainResult, TutoriumError};

/// Hash a password for storage
pub fn hash_password(password: &str) -> DomainResult<String> {
    let salt = SaltString::generate(OsRng);
    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| TutoriumError::Internal(format!("Password hashing failed: {e}")))?;
    Ok(hash.to_string())
}

/// Verify a password against a stored PHC string
pub fn verify_password(password: &str, stored_hash: &str) -> DomainResult<bool> {
    let parsed = PasswordHash::new(stored_hash)
        .map_err(|e| TutoriumError::Internal(format!("Stored password hash is invalid: {e}")))?;
    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok())
}

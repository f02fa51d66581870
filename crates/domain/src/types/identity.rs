//! Identity types
//!
//! Accounts known to the scheduling service and the public projection
//! other users are allowed to see.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Role a principal acts under
///
/// Every account holds exactly one role for its whole lifetime; there is
/// no role change operation.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Student,
    Professor,
}

impl Role {
    /// Returns the canonical lowercase name used in storage and on the wire
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Student => "student",
            Self::Professor => "professor",
        }
    }

    /// Parses the canonical lowercase name, `None` for anything else
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "student" => Some(Self::Student),
            "professor" => Some(Self::Professor),
            _ => None,
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Account stored in the local database
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Principal {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: Role,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub created_at: i64,
    pub updated_at: i64,
}

impl Principal {
    /// Projection of this account safe to show to other users
    #[must_use]
    pub fn public_identity(&self) -> PublicIdentity {
        PublicIdentity {
            id: self.id.clone(),
            name: self.name.clone(),
            email: self.email.clone(),
        }
    }
}

/// Public projection of a principal (no role, no credentials)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PublicIdentity {
    pub id: String,
    pub name: String,
    pub email: String,
}

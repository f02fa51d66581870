//! Authentication implementations

pub mod password;
pub mod service;
pub mod token;

pub use password::{hash_password, verify_password};
pub use service::IdentityService;
pub use token::{TokenClaims, TokenSigner};

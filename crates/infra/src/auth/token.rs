//! Bearer token signing and verification
//!
//! Tokens are `base64url(claims).base64url(mac)` where the MAC is a keyed
//! BLAKE3 hash of the claims payload. The signing key is derived from the
//! configured secret, so every instance sharing a secret accepts the same
//! tokens.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use tutorium_domain::{Result as DomainResult, TutoriumError};

const KEY_CONTEXT: &str = "tutorium 2025-01-01 bearer token mac";

/// Claims carried inside a bearer token
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenClaims {
    /// Principal id the token was issued to
    pub sub: String,
    /// Issued-at, unix seconds
    pub iat: i64,
    /// Expiry, unix seconds
    pub exp: i64,
}

/// Issues and verifies bearer tokens
#[derive(Clone)]
pub struct TokenSigner {
    key: [u8; 32],
    ttl_secs: i64,
}

impl TokenSigner {
    /// Create a signer from the configured secret and token lifetime
    #[must_use]
    pub fn new(secret: &str, ttl_secs: u64) -> Self {
        Self {
            key: blake3::derive_key(KEY_CONTEXT, secret.as_bytes()),
            ttl_secs: i64::try_from(ttl_secs).unwrap_or(i64::MAX),
        }
    }

    /// Issue a token for the given principal id
    pub fn issue(&self, subject: &str) -> DomainResult<String> {
        let now = Utc::now().timestamp();
        let claims = TokenClaims {
            sub: subject.to_string(),
            iat: now,
            exp: now.saturating_add(self.ttl_secs),
        };

        let payload = serde_json::to_vec(&claims)
            .map_err(|e| TutoriumError::Internal(format!("Token encoding failed: {e}")))?;
        let mac = self.mac(&payload);

        Ok(format!(
            "{}.{}",
            URL_SAFE_NO_PAD.encode(&payload),
            URL_SAFE_NO_PAD.encode(mac.as_bytes())
        ))
    }

    /// Verify a token and return its claims
    pub fn verify(&self, token: &str) -> DomainResult<TokenClaims> {
        let (payload_b64, mac_b64) = token.split_once('.').ok_or_else(invalid_token)?;

        let payload = URL_SAFE_NO_PAD
            .decode(payload_b64)
            .map_err(|_| invalid_token())?;
        let mac = URL_SAFE_NO_PAD
            .decode(mac_b64)
            .map_err(|_| invalid_token())?;

        // blake3::Hash equality is constant time
        if self.mac(&payload) != mac[..] {
            return Err(invalid_token());
        }

        let claims: TokenClaims =
            serde_json::from_slice(&payload).map_err(|_| invalid_token())?;
        if claims.exp <= Utc::now().timestamp() {
            return Err(TutoriumError::Unauthorized("Token expired".to_string()));
        }

        Ok(claims)
    }

    fn mac(&self, payload: &[u8]) -> blake3::Hash {
        let mut hasher = blake3::Hasher::new_keyed(&self.key);
        hasher.update(payload);
        hasher.finalize()
    }
}

fn invalid_token() -> TutoriumError {
    TutoriumError::Unauthorized("Invalid token".to_string())
}

//! Session Tokens
//!
//! A session is a signed, self-contained token; nothing is stored
//! server-side, so there is no revocation short of rotating the secret.

use chrono::{DateTime, Duration, Utc};
use kernel::principal::Principal;

use crate::domain::value_object::UserId;
use crate::error::AuthResult;

/// Claims carried by a session token
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionClaims {
    pub user_id: UserId,
    pub email: String,
    pub issued_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl SessionClaims {
    pub fn new(user_id: UserId, email: impl Into<String>, now: DateTime<Utc>, ttl: Duration) -> Self {
        Self {
            user_id,
            email: email.into(),
            issued_at: now,
            expires_at: now + ttl,
        }
    }

    pub fn principal(&self) -> Principal {
        Principal::new(self.user_id, self.email.clone())
    }
}

/// Token signing port
pub trait SessionSigner: Send + Sync + 'static {
    /// Produce a token for `claims`
    fn sign(&self, claims: &SessionClaims) -> AuthResult<String>;

    /// Check signature and expiry. Any failure is `AuthError::SessionInvalid`.
    fn verify(&self, token: &str) -> AuthResult<SessionClaims>;
}

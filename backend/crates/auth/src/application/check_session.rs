//! Check Session Use Case
//!
//! Verifies a session token and returns its claims.

use std::sync::Arc;

use crate::domain::session::{SessionClaims, SessionSigner};
use crate::error::AuthResult;

/// Check session use case
pub struct CheckSessionUseCase<S>
where
    S: SessionSigner,
{
    signer: Arc<S>,
}

impl<S> CheckSessionUseCase<S>
where
    S: SessionSigner,
{
    pub fn new(signer: Arc<S>) -> Self {
        Self { signer }
    }

    /// Verify `token` and return its claims
    pub fn execute(&self, token: &str) -> AuthResult<SessionClaims> {
        self.signer.verify(token)
    }

    /// Like `execute`, but absent or bad tokens yield `None`
    pub fn check(&self, token: Option<&str>) -> Option<SessionClaims> {
        token.and_then(|t| self.execute(t).ok())
    }
}

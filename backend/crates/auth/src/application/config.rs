//! Application Configuration
//!
//! Configuration for the Auth application layer.

use std::time::Duration;

use crate::error::{AuthError, AuthResult};

/// Auth application configuration
#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// How long an issued OTP stays valid (10 minutes)
    pub otp_ttl: Duration,
    /// Session token lifetime (1 week)
    pub session_ttl: Duration,
    /// Subject line of the OTP email
    pub otp_email_subject: String,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            otp_ttl: Duration::from_secs(10 * 60),           // 10 minutes
            session_ttl: Duration::from_secs(7 * 24 * 3600), // 1 week
            otp_email_subject: "Your OTP for Login".to_string(),
        }
    }
}

impl AuthConfig {
    pub fn otp_ttl(&self) -> AuthResult<chrono::Duration> {
        chrono::Duration::from_std(self.otp_ttl)
            .map_err(|e| AuthError::Internal(format!("Invalid OTP TTL: {e}")))
    }

    pub fn session_ttl(&self) -> AuthResult<chrono::Duration> {
        chrono::Duration::from_std(self.session_ttl)
            .map_err(|e| AuthError::Internal(format!("Invalid session TTL: {e}")))
    }

    /// OTP lifetime as shown to the user
    pub fn otp_ttl_minutes(&self) -> u64 {
        self.otp_ttl.as_secs() / 60
    }
}

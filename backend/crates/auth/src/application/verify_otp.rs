//! Verify OTP Use Case
//!
//! Consumes a pending login code and issues a session token.

use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::application::config::AuthConfig;
use crate::domain::entity::credential::OtpRejection;
use crate::domain::repository::CredentialRepository;
use crate::domain::session::{SessionClaims, SessionSigner};
use crate::domain::value_object::{UserId, email::Email, otp_code::OtpDigest};
use crate::error::{AuthError, AuthResult};

/// Verify OTP input
pub struct VerifyOtpInput {
    pub email: String,
    pub otp: String,
}

/// Verify OTP output
#[derive(Clone)]
pub struct VerifyOtpOutput {
    pub token: String,
    pub user_id: UserId,
    pub email: String,
    pub expires_at: DateTime<Utc>,
}

impl std::fmt::Debug for VerifyOtpOutput {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VerifyOtpOutput")
            .field("token", &"<redacted>")
            .field("user_id", &self.user_id)
            .field("email", &self.email)
            .field("expires_at", &self.expires_at)
            .finish()
    }
}

/// Verify OTP use case
pub struct VerifyOtpUseCase<R, S>
where
    R: CredentialRepository,
    S: SessionSigner,
{
    repo: Arc<R>,
    signer: Arc<S>,
    config: Arc<AuthConfig>,
}

impl<R, S> VerifyOtpUseCase<R, S>
where
    R: CredentialRepository,
    S: SessionSigner,
{
    pub fn new(repo: Arc<R>, signer: Arc<S>, config: Arc<AuthConfig>) -> Self {
        Self {
            repo,
            signer,
            config,
        }
    }

    pub async fn execute(&self, input: VerifyOtpInput) -> AuthResult<VerifyOtpOutput> {
        if input.email.is_empty() || input.otp.is_empty() {
            return Err(AuthError::MissingFields);
        }

        // A malformed address can't have a record; answer the same as unknown
        let Ok(email) = Email::new(input.email) else {
            tracing::debug!(reason = "malformed_email", "OTP verification rejected");
            return Err(AuthError::InvalidOtp);
        };

        let Some(mut credential) = self.repo.find_by_email(&email).await? else {
            tracing::debug!(reason = "unknown_email", "OTP verification rejected");
            return Err(AuthError::InvalidOtp);
        };

        let now = Utc::now();
        if let Err(rejection) = credential.verify_otp(&input.otp, now) {
            tracing::debug!(
                user_id = %credential.user_id,
                reason = ?rejection,
                "OTP verification rejected"
            );
            return Err(match rejection {
                OtpRejection::Expired => AuthError::OtpExpired,
                OtpRejection::NoPendingCode | OtpRejection::Mismatch => AuthError::InvalidOtp,
            });
        }

        // Two requests may both pass the check above; only one wins the swap
        let digest = OtpDigest::of(&input.otp);
        if !self.repo.consume(&credential.email, &digest, now).await? {
            tracing::debug!(
                user_id = %credential.user_id,
                reason = "already_consumed",
                "OTP verification rejected"
            );
            return Err(AuthError::InvalidOtp);
        }

        let claims = SessionClaims::new(
            credential.user_id,
            credential.email.as_str(),
            now,
            self.config.session_ttl()?,
        );
        let token = self.signer.sign(&claims)?;

        tracing::info!(user_id = %credential.user_id, "User signed in");

        Ok(VerifyOtpOutput {
            token,
            user_id: claims.user_id,
            email: claims.email,
            expires_at: claims.expires_at,
        })
    }
}

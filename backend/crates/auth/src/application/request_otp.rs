//! Request OTP Use Case
//!
//! Issues a fresh login code for an email and mails it.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use platform::mail::Mailer;

use crate::application::config::AuthConfig;
use crate::application::otp_mail::build_otp_mail;
use crate::domain::entity::credential::Credential;
use crate::domain::repository::CredentialRepository;
use crate::domain::value_object::{email::Email, otp_code::OtpCode};
use crate::error::AuthResult;

/// Request OTP input
pub struct RequestOtpInput {
    pub email: String,
}

/// Request OTP output
#[derive(Debug, Clone)]
pub struct RequestOtpOutput {
    pub email: String,
    pub expires_at: DateTime<Utc>,
}

/// Request OTP use case
pub struct RequestOtpUseCase<R, M>
where
    R: CredentialRepository,
    M: Mailer,
{
    repo: Arc<R>,
    mailer: Arc<M>,
    config: Arc<AuthConfig>,
}

impl<R, M> RequestOtpUseCase<R, M>
where
    R: CredentialRepository,
    M: Mailer,
{
    pub fn new(repo: Arc<R>, mailer: Arc<M>, config: Arc<AuthConfig>) -> Self {
        Self {
            repo,
            mailer,
            config,
        }
    }

    pub async fn execute(&self, input: RequestOtpInput) -> AuthResult<RequestOtpOutput> {
        // Reject before touching storage or SMTP
        let email = Email::new(input.email)?;
        let ttl = self.config.otp_ttl()?;
        let now = Utc::now();

        let mut credential = match self.repo.find_by_email(&email).await? {
            Some(credential) => credential,
            None => Credential::new(email.clone(), now),
        };

        let code = OtpCode::generate();
        let expires_at = credential.issue_otp(&code, now, ttl);
        let mail = build_otp_mail(&email, &code, &self.config)?;

        self.repo.save(&credential).await?;
        self.mailer.send(&mail).await?;

        tracing::info!(
            user_id = %credential.user_id,
            expires_at = %expires_at,
            "OTP issued"
        );

        Ok(RequestOtpOutput {
            email: email.into_db(),
            expires_at,
        })
    }
}

//! Credential Entity
//!
//! One record per login email. Created lazily on the first OTP request,
//! never deleted by the login flow.
//!
//! State machine:
//! - no pending code --issue--> code pending
//! - code pending --issue--> code pending (previous code discarded)
//! - code pending --verify ok--> verified, no pending code
//! - any --verify failure--> unchanged

use chrono::{DateTime, Duration, Utc};

use crate::domain::value_object::{
    UserId,
    email::Email,
    otp_code::{OtpCode, OtpDigest},
};

/// Pending one-time code. Code and expiry exist together or not at all.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OtpChallenge {
    None,
    Pending {
        digest: OtpDigest,
        expires_at: DateTime<Utc>,
    },
}

/// Why a submitted code was not accepted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OtpRejection {
    NoPendingCode,
    Expired,
    Mismatch,
}

/// Credential entity
#[derive(Debug, Clone)]
pub struct Credential {
    /// Stable identity carried in session tokens
    pub user_id: UserId,
    pub email: Email,
    /// Set on the first successful verification, never cleared
    pub is_verified: bool,
    pub challenge: OtpChallenge,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Credential {
    /// Fresh, unverified credential with no pending code
    pub fn new(email: Email, now: DateTime<Utc>) -> Self {
        Self {
            user_id: UserId::new(),
            email,
            is_verified: false,
            challenge: OtpChallenge::None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Replace any pending code with `code`, valid for `ttl` from `now`.
    /// Returns the new expiry.
    pub fn issue_otp(&mut self, code: &OtpCode, now: DateTime<Utc>, ttl: Duration) -> DateTime<Utc> {
        let expires_at = now + ttl;
        self.challenge = OtpChallenge::Pending {
            digest: code.digest(),
            expires_at,
        };
        self.updated_at = now;
        expires_at
    }

    /// Consume the pending code if `submitted` matches and has not expired.
    ///
    /// Expiry is checked before the code itself, so an expired challenge
    /// reports `Expired` whatever was submitted. On rejection nothing changes.
    pub fn verify_otp(&mut self, submitted: &str, now: DateTime<Utc>) -> Result<(), OtpRejection> {
        let OtpChallenge::Pending { digest, expires_at } = &self.challenge else {
            return Err(OtpRejection::NoPendingCode);
        };

        if now > *expires_at {
            return Err(OtpRejection::Expired);
        }

        if !digest.matches(submitted) {
            return Err(OtpRejection::Mismatch);
        }

        self.challenge = OtpChallenge::None;
        self.is_verified = true;
        self.updated_at = now;
        Ok(())
    }

    pub fn has_pending_code(&self) -> bool {
        matches!(self.challenge, OtpChallenge::Pending { .. })
    }

    pub fn pending_expiry(&self) -> Option<DateTime<Utc>> {
        match &self.challenge {
            OtpChallenge::Pending { expires_at, .. } => Some(*expires_at),
            OtpChallenge::None => None,
        }
    }
}

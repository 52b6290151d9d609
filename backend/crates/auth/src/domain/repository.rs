//! Repository Traits
//!
//! Interfaces for data persistence. Implementation is in infrastructure layer.

use chrono::{DateTime, Utc};

use crate::domain::entity::credential::Credential;
use crate::domain::value_object::{email::Email, otp_code::OtpDigest};
use crate::error::AuthResult;

/// Credential repository trait
#[trait_variant::make(CredentialRepository: Send)]
pub trait LocalCredentialRepository {
    /// Find a credential by its exact email
    async fn find_by_email(&self, email: &Email) -> AuthResult<Option<Credential>>;

    /// Insert or update by email. An existing record keeps its `user_id`
    /// and `created_at`; concurrent saves are last-writer-wins.
    async fn save(&self, credential: &Credential) -> AuthResult<()>;

    /// Clear the pending code and mark the address verified, but only while
    /// the stored code still equals `digest` and has not expired at `now`.
    /// Returns `false` when another request already consumed or replaced it.
    async fn consume(&self, email: &Email, digest: &OtpDigest, now: DateTime<Utc>) -> AuthResult<bool>;
}

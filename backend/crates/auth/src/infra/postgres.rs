//! PostgreSQL Repository Implementations

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::entity::credential::{Credential, OtpChallenge};
use crate::domain::repository::CredentialRepository;
use crate::domain::value_object::{UserId, email::Email, otp_code::OtpDigest};
use crate::error::{AuthError, AuthResult};

/// PostgreSQL-backed credential repository
#[derive(Clone)]
pub struct PgCredentialRepository {
    pool: PgPool,
}

impl PgCredentialRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

impl CredentialRepository for PgCredentialRepository {
    async fn find_by_email(&self, email: &Email) -> AuthResult<Option<Credential>> {
        let row = sqlx::query_as::<_, CredentialRow>(
            r#"
            SELECT
                user_id,
                email,
                otp_hash,
                otp_expires_at,
                is_verified,
                created_at,
                updated_at
            FROM credentials
            WHERE email = $1
            "#,
        )
        .bind(email.as_str())
        .fetch_optional(&self.pool)
        .await?;

        row.map(|r| r.into_credential()).transpose()
    }

    async fn save(&self, credential: &Credential) -> AuthResult<()> {
        let (otp_hash, otp_expires_at) = match &credential.challenge {
            OtpChallenge::Pending { digest, expires_at } => {
                (Some(digest.as_bytes().to_vec()), Some(*expires_at))
            }
            OtpChallenge::None => (None, None),
        };

        sqlx::query(
            r#"
            INSERT INTO credentials (
                user_id,
                email,
                otp_hash,
                otp_expires_at,
                is_verified,
                created_at,
                updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7)
            ON CONFLICT (email) DO UPDATE SET
                otp_hash = EXCLUDED.otp_hash,
                otp_expires_at = EXCLUDED.otp_expires_at,
                is_verified = EXCLUDED.is_verified,
                updated_at = EXCLUDED.updated_at
            "#,
        )
        .bind(credential.user_id.as_uuid())
        .bind(credential.email.as_str())
        .bind(otp_hash)
        .bind(otp_expires_at)
        .bind(credential.is_verified)
        .bind(credential.created_at)
        .bind(credential.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn consume(&self, email: &Email, digest: &OtpDigest, now: DateTime<Utc>) -> AuthResult<bool> {
        let consumed = sqlx::query_scalar::<_, Uuid>(
            r#"
            UPDATE credentials SET
                otp_hash = NULL,
                otp_expires_at = NULL,
                is_verified = TRUE,
                updated_at = $3
            WHERE email = $1
              AND otp_hash = $2
              AND otp_expires_at >= $3
            RETURNING user_id
            "#,
        )
        .bind(email.as_str())
        .bind(digest.as_bytes())
        .bind(now)
        .fetch_optional(&self.pool)
        .await?;

        Ok(consumed.is_some())
    }
}

// ============================================================================
// Row Types
// ============================================================================

#[derive(sqlx::FromRow)]
struct CredentialRow {
    user_id: Uuid,
    email: String,
    otp_hash: Option<Vec<u8>>,
    otp_expires_at: Option<DateTime<Utc>>,
    is_verified: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl CredentialRow {
    fn into_credential(self) -> AuthResult<Credential> {
        let challenge = match (self.otp_hash, self.otp_expires_at) {
            (Some(hash), Some(expires_at)) => OtpChallenge::Pending {
                digest: OtpDigest::from_db(hash)?,
                expires_at,
            },
            (None, None) => OtpChallenge::None,
            _ => {
                return Err(AuthError::Internal(format!(
                    "Credential {} has a half-set OTP challenge",
                    self.user_id
                )));
            }
        };

        Ok(Credential {
            user_id: UserId::from_uuid(self.user_id),
            email: Email::from_db(self.email),
            is_verified: self.is_verified,
            challenge,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

//! JWT session tokens (HS256)

use chrono::{DateTime, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::session::{SessionClaims, SessionSigner};
use crate::domain::value_object::UserId;
use crate::error::{AuthError, AuthResult};

/// Wire format of the token payload
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct JwtClaims {
    user_id: Uuid,
    email: String,
    iat: i64,
    exp: i64,
}

/// HMAC-SHA256 signer with a single shared secret
#[derive(Clone)]
pub struct JwtSessionSigner {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl JwtSessionSigner {
    pub fn new(secret: &[u8]) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp"]);

        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            validation,
        }
    }
}

impl SessionSigner for JwtSessionSigner {
    fn sign(&self, claims: &SessionClaims) -> AuthResult<String> {
        let payload = JwtClaims {
            user_id: claims.user_id.into_uuid(),
            email: claims.email.clone(),
            iat: claims.issued_at.timestamp(),
            exp: claims.expires_at.timestamp(),
        };

        Ok(encode(&Header::new(Algorithm::HS256), &payload, &self.encoding_key)?)
    }

    fn verify(&self, token: &str) -> AuthResult<SessionClaims> {
        let data = decode::<JwtClaims>(token, &self.decoding_key, &self.validation).map_err(|e| {
            tracing::debug!(error = %e, "Session token rejected");
            AuthError::SessionInvalid
        })?;

        let claims = data.claims;
        let issued_at = DateTime::<Utc>::from_timestamp(claims.iat, 0).ok_or(AuthError::SessionInvalid)?;
        let expires_at = DateTime::<Utc>::from_timestamp(claims.exp, 0).ok_or(AuthError::SessionInvalid)?;

        Ok(SessionClaims {
            user_id: UserId::from_uuid(claims.user_id),
            email: claims.email,
            issued_at,
            expires_at,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn claims(now: DateTime<Utc>, ttl: Duration) -> SessionClaims {
        SessionClaims::new(UserId::new(), "seller@example.com", now, ttl)
    }

    #[test]
    fn test_sign_and_verify() {
        let signer = JwtSessionSigner::new(b"test-secret");
        let now = DateTime::<Utc>::from_timestamp(Utc::now().timestamp(), 0).unwrap();
        let original = claims(now, Duration::days(7));

        let token = signer.sign(&original).unwrap();
        let verified = signer.verify(&token).unwrap();

        assert_eq!(verified, original);
        assert_eq!(verified.expires_at - verified.issued_at, Duration::days(7));
    }

    #[test]
    fn test_payload_uses_camel_case_user_id() {
        let signer = JwtSessionSigner::new(b"test-secret");
        let token = signer.sign(&claims(Utc::now(), Duration::days(7))).unwrap();

        let raw = decode::<serde_json::Value>(&token, &signer.decoding_key, &signer.validation)
            .unwrap()
            .claims;
        assert!(raw.get("userId").is_some());
        assert_eq!(raw["email"], "seller@example.com");
    }

    #[test]
    fn test_rejects_other_secret() {
        let token = JwtSessionSigner::new(b"secret-a")
            .sign(&claims(Utc::now(), Duration::days(7)))
            .unwrap();

        let err = JwtSessionSigner::new(b"secret-b").verify(&token).unwrap_err();
        assert!(matches!(err, AuthError::SessionInvalid));
    }

    #[test]
    fn test_rejects_expired_token() {
        let signer = JwtSessionSigner::new(b"test-secret");
        let issued = Utc::now() - Duration::days(8);
        let token = signer.sign(&claims(issued, Duration::days(7))).unwrap();

        assert!(matches!(signer.verify(&token), Err(AuthError::SessionInvalid)));
    }

    #[test]
    fn test_rejects_garbage() {
        let signer = JwtSessionSigner::new(b"test-secret");
        assert!(signer.verify("").is_err());
        assert!(signer.verify("not.a.token").is_err());
    }
}

//! Auth Error Types
//!
//! Auth-specific variants that integrate with the unified
//! `kernel::error::AppError` system. Server-side variants carry their
//! source for logging only; the response body stays generic.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kernel::error::{
    app_error::AppError,
    conversions::{GENERIC_FAILURE_MESSAGE, sqlx_error_kind},
    kind::ErrorKind,
};
use platform::mail::MailError;
use thiserror::Error;

/// Auth-specific result type alias
pub type AuthResult<T> = Result<T, AuthError>;

/// Auth-specific error variants
#[derive(Debug, Error)]
pub enum AuthError {
    /// Email missing or malformed
    #[error("Valid email is required")]
    InvalidEmail,

    /// Verify request without email or code
    #[error("Email and OTP are required")]
    MissingFields,

    /// Unknown email, no pending code, or wrong code
    #[error("Invalid OTP")]
    InvalidOtp,

    /// Correct or not, the pending code is past its expiry
    #[error("OTP has expired")]
    OtpExpired,

    /// Missing, malformed, forged or expired session token
    #[error("Not authorized")]
    SessionInvalid,

    /// SMTP delivery failed
    #[error("Failed to send OTP: {0}")]
    EmailDelivery(#[from] MailError),

    /// Email template rendering failed
    #[error("Email template error: {0}")]
    Template(#[from] askama::Error),

    /// Token signing failed
    #[error("Token error: {0}")]
    Token(#[from] jsonwebtoken::errors::Error),

    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AuthError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        StatusCode::from_u16(self.kind().status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }

    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            AuthError::InvalidEmail | AuthError::MissingFields => ErrorKind::BadRequest,
            AuthError::InvalidOtp | AuthError::OtpExpired | AuthError::SessionInvalid => {
                ErrorKind::Unauthorized
            }
            AuthError::Database(e) => sqlx_error_kind(e),
            AuthError::EmailDelivery(_)
            | AuthError::Template(_)
            | AuthError::Token(_)
            | AuthError::Internal(_) => ErrorKind::InternalServerError,
        }
    }

    /// Convert to AppError
    pub fn to_app_error(&self) -> AppError {
        let message = match self {
            AuthError::EmailDelivery(_) | AuthError::Template(_) => "Failed to send OTP".to_string(),
            AuthError::Database(_) => GENERIC_FAILURE_MESSAGE.to_string(),
            _ if self.kind().is_server_error() => GENERIC_FAILURE_MESSAGE.to_string(),
            _ => self.to_string(),
        };
        let error = AppError::new(self.kind(), message);
        match self {
            AuthError::OtpExpired => error.with_action("Request a new code"),
            AuthError::EmailDelivery(_) => error.with_action("Try again in a moment"),
            _ => error,
        }
    }

    /// Log the error with appropriate level
    fn log(&self) {
        match self {
            AuthError::Database(e) => {
                tracing::error!(error = %e, "Auth database error");
            }
            AuthError::EmailDelivery(e) => {
                tracing::error!(error = %e, "OTP email delivery failed");
            }
            AuthError::Template(e) => {
                tracing::error!(error = %e, "OTP email rendering failed");
            }
            AuthError::Token(e) => {
                tracing::error!(error = %e, "Session token signing failed");
            }
            AuthError::Internal(msg) => {
                tracing::error!(message = %msg, "Auth internal error");
            }
            AuthError::InvalidOtp | AuthError::OtpExpired => {
                tracing::warn!(error = %self, "Rejected OTP verification");
            }
            _ => {
                tracing::debug!(error = %self, "Auth error");
            }
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        self.log();
        self.to_app_error().into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_errors_keep_their_message() {
        let cases = [
            (AuthError::InvalidEmail, 400, "Valid email is required"),
            (AuthError::MissingFields, 400, "Email and OTP are required"),
            (AuthError::InvalidOtp, 401, "Invalid OTP"),
            (AuthError::OtpExpired, 401, "OTP has expired"),
            (AuthError::SessionInvalid, 401, "Not authorized"),
        ];

        for (err, status, message) in cases {
            let app = err.to_app_error();
            assert_eq!(app.status_code(), status);
            assert_eq!(app.message(), message);
        }
    }

    #[test]
    fn test_server_errors_are_opaque() {
        let app = AuthError::Internal("row decode failed: otp_hash".to_string()).to_app_error();
        assert_eq!(app.status_code(), 500);
        assert_eq!(app.message(), GENERIC_FAILURE_MESSAGE);

        let app = AuthError::EmailDelivery(MailError::InvalidAddress("x".to_string())).to_app_error();
        assert_eq!(app.status_code(), 500);
        assert_eq!(app.message(), "Failed to send OTP");
        assert_eq!(app.action(), Some("Try again in a moment"));
    }

    #[test]
    fn test_expired_code_suggests_new_one() {
        let app = AuthError::OtpExpired.to_app_error();
        assert_eq!(app.action(), Some("Request a new code"));
        assert!(AuthError::InvalidOtp.to_app_error().action().is_none());
    }

    #[test]
    fn test_pool_exhaustion_is_service_unavailable() {
        let err = AuthError::Database(sqlx::Error::PoolTimedOut);
        assert_eq!(err.status_code(), StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(err.to_app_error().message(), GENERIC_FAILURE_MESSAGE);
    }
}

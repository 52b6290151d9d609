//! Error conversions
//!
//! `From` impls into [`AppError`] and the axum response rendering.

use super::app_error::AppError;
#[cfg(any(feature = "sqlx", test))]
use super::kind::ErrorKind;

/// Generic text for any failure the user cannot act on.
pub const GENERIC_FAILURE_MESSAGE: &str = "Something went wrong, please try again";

// ============================================================================
// SQLx conversions (feature-gated)
// ============================================================================

/// Classify a database error without consuming it.
#[cfg(feature = "sqlx")]
pub fn sqlx_error_kind(err: &sqlx::Error) -> ErrorKind {
    match err {
        sqlx::Error::RowNotFound => ErrorKind::NotFound,
        sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed | sqlx::Error::Io(_) => {
            ErrorKind::ServiceUnavailable
        }
        sqlx::Error::Database(db_err) => match db_err.code().as_deref() {
            // https://www.postgresql.org/docs/current/errcodes-appendix.html
            Some("23505") => ErrorKind::Conflict,
            Some("23502" | "23514") => ErrorKind::BadRequest,
            Some("53000" | "53100" | "53200" | "53300" | "57P01" | "57P03") => {
                ErrorKind::ServiceUnavailable
            }
            _ => ErrorKind::InternalServerError,
        },
        _ => ErrorKind::InternalServerError,
    }
}

#[cfg(feature = "sqlx")]
impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        let kind = sqlx_error_kind(&err);
        let message = match kind {
            ErrorKind::NotFound => "Record not found",
            ErrorKind::Conflict => "Duplicate record",
            ErrorKind::BadRequest => "Invalid record",
            _ => GENERIC_FAILURE_MESSAGE,
        };
        AppError::new(kind, message).with_source(err)
    }
}

// ============================================================================
// Axum conversions (feature-gated)
// ============================================================================

/// JSON body rendered for every error response.
#[derive(Debug, serde::Serialize)]
pub struct ErrorBody<'a> {
    pub status: u16,
    pub title: &'static str,
    pub message: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub action: Option<&'a str>,
}

impl AppError {
    pub fn body(&self) -> ErrorBody<'_> {
        ErrorBody {
            status: self.status_code(),
            title: self.kind().title(),
            message: self.message(),
            action: self.action(),
        }
    }
}

#[cfg(feature = "axum")]
impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        use axum::Json;
        use axum::http::StatusCode;

        let status =
            StatusCode::from_u16(self.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        (status, Json(self.body())).into_response()
    }
}

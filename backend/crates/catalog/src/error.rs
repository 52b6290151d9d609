//! Catalog Error Types

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kernel::error::{
    app_error::AppError,
    conversions::{GENERIC_FAILURE_MESSAGE, sqlx_error_kind},
    kind::ErrorKind,
};
use platform::media::MediaError;
use thiserror::Error;

/// Catalog-specific result type alias
pub type CatalogResult<T> = Result<T, CatalogError>;

/// Catalog-specific error variants
#[derive(Debug, Error)]
pub enum CatalogError {
    /// A required field is absent or blank on create
    #[error("All required fields must be provided")]
    MissingFields,

    /// A field violates a product rule; the message names it
    #[error("{0}")]
    Validation(String),

    /// Image payload is not a usable data URI
    #[error("Invalid image: {0}")]
    InvalidImage(MediaError),

    /// Unknown id, or owned by someone else
    #[error("Product not found")]
    NotFound,

    /// Image host failed or refused the upload
    #[error("Image upload failed: {0}")]
    ImageUpload(MediaError),

    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl CatalogError {
    pub fn validation(message: impl Into<String>) -> Self {
        CatalogError::Validation(message.into())
    }

    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        StatusCode::from_u16(self.kind().status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }

    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            CatalogError::MissingFields
            | CatalogError::Validation(_)
            | CatalogError::InvalidImage(_) => ErrorKind::BadRequest,
            CatalogError::NotFound => ErrorKind::NotFound,
            CatalogError::ImageUpload(_) => ErrorKind::BadGateway,
            CatalogError::Database(e) => sqlx_error_kind(e),
            CatalogError::Internal(_) => ErrorKind::InternalServerError,
        }
    }

    /// Convert to AppError
    pub fn to_app_error(&self) -> AppError {
        let message = match self {
            CatalogError::InvalidImage(_) => "Product image must be a base64 image data URI".to_string(),
            CatalogError::ImageUpload(_) => "Failed to upload image".to_string(),
            CatalogError::Database(_) | CatalogError::Internal(_) => {
                GENERIC_FAILURE_MESSAGE.to_string()
            }
            _ => self.to_string(),
        };
        let error = AppError::new(self.kind(), message);
        match self {
            CatalogError::InvalidImage(_) => {
                error.with_action("Attach the photo as a data:image/...;base64 URI")
            }
            CatalogError::ImageUpload(_) => error.with_action("Try again in a moment"),
            _ => error,
        }
    }

    /// Log the error with appropriate level
    fn log(&self) {
        match self {
            CatalogError::Database(e) => {
                tracing::error!(error = %e, "Catalog database error");
            }
            CatalogError::ImageUpload(e) => {
                tracing::error!(error = %e, "Image upload failed");
            }
            CatalogError::Internal(msg) => {
                tracing::error!(message = %msg, "Catalog internal error");
            }
            _ => {
                tracing::debug!(error = %self, "Catalog error");
            }
        }
    }
}

impl IntoResponse for CatalogError {
    fn into_response(self) -> Response {
        self.log();
        self.to_app_error().into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_status_codes() {
        assert_eq!(CatalogError::MissingFields.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(
            CatalogError::validation("Valid MRP is required").status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(CatalogError::NotFound.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(
            CatalogError::ImageUpload(MediaError::Rejected {
                status: 401,
                message: "Invalid Signature".to_string()
            })
            .status_code(),
            StatusCode::BAD_GATEWAY
        );
        assert_eq!(
            CatalogError::Internal("boom".to_string()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_messages() {
        assert_eq!(
            CatalogError::MissingFields.to_app_error().message(),
            "All required fields must be provided"
        );
        assert_eq!(CatalogError::NotFound.to_app_error().message(), "Product not found");
        assert_eq!(
            CatalogError::validation("Selling price cannot be greater than MRP")
                .to_app_error()
                .message(),
            "Selling price cannot be greater than MRP"
        );
        assert_eq!(
            CatalogError::Internal("row decode".to_string()).to_app_error().message(),
            GENERIC_FAILURE_MESSAGE
        );
    }
}

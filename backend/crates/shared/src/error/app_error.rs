//! Application Error
//!
//! [`AppError`] is the single error type that crosses the HTTP boundary.
//! Domain crates keep their own `thiserror` enums and convert into this one
//! right before rendering.

use std::borrow::Cow;
use std::error::Error;
use std::fmt;

use super::kind::ErrorKind;

type Text = Cow<'static, str>;
type Source = Box<dyn Error + Send + Sync + 'static>;

/// Unified application error.
///
/// Only `kind`, `message` and `action` reach the client. `source` is kept
/// for logs.
///
/// ```rust
/// use kernel::error::{app_error::AppError, kind::ErrorKind};
///
/// let err = AppError::new(ErrorKind::Unauthorized, "OTP has expired")
///     .with_action("Request a new code");
/// assert_eq!(err.status_code(), 401);
/// assert_eq!(err.action(), Some("Request a new code"));
/// ```
pub struct AppError {
    kind: ErrorKind,
    message: Text,
    action: Option<Text>,
    source: Option<Source>,
}

pub type AppResult<T> = Result<T, AppError>;

impl AppError {
    pub fn new(kind: ErrorKind, message: impl Into<Text>) -> Self {
        Self {
            kind,
            message: message.into(),
            action: None,
            source: None,
        }
    }

    /// Rejection used by extractors that need a session
    pub fn unauthorized(message: impl Into<Text>) -> Self {
        Self::new(ErrorKind::Unauthorized, message)
    }

    /// Hint telling the user what to do next
    pub fn with_action(mut self, action: impl Into<Text>) -> Self {
        self.action = Some(action.into());
        self
    }

    /// Underlying cause. Never rendered.
    pub fn with_source<E>(mut self, source: E) -> Self
    where
        E: Error + Send + Sync + 'static,
    {
        self.source = Some(Box::new(source));
        self
    }

    #[inline]
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    #[inline]
    pub fn status_code(&self) -> u16 {
        self.kind.status_code()
    }

    #[inline]
    pub fn message(&self) -> &str {
        &self.message
    }

    #[inline]
    pub fn action(&self) -> Option<&str> {
        self.action.as_deref()
    }
}

impl fmt::Debug for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppError")
            .field("kind", &self.kind)
            .field("message", &self.message)
            .field("action", &self.action)
            .field("source", &self.source)
            .finish()
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.action {
            Some(action) => write!(f, "{}: {} ({action})", self.kind, self.message),
            None => write!(f, "{}: {}", self.kind, self.message),
        }
    }
}

impl Error for AppError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        self.source.as_deref().map(|e| e as &(dyn Error + 'static))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_error() {
        let err = AppError::new(ErrorKind::Unauthorized, "Invalid OTP");
        assert_eq!(err.kind(), ErrorKind::Unauthorized);
        assert_eq!(err.status_code(), 401);
        assert_eq!(err.message(), "Invalid OTP");
        assert!(err.action().is_none());
        assert_eq!(err.to_string(), "Unauthorized: Invalid OTP");
    }

    #[test]
    fn test_action_in_display() {
        let err = AppError::unauthorized("OTP has expired").with_action("Request a new code");
        assert_eq!(
            err.to_string(),
            "Unauthorized: OTP has expired (Request a new code)"
        );
    }

    #[test]
    fn test_source_is_kept() {
        let io_err = std::io::Error::other("smtp down");
        let err = AppError::new(ErrorKind::BadGateway, "Failed to send OTP").with_source(io_err);
        assert_eq!(err.source().map(|s| s.to_string()), Some("smtp down".to_string()));
    }
}

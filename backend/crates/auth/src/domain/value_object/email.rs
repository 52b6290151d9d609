//! Email Value Object
//!
//! The login identifier. Stored exactly as submitted: no trimming, no case
//! folding, so `User@Example.com` and `user@example.com` are different
//! credentials.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::{AuthError, AuthResult};

/// Maximum email length (per RFC 5321)
const EMAIL_MAX_LENGTH: usize = 254;

/// Email address value object
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Email(String);

impl Email {
    /// Create a new email with validation
    pub fn new(email: impl Into<String>) -> AuthResult<Self> {
        let email = email.into();

        if email.is_empty() || email.len() > EMAIL_MAX_LENGTH {
            return Err(AuthError::InvalidEmail);
        }

        if !Self::is_valid_format(&email) {
            return Err(AuthError::InvalidEmail);
        }

        Ok(Self(email))
    }

    /// `local@domain` where neither side contains whitespace or another `@`,
    /// and the domain has a dot with at least one character on each side.
    fn is_valid_format(email: &str) -> bool {
        if email.chars().any(char::is_whitespace) {
            return false;
        }

        let Some((local, domain)) = email.split_once('@') else {
            return false;
        };

        if local.is_empty() || domain.contains('@') {
            return false;
        }

        domain
            .char_indices()
            .any(|(i, c)| c == '.' && i > 0 && i + 1 < domain.len())
    }

    /// Create from database value (assumed already validated)
    pub fn from_db(email: impl Into<String>) -> Self {
        Self(email.into())
    }

    /// Get the email as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Convert to string for database storage
    pub fn into_db(self) -> String {
        self.0
    }
}

impl FromStr for Email {
    type Err = AuthError;

    fn from_str(s: &str) -> AuthResult<Self> {
        Email::new(s)
    }
}

impl std::fmt::Display for Email {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for Email {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_email_valid() {
        assert!(Email::new("user@example.com").is_ok());
        assert!(Email::new("user.name@example.co.jp").is_ok());
        assert!(Email::new("user+tag@example.com").is_ok());
        assert!(Email::new("a@b.c").is_ok());
        assert!(Email::new("a@b..c").is_ok());
    }

    #[test]
    fn test_email_invalid() {
        for input in [
            "",
            "not-an-email",
            "userexample.com",
            "user@",
            "@example.com",
            "user@@example.com",
            "user@exa@mple.com",
            "user@example",
            "user@.com",
            "user@example.",
            "user @example.com",
            " user@example.com",
            "user@example.com\n",
        ] {
            assert!(
                matches!(Email::new(input), Err(AuthError::InvalidEmail)),
                "{input:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_email_length_limit() {
        let domain = "@example.com";
        let local = "a".repeat(EMAIL_MAX_LENGTH - domain.len());
        assert!(Email::new(format!("{local}{domain}")).is_ok());
        assert!(Email::new(format!("a{local}{domain}")).is_err());
    }

    #[test]
    fn test_email_stored_verbatim() {
        let email = Email::new("User@Example.COM").unwrap();
        assert_eq!(email.as_str(), "User@Example.COM");
        assert_ne!(email, Email::new("user@example.com").unwrap());
    }
}

//! One-Time Password
//!
//! [`OtpCode`] is the plaintext code; it only lives long enough to be
//! mailed. [`OtpDigest`] is what gets persisted.

use std::fmt;

use platform::crypto::{constant_time_eq, sha256};
use rand::Rng;

use crate::error::{AuthError, AuthResult};

/// Six-digit numeric code, `100000..=999999`
#[derive(Clone, PartialEq, Eq)]
pub struct OtpCode(String);

impl OtpCode {
    pub const LENGTH: usize = 6;

    /// Generate a fresh code from the thread-local CSPRNG
    pub fn generate() -> Self {
        let code: u32 = rand::rng().random_range(100_000..1_000_000);
        Self(code.to_string())
    }

    #[cfg(test)]
    pub(crate) fn from_digits(digits: &str) -> Self {
        Self(digits.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn digest(&self) -> OtpDigest {
        OtpDigest::of(&self.0)
    }
}

impl fmt::Debug for OtpCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("OtpCode(******)")
    }
}

/// SHA-256 of a code
#[derive(Clone, PartialEq, Eq)]
pub struct OtpDigest([u8; 32]);

impl OtpDigest {
    pub fn of(code: &str) -> Self {
        Self(sha256(code.as_bytes()))
    }

    /// Restore from the database column
    pub fn from_db(bytes: Vec<u8>) -> AuthResult<Self> {
        let bytes: [u8; 32] = bytes
            .try_into()
            .map_err(|_| AuthError::Internal("Stored OTP digest has wrong length".to_string()))?;
        Ok(Self(bytes))
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Exact match against a submitted code, in constant time
    pub fn matches(&self, submitted: &str) -> bool {
        constant_time_eq(&sha256(submitted.as_bytes()), &self.0)
    }
}

impl fmt::Debug for OtpDigest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("OtpDigest(..)")
    }
}

//! Value Object Module

pub mod email;
pub mod otp_code;

/// Credentials are keyed by the shared user id so products can reference them
pub use kernel::id::UserId;

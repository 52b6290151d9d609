//! Application Layer
//!
//! Use cases and application services.

pub mod check_session;
pub mod config;
pub mod otp_mail;
pub mod request_otp;
pub mod verify_otp;

// Re-exports
pub use check_session::CheckSessionUseCase;
pub use config::AuthConfig;
pub use request_otp::{RequestOtpInput, RequestOtpOutput, RequestOtpUseCase};
pub use verify_otp::{VerifyOtpInput, VerifyOtpOutput, VerifyOtpUseCase};

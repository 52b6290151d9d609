//! Auth (Authentication) Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Credential entity, value objects, repository and signer traits
//! - `application/` - Use cases and application services
//! - `infra/` - Database and JWT implementations
//! - `presentation/` - HTTP handlers, DTOs, router, middleware
//!
//! ## Features
//! - Passwordless login: a 6-digit code is emailed, then exchanged for a session
//! - Stateless sessions: HS256 JWT in `Authorization: Bearer`, 7-day lifetime
//! - `require_session` middleware exposing the caller as `kernel::principal::Principal`
//!
//! ## Security Model
//! - Codes are stored as SHA-256 digests and compared in constant time
//! - A code is single use and expires after 10 minutes
//! - Unknown email, missing code and wrong code all answer "Invalid OTP"

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;


// Re-exports for convenience
pub use application::config::AuthConfig;
pub use error::{AuthError, AuthResult};
pub use infra::{jwt::JwtSessionSigner, postgres::PgCredentialRepository};
pub use presentation::middleware::{AuthMiddlewareState, require_session};
pub use presentation::router::auth_router;

// Re-export kernel error types for unified error handling
pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};

// Convenience re-exports
pub mod config {
    pub use crate::application::config::*;
}

pub mod models {
    pub use crate::domain::entity::credential::*;
    pub use crate::domain::value_object::*;
    pub use crate::presentation::dto::*;
}

pub mod router {
    pub use crate::presentation::router::*;
}

pub mod middleware {
    pub use crate::presentation::middleware::*;
}

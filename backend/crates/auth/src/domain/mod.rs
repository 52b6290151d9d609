//! Domain Layer
//!
//! Contains entities, value objects, and repository traits.

pub mod entity;
pub mod repository;
pub mod session;
pub mod value_object;

// Re-exports
pub use entity::credential::{Credential, OtpChallenge, OtpRejection};
pub use repository::CredentialRepository;
pub use session::{SessionClaims, SessionSigner};

//! Infrastructure Layer
//!
//! Database implementations and token signing.

pub mod jwt;
pub mod postgres;

pub use jwt::JwtSessionSigner;
pub use postgres::PgCredentialRepository;

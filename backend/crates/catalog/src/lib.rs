//! Catalog (Seller Products) Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Product entity, value objects, repository trait
//! - `application/` - Use cases
//! - `infra/` - PostgreSQL implementation
//! - `presentation/` - HTTP handlers, DTOs, router
//!
//! ## Features
//! - Product CRUD scoped to the calling seller
//! - Publish/unpublish toggle and listing filter
//! - Product photos uploaded to the image host from `data:` URIs
//!
//! Routes expect a `kernel::principal::Principal` in the request extensions;
//! mount the router behind the auth session middleware.

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;


// Re-exports for convenience
pub use application::config::CatalogConfig;
pub use error::{CatalogError, CatalogResult};
pub use infra::postgres::PgProductRepository;
pub use presentation::router::catalog_router;

pub mod models {
    pub use crate::domain::entity::product::*;
    pub use crate::domain::value_object::*;
    pub use crate::presentation::dto::*;
}

pub mod router {
    pub use crate::presentation::router::*;
}

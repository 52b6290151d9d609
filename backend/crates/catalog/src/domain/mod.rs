//! Domain Layer
//!
//! Contains entities, value objects, and repository traits.

pub mod entity;
pub mod repository;
pub mod value_object;

// Re-exports
pub use entity::product::{Product, ProductDetails, ProductFields, ProductImage};
pub use repository::{ProductFilter, ProductRepository};

//! Application Layer
//!
//! Product use cases.

pub mod config;
pub mod create_product;
pub mod delete_product;
pub mod get_products;
mod images;
pub mod update_product;

// Re-exports
pub use config::CatalogConfig;
pub use create_product::{CreateProductInput, CreateProductUseCase};
pub use delete_product::DeleteProductUseCase;
pub use get_products::{GetProductUseCase, ListProductsUseCase};
pub use update_product::{SetPublishedUseCase, UpdateProductInput, UpdateProductUseCase};

//! Repository Traits
//!
//! Every lookup is scoped by owner: a product that belongs to someone else
//! is indistinguishable from one that does not exist.

use crate::domain::entity::product::Product;
use crate::domain::value_object::{ProductId, UserId};
use crate::error::CatalogResult;

/// Listing filter
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ProductFilter {
    /// Only published (`Some(true)`) or unpublished (`Some(false)`) products
    pub is_published: Option<bool>,
}

/// Product repository trait
#[trait_variant::make(ProductRepository: Send)]
pub trait LocalProductRepository {
    /// Insert a new product
    async fn create(&self, product: &Product) -> CatalogResult<()>;

    /// Find a product by ID if it belongs to `owner`
    async fn find_for_owner(&self, id: &ProductId, owner: &UserId) -> CatalogResult<Option<Product>>;

    /// All of `owner`'s products matching `filter`, newest first
    async fn list_for_owner(&self, owner: &UserId, filter: ProductFilter) -> CatalogResult<Vec<Product>>;

    /// Overwrite a product. Returns false if it no longer exists for its owner.
    async fn update(&self, product: &Product) -> CatalogResult<bool>;

    /// Delete a product. Returns false if nothing was deleted.
    async fn delete(&self, id: &ProductId, owner: &UserId) -> CatalogResult<bool>;
}

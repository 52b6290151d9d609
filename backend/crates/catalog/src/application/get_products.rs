//! Product Query Use Cases

use std::sync::Arc;

use crate::domain::entity::product::Product;
use crate::domain::repository::{ProductFilter, ProductRepository};
use crate::domain::value_object::{ProductId, UserId};
use crate::error::{CatalogError, CatalogResult};

/// List the caller's products
pub struct ListProductsUseCase<R>
where
    R: ProductRepository,
{
    repo: Arc<R>,
}

impl<R> ListProductsUseCase<R>
where
    R: ProductRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn execute(&self, owner: UserId, filter: ProductFilter) -> CatalogResult<Vec<Product>> {
        self.repo.list_for_owner(&owner, filter).await
    }
}

/// Fetch one of the caller's products
pub struct GetProductUseCase<R>
where
    R: ProductRepository,
{
    repo: Arc<R>,
}

impl<R> GetProductUseCase<R>
where
    R: ProductRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn execute(&self, owner: UserId, id: ProductId) -> CatalogResult<Product> {
        self.repo
            .find_for_owner(&id, &owner)
            .await?
            .ok_or(CatalogError::NotFound)
    }
}

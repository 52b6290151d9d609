//! Delete Product Use Case

use std::sync::Arc;

use platform::media::ImageStore;

use crate::application::images::discard_image;
use crate::domain::repository::ProductRepository;
use crate::domain::value_object::{ProductId, UserId};
use crate::error::{CatalogError, CatalogResult};

/// Delete product use case
pub struct DeleteProductUseCase<R, I>
where
    R: ProductRepository,
    I: ImageStore,
{
    repo: Arc<R>,
    images: Arc<I>,
}

impl<R, I> DeleteProductUseCase<R, I>
where
    R: ProductRepository,
    I: ImageStore,
{
    pub fn new(repo: Arc<R>, images: Arc<I>) -> Self {
        Self { repo, images }
    }

    pub async fn execute(&self, owner: UserId, id: ProductId) -> CatalogResult<()> {
        let product = self
            .repo
            .find_for_owner(&id, &owner)
            .await?
            .ok_or(CatalogError::NotFound)?;

        // Row first so a product never points at a deleted image
        if !self.repo.delete(&id, &owner).await? {
            return Err(CatalogError::NotFound);
        }

        discard_image(self.images.as_ref(), &product.image.public_id, "deleted").await;

        tracing::info!(
            user_id = %owner,
            product_id = %id,
            "Product deleted"
        );

        Ok(())
    }
}

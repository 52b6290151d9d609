//! Update Product Use Cases
//!
//! Partial update and publish toggle.

use std::sync::Arc;

use chrono::Utc;
use platform::media::{ImageStore, is_data_uri};

use crate::application::config::CatalogConfig;
use crate::application::images::{discard_image, upload_data_uri};
use crate::domain::entity::product::{Product, ProductFields};
use crate::domain::repository::ProductRepository;
use crate::domain::value_object::{ProductId, UserId};
use crate::error::{CatalogError, CatalogResult};

/// Update product input. Absent fields keep their current value.
pub struct UpdateProductInput {
    pub fields: ProductFields,
    /// A `data:` URI replaces the image; anything else is ignored
    pub image: Option<String>,
    pub is_published: Option<bool>,
}

/// Update product use case
pub struct UpdateProductUseCase<R, I>
where
    R: ProductRepository,
    I: ImageStore,
{
    repo: Arc<R>,
    images: Arc<I>,
    config: Arc<CatalogConfig>,
}

impl<R, I> UpdateProductUseCase<R, I>
where
    R: ProductRepository,
    I: ImageStore,
{
    pub fn new(repo: Arc<R>, images: Arc<I>, config: Arc<CatalogConfig>) -> Self {
        Self {
            repo,
            images,
            config,
        }
    }

    pub async fn execute(
        &self,
        owner: UserId,
        id: ProductId,
        input: UpdateProductInput,
    ) -> CatalogResult<Product> {
        let mut product = self
            .repo
            .find_for_owner(&id, &owner)
            .await?
            .ok_or(CatalogError::NotFound)?;

        let now = Utc::now();
        let details = product.details.merge(input.fields)?;
        product.replace_details(details, now);

        if let Some(published) = input.is_published {
            product.set_published(published, now);
        }

        // Upload the replacement first; the old image goes only once the row points elsewhere
        let replaced = match input.image.as_deref().filter(|i| is_data_uri(i)) {
            Some(data_uri) => {
                let image =
                    upload_data_uri(self.images.as_ref(), data_uri, &self.config.image_folder).await?;
                Some(product.replace_image(image, now))
            }
            None => None,
        };

        let saved = self.repo.update(&product).await;
        if !matches!(saved, Ok(true)) && replaced.is_some() {
            discard_image(self.images.as_ref(), &product.image.public_id, "update_rollback").await;
        }
        if !saved? {
            return Err(CatalogError::NotFound);
        }

        let image_replaced = replaced.is_some();
        if let Some(old) = replaced {
            discard_image(self.images.as_ref(), &old.public_id, "replaced").await;
        }

        tracing::info!(
            user_id = %owner,
            product_id = %product.id,
            image_replaced,
            "Product updated"
        );

        Ok(product)
    }
}

/// Publish/unpublish use case
pub struct SetPublishedUseCase<R>
where
    R: ProductRepository,
{
    repo: Arc<R>,
}

impl<R> SetPublishedUseCase<R>
where
    R: ProductRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn execute(&self, owner: UserId, id: ProductId, is_published: bool) -> CatalogResult<Product> {
        let mut product = self
            .repo
            .find_for_owner(&id, &owner)
            .await?
            .ok_or(CatalogError::NotFound)?;

        product.set_published(is_published, Utc::now());

        if !self.repo.update(&product).await? {
            return Err(CatalogError::NotFound);
        }

        tracing::info!(
            user_id = %owner,
            product_id = %product.id,
            is_published,
            "Product visibility changed"
        );

        Ok(product)
    }
}

//! Create Product Use Case

use std::sync::Arc;

use chrono::Utc;
use platform::media::ImageStore;

use crate::application::config::CatalogConfig;
use crate::application::images::{discard_image, upload_data_uri};
use crate::domain::entity::product::{Product, ProductFields};
use crate::domain::repository::ProductRepository;
use crate::domain::value_object::UserId;
use crate::error::{CatalogError, CatalogResult};

/// Create product input
pub struct CreateProductInput {
    pub fields: ProductFields,
    /// `data:` URI of the product photo
    pub image: Option<String>,
    pub is_published: Option<bool>,
}

/// Create product use case
pub struct CreateProductUseCase<R, I>
where
    R: ProductRepository,
    I: ImageStore,
{
    repo: Arc<R>,
    images: Arc<I>,
    config: Arc<CatalogConfig>,
}

impl<R, I> CreateProductUseCase<R, I>
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

    pub async fn execute(&self, owner: UserId, input: CreateProductInput) -> CatalogResult<Product> {
        let image = input.image.filter(|i| !i.trim().is_empty());
        let (true, Some(image)) = (input.fields.is_complete(), image) else {
            return Err(CatalogError::MissingFields);
        };

        // Validate everything before the upload so a bad request costs nothing
        let details = input.fields.into_details()?;
        let image = upload_data_uri(self.images.as_ref(), &image, &self.config.image_folder).await?;

        let product = Product::new(
            owner,
            details,
            image,
            input.is_published.unwrap_or(false),
            Utc::now(),
        );

        if let Err(e) = self.repo.create(&product).await {
            discard_image(self.images.as_ref(), &product.image.public_id, "create_rollback").await;
            return Err(e);
        }

        tracing::info!(
            user_id = %owner,
            product_id = %product.id,
            "Product created"
        );

        Ok(product)
    }
}

//! Image host helpers shared by the product use cases

use platform::media::{ImageData, ImageStore};

use crate::domain::entity::product::ProductImage;
use crate::error::{CatalogError, CatalogResult};

/// Decode a data URI and upload it to `folder`
pub(crate) async fn upload_data_uri<I>(images: &I, data_uri: &str, folder: &str) -> CatalogResult<ProductImage>
where
    I: ImageStore,
{
    let image = ImageData::from_data_uri(data_uri).map_err(CatalogError::InvalidImage)?;
    let stored = images
        .upload(&image, folder)
        .await
        .map_err(CatalogError::ImageUpload)?;

    Ok(ProductImage {
        url: stored.url,
        public_id: stored.public_id,
    })
}

/// Best-effort removal; failures are logged and swallowed
pub(crate) async fn discard_image<I>(images: &I, public_id: &str, reason: &'static str)
where
    I: ImageStore,
{
    if let Err(e) = images.delete(public_id).await {
        tracing::warn!(
            error = %e,
            public_id = %public_id,
            reason,
            "Failed to delete hosted image"
        );
    }
}

//! Application Configuration

/// Catalog application configuration
#[derive(Debug, Clone)]
pub struct CatalogConfig {
    /// Image host folder for product photos
    pub image_folder: String,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            image_folder: "products".to_string(),
        }
    }
}

//! API DTOs (Data Transfer Objects)

use std::str::FromStr;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::entity::product::{Product, ProductFields};
use crate::domain::value_object::{ProductId, UserId, exchange::Exchange};
use crate::error::{CatalogError, CatalogResult};

// ============================================================================
// Requests
// ============================================================================

/// Product fields as sent by the seller form. Numbers may arrive as JSON
/// numbers or as strings; blank strings count as "not provided".
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProductRequest {
    pub name: Option<String>,
    pub category: Option<String>,
    pub brand_name: Option<String>,
    pub stock: Option<Value>,
    pub mrp: Option<Value>,
    pub price: Option<Value>,
    pub exchange: Option<String>,
    pub image: Option<String>,
    pub is_published: Option<bool>,
}

impl ProductRequest {
    /// Split into domain fields, image and publish flag
    pub fn into_parts(self) -> CatalogResult<(ProductFields, Option<String>, Option<bool>)> {
        let fields = ProductFields {
            name: self.name,
            category: self.category,
            brand_name: self.brand_name,
            stock: number_field(self.stock, "Valid stock quantity is required")?,
            mrp: number_field(self.mrp, "Valid MRP is required")?,
            price: number_field(self.price, "Valid price is required")?,
            exchange: self.exchange,
        };
        Ok((fields, self.image, self.is_published))
    }
}

/// Parse a numeric form value. `None` for absent, null or blank.
fn number_field(value: Option<Value>, message: &'static str) -> CatalogResult<Option<Decimal>> {
    let text = match value {
        None | Some(Value::Null) => return Ok(None),
        Some(Value::Number(n)) => n.to_string(),
        Some(Value::String(s)) if s.trim().is_empty() => return Ok(None),
        Some(Value::String(s)) => s.trim().to_string(),
        Some(_) => return Err(CatalogError::validation(message)),
    };

    Decimal::from_str(&text)
        .or_else(|_| Decimal::from_scientific(&text))
        .map(Some)
        .map_err(|_| CatalogError::validation(message))
}

/// Publish toggle request
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PublishRequest {
    pub is_published: bool,
}

/// Listing query string
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListProductsQuery {
    pub is_published: Option<String>,
}

impl ListProductsQuery {
    /// `"true"` selects published products; any other value unpublished ones
    pub fn published_filter(&self) -> Option<bool> {
        self.is_published.as_deref().map(|v| v == "true")
    }
}

// ============================================================================
// Responses
// ============================================================================

/// Product as exposed to the client
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductResponse {
    pub id: ProductId,
    pub name: String,
    pub category: String,
    pub brand_name: String,
    pub stock: u32,
    #[serde(with = "rust_decimal::serde::float")]
    pub mrp: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    pub exchange: Exchange,
    /// Hosted image URL
    pub image: String,
    pub image_public_id: String,
    pub is_published: bool,
    pub user_id: UserId,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Product> for ProductResponse {
    fn from(product: Product) -> Self {
        Self {
            id: product.id,
            name: product.details.name,
            category: product.details.category,
            brand_name: product.details.brand_name,
            stock: product.details.stock,
            mrp: product.details.mrp,
            price: product.details.price,
            exchange: product.details.exchange,
            image: product.image.url,
            image_public_id: product.image.public_id,
            is_published: product.is_published,
            user_id: product.owner_id,
            created_at: product.created_at,
            updated_at: product.updated_at,
        }
    }
}

/// Delete response
#[derive(Debug, Clone, Serialize)]
pub struct DeleteProductResponse {
    pub message: String,
}

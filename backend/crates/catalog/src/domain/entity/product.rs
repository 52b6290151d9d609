//! Product Entity
//!
//! A product always belongs to exactly one seller and always has a hosted
//! image. Field rules live in [`ProductDetails::validate`].

use chrono::{DateTime, Utc};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};

use crate::domain::value_object::{ProductId, UserId, exchange::Exchange};
use crate::error::{CatalogError, CatalogResult};

/// Prices are stored as NUMERIC(12,2)
const AMOUNT_SCALE: u32 = 2;

fn max_amount() -> Decimal {
    Decimal::new(9_999_999_999_99, AMOUNT_SCALE)
}

/// Hosted product image
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductImage {
    pub url: String,
    /// Image host id, needed to delete the file
    pub public_id: String,
}

/// Validated descriptive fields
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductDetails {
    pub name: String,
    pub category: String,
    pub brand_name: String,
    pub stock: u32,
    /// Maximum retail price
    pub mrp: Decimal,
    /// Selling price, never above `mrp`
    pub price: Decimal,
    pub exchange: Exchange,
}

/// Field values as submitted. `None` means "not provided".
#[derive(Debug, Clone, Default)]
pub struct ProductFields {
    pub name: Option<String>,
    pub category: Option<String>,
    pub brand_name: Option<String>,
    pub stock: Option<Decimal>,
    pub mrp: Option<Decimal>,
    pub price: Option<Decimal>,
    pub exchange: Option<String>,
}

fn present(value: &Option<String>) -> bool {
    value.as_deref().is_some_and(|v| !v.trim().is_empty())
}

impl ProductFields {
    /// Every field a new product needs is present. `exchange` is optional.
    pub fn is_complete(&self) -> bool {
        present(&self.name)
            && present(&self.category)
            && present(&self.brand_name)
            && self.stock.is_some()
            && self.mrp.is_some()
            && self.price.is_some()
    }

    /// Validate a full set of fields for a new product
    pub fn into_details(self) -> CatalogResult<ProductDetails> {
        let (Some(name), Some(category), Some(brand_name), Some(stock), Some(mrp), Some(price)) = (
            self.name,
            self.category,
            self.brand_name,
            self.stock,
            self.mrp,
            self.price,
        ) else {
            return Err(CatalogError::MissingFields);
        };

        let exchange = match self.exchange.as_deref() {
            Some(code) if !code.trim().is_empty() => code.parse()?,
            _ => Exchange::default(),
        };

        ProductDetails::validate(&name, &category, &brand_name, stock, mrp, price, exchange)
    }
}

impl ProductDetails {
    /// Apply the product rules. Text is trimmed, amounts are rounded to
    /// two decimal places before checking.
    pub fn validate(
        name: &str,
        category: &str,
        brand_name: &str,
        stock: Decimal,
        mrp: Decimal,
        price: Decimal,
        exchange: Exchange,
    ) -> CatalogResult<Self> {
        let name = name.trim();
        if name.is_empty() {
            return Err(CatalogError::validation("Product name is required"));
        }

        let category = category.trim();
        if category.is_empty() {
            return Err(CatalogError::validation("Category is required"));
        }

        let stock = Self::validate_stock(stock)
            .ok_or_else(|| CatalogError::validation("Valid stock quantity is required"))?;

        let mrp = Self::validate_amount(mrp)
            .ok_or_else(|| CatalogError::validation("Valid MRP is required"))?;

        let price = Self::validate_amount(price)
            .ok_or_else(|| CatalogError::validation("Valid price is required"))?;

        let brand_name = brand_name.trim();
        if brand_name.is_empty() {
            return Err(CatalogError::validation("Brand name is required"));
        }

        if price > mrp {
            return Err(CatalogError::validation(
                "Selling price cannot be greater than MRP",
            ));
        }

        Ok(Self {
            name: name.to_string(),
            category: category.to_string(),
            brand_name: brand_name.to_string(),
            stock,
            mrp,
            price,
            exchange,
        })
    }

    /// Positive whole number that fits a Postgres INTEGER
    fn validate_stock(stock: Decimal) -> Option<u32> {
        if !stock.fract().is_zero() || stock <= Decimal::ZERO {
            return None;
        }
        stock.to_u32().filter(|s| *s <= i32::MAX as u32)
    }

    fn validate_amount(amount: Decimal) -> Option<Decimal> {
        let amount =
            amount.round_dp_with_strategy(AMOUNT_SCALE, RoundingStrategy::MidpointAwayFromZero);
        (amount > Decimal::ZERO && amount <= max_amount()).then_some(amount)
    }

    /// Overlay provided fields onto these details and re-validate the result
    pub fn merge(&self, patch: ProductFields) -> CatalogResult<Self> {
        // A blank code keeps the stored value, like an absent one
        let exchange = match patch.exchange.as_deref() {
            Some(code) if !code.trim().is_empty() => code.parse()?,
            _ => self.exchange,
        };

        Self::validate(
            patch.name.as_deref().unwrap_or(&self.name),
            patch.category.as_deref().unwrap_or(&self.category),
            patch.brand_name.as_deref().unwrap_or(&self.brand_name),
            patch.stock.unwrap_or_else(|| Decimal::from(self.stock)),
            patch.mrp.unwrap_or(self.mrp),
            patch.price.unwrap_or(self.price),
            exchange,
        )
    }
}

/// Product entity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Product {
    pub id: ProductId,
    pub owner_id: UserId,
    pub details: ProductDetails,
    pub image: ProductImage,
    pub is_published: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Product {
    pub fn new(
        owner_id: UserId,
        details: ProductDetails,
        image: ProductImage,
        is_published: bool,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id: ProductId::new(),
            owner_id,
            details,
            image,
            is_published,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn is_owned_by(&self, user_id: &UserId) -> bool {
        &self.owner_id == user_id
    }

    pub fn replace_details(&mut self, details: ProductDetails, now: DateTime<Utc>) {
        self.details = details;
        self.updated_at = now;
    }

    /// Swap in a new image, returning the previous one
    pub fn replace_image(&mut self, image: ProductImage, now: DateTime<Utc>) -> ProductImage {
        self.updated_at = now;
        std::mem::replace(&mut self.image, image)
    }

    pub fn set_published(&mut self, is_published: bool, now: DateTime<Utc>) {
        self.is_published = is_published;
        self.updated_at = now;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn fields() -> ProductFields {
        ProductFields {
            name: Some("Cotton Shirt".to_string()),
            category: Some("Apparel".to_string()),
            brand_name: Some("Acme".to_string()),
            stock: Some(dec("10")),
            mrp: Some(dec("999")),
            price: Some(dec("799.50")),
            exchange: None,
        }
    }

    fn validation_message(result: CatalogResult<ProductDetails>) -> String {
        match result {
            Err(CatalogError::Validation(message)) => message,
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn test_valid_fields() {
        let details = fields().into_details().unwrap();
        assert_eq!(details.name, "Cotton Shirt");
        assert_eq!(details.stock, 10);
        assert_eq!(details.price, dec("799.50"));
        assert_eq!(details.exchange, Exchange::No);
    }

    #[test]
    fn test_text_is_trimmed() {
        let mut f = fields();
        f.name = Some("  Cotton Shirt  ".to_string());
        assert_eq!(f.into_details().unwrap().name, "Cotton Shirt");
    }

    #[test]
    fn test_missing_fields() {
        let mut f = fields();
        f.price = None;
        assert!(!f.is_complete());
        assert!(matches!(f.into_details(), Err(CatalogError::MissingFields)));

        let mut f = fields();
        f.brand_name = Some("   ".to_string());
        assert!(!f.is_complete());
    }

    #[test]
    fn test_rules() {
        let cases = [
            ("stock", "0", "Valid stock quantity is required"),
            ("stock", "-3", "Valid stock quantity is required"),
            ("stock", "2.5", "Valid stock quantity is required"),
            ("stock", "3000000000", "Valid stock quantity is required"),
            ("mrp", "0", "Valid MRP is required"),
            ("mrp", "10000000000", "Valid MRP is required"),
            ("price", "-1", "Valid price is required"),
            ("price", "0.001", "Valid price is required"),
            ("price", "1000", "Selling price cannot be greater than MRP"),
        ];

        for (field, value, expected) in cases {
            let mut f = fields();
            match field {
                "stock" => f.stock = Some(dec(value)),
                "mrp" => f.mrp = Some(dec(value)),
                "price" => f.price = Some(dec(value)),
                _ => unreachable!(),
            }
            assert_eq!(validation_message(f.into_details()), expected, "{field}={value}");
        }
    }

    #[test]
    fn test_price_equal_to_mrp_is_allowed() {
        let mut f = fields();
        f.price = Some(dec("999.00"));
        assert!(f.into_details().is_ok());
    }

    #[test]
    fn test_amounts_rounded_to_cents() {
        let mut f = fields();
        f.price = Some(dec("10.005"));
        assert_eq!(f.into_details().unwrap().price, dec("10.01"));
    }

    #[test]
    fn test_exchange_parsing() {
        let mut f = fields();
        f.exchange = Some("Yes".to_string());
        assert_eq!(f.into_details().unwrap().exchange, Exchange::Yes);

        let mut f = fields();
        f.exchange = Some("Maybe".to_string());
        assert_eq!(validation_message(f.into_details()), "Exchange must be Yes or No");
    }

    #[test]
    fn test_merge_keeps_absent_fields() {
        let details = fields().into_details().unwrap();
        let merged = details
            .merge(ProductFields {
                stock: Some(dec("25")),
                exchange: Some("Yes".to_string()),
                ..Default::default()
            })
            .unwrap();

        assert_eq!(merged.stock, 25);
        assert_eq!(merged.exchange, Exchange::Yes);
        assert_eq!(merged.name, details.name);
        assert_eq!(merged.mrp, details.mrp);
        assert_eq!(merged.price, details.price);
    }

    #[test]
    fn test_merge_blank_exchange_keeps_current() {
        let mut f = fields();
        f.exchange = Some("Yes".to_string());
        let details = f.into_details().unwrap();

        for blank in ["", "   "] {
            let merged = details
                .merge(ProductFields {
                    exchange: Some(blank.to_string()),
                    ..Default::default()
                })
                .unwrap();
            assert_eq!(merged.exchange, Exchange::Yes);
        }

        let merged = details
            .merge(ProductFields {
                exchange: Some("No".to_string()),
                ..Default::default()
            })
            .unwrap();
        assert_eq!(merged.exchange, Exchange::No);
    }

    #[test]
    fn test_merge_revalidates() {
        let details = fields().into_details().unwrap();
        let result = details.merge(ProductFields {
            mrp: Some(dec("500")),
            ..Default::default()
        });
        assert_eq!(
            validation_message(result),
            "Selling price cannot be greater than MRP"
        );
    }

    #[test]
    fn test_replace_image_returns_previous() {
        let now = Utc::now();
        let old = ProductImage {
            url: "https://img.example/old.png".to_string(),
            public_id: "products/old".to_string(),
        };
        let mut product = Product::new(
            UserId::new(),
            fields().into_details().unwrap(),
            old.clone(),
            false,
            now,
        );

        let new = ProductImage {
            url: "https://img.example/new.png".to_string(),
            public_id: "products/new".to_string(),
        };
        let previous = product.replace_image(new.clone(), now);
        assert_eq!(previous, old);
        assert_eq!(product.image, new);
    }
}

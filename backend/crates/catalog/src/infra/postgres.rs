//! PostgreSQL Repository Implementations

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::entity::product::{Product, ProductDetails, ProductImage};
use crate::domain::repository::{ProductFilter, ProductRepository};
use crate::domain::value_object::{ProductId, UserId, exchange::Exchange};
use crate::error::{CatalogError, CatalogResult};

const PRODUCT_COLUMNS: &str = r#"
    id,
    owner_id,
    name,
    category,
    brand_name,
    stock,
    mrp,
    price,
    exchange,
    image_url,
    image_public_id,
    is_published,
    created_at,
    updated_at
"#;

/// PostgreSQL-backed product repository
#[derive(Clone)]
pub struct PgProductRepository {
    pool: PgPool,
}

impl PgProductRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

impl ProductRepository for PgProductRepository {
    async fn create(&self, product: &Product) -> CatalogResult<()> {
        sqlx::query(
            r#"
            INSERT INTO products (
                id,
                owner_id,
                name,
                category,
                brand_name,
                stock,
                mrp,
                price,
                exchange,
                image_url,
                image_public_id,
                is_published,
                created_at,
                updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14)
            "#,
        )
        .bind(product.id.as_uuid())
        .bind(product.owner_id.as_uuid())
        .bind(&product.details.name)
        .bind(&product.details.category)
        .bind(&product.details.brand_name)
        .bind(stock_to_db(product.details.stock)?)
        .bind(product.details.mrp)
        .bind(product.details.price)
        .bind(product.details.exchange.code())
        .bind(&product.image.url)
        .bind(&product.image.public_id)
        .bind(product.is_published)
        .bind(product.created_at)
        .bind(product.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn find_for_owner(&self, id: &ProductId, owner: &UserId) -> CatalogResult<Option<Product>> {
        let row = sqlx::query_as::<_, ProductRow>(&format!(
            "SELECT {PRODUCT_COLUMNS} FROM products WHERE id = $1 AND owner_id = $2"
        ))
        .bind(id.as_uuid())
        .bind(owner.as_uuid())
        .fetch_optional(&self.pool)
        .await?;

        row.map(|r| r.into_product()).transpose()
    }

    async fn list_for_owner(&self, owner: &UserId, filter: ProductFilter) -> CatalogResult<Vec<Product>> {
        let rows = sqlx::query_as::<_, ProductRow>(&format!(
            r#"
            SELECT {PRODUCT_COLUMNS}
            FROM products
            WHERE owner_id = $1
              AND ($2::BOOLEAN IS NULL OR is_published = $2)
            ORDER BY created_at DESC, id
            "#
        ))
        .bind(owner.as_uuid())
        .bind(filter.is_published)
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(|r| r.into_product()).collect()
    }

    async fn update(&self, product: &Product) -> CatalogResult<bool> {
        let result = sqlx::query(
            r#"
            UPDATE products SET
                name = $3,
                category = $4,
                brand_name = $5,
                stock = $6,
                mrp = $7,
                price = $8,
                exchange = $9,
                image_url = $10,
                image_public_id = $11,
                is_published = $12,
                updated_at = $13
            WHERE id = $1 AND owner_id = $2
            "#,
        )
        .bind(product.id.as_uuid())
        .bind(product.owner_id.as_uuid())
        .bind(&product.details.name)
        .bind(&product.details.category)
        .bind(&product.details.brand_name)
        .bind(stock_to_db(product.details.stock)?)
        .bind(product.details.mrp)
        .bind(product.details.price)
        .bind(product.details.exchange.code())
        .bind(&product.image.url)
        .bind(&product.image.public_id)
        .bind(product.is_published)
        .bind(product.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete(&self, id: &ProductId, owner: &UserId) -> CatalogResult<bool> {
        let result = sqlx::query("DELETE FROM products WHERE id = $1 AND owner_id = $2")
            .bind(id.as_uuid())
            .bind(owner.as_uuid())
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

fn stock_to_db(stock: u32) -> CatalogResult<i32> {
    i32::try_from(stock).map_err(|_| CatalogError::Internal(format!("Stock {stock} out of range")))
}

// ============================================================================
// Row Types
// ============================================================================

#[derive(sqlx::FromRow)]
struct ProductRow {
    id: Uuid,
    owner_id: Uuid,
    name: String,
    category: String,
    brand_name: String,
    stock: i32,
    mrp: Decimal,
    price: Decimal,
    exchange: String,
    image_url: String,
    image_public_id: String,
    is_published: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl ProductRow {
    fn into_product(self) -> CatalogResult<Product> {
        let stock = u32::try_from(self.stock).map_err(|_| {
            CatalogError::Internal(format!("Product {} has negative stock", self.id))
        })?;
        let exchange = Exchange::from_code(&self.exchange).ok_or_else(|| {
            CatalogError::Internal(format!(
                "Product {} has unknown exchange code {}",
                self.id, self.exchange
            ))
        })?;

        Ok(Product {
            id: ProductId::from_uuid(self.id),
            owner_id: UserId::from_uuid(self.owner_id),
            details: ProductDetails {
                name: self.name,
                category: self.category,
                brand_name: self.brand_name,
                stock,
                mrp: self.mrp,
                price: self.price,
                exchange,
            },
            image: ProductImage {
                url: self.image_url,
                public_id: self.image_public_id,
            },
            is_published: self.is_published,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

//! HTTP Handlers
//!
//! Every handler runs behind the session middleware and acts on behalf of
//! the calling [`Principal`].

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use kernel::principal::Principal;
use platform::media::ImageStore;
use std::sync::Arc;

use crate::application::config::CatalogConfig;
use crate::application::{
    CreateProductInput, CreateProductUseCase, DeleteProductUseCase, GetProductUseCase,
    ListProductsUseCase, SetPublishedUseCase, UpdateProductInput, UpdateProductUseCase,
};
use crate::domain::repository::{ProductFilter, ProductRepository};
use crate::domain::value_object::ProductId;
use crate::error::{CatalogError, CatalogResult};
use crate::presentation::dto::{
    DeleteProductResponse, ListProductsQuery, ProductRequest, ProductResponse, PublishRequest,
};

/// Shared state for catalog handlers
#[derive(Clone)]
pub struct CatalogAppState<R, I>
where
    R: ProductRepository + Clone + Send + Sync + 'static,
    I: ImageStore + Clone + Send + Sync + 'static,
{
    pub repo: Arc<R>,
    pub images: Arc<I>,
    pub config: Arc<CatalogConfig>,
}

/// A malformed id cannot name an existing product
fn parse_product_id(raw: &str) -> CatalogResult<ProductId> {
    raw.parse().map_err(|_| CatalogError::NotFound)
}

// ============================================================================
// Queries
// ============================================================================

/// GET /api/products
pub async fn list_products<R, I>(
    State(state): State<CatalogAppState<R, I>>,
    principal: Principal,
    Query(query): Query<ListProductsQuery>,
) -> CatalogResult<Json<Vec<ProductResponse>>>
where
    R: ProductRepository + Clone + Send + Sync + 'static,
    I: ImageStore + Clone + Send + Sync + 'static,
{
    let use_case = ListProductsUseCase::new(state.repo.clone());
    let filter = ProductFilter {
        is_published: query.published_filter(),
    };

    let products = use_case.execute(principal.user_id, filter).await?;

    Ok(Json(products.into_iter().map(ProductResponse::from).collect()))
}

/// GET /api/products/{id}
pub async fn get_product<R, I>(
    State(state): State<CatalogAppState<R, I>>,
    principal: Principal,
    Path(id): Path<String>,
) -> CatalogResult<Json<ProductResponse>>
where
    R: ProductRepository + Clone + Send + Sync + 'static,
    I: ImageStore + Clone + Send + Sync + 'static,
{
    let use_case = GetProductUseCase::new(state.repo.clone());
    let product = use_case
        .execute(principal.user_id, parse_product_id(&id)?)
        .await?;

    Ok(Json(product.into()))
}

// ============================================================================
// Commands
// ============================================================================

/// POST /api/products
pub async fn create_product<R, I>(
    State(state): State<CatalogAppState<R, I>>,
    principal: Principal,
    Json(req): Json<ProductRequest>,
) -> CatalogResult<(StatusCode, Json<ProductResponse>)>
where
    R: ProductRepository + Clone + Send + Sync + 'static,
    I: ImageStore + Clone + Send + Sync + 'static,
{
    let use_case = CreateProductUseCase::new(
        state.repo.clone(),
        state.images.clone(),
        state.config.clone(),
    );

    let (fields, image, is_published) = req.into_parts()?;
    let product = use_case
        .execute(
            principal.user_id,
            CreateProductInput {
                fields,
                image,
                is_published,
            },
        )
        .await?;

    Ok((StatusCode::CREATED, Json(product.into())))
}

/// PUT /api/products/{id}
pub async fn update_product<R, I>(
    State(state): State<CatalogAppState<R, I>>,
    principal: Principal,
    Path(id): Path<String>,
    Json(req): Json<ProductRequest>,
) -> CatalogResult<Json<ProductResponse>>
where
    R: ProductRepository + Clone + Send + Sync + 'static,
    I: ImageStore + Clone + Send + Sync + 'static,
{
    let use_case = UpdateProductUseCase::new(
        state.repo.clone(),
        state.images.clone(),
        state.config.clone(),
    );

    let id = parse_product_id(&id)?;
    let (fields, image, is_published) = req.into_parts()?;
    let product = use_case
        .execute(
            principal.user_id,
            id,
            UpdateProductInput {
                fields,
                image,
                is_published,
            },
        )
        .await?;

    Ok(Json(product.into()))
}

/// PATCH /api/products/{id}/publish
pub async fn set_published<R, I>(
    State(state): State<CatalogAppState<R, I>>,
    principal: Principal,
    Path(id): Path<String>,
    Json(req): Json<PublishRequest>,
) -> CatalogResult<Json<ProductResponse>>
where
    R: ProductRepository + Clone + Send + Sync + 'static,
    I: ImageStore + Clone + Send + Sync + 'static,
{
    let use_case = SetPublishedUseCase::new(state.repo.clone());
    let product = use_case
        .execute(principal.user_id, parse_product_id(&id)?, req.is_published)
        .await?;

    Ok(Json(product.into()))
}

/// DELETE /api/products/{id}
pub async fn delete_product<R, I>(
    State(state): State<CatalogAppState<R, I>>,
    principal: Principal,
    Path(id): Path<String>,
) -> CatalogResult<Json<DeleteProductResponse>>
where
    R: ProductRepository + Clone + Send + Sync + 'static,
    I: ImageStore + Clone + Send + Sync + 'static,
{
    let use_case = DeleteProductUseCase::new(state.repo.clone(), state.images.clone());
    use_case
        .execute(principal.user_id, parse_product_id(&id)?)
        .await?;

    Ok(Json(DeleteProductResponse {
        message: "Product deleted successfully".to_string(),
    }))
}

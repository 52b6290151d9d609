//! Catalog Router

use axum::{
    Router,
    routing::{get, patch},
};
use platform::media::{CloudinaryImageStore, ImageStore};
use std::sync::Arc;

use crate::application::config::CatalogConfig;
use crate::domain::repository::ProductRepository;
use crate::infra::postgres::PgProductRepository;
use crate::presentation::handlers::{self, CatalogAppState};

/// Create the Catalog router with PostgreSQL storage and Cloudinary images.
/// Mount it behind `auth::require_session`.
pub fn catalog_router(
    repo: PgProductRepository,
    images: CloudinaryImageStore,
    config: CatalogConfig,
) -> Router {
    catalog_router_generic(repo, images, config)
}

/// Create a generic Catalog router for any collaborator implementations
pub fn catalog_router_generic<R, I>(repo: R, images: I, config: CatalogConfig) -> Router
where
    R: ProductRepository + Clone + Send + Sync + 'static,
    I: ImageStore + Clone + Send + Sync + 'static,
{
    let state = CatalogAppState {
        repo: Arc::new(repo),
        images: Arc::new(images),
        config: Arc::new(config),
    };

    Router::new()
        .route(
            "/",
            get(handlers::list_products::<R, I>).post(handlers::create_product::<R, I>),
        )
        .route(
            "/{id}",
            get(handlers::get_product::<R, I>)
                .put(handlers::update_product::<R, I>)
                .delete(handlers::delete_product::<R, I>),
        )
        .route("/{id}/publish", patch(handlers::set_published::<R, I>))
        .with_state(state)
}

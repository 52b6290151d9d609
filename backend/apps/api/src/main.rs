//! API Server Entry Point
//!
//! Application entry point and server initialization.
//! Uses `anyhow` for startup errors; request errors are rendered by the
//! auth and catalog crates.

mod settings;

use std::net::SocketAddr;
use std::sync::Arc;

use auth::{AuthConfig, AuthMiddlewareState, JwtSessionSigner, PgCredentialRepository, require_session};
use axum::{
    Router,
    extract::DefaultBodyLimit,
    http::{self, Method, header},
    middleware,
};
use catalog::{CatalogConfig, PgProductRepository, catalog_router};
use platform::mail::SmtpMailer;
use platform::media::CloudinaryImageStore;
use secrecy::ExposeSecret;
use sqlx::postgres::PgPoolOptions;
use tokio::net::TcpListener;
use tower_http::cors::{AllowHeaders, AllowMethods, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::settings::Settings;

/// Product images arrive inline as data URIs
const BODY_LIMIT_BYTES: usize = 50 * 1024 * 1024;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "api=info,auth=info,catalog=info,platform=info,tower_http=info".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let settings = Settings::from_env()?;

    // Database connection
    let pool = PgPoolOptions::new()
        .max_connections(settings.database_max_connections)
        .connect(&settings.database_url)
        .await?;

    tracing::info!("Connected to database");

    // Run migrations
    sqlx::migrate!("../../../database/migrations")
        .run(&pool)
        .await?;

    tracing::info!("Migrations completed");

    // Collaborators
    let signer = Arc::new(JwtSessionSigner::new(
        settings.jwt_secret.expose_secret().as_bytes(),
    ));
    let mailer = SmtpMailer::new(&settings.smtp)?;
    let images = CloudinaryImageStore::new(settings.cloudinary)?;

    // CORS configuration
    let allowed_origins: Vec<http::HeaderValue> = settings
        .frontend_origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    let cors = CorsLayer::new()
        .allow_origin(allowed_origins)
        .allow_methods(AllowMethods::list([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ]))
        .allow_headers(AllowHeaders::list([
            header::CONTENT_TYPE,
            header::AUTHORIZATION,
            header::ACCEPT,
        ]))
        .allow_credentials(true);

    let products = catalog_router(
        PgProductRepository::new(pool.clone()),
        images,
        CatalogConfig::default(),
    )
    .route_layer(middleware::from_fn_with_state(
        AuthMiddlewareState::new(signer.clone()),
        require_session::<JwtSessionSigner>,
    ));

    // Build router
    let app = Router::new()
        .nest(
            "/api/auth",
            auth::auth_router(
                PgCredentialRepository::new(pool.clone()),
                mailer,
                signer,
                AuthConfig::default(),
            ),
        )
        .nest("/api/products", products)
        .layer(DefaultBodyLimit::max(BODY_LIMIT_BYTES))
        .layer(TraceLayer::new_for_http())
        .layer(cors);

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], settings.port));
    tracing::info!("Listening on {}", addr);

    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

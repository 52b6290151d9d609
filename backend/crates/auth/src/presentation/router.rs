//! Auth Router

use axum::{
    Router,
    routing::{get, post},
};
use platform::mail::{Mailer, SmtpMailer};
use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::domain::repository::CredentialRepository;
use crate::domain::session::SessionSigner;
use crate::infra::{jwt::JwtSessionSigner, postgres::PgCredentialRepository};
use crate::presentation::handlers::{self, AuthAppState};

/// Create the Auth router with PostgreSQL storage, SMTP delivery and JWT sessions
pub fn auth_router(
    repo: PgCredentialRepository,
    mailer: SmtpMailer,
    signer: Arc<JwtSessionSigner>,
    config: AuthConfig,
) -> Router {
    auth_router_generic(repo, mailer, signer, config)
}

/// Create a generic Auth router for any collaborator implementations
pub fn auth_router_generic<R, M, S>(repo: R, mailer: M, signer: Arc<S>, config: AuthConfig) -> Router
where
    R: CredentialRepository + Clone + Send + Sync + 'static,
    M: Mailer + Clone + Send + Sync + 'static,
    S: SessionSigner + Clone,
{
    let state = AuthAppState {
        repo: Arc::new(repo),
        mailer: Arc::new(mailer),
        signer,
        config: Arc::new(config),
    };

    Router::new()
        .route("/send-otp", post(handlers::send_otp::<R, M, S>))
        .route("/verify-otp", post(handlers::verify_otp::<R, M, S>))
        .route("/session", get(handlers::session_status::<R, M, S>))
        .with_state(state)
}

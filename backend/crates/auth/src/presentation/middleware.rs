//! Auth Middleware
//!
//! Gates protected routes on a valid `Authorization: Bearer` session token
//! and hands the caller's identity to handlers as a [`kernel::principal::Principal`].

use axum::extract::{Request, State};
use axum::http::HeaderMap;
use axum::middleware::Next;
use axum::response::Response;
use axum_extra::headers::{Authorization, HeaderMapExt, authorization::Bearer};
use std::sync::Arc;

use crate::application::CheckSessionUseCase;
use crate::domain::session::SessionSigner;
use crate::error::AuthError;

/// Middleware state
#[derive(Clone)]
pub struct AuthMiddlewareState<S>
where
    S: SessionSigner + Clone,
{
    pub signer: Arc<S>,
}

impl<S> AuthMiddlewareState<S>
where
    S: SessionSigner + Clone,
{
    pub fn new(signer: Arc<S>) -> Self {
        Self { signer }
    }
}

/// Token from `Authorization: Bearer <token>`, if present and well-formed
pub fn bearer_token(headers: &HeaderMap) -> Option<String> {
    headers
        .typed_get::<Authorization<Bearer>>()
        .map(|auth| auth.token().to_string())
}

/// Middleware that requires a valid session. Use with
/// `axum::middleware::from_fn_with_state`.
pub async fn require_session<S>(
    State(state): State<AuthMiddlewareState<S>>,
    mut req: Request,
    next: Next,
) -> Result<Response, AuthError>
where
    S: SessionSigner + Clone,
{
    let token = bearer_token(req.headers()).ok_or(AuthError::SessionInvalid)?;
    let claims = CheckSessionUseCase::new(state.signer.clone()).execute(&token)?;

    req.extensions_mut().insert(claims.principal());

    Ok(next.run(req).await)
}

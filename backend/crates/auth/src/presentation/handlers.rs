//! HTTP Handlers

use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::http::HeaderMap;
use platform::mail::Mailer;
use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::application::{
    CheckSessionUseCase, RequestOtpInput, RequestOtpUseCase, VerifyOtpInput, VerifyOtpUseCase,
};
use crate::domain::repository::CredentialRepository;
use crate::domain::session::SessionSigner;
use crate::error::AuthResult;
use crate::presentation::dto::{
    SendOtpRequest, SendOtpResponse, SessionStatusResponse, UserResponse, VerifyOtpRequest,
    VerifyOtpResponse,
};
use crate::presentation::middleware::bearer_token;

/// Shared state for auth handlers
#[derive(Clone)]
pub struct AuthAppState<R, M, S>
where
    R: CredentialRepository + Clone + Send + Sync + 'static,
    M: Mailer + Clone + Send + Sync + 'static,
    S: SessionSigner + Clone,
{
    pub repo: Arc<R>,
    pub mailer: Arc<M>,
    pub signer: Arc<S>,
    pub config: Arc<AuthConfig>,
}

/// An unreadable body (wrong types, `null`, not JSON) is validated as an
/// empty request so the caller gets the usual 400 message.
fn lenient_body<T: Default>(payload: Result<Json<T>, JsonRejection>) -> T {
    match payload {
        Ok(Json(req)) => req,
        Err(rejection) => {
            tracing::debug!(error = %rejection.body_text(), "Unreadable auth request body");
            T::default()
        }
    }
}

// ============================================================================
// Send OTP
// ============================================================================

/// POST /api/auth/send-otp
pub async fn send_otp<R, M, S>(
    State(state): State<AuthAppState<R, M, S>>,
    payload: Result<Json<SendOtpRequest>, JsonRejection>,
) -> AuthResult<Json<SendOtpResponse>>
where
    R: CredentialRepository + Clone + Send + Sync + 'static,
    M: Mailer + Clone + Send + Sync + 'static,
    S: SessionSigner + Clone,
{
    let req = lenient_body(payload);
    let use_case = RequestOtpUseCase::new(
        state.repo.clone(),
        state.mailer.clone(),
        state.config.clone(),
    );

    let output = use_case.execute(RequestOtpInput { email: req.email }).await?;

    Ok(Json(SendOtpResponse {
        message: "OTP sent successfully".to_string(),
        email: output.email,
    }))
}

// ============================================================================
// Verify OTP
// ============================================================================

/// POST /api/auth/verify-otp
pub async fn verify_otp<R, M, S>(
    State(state): State<AuthAppState<R, M, S>>,
    payload: Result<Json<VerifyOtpRequest>, JsonRejection>,
) -> AuthResult<Json<VerifyOtpResponse>>
where
    R: CredentialRepository + Clone + Send + Sync + 'static,
    M: Mailer + Clone + Send + Sync + 'static,
    S: SessionSigner + Clone,
{
    let req = lenient_body(payload);
    let use_case = VerifyOtpUseCase::new(
        state.repo.clone(),
        state.signer.clone(),
        state.config.clone(),
    );

    let output = use_case
        .execute(VerifyOtpInput {
            email: req.email,
            otp: req.otp,
        })
        .await?;

    Ok(Json(VerifyOtpResponse {
        message: "Login successful".to_string(),
        token: output.token,
        expires_at: output.expires_at,
        user: UserResponse {
            id: output.user_id,
            email: output.email,
        },
    }))
}

// ============================================================================
// Session Status
// ============================================================================

/// GET /api/auth/session
pub async fn session_status<R, M, S>(
    State(state): State<AuthAppState<R, M, S>>,
    headers: HeaderMap,
) -> Json<SessionStatusResponse>
where
    R: CredentialRepository + Clone + Send + Sync + 'static,
    M: Mailer + Clone + Send + Sync + 'static,
    S: SessionSigner + Clone,
{
    let use_case = CheckSessionUseCase::new(state.signer.clone());
    let token = bearer_token(&headers);

    match use_case.check(token.as_deref()) {
        Some(claims) => Json(SessionStatusResponse {
            authenticated: true,
            user: Some(UserResponse {
                id: claims.user_id,
                email: claims.email,
            }),
            expires_at: Some(claims.expires_at),
        }),
        None => Json(SessionStatusResponse {
            authenticated: false,
            user: None,
            expires_at: None,
        }),
    }
}

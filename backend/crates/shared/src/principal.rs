//! Authenticated caller
//!
//! The auth middleware verifies the session token and stores a [`Principal`]
//! in the request extensions. Protected handlers in any crate take it as an
//! extractor and never look at tokens themselves.

use serde::Serialize;

use crate::id::UserId;

/// Identity carried by a verified session token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Principal {
    pub user_id: UserId,
    pub email: String,
}

impl Principal {
    pub fn new(user_id: UserId, email: impl Into<String>) -> Self {
        Self {
            user_id,
            email: email.into(),
        }
    }
}

#[cfg(feature = "axum")]
mod extract {
    use axum::extract::FromRequestParts;
    use axum::http::request::Parts;

    use super::Principal;
    use crate::error::app_error::AppError;

    impl<S> FromRequestParts<S> for Principal
    where
        S: Send + Sync,
    {
        type Rejection = AppError;

        async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
            parts
                .extensions
                .get::<Principal>()
                .cloned()
                .ok_or_else(|| AppError::unauthorized("Not authorized"))
        }
    }
}

#[cfg(all(test, feature = "axum"))]
mod tests {
    use axum::extract::FromRequestParts;
    use axum::http::Request;

    use super::*;

    #[tokio::test]
    async fn test_extracts_principal_from_extensions() {
        let principal = Principal::new(UserId::new(), "seller@example.com");
        let (mut parts, _) = Request::builder()
            .extension(principal.clone())
            .body(())
            .unwrap()
            .into_parts();

        let extracted = Principal::from_request_parts(&mut parts, &()).await.unwrap();
        assert_eq!(extracted, principal);
    }

    #[tokio::test]
    async fn test_missing_principal_is_unauthorized() {
        let (mut parts, _) = Request::builder().body(()).unwrap().into_parts();

        let err = Principal::from_request_parts(&mut parts, &())
            .await
            .unwrap_err();
        assert_eq!(err.status_code(), 401);
    }
}

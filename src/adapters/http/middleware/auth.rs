//! Session token extraction and principal extractors for axum.
//!
//! This module provides:
//! - `session_token` - Reads the token from a Bearer header or session cookie
//! - `RequireAuth` - Extractor that requires a principal
//! - `OptionalAuth` - Extractor for an optional principal
//!
//! Tokens are not validated here. `tenant_routing_middleware` resolves the
//! principal while routing and inserts it into request extensions; these
//! extractors only read it back.
//!
//! ```text
//! Request → tenant_routing_middleware → injects Principal into extensions
//!                                              ↓
//!                                 Handler → RequireAuth reads from extensions
//! ```

use axum::{
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};

use crate::domain::foundation::Principal;

/// Default name of the cookie carrying the access token.
pub const DEFAULT_SESSION_COOKIE: &str = "ll-access-token";

/// Extracts the raw session token from a request.
///
/// The `Authorization: Bearer <token>` header wins over the session cookie.
/// Empty values are ignored.
pub fn session_token(headers: &HeaderMap, cookie_name: &str) -> Option<String> {
    let bearer = headers
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|t| !t.is_empty());

    if let Some(token) = bearer {
        return Some(token.to_string());
    }

    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|h| h.to_str().ok())
        .flat_map(|h| h.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == cookie_name)
        .map(|(_, value)| value.trim().trim_matches('"').to_string())
        .filter(|t| !t.is_empty())
}

/// Extractor that requires a principal.
///
/// Rejects with 401 when routing did not resolve a principal for the
/// request.
///
/// # Example
///
/// ```ignore
/// async fn my_handler(RequireAuth(principal): RequireAuth) -> impl IntoResponse {
///     format!("Hello, {}!", principal.id)
/// }
/// ```
#[derive(Debug, Clone)]
pub struct RequireAuth(pub Principal);

impl<S> axum::extract::FromRequestParts<S> for RequireAuth
where
    S: Send + Sync,
{
    type Rejection = AuthRejection;

    fn from_request_parts<'life0, 'life1, 'async_trait>(
        parts: &'life0 mut axum::http::request::Parts,
        _state: &'life1 S,
    ) -> std::pin::Pin<
        Box<dyn std::future::Future<Output = Result<Self, Self::Rejection>> + Send + 'async_trait>,
    >
    where
        'life0: 'async_trait,
        'life1: 'async_trait,
        Self: 'async_trait,
    {
        Box::pin(async move {
            parts
                .extensions
                .get::<Principal>()
                .cloned()
                .map(RequireAuth)
                .ok_or(AuthRejection::Unauthenticated)
        })
    }
}

/// Extractor for an optional principal.
#[derive(Debug, Clone)]
pub struct OptionalAuth(pub Option<Principal>);

impl<S> axum::extract::FromRequestParts<S> for OptionalAuth
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    fn from_request_parts<'life0, 'life1, 'async_trait>(
        parts: &'life0 mut axum::http::request::Parts,
        _state: &'life1 S,
    ) -> std::pin::Pin<
        Box<dyn std::future::Future<Output = Result<Self, Self::Rejection>> + Send + 'async_trait>,
    >
    where
        'life0: 'async_trait,
        'life1: 'async_trait,
        Self: 'async_trait,
    {
        Box::pin(async move { Ok(OptionalAuth(parts.extensions.get::<Principal>().cloned())) })
    }
}

/// Rejection type for authentication failures.
#[derive(Debug, Clone)]
pub enum AuthRejection {
    /// No principal was resolved for the request.
    Unauthenticated,
}

impl IntoResponse for AuthRejection {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AuthRejection::Unauthenticated => (StatusCode::UNAUTHORIZED, "Authentication required"),
        };

        (
            status,
            Json(serde_json::json!({
                "error": message,
                "code": "UNAUTHENTICATED"
            })),
        )
            .into_response()
    }
}

//! Tenant routing middleware and tenant extractors for axum.
//!
//! Every request runs through `ResolveRouteHandler`. Redirects are answered
//! with `307 Temporary Redirect`; forwarded requests continue with the
//! resolved `TenantContext` and `Principal` in their extensions.
//!
//! # Example
//!
//! ```ignore
//! let state = TenantRoutingState::new(Arc::new(handler), "ll-access-token");
//!
//! let app = Router::new()
//!     .route("/clients", get(list_clients))
//!     .layer(middleware::from_fn_with_state(state, tenant_routing_middleware));
//!
//! async fn list_clients(CurrentTenant(tenant): CurrentTenant) -> String {
//!     format!("Clients of {}", tenant.subdomain)
//! }
//! ```

use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::{header, HeaderValue, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};

use super::auth::session_token;
use crate::application::handlers::tenancy::{ResolveRouteHandler, ResolveRouteQuery};
use crate::domain::tenancy::{Redirect, RequestTarget, RouteDecision, TenantContext};

/// Middleware state: the routing handler plus where to find the session.
#[derive(Clone)]
pub struct TenantRoutingState {
    pub handler: Arc<ResolveRouteHandler>,
    pub session_cookie: String,
}

impl TenantRoutingState {
    pub fn new(handler: Arc<ResolveRouteHandler>, session_cookie: impl Into<String>) -> Self {
        Self {
            handler,
            session_cookie: session_cookie.into(),
        }
    }
}

/// Routes every request by tenant before it reaches a handler.
pub async fn tenant_routing_middleware(
    State(state): State<TenantRoutingState>,
    mut request: Request,
    next: Next,
) -> Response {
    let target = request_target(&request);
    let token = session_token(request.headers(), &state.session_cookie);

    let resolution = state
        .handler
        .handle(ResolveRouteQuery::new(target, token))
        .await;

    match resolution.decision {
        RouteDecision::Redirect(redirect) => redirect_response(&redirect),
        RouteDecision::Forward { tenant } => {
            if let Some(tenant) = tenant {
                request.extensions_mut().insert(tenant);
            }
            if let Some(principal) = resolution.principal {
                request.extensions_mut().insert(principal);
            }
            next.run(request).await
        }
    }
}

/// Host, path, and query of an incoming request.
///
/// The `Host` header is authoritative; absolute-form request URIs are the
/// fallback.
fn request_target(request: &Request) -> RequestTarget {
    let uri = request.uri();
    let host = request
        .headers()
        .get(header::HOST)
        .and_then(|h| h.to_str().ok())
        .map(str::to_string)
        .or_else(|| uri.authority().map(|a| a.to_string()))
        .unwrap_or_default();

    RequestTarget::new(host, uri.path(), uri.query().map(str::to_string))
}

fn redirect_response(redirect: &Redirect) -> Response {
    match HeaderValue::from_str(&redirect.location) {
        Ok(location) => (
            StatusCode::TEMPORARY_REDIRECT,
            [(header::LOCATION, location)],
        )
            .into_response(),
        Err(e) => {
            tracing::error!(location = %redirect.location, error = %e, "Invalid redirect location");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

/// Extractor that requires a resolved tenant.
///
/// Only requests forwarded from a tenant subdomain carry one; anything
/// else is rejected with 404.
#[derive(Debug, Clone)]
pub struct CurrentTenant(pub TenantContext);

impl<S> axum::extract::FromRequestParts<S> for CurrentTenant
where
    S: Send + Sync,
{
    type Rejection = TenantRejection;

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
                .get::<TenantContext>()
                .cloned()
                .map(CurrentTenant)
                .ok_or(TenantRejection::NoTenant)
        })
    }
}

/// Extractor for an optional tenant (main-domain pages shared with tenants).
#[derive(Debug, Clone)]
pub struct OptionalTenant(pub Option<TenantContext>);

impl<S> axum::extract::FromRequestParts<S> for OptionalTenant
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
        Box::pin(async move {
            Ok(OptionalTenant(
                parts.extensions.get::<TenantContext>().cloned(),
            ))
        })
    }
}

#[derive(Debug, Clone)]
pub enum TenantRejection {
    /// The request was not routed to a tenant.
    NoTenant,
}

impl IntoResponse for TenantRejection {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            TenantRejection::NoTenant => (StatusCode::NOT_FOUND, "No tenant for this host"),
        };

        (
            status,
            Json(serde_json::json!({
                "error": message,
                "code": "TENANT_NOT_FOUND"
            })),
        )
            .into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::extract::FromRequestParts;
    use axum::http::Request;

    use crate::domain::foundation::OrganizationId;
    use crate::domain::tenancy::{RedirectReason, Subdomain};

    fn acme_context() -> TenantContext {
        TenantContext {
            organization_id: OrganizationId::new(),
            subdomain: Subdomain::new("acme").unwrap(),
        }
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Request Target Tests
    // ════════════════════════════════════════════════════════════════════════════

    #[test]
    fn target_reads_host_header_path_and_query() {
        let request = Request::builder()
            .uri("/dashboard?subdomain=acme")
            .header(header::HOST, "Localhost:3000")
            .body(Body::empty())
            .unwrap();

        let target = request_target(&request);
        assert_eq!(target.host(), "localhost:3000");
        assert_eq!(target.path(), "/dashboard");
        assert_eq!(target.query(), Some("subdomain=acme"));
    }

    #[test]
    fn target_falls_back_to_uri_authority() {
        let request = Request::builder()
            .uri("https://acme.lifelegacy.me/clients")
            .body(Body::empty())
            .unwrap();

        let target = request_target(&request);
        assert_eq!(target.host(), "acme.lifelegacy.me");
        assert_eq!(target.path(), "/clients");
        assert_eq!(target.query(), None);
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Redirect Response Tests
    // ════════════════════════════════════════════════════════════════════════════

    #[test]
    fn redirect_is_307_with_location() {
        let response = redirect_response(&Redirect {
            location: "https://lifelegacy.me/".to_string(),
            reason: RedirectReason::MainDomain,
        });

        assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);
        assert_eq!(
            response.headers().get(header::LOCATION).unwrap(),
            "https://lifelegacy.me/"
        );
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Extractor Tests
    // ════════════════════════════════════════════════════════════════════════════

    #[tokio::test]
    async fn current_tenant_extracts_context() {
        let mut request: Request<()> = Request::builder().uri("/").body(()).unwrap();
        request.extensions_mut().insert(acme_context());
        let (mut parts, _body) = request.into_parts();

        let CurrentTenant(tenant) = CurrentTenant::from_request_parts(&mut parts, &())
            .await
            .unwrap();
        assert_eq!(tenant.subdomain.as_str(), "acme");
    }

    #[tokio::test]
    async fn current_tenant_rejects_without_context() {
        let request: Request<()> = Request::builder().uri("/").body(()).unwrap();
        let (mut parts, _body) = request.into_parts();

        let result = CurrentTenant::from_request_parts(&mut parts, &()).await;
        assert!(matches!(result, Err(TenantRejection::NoTenant)));
        assert_eq!(
            TenantRejection::NoTenant.into_response().status(),
            StatusCode::NOT_FOUND
        );
    }

    #[tokio::test]
    async fn optional_tenant_is_none_without_context() {
        let request: Request<()> = Request::builder().uri("/").body(()).unwrap();
        let (mut parts, _body) = request.into_parts();

        let OptionalTenant(tenant) = OptionalTenant::from_request_parts(&mut parts, &())
            .await
            .unwrap();
        assert!(tenant.is_none());
    }

    #[test]
    fn state_and_extractors_are_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<TenantRoutingState>();
        assert_send_sync::<CurrentTenant>();
        assert_send_sync::<OptionalTenant>();
    }
}

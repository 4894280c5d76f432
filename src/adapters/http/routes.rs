//! Axum router assembly.
//!
//! # Routes
//!
//! - `GET /api/health` - Liveness probe
//! - anything else - 404 JSON, after tenant routing has run
//!
//! Page routes are supplied by the caller and mounted under the same
//! tenant routing layer.

use std::time::Duration;

use axum::{
    http::StatusCode,
    middleware,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use super::middleware::{tenant_routing_middleware, TenantRoutingState};

/// Liveness probe. Never routed by tenant (`/api` is excluded).
pub async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}

pub async fn not_found() -> Response {
    (
        StatusCode::NOT_FOUND,
        Json(serde_json::json!({
            "error": "Not found",
            "code": "NOT_FOUND"
        })),
    )
        .into_response()
}

/// Builds the application router.
///
/// `pages` are merged with the health route; every route and the fallback
/// run behind `tenant_routing_middleware`.
///
/// # Example
///
/// ```ignore
/// let state = TenantRoutingState::new(Arc::new(handler), "ll-access-token");
/// let app = app_router(Router::new(), state, Duration::from_secs(30));
/// axum::serve(listener, app).await?;
/// ```
pub fn app_router(pages: Router, state: TenantRoutingState, request_timeout: Duration) -> Router {
    Router::new()
        .route("/api/health", get(health))
        .merge(pages)
        .fallback(not_found)
        .layer(middleware::from_fn_with_state(
            state,
            tenant_routing_middleware,
        ))
        .layer(TimeoutLayer::new(request_timeout))
        .layer(TraceLayer::new_for_http())
}

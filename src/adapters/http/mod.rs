//! HTTP adapters - axum middleware, extractors, and router assembly.

pub mod middleware;
pub mod routes;

pub use middleware::{
    tenant_routing_middleware, CurrentTenant, OptionalAuth, OptionalTenant, RequireAuth,
    TenantRoutingState,
};
pub use routes::app_router;

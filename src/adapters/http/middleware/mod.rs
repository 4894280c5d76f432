//! HTTP middleware for axum.
//!
//! - `tenant_routing` - Routes requests by tenant; tenant extractors
//! - `auth` - Session token extraction and principal extractors

pub mod auth;
pub mod tenant_routing;

pub use auth::{session_token, AuthRejection, OptionalAuth, RequireAuth, DEFAULT_SESSION_COOKIE};
pub use tenant_routing::{
    tenant_routing_middleware, CurrentTenant, OptionalTenant, TenantRejection, TenantRoutingState,
};

//! Application handlers.
//!
//! Query handlers that orchestrate domain rules over the ports.

pub mod tenancy;

pub use tenancy::{ResolveRouteHandler, ResolveRouteQuery, RouteResolution, RETURN_URL_PARAM};

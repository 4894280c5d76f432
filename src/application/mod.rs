//! Application layer - Handlers.
//!
//! This layer orchestrates domain rules and coordinates between ports.

pub mod handlers;

pub use handlers::{ResolveRouteHandler, ResolveRouteQuery, RouteResolution};

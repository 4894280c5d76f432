//! Tenancy handlers.

mod resolve_route;

pub use resolve_route::{
    ResolveRouteHandler, ResolveRouteQuery, RouteResolution, RETURN_URL_PARAM,
};

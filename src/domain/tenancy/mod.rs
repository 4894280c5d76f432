//! Tenancy module - subdomain-based tenant resolution.
//!
//! Pure types and rules: parsing the request target, classifying the
//! host, and the routing outcome. Lookups against the directory and the
//! session live behind ports and are orchestrated by
//! `application::handlers::tenancy::ResolveRouteHandler`.

mod decision;
mod host;
mod organization;
mod paths;
mod request;
mod router_config;
mod subdomain;

pub use decision::{Redirect, RedirectReason, RouteDecision};
pub use host::{
    classify_host, is_bare_localhost, is_local_bypass, CandidateSubdomain, HostClassification,
    SubdomainSource, SUBDOMAIN_QUERY_PARAM,
};
pub use organization::{
    Organization, OrganizationSummary, Professional, ProfessionalTenancy, TenantContext,
};
pub use paths::{has_prefix, PathRules};
pub use request::{strip_port, RequestTarget};
pub use router_config::RouterConfig;
pub use subdomain::{Subdomain, MAX_SUBDOMAIN_LEN};

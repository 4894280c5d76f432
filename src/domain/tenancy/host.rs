//! Host classification: which tenant, if any, a request is addressed to.
//!
//! ```text
//! development   acme.localhost:3000/...        -> "acme" (host)
//!               localhost:3000/...?subdomain=a -> "a"    (query)
//! production    acme.lifelegacy.me/...         -> "acme" (host)
//!               lifelegacy.me, www.lifelegacy.me -> main domain
//! preview       my-branch.vercel.app/...?subdomain=a -> "a" (query)
//! ```

use super::{RequestTarget, RouterConfig};

/// Query parameter that selects a tenant on hosts without subdomains.
pub const SUBDOMAIN_QUERY_PARAM: &str = "subdomain";

/// Where a candidate subdomain was read from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubdomainSource {
    Host,
    QueryParameter,
}

/// An unvalidated subdomain label taken from the request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateSubdomain {
    pub label: String,
    pub source: SubdomainSource,
}

impl CandidateSubdomain {
    fn from_host(label: &str) -> Self {
        Self {
            label: label.to_string(),
            source: SubdomainSource::Host,
        }
    }

    fn from_query(label: String) -> Self {
        Self {
            label,
            source: SubdomainSource::QueryParameter,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostClassification {
    pub subdomain: Option<CandidateSubdomain>,
    pub is_main_domain: bool,
}

impl HostClassification {
    /// The subdomain, when the request targets a tenant rather than the
    /// main domain.
    pub fn tenant_subdomain(&self) -> Option<&CandidateSubdomain> {
        if self.is_main_domain {
            None
        } else {
            self.subdomain.as_ref()
        }
    }
}

pub fn is_bare_localhost(hostname: &str) -> bool {
    matches!(hostname, "localhost" | "127.0.0.1" | "[::1]")
}

/// Development requests to plain localhost skip tenant checks entirely,
/// unless a tenant is selected through the query string.
pub fn is_local_bypass(target: &RequestTarget, config: &RouterConfig) -> bool {
    config.is_development
        && is_bare_localhost(target.hostname())
        && target.query_param(SUBDOMAIN_QUERY_PARAM).is_none()
}

pub fn classify_host(target: &RequestTarget, config: &RouterConfig) -> HostClassification {
    let hostname = target.hostname();
    let query_label = || {
        target
            .query_param(SUBDOMAIN_QUERY_PARAM)
            .map(CandidateSubdomain::from_query)
    };

    if config.is_development {
        let subdomain = single_label_below(hostname, "localhost")
            .map(CandidateSubdomain::from_host)
            .or_else(query_label);
        return HostClassification {
            is_main_domain: subdomain.is_none(),
            subdomain,
        };
    }

    let app = config.app_hostname();
    if hostname == app || hostname.strip_prefix("www.") == Some(app) {
        return HostClassification {
            subdomain: None,
            is_main_domain: true,
        };
    }

    if hostname.ends_with(&format!(".{}", app)) {
        // Below the app domain but not a single label (`a.b.lifelegacy.me`)
        // is neither main domain nor a tenant.
        return HostClassification {
            subdomain: single_label_below(hostname, app).map(CandidateSubdomain::from_host),
            is_main_domain: false,
        };
    }

    // Preview/staging host: only the query string can select a tenant.
    let subdomain = query_label();
    HostClassification {
        is_main_domain: subdomain.is_none(),
        subdomain,
    }
}

/// `acme` for (`acme.lifelegacy.me`, `lifelegacy.me`); `None` for deeper
/// or unrelated hosts.
fn single_label_below<'a>(hostname: &'a str, parent: &str) -> Option<&'a str> {
    let label = hostname.strip_suffix(parent)?.strip_suffix('.')?;
    if label.is_empty() || label.contains('.') {
        None
    } else {
        Some(label)
    }
}

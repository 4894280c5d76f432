//! Routing outcome.

use std::fmt;

use super::TenantContext;

/// Why a request was redirected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RedirectReason {
    /// Unknown, inactive, or unresolvable tenant.
    MainDomain,
    /// A principal is required.
    Login,
    /// Already signed in; auth pages are pointless.
    Dashboard,
    /// Signed-in professional belongs on their organization's subdomain.
    TenantSubdomain,
}

impl fmt::Display for RedirectReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            RedirectReason::MainDomain => "main_domain",
            RedirectReason::Login => "login",
            RedirectReason::Dashboard => "dashboard",
            RedirectReason::TenantSubdomain => "tenant_subdomain",
        };
        write!(f, "{}", s)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Redirect {
    /// Absolute URL for the `Location` header.
    pub location: String,
    pub reason: RedirectReason,
}

/// What to do with a request. Exactly one per evaluation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteDecision {
    /// Pass the request through unchanged, with the tenant it resolved to.
    Forward { tenant: Option<TenantContext> },
    Redirect(Redirect),
}

impl RouteDecision {
    pub fn forward() -> Self {
        RouteDecision::Forward { tenant: None }
    }

    pub fn forward_to_tenant(tenant: TenantContext) -> Self {
        RouteDecision::Forward {
            tenant: Some(tenant),
        }
    }

    pub fn redirect(location: impl Into<String>, reason: RedirectReason) -> Self {
        RouteDecision::Redirect(Redirect {
            location: location.into(),
            reason,
        })
    }

    pub fn is_forward(&self) -> bool {
        matches!(self, RouteDecision::Forward { .. })
    }

    pub fn redirect_location(&self) -> Option<&str> {
        match self {
            RouteDecision::Redirect(r) => Some(&r.location),
            RouteDecision::Forward { .. } => None,
        }
    }

    pub fn redirect_reason(&self) -> Option<RedirectReason> {
        match self {
            RouteDecision::Redirect(r) => Some(r.reason),
            RouteDecision::Forward { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn forward_has_no_location() {
        let decision = RouteDecision::forward();
        assert!(decision.is_forward());
        assert!(decision.redirect_location().is_none());
        assert!(decision.redirect_reason().is_none());
    }

    #[test]
    fn redirect_exposes_location_and_reason() {
        let decision = RouteDecision::redirect("https://lifelegacy.me/", RedirectReason::MainDomain);
        assert!(!decision.is_forward());
        assert_eq!(decision.redirect_location(), Some("https://lifelegacy.me/"));
        assert_eq!(decision.redirect_reason(), Some(RedirectReason::MainDomain));
    }

    #[test]
    fn reason_display_is_snake_case() {
        assert_eq!(RedirectReason::TenantSubdomain.to_string(), "tenant_subdomain");
        assert_eq!(RedirectReason::Login.to_string(), "login");
    }
}

//! ResolveRouteHandler - Query handler deciding forward vs. redirect.
//!
//! Rules are evaluated in order and the first match wins:
//!
//! 1. Excluded paths (assets, static files, `/api`) are forwarded.
//! 2. Bare localhost in development is forwarded.
//! 3. A tenant subdomain must name an active organization, otherwise the
//!    request goes to the main domain. Signed-in visitors are bounced off
//!    auth pages; anonymous visitors are sent to login.
//! 4. On the main domain, signed-in professionals are sent to their
//!    organization's subdomain, and protected pages require a session.
//!
//! Directory and session failures never surface as errors: they collapse
//! to "unknown tenant" and "anonymous" respectively.

use std::sync::Arc;

use url::Url;

use crate::domain::foundation::Principal;
use crate::domain::tenancy::{
    classify_host, is_local_bypass, CandidateSubdomain, RedirectReason, RequestTarget,
    RouteDecision, RouterConfig, Subdomain, SubdomainSource, TenantContext,
    SUBDOMAIN_QUERY_PARAM,
};
use crate::ports::{SessionAccessor, TenantDirectory};

/// Query parameter carrying the original path on login redirects.
pub const RETURN_URL_PARAM: &str = "returnUrl";

/// Query to route one request.
#[derive(Debug, Clone)]
pub struct ResolveRouteQuery {
    pub target: RequestTarget,
    /// Raw session token, if the request carried one.
    pub session_token: Option<String>,
}

impl ResolveRouteQuery {
    pub fn new(target: RequestTarget, session_token: Option<String>) -> Self {
        Self {
            target,
            session_token,
        }
    }
}

/// Outcome of routing a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteResolution {
    pub decision: RouteDecision,
    /// Principal resolved while routing, if the rules needed one.
    pub principal: Option<Principal>,
}

impl RouteResolution {
    fn new(decision: RouteDecision, principal: Option<Principal>) -> Self {
        Self {
            decision,
            principal,
        }
    }

    fn anonymous(decision: RouteDecision) -> Self {
        Self::new(decision, None)
    }
}

/// Handler for routing requests by tenant.
///
/// Holds no per-request state; one instance serves all requests.
pub struct ResolveRouteHandler {
    config: Arc<RouterConfig>,
    directory: Arc<dyn TenantDirectory>,
    sessions: Arc<dyn SessionAccessor>,
}

impl ResolveRouteHandler {
    pub fn new(
        config: Arc<RouterConfig>,
        directory: Arc<dyn TenantDirectory>,
        sessions: Arc<dyn SessionAccessor>,
    ) -> Self {
        Self {
            config,
            directory,
            sessions,
        }
    }

    pub fn config(&self) -> &RouterConfig {
        &self.config
    }

    pub async fn handle(&self, query: ResolveRouteQuery) -> RouteResolution {
        let target = &query.target;
        let token = query.session_token.as_deref();

        let resolution = self.resolve(target, token).await;

        match &resolution.decision {
            RouteDecision::Forward { tenant } => tracing::debug!(
                host = %target.host(),
                path = %target.path(),
                tenant = tenant.as_ref().map(|t| t.subdomain.as_str()),
                "Forwarding request"
            ),
            RouteDecision::Redirect(redirect) => tracing::debug!(
                host = %target.host(),
                path = %target.path(),
                reason = %redirect.reason,
                location = %redirect.location,
                "Redirecting request"
            ),
        }

        resolution
    }

    async fn resolve(&self, target: &RequestTarget, token: Option<&str>) -> RouteResolution {
        let paths = &self.config.paths;

        if paths.is_excluded(target.path()) {
            return RouteResolution::anonymous(RouteDecision::forward());
        }

        if is_local_bypass(target, &self.config) {
            return RouteResolution::anonymous(RouteDecision::forward());
        }

        let host = classify_host(target, &self.config);
        match host.tenant_subdomain() {
            Some(candidate) => self.resolve_tenant(target, candidate, token).await,
            None => self.resolve_main_domain(target, token).await,
        }
    }

    async fn resolve_tenant(
        &self,
        target: &RequestTarget,
        candidate: &CandidateSubdomain,
        token: Option<&str>,
    ) -> RouteResolution {
        let Some(tenant) = self.active_tenant(candidate).await else {
            return RouteResolution::anonymous(self.main_domain_redirect());
        };

        let paths = &self.config.paths;
        let on_auth_page = paths.is_auth_page(target.path());
        let principal = self.current_principal(token).await;

        let decision = match (&principal, on_auth_page) {
            (Some(_), true) => self.same_host_redirect(
                target,
                &paths.dashboard_path,
                self.carried_params(candidate, None),
                RedirectReason::Dashboard,
            ),
            (Some(_), false) | (None, true) => RouteDecision::forward_to_tenant(tenant),
            (None, false) => self.login_redirect(target, Some(candidate)),
        };

        RouteResolution::new(decision, principal)
    }

    async fn resolve_main_domain(
        &self,
        target: &RequestTarget,
        token: Option<&str>,
    ) -> RouteResolution {
        let paths = &self.config.paths;
        let principal = self.current_principal(token).await;

        let decision = match &principal {
            Some(principal) => {
                if let Some(home) = self.professional_home(principal).await {
                    self.tenant_redirect(target, &home)
                } else if paths.is_auth_page(target.path()) {
                    self.same_host_redirect(
                        target,
                        &paths.dashboard_path,
                        Vec::new(),
                        RedirectReason::Dashboard,
                    )
                } else {
                    RouteDecision::forward()
                }
            }
            None if paths.is_protected(target.path()) => self.login_redirect(target, None),
            None => RouteDecision::forward(),
        };

        RouteResolution::new(decision, principal)
    }

    /// Validates the label and looks up an active organization for it.
    async fn active_tenant(&self, candidate: &CandidateSubdomain) -> Option<TenantContext> {
        let subdomain = match Subdomain::new(&candidate.label) {
            Ok(subdomain) => subdomain,
            Err(e) => {
                tracing::debug!(label = %candidate.label, error = %e, "Invalid subdomain label");
                return None;
            }
        };

        match self.directory.find_organization_by_subdomain(&subdomain).await {
            Ok(Some(organization)) if organization.active => Some(TenantContext {
                organization_id: organization.id,
                subdomain,
            }),
            Ok(Some(_)) => {
                tracing::debug!(subdomain = %subdomain, "Organization is inactive");
                None
            }
            Ok(None) => None,
            Err(e) => {
                tracing::warn!(
                    subdomain = %subdomain,
                    error = %e,
                    "Organization lookup failed, treating as unknown tenant"
                );
                None
            }
        }
    }

    async fn current_principal(&self, token: Option<&str>) -> Option<Principal> {
        match self.sessions.current_principal(token).await {
            Ok(principal) => principal,
            Err(e) => {
                tracing::warn!(error = %e, "Session lookup failed, treating as anonymous");
                None
            }
        }
    }

    /// The subdomain a signed-in professional belongs on, if any.
    async fn professional_home(&self, principal: &Principal) -> Option<Subdomain> {
        match self
            .directory
            .find_professional_by_principal(&principal.id)
            .await
        {
            Ok(tenancy) => tenancy.and_then(|t| t.home_subdomain().cloned()),
            Err(e) => {
                tracing::warn!(
                    user_id = %principal.id,
                    error = %e,
                    "Professional lookup failed, staying on main domain"
                );
                None
            }
        }
    }

    fn main_domain_redirect(&self) -> RouteDecision {
        RouteDecision::redirect(self.config.main_domain_root(), RedirectReason::MainDomain)
    }

    fn login_redirect(
        &self,
        target: &RequestTarget,
        candidate: Option<&CandidateSubdomain>,
    ) -> RouteDecision {
        let return_to = self
            .config
            .login_return_url
            .then(|| target.path().to_string());
        let params = match candidate {
            Some(candidate) => self.carried_params(candidate, return_to),
            None => return_to
                .map(|path| vec![(RETURN_URL_PARAM, path)])
                .unwrap_or_default(),
        };

        self.same_host_redirect(
            target,
            &self.config.paths.login_path,
            params,
            RedirectReason::Login,
        )
    }

    /// Query parameters that keep the tenant selected across a redirect.
    fn carried_params(
        &self,
        candidate: &CandidateSubdomain,
        return_to: Option<String>,
    ) -> Vec<(&'static str, String)> {
        let mut params = Vec::new();
        if candidate.source == SubdomainSource::QueryParameter {
            params.push((SUBDOMAIN_QUERY_PARAM, candidate.label.clone()));
        }
        if let Some(path) = return_to {
            params.push((RETURN_URL_PARAM, path));
        }
        params
    }

    /// `<scheme>://<request host><path>[?params]`.
    ///
    /// A missing or malformed request host is replaced by the app domain.
    fn same_host_redirect(
        &self,
        target: &RequestTarget,
        path: &str,
        params: Vec<(&'static str, String)>,
        reason: RedirectReason,
    ) -> RouteDecision {
        let url = Some(target.host())
            .filter(|host| !host.is_empty())
            .and_then(|host| self.build_url(host, path))
            .or_else(|| self.build_url(&self.config.app_domain, path));

        match url {
            Some(mut url) => {
                if !params.is_empty() {
                    url.query_pairs_mut().extend_pairs(params);
                }
                RouteDecision::redirect(url.to_string(), reason)
            }
            None => self.main_domain_redirect(),
        }
    }

    /// `<scheme>://<subdomain>.<app domain><path>`, query dropped.
    fn tenant_redirect(&self, target: &RequestTarget, subdomain: &Subdomain) -> RouteDecision {
        let host = format!("{}.{}", subdomain, self.config.app_domain);
        match self.build_url(&host, target.path()) {
            Some(url) => RouteDecision::redirect(url.to_string(), RedirectReason::TenantSubdomain),
            None => self.main_domain_redirect(),
        }
    }

    fn build_url(&self, host: &str, path: &str) -> Option<Url> {
        let raw = format!("{}://{}", self.config.scheme(), host);
        match Url::parse(&raw) {
            Ok(mut url) if is_bare_origin(&url) => {
                url.set_path(path);
                Some(url)
            }
            Ok(_) => {
                tracing::warn!(host = %host, "Host is not a plain authority, ignoring it");
                None
            }
            Err(e) => {
                tracing::warn!(host = %host, error = %e, "Cannot build redirect URL");
                None
            }
        }
    }
}

/// True when `url` is nothing but scheme, host, and port.
///
/// Userinfo, paths, queries, and fragments smuggled in through the `Host`
/// header would otherwise change where the redirect points.
fn is_bare_origin(url: &Url) -> bool {
    url.username().is_empty()
        && url.password().is_none()
        && url.path() == "/"
        && url.query().is_none()
        && url.fragment().is_none()
}

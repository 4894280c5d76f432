//! Router configuration passed in at construction.

use url::Url;

use super::request::strip_port;
use super::PathRules;
use crate::domain::foundation::ValidationError;

/// Everything the router needs to know about its environment.
///
/// Built once at startup from `TenancyConfig`; the router never reads
/// process environment itself.
#[derive(Debug, Clone)]
pub struct RouterConfig {
    /// Local development: bare localhost bypasses tenant checks and
    /// `<label>.localhost` hosts are recognised.
    pub is_development: bool,
    /// Canonical domain, with port if non-standard (`lifelegacy.me`,
    /// `localhost:3000`).
    pub app_domain: String,
    /// Canonical origin of the main domain (`https://lifelegacy.me`).
    pub app_url: Url,
    pub paths: PathRules,
    /// Attach `returnUrl=<path>` to login redirects.
    pub login_return_url: bool,
}

impl RouterConfig {
    pub fn new(
        is_development: bool,
        app_domain: impl Into<String>,
        app_url: &str,
    ) -> Result<Self, ValidationError> {
        let app_domain = app_domain.into().trim().to_ascii_lowercase();
        if app_domain.is_empty() {
            return Err(ValidationError::empty_field("app_domain"));
        }

        let app_url = Url::parse(app_url)
            .map_err(|e| ValidationError::invalid_format("app_url", e.to_string()))?;
        if !matches!(app_url.scheme(), "http" | "https") || app_url.host_str().is_none() {
            return Err(ValidationError::invalid_format(
                "app_url",
                "must be an absolute http(s) URL",
            ));
        }

        Ok(Self {
            is_development,
            app_domain,
            app_url,
            paths: PathRules::default(),
            login_return_url: false,
        })
    }

    pub fn with_paths(mut self, paths: PathRules) -> Self {
        self.paths = paths;
        self
    }

    pub fn with_login_return_url(mut self, enabled: bool) -> Self {
        self.login_return_url = enabled;
        self
    }

    /// App domain without its port.
    pub fn app_hostname(&self) -> &str {
        strip_port(&self.app_domain)
    }

    /// Scheme used for every redirect the router builds.
    pub fn scheme(&self) -> &str {
        self.app_url.scheme()
    }

    /// `<app_url>/`, the landing page for unknown tenants.
    pub fn main_domain_root(&self) -> String {
        let mut url = self.app_url.clone();
        url.set_path("/");
        url.set_query(None);
        url.set_fragment(None);
        url.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_valid_config() {
        let config = RouterConfig::new(false, "LifeLegacy.me", "https://lifelegacy.me").unwrap();
        assert_eq!(config.app_domain, "lifelegacy.me");
        assert_eq!(config.scheme(), "https");
        assert!(!config.login_return_url);
    }

    #[test]
    fn app_hostname_drops_port() {
        let config = RouterConfig::new(true, "localhost:3000", "http://localhost:3000").unwrap();
        assert_eq!(config.app_hostname(), "localhost");
    }

    #[test]
    fn main_domain_root_has_trailing_slash() {
        let config = RouterConfig::new(false, "lifelegacy.me", "https://lifelegacy.me").unwrap();
        assert_eq!(config.main_domain_root(), "https://lifelegacy.me/");

        let config =
            RouterConfig::new(false, "lifelegacy.me", "https://lifelegacy.me/home?x=1").unwrap();
        assert_eq!(config.main_domain_root(), "https://lifelegacy.me/");
    }

    #[test]
    fn rejects_empty_domain() {
        assert!(RouterConfig::new(false, " ", "https://lifelegacy.me").is_err());
    }

    #[test]
    fn rejects_relative_or_non_http_url() {
        assert!(RouterConfig::new(false, "lifelegacy.me", "lifelegacy.me").is_err());
        assert!(RouterConfig::new(false, "lifelegacy.me", "ftp://lifelegacy.me").is_err());
    }
}

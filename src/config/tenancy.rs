//! Tenancy configuration
//!
//! Path lists are comma-separated so they can be set from a single
//! environment variable (`LIFELEGACY__TENANCY__PROTECTED_PREFIXES=/dashboard,/settings`).

use serde::Deserialize;
use url::Url;

use super::error::ValidationError;
use super::server::Environment;
use crate::domain::tenancy::{PathRules, RouterConfig};

/// Tenancy configuration
#[derive(Debug, Clone, Deserialize)]
pub struct TenancyConfig {
    /// Canonical domain, with port if non-standard (`lifelegacy.me`)
    pub app_domain: String,

    /// Canonical origin of the main domain (`https://lifelegacy.me`)
    pub app_url: String,

    #[serde(default = "default_auth_prefix")]
    pub auth_prefix: String,

    #[serde(default = "default_login_path")]
    pub login_path: String,

    #[serde(default = "default_dashboard_path")]
    pub dashboard_path: String,

    /// Main-domain paths that require a session (comma-separated)
    #[serde(default = "default_protected_prefixes")]
    pub protected_prefixes: String,

    /// Paths never routed by tenant (comma-separated)
    #[serde(default = "default_excluded_prefixes")]
    pub excluded_prefixes: String,

    /// Attach `returnUrl` to login redirects
    #[serde(default)]
    pub login_return_url: bool,
}

impl TenancyConfig {
    pub fn protected_prefixes_list(&self) -> Vec<String> {
        split_list(&self.protected_prefixes)
    }

    pub fn excluded_prefixes_list(&self) -> Vec<String> {
        split_list(&self.excluded_prefixes)
    }

    /// Builds the router configuration for the given environment.
    pub fn to_router_config(&self, environment: &Environment) -> Result<RouterConfig, ValidationError> {
        let paths = PathRules {
            excluded_prefixes: self.excluded_prefixes_list(),
            auth_prefix: self.auth_prefix.clone(),
            login_path: self.login_path.clone(),
            dashboard_path: self.dashboard_path.clone(),
            protected_prefixes: self.protected_prefixes_list(),
        };

        let config = RouterConfig::new(
            *environment == Environment::Development,
            self.app_domain.clone(),
            &self.app_url,
        )
        .map_err(|e| ValidationError::InvalidAppUrl(e.to_string()))?;

        Ok(config
            .with_paths(paths)
            .with_login_return_url(self.login_return_url))
    }

    /// Validate tenancy configuration
    pub fn validate(&self, environment: &Environment) -> Result<(), ValidationError> {
        if self.app_domain.trim().is_empty() {
            return Err(ValidationError::MissingRequired("TENANCY__APP_DOMAIN"));
        }
        if self.app_url.trim().is_empty() {
            return Err(ValidationError::MissingRequired("TENANCY__APP_URL"));
        }

        let url = Url::parse(&self.app_url)
            .map_err(|e| ValidationError::InvalidAppUrl(e.to_string()))?;
        if !matches!(url.scheme(), "http" | "https") || url.host_str().is_none() {
            return Err(ValidationError::InvalidAppUrl(
                "must be an absolute http(s) URL".to_string(),
            ));
        }
        if *environment == Environment::Production && url.scheme() != "https" {
            return Err(ValidationError::AppUrlMustBeHttps);
        }

        for path in [&self.login_path, &self.dashboard_path] {
            if !path.starts_with('/') {
                return Err(ValidationError::InvalidPathPrefix(path.clone()));
            }
        }

        // A root prefix would match every path.
        let prefixes = std::iter::once(self.auth_prefix.clone())
            .chain(self.protected_prefixes_list())
            .chain(self.excluded_prefixes_list());
        for prefix in prefixes {
            if !prefix.starts_with('/') {
                return Err(ValidationError::InvalidPathPrefix(prefix));
            }
            if prefix.trim_end_matches('/').is_empty() {
                return Err(ValidationError::RootPathPrefix(prefix));
            }
        }

        Ok(())
    }
}

fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}

fn default_auth_prefix() -> String {
    "/auth".to_string()
}

fn default_login_path() -> String {
    "/auth/login".to_string()
}

fn default_dashboard_path() -> String {
    "/dashboard".to_string()
}

fn default_protected_prefixes() -> String {
    "/dashboard,/settings".to_string()
}

fn default_excluded_prefixes() -> String {
    "/_next,/assets,/static,/api".to_string()
}

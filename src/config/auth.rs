//! Authentication configuration
//!
//! Access tokens are JWTs issued by the external auth service. They are
//! verified either with a shared HS256 secret or against the issuer's
//! JWKS endpoint; the secret wins when both are set.

use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;
use super::server::Environment;
use crate::adapters::auth::JwtConfig;

/// Authentication configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AuthConfig {
    /// Shared HS256 signing secret
    #[serde(default)]
    pub jwt_secret: Option<SecretString>,

    /// JWKS endpoint of the token issuer
    #[serde(default)]
    pub jwks_url: Option<String>,

    /// Expected `iss` claim
    #[serde(default)]
    pub issuer: Option<String>,

    /// Expected `aud` claim
    #[serde(default)]
    pub audience: Option<String>,

    /// JWKS cache TTL in seconds
    #[serde(default = "default_jwks_cache_ttl")]
    pub jwks_cache_ttl_secs: u64,

    /// Cookie carrying the access token when no Bearer header is sent
    #[serde(default = "default_session_cookie")]
    pub session_cookie: String,
}

impl AuthConfig {
    /// Get JWKS cache TTL as Duration
    pub fn jwks_cache_ttl(&self) -> Duration {
        Duration::from_secs(self.jwks_cache_ttl_secs)
    }

    fn secret(&self) -> Option<&SecretString> {
        self.jwt_secret
            .as_ref()
            .filter(|s| !s.expose_secret().is_empty())
    }

    fn jwks(&self) -> Option<&str> {
        self.jwks_url.as_deref().filter(|u| !u.is_empty())
    }

    /// Builds the JWT adapter configuration.
    pub fn jwt_config(&self) -> Result<JwtConfig, ValidationError> {
        let config = match (self.secret(), self.jwks()) {
            (Some(secret), _) => JwtConfig::shared_secret(secret.clone()),
            (None, Some(url)) => JwtConfig::jwks(url).with_cache_duration(self.jwks_cache_ttl()),
            (None, None) => return Err(ValidationError::NoKeySourceConfigured),
        };

        let config = match self.issuer.as_deref().filter(|s| !s.is_empty()) {
            Some(issuer) => config.with_issuer(issuer),
            None => config,
        };
        Ok(match self.audience.as_deref().filter(|s| !s.is_empty()) {
            Some(audience) => config.with_audience(audience),
            None => config,
        })
    }

    /// Validate authentication configuration
    ///
    /// Requires a key source. In production a JWKS endpoint must use HTTPS.
    pub fn validate(&self, environment: &Environment) -> Result<(), ValidationError> {
        if self.secret().is_none() && self.jwks().is_none() {
            return Err(ValidationError::NoKeySourceConfigured);
        }

        if let Some(url) = self.jwks() {
            if *environment == Environment::Production && !url.starts_with("https://") {
                return Err(ValidationError::JwksUrlMustBeHttps);
            }
        }

        if self.session_cookie.trim().is_empty() {
            return Err(ValidationError::MissingRequired("AUTH__SESSION_COOKIE"));
        }

        Ok(())
    }
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: None,
            jwks_url: None,
            issuer: None,
            audience: None,
            jwks_cache_ttl_secs: default_jwks_cache_ttl(),
            session_cookie: default_session_cookie(),
        }
    }
}

fn default_jwks_cache_ttl() -> u64 {
    3600
}

fn default_session_cookie() -> String {
    "ll-access-token".to_string()
}

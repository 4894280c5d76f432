//! JWT session validator.
//!
//! Validates access tokens issued by the hosted auth service. Two key
//! sources are supported:
//!
//! - **Shared secret** (HS256), the auth service's project JWT secret
//! - **JWKS**, public keys fetched from the issuer and cached
//!
//! # Security
//!
//! Every token is checked for:
//! - **Signature** against the configured key source
//! - **Expiry (exp)** and presence of `sub`
//! - **Issuer (iss)** and **Audience (aud)** when configured
//!
//! # Example
//!
//! ```ignore
//! let config = JwtConfig::shared_secret(SecretString::new(secret))
//!     .with_audience("authenticated");
//! let validator = JwtSessionValidator::new(config)?;
//! let principal = validator.validate("eyJ...").await?;
//! ```

use std::sync::Arc;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use jsonwebtoken::{
    decode, decode_header, jwk::JwkSet, Algorithm, DecodingKey, Header, TokenData, Validation,
};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;

use crate::domain::foundation::{AuthError, Principal, UserId};
use crate::ports::SessionValidator;

const DEFAULT_JWKS_CACHE: Duration = Duration::from_secs(3600);

/// Minimum age of the cached key set before an unknown `kid` triggers a
/// refetch.
const MIN_JWKS_REFRESH: Duration = Duration::from_secs(30);

/// Where signature keys come from.
#[derive(Clone)]
pub enum KeySource {
    SharedSecret(SecretString),
    Jwks {
        url: String,
        cache_duration: Option<Duration>,
    },
}

impl std::fmt::Debug for KeySource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            KeySource::SharedSecret(_) => f.write_str("SharedSecret([REDACTED])"),
            KeySource::Jwks { url, .. } => f.debug_struct("Jwks").field("url", url).finish(),
        }
    }
}

/// Configuration for the JWT adapter.
#[derive(Debug, Clone)]
pub struct JwtConfig {
    pub key_source: KeySource,
    /// Expected `iss` claim, if enforced.
    pub issuer: Option<String>,
    /// Expected `aud` claim, if enforced.
    pub audience: Option<String>,
}

impl JwtConfig {
    pub fn shared_secret(secret: SecretString) -> Self {
        Self {
            key_source: KeySource::SharedSecret(secret),
            issuer: None,
            audience: None,
        }
    }

    pub fn jwks(url: impl Into<String>) -> Self {
        Self {
            key_source: KeySource::Jwks {
                url: url.into(),
                cache_duration: None,
            },
            issuer: None,
            audience: None,
        }
    }

    pub fn with_issuer(mut self, issuer: impl Into<String>) -> Self {
        self.issuer = Some(issuer.into());
        self
    }

    pub fn with_audience(mut self, audience: impl Into<String>) -> Self {
        self.audience = Some(audience.into());
        self
    }

    /// Set custom JWKS cache duration. No effect for shared secrets.
    pub fn with_cache_duration(mut self, duration: Duration) -> Self {
        if let KeySource::Jwks { cache_duration, .. } = &mut self.key_source {
            *cache_duration = Some(duration);
        }
        self
    }
}

/// Claims read from access tokens.
#[derive(Debug, Serialize, Deserialize)]
struct SessionClaims {
    sub: String,

    exp: i64,

    #[serde(default)]
    aud: Audience,

    #[serde(default)]
    email: Option<String>,

    #[serde(default)]
    email_verified: Option<bool>,
}

/// Audience can be a single string or array of strings in JWTs.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(untagged)]
enum Audience {
    #[default]
    None,
    Single(String),
    Multiple(Vec<String>),
}

impl Audience {
    fn contains(&self, expected: &str) -> bool {
        match self {
            Audience::None => false,
            Audience::Single(s) => s == expected,
            Audience::Multiple(v) => v.iter().any(|s| s == expected),
        }
    }
}

/// Cached JWKS with expiry tracking.
struct JwksCache {
    jwks: JwkSet,
    fetched_at: Instant,
    cache_duration: Duration,
}

impl JwksCache {
    fn new(jwks: JwkSet, cache_duration: Duration) -> Self {
        Self {
            jwks,
            fetched_at: Instant::now(),
            cache_duration,
        }
    }

    fn is_expired(&self) -> bool {
        self.fetched_at.elapsed() > self.cache_duration
    }
}

pub struct JwtSessionValidator {
    config: JwtConfig,
    http_client: reqwest::Client,
    jwks_cache: Arc<RwLock<Option<JwksCache>>>,
}

impl JwtSessionValidator {
    /// Create a new validator. JWKS keys are fetched lazily on first use.
    pub fn new(config: JwtConfig) -> Result<Self, AuthError> {
        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(10))
            .build()
            .map_err(|e| AuthError::service_unavailable(format!("HTTP client: {}", e)))?;

        Ok(Self {
            config,
            http_client,
            jwks_cache: Arc::new(RwLock::new(None)),
        })
    }

    async fn fetch_jwks(&self, url: &str) -> Result<JwkSet, AuthError> {
        tracing::debug!("Fetching JWKS from {}", url);

        let response = self.http_client.get(url).send().await.map_err(|e| {
            tracing::error!("Failed to fetch JWKS: {}", e);
            AuthError::ServiceUnavailable(format!("Failed to fetch JWKS: {}", e))
        })?;

        if !response.status().is_success() {
            let status = response.status();
            tracing::error!("JWKS endpoint returned {}", status);
            return Err(AuthError::ServiceUnavailable(format!(
                "JWKS endpoint returned {}",
                status
            )));
        }

        let jwks: JwkSet = response.json().await.map_err(|e| {
            tracing::error!("Failed to parse JWKS: {}", e);
            AuthError::ServiceUnavailable(format!("Failed to parse JWKS: {}", e))
        })?;

        tracing::debug!("Fetched {} keys from JWKS", jwks.keys.len());

        Ok(jwks)
    }

    /// Get JWKS, using cache if available and not expired.
    async fn get_jwks(
        &self,
        url: &str,
        cache_duration: Option<Duration>,
    ) -> Result<JwkSet, AuthError> {
        {
            let cache = self.jwks_cache.read().await;
            if let Some(ref cached) = *cache {
                if !cached.is_expired() {
                    return Ok(cached.jwks.clone());
                }
            }
        }

        self.store_jwks(url, cache_duration).await
    }

    /// Refetch JWKS after a key rotation, unless the cache is very recent.
    async fn refresh_jwks(
        &self,
        url: &str,
        cache_duration: Option<Duration>,
    ) -> Result<JwkSet, AuthError> {
        {
            let cache = self.jwks_cache.read().await;
            if let Some(ref cached) = *cache {
                if cached.fetched_at.elapsed() < MIN_JWKS_REFRESH {
                    return Ok(cached.jwks.clone());
                }
            }
        }

        tracing::info!("Unknown signing key, refreshing JWKS");
        self.store_jwks(url, cache_duration).await
    }

    async fn store_jwks(
        &self,
        url: &str,
        cache_duration: Option<Duration>,
    ) -> Result<JwkSet, AuthError> {
        let jwks = self.fetch_jwks(url).await?;

        {
            let mut cache = self.jwks_cache.write().await;
            *cache = Some(JwksCache::new(
                jwks.clone(),
                cache_duration.unwrap_or(DEFAULT_JWKS_CACHE),
            ));
        }

        Ok(jwks)
    }

    async fn decoding_key(&self, header: &Header) -> Result<(DecodingKey, Algorithm), AuthError> {
        match &self.config.key_source {
            KeySource::SharedSecret(secret) => {
                if header.alg != Algorithm::HS256 {
                    tracing::warn!("Unexpected algorithm for shared secret: {:?}", header.alg);
                    return Err(AuthError::InvalidToken);
                }
                Ok((
                    DecodingKey::from_secret(secret.expose_secret().as_bytes()),
                    Algorithm::HS256,
                ))
            }
            KeySource::Jwks {
                url,
                cache_duration,
            } => {
                let jwks = self.get_jwks(url, *cache_duration).await?;
                if has_key_for(header, &jwks) {
                    return find_jwk_key(header, &jwks);
                }
                let jwks = self.refresh_jwks(url, *cache_duration).await?;
                find_jwk_key(header, &jwks)
            }
        }
    }

    fn validate_token(
        &self,
        token: &str,
        decoding_key: &DecodingKey,
        algorithm: Algorithm,
    ) -> Result<TokenData<SessionClaims>, AuthError> {
        let mut validation = Validation::new(algorithm);

        match &self.config.issuer {
            Some(issuer) => validation.set_issuer(&[issuer]),
            None => validation.iss = None,
        }
        match &self.config.audience {
            Some(audience) => validation.set_audience(&[audience]),
            None => validation.validate_aud = false,
        }

        validation.validate_exp = true;
        validation.set_required_spec_claims(&["exp", "sub"]);

        decode::<SessionClaims>(token, decoding_key, &validation).map_err(|e| {
            use jsonwebtoken::errors::ErrorKind;
            match e.kind() {
                ErrorKind::ExpiredSignature => {
                    tracing::debug!("Token expired");
                    AuthError::TokenExpired
                }
                ErrorKind::InvalidIssuer => {
                    tracing::warn!("Invalid issuer in token");
                    AuthError::InvalidToken
                }
                ErrorKind::InvalidAudience => {
                    tracing::warn!("Invalid audience in token");
                    AuthError::InvalidToken
                }
                _ => {
                    tracing::warn!("Token validation failed: {}", e);
                    AuthError::InvalidToken
                }
            }
        })
    }
}

fn has_key_for(header: &Header, jwks: &JwkSet) -> bool {
    header
        .kid
        .as_deref()
        .map_or(true, |kid| jwks.find(kid).is_some())
}

fn find_jwk_key(header: &Header, jwks: &JwkSet) -> Result<(DecodingKey, Algorithm), AuthError> {
    let kid = header.kid.as_ref().ok_or_else(|| {
        tracing::warn!("JWT missing 'kid' header");
        AuthError::InvalidToken
    })?;

    let jwk = jwks.find(kid).ok_or_else(|| {
        tracing::warn!("No matching key found for kid: {}", kid);
        AuthError::InvalidToken
    })?;

    let algorithm = match jwk.common.key_algorithm {
        Some(jsonwebtoken::jwk::KeyAlgorithm::RS256) => Algorithm::RS256,
        Some(jsonwebtoken::jwk::KeyAlgorithm::RS384) => Algorithm::RS384,
        Some(jsonwebtoken::jwk::KeyAlgorithm::RS512) => Algorithm::RS512,
        Some(jsonwebtoken::jwk::KeyAlgorithm::ES256) => Algorithm::ES256,
        Some(jsonwebtoken::jwk::KeyAlgorithm::ES384) => Algorithm::ES384,
        Some(other) => {
            tracing::warn!("Unsupported algorithm: {:?}", other);
            return Err(AuthError::InvalidToken);
        }
        // Key without `alg`: trust the token header
        None => header.alg,
    };

    let decoding_key = DecodingKey::from_jwk(jwk).map_err(|e| {
        tracing::warn!("Failed to create decoding key: {}", e);
        AuthError::InvalidToken
    })?;

    Ok((decoding_key, algorithm))
}

#[async_trait]
impl SessionValidator for JwtSessionValidator {
    async fn validate(&self, token: &str) -> Result<Principal, AuthError> {
        let header = decode_header(token).map_err(|e| {
            tracing::debug!("Failed to decode JWT header: {}", e);
            AuthError::InvalidToken
        })?;

        let (decoding_key, algorithm) = self.decoding_key(&header).await?;
        let claims = self.validate_token(token, &decoding_key, algorithm)?.claims;

        if let Some(expected) = &self.config.audience {
            if !claims.aud.contains(expected) {
                tracing::warn!(
                    "Audience mismatch after validation: expected '{}', got '{:?}'",
                    expected,
                    claims.aud
                );
                return Err(AuthError::InvalidToken);
            }
        }

        let user_id = UserId::new(&claims.sub).map_err(|_| {
            tracing::warn!("Invalid user ID in token: {:?}", claims.sub);
            AuthError::InvalidToken
        })?;

        Ok(Principal::new(
            user_id,
            claims.email,
            claims.email_verified.unwrap_or(false),
        ))
    }
}

impl std::fmt::Debug for JwtSessionValidator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtSessionValidator")
            .field("key_source", &self.config.key_source)
            .field("issuer", &self.config.issuer)
            .field("audience", &self.config.audience)
            .finish_non_exhaustive()
    }
}

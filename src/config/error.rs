//! Configuration error types

use thiserror::Error;

/// Errors that can occur during configuration loading
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration loading failed: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Validation failed: {0}")]
    ValidationFailed(#[from] ValidationError),
}

/// Errors that can occur during configuration validation
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("Required configuration missing: {0}")]
    MissingRequired(&'static str),

    #[error("Invalid port number")]
    InvalidPort,

    #[error("Invalid request timeout")]
    InvalidTimeout,

    #[error("Invalid database URL format")]
    InvalidDatabaseUrl,

    #[error("Pool min_connections exceeds max_connections")]
    InvalidPoolSize,

    #[error("Pool size exceeds maximum allowed (100)")]
    PoolSizeTooLarge,

    #[error("Invalid app URL: {0}")]
    InvalidAppUrl(String),

    #[error("App URL must use HTTPS in production")]
    AppUrlMustBeHttps,

    #[error("Invalid path prefix: {0} (must start with '/')")]
    InvalidPathPrefix(String),

    #[error("Path prefix must not be the root: {0}")]
    RootPathPrefix(String),

    #[error("No token key source configured (set auth.jwt_secret or auth.jwks_url)")]
    NoKeySourceConfigured,

    #[error("JWKS URL must use HTTPS in production")]
    JwksUrlMustBeHttps,
}

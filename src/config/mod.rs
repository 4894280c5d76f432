//! Application configuration module
//!
//! This module provides type-safe configuration loading from environment variables
//! using the `config` and `dotenvy` crates. Configuration is loaded with the
//! `LIFELEGACY` prefix and nested values use double underscores as separators.
//!
//! # Example
//!
//! ```no_run
//! use lifelegacy_gateway::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//!
//! println!("Serving {}", config.tenancy.app_domain);
//! ```

mod auth;
mod database;
mod error;
mod server;
mod tenancy;

pub use auth::AuthConfig;
pub use database::DatabaseConfig;
pub use error::{ConfigError, ValidationError};
pub use server::{Environment, LogFormat, ServerConfig};
pub use tenancy::TenancyConfig;

use serde::Deserialize;

use crate::domain::tenancy::RouterConfig;

/// Root application configuration
///
/// Load using [`AppConfig::load()`] which reads from environment variables.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Server configuration (host, port, environment, logging)
    #[serde(default)]
    pub server: ServerConfig,

    /// Domains and path rules for tenant routing
    pub tenancy: TenancyConfig,

    /// Database configuration (PostgreSQL connection, optional in development)
    #[serde(default)]
    pub database: DatabaseConfig,

    /// Access token verification
    #[serde(default)]
    pub auth: AuthConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// This function:
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads environment variables with `LIFELEGACY` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    /// 4. Deserializes into typed configuration structs
    ///
    /// # Environment Variable Format
    ///
    /// - `LIFELEGACY__SERVER__PORT=8080` -> `server.port = 8080`
    /// - `LIFELEGACY__TENANCY__APP_DOMAIN=lifelegacy.me` -> `tenancy.app_domain = ...`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if:
    /// - Required environment variables are missing
    /// - Values cannot be parsed into expected types
    pub fn load() -> Result<Self, ConfigError> {
        // Load .env file if present (development)
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("LIFELEGACY")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    ///
    /// Performs semantic validation of configuration:
    /// - URL formats and path prefixes
    /// - Pool size constraints
    /// - A token key source
    /// - Production-specific requirements (HTTPS, a database)
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if any configuration value is invalid.
    pub fn validate(&self) -> Result<(), ValidationError> {
        let environment = &self.server.environment;
        self.server.validate()?;
        self.tenancy.validate(environment)?;
        self.database.validate(self.is_production())?;
        self.auth.validate(environment)?;
        Ok(())
    }

    /// Check if running in production environment
    pub fn is_production(&self) -> bool {
        self.server.is_production()
    }

    /// Router configuration for the current environment.
    pub fn router_config(&self) -> Result<RouterConfig, ValidationError> {
        self.tenancy.to_router_config(&self.server.environment)
    }
}

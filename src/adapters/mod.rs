//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `auth` - Session token validation (JWT) and session accessors
//! - `tenancy` - In-memory tenant directory
//! - `postgres` - PostgreSQL tenant directory
//! - `http` - axum middleware and router

pub mod auth;
pub mod http;
pub mod postgres;
pub mod tenancy;

pub use postgres::PostgresTenantDirectory;
pub use tenancy::InMemoryTenantDirectory;

//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (IDs, auth types, errors)
//! - `tenancy` - Subdomain resolution, path rules, and routing outcomes

pub mod foundation;
pub mod tenancy;

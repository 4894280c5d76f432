//! Foundation module - Shared domain primitives.
//!
//! Contains identifiers, auth types, and error types that form the
//! vocabulary of the LifeLegacy domain.

mod auth;
mod errors;
mod ids;

pub use auth::{AuthError, Principal};
pub use errors::{DomainError, ErrorCode, ValidationError};
pub use ids::{OrganizationId, ProfessionalId, UserId};

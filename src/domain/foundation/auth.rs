//! Authentication types for the domain layer.
//!
//! A `Principal` is the identity of the caller as reported by the external
//! auth service. The router only cares whether one is present and, for
//! professionals, which user id it carries.
//!
//! These types have **no provider dependencies** - any token issuer can
//! populate them via the `SessionValidator` port.

use super::UserId;
use thiserror::Error;

/// Identity of the currently authenticated caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Principal {
    /// The unique user identifier from the auth service (`sub` claim).
    pub id: UserId,

    /// User's email address, when the token carries one.
    pub email: Option<String>,

    /// Whether the auth service has verified the email address.
    pub email_verified: bool,
}

impl Principal {
    /// Creates a new principal.
    pub fn new(id: UserId, email: Option<String>, email_verified: bool) -> Self {
        Self {
            id,
            email,
            email_verified,
        }
    }

    /// Creates a principal that only carries an id.
    pub fn from_id(id: UserId) -> Self {
        Self::new(id, None, false)
    }
}

/// Authentication errors that can occur during token validation.
#[derive(Debug, Clone, Error)]
pub enum AuthError {
    /// The token is malformed, has a bad signature, or wrong claims.
    #[error("Invalid or expired token")]
    InvalidToken,

    /// The token has expired (separate from InvalidToken for specific handling).
    #[error("Token expired")]
    TokenExpired,

    /// The authentication service is unavailable (network, config, etc.).
    #[error("Auth service unavailable: {0}")]
    ServiceUnavailable(String),
}

impl AuthError {
    /// Creates a service unavailable error with a message.
    pub fn service_unavailable(message: impl Into<String>) -> Self {
        Self::ServiceUnavailable(message.into())
    }

    /// Returns true if the token itself was rejected, as opposed to the
    /// service failing to answer.
    pub fn is_rejection(&self) -> bool {
        matches!(self, AuthError::InvalidToken | AuthError::TokenExpired)
    }

    /// Returns true if this is a transient error that may succeed on retry.
    pub fn is_transient(&self) -> bool {
        matches!(self, AuthError::ServiceUnavailable(_))
    }
}

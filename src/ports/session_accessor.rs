//! Session accessor port.
//!
//! Answers one question per request: who, if anyone, is signed in. The
//! HTTP layer extracts the raw session token (bearer header or session
//! cookie) and hands it over; the accessor decides what it means.

use async_trait::async_trait;

use crate::domain::foundation::{AuthError, Principal};

/// Resolves the current principal from a request's session token.
///
/// # Contract
///
/// - `Ok(None)` when there is no token, or the token is rejected
///   (invalid, expired); an anonymous visitor is not an error
/// - `Err(AuthError::ServiceUnavailable)` when the answer is unknown;
///   the router treats this as unauthenticated
#[async_trait]
pub trait SessionAccessor: Send + Sync {
    async fn current_principal(&self, token: Option<&str>)
        -> Result<Option<Principal>, AuthError>;
}

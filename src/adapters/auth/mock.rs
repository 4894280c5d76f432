//! Mock authentication adapters for testing.
//!
//! These adapters implement the `SessionValidator` and `SessionAccessor`
//! ports without a real token issuer.
//!
//! # Example
//!
//! ```ignore
//! use lifelegacy_gateway::adapters::auth::MockSessionAccessor;
//!
//! let sessions = MockSessionAccessor::new()
//!     .with_test_principal("token-1", UserId::new("user-1")?);
//! let principal = sessions.current_principal(Some("token-1")).await?;
//! assert!(principal.is_some());
//! ```

use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;

use crate::domain::foundation::{AuthError, Principal, UserId};
use crate::ports::{SessionAccessor, SessionValidator};

fn test_principal(user_id: UserId) -> Principal {
    let email = format!("{}@test.example.com", user_id);
    Principal::new(user_id, Some(email), true)
}

/// Mock session validator for testing.
///
/// Stores a map of tokens to principals. Tokens not in the map return
/// `InvalidToken`.
#[derive(Debug, Default)]
pub struct MockSessionValidator {
    tokens: RwLock<HashMap<String, Principal>>,
    /// Optional error to return for all validations (for error testing)
    force_error: RwLock<Option<AuthError>>,
}

impl MockSessionValidator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a valid token that maps to a principal.
    pub fn with_principal(self, token: impl Into<String>, principal: Principal) -> Self {
        self.tokens.write().unwrap().insert(token.into(), principal);
        self
    }

    /// Adds a valid token for a generated test principal.
    pub fn with_test_principal(self, token: impl Into<String>, user_id: UserId) -> Self {
        self.with_principal(token, test_principal(user_id))
    }

    /// Forces all validations to return the specified error.
    pub fn with_error(self, error: AuthError) -> Self {
        *self.force_error.write().unwrap() = Some(error);
        self
    }

    /// Clears the forced error and returns to normal operation.
    pub fn clear_error(&self) {
        *self.force_error.write().unwrap() = None;
    }

    /// Removes a token, making it invalid.
    pub fn remove_token(&self, token: &str) {
        self.tokens.write().unwrap().remove(token);
    }
}

#[async_trait]
impl SessionValidator for MockSessionValidator {
    async fn validate(&self, token: &str) -> Result<Principal, AuthError> {
        if let Some(error) = self.force_error.read().unwrap().clone() {
            return Err(error);
        }

        self.tokens
            .read()
            .unwrap()
            .get(token)
            .cloned()
            .ok_or(AuthError::InvalidToken)
    }
}

/// Mock session accessor for testing.
///
/// Unknown or missing tokens resolve to `None`.
#[derive(Debug, Default)]
pub struct MockSessionAccessor {
    tokens: RwLock<HashMap<String, Principal>>,
    force_error: RwLock<Option<AuthError>>,
}

impl MockSessionAccessor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_principal(self, token: impl Into<String>, principal: Principal) -> Self {
        self.tokens.write().unwrap().insert(token.into(), principal);
        self
    }

    pub fn with_test_principal(self, token: impl Into<String>, user_id: UserId) -> Self {
        self.with_principal(token, test_principal(user_id))
    }

    /// Forces every lookup to fail, even for anonymous requests.
    pub fn with_error(self, error: AuthError) -> Self {
        *self.force_error.write().unwrap() = Some(error);
        self
    }

    pub fn clear_error(&self) {
        *self.force_error.write().unwrap() = None;
    }
}

#[async_trait]
impl SessionAccessor for MockSessionAccessor {
    async fn current_principal(
        &self,
        token: Option<&str>,
    ) -> Result<Option<Principal>, AuthError> {
        if let Some(error) = self.force_error.read().unwrap().clone() {
            return Err(error);
        }

        Ok(token.and_then(|t| self.tokens.read().unwrap().get(t).cloned()))
    }
}

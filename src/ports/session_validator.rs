//! Session validation port for JWT access tokens.
//!
//! Provider-agnostic: the JWT adapter handles shared-secret and JWKS
//! issuers, and the mock adapter serves tests.
//!
//! # Security Requirements
//!
//! All implementations MUST validate:
//! - **Signature**: against the issuer's key
//! - **Expiry (exp)**: Token must not be expired
//! - **Issuer/Audience**: when configured

use async_trait::async_trait;

use crate::domain::foundation::{AuthError, Principal};

/// Validates access tokens and extracts the principal.
///
/// # Contract
///
/// Implementations must:
/// - Return `AuthError::InvalidToken` for malformed/bad signature tokens
/// - Return `AuthError::TokenExpired` for expired tokens
/// - Return `AuthError::ServiceUnavailable` for transient errors
#[async_trait]
pub trait SessionValidator: Send + Sync {
    /// Validate a raw JWT (without "Bearer " prefix).
    async fn validate(&self, token: &str) -> Result<Principal, AuthError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::UserId;
    use std::collections::HashMap;
    use std::sync::RwLock;

    /// Simple mock implementation for testing the trait
    struct TestSessionValidator {
        tokens: RwLock<HashMap<String, Principal>>,
    }

    impl TestSessionValidator {
        fn new() -> Self {
            Self {
                tokens: RwLock::new(HashMap::new()),
            }
        }

        fn add_valid_token(&self, token: &str, principal: Principal) {
            self.tokens
                .write()
                .unwrap()
                .insert(token.to_string(), principal);
        }
    }

    #[async_trait]
    impl SessionValidator for TestSessionValidator {
        async fn validate(&self, token: &str) -> Result<Principal, AuthError> {
            self.tokens
                .read()
                .unwrap()
                .get(token)
                .cloned()
                .ok_or(AuthError::InvalidToken)
        }
    }

    #[tokio::test]
    async fn session_validator_returns_principal_for_valid_token() {
        let validator = TestSessionValidator::new();
        validator.add_valid_token(
            "valid-token-123",
            Principal::from_id(UserId::new("user-123").unwrap()),
        );

        let principal = validator.validate("valid-token-123").await.unwrap();
        assert_eq!(principal.id.as_str(), "user-123");
    }

    #[tokio::test]
    async fn session_validator_returns_error_for_invalid_token() {
        let validator = TestSessionValidator::new();

        let result = validator.validate("invalid-token").await;

        assert!(matches!(result, Err(AuthError::InvalidToken)));
    }

    #[test]
    fn session_validator_trait_is_send_sync() {
        fn assert_send_sync<T: Send + Sync + ?Sized>() {}
        assert_send_sync::<dyn SessionValidator>();
    }
}

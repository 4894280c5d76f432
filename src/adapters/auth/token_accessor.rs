//! `SessionAccessor` backed by a `SessionValidator`.
//!
//! Maps validator outcomes onto the accessor contract: a missing or
//! rejected token is an anonymous visitor, only an unreachable issuer is
//! an error.

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::foundation::{AuthError, Principal};
use crate::ports::{SessionAccessor, SessionValidator};

pub struct TokenSessionAccessor {
    validator: Arc<dyn SessionValidator>,
}

impl TokenSessionAccessor {
    pub fn new(validator: Arc<dyn SessionValidator>) -> Self {
        Self { validator }
    }
}

#[async_trait]
impl SessionAccessor for TokenSessionAccessor {
    async fn current_principal(
        &self,
        token: Option<&str>,
    ) -> Result<Option<Principal>, AuthError> {
        let Some(token) = token.filter(|t| !t.is_empty()) else {
            return Ok(None);
        };

        match self.validator.validate(token).await {
            Ok(principal) => Ok(Some(principal)),
            Err(e) if e.is_rejection() => {
                tracing::debug!(error = %e, "Session token rejected");
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }
}

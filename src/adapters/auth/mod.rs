//! Authentication adapters.
//!
//! Implementations of the `SessionValidator` and `SessionAccessor` ports:
//!
//! - `jwt` - Access token validation against a shared secret or JWKS
//! - `token_accessor` - `SessionAccessor` over any `SessionValidator`
//! - `mock` - Test implementations that don't require external services

mod jwt;
mod mock;
mod token_accessor;

pub use jwt::{JwtConfig, JwtSessionValidator, KeySource};
pub use mock::{MockSessionAccessor, MockSessionValidator};
pub use token_accessor::TokenSessionAccessor;

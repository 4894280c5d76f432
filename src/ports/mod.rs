//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! ## Tenancy Ports
//!
//! - `TenantDirectory` - Organization and professional lookups
//!
//! ## Auth Ports
//!
//! - `SessionValidator` - Validates a JWT and returns the principal
//! - `SessionAccessor` - Resolves the current principal, if any

mod session_accessor;
mod session_validator;
mod tenant_directory;

pub use session_accessor::SessionAccessor;
pub use session_validator::SessionValidator;
pub use tenant_directory::TenantDirectory;

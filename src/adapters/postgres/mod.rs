//! PostgreSQL adapters.
//!
//! - `tenant_directory` - Organization and professional lookups

mod tenant_directory;

pub use tenant_directory::PostgresTenantDirectory;

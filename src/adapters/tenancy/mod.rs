//! Tenant directory adapters.
//!
//! - `in_memory` - Process-local directory for development and tests
//! - PostgreSQL lives in `adapters::postgres`

mod in_memory;

pub use in_memory::InMemoryTenantDirectory;

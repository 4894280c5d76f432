//! Tenant directory port (read side).
//!
//! Read-only lookups against the organization and professional tables
//! owned by the external database. The router issues at most one call per
//! request and never writes.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, UserId};
use crate::domain::tenancy::{OrganizationSummary, ProfessionalTenancy, Subdomain};

/// Reader port for tenant lookups.
///
/// # Contract
///
/// - `Ok(None)` when no row matches
/// - `Err(DomainError)` only for infrastructure failures; callers treat it
///   the same as `Ok(None)`
#[async_trait]
pub trait TenantDirectory: Send + Sync {
    /// Find the organization that owns a subdomain.
    async fn find_organization_by_subdomain(
        &self,
        subdomain: &Subdomain,
    ) -> Result<Option<OrganizationSummary>, DomainError>;

    /// Find the professional record for an authenticated principal, joined
    /// to its organization's subdomain.
    async fn find_professional_by_principal(
        &self,
        user_id: &UserId,
    ) -> Result<Option<ProfessionalTenancy>, DomainError>;
}

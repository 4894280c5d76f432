//! In-memory tenant directory.
//!
//! Backs local development when no database is configured, and serves as
//! the directory fake in tests.
//!
//! # Example
//!
//! ```ignore
//! let acme = Organization::new("Acme Law", Subdomain::new("acme")?);
//! let directory = InMemoryTenantDirectory::new()
//!     .with_professional(Professional::new(UserId::new("user-1")?, acme.id))
//!     .with_organization(acme);
//! ```

use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, OrganizationId, UserId};
use crate::domain::tenancy::{
    Organization, OrganizationSummary, Professional, ProfessionalTenancy, Subdomain,
};
use crate::ports::TenantDirectory;

#[derive(Debug, Default)]
pub struct InMemoryTenantDirectory {
    organizations: RwLock<HashMap<OrganizationId, Organization>>,
    professionals: RwLock<HashMap<UserId, Professional>>,
    /// Optional error to return for all lookups (for error testing)
    force_error: RwLock<Option<DomainError>>,
}

impl InMemoryTenantDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_organization(self, organization: Organization) -> Self {
        self.add_organization(organization);
        self
    }

    pub fn with_professional(self, professional: Professional) -> Self {
        self.add_professional(professional);
        self
    }

    /// Forces all lookups to return the specified error.
    pub fn with_error(self, error: DomainError) -> Self {
        *self.force_error.write().unwrap() = Some(error);
        self
    }

    /// Clears the forced error and returns to normal operation.
    pub fn clear_error(&self) {
        *self.force_error.write().unwrap() = None;
    }

    /// Inserts or replaces an organization.
    pub fn add_organization(&self, organization: Organization) {
        self.organizations
            .write()
            .unwrap()
            .insert(organization.id, organization);
    }

    /// Inserts or replaces the professional record for a user.
    pub fn add_professional(&self, professional: Professional) {
        self.professionals
            .write()
            .unwrap()
            .insert(professional.user_id.clone(), professional);
    }

    pub fn organization_count(&self) -> usize {
        self.organizations.read().unwrap().len()
    }

    fn check_error(&self) -> Result<(), DomainError> {
        match self.force_error.read().unwrap().clone() {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl TenantDirectory for InMemoryTenantDirectory {
    async fn find_organization_by_subdomain(
        &self,
        subdomain: &Subdomain,
    ) -> Result<Option<OrganizationSummary>, DomainError> {
        self.check_error()?;

        Ok(self
            .organizations
            .read()
            .unwrap()
            .values()
            .find(|o| o.subdomain.as_ref() == Some(subdomain))
            .map(Organization::summary))
    }

    async fn find_professional_by_principal(
        &self,
        user_id: &UserId,
    ) -> Result<Option<ProfessionalTenancy>, DomainError> {
        self.check_error()?;

        let professionals = self.professionals.read().unwrap();
        let Some(professional) = professionals.get(user_id) else {
            return Ok(None);
        };

        let organizations = self.organizations.read().unwrap();
        Ok(Some(
            professional.tenancy(organizations.get(&professional.organization_id)),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::ErrorCode;

    fn acme() -> Organization {
        Organization::new("Acme Law", Subdomain::new("acme").unwrap())
    }

    fn user(id: &str) -> UserId {
        UserId::new(id).unwrap()
    }

    #[tokio::test]
    async fn finds_organization_by_subdomain() {
        let org = acme();
        let directory = InMemoryTenantDirectory::new().with_organization(org.clone());

        let found = directory
            .find_organization_by_subdomain(&Subdomain::new("acme").unwrap())
            .await
            .unwrap();

        assert_eq!(found, Some(OrganizationSummary::new(org.id, true)));
    }

    #[tokio::test]
    async fn reports_inactive_organization() {
        let directory = InMemoryTenantDirectory::new().with_organization(acme().deactivated());

        let found = directory
            .find_organization_by_subdomain(&Subdomain::new("acme").unwrap())
            .await
            .unwrap()
            .unwrap();

        assert!(!found.active);
    }

    #[tokio::test]
    async fn unknown_subdomain_is_none() {
        let directory = InMemoryTenantDirectory::new().with_organization(acme());

        let found = directory
            .find_organization_by_subdomain(&Subdomain::new("ghost").unwrap())
            .await
            .unwrap();

        assert!(found.is_none());
    }

    #[tokio::test]
    async fn finds_professional_joined_to_subdomain() {
        let org = acme();
        let directory = InMemoryTenantDirectory::new()
            .with_professional(Professional::new(user("user-1"), org.id))
            .with_organization(org.clone());

        let tenancy = directory
            .find_professional_by_principal(&user("user-1"))
            .await
            .unwrap()
            .unwrap();

        assert_eq!(tenancy.organization_id, org.id);
        assert_eq!(
            tenancy.organization_subdomain.as_ref().map(Subdomain::as_str),
            Some("acme")
        );
        assert!(tenancy.organization_active);
    }

    #[tokio::test]
    async fn professional_with_missing_organization_has_no_subdomain() {
        let directory = InMemoryTenantDirectory::new()
            .with_professional(Professional::new(user("user-1"), OrganizationId::new()));

        let tenancy = directory
            .find_professional_by_principal(&user("user-1"))
            .await
            .unwrap()
            .unwrap();

        assert!(tenancy.organization_subdomain.is_none());
    }

    #[tokio::test]
    async fn unknown_principal_is_none() {
        let directory = InMemoryTenantDirectory::new();
        let found = directory
            .find_professional_by_principal(&user("nobody"))
            .await
            .unwrap();
        assert!(found.is_none());
    }

    #[tokio::test]
    async fn forced_error_is_returned_until_cleared() {
        let directory = InMemoryTenantDirectory::new()
            .with_organization(acme())
            .with_error(DomainError::database("Simulated outage"));
        let acme_sub = Subdomain::new("acme").unwrap();

        let result = directory.find_organization_by_subdomain(&acme_sub).await;
        assert!(matches!(result, Err(e) if e.code == ErrorCode::DatabaseError));

        directory.clear_error();
        assert!(directory
            .find_organization_by_subdomain(&acme_sub)
            .await
            .unwrap()
            .is_some());
    }
}

//! Organizations, professionals, and the projections the router reads.
//!
//! Both entities are owned by the external database; this crate only
//! reads them.

use serde::{Deserialize, Serialize};

use super::Subdomain;
use crate::domain::foundation::{OrganizationId, ProfessionalId, UserId};

/// A tenant organization as stored in the directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Organization {
    pub id: OrganizationId,
    pub name: String,
    /// Globally unique; `None` until onboarding assigns one.
    pub subdomain: Option<Subdomain>,
    /// Inactive organizations are unreachable through their subdomain.
    pub active: bool,
}

impl Organization {
    /// Creates an active organization with a fresh id.
    pub fn new(name: impl Into<String>, subdomain: Subdomain) -> Self {
        Self {
            id: OrganizationId::new(),
            name: name.into(),
            subdomain: Some(subdomain),
            active: true,
        }
    }

    pub fn deactivated(mut self) -> Self {
        self.active = false;
        self
    }

    pub fn summary(&self) -> OrganizationSummary {
        OrganizationSummary::new(self.id, self.active)
    }
}

/// A professional's membership in one organization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Professional {
    pub id: ProfessionalId,
    pub user_id: UserId,
    pub organization_id: OrganizationId,
}

impl Professional {
    pub fn new(user_id: UserId, organization_id: OrganizationId) -> Self {
        Self {
            id: ProfessionalId::new(),
            user_id,
            organization_id,
        }
    }

    /// Joins this professional to their organization.
    pub fn tenancy(&self, organization: Option<&Organization>) -> ProfessionalTenancy {
        ProfessionalTenancy {
            professional_id: self.id,
            organization_id: self.organization_id,
            organization_subdomain: organization.and_then(|o| o.subdomain.clone()),
            organization_active: organization.map(|o| o.active).unwrap_or(false),
        }
    }
}

/// Result of looking up an organization by its subdomain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrganizationSummary {
    pub id: OrganizationId,
    pub active: bool,
}

impl OrganizationSummary {
    pub fn new(id: OrganizationId, active: bool) -> Self {
        Self { id, active }
    }
}

/// A professional's link to their organization, joined to its subdomain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfessionalTenancy {
    pub professional_id: ProfessionalId,
    pub organization_id: OrganizationId,
    /// `None` when the organization has no (valid) subdomain yet.
    pub organization_subdomain: Option<Subdomain>,
    pub organization_active: bool,
}

impl ProfessionalTenancy {
    /// Subdomain the professional should be sent to, if their organization
    /// is reachable through one.
    pub fn home_subdomain(&self) -> Option<&Subdomain> {
        if self.organization_active {
            self.organization_subdomain.as_ref()
        } else {
            None
        }
    }
}

/// Tenant resolved for a forwarded request.
///
/// Inserted into request extensions so downstream handlers can scope
/// their queries to the organization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TenantContext {
    pub organization_id: OrganizationId,
    pub subdomain: Subdomain,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tenancy(subdomain: Option<&str>, active: bool) -> ProfessionalTenancy {
        ProfessionalTenancy {
            professional_id: ProfessionalId::new(),
            organization_id: OrganizationId::new(),
            organization_subdomain: subdomain.map(|s| Subdomain::new(s).unwrap()),
            organization_active: active,
        }
    }

    #[test]
    fn organization_new_is_active() {
        let org = Organization::new("Acme Law", Subdomain::new("acme").unwrap());
        assert!(org.active);
        assert!(!org.clone().deactivated().active);
        assert_eq!(org.summary(), OrganizationSummary::new(org.id, true));
    }

    #[test]
    fn professional_tenancy_joins_organization() {
        let org = Organization::new("Acme Law", Subdomain::new("acme").unwrap());
        let pro = Professional::new(UserId::new("user-1").unwrap(), org.id);

        let joined = pro.tenancy(Some(&org));
        assert_eq!(joined.organization_id, org.id);
        assert_eq!(joined.home_subdomain().map(Subdomain::as_str), Some("acme"));

        let orphan = pro.tenancy(None);
        assert!(orphan.home_subdomain().is_none());
    }

    #[test]
    fn home_subdomain_for_active_organization() {
        let t = tenancy(Some("acme"), true);
        assert_eq!(t.home_subdomain().map(Subdomain::as_str), Some("acme"));
    }

    #[test]
    fn no_home_subdomain_when_organization_inactive() {
        assert!(tenancy(Some("acme"), false).home_subdomain().is_none());
    }

    #[test]
    fn no_home_subdomain_when_missing() {
        assert!(tenancy(None, true).home_subdomain().is_none());
    }
}

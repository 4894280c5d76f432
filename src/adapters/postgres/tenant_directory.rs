//! PostgreSQL implementation of TenantDirectory.
//!
//! Two read-only queries against the `organizations` and `professionals`
//! tables (see `migrations/0001_tenancy.sql`).

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::foundation::{DomainError, OrganizationId, ProfessionalId, UserId};
use crate::domain::tenancy::{OrganizationSummary, ProfessionalTenancy, Subdomain};
use crate::ports::TenantDirectory;

#[derive(Clone)]
pub struct PostgresTenantDirectory {
    pool: PgPool,
}

impl PostgresTenantDirectory {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Row for organization-by-subdomain lookups.
#[derive(Debug, sqlx::FromRow)]
struct OrganizationRow {
    id: Uuid,
    active: bool,
}

/// Row for professional-by-principal lookups, joined to the organization.
#[derive(Debug, sqlx::FromRow)]
struct ProfessionalRow {
    id: Uuid,
    organization_id: Uuid,
    organization_subdomain: Option<String>,
    organization_active: Option<bool>,
}

impl From<OrganizationRow> for OrganizationSummary {
    fn from(row: OrganizationRow) -> Self {
        OrganizationSummary::new(OrganizationId::from_uuid(row.id), row.active)
    }
}

impl From<ProfessionalRow> for ProfessionalTenancy {
    fn from(row: ProfessionalRow) -> Self {
        let organization_subdomain = row.organization_subdomain.and_then(|raw| {
            Subdomain::new(&raw)
                .map_err(|e| {
                    tracing::warn!(
                        organization_id = %row.organization_id,
                        subdomain = %raw,
                        error = %e,
                        "Stored organization subdomain is invalid"
                    );
                })
                .ok()
        });

        ProfessionalTenancy {
            professional_id: ProfessionalId::from_uuid(row.id),
            organization_id: OrganizationId::from_uuid(row.organization_id),
            organization_subdomain,
            organization_active: row.organization_active.unwrap_or(false),
        }
    }
}

#[async_trait]
impl TenantDirectory for PostgresTenantDirectory {
    async fn find_organization_by_subdomain(
        &self,
        subdomain: &Subdomain,
    ) -> Result<Option<OrganizationSummary>, DomainError> {
        let row: Option<OrganizationRow> = sqlx::query_as(
            r#"
            SELECT id, active
            FROM organizations
            WHERE subdomain = $1
            "#,
        )
        .bind(subdomain.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DomainError::database(format!("Failed to fetch organization: {}", e)))?;

        Ok(row.map(OrganizationSummary::from))
    }

    async fn find_professional_by_principal(
        &self,
        user_id: &UserId,
    ) -> Result<Option<ProfessionalTenancy>, DomainError> {
        let row: Option<ProfessionalRow> = sqlx::query_as(
            r#"
            SELECT p.id, p.organization_id,
                   o.subdomain AS organization_subdomain,
                   o.active AS organization_active
            FROM professionals p
            LEFT JOIN organizations o ON o.id = p.organization_id
            WHERE p.user_id = $1
            LIMIT 1
            "#,
        )
        .bind(user_id.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DomainError::database(format!("Failed to fetch professional: {}", e)))?;

        Ok(row.map(ProfessionalTenancy::from))
    }
}

//! Organization repository

use anyhow::{Context, Result};
use sqlx::SqlitePool;
use uuid::Uuid;

use crate::models::{CreateOrganizationRequest, EntityState, Organization, UpdateOrganizationRequest};

#[derive(Debug, sqlx::FromRow)]
struct OrganizationRow {
    id: String,
    name: String,
    state: String,
}

pub struct OrganizationRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> OrganizationRepository<'a> {
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn list(&self) -> Result<Vec<Organization>> {
        let rows = sqlx::query_as::<_, OrganizationRow>(
            r#"
            SELECT id, name, state
            FROM organizations
            ORDER BY rowid
            "#,
        )
        .fetch_all(self.pool)
        .await
        .context("Failed to list organizations")?;

        rows.into_iter().map(row_to_org).collect()
    }

    pub async fn get_by_id(&self, id: Uuid) -> Result<Option<Organization>> {
        let row = sqlx::query_as::<_, OrganizationRow>(
            r#"
            SELECT id, name, state
            FROM organizations
            WHERE id = ?
            "#,
        )
        .bind(id.to_string())
        .fetch_optional(self.pool)
        .await
        .context("Failed to get organization")?;

        row.map(row_to_org).transpose()
    }

    pub async fn create(&self, req: &CreateOrganizationRequest) -> Result<Organization> {
        let row = sqlx::query_as::<_, OrganizationRow>(
            r#"
            INSERT INTO organizations (id, name, state)
            VALUES (?, ?, ?)
            RETURNING id, name, state
            "#,
        )
        .bind(Uuid::new_v4().to_string())
        .bind(&req.name)
        .bind(EntityState::Active.as_str())
        .fetch_one(self.pool)
        .await
        .context("Failed to create organization")?;

        row_to_org(row)
    }

    /// Merge the provided fields onto the stored row
    pub async fn update(
        &self,
        id: Uuid,
        req: &UpdateOrganizationRequest,
    ) -> Result<Option<Organization>> {
        let row = sqlx::query_as::<_, OrganizationRow>(
            r#"
            UPDATE organizations
            SET name = COALESCE(?, name),
                state = COALESCE(?, state)
            WHERE id = ?
            RETURNING id, name, state
            "#,
        )
        .bind(req.name.as_deref())
        .bind(req.state.map(|s| s.as_str()))
        .bind(id.to_string())
        .fetch_optional(self.pool)
        .await
        .context("Failed to update organization")?;

        row.map(row_to_org).transpose()
    }

    /// Remove the row, returning what was removed
    pub async fn delete(&self, id: Uuid) -> Result<Option<Organization>> {
        let row = sqlx::query_as::<_, OrganizationRow>(
            r#"
            DELETE FROM organizations
            WHERE id = ?
            RETURNING id, name, state
            "#,
        )
        .bind(id.to_string())
        .fetch_optional(self.pool)
        .await
        .context("Failed to delete organization")?;

        row.map(row_to_org).transpose()
    }
}

fn row_to_org(row: OrganizationRow) -> Result<Organization> {
    Ok(Organization {
        id: Uuid::parse_str(&row.id)
            .with_context(|| format!("Invalid organization id in database: {}", row.id))?,
        name: row.name,
        state: row.state.parse()?,
    })
}

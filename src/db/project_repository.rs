//! Project repository

use anyhow::{Context, Result};
use sqlx::SqlitePool;
use uuid::Uuid;

use crate::models::{CreateProjectRequest, EntityState, Project, UpdateProjectRequest};

#[derive(Debug, sqlx::FromRow)]
struct ProjectRow {
    id: String,
    name: String,
    organization: String,
    state: String,
}

pub struct ProjectRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> ProjectRepository<'a> {
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn list(&self) -> Result<Vec<Project>> {
        let rows = sqlx::query_as::<_, ProjectRow>(
            r#"
            SELECT id, name, organization, state
            FROM projects
            ORDER BY rowid
            "#,
        )
        .fetch_all(self.pool)
        .await
        .context("Failed to list projects")?;

        rows.into_iter().map(row_to_project).collect()
    }

    pub async fn get_by_id(&self, id: Uuid) -> Result<Option<Project>> {
        let row = sqlx::query_as::<_, ProjectRow>(
            r#"
            SELECT id, name, organization, state
            FROM projects
            WHERE id = ?
            "#,
        )
        .bind(id.to_string())
        .fetch_optional(self.pool)
        .await
        .context("Failed to get project")?;

        row.map(row_to_project).transpose()
    }

    /// Insert a project; the organization must already exist
    pub async fn create(&self, req: &CreateProjectRequest) -> Result<Project> {
        let row = sqlx::query_as::<_, ProjectRow>(
            r#"
            INSERT INTO projects (id, name, organization, state)
            VALUES (?, ?, ?, ?)
            RETURNING id, name, organization, state
            "#,
        )
        .bind(Uuid::new_v4().to_string())
        .bind(&req.name)
        .bind(req.organization.to_string())
        .bind(EntityState::Active.as_str())
        .fetch_one(self.pool)
        .await
        .context("Failed to create project")?;

        row_to_project(row)
    }

    pub async fn update(&self, id: Uuid, req: &UpdateProjectRequest) -> Result<Option<Project>> {
        let row = sqlx::query_as::<_, ProjectRow>(
            r#"
            UPDATE projects
            SET name = COALESCE(?, name),
                organization = COALESCE(?, organization),
                state = COALESCE(?, state)
            WHERE id = ?
            RETURNING id, name, organization, state
            "#,
        )
        .bind(req.name.as_deref())
        .bind(req.organization.map(|o| o.to_string()))
        .bind(req.state.map(|s| s.as_str()))
        .bind(id.to_string())
        .fetch_optional(self.pool)
        .await
        .context("Failed to update project")?;

        row.map(row_to_project).transpose()
    }

    pub async fn delete(&self, id: Uuid) -> Result<Option<Project>> {
        let row = sqlx::query_as::<_, ProjectRow>(
            r#"
            DELETE FROM projects
            WHERE id = ?
            RETURNING id, name, organization, state
            "#,
        )
        .bind(id.to_string())
        .fetch_optional(self.pool)
        .await
        .context("Failed to delete project")?;

        row.map(row_to_project).transpose()
    }

    /// Remove every project, returning the removed rows
    pub async fn clear(&self) -> Result<Vec<Project>> {
        let rows = sqlx::query_as::<_, ProjectRow>(
            r#"
            DELETE FROM projects
            RETURNING id, name, organization, state
            "#,
        )
        .fetch_all(self.pool)
        .await
        .context("Failed to clear projects")?;

        rows.into_iter().map(row_to_project).collect()
    }
}

fn row_to_project(row: ProjectRow) -> Result<Project> {
    Ok(Project {
        id: Uuid::parse_str(&row.id)
            .with_context(|| format!("Invalid project id in database: {}", row.id))?,
        name: row.name,
        organization: Uuid::parse_str(&row.organization).with_context(|| {
            format!("Invalid organization reference in database: {}", row.organization)
        })?,
        state: row.state.parse()?,
    })
}

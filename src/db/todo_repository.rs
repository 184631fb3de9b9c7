//! Todo repository

use anyhow::{Context, Result};
use sqlx::SqlitePool;
use uuid::Uuid;

use crate::models::{CreateTodoRequest, Todo, UpdateTodoRequest};

#[derive(Debug, sqlx::FromRow)]
struct TodoRow {
    id: String,
    title: String,
    code: i64,
    description: Option<String>,
    status: String,
    organization: String,
    project: String,
}

pub struct TodoRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> TodoRepository<'a> {
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn list(&self) -> Result<Vec<Todo>> {
        let rows = sqlx::query_as::<_, TodoRow>(
            r#"
            SELECT id, title, code, description, status, organization, project
            FROM todos
            ORDER BY code
            "#,
        )
        .fetch_all(self.pool)
        .await
        .context("Failed to list todos")?;

        rows.into_iter().map(row_to_todo).collect()
    }

    pub async fn get_by_id(&self, id: Uuid) -> Result<Option<Todo>> {
        let row = sqlx::query_as::<_, TodoRow>(
            r#"
            SELECT id, title, code, description, status, organization, project
            FROM todos
            WHERE id = ?
            "#,
        )
        .bind(id.to_string())
        .fetch_optional(self.pool)
        .await
        .context("Failed to get todo")?;

        row.map(row_to_todo).transpose()
    }

    pub async fn get_by_project_id(&self, project_id: Uuid) -> Result<Vec<Todo>> {
        let rows = sqlx::query_as::<_, TodoRow>(
            r#"
            SELECT id, title, code, description, status, organization, project
            FROM todos
            WHERE project = ?
            ORDER BY code
            "#,
        )
        .bind(project_id.to_string())
        .fetch_all(self.pool)
        .await
        .context("Failed to list todos for project")?;

        rows.into_iter().map(row_to_todo).collect()
    }

    /// Insert a todo. Without an explicit `code` the next number after the
    /// current maximum is taken, within the same statement.
    pub async fn create(&self, req: &CreateTodoRequest) -> Result<Todo> {
        let row = sqlx::query_as::<_, TodoRow>(
            r#"
            INSERT INTO todos (id, title, code, description, status, organization, project)
            VALUES (
                ?,
                ?,
                COALESCE(?, (SELECT COALESCE(MAX(code), 0) + 1 FROM todos)),
                ?,
                ?,
                ?,
                ?
            )
            RETURNING id, title, code, description, status, organization, project
            "#,
        )
        .bind(Uuid::new_v4().to_string())
        .bind(&req.title)
        .bind(req.code)
        .bind(req.description.as_deref())
        .bind(req.status.unwrap_or_default().as_str())
        .bind(req.organization.to_string())
        .bind(req.project.to_string())
        .fetch_one(self.pool)
        .await
        .context("Failed to create todo")?;

        row_to_todo(row)
    }

    pub async fn update(&self, id: Uuid, req: &UpdateTodoRequest) -> Result<Option<Todo>> {
        let row = sqlx::query_as::<_, TodoRow>(
            r#"
            UPDATE todos
            SET title = COALESCE(?, title),
                code = COALESCE(?, code),
                description = CASE WHEN ? THEN ? ELSE description END,
                status = COALESCE(?, status),
                organization = COALESCE(?, organization),
                project = COALESCE(?, project)
            WHERE id = ?
            RETURNING id, title, code, description, status, organization, project
            "#,
        )
        .bind(req.title.as_deref())
        .bind(req.code)
        .bind(req.description.is_some())
        .bind(req.description.as_ref().and_then(|d| d.as_deref()))
        .bind(req.status.map(|s| s.as_str()))
        .bind(req.organization.map(|o| o.to_string()))
        .bind(req.project.map(|p| p.to_string()))
        .bind(id.to_string())
        .fetch_optional(self.pool)
        .await
        .context("Failed to update todo")?;

        row.map(row_to_todo).transpose()
    }

    pub async fn delete(&self, id: Uuid) -> Result<Option<Todo>> {
        let row = sqlx::query_as::<_, TodoRow>(
            r#"
            DELETE FROM todos
            WHERE id = ?
            RETURNING id, title, code, description, status, organization, project
            "#,
        )
        .bind(id.to_string())
        .fetch_optional(self.pool)
        .await
        .context("Failed to delete todo")?;

        row.map(row_to_todo).transpose()
    }

    /// Remove every todo, returning the removed rows
    pub async fn clear(&self) -> Result<Vec<Todo>> {
        let rows = sqlx::query_as::<_, TodoRow>(
            r#"
            DELETE FROM todos
            RETURNING id, title, code, description, status, organization, project
            "#,
        )
        .fetch_all(self.pool)
        .await
        .context("Failed to clear todos")?;

        rows.into_iter().map(row_to_todo).collect()
    }
}

fn parse_uuid(value: &str, what: &str) -> Result<Uuid> {
    Uuid::parse_str(value).with_context(|| format!("Invalid {} in database: {}", what, value))
}

fn row_to_todo(row: TodoRow) -> Result<Todo> {
    Ok(Todo {
        id: parse_uuid(&row.id, "todo id")?,
        title: row.title,
        code: row.code,
        description: row.description,
        status: row.status.parse()?,
        organization: parse_uuid(&row.organization, "organization reference")?,
        project: parse_uuid(&row.project, "project reference")?,
    })
}

//! Todo model

use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

use super::Origin;

pub const TODOS_COLLECTION: &str = "todos";

/// Todo lifecycle status
///
/// `created -> completed` through a patch, `created | completed -> deleted`
/// through delete. Transitions are not restricted further.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TodoStatus {
    #[default]
    Created,
    Completed,
    Deleted,
}

impl TodoStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TodoStatus::Created => "created",
            TodoStatus::Completed => "completed",
            TodoStatus::Deleted => "deleted",
        }
    }
}

impl std::fmt::Display for TodoStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for TodoStatus {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "created" => Ok(TodoStatus::Created),
            "completed" => Ok(TodoStatus::Completed),
            "deleted" => Ok(TodoStatus::Deleted),
            other => anyhow::bail!("Unknown todo status: {}", other),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Todo {
    pub id: Uuid,
    pub title: String,
    /// Sequential number, distinct from `id`
    pub code: i64,
    pub description: Option<String>,
    pub status: TodoStatus,
    pub organization: Uuid,
    pub project: Uuid,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateTodoRequest {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    /// Assigned by the store when omitted
    #[serde(default)]
    pub code: Option<i64>,
    #[serde(default)]
    pub status: Option<TodoStatus>,
    pub organization: Uuid,
    pub project: Uuid,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateTodoRequest {
    #[serde(default)]
    pub title: Option<String>,
    /// `None` leaves the column alone, `Some(None)` clears it
    #[serde(default, deserialize_with = "present")]
    pub description: Option<Option<String>>,
    #[serde(default)]
    pub code: Option<i64>,
    #[serde(default)]
    pub status: Option<TodoStatus>,
    #[serde(default)]
    pub organization: Option<Uuid>,
    #[serde(default)]
    pub project: Option<Uuid>,
}

impl UpdateTodoRequest {
    pub fn with_status(status: TodoStatus) -> Self {
        Self {
            status: Some(status),
            ..Default::default()
        }
    }
}

/// Marks a field as present even when its value is `null`
fn present<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    T::deserialize(deserializer).map(Some)
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TodoView {
    pub id: Uuid,
    pub title: String,
    pub code: i64,
    pub description: Option<String>,
    pub status: TodoStatus,
    pub organization: Uuid,
    pub project: Uuid,
    pub url: String,
}

impl Todo {
    pub fn view(&self, origin: &Origin) -> TodoView {
        TodoView {
            id: self.id,
            title: self.title.clone(),
            code: self.code,
            description: self.description.clone(),
            status: self.status,
            organization: self.organization,
            project: self.project,
            url: origin.entity_url(TODOS_COLLECTION, &self.id),
        }
    }
}

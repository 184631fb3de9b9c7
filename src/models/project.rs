//! Project model
//!
//! A project belongs to exactly one organization. The reference is checked when
//! the project is created and left to the store's foreign key afterwards.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{EntityState, Origin};

pub const PROJECTS_COLLECTION: &str = "projects";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    pub id: Uuid,
    pub name: String,
    pub organization: Uuid,
    pub state: EntityState,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateProjectRequest {
    pub name: String,
    pub organization: Uuid,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateProjectRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub organization: Option<Uuid>,
    #[serde(default)]
    pub state: Option<EntityState>,
}

impl UpdateProjectRequest {
    pub fn with_state(state: EntityState) -> Self {
        Self {
            state: Some(state),
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectView {
    pub id: Uuid,
    pub name: String,
    pub state: EntityState,
    pub organization: Uuid,
    pub url: String,
}

impl Project {
    pub fn view(&self, origin: &Origin) -> ProjectView {
        ProjectView {
            id: self.id,
            name: self.name.clone(),
            state: self.state,
            organization: self.organization,
            url: origin.entity_url(PROJECTS_COLLECTION, &self.id),
        }
    }
}

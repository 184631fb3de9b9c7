//! Organization model

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{EntityState, Origin};

pub const ORGANIZATIONS_COLLECTION: &str = "organizations";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Organization {
    pub id: Uuid,
    pub name: String,
    pub state: EntityState,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateOrganizationRequest {
    pub name: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateOrganizationRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub state: Option<EntityState>,
}

impl UpdateOrganizationRequest {
    pub fn with_state(state: EntityState) -> Self {
        Self {
            state: Some(state),
            ..Default::default()
        }
    }
}

/// Externally visible shape of an organization
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrganizationView {
    pub id: Uuid,
    pub name: String,
    pub state: EntityState,
    pub url: String,
}

impl Organization {
    pub fn view(&self, origin: &Origin) -> OrganizationView {
        OrganizationView {
            id: self.id,
            name: self.name.clone(),
            state: self.state,
            url: origin.entity_url(ORGANIZATIONS_COLLECTION, &self.id),
        }
    }
}

//! Data models

mod organization;
mod project;
mod todo;
mod view;

pub use organization::*;
pub use project::*;
pub use todo::*;
pub use view::*;

use serde::{Deserialize, Serialize};

/// Activity state shared by organizations and projects
///
/// Freely reversible; `inactive` is also what a delete sets.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityState {
    #[default]
    Active,
    Inactive,
}

impl EntityState {
    pub fn as_str(&self) -> &'static str {
        match self {
            EntityState::Active => "active",
            EntityState::Inactive => "inactive",
        }
    }
}

impl std::fmt::Display for EntityState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for EntityState {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "active" => Ok(EntityState::Active),
            "inactive" => Ok(EntityState::Inactive),
            other => anyhow::bail!("Unknown entity state: {}", other),
        }
    }
}

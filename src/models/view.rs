//! Request origin used by the view projections
//!
//! Every response carries a `url` derived from the scheme and host the
//! request arrived on. URLs are never stored.

use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Origin {
    pub scheme: String,
    pub host: String,
}

impl Origin {
    pub fn new(scheme: impl Into<String>, host: impl Into<String>) -> Self {
        Self {
            scheme: scheme.into(),
            host: host.into(),
        }
    }

    /// Absolute URL of an entity, e.g. `http://localhost:5000/todos/<id>`
    pub fn entity_url(&self, collection: &str, id: &Uuid) -> String {
        format!("{}://{}/{}/{}", self.scheme, self.host, collection, id)
    }
}

//! API routes and handlers
//!
//! This module defines all API endpoints and their routing.

use axum::Router;

use crate::AppState;

mod organizations;
mod projects;
mod request;
mod todos;

pub use request::{origin_from_parts, PolicyRequest, PolicyResponse};

/// All entity routes
pub fn routes() -> Router<AppState> {
    Router::new()
        .nest("/organizations", organizations::routes())
        .nest("/projects", projects::routes())
        .nest("/todos", todos::routes())
}

/// Entity routes bound to their state, without transport layers
pub fn router(state: AppState) -> Router {
    routes().with_state(state)
}

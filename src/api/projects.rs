//! Project API endpoints

use axum::{
    routing::{get, post},
    Router,
};
use uuid::Uuid;

use crate::{
    api::{PolicyRequest, PolicyResponse},
    db::ProjectRepository,
    middleware::report_errors,
    models::{CreateProjectRequest, EntityState, ProjectView, UpdateProjectRequest},
    services::{check_project_parents, DbParentLookup},
    utils::{AppError, AppResult},
    AppState,
};

const NOT_FOUND: &str = "Project not found";

pub fn routes() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(report_errors(list_projects, "Could not fetch projects"))
                .post(report_errors(create_project, "Could not post projects")),
        )
        .route(
            "/{id}",
            get(report_errors(get_project, "Could not fetch projects"))
                .put(report_errors(update_project, "Could not update projects"))
                .delete(report_errors(delete_project, "Could not delete projects")),
        )
        .route(
            "/{id}/activate",
            post(report_errors(activate_project, "Could not activate projects")),
        )
        .route(
            "/{id}/deactivate",
            post(report_errors(deactivate_project, "Could not deactivate projects")),
        )
}

async fn list_projects(state: AppState, req: PolicyRequest) -> AppResult<PolicyResponse> {
    let repo = ProjectRepository::new(&state.db);
    let projects = repo.list().await?;

    if projects.is_empty() {
        return Err(AppError::not_found("Projects not found"));
    }

    let views: Vec<ProjectView> = projects.iter().map(|p| p.view(&req.origin)).collect();
    PolicyResponse::ok(views)
}

async fn get_project(state: AppState, req: PolicyRequest) -> AppResult<PolicyResponse> {
    let id = req.id_param("id", NOT_FOUND)?;

    let repo = ProjectRepository::new(&state.db);
    let project = repo
        .get_by_id(id)
        .await?
        .ok_or_else(|| AppError::not_found(NOT_FOUND))?;

    PolicyResponse::ok(project.view(&req.origin))
}

async fn create_project(state: AppState, req: PolicyRequest) -> AppResult<PolicyResponse> {
    let payload: CreateProjectRequest = req.json()?;

    check_project_parents(&DbParentLookup::new(&state.db), payload.organization)
        .await?
        .into_result()?;

    let repo = ProjectRepository::new(&state.db);
    let project = repo.create(&payload).await?;

    PolicyResponse::created(project.view(&req.origin))
}

/// Fields are merged as given; a changed organization is left to the store's
/// foreign key.
async fn update_project(state: AppState, req: PolicyRequest) -> AppResult<PolicyResponse> {
    let id = req.id_param("id", NOT_FOUND)?;
    let payload: UpdateProjectRequest = req.json()?;

    apply_update(&state, &req, id, &payload).await
}

async fn delete_project(state: AppState, req: PolicyRequest) -> AppResult<PolicyResponse> {
    set_state(state, req, EntityState::Inactive).await
}

async fn activate_project(state: AppState, req: PolicyRequest) -> AppResult<PolicyResponse> {
    set_state(state, req, EntityState::Active).await
}

async fn deactivate_project(state: AppState, req: PolicyRequest) -> AppResult<PolicyResponse> {
    set_state(state, req, EntityState::Inactive).await
}

/// Unconditional transition; repeating it returns the same state
async fn set_state(
    state: AppState,
    req: PolicyRequest,
    target: EntityState,
) -> AppResult<PolicyResponse> {
    let id = req.id_param("id", NOT_FOUND)?;
    apply_update(&state, &req, id, &UpdateProjectRequest::with_state(target)).await
}

async fn apply_update(
    state: &AppState,
    req: &PolicyRequest,
    id: Uuid,
    payload: &UpdateProjectRequest,
) -> AppResult<PolicyResponse> {
    let repo = ProjectRepository::new(&state.db);
    let project = repo
        .update(id, payload)
        .await?
        .ok_or_else(|| AppError::not_found(NOT_FOUND))?;

    PolicyResponse::ok(project.view(&req.origin))
}

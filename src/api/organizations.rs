//! Organization API endpoints

use axum::{routing::get, Router};

use crate::{
    api::{PolicyRequest, PolicyResponse},
    db::OrganizationRepository,
    middleware::report_errors,
    models::{
        CreateOrganizationRequest, EntityState, OrganizationView, UpdateOrganizationRequest,
    },
    utils::{AppError, AppResult},
    AppState,
};

const NOT_FOUND: &str = "Organization not found";

pub fn routes() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(report_errors(list_organizations, "Could not fetch organizations"))
                .post(report_errors(create_organization, "Could not post organization")),
        )
        .route(
            "/{id}",
            get(report_errors(get_organization, "Could not fetch organization"))
                .put(report_errors(update_organization, "Could not update organization"))
                .delete(report_errors(delete_organization, "Could not delete organization")),
        )
}

/// An empty collection is reported as not found
async fn list_organizations(state: AppState, req: PolicyRequest) -> AppResult<PolicyResponse> {
    let repo = OrganizationRepository::new(&state.db);
    let orgs = repo.list().await?;

    if orgs.is_empty() {
        return Err(AppError::not_found("Organizations not found"));
    }

    let views: Vec<OrganizationView> = orgs.iter().map(|o| o.view(&req.origin)).collect();
    PolicyResponse::ok(views)
}

async fn get_organization(state: AppState, req: PolicyRequest) -> AppResult<PolicyResponse> {
    let id = req.id_param("id", NOT_FOUND)?;

    let repo = OrganizationRepository::new(&state.db);
    let org = repo
        .get_by_id(id)
        .await?
        .ok_or_else(|| AppError::not_found(NOT_FOUND))?;

    PolicyResponse::ok(org.view(&req.origin))
}

async fn create_organization(state: AppState, req: PolicyRequest) -> AppResult<PolicyResponse> {
    let payload: CreateOrganizationRequest = req.json()?;

    let repo = OrganizationRepository::new(&state.db);
    let org = repo.create(&payload).await?;

    PolicyResponse::created(org.view(&req.origin))
}

async fn update_organization(state: AppState, req: PolicyRequest) -> AppResult<PolicyResponse> {
    let id = req.id_param("id", NOT_FOUND)?;
    let payload: UpdateOrganizationRequest = req.json()?;

    let repo = OrganizationRepository::new(&state.db);
    let org = repo
        .update(id, &payload)
        .await?
        .ok_or_else(|| AppError::not_found(NOT_FOUND))?;

    PolicyResponse::ok(org.view(&req.origin))
}

/// Soft delete: the row stays and becomes inactive
async fn delete_organization(state: AppState, req: PolicyRequest) -> AppResult<PolicyResponse> {
    let id = req.id_param("id", NOT_FOUND)?;

    let repo = OrganizationRepository::new(&state.db);
    let org = repo
        .update(id, &UpdateOrganizationRequest::with_state(EntityState::Inactive))
        .await?
        .ok_or_else(|| AppError::not_found(NOT_FOUND))?;

    PolicyResponse::ok(org.view(&req.origin))
}

//! Todo API endpoints

use axum::{routing::get, Router};

use crate::{
    api::{PolicyRequest, PolicyResponse},
    db::TodoRepository,
    middleware::report_errors,
    models::{CreateTodoRequest, Todo, TodoStatus, TodoView, UpdateTodoRequest},
    services::{check_todo_parents, DbParentLookup},
    utils::{AppError, AppResult},
    AppState,
};

const NOT_FOUND: &str = "Todo not found";

pub fn routes() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(report_errors(list_todos, "Could not fetch all todos"))
                .post(report_errors(create_todo, "Could not post todo"))
                .delete(report_errors(clear_todos, "Could not delete all todos")),
        )
        .route(
            "/projects/{project_id}",
            get(report_errors(list_project_todos, "Could not fetch project todos")),
        )
        .route(
            "/{id}",
            get(report_errors(get_todo, "Could not fetch todo"))
                .patch(report_errors(patch_todo, "Could not patch todo"))
                .delete(report_errors(delete_todo, "Could not delete todo")),
        )
}

fn views(todos: &[Todo], req: &PolicyRequest) -> Vec<TodoView> {
    todos.iter().map(|t| t.view(&req.origin)).collect()
}

async fn list_todos(state: AppState, req: PolicyRequest) -> AppResult<PolicyResponse> {
    let repo = TodoRepository::new(&state.db);
    let todos = repo.list().await?;

    if todos.is_empty() {
        return Err(AppError::not_found("Todos not found"));
    }

    PolicyResponse::ok(views(&todos, &req))
}

/// Todos of one project; no match is an empty list, not an error
async fn list_project_todos(state: AppState, req: PolicyRequest) -> AppResult<PolicyResponse> {
    let Ok(project_id) = req.id_param("project_id", "Project not found") else {
        return PolicyResponse::ok(Vec::<TodoView>::new());
    };

    let repo = TodoRepository::new(&state.db);
    let todos = repo.get_by_project_id(project_id).await?;

    PolicyResponse::ok(views(&todos, &req))
}

async fn get_todo(state: AppState, req: PolicyRequest) -> AppResult<PolicyResponse> {
    let id = req.id_param("id", NOT_FOUND)?;

    let repo = TodoRepository::new(&state.db);
    let todo = repo
        .get_by_id(id)
        .await?
        .ok_or_else(|| AppError::not_found(NOT_FOUND))?;

    PolicyResponse::ok(todo.view(&req.origin))
}

async fn create_todo(state: AppState, req: PolicyRequest) -> AppResult<PolicyResponse> {
    let payload: CreateTodoRequest = req.json()?;

    check_todo_parents(
        &DbParentLookup::new(&state.db),
        payload.organization,
        payload.project,
    )
    .await?
    .into_result()?;

    let repo = TodoRepository::new(&state.db);
    let todo = repo.create(&payload).await?;

    PolicyResponse::created(todo.view(&req.origin))
}

async fn patch_todo(state: AppState, req: PolicyRequest) -> AppResult<PolicyResponse> {
    let id = req.id_param("id", NOT_FOUND)?;
    let payload: UpdateTodoRequest = req.json()?;

    let repo = TodoRepository::new(&state.db);
    let todo = repo
        .update(id, &payload)
        .await?
        .ok_or_else(|| AppError::not_found(NOT_FOUND))?;

    PolicyResponse::ok(todo.view(&req.origin))
}

/// Hard delete of every todo
async fn clear_todos(state: AppState, req: PolicyRequest) -> AppResult<PolicyResponse> {
    let repo = TodoRepository::new(&state.db);
    let removed = repo.clear().await?;

    PolicyResponse::ok(views(&removed, &req))
}

/// Soft delete: the todo stays fetchable with status `deleted`
async fn delete_todo(state: AppState, req: PolicyRequest) -> AppResult<PolicyResponse> {
    let id = req.id_param("id", NOT_FOUND)?;

    let repo = TodoRepository::new(&state.db);
    let todo = repo
        .update(id, &UpdateTodoRequest::with_status(TodoStatus::Deleted))
        .await?
        .ok_or_else(|| AppError::not_found(NOT_FOUND))?;

    PolicyResponse::ok(todo.view(&req.origin))
}

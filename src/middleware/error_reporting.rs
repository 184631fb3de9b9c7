//! Error reporting wrapper
//!
//! Every entity handler is mounted through [`report_errors`]. The wrapper is
//! the single place where a handler outcome becomes an HTTP status: not-found
//! errors answer 404 with `{"error": message}`, everything else answers 500
//! with `Opps! <context>.` and keeps the detail in the server log.

use std::future::Future;

use axum::{
    extract::{Request, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use futures::future::{BoxFuture, FutureExt};
use serde::Serialize;
use tracing::{error, info, warn};

use crate::{
    api::{PolicyRequest, PolicyResponse},
    utils::{AppError, AppResult, ErrorKind},
    AppState,
};

/// Body of a 404 response
#[derive(Serialize, Debug)]
pub struct ErrorResponse {
    pub error: String,
}

/// Wrap a handler so its errors are logged and translated to HTTP responses.
///
/// `context` describes the operation, e.g. `"Could not fetch todo"`.
pub fn report_errors<H, Fut>(
    handler: H,
    context: &'static str,
) -> impl Fn(State<AppState>, Request) -> BoxFuture<'static, Response> + Clone + Send + Sync + 'static
where
    H: Fn(AppState, PolicyRequest) -> Fut + Clone + Send + Sync + 'static,
    Fut: Future<Output = AppResult<PolicyResponse>> + Send + 'static,
{
    move |State(state): State<AppState>, request: Request| {
        let handler = handler.clone();
        async move {
            let method = request.method().clone();
            let path = request.uri().path().to_string();
            let log_requests = state.config.request_logging_enabled();

            let outcome = match PolicyRequest::from_request(request, &state).await {
                Ok(req) => handler(state, req).await,
                Err(err) => Err(err),
            };

            match outcome {
                Ok(response) => {
                    if log_requests {
                        info!("{} {} {}", method, path, response.status.as_u16());
                    }
                    response.into_response()
                }
                Err(err) => {
                    if log_requests {
                        warn!("{} {} {}", method, path, err.status_code().as_u16());
                        match err.kind() {
                            ErrorKind::NotFound => warn!("{} caused by: {}", context, err),
                            ErrorKind::Internal => error!("{} caused by: {}", context, err),
                        }
                    }
                    error_response(&err, context)
                }
            }
        }
        .boxed()
    }
}

/// Translate an error into the response the caller sees
pub fn error_response(err: &AppError, context: &str) -> Response {
    match err.kind() {
        ErrorKind::NotFound => (
            err.status_code(),
            Json(ErrorResponse {
                error: err.to_string(),
            }),
        )
            .into_response(),
        ErrorKind::Internal => (
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("Opps! {}.", context),
        )
            .into_response(),
    }
}

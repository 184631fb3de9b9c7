//! Uniform request/response types handed to entity handlers
//!
//! Handlers never see axum extractors directly. The error reporting wrapper
//! turns the raw request into a [`PolicyRequest`] and the handler's
//! [`PolicyResponse`] back into HTTP.

use std::collections::HashMap;

use axum::{
    body::{Body, Bytes},
    extract::{FromRequestParts, Path, Request},
    http::{header, request::Parts, HeaderMap, Method, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::{de::DeserializeOwned, Serialize};
use uuid::Uuid;

use crate::{
    models::Origin,
    utils::{AppError, AppResult},
    AppState,
};

/// Upper bound on accepted request bodies
const MAX_BODY_BYTES: usize = 1024 * 1024;

#[derive(Debug, Clone)]
pub struct PolicyRequest {
    pub method: Method,
    pub path: String,
    pub params: HashMap<String, String>,
    pub body: Bytes,
    pub origin: Origin,
}

impl PolicyRequest {
    pub async fn from_request(request: Request, state: &AppState) -> AppResult<Self> {
        let (mut parts, body) = request.into_parts();

        // Routes without captures yield no params
        let params = Path::<HashMap<String, String>>::from_request_parts(&mut parts, state)
            .await
            .map(|Path(params)| params)
            .unwrap_or_default();

        let body = read_body(body).await?;

        Ok(Self {
            method: parts.method.clone(),
            path: parts.uri.path().to_string(),
            origin: origin_from_parts(&parts),
            params,
            body,
        })
    }

    /// Path parameter parsed as an id. Anything that is not a UUID cannot match
    /// a stored row, so it is reported as `not_found_message`.
    pub fn id_param(&self, name: &str, not_found_message: &str) -> AppResult<Uuid> {
        let raw = self
            .params
            .get(name)
            .ok_or_else(|| AppError::internal(format!("Missing path parameter: {}", name)))?;

        Uuid::parse_str(raw).map_err(|_| AppError::not_found(not_found_message))
    }

    /// Decode the JSON body
    pub fn json<T: DeserializeOwned>(&self) -> AppResult<T> {
        Ok(serde_json::from_slice(&self.body)?)
    }
}

async fn read_body(body: Body) -> AppResult<Bytes> {
    axum::body::to_bytes(body, MAX_BODY_BYTES)
        .await
        .map_err(|e| AppError::internal(format!("Failed to read request body: {}", e)))
}

fn header_value<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(|v| v.split(',').next().unwrap_or(v).trim())
        .filter(|v| !v.is_empty())
}

/// Scheme and host the client used, honouring reverse-proxy headers
pub fn origin_from_parts(parts: &Parts) -> Origin {
    let scheme = header_value(&parts.headers, "x-forwarded-proto")
        .or_else(|| parts.uri.scheme_str())
        .unwrap_or("http");

    let host = header_value(&parts.headers, "x-forwarded-host")
        .or_else(|| header_value(&parts.headers, header::HOST.as_str()))
        .or_else(|| parts.uri.authority().map(|a| a.as_str()))
        .unwrap_or("localhost");

    Origin::new(scheme, host)
}

#[derive(Debug, Clone)]
pub struct PolicyResponse {
    pub status: StatusCode,
    pub body: serde_json::Value,
}

impl PolicyResponse {
    pub fn ok<T: Serialize>(body: T) -> AppResult<Self> {
        Self::with_status(StatusCode::OK, body)
    }

    pub fn created<T: Serialize>(body: T) -> AppResult<Self> {
        Self::with_status(StatusCode::CREATED, body)
    }

    fn with_status<T: Serialize>(status: StatusCode, body: T) -> AppResult<Self> {
        Ok(Self {
            status,
            body: serde_json::to_value(body)?,
        })
    }
}

impl IntoResponse for PolicyResponse {
    fn into_response(self) -> Response {
        (self.status, Json(self.body)).into_response()
    }
}

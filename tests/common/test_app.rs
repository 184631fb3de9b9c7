//! Test application setup utilities
//!
//! Provides utilities for setting up test instances of the application
//! backed by a throwaway SQLite file.

use std::path::PathBuf;

use axum::{body::Body, http::Request, Router};
use tower::ServiceExt;
use uuid::Uuid;

use todo_backend::{
    api,
    config::{AppConfig, DatabaseConfig, Environment, LoggingConfig, ServerConfig},
    db, AppState,
};

/// Host header sent with every test request
pub const TEST_HOST: &str = "localhost:5000";

/// Test application wrapper for integration testing
pub struct TestApp {
    pub router: Router,
    pub state: AppState,
    db_path: Option<PathBuf>,
}

impl TestApp {
    /// Create a new test application with a fresh database
    pub async fn new() -> Self {
        Self::with_config(test_config()).await
    }

    /// Create a new test application with custom configuration
    pub async fn with_config(config: AppConfig) -> Self {
        let db = db::init_pool(&config.database)
            .await
            .expect("Failed to initialize test database");

        db::schema::prepare(&db, config.should_reset_schema())
            .await
            .expect("Failed to prepare test schema");

        let db_path = sqlite_file(&config.database.url);
        let state = AppState { config, db };
        let router = api::router(state.clone());

        Self {
            router,
            state,
            db_path,
        }
    }

    /// SQLite file backing this app, if any
    pub fn db_path(&self) -> Option<&PathBuf> {
        self.db_path.as_ref()
    }

    /// Make a GET request to the test application
    pub async fn get(&self, uri: &str) -> TestResponse {
        self.request(
            Request::builder()
                .method("GET")
                .uri(uri)
                .header("Host", TEST_HOST)
                .body(Body::empty())
                .unwrap(),
        )
        .await
    }

    /// Make a POST request with JSON body
    pub async fn post_json(&self, uri: &str, body: serde_json::Value) -> TestResponse {
        self.json_request("POST", uri, body).await
    }

    /// Make a POST request without a body
    pub async fn post_empty(&self, uri: &str) -> TestResponse {
        self.request(
            Request::builder()
                .method("POST")
                .uri(uri)
                .header("Host", TEST_HOST)
                .body(Body::empty())
                .unwrap(),
        )
        .await
    }

    /// Make a PUT request with JSON body
    pub async fn put_json(&self, uri: &str, body: serde_json::Value) -> TestResponse {
        self.json_request("PUT", uri, body).await
    }

    /// Make a PATCH request with JSON body
    pub async fn patch_json(&self, uri: &str, body: serde_json::Value) -> TestResponse {
        self.json_request("PATCH", uri, body).await
    }

    /// Make a DELETE request
    pub async fn delete(&self, uri: &str) -> TestResponse {
        self.request(
            Request::builder()
                .method("DELETE")
                .uri(uri)
                .header("Host", TEST_HOST)
                .body(Body::empty())
                .unwrap(),
        )
        .await
    }

    async fn json_request(&self, method: &str, uri: &str, body: serde_json::Value) -> TestResponse {
        self.request(
            Request::builder()
                .method(method)
                .uri(uri)
                .header("Host", TEST_HOST)
                .header("Content-Type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
    }

    /// Make an arbitrary request
    pub async fn request(&self, request: Request<Body>) -> TestResponse {
        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("Failed to execute request");

        let status = response.status();
        let headers = response.headers().clone();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("Failed to read response body");

        TestResponse {
            status,
            headers,
            body,
        }
    }
}

impl Drop for TestApp {
    fn drop(&mut self) {
        if let Some(path) = &self.db_path {
            for suffix in ["", "-wal", "-shm", "-journal"] {
                let mut file = path.clone().into_os_string();
                file.push(suffix);
                let _ = std::fs::remove_file(file);
            }
        }
    }
}

/// File path of a `sqlite://` url; `None` for in-memory databases
fn sqlite_file(url: &str) -> Option<PathBuf> {
    let path = url.strip_prefix("sqlite://")?;
    let path = path.split('?').next().unwrap_or(path);
    if path.is_empty() || path == ":memory:" {
        return None;
    }
    Some(PathBuf::from(path))
}

/// Response from a test request
#[derive(Debug)]
pub struct TestResponse {
    pub status: axum::http::StatusCode,
    pub headers: axum::http::HeaderMap,
    pub body: bytes::Bytes,
}

impl TestResponse {
    /// Get the response body as a string
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).to_string()
    }

    /// Parse the response body as JSON
    pub fn json<T: serde::de::DeserializeOwned>(&self) -> T {
        serde_json::from_slice(&self.body).expect("Failed to parse response as JSON")
    }

    /// Assert the response status
    pub fn assert_status(&self, expected: axum::http::StatusCode) -> &Self {
        assert_eq!(
            self.status,
            expected,
            "Expected status {}, got {}. Body: {}",
            expected,
            self.status,
            self.text()
        );
        self
    }

    /// Assert the response status is OK (200)
    pub fn assert_ok(&self) -> &Self {
        self.assert_status(axum::http::StatusCode::OK)
    }

    /// Assert the response status is Created (201)
    pub fn assert_created(&self) -> &Self {
        self.assert_status(axum::http::StatusCode::CREATED)
    }

    /// Assert the response status is Not Found (404)
    pub fn assert_not_found(&self) -> &Self {
        self.assert_status(axum::http::StatusCode::NOT_FOUND)
    }

    /// Assert the response status is Internal Server Error (500)
    pub fn assert_internal_error(&self) -> &Self {
        self.assert_status(axum::http::StatusCode::INTERNAL_SERVER_ERROR)
    }

    /// Assert a 404 carrying `{"error": message}`
    pub fn assert_not_found_message(&self, message: &str) -> &Self {
        self.assert_not_found();
        let json: serde_json::Value = self.json();
        assert_eq!(json["error"], message);
        self
    }
}

/// Create a test configuration with temporary SQLite database
pub fn test_config() -> AppConfig {
    // Use a unique temp file for each test to avoid conflicts
    let db_path = format!(
        "/tmp/todo_backend_test_{}.db",
        Uuid::new_v4().to_string().replace('-', "")
    );

    AppConfig {
        server: ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 5000,
        },
        database: DatabaseConfig {
            url: format!("sqlite://{}?mode=rwc", db_path),
            max_connections: 1,
            min_connections: 1,
            connect_timeout_secs: 30,
            reset_on_startup: true,
        },
        logging: LoggingConfig::default(),
        environment: Environment::Test,
    }
}

/// Path portion of an entity url returned by the API
pub fn url_path(url: &str) -> String {
    let prefix = format!("http://{}", TEST_HOST);
    url.strip_prefix(&prefix)
        .unwrap_or_else(|| panic!("url {} does not start with {}", url, prefix))
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_app_creation() {
        let app = TestApp::new().await;
        assert!(app.state.config.environment.is_test());
        assert!(!app.state.config.should_reset_schema());
    }

    #[tokio::test]
    async fn test_unknown_route_is_not_found() {
        let app = TestApp::new().await;
        app.get("/widgets").await.assert_not_found();
    }

    #[tokio::test]
    async fn test_database_file_removed_on_drop() {
        let app = TestApp::new().await;
        let path = app.db_path().cloned().expect("test app uses a file");
        assert!(path.exists());

        drop(app);
        assert!(!path.exists());
    }

    #[test]
    fn test_sqlite_file() {
        assert_eq!(
            sqlite_file("sqlite:///tmp/x.db?mode=rwc"),
            Some(PathBuf::from("/tmp/x.db"))
        );
        assert_eq!(sqlite_file("sqlite::memory:"), None);
    }

    #[test]
    fn test_url_path() {
        let path = url_path("http://localhost:5000/todos/abc");
        assert_eq!(path, "/todos/abc");
    }
}

//! Shared harness for HTTP-level integration tests
//!
//! Every test drives the real router over `tower::ServiceExt::oneshot`
//! against a fresh temporary database.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tempfile::TempDir;
use tower::ServiceExt;
use tutorium_domain::{AuthConfig, Config, DatabaseConfig};
use tutorium_lib::{build_router, AppContext};

/// A router wired to a throwaway database.
pub struct TestApp {
    router: Router,
    /// Keep the temporary directory alive for the lifetime of the app.
    _temp_dir: TempDir,
}

/// Create a new test app with fresh database state.
pub fn spawn_app() -> TestApp {
    let temp_dir = TempDir::new().expect("failed to create temporary database directory");
    let db_path = temp_dir.path().join("tutorium.db");

    let config = Config {
        database: DatabaseConfig {
            path: db_path.to_string_lossy().into_owned(),
            pool_size: 4,
        },
        auth: AuthConfig {
            token_secret: "integration-test-secret".to_string(),
            token_ttl_secs: 3600,
        },
        ..Config::default()
    };

    let ctx = Arc::new(AppContext::new_with_config(config).expect("failed to initialise context"));
    TestApp { router: build_router(ctx), _temp_dir: temp_dir }
}

impl TestApp {
    /// POST a JSON body, optionally authenticated, returning status and body.
    pub async fn post_json(
        &self,
        uri: &str,
        token: Option<&str>,
        body: &Value,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json");
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }
        let request = builder.body(Body::from(body.to_string())).expect("invalid request");
        self.send(request).await
    }

    /// GET a path, optionally authenticated, returning status and body.
    pub async fn get(&self, uri: &str, token: Option<&str>) -> (StatusCode, Value) {
        let mut builder = Request::builder().method("GET").uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }
        let request = builder.body(Body::empty()).expect("invalid request");
        self.send(request).await
    }

    async fn send(&self, request: Request<Body>) -> (StatusCode, Value) {
        let response = self.router.clone().oneshot(request).await.expect("request failed");
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("failed to read response body");
        // Non-JSON bodies (the banner) come back as a plain string value.
        let body = serde_json::from_slice(&bytes)
            .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()));
        (status, body)
    }
}

/// Register a professor account, returning `(id, token)`.
pub async fn register_professor(app: &TestApp, name: &str, email: &str) -> (String, String) {
    register(app, name, email, "professor").await
}

/// Register a student account, returning `(id, token)`.
pub async fn register_student(app: &TestApp, name: &str, email: &str) -> (String, String) {
    register(app, name, email, "student").await
}

async fn register(app: &TestApp, name: &str, email: &str, role: &str) -> (String, String) {
    let (status, body) = app
        .post_json(
            "/api/auth/register",
            None,
            &json!({
                "name": name,
                "email": email,
                "password": "correct horse battery staple",
                "role": role,
            }),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED, "registration failed: {body}");
    (
        body["id"].as_str().expect("missing id").to_string(),
        body["token"].as_str().expect("missing token").to_string(),
    )
}

//! In-process client for the catalog router.
#![allow(dead_code)]

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use catalog_kernel::settings::Settings;
use serde_json::Value;
use tower::ServiceExt;

pub const BASE: &str = "/api/v1";
pub const GENRE_CREDENTIAL: &str =
    "HMAC d5951928a797e3de418978abeb1c4f036672aa63b3241843493bfae1c0e60923";

pub struct TestResponse {
    pub status: StatusCode,
    pub body: Value,
}

/// Router with fresh fixture data; every call goes through the full
/// middleware stack.
pub struct TestApp {
    router: Router,
}

impl TestApp {
    pub fn new() -> Self {
        Self::with_settings(Settings::default())
    }

    pub fn with_settings(settings: Settings) -> Self {
        Self {
            router: catalog_app::router(&settings),
        }
    }

    pub async fn get(&self, path: &str) -> TestResponse {
        self.send(request(Method::GET, path, None, None)).await
    }

    pub async fn post(&self, path: &str, body: Value) -> TestResponse {
        self.send(request(Method::POST, path, Some(body), None))
            .await
    }

    pub async fn post_authorized(&self, path: &str, credential: &str, body: Value) -> TestResponse {
        self.send(request(Method::POST, path, Some(body), Some(credential)))
            .await
    }

    pub async fn patch(&self, path: &str, body: Value) -> TestResponse {
        self.send(request(Method::PATCH, path, Some(body), None))
            .await
    }

    /// Send `body` verbatim, with an optional content type and credential.
    pub async fn send_raw(
        &self,
        method: Method,
        path: &str,
        content_type: Option<&str>,
        credential: Option<&str>,
        body: &str,
    ) -> TestResponse {
        let mut builder = Request::builder()
            .method(method)
            .uri(format!("{BASE}{path}"));
        if let Some(content_type) = content_type {
            builder = builder.header(header::CONTENT_TYPE, content_type);
        }
        if let Some(credential) = credential {
            builder = builder.header(header::AUTHORIZATION, credential);
        }
        self.send(builder.body(Body::from(body.to_string())).unwrap())
            .await
    }

    pub async fn reset(&self) {
        let response = self.get("/reset").await;
        assert_eq!(response.status, StatusCode::OK);
    }

    pub async fn send(&self, request: Request<Body>) -> TestResponse {
        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), 1024 * 1024)
            .await
            .unwrap();
        let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        TestResponse { status, body }
    }
}

fn request(
    method: Method,
    path: &str,
    body: Option<Value>,
    credential: Option<&str>,
) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(format!("{BASE}{path}"));
    if let Some(credential) = credential {
        builder = builder.header(header::AUTHORIZATION, credential);
    }
    match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

/// Error responses always carry a populated error object.
pub fn assert_error_body(response: &TestResponse) {
    let error = &response.body["error"];
    assert!(error.is_object(), "expected error body, got {}", response.body);
    assert!(!error["message"].as_str().unwrap_or_default().is_empty());
    assert!(error["trace_id"].is_string());
}

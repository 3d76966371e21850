//! Test harness that drives the router in-process.
//!
//! Each harness owns a temp directory holding the data file and a static
//! asset directory, so tests never share state.

use axum::{
    body::{to_bytes, Body},
    http::{header::CONTENT_TYPE, HeaderMap, Method, Request, StatusCode},
    Router,
};
use serde_json::Value;
use server_core::server::{build_app, AppState};
use std::path::PathBuf;
use std::sync::Arc;
use tempfile::TempDir;
use tower::ServiceExt;
use walk_stats::{Pipeline, PipelineConfig, RuleExtractor, StatExtractor};

pub const ALLOWED_ORIGIN: &str = "https://classroom.google.com";

pub struct TestHarness {
    pub app: Router,
    pub data_file: PathBuf,
    pub static_dir: PathBuf,
    _dir: TempDir,
}

/// A response with its body read into memory.
pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Vec<u8>,
}

impl TestResponse {
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    pub fn json(&self) -> Value {
        serde_json::from_slice(&self.body).expect("response body is not JSON")
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }
}

impl TestHarness {
    /// Harness with the offline rule-based extractor.
    pub fn rules() -> Self {
        Self::with_extractor(Arc::new(RuleExtractor::new()))
    }

    pub fn with_extractor(extractor: Arc<dyn StatExtractor>) -> Self {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();

        let dir = tempfile::tempdir().expect("failed to create temp dir");
        let data_file = dir.path().join("data.jsonl");
        let static_dir = dir.path().join("public");
        std::fs::create_dir_all(&static_dir).expect("failed to create static dir");

        let pipeline = Pipeline::new(
            extractor,
            PipelineConfig::default()
                .with_data_file(&data_file)
                .with_year(2026),
        );
        let app = build_app(
            AppState::new(Arc::new(pipeline)),
            &[ALLOWED_ORIGIN.to_string()],
            Some(static_dir.clone()),
        );

        Self {
            app,
            data_file,
            static_dir,
            _dir: dir,
        }
    }

    pub async fn send(&self, request: Request<Body>) -> TestResponse {
        let response = self
            .app
            .clone()
            .oneshot(request)
            .await
            .expect("router is infallible");

        let status = response.status();
        let headers = response.headers().clone();
        let body = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("failed to read body")
            .to_vec();

        TestResponse {
            status,
            headers,
            body,
        }
    }

    pub async fn get(&self, path: &str) -> TestResponse {
        self.send(
            Request::builder()
                .uri(path)
                .body(Body::empty())
                .expect("valid request"),
        )
        .await
    }

    /// POST a raw body labelled as JSON.
    pub async fn post_json(&self, path: &str, body: impl Into<String>) -> TestResponse {
        self.send(
            Request::builder()
                .method(Method::POST)
                .uri(path)
                .header(CONTENT_TYPE, "application/json")
                .body(Body::from(body.into()))
                .expect("valid request"),
        )
        .await
    }
}

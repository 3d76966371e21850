use axum::{extract::Extension, http::StatusCode, Json};
use serde::Serialize;

use crate::server::app::AppState;

/// Text served at `/`, showing the expected request shape.
pub const INDEX_BANNER: &str = r#"running: { "posts": [...] }"#;

#[derive(Serialize)]
pub struct HealthResponse {
    status: String,
    extractor: String,
    sinks: Vec<String>,
}

pub async fn index_handler() -> &'static str {
    INDEX_BANNER
}

/// Health check endpoint
///
/// Reports the active extractor and sinks. Always 200 once the app is up.
pub async fn health_handler(
    Extension(state): Extension<AppState>,
) -> (StatusCode, Json<HealthResponse>) {
    (
        StatusCode::OK,
        Json(HealthResponse {
            status: "ok".to_string(),
            extractor: state.pipeline.extractor_name().to_string(),
            sinks: state
                .pipeline
                .sink_names()
                .into_iter()
                .map(str::to_string)
                .collect(),
        }),
    )
}

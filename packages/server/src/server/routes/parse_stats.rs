use axum::{
    extract::{rejection::JsonRejection, Extension},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use serde_json::Value;
use tracing::{error, warn};

use walk_stats::StatRecord;

use crate::kernel::posts_from_body;
use crate::server::app::AppState;

#[derive(Serialize)]
pub struct ParseStatsResponse {
    pub results: Vec<StatRecord>,
}

#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub details: String,
}

/// `POST /parse-stats` with `{ "posts": [string] }`.
///
/// Malformed bodies and missing posts yield `{ "results": [] }`. A pipeline
/// failure yields 500 with the error message in `details`.
pub async fn parse_stats_handler(
    Extension(state): Extension<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Response {
    let posts = match payload {
        Ok(Json(body)) => posts_from_body(&body),
        Err(rejection) if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE => {
            return rejection.into_response();
        }
        Err(rejection) => {
            warn!(error = %rejection, "Ignoring malformed parse-stats body");
            Vec::new()
        }
    };

    if posts.is_empty() {
        return Json(ParseStatsResponse {
            results: Vec::new(),
        })
        .into_response();
    }

    match state.pipeline.run(&posts).await {
        Ok(results) => Json(ParseStatsResponse { results }).into_response(),
        Err(e) => {
            error!(error = %e, posts = posts.len(), "Parsing failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: "Parsing failed".to_string(),
                    details: e.to_string(),
                }),
            )
                .into_response()
        }
    }
}

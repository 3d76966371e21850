//! Typed errors for the stats pipeline.
//!
//! Uses `thiserror` for library errors (not `anyhow`) so callers can tell
//! extraction failures from storage failures.

use thiserror::Error;

/// Errors that can occur while extracting or persisting stat records.
#[derive(Debug, Error)]
pub enum StatsError {
    /// Extraction service unavailable or failed
    #[error("extraction error: {0}")]
    Extraction(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// Extraction service replied, but not with `{ "results": [...] }`
    #[error("malformed extraction response: {reason}")]
    MalformedResponse { reason: String },

    /// A record sink failed to persist the batch
    #[error("storage error in {sink}: {source}")]
    Storage {
        sink: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// File I/O failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON encoding or decoding failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl StatsError {
    /// Wrap a sink-specific error.
    pub fn storage(
        sink: impl Into<String>,
        source: impl Into<Box<dyn std::error::Error + Send + Sync>>,
    ) -> Self {
        Self::Storage {
            sink: sink.into(),
            source: source.into(),
        }
    }
}

/// Result type alias for pipeline operations.
pub type Result<T> = std::result::Result<T, StatsError>;

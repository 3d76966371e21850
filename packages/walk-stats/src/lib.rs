//! Walking-stats post pipeline
//!
//! Turns loosely written class posts ("Mon 10/30 we walked 31 minutes,
//! 3,823 steps") into one structured record per day.
//!
//! # Usage
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use walk_stats::{Pipeline, PipelineConfig, RuleExtractor};
//!
//! let pipeline = Pipeline::new(Arc::new(RuleExtractor::new()), PipelineConfig::default());
//! let records = pipeline.run(&posts).await?;
//! ```
//!
//! # Modules
//!
//! - [`normalize`] - `"Oct 30"` date labels and numeric coercion
//! - [`split`] - raw-post dedupe and multi-day splitting
//! - [`dedupe`] - value and date deduplication of records
//! - [`traits`] - extractor and sink abstractions
//! - [`extractors`] - OpenAI and rule-based extractors
//! - [`stores`] - JSON-lines store
//! - [`pipeline`] - the stages wired together
//! - [`testing`] - mock implementations for testing

pub mod config;
pub mod dedupe;
pub mod error;
pub mod extractors;
pub mod normalize;
pub mod pipeline;
pub mod split;
pub mod stores;
pub mod testing;
pub mod traits;
pub mod types;

pub use config::PipelineConfig;
pub use dedupe::{dedupe, dedupe_by_date, dedupe_by_value};
pub use error::{Result, StatsError};
pub use normalize::{
    normalize_date_label, normalize_date_label_in_year, normalize_extraction,
    normalize_extraction_in_year,
};
pub use pipeline::{Pipeline, PipelineRun};
pub use split::{dedupe_raw_posts, split_multi_date_posts, split_post};
pub use stores::JsonlStore;
pub use traits::{RecordSink, StatExtractor};
pub use types::{PostUnit, RawPost, StatRecord, StoredRecord};

pub use extractors::RuleExtractor;

#[cfg(feature = "openai")]
pub use extractors::OpenAiExtractor;

pub use testing::{MemorySink, MockExtractor};

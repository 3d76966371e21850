//! End-to-end pipeline: raw posts in, deduplicated records out.
//!
//! ```text
//! raw posts ──dedupe_raw_posts──► unique posts ──split──► units
//!     units ──StatExtractor──► entries ──normalize──► records
//!   records ──dedupe──► final records ──RecordSink*──► persisted
//! ```
//!
//! A failure at any stage aborts the run. Sinks run only after extraction
//! succeeded, in the order they were added.

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::config::PipelineConfig;
use crate::dedupe::{dedupe_by_date, dedupe_by_value};
use crate::error::Result;
use crate::normalize::{current_year, normalize_extraction_in_year};
use crate::split::{dedupe_raw_posts, split_multi_date_posts};
use crate::stores::JsonlStore;
use crate::traits::{RecordSink, StatExtractor};
use crate::types::{PostUnit, StatRecord};

/// Counts observed at each stage of one run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PipelineRun {
    pub raw_posts: usize,
    pub unique_posts: usize,
    pub units: usize,
    pub extracted: usize,
    pub after_value_dedupe: usize,
    pub records: Vec<StatRecord>,
}

pub struct Pipeline {
    extractor: Arc<dyn StatExtractor>,
    sinks: Vec<Arc<dyn RecordSink>>,
    config: PipelineConfig,
}

impl Pipeline {
    /// Build a pipeline. Installs a [`JsonlStore`] when `config.data_file` is set.
    pub fn new(extractor: Arc<dyn StatExtractor>, config: PipelineConfig) -> Self {
        let mut sinks: Vec<Arc<dyn RecordSink>> = Vec::new();
        if let Some(path) = &config.data_file {
            sinks.push(Arc::new(JsonlStore::new(path.clone())));
        }

        Self {
            extractor,
            sinks,
            config,
        }
    }

    /// Add a sink after the existing ones.
    pub fn with_sink(mut self, sink: Arc<dyn RecordSink>) -> Self {
        self.sinks.push(sink);
        self
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    pub fn extractor_name(&self) -> &str {
        self.extractor.name()
    }

    pub fn sink_names(&self) -> Vec<&str> {
        self.sinks.iter().map(|s| s.name()).collect()
    }

    /// Raw-text dedupe followed by splitting.
    pub fn prepare_units<S: AsRef<str>>(posts: &[S]) -> Vec<PostUnit> {
        split_multi_date_posts(&dedupe_raw_posts(posts))
    }

    /// Extract and normalize, without deduplication.
    pub async fn extract_records(&self, units: &[PostUnit]) -> Result<Vec<StatRecord>> {
        if units.is_empty() {
            return Ok(Vec::new());
        }

        let entries = self.extractor.extract(units).await?;
        if entries.len() != units.len() {
            warn!(
                extractor = self.extractor.name(),
                units = units.len(),
                entries = entries.len(),
                "Extractor returned a different number of entries than units"
            );
        }

        let year = self.config.year.unwrap_or_else(current_year);
        Ok(entries
            .iter()
            .map(|entry| normalize_extraction_in_year(entry, year))
            .collect())
    }

    /// Run every stage and return the final records.
    pub async fn run<S: AsRef<str>>(&self, posts: &[S]) -> Result<Vec<StatRecord>> {
        Ok(self.run_with_report(posts).await?.records)
    }

    /// Run every stage, keeping per-stage counts.
    pub async fn run_with_report<S: AsRef<str>>(&self, posts: &[S]) -> Result<PipelineRun> {
        let unique = dedupe_raw_posts(posts);
        let units = split_multi_date_posts(&unique);
        info!(
            raw_posts = posts.len(),
            unique_posts = unique.len(),
            units = units.len(),
            "Prepared post units"
        );

        let extracted = self.extract_records(&units).await?;
        let extracted_count = extracted.len();

        let by_value = dedupe_by_value(extracted);
        let after_value_dedupe = by_value.len();
        let records = dedupe_by_date(by_value);
        info!(
            extracted = extracted_count,
            after_value_dedupe,
            records = records.len(),
            "Deduplicated records"
        );

        if self.config.persist && !records.is_empty() {
            for sink in &self.sinks {
                debug!(sink = sink.name(), count = records.len(), "Persisting records");
                sink.append(&records).await?;
            }
        }

        Ok(PipelineRun {
            raw_posts: posts.len(),
            unique_posts: unique.len(),
            units: units.len(),
            extracted: extracted_count,
            after_value_dedupe,
            records,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extractors::RuleExtractor;
    use crate::testing::{MemorySink, MockExtractor};
    use serde_json::json;

    fn rules_pipeline() -> Pipeline {
        Pipeline::new(
            Arc::new(RuleExtractor::new()),
            PipelineConfig::in_memory().with_year(2026),
        )
    }

    #[tokio::test]
    async fn duplicate_posts_collapse_to_one_record() {
        let posts = vec![
            "Mon 10/30 walked 31 minutes, 3,823 steps".to_string(),
            "Mon 10/30 walked 31 minutes, 3,823 steps".to_string(),
        ];

        assert_eq!(Pipeline::prepare_units(&posts).len(), 1);

        let records = rules_pipeline().run(&posts).await.unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].date_label.as_deref(), Some("Oct 30"));
        assert_eq!(records[0].minutes, Some(31.0));
        assert_eq!(records[0].steps, Some(3823.0));
    }

    #[tokio::test]
    async fn empty_input_skips_extractor() {
        let extractor = Arc::new(MockExtractor::new());
        let pipeline = Pipeline::new(extractor.clone(), PipelineConfig::in_memory());

        let records = pipeline.run::<String>(&[]).await.unwrap();

        assert!(records.is_empty());
        assert!(extractor.calls().is_empty());
    }

    #[tokio::test]
    async fn entries_are_normalized_then_deduplicated() {
        let extractor = Arc::new(MockExtractor::new().with_entries(vec![
            json!({"date_label": "10/30", "minutes": 31, "steps": "3,823"}),
            json!({"date_label": "October 30", "minutes": 45}),
            json!({"date_label": null, "minutes": 10}),
            json!({"date_label": "Nov 1", "miles": 1.5}),
        ]));
        let pipeline = Pipeline::new(extractor.clone(), PipelineConfig::in_memory().with_year(2026));

        let run = pipeline
            .run_with_report(&["Mon 10/30 a", "Tue 10/31 b", "c", "Wed 11/1 d"])
            .await
            .unwrap();

        assert_eq!(run.units, 4);
        assert_eq!(run.extracted, 4);
        assert_eq!(
            run.records,
            vec![
                StatRecord::new("Oct 30").with_minutes(31.0),
                StatRecord::new("Nov 1").with_miles(1.5),
            ]
        );
        assert_eq!(extractor.calls()[0].len(), 4);
    }

    #[tokio::test]
    async fn length_mismatch_is_tolerated() {
        let extractor = Arc::new(
            MockExtractor::new().with_entries(vec![json!({"date_label": "Oct 30", "steps": 5})]),
        );
        let pipeline = Pipeline::new(extractor, PipelineConfig::in_memory());

        let records = pipeline.run(&["Mon 10/30 a", "Tue 10/31 b"]).await.unwrap();
        assert_eq!(records, vec![StatRecord::new("Oct 30").with_steps(5.0)]);
    }

    #[tokio::test]
    async fn extractor_failure_aborts_before_sinks() {
        let sink = Arc::new(MemorySink::new());
        let pipeline = Pipeline::new(
            Arc::new(MockExtractor::failing("service unavailable")),
            PipelineConfig::in_memory().with_persist(true),
        )
        .with_sink(sink.clone());

        let result = pipeline.run(&["Mon 10/30 31 minutes"]).await;

        assert!(result.is_err());
        assert!(sink.records().is_empty());
    }

    #[tokio::test]
    async fn sinks_receive_final_records_when_persisting() {
        let sink = Arc::new(MemorySink::new());
        let pipeline = Pipeline::new(
            Arc::new(RuleExtractor::new()),
            PipelineConfig::in_memory().with_persist(true).with_year(2026),
        )
        .with_sink(sink.clone());

        pipeline
            .run(&["Mon 10/30 31 minutes Tue 10/31 20 minutes"])
            .await
            .unwrap();

        let labels: Vec<_> = sink
            .records()
            .into_iter()
            .filter_map(|r| r.date_label)
            .collect();
        assert_eq!(labels, vec!["Oct 30", "Oct 31"]);
        assert_eq!(pipeline.sink_names(), vec!["memory"]);
    }

    #[tokio::test]
    async fn persist_off_skips_sinks() {
        let sink = Arc::new(MemorySink::new());
        let pipeline = Pipeline::new(Arc::new(RuleExtractor::new()), PipelineConfig::in_memory())
            .with_sink(sink.clone());

        let records = pipeline.run(&["Mon 10/30 31 minutes"]).await.unwrap();

        assert_eq!(records.len(), 1);
        assert!(sink.records().is_empty());
    }
}

//! Testing utilities including mock implementations.
//!
//! Useful for exercising the pipeline and anything built on it without
//! calling a real extraction service or touching disk.

use async_trait::async_trait;
use serde_json::{json, Value};
use std::collections::VecDeque;
use std::sync::{Arc, RwLock};

use crate::error::{Result, StatsError};
use crate::traits::{RecordSink, StatExtractor};
use crate::types::StatRecord;

/// A mock extractor with scripted responses.
///
/// Each call pops the next scripted batch. With nothing scripted it returns
/// one all-null entry per unit.
#[derive(Default)]
pub struct MockExtractor {
    responses: Arc<RwLock<VecDeque<Vec<Value>>>>,

    /// When set, every call fails with this message
    failure: Option<String>,

    /// Units received per call, for assertions
    calls: Arc<RwLock<Vec<Vec<String>>>>,
}

impl MockExtractor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue the entries returned by the next call.
    pub fn with_entries(self, entries: Vec<Value>) -> Self {
        self.responses.write().unwrap().push_back(entries);
        self
    }

    /// An extractor whose every call fails.
    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            failure: Some(message.into()),
            ..Default::default()
        }
    }

    /// Units passed to each call so far.
    pub fn calls(&self) -> Vec<Vec<String>> {
        self.calls.read().unwrap().clone()
    }
}

#[async_trait]
impl StatExtractor for MockExtractor {
    fn name(&self) -> &str {
        "mock"
    }

    async fn extract(&self, units: &[String]) -> Result<Vec<Value>> {
        self.calls.write().unwrap().push(units.to_vec());

        if let Some(message) = &self.failure {
            return Err(StatsError::Extraction(message.clone().into()));
        }

        let scripted = self.responses.write().unwrap().pop_front();
        Ok(scripted.unwrap_or_else(|| {
            units
                .iter()
                .map(|_| {
                    json!({
                        "date_label": null,
                        "minutes": null,
                        "miles": null,
                        "calories": null,
                        "steps": null
                    })
                })
                .collect()
        }))
    }
}

/// A sink that keeps appended records in memory.
#[derive(Default)]
pub struct MemorySink {
    records: RwLock<Vec<StatRecord>>,
    batches: RwLock<usize>,
    failure: Option<String>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// A sink whose every append fails.
    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            failure: Some(message.into()),
            ..Default::default()
        }
    }

    pub fn records(&self) -> Vec<StatRecord> {
        self.records.read().unwrap().clone()
    }

    pub fn batch_count(&self) -> usize {
        *self.batches.read().unwrap()
    }
}

#[async_trait]
impl RecordSink for MemorySink {
    fn name(&self) -> &str {
        "memory"
    }

    async fn append(&self, records: &[StatRecord]) -> Result<()> {
        if let Some(message) = &self.failure {
            return Err(StatsError::storage("memory", message.clone()));
        }

        self.records.write().unwrap().extend_from_slice(records);
        *self.batches.write().unwrap() += 1;
        Ok(())
    }
}

//! Pipeline configuration.

use std::path::PathBuf;

/// Settings fixed when a [`Pipeline`](crate::Pipeline) is built.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// JSON-lines output. `None` disables the file store.
    pub data_file: Option<PathBuf>,

    /// Run sinks after extraction. When false the pipeline only returns records.
    ///
    /// Default: true.
    pub persist: bool,

    /// Year given to year-less labels. `None` means the current local year.
    pub year: Option<i32>,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            data_file: Some(PathBuf::from("data.jsonl")),
            persist: true,
            year: None,
        }
    }
}

impl PipelineConfig {
    /// No file store, no persistence.
    pub fn in_memory() -> Self {
        Self {
            data_file: None,
            persist: false,
            year: None,
        }
    }

    pub fn with_data_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.data_file = Some(path.into());
        self
    }

    pub fn with_persist(mut self, persist: bool) -> Self {
        self.persist = persist;
        self
    }

    pub fn with_year(mut self, year: i32) -> Self {
        self.year = Some(year);
        self
    }
}

//! Append-only destinations for final records.

use async_trait::async_trait;

use crate::error::Result;
use crate::types::StatRecord;

#[async_trait]
pub trait RecordSink: Send + Sync {
    fn name(&self) -> &str;

    /// Append a batch. Called only with a non-empty batch.
    async fn append(&self, records: &[StatRecord]) -> Result<()>;
}

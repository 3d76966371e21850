//! Append-only JSON-lines store.
//!
//! Each record becomes one line: the record's fields followed by
//! `created_at`. All lines of one batch share a timestamp. The file is
//! opened in append mode per batch and closed when the write completes.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use chrono::{DateTime, SecondsFormat, Utc};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing::debug;

use crate::error::Result;
use crate::traits::RecordSink;
use crate::types::{StatRecord, StoredRecord};

#[derive(Debug, Clone)]
pub struct JsonlStore {
    path: PathBuf,
}

impl JsonlStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append a batch stamped with `created_at`. An empty batch writes nothing.
    pub async fn append_at(&self, records: &[StatRecord], created_at: DateTime<Utc>) -> Result<()> {
        if records.is_empty() {
            return Ok(());
        }

        let timestamp = created_at.to_rfc3339_opts(SecondsFormat::Millis, true);
        let mut buf = String::new();
        for record in records {
            let line = StoredRecord {
                record: record.clone(),
                created_at: timestamp.clone(),
            };
            buf.push_str(&serde_json::to_string(&line)?);
            buf.push('\n');
        }

        let mut file = tokio::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .await?;
        file.write_all(buf.as_bytes()).await?;
        file.flush().await?;

        debug!(path = %self.path.display(), count = records.len(), "Appended records");
        Ok(())
    }

    /// Read every stored line. A missing file reads as empty.
    pub async fn read_all(&self) -> Result<Vec<StoredRecord>> {
        let file = match tokio::fs::File::open(&self.path).await {
            Ok(file) => file,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        let mut lines = BufReader::new(file).lines();
        let mut stored = Vec::new();
        while let Some(line) = lines.next_line().await? {
            if line.trim().is_empty() {
                continue;
            }
            stored.push(serde_json::from_str(&line)?);
        }
        Ok(stored)
    }
}

#[async_trait]
impl RecordSink for JsonlStore {
    fn name(&self) -> &str {
        "jsonl"
    }

    async fn append(&self, records: &[StatRecord]) -> Result<()> {
        self.append_at(records, Utc::now()).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[tokio::test]
    async fn batches_append_with_shared_timestamp() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonlStore::new(dir.path().join("data.jsonl"));
        let at = Utc.with_ymd_and_hms(2026, 10, 19, 8, 30, 0).unwrap();

        let batch = vec![
            StatRecord::new("Oct 30").with_minutes(31.0).with_steps(3823.0),
            StatRecord::new("Oct 31").with_miles(1.81),
        ];
        store.append_at(&batch, at).await.unwrap();
        store.append_at(&batch[..1], at).await.unwrap();

        let stored = store.read_all().await.unwrap();
        assert_eq!(stored.len(), 3);
        assert!(stored.iter().all(|s| s.created_at == "2026-10-19T08:30:00.000Z"));
        assert_eq!(stored[1].record, batch[1]);

        let raw = tokio::fs::read_to_string(store.path()).await.unwrap();
        assert!(raw.starts_with(
            r#"{"date_label":"Oct 30","minutes":31,"miles":null,"calories":null,"steps":3823,"created_at":"2026-10-19T08:30:00.000Z"}"#
        ));
        assert!(raw.ends_with('\n'));
    }

    #[tokio::test]
    async fn empty_batch_does_not_create_file() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonlStore::new(dir.path().join("data.jsonl"));

        store.append(&[]).await.unwrap();

        assert!(!store.path().exists());
        assert!(store.read_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn unwritable_path_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonlStore::new(dir.path().join("missing").join("data.jsonl"));

        let result = store.append(&[StatRecord::new("Oct 30")]).await;
        assert!(result.is_err());
    }
}

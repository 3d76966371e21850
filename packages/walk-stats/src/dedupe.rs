//! Record deduplication.
//!
//! Two passes run in order:
//!
//! 1. value identity: the first record per `(date_label, minutes, miles,
//!    calories, steps)` tuple survives;
//! 2. date uniqueness: the first record per non-empty `date_label` survives
//!    and unlabelled records are dropped.
//!
//! Pass 2 does not merge or report conflicts. When two different stat sets
//! claim the same date, the later one is discarded silently.

use std::collections::HashSet;

use crate::types::StatRecord;

/// Composite identity of a record. Stats compare by bit pattern with `-0.0`
/// folded into `0.0`, so the key agrees with `f64` equality for finite values.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct RecordKey {
    date_label: Option<String>,
    minutes: Option<u64>,
    miles: Option<u64>,
    calories: Option<u64>,
    steps: Option<u64>,
}

fn stat_bits(value: Option<f64>) -> Option<u64> {
    value.map(|v| if v == 0.0 { 0.0f64.to_bits() } else { v.to_bits() })
}

impl From<&StatRecord> for RecordKey {
    fn from(record: &StatRecord) -> Self {
        Self {
            date_label: record.date_label.clone(),
            minutes: stat_bits(record.minutes),
            miles: stat_bits(record.miles),
            calories: stat_bits(record.calories),
            steps: stat_bits(record.steps),
        }
    }
}

/// Pass 1: keep the first record per distinct five-field value. Idempotent.
pub fn dedupe_by_value(records: Vec<StatRecord>) -> Vec<StatRecord> {
    let mut seen = HashSet::new();
    records
        .into_iter()
        .filter(|record| seen.insert(RecordKey::from(record)))
        .collect()
}

/// Pass 2: keep the first record per date label; drop unlabelled records.
pub fn dedupe_by_date(records: Vec<StatRecord>) -> Vec<StatRecord> {
    let mut seen = HashSet::new();
    records
        .into_iter()
        .filter(|record| match record.date_label.as_deref() {
            Some(label) if !label.is_empty() => seen.insert(label.to_string()),
            _ => false,
        })
        .collect()
}

/// Both passes, in order.
pub fn dedupe(records: Vec<StatRecord>) -> Vec<StatRecord> {
    dedupe_by_date(dedupe_by_value(records))
}

//! Spreadsheet sink: appends records whose date is not already in the sheet.

use async_trait::async_trait;
use serde_json::Value;
use sheets_client::{SheetsClient, ValueInputOption};
use std::collections::HashSet;
use tracing::info;

use walk_stats::{RecordSink, Result, StatRecord, StatsError};

/// Appends rows `[date, minutes, miles, calories, steps]` to a Google Sheet.
///
/// Column A holds the date label. A record is skipped when its label (trimmed)
/// already appears in column A, or when it has no label at all.
pub struct SheetsSink {
    client: SheetsClient,
    spreadsheet_id: String,
    sheet_name: String,
}

impl SheetsSink {
    pub fn new(
        client: SheetsClient,
        spreadsheet_id: impl Into<String>,
        sheet_name: impl Into<String>,
    ) -> Self {
        Self {
            client,
            spreadsheet_id: spreadsheet_id.into(),
            sheet_name: sheet_name.into(),
        }
    }

    fn label_range(&self) -> String {
        format!("{}!A:A", self.sheet_name)
    }

    fn row_range(&self) -> String {
        format!("{}!A:E", self.sheet_name)
    }
}

/// Rows for records whose label is not among the existing column-A cells.
pub fn select_new_rows(records: &[StatRecord], existing: &[Vec<Value>]) -> Vec<Vec<Value>> {
    let existing: HashSet<String> = existing
        .iter()
        .flatten()
        .map(|cell| cell_text(cell).trim().to_string())
        .collect();

    records
        .iter()
        .filter(|record| {
            record
                .date_label
                .as_deref()
                .is_some_and(|label| !label.is_empty() && !existing.contains(label))
        })
        .map(StatRecord::to_row)
        .collect()
}

fn cell_text(cell: &Value) -> String {
    match cell {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

#[async_trait]
impl RecordSink for SheetsSink {
    fn name(&self) -> &str {
        "sheets"
    }

    async fn append(&self, records: &[StatRecord]) -> Result<()> {
        let existing = self
            .client
            .get_values(&self.spreadsheet_id, &self.label_range())
            .await
            .map_err(|e| StatsError::storage("sheets", e))?;

        let rows = select_new_rows(records, &existing);
        if rows.is_empty() {
            info!("No new rows to append to sheet");
            return Ok(());
        }

        let appended = self
            .client
            .append_values(
                &self.spreadsheet_id,
                &self.row_range(),
                &rows,
                ValueInputOption::UserEntered,
            )
            .await
            .map_err(|e| StatsError::storage("sheets", e))?;

        info!(
            rows = rows.len(),
            updated_rows = appended.updated_rows(),
            "Appended records to sheet"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn skips_labels_already_in_sheet() {
        let records = vec![
            StatRecord::new("Oct 30").with_minutes(31.0),
            StatRecord::new("Oct 31").with_steps(4000.0),
        ];
        let existing = vec![vec![json!("Date")], vec![json!(" Oct 30 ")]];

        let rows = select_new_rows(&records, &existing);

        assert_eq!(
            rows,
            vec![vec![json!("Oct 31"), json!(null), json!(null), json!(null), json!(4000)]]
        );
    }

    #[test]
    fn skips_records_without_label() {
        let records = vec![
            StatRecord {
                minutes: Some(10.0),
                ..Default::default()
            },
            StatRecord::new(""),
        ];

        assert!(select_new_rows(&records, &[]).is_empty());
    }

    #[test]
    fn empty_sheet_accepts_everything() {
        let records = vec![StatRecord::new("Nov 1"), StatRecord::new("Nov 2")];
        assert_eq!(select_new_rows(&records, &[]).len(), 2);
    }

    #[test]
    fn non_string_cells_compare_as_text() {
        let records = vec![StatRecord::new("2024")];
        assert!(select_new_rows(&records, &[vec![json!(2024)]]).is_empty());
    }
}

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// How the API interprets appended cell values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueInputOption {
    /// Parsed as if typed into the UI (numbers, dates, formulas)
    UserEntered,
}

impl ValueInputOption {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::UserEntered => "USER_ENTERED",
        }
    }
}

/// A block of cell values returned by `values.get`.
#[derive(Debug, Clone, Deserialize)]
pub struct ValueRange {
    pub range: Option<String>,
    #[serde(rename = "majorDimension")]
    pub major_dimension: Option<String>,
    /// Omitted by the API when the range is empty.
    #[serde(default)]
    pub values: Vec<Vec<Value>>,
}

/// Request body for `values.append`.
#[derive(Debug, Serialize)]
pub(crate) struct AppendBody<'a> {
    pub values: &'a [Vec<Value>],
}

/// Response of `values.append`.
#[derive(Debug, Clone, Deserialize)]
pub struct AppendResponse {
    #[serde(rename = "spreadsheetId")]
    pub spreadsheet_id: String,
    #[serde(rename = "tableRange")]
    pub table_range: Option<String>,
    pub updates: Option<UpdateValuesResponse>,
}

impl AppendResponse {
    pub fn updated_rows(&self) -> u32 {
        self.updates
            .as_ref()
            .and_then(|u| u.updated_rows)
            .unwrap_or(0)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct UpdateValuesResponse {
    #[serde(rename = "updatedRange")]
    pub updated_range: Option<String>,
    #[serde(rename = "updatedRows")]
    pub updated_rows: Option<u32>,
    #[serde(rename = "updatedColumns")]
    pub updated_columns: Option<u32>,
    #[serde(rename = "updatedCells")]
    pub updated_cells: Option<u32>,
}

/// OAuth2 token endpoint reply.
#[derive(Debug, Deserialize)]
pub(crate) struct TokenResponse {
    pub access_token: String,
    pub expires_in: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_range_has_no_values() {
        let range: ValueRange =
            serde_json::from_str(r#"{"range":"Sheet1!A1:A1000","majorDimension":"ROWS"}"#)
                .unwrap();
        assert!(range.values.is_empty());
    }

    #[test]
    fn append_response_reports_updated_rows() {
        let resp: AppendResponse = serde_json::from_str(
            r#"{
                "spreadsheetId": "abc",
                "tableRange": "Sheet1!A1:E4",
                "updates": {
                    "spreadsheetId": "abc",
                    "updatedRange": "Sheet1!A5:E6",
                    "updatedRows": 2,
                    "updatedColumns": 5,
                    "updatedCells": 10
                }
            }"#,
        )
        .unwrap();
        assert_eq!(resp.updated_rows(), 2);
    }

    #[test]
    fn value_input_option_wire_names() {
        assert_eq!(ValueInputOption::UserEntered.as_str(), "USER_ENTERED");
    }
}

//! Pure Google Sheets REST API client.
//!
//! A minimal client for the Sheets v4 `values` API, authenticated with a
//! service account. Supports reading a range and appending rows.
//!
//! # Example
//!
//! ```rust,ignore
//! use sheets_client::{ServiceAccountKey, SheetsClient, ValueInputOption};
//!
//! let key = ServiceAccountKey::from_file("service-account.json")?;
//! let client = SheetsClient::new(key);
//!
//! let existing = client.get_values(&spreadsheet_id, "Sheet1!A:A").await?;
//! let resp = client
//!     .append_values(&spreadsheet_id, "Sheet1!A:E", &rows, ValueInputOption::UserEntered)
//!     .await?;
//! println!("appended {} rows", resp.updated_rows());
//! ```

pub mod auth;
pub mod error;
pub mod types;

pub use auth::{Authenticator, ServiceAccountKey, SPREADSHEETS_SCOPE};
pub use error::{Result, SheetsError};
pub use types::{AppendResponse, UpdateValuesResponse, ValueInputOption, ValueRange};

use serde_json::Value;
use types::AppendBody;

const BASE_URL: &str = "https://sheets.googleapis.com/v4";

pub struct SheetsClient {
    client: reqwest::Client,
    auth: Authenticator,
    base_url: String,
}

impl SheetsClient {
    pub fn new(key: ServiceAccountKey) -> Self {
        Self {
            client: reqwest::Client::new(),
            auth: Authenticator::new(key),
            base_url: BASE_URL.to_string(),
        }
    }

    /// Set a custom base URL (emulators, proxies).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn client_email(&self) -> &str {
        self.auth.client_email()
    }

    fn values_url(&self, spreadsheet_id: &str, range: &str) -> String {
        format!(
            "{}/spreadsheets/{}/values/{}",
            self.base_url,
            urlencoding::encode(spreadsheet_id),
            urlencoding::encode(range)
        )
    }

    /// Read a range. Empty ranges yield an empty vector.
    pub async fn get_values(&self, spreadsheet_id: &str, range: &str) -> Result<Vec<Vec<Value>>> {
        let token = self.auth.access_token(&self.client).await?;
        let resp = self
            .client
            .get(self.values_url(spreadsheet_id, range))
            .bearer_auth(&token)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(SheetsError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let range: ValueRange = resp.json().await?;
        tracing::debug!(rows = range.values.len(), "Fetched sheet values");
        Ok(range.values)
    }

    /// Append rows after the last row of the table found in `range`.
    pub async fn append_values(
        &self,
        spreadsheet_id: &str,
        range: &str,
        rows: &[Vec<Value>],
        input: ValueInputOption,
    ) -> Result<AppendResponse> {
        let token = self.auth.access_token(&self.client).await?;
        let url = format!(
            "{}:append?valueInputOption={}",
            self.values_url(spreadsheet_id, range),
            input.as_str()
        );

        let resp = self
            .client
            .post(&url)
            .bearer_auth(&token)
            .json(&AppendBody { values: rows })
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(SheetsError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let appended: AppendResponse = resp.json().await?;
        tracing::info!(
            updated_rows = appended.updated_rows(),
            range,
            "Appended rows to sheet"
        );
        Ok(appended)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_client() -> SheetsClient {
        let key = ServiceAccountKey::from_json(
            r#"{"client_email":"a@b.iam.gserviceaccount.com","private_key":"x"}"#,
        )
        .unwrap();
        SheetsClient::new(key)
    }

    #[test]
    fn values_url_encodes_range() {
        let client = test_client();
        assert_eq!(
            client.values_url("abc123", "Sheet1!A:E"),
            "https://sheets.googleapis.com/v4/spreadsheets/abc123/values/Sheet1%21A%3AE"
        );
    }

    #[test]
    fn custom_base_url_drops_trailing_slash() {
        let client = test_client().with_base_url("http://localhost:8085/v4/");
        assert!(client
            .values_url("id", "A:A")
            .starts_with("http://localhost:8085/v4/spreadsheets/id/values/"));
    }
}

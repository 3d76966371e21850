use thiserror::Error;

pub type Result<T> = std::result::Result<T, SheetsError>;

#[derive(Debug, Error)]
pub enum SheetsError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Sheets API error ({status}): {message}")]
    Api { status: u16, message: String },

    /// Key file missing, unreadable, or not a usable RSA key
    #[error("credentials error: {0}")]
    Credentials(String),

    #[error("token exchange failed: {0}")]
    Token(String),
}

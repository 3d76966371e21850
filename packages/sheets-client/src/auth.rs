//! Service-account authentication (OAuth2 JWT-bearer grant).

use std::path::Path;

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;

use crate::error::{Result, SheetsError};
use crate::types::TokenResponse;

pub const SPREADSHEETS_SCOPE: &str = "https://www.googleapis.com/auth/spreadsheets";

const DEFAULT_TOKEN_URI: &str = "https://oauth2.googleapis.com/token";
const JWT_BEARER_GRANT: &str = "urn:ietf:params:oauth:grant-type:jwt-bearer";
const ASSERTION_LIFETIME_SECS: i64 = 3600;

/// Fields of a Google service-account key file that the client needs.
#[derive(Debug, Clone, Deserialize)]
pub struct ServiceAccountKey {
    pub client_email: String,
    pub private_key: String,
    #[serde(default = "default_token_uri")]
    pub token_uri: String,
}

fn default_token_uri() -> String {
    DEFAULT_TOKEN_URI.to_string()
}

impl ServiceAccountKey {
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)
            .map_err(|e| SheetsError::Credentials(format!("{}: {}", path.display(), e)))?;
        Self::from_json(&raw)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json)
            .map_err(|e| SheetsError::Credentials(format!("invalid key file: {}", e)))
    }
}

#[derive(Debug, Serialize)]
struct AssertionClaims<'a> {
    iss: &'a str,
    scope: &'a str,
    aud: &'a str,
    iat: i64,
    exp: i64,
}

/// Sign the RS256 assertion exchanged for an access token.
pub(crate) fn sign_assertion(
    key: &ServiceAccountKey,
    scope: &str,
    now: DateTime<Utc>,
) -> Result<String> {
    let encoding_key = EncodingKey::from_rsa_pem(key.private_key.as_bytes())
        .map_err(|e| SheetsError::Credentials(format!("private key: {}", e)))?;

    let claims = AssertionClaims {
        iss: &key.client_email,
        scope,
        aud: &key.token_uri,
        iat: now.timestamp(),
        exp: now.timestamp() + ASSERTION_LIFETIME_SECS,
    };

    encode(&Header::new(Algorithm::RS256), &claims, &encoding_key)
        .map_err(|e| SheetsError::Credentials(format!("signing assertion: {}", e)))
}

#[derive(Debug, Clone)]
struct CachedToken {
    access_token: String,
    expires_at: DateTime<Utc>,
}

impl CachedToken {
    fn is_fresh(&self, now: DateTime<Utc>) -> bool {
        now + Duration::seconds(60) < self.expires_at
    }
}

/// Issues access tokens for one service account, caching until shortly before expiry.
pub struct Authenticator {
    key: ServiceAccountKey,
    scope: String,
    cached: Mutex<Option<CachedToken>>,
}

impl Authenticator {
    pub fn new(key: ServiceAccountKey) -> Self {
        Self {
            key,
            scope: SPREADSHEETS_SCOPE.to_string(),
            cached: Mutex::new(None),
        }
    }

    pub fn client_email(&self) -> &str {
        &self.key.client_email
    }

    pub async fn access_token(&self, http: &reqwest::Client) -> Result<String> {
        let mut cached = self.cached.lock().await;
        let now = Utc::now();

        if let Some(token) = cached.as_ref().filter(|t| t.is_fresh(now)) {
            return Ok(token.access_token.clone());
        }

        let assertion = sign_assertion(&self.key, &self.scope, now)?;
        let resp = http
            .post(&self.key.token_uri)
            .form(&[("grant_type", JWT_BEARER_GRANT), ("assertion", &assertion)])
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(SheetsError::Token(format!("{}: {}", status, body)));
        }

        let token: TokenResponse = resp.json().await?;
        tracing::debug!(
            client_email = %self.key.client_email,
            expires_in = token.expires_in,
            "Obtained Google access token"
        );

        let access_token = token.access_token.clone();
        *cached = Some(CachedToken {
            access_token: token.access_token,
            expires_at: now + Duration::seconds(token.expires_in),
        });

        Ok(access_token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const KEY_JSON: &str = r#"{
        "type": "service_account",
        "project_id": "walk-stats",
        "client_email": "parser@walk-stats.iam.gserviceaccount.com",
        "private_key": "not-a-pem"
    }"#;

    #[test]
    fn key_defaults_token_uri() {
        let key = ServiceAccountKey::from_json(KEY_JSON).unwrap();
        assert_eq!(key.client_email, "parser@walk-stats.iam.gserviceaccount.com");
        assert_eq!(key.token_uri, "https://oauth2.googleapis.com/token");
    }

    #[test]
    fn key_from_missing_file_is_credentials_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = ServiceAccountKey::from_file(dir.path().join("absent.json")).unwrap_err();
        assert!(matches!(err, SheetsError::Credentials(_)));
    }

    #[test]
    fn key_from_file_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("service-account.json");
        std::fs::write(&path, KEY_JSON).unwrap();

        let key = ServiceAccountKey::from_file(&path).unwrap();
        assert_eq!(key.private_key, "not-a-pem");
    }

    #[test]
    fn invalid_private_key_cannot_sign() {
        let key = ServiceAccountKey::from_json(KEY_JSON).unwrap();
        let err = sign_assertion(&key, SPREADSHEETS_SCOPE, Utc::now()).unwrap_err();
        assert!(matches!(err, SheetsError::Credentials(_)));
    }

    #[test]
    fn cached_token_expires_a_minute_early() {
        let now = Utc::now();
        let token = CachedToken {
            access_token: "t".into(),
            expires_at: now + Duration::seconds(90),
        };
        assert!(token.is_fresh(now));
        assert!(!token.is_fresh(now + Duration::seconds(31)));
    }
}

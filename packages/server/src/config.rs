use anyhow::{bail, Context, Result};
use dotenvy::dotenv;
use std::env;
use std::path::PathBuf;
use std::str::FromStr;

use walk_stats::PipelineConfig;

/// Origins allowed to call the API when `ALLOWED_ORIGINS` is unset.
pub const DEFAULT_ALLOWED_ORIGINS: [&str; 3] = [
    "https://classroom.google.com",
    "https://parser.antimatter137.dev",
    "http://localhost:3000",
];

/// Which extractor turns post units into stats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtractorKind {
    /// Language model via the OpenAI API
    OpenAi,
    /// Deterministic regex parser (no network)
    Rules,
}

impl FromStr for ExtractorKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "openai" => Ok(Self::OpenAi),
            "rules" => Ok(Self::Rules),
            other => bail!("unknown extractor '{}' (expected 'openai' or 'rules')", other),
        }
    }
}

/// Application configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub extractor: ExtractorKind,
    pub openai_api_key: Option<String>,
    pub openai_model: String,
    pub openai_base_url: Option<String>,
    pub data_file: PathBuf,
    pub spreadsheet_id: Option<String>,
    pub sheet_name: String,
    pub service_account_file: PathBuf,
    pub allowed_origins: Vec<String>,
    pub static_dir: PathBuf,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if present (development)
        let _ = dotenv();

        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from any key lookup. Blank values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        Ok(Self {
            port: get("PORT")
                .unwrap_or_else(|| "3000".to_string())
                .parse()
                .context("PORT must be a valid number")?,
            extractor: get("STATS_EXTRACTOR")
                .map(|v| v.parse())
                .transpose()
                .context("STATS_EXTRACTOR is invalid")?
                .unwrap_or(ExtractorKind::OpenAi),
            openai_api_key: get("OPENAI_API_KEY"),
            openai_model: get("OPENAI_MODEL").unwrap_or_else(|| "gpt-4o-mini".to_string()),
            openai_base_url: get("OPENAI_BASE_URL"),
            data_file: get("DATA_FILE")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("data.jsonl")),
            spreadsheet_id: get("SPREADSHEET_ID"),
            sheet_name: get("SHEET_NAME").unwrap_or_else(|| "Sheet1".to_string()),
            service_account_file: get("GOOGLE_SERVICE_ACCOUNT_FILE")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("service-account.json")),
            allowed_origins: get("ALLOWED_ORIGINS")
                .map(|v| {
                    v.split(',')
                        .map(str::trim)
                        .filter(|o| !o.is_empty())
                        .map(str::to_string)
                        .collect()
                })
                .unwrap_or_else(|| DEFAULT_ALLOWED_ORIGINS.iter().map(|o| o.to_string()).collect()),
            static_dir: get("STATIC_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("public")),
        })
    }

    /// Library-side settings for the pipeline.
    pub fn pipeline_config(&self) -> PipelineConfig {
        PipelineConfig::default().with_data_file(self.data_file.clone())
    }
}

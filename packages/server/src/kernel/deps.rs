//! Builds the pipeline and its collaborators from configuration.

use anyhow::{Context, Result};
use openai_client::OpenAIClient;
use sheets_client::{ServiceAccountKey, SheetsClient};
use std::sync::Arc;
use tracing::{info, warn};

use walk_stats::{OpenAiExtractor, Pipeline, PipelineConfig, RuleExtractor, StatExtractor};

use crate::config::{Config, ExtractorKind};
use crate::kernel::sheets_sink::SheetsSink;

/// Create the configured extractor.
pub fn build_extractor(config: &Config) -> Result<Arc<dyn StatExtractor>> {
    match config.extractor {
        ExtractorKind::OpenAi => {
            let api_key = config
                .openai_api_key
                .clone()
                .context("OPENAI_API_KEY must be set when STATS_EXTRACTOR=openai")?;

            let mut client = OpenAIClient::new(api_key);
            if let Some(url) = &config.openai_base_url {
                client = client.with_base_url(url.clone());
            }

            Ok(Arc::new(
                OpenAiExtractor::new(client).with_model(config.openai_model.clone()),
            ))
        }
        ExtractorKind::Rules => Ok(Arc::new(RuleExtractor::new())),
    }
}

/// Build the pipeline with the settings derived from `config`.
pub fn build_pipeline(config: &Config) -> Result<Pipeline> {
    build_pipeline_with(config, config.pipeline_config())
}

/// Build the pipeline with explicit library settings.
///
/// The spreadsheet sink is only created when persisting and `SPREADSHEET_ID` is set.
pub fn build_pipeline_with(config: &Config, pipeline_config: PipelineConfig) -> Result<Pipeline> {
    let extractor = build_extractor(config)?;
    let persist = pipeline_config.persist;
    let mut pipeline = Pipeline::new(extractor, pipeline_config);

    if persist {
        match &config.spreadsheet_id {
            Some(spreadsheet_id) => {
                let key = ServiceAccountKey::from_file(&config.service_account_file)
                    .with_context(|| {
                        format!(
                            "Failed to load service account from {}",
                            config.service_account_file.display()
                        )
                    })?;
                info!(
                    client_email = %key.client_email,
                    sheet = %config.sheet_name,
                    "Spreadsheet sink enabled"
                );
                pipeline = pipeline.with_sink(Arc::new(SheetsSink::new(
                    SheetsClient::new(key),
                    spreadsheet_id.clone(),
                    config.sheet_name.clone(),
                )));
            }
            None => warn!("SPREADSHEET_ID not set; spreadsheet sink disabled"),
        }
    }

    info!(
        extractor = pipeline.extractor_name(),
        sinks = ?pipeline.sink_names(),
        "Pipeline ready"
    );
    Ok(pipeline)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rules_config() -> Config {
        Config::from_lookup(|key| match key {
            "STATS_EXTRACTOR" => Some("rules".to_string()),
            _ => None,
        })
        .unwrap()
    }

    #[test]
    fn rules_pipeline_has_file_sink_only() {
        let pipeline = build_pipeline(&rules_config()).unwrap();

        assert_eq!(pipeline.extractor_name(), "rules");
        assert_eq!(pipeline.sink_names(), vec!["jsonl"]);
    }

    #[test]
    fn openai_requires_api_key() {
        let mut config = rules_config();
        config.extractor = ExtractorKind::OpenAi;

        assert!(build_extractor(&config).is_err());

        config.openai_api_key = Some("sk-test".to_string());
        assert_eq!(build_extractor(&config).unwrap().name(), "openai");
    }

    #[test]
    fn missing_service_account_is_an_error_when_persisting() {
        let mut config = rules_config();
        config.spreadsheet_id = Some("sheet-123".to_string());
        config.service_account_file = "/nonexistent/service-account.json".into();

        assert!(build_pipeline(&config).is_err());
        assert!(build_pipeline_with(&config, PipelineConfig::in_memory()).is_ok());
    }
}

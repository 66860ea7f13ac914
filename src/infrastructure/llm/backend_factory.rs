use std::sync::Arc;

use crate::application::ports::{TextGenerator, VisionExtractor};
use crate::presentation::config::{ExtractionSettings, ScaffoldConfig, WritingSettings};

use super::mock_text_generator::MockTextGenerator;
use super::mock_vision_extractor::EchoVisionExtractor;
use super::openai_text_client::OpenAiTextClient;
use super::openai_vision_client::OpenAiVisionClient;

#[derive(Debug, thiserror::Error)]
pub enum BackendFactoryError {
    #[error("{0} api_key is required unless scaffold mode is enabled")]
    MissingApiKey(&'static str),
    #[error("{0} model name must not be empty")]
    MissingModel(&'static str),
    #[error("backend initialization failed: {0}")]
    InitializationFailed(String),
}

pub struct BackendFactory;

impl BackendFactory {
    pub fn vision_extractor(
        settings: &ExtractionSettings,
        scaffold: &ScaffoldConfig,
    ) -> Result<Arc<dyn VisionExtractor>, BackendFactoryError> {
        if scaffold.enabled {
            tracing::info!("Scaffold mode: using echo vision extractor");
            return Ok(Arc::new(
                EchoVisionExtractor::default().with_delay(scaffold.mock_response_delay()),
            ));
        }

        let api_key = non_empty(settings.api_key.as_deref())
            .ok_or(BackendFactoryError::MissingApiKey("extraction"))?;
        if settings.primary_model.trim().is_empty() {
            return Err(BackendFactoryError::MissingModel("extraction.primary"));
        }
        if settings.secondary_model.trim().is_empty() {
            return Err(BackendFactoryError::MissingModel("extraction.secondary"));
        }

        tracing::info!(
            base_url = %settings.base_url,
            primary = %settings.primary_model,
            secondary = %settings.secondary_model,
            "Loading OpenAI-compatible vision extractor"
        );

        let client = OpenAiVisionClient::new(
            &settings.base_url,
            api_key,
            settings.max_tokens,
            settings.temperature,
        )
        .map_err(|e| BackendFactoryError::InitializationFailed(e.to_string()))?;

        Ok(Arc::new(client))
    }

    pub fn text_generator(
        settings: &WritingSettings,
        scaffold: &ScaffoldConfig,
    ) -> Result<Arc<dyn TextGenerator>, BackendFactoryError> {
        if scaffold.enabled {
            tracing::info!("Scaffold mode: using mock text generator");
            return Ok(Arc::new(MockTextGenerator));
        }

        let api_key = non_empty(settings.api_key.as_deref())
            .ok_or(BackendFactoryError::MissingApiKey("writing"))?;
        if settings.model.trim().is_empty() {
            return Err(BackendFactoryError::MissingModel("writing"));
        }

        tracing::info!(model = %settings.model, "Loading OpenAI-compatible text generator");

        Ok(Arc::new(OpenAiTextClient::new(
            &settings.base_url,
            api_key.to_string(),
            settings.model.clone(),
            settings.temperature,
        )))
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

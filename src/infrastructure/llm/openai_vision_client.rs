use std::time::Duration;

use async_trait::async_trait;
use base64::{Engine as _, engine::general_purpose};
use reqwest::{Client, StatusCode};
use serde::Deserialize;

use crate::application::ports::{ExtractionServiceError, VisionExtractor};
use crate::domain::{ExtractionRequest, RequestItem};
use crate::infrastructure::text_processing::sanitize_extracted_text;

/// Vision extraction over an OpenAI-compatible `/chat/completions` endpoint.
pub struct OpenAiVisionClient {
    client: Client,
    base_url: String,
    api_key: String,
    max_tokens: u32,
    temperature: f32,
}

impl OpenAiVisionClient {
    pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(300);

    pub fn new(
        base_url: &str,
        api_key: &str,
        max_tokens: u32,
        temperature: f32,
    ) -> Result<Self, ExtractionServiceError> {
        let client = Client::builder()
            .timeout(Self::REQUEST_TIMEOUT)
            .build()
            .map_err(|e| ExtractionServiceError::Configuration(format!("http client: {e}")))?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
            max_tokens,
            temperature,
        })
    }

    pub fn content_parts(request: &ExtractionRequest) -> Vec<serde_json::Value> {
        request
            .items()
            .iter()
            .map(|item| match item {
                RequestItem::Instruction(text) | RequestItem::PositionTag(text) => {
                    serde_json::json!({ "type": "text", "text": text })
                }
                RequestItem::Image { png, .. } => {
                    let b64 = general_purpose::STANDARD.encode(png);
                    serde_json::json!({
                        "type": "image_url",
                        "image_url": {
                            "url": format!("data:image/png;base64,{b64}"),
                            "detail": "high"
                        }
                    })
                }
            })
            .collect()
    }
}

/// Maps an unsuccessful HTTP status to a retryable or permanent error.
pub fn classify_failure(status: StatusCode, body: &str) -> ExtractionServiceError {
    let detail = format!("{status}: {}", body.trim());

    if body.contains("model_not_found")
        || (body.contains("model") && body.contains("does not exist"))
    {
        return ExtractionServiceError::ModelNotFound(detail);
    }

    match status {
        StatusCode::TOO_MANY_REQUESTS if body.contains("insufficient_quota") => {
            ExtractionServiceError::Configuration(detail)
        }
        StatusCode::TOO_MANY_REQUESTS => ExtractionServiceError::RateLimited,
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
            ExtractionServiceError::Unauthorized(detail)
        }
        StatusCode::NOT_FOUND => ExtractionServiceError::ModelNotFound(detail),
        StatusCode::REQUEST_TIMEOUT => ExtractionServiceError::Network(detail),
        s if s.is_server_error() => ExtractionServiceError::Server(detail),
        _ => ExtractionServiceError::Rejected(detail),
    }
}

#[derive(Deserialize)]
struct ChatCompletion {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ChatMessage,
    #[serde(default)]
    finish_reason: Option<String>,
}

#[derive(Deserialize)]
struct ChatMessage {
    content: Option<String>,
}

#[async_trait]
impl VisionExtractor for OpenAiVisionClient {
    #[tracing::instrument(
        skip(self, request),
        fields(items = request.items().len(), images = request.image_count())
    )]
    async fn extract(
        &self,
        request: &ExtractionRequest,
        model: &str,
    ) -> Result<String, ExtractionServiceError> {
        let body = serde_json::json!({
            "model": model,
            "messages": [
                {
                    "role": "user",
                    "content": Self::content_parts(request)
                }
            ],
            "max_tokens": self.max_tokens,
            "temperature": self.temperature,
            "stream": false
        });

        let url = format!("{}/chat/completions", self.base_url);

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| ExtractionServiceError::Network(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            return Err(classify_failure(status, &text));
        }

        let raw_bytes = response
            .bytes()
            .await
            .map_err(|e| ExtractionServiceError::Network(format!("read body: {e}")))?;

        let completion: ChatCompletion = serde_json::from_slice(&raw_bytes).map_err(|e| {
            tracing::error!(
                raw_response = %String::from_utf8_lossy(&raw_bytes),
                "Failed to parse completion JSON"
            );
            ExtractionServiceError::InvalidResponse(format!("json: {e}"))
        })?;

        let choice = completion
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| ExtractionServiceError::InvalidResponse("no choices".to_string()))?;

        if choice.finish_reason.as_deref() == Some("length") {
            tracing::warn!("Completion hit max_tokens; trailing segments may be cut");
        }

        let content = choice.message.content.unwrap_or_default();
        if content.trim().is_empty() {
            return Err(ExtractionServiceError::InvalidResponse(
                "empty completion".to_string(),
            ));
        }

        let text = sanitize_extracted_text(&content);
        tracing::debug!(chars = text.chars().count(), "Extraction response received");

        Ok(text)
    }
}

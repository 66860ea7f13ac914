use async_trait::async_trait;

use crate::domain::ExtractionRequest;

use super::retryable::Retryable;

#[async_trait]
pub trait VisionExtractor: Send + Sync {
    async fn extract(
        &self,
        request: &ExtractionRequest,
        model: &str,
    ) -> Result<String, ExtractionServiceError>;
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ExtractionServiceError {
    #[error("rate limited")]
    RateLimited,
    #[error("server error: {0}")]
    Server(String),
    #[error("network error: {0}")]
    Network(String),
    #[error("invalid response: {0}")]
    InvalidResponse(String),
    #[error("unauthorized: {0}")]
    Unauthorized(String),
    #[error("model not found: {0}")]
    ModelNotFound(String),
    #[error("configuration error: {0}")]
    Configuration(String),
    #[error("request rejected: {0}")]
    Rejected(String),
}

impl ExtractionServiceError {
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            Self::Unauthorized(_) | Self::ModelNotFound(_) | Self::Configuration(_)
        )
    }
}

impl Retryable for ExtractionServiceError {
    fn is_retryable(&self) -> bool {
        !self.is_configuration() && !matches!(self, Self::Rejected(_))
    }
}

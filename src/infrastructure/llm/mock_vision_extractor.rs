use std::time::Duration;

use async_trait::async_trait;

use crate::application::ports::{ExtractionServiceError, VisionExtractor};
use crate::domain::{ExtractionRequest, RequestItem};

/// Echoes every position tag back with a fixed marker after each segment tag.
/// Used in scaffold mode so the pipeline runs without a vision service.
pub struct EchoVisionExtractor {
    marker: String,
    delay: Duration,
}

impl EchoVisionExtractor {
    pub fn new(marker: impl Into<String>) -> Self {
        Self {
            marker: marker.into(),
            delay: Duration::ZERO,
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }
}

impl Default for EchoVisionExtractor {
    fn default() -> Self {
        Self::new("MARKER")
    }
}

#[async_trait]
impl VisionExtractor for EchoVisionExtractor {
    async fn extract(
        &self,
        request: &ExtractionRequest,
        _model: &str,
    ) -> Result<String, ExtractionServiceError> {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }

        let lines: Vec<String> = request
            .items()
            .iter()
            .filter_map(|item| match item {
                RequestItem::PositionTag(tag) if tag.starts_with("[[segment:") => {
                    Some(format!("{tag}\n{}", self.marker))
                }
                RequestItem::PositionTag(tag) => Some(tag.clone()),
                RequestItem::Instruction(_) | RequestItem::Image { .. } => None,
            })
            .collect();

        Ok(lines.join("\n"))
    }
}

use std::sync::Arc;

use crate::application::ports::VisionExtractor;
use crate::domain::{
    ExtractionRequest, ExtractionResult, ExtractionStatus, FailureKind, GridShape, GroupName,
    SourcePage,
};

use super::request_builder::build_request;
use super::retry::{RetryError, RetryPolicy, call_with_retry};

/// Segments pages, sends them to the vision service in reading order, and turns the
/// outcome into a typed result. Never returns an error: failures become sentinel text.
pub struct ExtractionClient {
    extractor: Arc<dyn VisionExtractor>,
    policy: RetryPolicy,
    grid: GridShape,
}

impl ExtractionClient {
    pub fn new(extractor: Arc<dyn VisionExtractor>, policy: RetryPolicy, grid: GridShape) -> Self {
        Self {
            extractor,
            policy,
            grid,
        }
    }

    pub fn grid(&self) -> GridShape {
        self.grid
    }

    pub async fn extract(
        &self,
        group: &GroupName,
        pages: &[SourcePage],
        model: &str,
    ) -> ExtractionResult {
        self.extract_on_grid(group, pages, model, self.grid).await
    }

    /// Same as `extract` with a grid chosen for this run only.
    #[tracing::instrument(skip(self, pages), fields(group = %group, pages = pages.len(), grid = %grid))]
    pub async fn extract_on_grid(
        &self,
        group: &GroupName,
        pages: &[SourcePage],
        model: &str,
        grid: GridShape,
    ) -> ExtractionResult {
        if pages.is_empty() {
            tracing::debug!("No pages supplied, skipping service call");
            return ExtractionResult::empty(group.clone());
        }

        let request = build_request(pages, grid);

        tracing::info!(
            images = request.image_count(),
            unavailable = request.unavailable().len(),
            model,
            "Sending extraction request"
        );

        self.extract_request(group, &request, model).await
    }

    pub async fn extract_request(
        &self,
        group: &GroupName,
        request: &ExtractionRequest,
        model: &str,
    ) -> ExtractionResult {
        let extractor = self.extractor.as_ref();
        let outcome = call_with_retry(&self.policy, "vision_extract", move |_attempt| {
            extractor.extract(request, model)
        })
        .await;

        let result = match outcome {
            Ok(raw_text) => ExtractionResult::from_response(
                group.clone(),
                raw_text,
                request.expected(),
                request.unavailable(),
            ),
            Err(RetryError::NonRetryable { error, .. }) => {
                let kind = if error.is_configuration() {
                    FailureKind::Configuration
                } else {
                    FailureKind::Rejected
                };
                ExtractionResult::failed(group.clone(), kind, error.to_string())
            }
            Err(e) => ExtractionResult::failed(group.clone(), FailureKind::Exhausted, e.to_string()),
        };

        match &result.status {
            ExtractionStatus::Ok => {
                tracing::info!(segments = result.segments.len(), "Extraction completed")
            }
            ExtractionStatus::PartialFailure { missing } => tracing::warn!(
                segments = result.segments.len(),
                missing = missing.len(),
                "Extraction completed with missing segments"
            ),
            ExtractionStatus::Failed { kind, reason } => {
                tracing::error!(kind = ?kind, reason = %reason, "Extraction failed")
            }
        }

        result
    }
}

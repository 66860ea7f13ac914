use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Deserialize;

use crate::application::services::EssayError;
use crate::domain::PipelineContext;
use crate::presentation::state::AppState;

use super::error_response::error_response;

#[derive(Deserialize)]
pub struct EssayRequest {
    pub context: PipelineContext,
    #[serde(default)]
    pub feedback: Option<String>,
}

#[tracing::instrument(skip(state, request))]
pub async fn essay_handler(
    State(state): State<AppState>,
    Json(request): Json<EssayRequest>,
) -> Response {
    let mut context = request.context;
    if let Some(note) = request.feedback {
        context = context.add_feedback(note);
    }

    match state.essay_service.compose(context).await {
        Ok(context) => (StatusCode::OK, Json(context)).into_response(),
        Err(e) => {
            let status = match &e {
                EssayError::Context(_) | EssayError::NoUsableExtraction(_) => {
                    StatusCode::UNPROCESSABLE_ENTITY
                }
                EssayError::Generation(_) => StatusCode::BAD_GATEWAY,
            };
            tracing::error!(error = %e, "Essay composition failed");
            error_response(status, format!("Essay composition failed: {}", e))
        }
    }
}

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Deserialize;

use crate::domain::{GroupName, PipelineContext};
use crate::presentation::state::AppState;

use super::error_response::error_response;

#[derive(Deserialize)]
pub struct SelectGroupRequest {
    pub context: PipelineContext,
    pub group: GroupName,
}

#[derive(Deserialize)]
pub struct CorrectGroupRequest {
    pub context: PipelineContext,
    pub group: GroupName,
    pub text: String,
}

#[tracing::instrument(skip(state, request), fields(group = %request.group))]
pub async fn select_group_handler(
    State(state): State<AppState>,
    Json(request): Json<SelectGroupRequest>,
) -> Response {
    match request
        .context
        .select_group(request.group, state.group_switch_policy)
    {
        Ok(context) => (StatusCode::OK, Json(context)).into_response(),
        Err(e) => {
            tracing::warn!(error = %e, "Group selection rejected");
            error_response(StatusCode::NOT_FOUND, e.to_string())
        }
    }
}

#[tracing::instrument(skip(request), fields(group = %request.group, chars = request.text.chars().count()))]
pub async fn correct_group_handler(Json(request): Json<CorrectGroupRequest>) -> Response {
    match request.context.correct(request.group, request.text) {
        Ok(context) => (StatusCode::OK, Json(context)).into_response(),
        Err(e) => {
            tracing::warn!(error = %e, "Correction rejected");
            error_response(StatusCode::NOT_FOUND, e.to_string())
        }
    }
}

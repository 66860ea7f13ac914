use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde::{Deserialize, Serialize};

use crate::application::services::layout_text;
use crate::domain::CellWrite;
use crate::presentation::state::AppState;

#[derive(Deserialize)]
pub struct LayoutRequest {
    pub text: String,
}

#[derive(Serialize)]
pub struct LayoutResponse {
    pub lines: Vec<String>,
    pub cells: Vec<CellWrite>,
    pub cleared_rows: Vec<String>,
    pub overflow: usize,
}

#[tracing::instrument(skip(state, request), fields(chars = request.text.chars().count()))]
pub async fn layout_handler(
    State(state): State<AppState>,
    Json(request): Json<LayoutRequest>,
) -> impl IntoResponse {
    let (lines, plan) = layout_text(&request.text, &state.sheet_layout);

    tracing::debug!(lines = lines.len(), overflow = plan.overflow, "Cell plan built");

    (
        StatusCode::OK,
        Json(LayoutResponse {
            lines,
            cells: plan.writes,
            cleared_rows: plan.cleared,
            overflow: plan.overflow,
        }),
    )
}

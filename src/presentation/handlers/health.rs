use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde::Serialize;

use crate::presentation::state::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub grid: String,
    pub pool_width: usize,
    pub scaffold: bool,
}

pub async fn health_handler(State(state): State<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(HealthResponse {
            status: "healthy".to_string(),
            grid: state.aggregator.grid().to_string(),
            pool_width: state.aggregator.pool_width(),
            scaffold: state.scaffold_config.enabled,
        }),
    )
}

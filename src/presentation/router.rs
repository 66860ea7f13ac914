use axum::Router;
use axum::body::Body;
use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use tower_http::cors::{Any, CorsLayer};
use tower_http::request_id::{PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::{DefaultOnResponse, TraceLayer};
use tracing::Level;

use crate::infrastructure::observability::{REQUEST_ID_HEADER, UuidRequestId, request_span};
use crate::presentation::handlers::{
    MAX_UPLOAD_BYTES, correct_group_handler, essay_handler, extract_handler, health_handler,
    layout_handler, select_group_handler,
};
use crate::presentation::state::AppState;

pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(request_span::<Body>)
        .on_response(DefaultOnResponse::new().level(Level::INFO));

    Router::new()
        .route("/health", get(health_handler))
        .route(
            "/api/v1/extract",
            post(extract_handler).layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES)),
        )
        .route("/api/v1/context/select", post(select_group_handler))
        .route("/api/v1/context/correct", post(correct_group_handler))
        .route("/api/v1/essay", post(essay_handler))
        .route("/api/v1/layout", post(layout_handler))
        .layer(PropagateRequestIdLayer::new(REQUEST_ID_HEADER))
        .layer(trace_layer)
        .layer(SetRequestIdLayer::new(REQUEST_ID_HEADER, UuidRequestId))
        .layer(cors)
        .with_state(state)
}

pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::relay::handlers;
use crate::state::AppState;

/// Headroom for multipart framing and the non-file form fields.
const MULTIPART_OVERHEAD: usize = 1024 * 1024;

pub fn build_router(state: AppState) -> Router {
    // Two files per scoring request; per-file limits are enforced by the handlers.
    let body_limit = state
        .config
        .max_upload_bytes
        .saturating_mul(2)
        .saturating_add(MULTIPART_OVERHEAD);

    Router::new()
        .route("/health", get(health::health_handler))
        .route("/api/parse-cv", post(handlers::handle_parse_cv))
        .route("/api/score-cv", post(handlers::handle_score_cv))
        .route("/api/export/:format", post(handlers::handle_export))
        .route("/api/candidate/edit", post(handlers::handle_edit_candidate))
        .layer(DefaultBodyLimit::max(body_limit))
        .with_state(state)
}

pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::cv::handlers as cv;
use crate::render::handlers as render;
use crate::scoring::handlers as scoring;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // CV Markdown
        .route("/api/v1/cv/parse", post(cv::handle_parse))
        .route("/api/v1/cv/reserialize", post(cv::handle_reserialize))
        // PDF rendering
        .route("/api/v1/cv/render", post(render::handle_render))
        .route("/api/v1/cv/export", post(render::handle_export))
        // Dashboard heuristics
        .route("/api/v1/readiness", post(scoring::handle_readiness))
        .route("/api/v1/jobs/rank", post(scoring::handle_rank_jobs))
        .route(
            "/api/v1/interview/analyze",
            post(scoring::handle_analyze_session),
        )
        .with_state(state)
}

pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::interview::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        // Deployment liveness probe
        .route("/", get(health::health_handler))
        .route(
            "/generate-questions",
            post(handlers::handle_generate_questions),
        )
        .route(
            "/analyze-response",
            post(handlers::handle_analyze_response),
        )
        .with_state(state)
}

pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::analysis::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Analysis API
        .route("/api/v1/analysis/pgd", post(handlers::handle_calculate_pgd))
        .route("/api/v1/analysis", post(handlers::handle_create_analysis))
        .with_state(state)
}

pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::assessment::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route("/api/v1/bullets/assess", post(handlers::handle_assess))
        .route(
            "/api/v1/bullets/assess-batch",
            post(handlers::handle_assess_batch),
        )
        .with_state(state)
}

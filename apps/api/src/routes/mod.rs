pub mod health;

use axum::{routing::get, routing::post, Router};

use crate::factsheet::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route("/api/v1/factsheets", post(handlers::handle_generate))
        .route(
            "/api/v1/factsheets/render",
            post(handlers::handle_render),
        )
        .with_state(state)
}

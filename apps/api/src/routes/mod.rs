pub mod health;

use axum::{
    http::Uri,
    routing::{get, post},
    Router,
};

use crate::errors::AppError;
use crate::selection::handlers::handle_get_celebrities;
use crate::state::AppState;
use crate::votes::handlers;

async fn not_found(uri: Uri) -> AppError {
    AppError::NotFound(format!("no route for {}", uri.path()))
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Daily selection
        .route("/api/celebrities", get(handle_get_celebrities))
        // Votes
        .route("/api/votes", post(handlers::handle_submit_vote))
        .route("/api/votes/stats", get(handlers::handle_get_stats))
        .route("/api/votes/mine", get(handlers::handle_get_user_vote))
        .fallback(not_found)
        .with_state(state)
}

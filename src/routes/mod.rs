/// Application routes configuration
use crate::handlers::{health, index, AppState};
use axum::{routing::get, Router};

/// Build the application router with all routes
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index))
        // Health check, never touches the weather provider
        .route("/health", get(health))
        .with_state(state)
}

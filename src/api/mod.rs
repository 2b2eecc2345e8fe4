pub mod routes;
pub mod sse;

use std::sync::Arc;

use axum::{routing::get, Router};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

// Re-export for convenience
pub use crate::infrastructure::app_state::AppState;

/// Build the full HTTP application
pub fn create_app(state: Arc<AppState>) -> Router {
    Router::new()
        .nest("/api", routes::create_api_router())
        .route("/health", get(routes::health::health_handler))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

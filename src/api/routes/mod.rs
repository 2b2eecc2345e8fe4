pub mod games;
pub mod health;
pub mod tool_cards;

use std::sync::Arc;

use axum::{
    http::StatusCode,
    response::Json,
    routing::{get, post},
    Router,
};
use serde::Serialize;

use crate::api::sse;
use crate::api::AppState;
use crate::domain::repositories::RepositoryError;

/// Create the main API router
pub fn create_api_router() -> Router<Arc<AppState>> {
    Router::new()
        .nest("/games", create_game_router())
        .nest("/toolcards", create_tool_card_router())
        .route("/events", get(sse::sse_handler))
        .route("/health", get(health::health_handler))
}

/// Create game router
fn create_game_router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", post(games::create_game))
        .route("/:gameId", get(games::get_game_details))
        .route("/:gameId/players", get(games::get_players))
        .route("/:gameId/turn/pass", post(games::pass_turn))
        .route("/:gameId/toolcards", get(tool_cards::list_game_tool_cards))
        .route(
            "/:gameId/toolcards/:toolCardId",
            post(tool_cards::assign_tool_card),
        )
        .route(
            "/:gameId/toolcards/:toolCardId/payment",
            post(tool_cards::pay_for_tool_card),
        )
}

/// Create tool card catalog router
fn create_tool_card_router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(tool_cards::list_tool_cards))
        .route("/:toolCardId", get(tool_cards::get_tool_card))
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

pub type ApiError = (StatusCode, Json<ErrorResponse>);

pub(crate) fn error_response(status: StatusCode, error: &str, code: &str) -> ApiError {
    (
        status,
        Json(ErrorResponse {
            error: error.to_string(),
            code: code.to_string(),
            details: None,
        }),
    )
}

/// Map a repository failure so that store trouble never looks like an empty result
pub(crate) fn repository_error(e: &RepositoryError) -> ApiError {
    let (status, code) = match e {
        RepositoryError::NotFound(_) => (StatusCode::NOT_FOUND, "NOT_FOUND"),
        RepositoryError::AlreadyExists(_) => (StatusCode::CONFLICT, "ALREADY_EXISTS"),
        RepositoryError::ConflictOnAllocate(_) => (StatusCode::CONFLICT, "ID_CONFLICT"),
        RepositoryError::InvalidInput(_) => (StatusCode::BAD_REQUEST, "INVALID_INPUT"),
        RepositoryError::Timeout(_) => (StatusCode::GATEWAY_TIMEOUT, "STORE_TIMEOUT"),
        RepositoryError::StoreUnavailable(_) => {
            (StatusCode::SERVICE_UNAVAILABLE, "STORE_UNAVAILABLE")
        }
    };

    if status.is_server_error() {
        tracing::error!("Request failed: {}", e);
    }

    (
        status,
        Json(ErrorResponse {
            error: e.to_string(),
            code: code.to_string(),
            details: None,
        }),
    )
}

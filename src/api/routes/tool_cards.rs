use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
};
use serde::Serialize;

use crate::api::routes::{error_response, repository_error, ApiError};
use crate::api::AppState;
use crate::application::tool_card::{
    AssignToolCard, AssignToolCardError, AssignToolCardInput, ListGameToolCards,
    ListGameToolCardsError, ListGameToolCardsInput, PayForToolCard, PayForToolCardError,
    PayForToolCardInput,
};
use crate::domain::entities::{GameToolCard, ToolCard};
use crate::domain::repositories::ToolCardRepository;
use crate::infrastructure::app_state::GameEvent;

// ============================================================================
// Response DTOs
// ============================================================================

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolCardListResponse {
    pub success: bool,
    pub tool_cards: Vec<ToolCard>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolCardResponse {
    pub success: bool,
    pub tool_card: ToolCard,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GameToolCardListResponse {
    pub success: bool,
    pub game_id: i64,
    pub tool_cards: Vec<GameToolCard>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignToolCardResponse {
    pub success: bool,
    pub game_id: i64,
    pub tool_card: ToolCard,
    pub association_id: i64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentResponse {
    pub success: bool,
    pub game_id: i64,
    pub tool_card: GameToolCard,
    pub first_payment: bool,
}

fn game_not_found() -> ApiError {
    error_response(StatusCode::NOT_FOUND, "Game not found", "GAME_NOT_FOUND")
}

fn tool_card_not_found() -> ApiError {
    error_response(
        StatusCode::NOT_FOUND,
        "Tool card not found",
        "TOOL_CARD_NOT_FOUND",
    )
}

// ============================================================================
// Route Handlers
// ============================================================================

/// GET /api/toolcards - Whole catalog
pub async fn list_tool_cards(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ToolCardListResponse>, ApiError> {
    let tool_cards = state
        .tool_card_repo
        .all()
        .await
        .map_err(|e| repository_error(&e))?;

    Ok(Json(ToolCardListResponse {
        success: true,
        tool_cards,
    }))
}

/// GET /api/toolcards/:toolCardId - One catalog card
pub async fn get_tool_card(
    State(state): State<Arc<AppState>>,
    Path(tool_card_id): Path<i64>,
) -> Result<Json<ToolCardResponse>, ApiError> {
    let tool_card = state
        .tool_card_repo
        .find_by_id(tool_card_id)
        .await
        .map_err(|e| repository_error(&e))?
        .ok_or_else(tool_card_not_found)?;

    Ok(Json(ToolCardResponse {
        success: true,
        tool_card,
    }))
}

/// GET /api/games/:gameId/toolcards - Enabled cards with payment facts
pub async fn list_game_tool_cards(
    State(state): State<Arc<AppState>>,
    Path(game_id): Path<i64>,
) -> Result<Json<GameToolCardListResponse>, ApiError> {
    let use_case = ListGameToolCards::new(state.game_repo.clone(), state.tool_card_repo.clone());
    let tool_cards = use_case
        .execute(ListGameToolCardsInput { game_id })
        .await
        .map_err(|e| match e {
            ListGameToolCardsError::GameNotFound => game_not_found(),
            ListGameToolCardsError::Repository(e) => repository_error(&e),
        })?;

    Ok(Json(GameToolCardListResponse {
        success: true,
        game_id,
        tool_cards,
    }))
}

/// POST /api/games/:gameId/toolcards/:toolCardId - Enable a card for a game
pub async fn assign_tool_card(
    State(state): State<Arc<AppState>>,
    Path((game_id, tool_card_id)): Path<(i64, i64)>,
) -> Result<(StatusCode, Json<AssignToolCardResponse>), ApiError> {
    let use_case = AssignToolCard::new(state.game_repo.clone(), state.tool_card_repo.clone());
    let result = use_case
        .execute(AssignToolCardInput {
            game_id,
            tool_card_id,
        })
        .await
        .map_err(|e| match e {
            AssignToolCardError::GameNotFound => game_not_found(),
            AssignToolCardError::ToolCardNotFound => tool_card_not_found(),
            AssignToolCardError::AlreadyAssigned => error_response(
                StatusCode::CONFLICT,
                "Tool card is already enabled for this game",
                "TOOL_CARD_ALREADY_ASSIGNED",
            ),
            AssignToolCardError::Repository(e) => repository_error(&e),
        })?;

    state.broadcast_event(
        GameEvent::new("toolCardAssigned", Some(game_id), None).with_data(serde_json::json!({
            "toolCardId": result.tool_card.id,
            "associationId": result.association_id,
        })),
    );

    Ok((
        StatusCode::CREATED,
        Json(AssignToolCardResponse {
            success: true,
            game_id: result.game.id,
            tool_card: result.tool_card,
            association_id: result.association_id,
        }),
    ))
}

/// POST /api/games/:gameId/toolcards/:toolCardId/payment - Spend the favor token
pub async fn pay_for_tool_card(
    State(state): State<Arc<AppState>>,
    Path((game_id, tool_card_id)): Path<(i64, i64)>,
) -> Result<Json<PaymentResponse>, ApiError> {
    let use_case = PayForToolCard::new(state.game_repo.clone(), state.tool_card_repo.clone());
    let result = use_case
        .execute(PayForToolCardInput {
            game_id,
            tool_card_id,
        })
        .await
        .map_err(|e| match e {
            PayForToolCardError::GameNotFound => game_not_found(),
            PayForToolCardError::ToolCardNotFound => tool_card_not_found(),
            PayForToolCardError::ToolCardNotEnabled => error_response(
                StatusCode::CONFLICT,
                "Tool card is not enabled for this game",
                "TOOL_CARD_NOT_ENABLED",
            ),
            PayForToolCardError::Repository(e) => repository_error(&e),
        })?;

    if result.first_payment {
        state.broadcast_event(
            GameEvent::new("favorTokenPaid", Some(game_id), None).with_data(serde_json::json!({
                "toolCardId": result.tool_card.tool_card.id,
            })),
        );
    }

    Ok(Json(PaymentResponse {
        success: true,
        game_id: result.game.id,
        tool_card: result.tool_card,
        first_payment: result.first_payment,
    }))
}

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
};
use serde::{Deserialize, Serialize};

use crate::api::routes::{error_response, repository_error, ApiError};
use crate::api::AppState;
use crate::application::game::{
    GetGameDetails, GetGameDetailsError, GetGameDetailsInput, PassTurn, PassTurnError,
    PassTurnInput, SetupGame, SetupGameError, SetupGameInput, DEFAULT_TOOL_CARD_COUNT,
};
use crate::domain::entities::{Game, GameToolCard, Invite, Player, ToolCard};
use crate::domain::repositories::GameRepository;
use crate::infrastructure::app_state::GameEvent;

// ============================================================================
// Request/Response DTOs
// ============================================================================

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateGameRequest {
    pub challenger: String,
    #[serde(default)]
    pub challengees: Vec<String>,
    pub tool_card_count: Option<usize>,
    pub seed: Option<u64>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateGameResponse {
    pub success: bool,
    pub game: Game,
    pub players: Vec<Player>,
    pub tool_cards: Vec<ToolCard>,
    pub invites: Vec<Invite>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GameDetailsResponse {
    pub success: bool,
    pub game: Game,
    pub players: Vec<Player>,
    pub tool_cards: Vec<GameToolCard>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayersResponse {
    pub success: bool,
    pub game_id: i64,
    pub players: Vec<Player>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PassTurnResponse {
    pub success: bool,
    pub game: Game,
    pub previous_turn_player_id: Option<i64>,
    pub turn_player: Player,
}

// ============================================================================
// Route Handlers
// ============================================================================

/// POST /api/games - Set up a new game
pub async fn create_game(
    State(state): State<Arc<AppState>>,
    Json(body): Json<CreateGameRequest>,
) -> Result<(StatusCode, Json<CreateGameResponse>), ApiError> {
    if body.challenger.trim().is_empty() {
        return Err(error_response(
            StatusCode::BAD_REQUEST,
            "Challenger is required",
            "MISSING_CHALLENGER",
        ));
    }

    let use_case = SetupGame::new(state.game_repo.clone(), state.tool_card_repo.clone());
    let result = use_case
        .execute(SetupGameInput {
            challenger: body.challenger,
            challengees: body.challengees,
            tool_card_count: body.tool_card_count.unwrap_or(DEFAULT_TOOL_CARD_COUNT),
            seed: body.seed,
        })
        .await
        .map_err(|e| match e {
            SetupGameError::Validation(msg) => {
                error_response(StatusCode::BAD_REQUEST, &msg, "VALIDATION_ERROR")
            }
            SetupGameError::Repository(e) => repository_error(&e),
        })?;

    state.broadcast_event(
        GameEvent::new("gameCreated", Some(result.game.id), result.game.turn_player_id)
            .with_data(serde_json::json!({
                "players": result.players.iter().map(|p| p.id).collect::<Vec<_>>(),
                "toolCards": result.tool_cards.iter().map(|t| t.id).collect::<Vec<_>>(),
            })),
    );

    Ok((
        StatusCode::CREATED,
        Json(CreateGameResponse {
            success: true,
            game: result.game,
            players: result.players,
            tool_cards: result.tool_cards,
            invites: result.invites,
        }),
    ))
}

/// GET /api/games/:gameId - Game with players and tool cards
pub async fn get_game_details(
    State(state): State<Arc<AppState>>,
    Path(game_id): Path<i64>,
) -> Result<Json<GameDetailsResponse>, ApiError> {
    let use_case = GetGameDetails::new(state.game_repo.clone(), state.tool_card_repo.clone());
    let result = use_case
        .execute(GetGameDetailsInput { game_id })
        .await
        .map_err(|e| match e {
            GetGameDetailsError::GameNotFound => {
                error_response(StatusCode::NOT_FOUND, "Game not found", "GAME_NOT_FOUND")
            }
            GetGameDetailsError::Repository(e) => repository_error(&e),
        })?;

    Ok(Json(GameDetailsResponse {
        success: true,
        game: result.game,
        players: result.players,
        tool_cards: result.tool_cards,
    }))
}

/// GET /api/games/:gameId/players - Players of a game
pub async fn get_players(
    State(state): State<Arc<AppState>>,
    Path(game_id): Path<i64>,
) -> Result<Json<PlayersResponse>, ApiError> {
    let game = state
        .game_repo
        .find_by_id(game_id)
        .await
        .map_err(|e| repository_error(&e))?
        .ok_or_else(|| {
            error_response(StatusCode::NOT_FOUND, "Game not found", "GAME_NOT_FOUND")
        })?;

    let players = state
        .game_repo
        .players_of(&game)
        .await
        .map_err(|e| repository_error(&e))?;

    Ok(Json(PlayersResponse {
        success: true,
        game_id: game.id,
        players,
    }))
}

/// POST /api/games/:gameId/turn/pass - Hand the turn to the next player
pub async fn pass_turn(
    State(state): State<Arc<AppState>>,
    Path(game_id): Path<i64>,
) -> Result<Json<PassTurnResponse>, ApiError> {
    let use_case = PassTurn::new(state.game_repo.clone());
    let result = use_case
        .execute(PassTurnInput { game_id })
        .await
        .map_err(|e| match e {
            PassTurnError::GameNotFound => {
                error_response(StatusCode::NOT_FOUND, "Game not found", "GAME_NOT_FOUND")
            }
            PassTurnError::NoPlayers => {
                error_response(StatusCode::CONFLICT, "Game has no players", "NO_PLAYERS")
            }
            PassTurnError::Repository(e) => repository_error(&e),
        })?;

    state.broadcast_event(
        GameEvent::new("turnChanged", Some(result.game.id), Some(result.turn_player.id))
            .with_data(serde_json::json!({
                "previousPlayerId": result.previous_turn_player_id,
            })),
    );

    Ok(Json(PassTurnResponse {
        success: true,
        game: result.game,
        previous_turn_player_id: result.previous_turn_player_id,
        turn_player: result.turn_player,
    }))
}

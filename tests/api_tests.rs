//! API integration tests
//!
//! Drives the HTTP surface against a fresh in-memory database per test.

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use std::sync::Arc;
use tower::{Service, ServiceExt};

use sagrada_lobby::api;
use sagrada_lobby::config::DatabaseConfig;
use sagrada_lobby::infrastructure::app_state::AppState;

/// Helper to create a test application
async fn create_test_app() -> Router {
    let state = AppState::from_config(&DatabaseConfig::in_memory())
        .await
        .expect("Failed to create app state");

    api::create_app(Arc::new(state))
}

async fn send(app: &mut Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = ServiceExt::<Request<Body>>::ready(app)
        .await
        .unwrap()
        .call(request)
        .await
        .unwrap();

    let status = response.status();
    let body_bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json: Value = serde_json::from_slice(&body_bytes).unwrap_or(Value::Null);

    (status, json)
}

/// Helper to make a POST request with JSON body
async fn post_json(app: &mut Router, path: &str, body: Value) -> (StatusCode, Value) {
    let request = Request::builder()
        .method("POST")
        .uri(path)
        .header("Content-Type", "application/json")
        .body(Body::from(serde_json::to_string(&body).unwrap()))
        .unwrap();

    send(app, request).await
}

/// Helper to make a POST request without a body
async fn post_empty(app: &mut Router, path: &str) -> (StatusCode, Value) {
    let request = Request::builder()
        .method("POST")
        .uri(path)
        .body(Body::empty())
        .unwrap();

    send(app, request).await
}

/// Helper to make a GET request
async fn get(app: &mut Router, path: &str) -> (StatusCode, Value) {
    let request = Request::builder()
        .method("GET")
        .uri(path)
        .body(Body::empty())
        .unwrap();

    send(app, request).await
}

/// Creates a seeded two-player game and returns its id
async fn create_game(app: &mut Router) -> (i64, Value) {
    let (status, body) = post_json(
        app,
        "/api/games",
        json!({
            "challenger": "alice",
            "challengees": ["bob"],
            "seed": 11
        }),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED, "{}", body);
    (body["game"]["id"].as_i64().unwrap(), body)
}

// ============================================================================
// Health
// ============================================================================

#[tokio::test]
async fn test_health() {
    let mut app = create_test_app().await;

    for path in ["/health", "/api/health"] {
        let (status, body) = get(&mut app, path).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
        assert_eq!(body["database"], "ok");
    }
}

// ============================================================================
// Catalog
// ============================================================================

#[tokio::test]
async fn test_list_tool_cards() {
    let mut app = create_test_app().await;

    let (status, body) = get(&mut app, "/api/toolcards").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    let cards = body["toolCards"].as_array().unwrap();
    assert_eq!(cards.len(), 12);
    assert_eq!(cards[0]["name"], "Grozing Pliers");
    assert_eq!(cards[0]["seqnr"], 1);
}

#[tokio::test]
async fn test_get_tool_card() {
    let mut app = create_test_app().await;

    let (status, body) = get(&mut app, "/api/toolcards/7").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["toolCard"]["name"], "Glazing Hammer");

    let (status, body) = get(&mut app, "/api/toolcards/99").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "TOOL_CARD_NOT_FOUND");
}

// ============================================================================
// Games
// ============================================================================

#[tokio::test]
async fn test_create_game() {
    let mut app = create_test_app().await;

    let (game_id, body) = create_game(&mut app).await;

    assert_eq!(game_id, 1);
    assert_eq!(body["success"], true);
    assert_eq!(body["players"].as_array().unwrap().len(), 2);
    assert_eq!(body["toolCards"].as_array().unwrap().len(), 3);
    assert_eq!(body["game"]["turnPlayerId"], body["players"][0]["id"]);

    let invites = body["invites"].as_array().unwrap();
    assert_eq!(invites.len(), 1);
    assert_eq!(invites[0]["invitedAccount"], "bob");
    assert_eq!(invites[0]["playerId"], body["players"][1]["id"]);
}

#[tokio::test]
async fn test_create_game_validation() {
    let mut app = create_test_app().await;

    let (status, body) = post_json(
        &mut app,
        "/api/games",
        json!({ "challenger": "  ", "challengees": ["bob"] }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "MISSING_CHALLENGER");

    let (status, body) = post_json(
        &mut app,
        "/api/games",
        json!({ "challenger": "alice", "challengees": [] }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION_ERROR");

    let (status, body) = post_json(
        &mut app,
        "/api/games",
        json!({ "challenger": "alice", "challengees": ["bob"], "toolCardCount": 20 }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_get_game_details() {
    let mut app = create_test_app().await;
    let (game_id, created) = create_game(&mut app).await;

    let (status, body) = get(&mut app, &format!("/api/games/{}", game_id)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["game"], created["game"]);
    assert_eq!(body["players"], created["players"]);

    let cards = body["toolCards"].as_array().unwrap();
    assert_eq!(cards.len(), 3);
    assert!(cards.iter().all(|c| c["paidInThisGame"] == false));
}

#[tokio::test]
async fn test_unknown_game() {
    let mut app = create_test_app().await;

    for path in ["/api/games/42", "/api/games/42/players", "/api/games/42/toolcards"] {
        let (status, body) = get(&mut app, path).await;
        assert_eq!(status, StatusCode::NOT_FOUND, "{}", path);
        assert_eq!(body["code"], "GAME_NOT_FOUND");
    }

    let (status, _) = post_empty(&mut app, "/api/games/42/turn/pass").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_get_players() {
    let mut app = create_test_app().await;
    let (game_id, _) = create_game(&mut app).await;

    let (status, body) = get(&mut app, &format!("/api/games/{}/players", game_id)).await;

    assert_eq!(status, StatusCode::OK);
    let players = body["players"].as_array().unwrap();
    assert_eq!(players.len(), 2);
    assert!(players.iter().all(|p| p["gameId"] == game_id));
}

#[tokio::test]
async fn test_pass_turn() {
    let mut app = create_test_app().await;
    let (game_id, created) = create_game(&mut app).await;
    let path = format!("/api/games/{}/turn/pass", game_id);

    let (status, body) = post_empty(&mut app, &path).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["previousTurnPlayerId"], created["players"][0]["id"]);
    assert_eq!(body["turnPlayer"]["id"], created["players"][1]["id"]);

    let (_, body) = post_empty(&mut app, &path).await;
    assert_eq!(body["game"]["turnPlayerId"], created["players"][0]["id"]);
}

// ============================================================================
// Game tool cards
// ============================================================================

#[tokio::test]
async fn test_pay_for_tool_card() {
    let mut app = create_test_app().await;
    let (game_id, created) = create_game(&mut app).await;
    let card_id = created["toolCards"][0]["id"].as_i64().unwrap();
    let path = format!("/api/games/{}/toolcards/{}/payment", game_id, card_id);

    let (status, body) = post_empty(&mut app, &path).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["firstPayment"], true);
    assert_eq!(body["toolCard"]["paidInThisGame"], true);

    let (status, body) = post_empty(&mut app, &path).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["firstPayment"], false);

    let (_, body) = get(&mut app, &format!("/api/games/{}/toolcards", game_id)).await;
    let cards = body["toolCards"].as_array().unwrap();
    for card in cards {
        assert_eq!(card["paidInThisGame"], card["id"] == card_id);
    }
}

#[tokio::test]
async fn test_pay_for_card_not_enabled() {
    let mut app = create_test_app().await;
    let (status, body) = post_json(
        &mut app,
        "/api/games",
        json!({ "challenger": "alice", "challengees": ["bob"], "toolCardCount": 1, "seed": 5 }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let game_id = body["game"]["id"].as_i64().unwrap();
    let enabled = body["toolCards"][0]["id"].as_i64().unwrap();
    let disabled = if enabled == 1 { 2 } else { 1 };

    let (status, body) = post_empty(
        &mut app,
        &format!("/api/games/{}/toolcards/{}/payment", game_id, disabled),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], "TOOL_CARD_NOT_ENABLED");
}

#[tokio::test]
async fn test_assign_tool_card() {
    let mut app = create_test_app().await;
    let (status, body) = post_json(
        &mut app,
        "/api/games",
        json!({ "challenger": "alice", "challengees": ["bob"], "toolCardCount": 1, "seed": 5 }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let game_id = body["game"]["id"].as_i64().unwrap();
    let enabled = body["toolCards"][0]["id"].as_i64().unwrap();
    let extra = if enabled == 7 { 8 } else { 7 };
    let path = format!("/api/games/{}/toolcards/{}", game_id, extra);

    let (status, body) = post_empty(&mut app, &path).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["toolCard"]["id"], extra);
    assert!(body["associationId"].as_i64().unwrap() > 0);

    let (status, body) = post_empty(&mut app, &path).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], "TOOL_CARD_ALREADY_ASSIGNED");

    let (_, body) = get(&mut app, &format!("/api/games/{}/toolcards", game_id)).await;
    assert_eq!(body["toolCards"].as_array().unwrap().len(), 2);

    let (status, body) = post_empty(&mut app, &format!("/api/games/{}/toolcards/99", game_id)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "TOOL_CARD_NOT_FOUND");
}

use std::convert::Infallible;
use std::sync::Arc;
use std::time::Duration;

use async_broadcast::RecvError;
use axum::{
    extract::{Query, State},
    response::sse::{Event, KeepAlive, Sse},
};
use futures::stream::Stream;
use serde::Deserialize;

use crate::infrastructure::app_state::AppState;

#[derive(Deserialize)]
pub struct SseParams {
    /// Only forward events of this game
    #[serde(rename = "gameId")]
    game_id: Option<i64>,
}

/// GET /api/events - Server-sent game events
pub async fn sse_handler(
    State(state): State<Arc<AppState>>,
    Query(params): Query<SseParams>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    let mut receiver = state.event_sender.new_receiver();
    let game_id = params.game_id;

    let stream = async_stream::stream! {
        tracing::debug!("SSE stream started (game filter: {:?})", game_id);

        // Send initial connected event
        yield Ok(Event::default()
            .event("connected")
            .data(serde_json::json!({
                "message": "Connected to SSE stream",
                "gameId": game_id,
                "timestamp": chrono::Utc::now().timestamp_millis()
            }).to_string()));

        let mut heartbeat_interval = tokio::time::interval(Duration::from_secs(20));

        loop {
            tokio::select! {
                _ = heartbeat_interval.tick() => {
                    tracing::trace!("SSE heartbeat");
                    yield Ok(Event::default().comment("heartbeat"));
                }
                result = receiver.recv() => {
                    match result {
                        Ok(event) if event.concerns_game(game_id) => {
                            tracing::debug!("SSE forwarding event: {:?}", event.event_type);
                            let json = serde_json::to_string(&event).unwrap_or_default();
                            yield Ok(Event::default()
                                .event("event")
                                .data(json));
                        }
                        Ok(_) => {}
                        Err(RecvError::Overflowed(skipped)) => {
                            tracing::warn!("SSE client lagging, {} events skipped", skipped);
                        }
                        Err(RecvError::Closed) => {
                            tracing::debug!("SSE channel closed, ending stream");
                            break;
                        }
                    }
                }
            }
        }
    };

    Sse::new(stream).keep_alive(KeepAlive::default())
}

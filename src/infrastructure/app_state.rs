use std::sync::Arc;

use async_broadcast::{broadcast, InactiveReceiver, Sender, TrySendError};

use crate::config::DatabaseConfig;
use crate::infrastructure::database::repositories::{
    SqliteGameRepository, SqlitePlayerRepository, SqliteToolCardRepository,
};
use crate::infrastructure::database::Database;

pub type SqliteGameRepo = SqliteGameRepository<SqlitePlayerRepository>;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    /// Pooled store handle
    pub db: Database,

    /// Player repository
    pub player_repo: Arc<SqlitePlayerRepository>,

    /// Game repository
    pub game_repo: Arc<SqliteGameRepo>,

    /// Tool card repository
    pub tool_card_repo: Arc<SqliteToolCardRepository>,

    /// Event broadcaster for SSE
    pub event_sender: Sender<GameEvent>,
    /// Keeps the channel open while no SSE client is listening
    pub event_receiver: InactiveReceiver<GameEvent>,
}

impl AppState {
    pub async fn from_config(config: &DatabaseConfig) -> anyhow::Result<Self> {
        tracing::info!("Connecting to database: {}", config.url);

        let db = Database::connect(config).await?;
        db.migrate().await?;

        Ok(Self::with_database(db))
    }

    pub fn with_database(db: Database) -> Self {
        // Create repositories
        let player_repo = Arc::new(SqlitePlayerRepository::new(db.clone()));
        let game_repo = Arc::new(SqliteGameRepository::new(db.clone(), player_repo.clone()));
        let tool_card_repo = Arc::new(SqliteToolCardRepository::new(db.clone()));

        // Create event broadcaster (capacity of 1000 events, oldest dropped first)
        let (mut event_sender, event_receiver) = broadcast(1000);
        event_sender.set_overflow(true);

        Self {
            db,
            player_repo,
            game_repo,
            tool_card_repo,
            event_sender,
            event_receiver: event_receiver.deactivate(),
        }
    }

    /// Broadcast an event to all connected SSE clients
    pub fn broadcast_event(&self, event: GameEvent) {
        let receiver_count = self.event_sender.receiver_count();
        tracing::debug!(
            "Broadcasting event '{}' to {} receivers",
            event.event_type,
            receiver_count
        );
        match self.event_sender.try_broadcast(event) {
            Ok(None) => {}
            Ok(Some(_)) => {
                tracing::debug!("Event broadcast with overflow, oldest event dropped");
            }
            Err(TrySendError::Inactive(_)) => {
                tracing::trace!("Event dropped, no active receivers");
            }
            Err(e) => {
                tracing::warn!("Failed to broadcast event: {:?}", e);
            }
        }
    }
}

/// Game event for SSE broadcasting
#[derive(Debug, Clone, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GameEvent {
    #[serde(rename = "type")]
    pub event_type: String,
    pub game_id: Option<i64>,
    pub player_id: Option<i64>,
    /// Additional data fields (flattened into root)
    #[serde(flatten)]
    pub data: serde_json::Value,
    pub timestamp: i64,
}

impl GameEvent {
    pub fn new(event_type: &str, game_id: Option<i64>, player_id: Option<i64>) -> Self {
        Self {
            event_type: event_type.to_string(),
            game_id,
            player_id,
            data: serde_json::Value::Object(serde_json::Map::new()),
            timestamp: chrono::Utc::now().timestamp_millis(),
        }
    }

    pub fn with_data(mut self, data: serde_json::Value) -> Self {
        self.data = data;
        self
    }

    /// Whether an SSE client filtering on `game_id` should see this event
    pub fn concerns_game(&self, game_id: Option<i64>) -> bool {
        match game_id {
            Some(id) => self.game_id == Some(id),
            None => true,
        }
    }
}

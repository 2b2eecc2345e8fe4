use serde::{Deserialize, Serialize};

/// Player entity - a seat in exactly one game
///
/// `game_id` is a non-owning back-reference; repositories overwrite it with the
/// game a player was resolved through.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Player {
    pub id: i64,
    pub game_id: i64,
}

impl Player {
    /// Create a new player
    pub fn new(id: i64, game_id: i64) -> Self {
        Self { id, game_id }
    }

    /// Link the player to a game
    pub fn set_game(&mut self, game_id: i64) {
        self.game_id = game_id;
    }
}

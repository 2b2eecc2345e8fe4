use serde::{Deserialize, Serialize};

use crate::domain::entities::Player;

/// Game entity - one played session of the board game
///
/// Players and enabled tool cards are not loaded with the game; they are
/// resolved through explicit repository calls.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Game {
    pub id: i64,
    pub turn_player_id: Option<i64>,
}

impl Game {
    /// Create a game that has no turn player yet
    pub fn new(id: i64) -> Self {
        Self {
            id,
            turn_player_id: None,
        }
    }

    /// Give the turn to a player
    pub fn set_turn_player(&mut self, player: &Player) {
        self.turn_player_id = Some(player.id);
    }

    /// Check if it is this player's turn
    pub fn is_turn_of(&self, player_id: i64) -> bool {
        self.turn_player_id == Some(player_id)
    }

    /// Pick the player whose turn follows the current one.
    ///
    /// Players are ordered by id and the order wraps around. When nobody holds
    /// the turn, or the holder is not among `players`, the lowest id starts.
    pub fn next_turn_player<'a>(&self, players: &'a [Player]) -> Option<&'a Player> {
        let mut ordered: Vec<&Player> = players.iter().collect();
        ordered.sort_by_key(|p| p.id);

        let current = self
            .turn_player_id
            .and_then(|id| ordered.iter().position(|p| p.id == id));

        match current {
            Some(idx) => ordered.get((idx + 1) % ordered.len()).copied(),
            None => ordered.first().copied(),
        }
    }
}

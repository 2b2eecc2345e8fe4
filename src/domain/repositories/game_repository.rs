use async_trait::async_trait;

use crate::domain::entities::{Game, Player, ToolCard};
use crate::domain::repositories::RepositoryError;

/// Game repository trait
#[async_trait]
pub trait GameRepository: Send + Sync {
    /// Find game by ID. Players and tool cards are not loaded.
    async fn find_by_id(&self, id: i64) -> Result<Option<Game>, RepositoryError>;

    /// Next unused game ID (`max + 1`, `1` when empty). Not reserved.
    async fn next_id(&self) -> Result<i64, RepositoryError>;

    /// Insert a game with its pre-assigned ID
    async fn create(&self, game: &Game) -> Result<(), RepositoryError>;

    /// Allocate an ID and insert a new game in one step
    async fn create_next(&self) -> Result<Game, RepositoryError>;

    /// Create a game with `player_count` new players, the first one holding the
    /// turn, and `tool_cards` enabled. Runs as one transaction: on error nothing
    /// of the game is stored.
    async fn create_with_setup(
        &self,
        player_count: usize,
        tool_cards: &[ToolCard],
    ) -> Result<(Game, Vec<Player>), RepositoryError>;

    /// Persist whose turn it is
    async fn update_turn(&self, game: &Game) -> Result<(), RepositoryError>;

    /// Get the players of a game, each linked back to it
    async fn players_of(&self, game: &Game) -> Result<Vec<Player>, RepositoryError>;
}

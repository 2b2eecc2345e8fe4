use async_trait::async_trait;

use crate::domain::entities::Player;
use crate::domain::repositories::RepositoryError;

/// Player repository trait
#[async_trait]
pub trait PlayerRepository: Send + Sync {
    /// Find player by ID
    async fn find_by_id(&self, id: i64) -> Result<Option<Player>, RepositoryError>;

    /// Allocate an ID and insert a new player for a game
    async fn create_next(&self, game_id: i64) -> Result<Player, RepositoryError>;
}

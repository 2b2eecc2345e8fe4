use async_trait::async_trait;

use crate::domain::entities::{Game, ToolCard};
use crate::domain::repositories::RepositoryError;

/// Tool card repository trait
///
/// Covers the catalog, the game/tool card association and the favor-token
/// payment records.
#[async_trait]
pub trait ToolCardRepository: Send + Sync {
    // ========== Catalog ==========

    /// Get the whole catalog
    async fn all(&self) -> Result<Vec<ToolCard>, RepositoryError>;

    /// Find tool card by ID
    async fn find_by_id(&self, id: i64) -> Result<Option<ToolCard>, RepositoryError>;

    // ========== Game association ==========

    /// Get the tool cards enabled for a game
    async fn all_for_game(&self, game: &Game) -> Result<Vec<ToolCard>, RepositoryError>;

    /// Enable a tool card for a game, returning the new association ID
    async fn assign_to_game(&self, tool_card: &ToolCard, game: &Game)
        -> Result<i64, RepositoryError>;

    /// Association ID for a tool card in a game, `None` if it is not enabled
    async fn association_id_for(
        &self,
        tool_card_id: i64,
        game_id: i64,
    ) -> Result<Option<i64>, RepositoryError>;

    // ========== Favor-token payments ==========

    /// Check whether the favor token for this tool card was already spent in the game
    async fn recorded_payment(&self, tool_card: &ToolCard, game: &Game)
        -> Result<bool, RepositoryError>;

    /// Record the favor-token payment. Returns `false` if it was already recorded.
    async fn record_payment(&self, tool_card: &ToolCard, game: &Game)
        -> Result<bool, RepositoryError>;
}

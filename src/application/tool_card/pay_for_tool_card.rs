use std::sync::Arc;

use crate::domain::entities::{Game, GameToolCard};
use crate::domain::repositories::{GameRepository, RepositoryError, ToolCardRepository};

/// Pay for tool card input
pub struct PayForToolCardInput {
    pub game_id: i64,
    pub tool_card_id: i64,
}

/// Pay for tool card output
#[derive(Debug)]
pub struct PayForToolCardOutput {
    pub game: Game,
    pub tool_card: GameToolCard,
    /// False when the favor token had already been spent on this card
    pub first_payment: bool,
}

/// Pay for tool card use case - records the favor-token payment once per game
pub struct PayForToolCard<G: GameRepository, T: ToolCardRepository> {
    game_repo: Arc<G>,
    tool_card_repo: Arc<T>,
}

impl<G: GameRepository, T: ToolCardRepository> PayForToolCard<G, T> {
    pub fn new(game_repo: Arc<G>, tool_card_repo: Arc<T>) -> Self {
        Self {
            game_repo,
            tool_card_repo,
        }
    }

    pub async fn execute(
        &self,
        input: PayForToolCardInput,
    ) -> Result<PayForToolCardOutput, PayForToolCardError> {
        let game = self
            .game_repo
            .find_by_id(input.game_id)
            .await?
            .ok_or(PayForToolCardError::GameNotFound)?;

        let tool_card = self
            .tool_card_repo
            .find_by_id(input.tool_card_id)
            .await?
            .ok_or(PayForToolCardError::ToolCardNotFound)?;

        if self
            .tool_card_repo
            .association_id_for(tool_card.id, game.id)
            .await?
            .is_none()
        {
            return Err(PayForToolCardError::ToolCardNotEnabled);
        }

        let first_payment = self.tool_card_repo.record_payment(&tool_card, &game).await?;

        Ok(PayForToolCardOutput {
            game,
            tool_card: GameToolCard::new(tool_card, true),
            first_payment,
        })
    }
}

#[derive(Debug, thiserror::Error)]
pub enum PayForToolCardError {
    #[error("Game not found")]
    GameNotFound,
    #[error("Tool card not found")]
    ToolCardNotFound,
    #[error("Tool card is not enabled for this game")]
    ToolCardNotEnabled,
    #[error("Repository error: {0}")]
    Repository(#[from] RepositoryError),
}

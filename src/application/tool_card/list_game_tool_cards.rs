use std::sync::Arc;

use crate::domain::entities::{Game, GameToolCard};
use crate::domain::repositories::{GameRepository, RepositoryError, ToolCardRepository};

/// Pair every tool card enabled for `game` with its favor-token payment fact
pub async fn tool_cards_with_payment<T: ToolCardRepository + ?Sized>(
    tool_card_repo: &T,
    game: &Game,
) -> Result<Vec<GameToolCard>, RepositoryError> {
    let enabled = tool_card_repo.all_for_game(game).await?;

    let mut tool_cards = Vec::with_capacity(enabled.len());
    for tool_card in enabled {
        let paid = tool_card_repo.recorded_payment(&tool_card, game).await?;
        tool_cards.push(GameToolCard::new(tool_card, paid));
    }

    Ok(tool_cards)
}

/// List game tool cards input
pub struct ListGameToolCardsInput {
    pub game_id: i64,
}

/// List game tool cards use case
pub struct ListGameToolCards<G: GameRepository, T: ToolCardRepository> {
    game_repo: Arc<G>,
    tool_card_repo: Arc<T>,
}

impl<G: GameRepository, T: ToolCardRepository> ListGameToolCards<G, T> {
    pub fn new(game_repo: Arc<G>, tool_card_repo: Arc<T>) -> Self {
        Self {
            game_repo,
            tool_card_repo,
        }
    }

    pub async fn execute(
        &self,
        input: ListGameToolCardsInput,
    ) -> Result<Vec<GameToolCard>, ListGameToolCardsError> {
        let game = self
            .game_repo
            .find_by_id(input.game_id)
            .await?
            .ok_or(ListGameToolCardsError::GameNotFound)?;

        Ok(tool_cards_with_payment(self.tool_card_repo.as_ref(), &game).await?)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ListGameToolCardsError {
    #[error("Game not found")]
    GameNotFound,
    #[error("Repository error: {0}")]
    Repository(#[from] RepositoryError),
}

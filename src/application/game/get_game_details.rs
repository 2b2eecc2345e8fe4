use std::sync::Arc;

use crate::application::tool_card::tool_cards_with_payment;
use crate::domain::entities::{Game, GameToolCard, Player};
use crate::domain::repositories::{GameRepository, RepositoryError, ToolCardRepository};

/// Get game details input
pub struct GetGameDetailsInput {
    pub game_id: i64,
}

/// Get game details output
#[derive(Debug)]
pub struct GetGameDetailsOutput {
    pub game: Game,
    pub players: Vec<Player>,
    pub tool_cards: Vec<GameToolCard>,
}

/// Get game details use case
///
/// Assembles a game with its players and enabled tool cards, each card paired
/// with whether its favor token was already spent in this game.
pub struct GetGameDetails<G: GameRepository, T: ToolCardRepository> {
    game_repo: Arc<G>,
    tool_card_repo: Arc<T>,
}

impl<G: GameRepository, T: ToolCardRepository> GetGameDetails<G, T> {
    pub fn new(game_repo: Arc<G>, tool_card_repo: Arc<T>) -> Self {
        Self {
            game_repo,
            tool_card_repo,
        }
    }

    pub async fn execute(
        &self,
        input: GetGameDetailsInput,
    ) -> Result<GetGameDetailsOutput, GetGameDetailsError> {
        let game = self
            .game_repo
            .find_by_id(input.game_id)
            .await?
            .ok_or(GetGameDetailsError::GameNotFound)?;

        let players = self.game_repo.players_of(&game).await?;

        let tool_cards = tool_cards_with_payment(self.tool_card_repo.as_ref(), &game).await?;

        Ok(GetGameDetailsOutput {
            game,
            players,
            tool_cards,
        })
    }
}

#[derive(Debug, thiserror::Error)]
pub enum GetGameDetailsError {
    #[error("Game not found")]
    GameNotFound,
    #[error("Repository error: {0}")]
    Repository(#[from] RepositoryError),
}

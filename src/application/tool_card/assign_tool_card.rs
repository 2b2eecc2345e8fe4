use std::sync::Arc;

use crate::domain::entities::{Game, ToolCard};
use crate::domain::repositories::{GameRepository, RepositoryError, ToolCardRepository};

/// Assign tool card input
pub struct AssignToolCardInput {
    pub game_id: i64,
    pub tool_card_id: i64,
}

/// Assign tool card output
#[derive(Debug)]
pub struct AssignToolCardOutput {
    pub game: Game,
    pub tool_card: ToolCard,
    pub association_id: i64,
}

/// Assign tool card use case - enables a catalog card for a game
pub struct AssignToolCard<G: GameRepository, T: ToolCardRepository> {
    game_repo: Arc<G>,
    tool_card_repo: Arc<T>,
}

impl<G: GameRepository, T: ToolCardRepository> AssignToolCard<G, T> {
    pub fn new(game_repo: Arc<G>, tool_card_repo: Arc<T>) -> Self {
        Self {
            game_repo,
            tool_card_repo,
        }
    }

    pub async fn execute(
        &self,
        input: AssignToolCardInput,
    ) -> Result<AssignToolCardOutput, AssignToolCardError> {
        let game = self
            .game_repo
            .find_by_id(input.game_id)
            .await?
            .ok_or(AssignToolCardError::GameNotFound)?;

        let tool_card = self
            .tool_card_repo
            .find_by_id(input.tool_card_id)
            .await?
            .ok_or(AssignToolCardError::ToolCardNotFound)?;

        let association_id = match self.tool_card_repo.assign_to_game(&tool_card, &game).await {
            Ok(id) => id,
            Err(RepositoryError::AlreadyExists(_)) => {
                return Err(AssignToolCardError::AlreadyAssigned)
            }
            Err(e) => return Err(e.into()),
        };

        Ok(AssignToolCardOutput {
            game,
            tool_card,
            association_id,
        })
    }
}

#[derive(Debug, thiserror::Error)]
pub enum AssignToolCardError {
    #[error("Game not found")]
    GameNotFound,
    #[error("Tool card not found")]
    ToolCardNotFound,
    #[error("Tool card is already enabled for this game")]
    AlreadyAssigned,
    #[error("Repository error: {0}")]
    Repository(#[from] RepositoryError),
}

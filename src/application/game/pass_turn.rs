use std::sync::Arc;

use crate::domain::entities::{Game, Player};
use crate::domain::repositories::{GameRepository, RepositoryError};

/// Pass turn input
pub struct PassTurnInput {
    pub game_id: i64,
}

/// Pass turn output
#[derive(Debug)]
pub struct PassTurnOutput {
    pub game: Game,
    pub previous_turn_player_id: Option<i64>,
    pub turn_player: Player,
}

/// Pass turn use case - hands the turn to the next player by seat order
pub struct PassTurn<G: GameRepository> {
    game_repo: Arc<G>,
}

impl<G: GameRepository> PassTurn<G> {
    pub fn new(game_repo: Arc<G>) -> Self {
        Self { game_repo }
    }

    pub async fn execute(&self, input: PassTurnInput) -> Result<PassTurnOutput, PassTurnError> {
        let mut game = self
            .game_repo
            .find_by_id(input.game_id)
            .await?
            .ok_or(PassTurnError::GameNotFound)?;

        let players = self.game_repo.players_of(&game).await?;

        let turn_player = game
            .next_turn_player(&players)
            .cloned()
            .ok_or(PassTurnError::NoPlayers)?;

        let previous_turn_player_id = game.turn_player_id;
        game.set_turn_player(&turn_player);
        self.game_repo.update_turn(&game).await?;

        tracing::debug!(
            "Game {}: turn passed from {:?} to {}",
            game.id,
            previous_turn_player_id,
            turn_player.id
        );

        Ok(PassTurnOutput {
            game,
            previous_turn_player_id,
            turn_player,
        })
    }
}

#[derive(Debug, thiserror::Error)]
pub enum PassTurnError {
    #[error("Game not found")]
    GameNotFound,
    #[error("Game has no players")]
    NoPlayers,
    #[error("Repository error: {0}")]
    Repository(#[from] RepositoryError),
}

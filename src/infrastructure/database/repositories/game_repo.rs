use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::entities::{Game, Player, ToolCard};
use crate::domain::repositories::{GameRepository, PlayerRepository, RepositoryError};
use crate::infrastructure::database::id_allocator::{self, IdTable};
use crate::infrastructure::database::Database;

use super::player_repo::insert_next_player;
use super::tool_card_repo::insert_association;

/// Allocate the next game ID and insert the game in one statement
async fn insert_next_game<'e, E>(executor: E) -> Result<i64, sqlx::Error>
where
    E: sqlx::Executor<'e, Database = sqlx::Sqlite>,
{
    sqlx::query_scalar(
        r#"
        INSERT INTO game (idgame)
        SELECT COALESCE(MAX(idgame), 0) + 1 FROM game
        RETURNING idgame
        "#,
    )
    .fetch_one(executor)
    .await
}

/// Returns the number of games updated
async fn set_turn_player<'e, E>(
    executor: E,
    game_id: i64,
    player_id: i64,
) -> Result<u64, sqlx::Error>
where
    E: sqlx::Executor<'e, Database = sqlx::Sqlite>,
{
    let result = sqlx::query("UPDATE game SET turn_idplayer = ? WHERE idgame = ?")
        .bind(player_id)
        .bind(game_id)
        .execute(executor)
        .await?;

    Ok(result.rows_affected())
}

/// SQLite implementation of GameRepository
pub struct SqliteGameRepository<P: PlayerRepository> {
    db: Database,
    player_repo: Arc<P>,
}

impl<P: PlayerRepository> SqliteGameRepository<P> {
    pub fn new(db: Database, player_repo: Arc<P>) -> Self {
        Self { db, player_repo }
    }

    fn row_to_game(row: &sqlx::sqlite::SqliteRow) -> Game {
        use sqlx::Row;

        Game {
            id: row.get("idgame"),
            turn_player_id: row.get("turn_idplayer"),
        }
    }
}

#[async_trait]
impl<P: PlayerRepository> GameRepository for SqliteGameRepository<P> {
    async fn find_by_id(&self, id: i64) -> Result<Option<Game>, RepositoryError> {
        let row = self
            .db
            .run(
                "game.find_by_id",
                sqlx::query("SELECT idgame, turn_idplayer FROM game WHERE idgame = ?")
                    .bind(id)
                    .fetch_optional(self.db.pool()),
            )
            .await?;

        if row.is_none() {
            tracing::debug!("No record for game {}", id);
        }

        Ok(row.as_ref().map(Self::row_to_game))
    }

    async fn next_id(&self) -> Result<i64, RepositoryError> {
        id_allocator::next_id(&self.db, IdTable::Game).await
    }

    async fn create(&self, game: &Game) -> Result<(), RepositoryError> {
        self.db
            .run(
                "game.create",
                sqlx::query("INSERT INTO game (idgame, turn_idplayer) VALUES (?, ?)")
                    .bind(game.id)
                    .bind(game.turn_player_id)
                    .execute(self.db.pool()),
            )
            .await?;

        tracing::debug!("Created game {}", game.id);

        Ok(())
    }

    async fn create_next(&self) -> Result<Game, RepositoryError> {
        let id = self
            .db
            .run("game.create_next", insert_next_game(self.db.pool()))
            .await?;

        tracing::debug!("Created game {}", id);

        Ok(Game::new(id))
    }

    async fn create_with_setup(
        &self,
        player_count: usize,
        tool_cards: &[ToolCard],
    ) -> Result<(Game, Vec<Player>), RepositoryError> {
        if player_count == 0 {
            return Err(RepositoryError::InvalidInput(
                "a game needs at least one player".to_string(),
            ));
        }

        let pool = self.db.pool();
        let (game, players) = self
            .db
            .run("game.create_with_setup", async {
                let mut tx = pool.begin().await?;

                let mut game = Game::new(insert_next_game(&mut *tx).await?);

                let mut players = Vec::with_capacity(player_count);
                for _ in 0..player_count {
                    let player_id = insert_next_player(&mut *tx, game.id).await?;
                    players.push(Player::new(player_id, game.id));
                }

                game.set_turn_player(&players[0]);
                set_turn_player(&mut *tx, game.id, players[0].id).await?;

                for tool_card in tool_cards {
                    insert_association(&mut *tx, tool_card.id, game.id).await?;
                }

                // Dropping `tx` on any error above rolls the whole setup back
                tx.commit().await?;

                Ok::<_, sqlx::Error>((game, players))
            })
            .await?;

        tracing::debug!(
            "Created game {} with {} players and {} tool cards",
            game.id,
            players.len(),
            tool_cards.len()
        );

        Ok((game, players))
    }

    async fn update_turn(&self, game: &Game) -> Result<(), RepositoryError> {
        let turn_player_id = game.turn_player_id.ok_or_else(|| {
            RepositoryError::InvalidInput(format!("game {} has no turn player", game.id))
        })?;

        let updated = self
            .db
            .run(
                "game.update_turn",
                set_turn_player(self.db.pool(), game.id, turn_player_id),
            )
            .await?;

        if updated == 0 {
            return Err(RepositoryError::NotFound(format!("game {}", game.id)));
        }

        Ok(())
    }

    async fn players_of(&self, game: &Game) -> Result<Vec<Player>, RepositoryError> {
        let player_ids: Vec<i64> = self
            .db
            .run(
                "game.players_of",
                sqlx::query_scalar(
                    "SELECT idplayer FROM player WHERE game_idgame = ? ORDER BY idplayer",
                )
                .bind(game.id)
                .fetch_all(self.db.pool()),
            )
            .await?;

        let mut players = Vec::with_capacity(player_ids.len());
        for player_id in player_ids {
            let mut player = self
                .player_repo
                .find_by_id(player_id)
                .await?
                .ok_or_else(|| RepositoryError::NotFound(format!("player {}", player_id)))?;

            player.set_game(game.id);
            players.push(player);
        }

        Ok(players)
    }
}

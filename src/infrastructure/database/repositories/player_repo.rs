use async_trait::async_trait;

use crate::domain::entities::Player;
use crate::domain::repositories::{PlayerRepository, RepositoryError};
use crate::infrastructure::database::Database;

/// Allocate the next player ID and insert the player in one statement
pub(super) async fn insert_next_player<'e, E>(
    executor: E,
    game_id: i64,
) -> Result<i64, sqlx::Error>
where
    E: sqlx::Executor<'e, Database = sqlx::Sqlite>,
{
    sqlx::query_scalar(
        r#"
        INSERT INTO player (idplayer, game_idgame)
        SELECT COALESCE(MAX(idplayer), 0) + 1, ? FROM player
        RETURNING idplayer
        "#,
    )
    .bind(game_id)
    .fetch_one(executor)
    .await
}

/// SQLite implementation of PlayerRepository
pub struct SqlitePlayerRepository {
    db: Database,
}

impl SqlitePlayerRepository {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    fn row_to_player(row: &sqlx::sqlite::SqliteRow) -> Player {
        use sqlx::Row;

        Player {
            id: row.get("idplayer"),
            game_id: row.get("game_idgame"),
        }
    }
}

#[async_trait]
impl PlayerRepository for SqlitePlayerRepository {
    async fn find_by_id(&self, id: i64) -> Result<Option<Player>, RepositoryError> {
        let row = self
            .db
            .run(
                "player.find_by_id",
                sqlx::query("SELECT idplayer, game_idgame FROM player WHERE idplayer = ?")
                    .bind(id)
                    .fetch_optional(self.db.pool()),
            )
            .await?;

        Ok(row.as_ref().map(Self::row_to_player))
    }

    async fn create_next(&self, game_id: i64) -> Result<Player, RepositoryError> {
        let id: i64 = self
            .db
            .run(
                "player.create_next",
                insert_next_player(self.db.pool(), game_id),
            )
            .await?;

        tracing::debug!("Created player {} in game {}", id, game_id);

        Ok(Player::new(id, game_id))
    }
}

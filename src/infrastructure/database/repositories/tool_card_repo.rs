use async_trait::async_trait;

use crate::domain::entities::{Game, ToolCard};
use crate::domain::repositories::{RepositoryError, ToolCardRepository};
use crate::infrastructure::database::Database;

/// Allocate the next association ID and enable the tool card for the game
pub(super) async fn insert_association<'e, E>(
    executor: E,
    tool_card_id: i64,
    game_id: i64,
) -> Result<i64, sqlx::Error>
where
    E: sqlx::Executor<'e, Database = sqlx::Sqlite>,
{
    sqlx::query_scalar(
        r#"
        INSERT INTO gametoolcard (gametoolcard, idtoolcard, idgame)
        SELECT COALESCE(MAX(gametoolcard), 0) + 1, ?, ? FROM gametoolcard
        RETURNING gametoolcard
        "#,
    )
    .bind(tool_card_id)
    .bind(game_id)
    .fetch_one(executor)
    .await
}

/// SQLite implementation of ToolCardRepository
pub struct SqliteToolCardRepository {
    db: Database,
}

impl SqliteToolCardRepository {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    fn row_to_tool_card(row: &sqlx::sqlite::SqliteRow) -> ToolCard {
        use sqlx::Row;

        ToolCard {
            id: row.get("idtoolcard"),
            name: row.get("name"),
            seqnr: row.get("seqnr"),
            description: row.get("description"),
        }
    }
}

#[async_trait]
impl ToolCardRepository for SqliteToolCardRepository {
    async fn all(&self) -> Result<Vec<ToolCard>, RepositoryError> {
        let rows = self
            .db
            .run(
                "toolcard.all",
                sqlx::query(
                    "SELECT idtoolcard, name, seqnr, description FROM toolcard ORDER BY seqnr",
                )
                .fetch_all(self.db.pool()),
            )
            .await?;

        Ok(rows.iter().map(Self::row_to_tool_card).collect())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<ToolCard>, RepositoryError> {
        let row = self
            .db
            .run(
                "toolcard.find_by_id",
                sqlx::query(
                    "SELECT idtoolcard, name, seqnr, description FROM toolcard WHERE idtoolcard = ?",
                )
                .bind(id)
                .fetch_optional(self.db.pool()),
            )
            .await?;

        Ok(row.as_ref().map(Self::row_to_tool_card))
    }

    async fn all_for_game(&self, game: &Game) -> Result<Vec<ToolCard>, RepositoryError> {
        let rows = self
            .db
            .run(
                "toolcard.all_for_game",
                sqlx::query(
                    r#"
                    SELECT t.idtoolcard, t.name, t.seqnr, t.description
                    FROM toolcard t
                    INNER JOIN gametoolcard g ON t.idtoolcard = g.idtoolcard
                    WHERE g.idgame = ?
                    ORDER BY t.seqnr
                    "#,
                )
                .bind(game.id)
                .fetch_all(self.db.pool()),
            )
            .await?;

        Ok(rows.iter().map(Self::row_to_tool_card).collect())
    }

    async fn assign_to_game(
        &self,
        tool_card: &ToolCard,
        game: &Game,
    ) -> Result<i64, RepositoryError> {
        let association_id: i64 = self
            .db
            .run(
                "toolcard.assign_to_game",
                insert_association(self.db.pool(), tool_card.id, game.id),
            )
            .await?;

        tracing::debug!(
            "Assigned tool card {} to game {} as association {}",
            tool_card.id,
            game.id,
            association_id
        );

        Ok(association_id)
    }

    async fn association_id_for(
        &self,
        tool_card_id: i64,
        game_id: i64,
    ) -> Result<Option<i64>, RepositoryError> {
        self.db
            .run(
                "toolcard.association_id_for",
                sqlx::query_scalar(
                    "SELECT gametoolcard FROM gametoolcard WHERE idtoolcard = ? AND idgame = ?",
                )
                .bind(tool_card_id)
                .bind(game_id)
                .fetch_optional(self.db.pool()),
            )
            .await
    }

    async fn recorded_payment(
        &self,
        tool_card: &ToolCard,
        game: &Game,
    ) -> Result<bool, RepositoryError> {
        let Some(association_id) = self.association_id_for(tool_card.id, game.id).await? else {
            tracing::debug!(
                "Tool card {} is not enabled for game {}, reporting unpaid",
                tool_card.id,
                game.id
            );
            return Ok(false);
        };

        let paid: i64 = self
            .db
            .run(
                "toolcard.recorded_payment",
                sqlx::query_scalar(
                    "SELECT EXISTS(SELECT 1 FROM gamefavortoken WHERE gametoolcard = ? AND idgame = ?)",
                )
                .bind(association_id)
                .bind(game.id)
                .fetch_one(self.db.pool()),
            )
            .await?;

        Ok(paid != 0)
    }

    async fn record_payment(
        &self,
        tool_card: &ToolCard,
        game: &Game,
    ) -> Result<bool, RepositoryError> {
        let association_id = self
            .association_id_for(tool_card.id, game.id)
            .await?
            .ok_or_else(|| {
                RepositoryError::NotFound(format!(
                    "tool card {} is not enabled for game {}",
                    tool_card.id, game.id
                ))
            })?;

        let result = self
            .db
            .run(
                "toolcard.record_payment",
                sqlx::query(
                    r#"
                    INSERT INTO gamefavortoken (gametoolcard, idgame)
                    SELECT ?, ?
                    WHERE NOT EXISTS (
                        SELECT 1 FROM gamefavortoken WHERE gametoolcard = ? AND idgame = ?
                    )
                    "#,
                )
                .bind(association_id)
                .bind(game.id)
                .bind(association_id)
                .bind(game.id)
                .execute(self.db.pool()),
            )
            .await?;

        let recorded = result.rows_affected() == 1;
        if recorded {
            tracing::info!(
                "Favor token paid for tool card {} in game {}",
                tool_card.id,
                game.id
            );
        }

        Ok(recorded)
    }
}

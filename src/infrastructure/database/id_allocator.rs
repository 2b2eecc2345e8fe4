//! Identifier allocation for tables keyed by a plain integer.
//!
//! `next_id` reports `max + 1` (or `1` for an empty table) and reserves nothing:
//! two callers may see the same value. Inserts therefore allocate inside the
//! insert statement itself (`INSERT ... SELECT COALESCE(MAX(id), 0) + 1 ...`),
//! which SQLite runs under its single writer lock. Inserting a value obtained
//! from `next_id` can still lose a race, which surfaces as
//! `RepositoryError::ConflictOnAllocate`.

use crate::domain::repositories::RepositoryError;
use crate::infrastructure::database::Database;

/// Tables whose identifiers are allocated as `max + 1`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdTable {
    Game,
    Player,
    GameToolCard,
}

impl IdTable {
    pub const ALL: [IdTable; 3] = [IdTable::Game, IdTable::Player, IdTable::GameToolCard];

    pub fn table(&self) -> &'static str {
        match self {
            IdTable::Game => "game",
            IdTable::Player => "player",
            IdTable::GameToolCard => "gametoolcard",
        }
    }

    pub fn column(&self) -> &'static str {
        match self {
            IdTable::Game => "idgame",
            IdTable::Player => "idplayer",
            IdTable::GameToolCard => "gametoolcard",
        }
    }

    /// `table.column`, as SQLite names it in constraint errors
    pub fn qualified_column(&self) -> String {
        format!("{}.{}", self.table(), self.column())
    }

    pub fn from_qualified_column(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.qualified_column() == s)
    }

    fn max_query(&self) -> &'static str {
        match self {
            IdTable::Game => "SELECT MAX(idgame) FROM game",
            IdTable::Player => "SELECT MAX(idplayer) FROM player",
            IdTable::GameToolCard => "SELECT MAX(gametoolcard) FROM gametoolcard",
        }
    }
}

/// Next unused identifier for `table`
pub async fn next_id(db: &Database, table: IdTable) -> Result<i64, RepositoryError> {
    let max: Option<i64> = db
        .run(
            "id_allocator.next_id",
            sqlx::query_scalar(table.max_query()).fetch_one(db.pool()),
        )
        .await?;

    Ok(max.unwrap_or(0) + 1)
}

mod game_repository;
mod player_repository;
mod tool_card_repository;

pub use game_repository::*;
pub use player_repository::*;
pub use tool_card_repository::*;

/// Error type for repository operations
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("Not found: {0}")]
    NotFound(String),
    #[error("Already exists: {0}")]
    AlreadyExists(String),
    /// Another session took the identifier first; allocate again and retry
    #[error("Identifier conflict on {0}")]
    ConflictOnAllocate(String),
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error("Timed out: {0}")]
    Timeout(String),
    #[error("Store unavailable: {0}")]
    StoreUnavailable(String),
}

impl RepositoryError {
    /// Whether repeating the operation may succeed
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            RepositoryError::ConflictOnAllocate(_) | RepositoryError::Timeout(_)
        )
    }
}

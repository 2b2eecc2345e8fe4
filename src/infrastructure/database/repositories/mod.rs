mod game_repo;
mod player_repo;
mod tool_card_repo;

pub use game_repo::*;
pub use player_repo::*;
pub use tool_card_repo::*;

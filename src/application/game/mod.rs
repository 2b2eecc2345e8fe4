mod get_game_details;
mod pass_turn;
mod setup_game;

pub use get_game_details::*;
pub use pass_turn::*;
pub use setup_game::*;

mod game;
mod invite;
mod player;
mod tool_card;

pub use game::*;
pub use invite::*;
pub use player::*;
pub use tool_card::*;

pub mod game;
pub mod tool_card;

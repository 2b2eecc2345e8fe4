mod assign_tool_card;
mod list_game_tool_cards;
mod pay_for_tool_card;

pub use assign_tool_card::*;
pub use list_game_tool_cards::*;
pub use pay_for_tool_card::*;

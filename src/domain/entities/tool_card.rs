use serde::{Deserialize, Serialize};

/// ToolCard entity - a catalog card a game may enable
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolCard {
    pub id: i64,
    pub name: String,
    pub seqnr: i64,
    pub description: String,
}

impl ToolCard {
    pub fn new(id: i64, name: String, seqnr: i64, description: String) -> Self {
        Self {
            id,
            name,
            seqnr,
            description,
        }
    }
}

/// A tool card as seen from one game, with that game's favor-token payment fact
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameToolCard {
    #[serde(flatten)]
    pub tool_card: ToolCard,
    pub paid_in_this_game: bool,
}

impl GameToolCard {
    pub fn new(tool_card: ToolCard, paid_in_this_game: bool) -> Self {
        Self {
            tool_card,
            paid_in_this_game,
        }
    }
}

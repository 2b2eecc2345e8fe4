use serde::{Deserialize, Serialize};

/// Invite status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InviteStatus {
    /// Not yet answered by the invited account
    Challengee,
    Accepted,
    Refused,
}

impl InviteStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            InviteStatus::Challengee => "challengee",
            InviteStatus::Accepted => "accepted",
            InviteStatus::Refused => "refused",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "challengee" => Some(InviteStatus::Challengee),
            "accepted" => Some(InviteStatus::Accepted),
            "refused" => Some(InviteStatus::Refused),
            _ => None,
        }
    }
}

/// Invite - a request for an account to join a game as a specific player
///
/// The model does not guard against answering twice: `accept` overrides an
/// earlier denial and `deny` overrides an earlier acceptance. Callers that need
/// "already answered" semantics check `is_pending` first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Invite {
    pub invited_account: String,
    pub game_id: i64,
    pub player_id: Option<i64>,
    status: InviteStatus,
}

impl Invite {
    /// Create a pending invite
    pub fn new(invited_account: String, game_id: i64) -> Self {
        Self {
            invited_account,
            game_id,
            player_id: None,
            status: InviteStatus::Challengee,
        }
    }

    /// Attach the player seat the invite is for
    pub fn with_player(mut self, player_id: i64) -> Self {
        self.player_id = Some(player_id);
        self
    }

    pub fn set_player(&mut self, player_id: i64) {
        self.player_id = Some(player_id);
    }

    pub fn accept(&mut self) {
        self.status = InviteStatus::Accepted;
    }

    pub fn deny(&mut self) {
        self.status = InviteStatus::Refused;
    }

    pub fn status(&self) -> InviteStatus {
        self.status
    }

    pub fn is_pending(&self) -> bool {
        self.status == InviteStatus::Challengee
    }

    pub fn is_accepted(&self) -> bool {
        self.status == InviteStatus::Accepted
    }

    pub fn is_denied(&self) -> bool {
        self.status == InviteStatus::Refused
    }
}

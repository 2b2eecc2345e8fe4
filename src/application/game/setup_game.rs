use std::collections::HashSet;
use std::sync::Arc;

use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::domain::entities::{Game, Invite, Player, ToolCard};
use crate::domain::repositories::{GameRepository, RepositoryError, ToolCardRepository};

pub const MIN_PLAYERS: usize = 2;
pub const MAX_PLAYERS: usize = 4;
pub const DEFAULT_TOOL_CARD_COUNT: usize = 3;

/// Setup game input
pub struct SetupGameInput {
    /// Account that starts the game; takes the first seat and the first turn
    pub challenger: String,
    /// Accounts invited to the other seats
    pub challengees: Vec<String>,
    pub tool_card_count: usize,
    /// Fixed seed for a reproducible tool card draw
    pub seed: Option<u64>,
}

/// Setup game output
#[derive(Debug)]
pub struct SetupGameOutput {
    pub game: Game,
    /// Challenger first, then one player per challengee in input order
    pub players: Vec<Player>,
    pub tool_cards: Vec<ToolCard>,
    /// Pending invites, one per challengee
    pub invites: Vec<Invite>,
}

/// Setup game use case
///
/// The game, its players, the first turn and the drawn tool cards are stored
/// together or not at all.
pub struct SetupGame<G: GameRepository, T: ToolCardRepository> {
    game_repo: Arc<G>,
    tool_card_repo: Arc<T>,
}

impl<G: GameRepository, T: ToolCardRepository> SetupGame<G, T> {
    pub fn new(game_repo: Arc<G>, tool_card_repo: Arc<T>) -> Self {
        Self {
            game_repo,
            tool_card_repo,
        }
    }

    pub async fn execute(&self, input: SetupGameInput) -> Result<SetupGameOutput, SetupGameError> {
        let accounts = validate_accounts(&input.challenger, &input.challengees)?;

        if input.tool_card_count == 0 {
            return Err(SetupGameError::Validation(
                "At least one tool card is required".into(),
            ));
        }

        let catalog = self.tool_card_repo.all().await?;
        if catalog.len() < input.tool_card_count {
            return Err(SetupGameError::Validation(format!(
                "Requested {} tool cards but the catalog has {}",
                input.tool_card_count,
                catalog.len()
            )));
        }

        let tool_cards = draw_tool_cards(&catalog, input.tool_card_count, input.seed);

        let (game, players) = self
            .game_repo
            .create_with_setup(accounts.len(), &tool_cards)
            .await?;

        // Seats follow account order: the challenger first, then each challengee
        let invites = accounts
            .iter()
            .zip(&players)
            .skip(1)
            .map(|(account, player)| {
                Invite::new(account.to_string(), game.id).with_player(player.id)
            })
            .collect();

        tracing::info!(
            "Game {} set up by {} with {} players and tool cards {:?}",
            game.id,
            input.challenger,
            players.len(),
            tool_cards.iter().map(|t| t.id).collect::<Vec<_>>()
        );

        Ok(SetupGameOutput {
            game,
            players,
            tool_cards,
            invites,
        })
    }
}

fn validate_accounts<'a>(
    challenger: &'a str,
    challengees: &'a [String],
) -> Result<Vec<&'a str>, SetupGameError> {
    let accounts: Vec<&str> = std::iter::once(challenger)
        .chain(challengees.iter().map(String::as_str))
        .map(str::trim)
        .collect();

    if accounts.iter().any(|a| a.is_empty()) {
        return Err(SetupGameError::Validation("Account names are required".into()));
    }

    if accounts.len() < MIN_PLAYERS || accounts.len() > MAX_PLAYERS {
        return Err(SetupGameError::Validation(format!(
            "A game needs {} to {} players, got {}",
            MIN_PLAYERS,
            MAX_PLAYERS,
            accounts.len()
        )));
    }

    let mut seen = HashSet::new();
    if let Some(duplicate) = accounts.iter().find(|a| !seen.insert(**a)) {
        return Err(SetupGameError::Validation(format!(
            "Account {} is invited twice",
            duplicate
        )));
    }

    Ok(accounts)
}

/// Draw `count` distinct cards, returned in catalog order
fn draw_tool_cards(catalog: &[ToolCard], count: usize, seed: Option<u64>) -> Vec<ToolCard> {
    let mut rng = match seed {
        Some(s) => ChaCha8Rng::seed_from_u64(s),
        None => ChaCha8Rng::from_entropy(),
    };

    let mut drawn: Vec<ToolCard> = catalog.choose_multiple(&mut rng, count).cloned().collect();
    drawn.sort_by_key(|t| t.seqnr);
    drawn
}

#[derive(Debug, thiserror::Error)]
pub enum SetupGameError {
    #[error("Validation error: {0}")]
    Validation(String),
    #[error("Repository error: {0}")]
    Repository(#[from] RepositoryError),
}

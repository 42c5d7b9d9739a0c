//! Player trait and implementations.

mod heuristic_ai;
mod human;

pub use heuristic_ai::HeuristicAi;
pub use human::{HumanInput, HumanPlayer};

use crate::config::GameConfig;
use anyhow::Result;
use strictly_sos::{MatchState, Move, PlayerId};
use tokio::sync::mpsc;

/// Trait for anything that can occupy a seat.
#[async_trait::async_trait]
pub trait Player: Send {
    /// Gets the next move for the seat holding the turn.
    async fn get_move(&mut self, state: &MatchState) -> Result<Move>;

    /// Returns the player's display name.
    fn name(&self) -> &str;

    /// True for computer-controlled seats.
    fn is_ai(&self) -> bool {
        false
    }
}

/// Players for both seats plus input channels for the human ones.
pub struct Seating {
    /// Seat one.
    pub one: Box<dyn Player>,
    /// Seat two.
    pub two: Box<dyn Player>,
    /// Input for seat one, when human.
    pub one_input: Option<mpsc::UnboundedSender<HumanInput>>,
    /// Input for seat two, when human.
    pub two_input: Option<mpsc::UnboundedSender<HumanInput>>,
}

impl Seating {
    /// Builds players according to the configured mode.
    pub fn from_config(config: &GameConfig) -> Self {
        let mode = config.mode();
        let (one, one_input) = seat(config, PlayerId::One, mode.is_ai(PlayerId::One));
        let (two, two_input) = seat(config, PlayerId::Two, mode.is_ai(PlayerId::Two));
        Self {
            one,
            two,
            one_input,
            two_input,
        }
    }
}

fn seat(
    config: &GameConfig,
    player: PlayerId,
    ai: bool,
) -> (Box<dyn Player>, Option<mpsc::UnboundedSender<HumanInput>>) {
    let name = config.name_for(player);
    if ai {
        let seed = config.seed().map(|s| s.wrapping_add(player.number() as u64));
        (Box::new(HeuristicAi::new(name, config.ai_delay(), seed)), None)
    } else {
        let (tx, rx) = mpsc::unbounded_channel();
        (Box::new(HumanPlayer::new(name, rx)), Some(tx))
    }
}

//! Human player fed by the terminal UI.

use super::Player;
use anyhow::Result;
use strictly_sos::{MatchState, Move};
use tokio::sync::mpsc;
use tracing::debug;

/// A move tagged with the board it was chosen on.
///
/// The stamp is the number of empty cells the player saw. Every committed
/// placement lowers it, so input queued before the board changed no longer
/// matches and is dropped instead of being played on a later turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HumanInput {
    /// Empty cells on the board the move was chosen from.
    pub remaining_cells: usize,
    /// The move.
    pub mv: Move,
}

impl HumanInput {
    /// Stamps `mv` with the board in `state`.
    pub fn for_state(state: &MatchState, mv: Move) -> Self {
        Self {
            remaining_cells: state.remaining_cells(),
            mv,
        }
    }
}

/// Human player. The UI validates cursor and letter, then sends the move.
pub struct HumanPlayer {
    name: String,
    input_rx: mpsc::UnboundedReceiver<HumanInput>,
}

impl HumanPlayer {
    /// Creates a new human player.
    pub fn new(name: impl Into<String>, input_rx: mpsc::UnboundedReceiver<HumanInput>) -> Self {
        Self {
            name: name.into(),
            input_rx,
        }
    }
}

#[async_trait::async_trait]
impl Player for HumanPlayer {
    async fn get_move(&mut self, state: &MatchState) -> Result<Move> {
        loop {
            match self.input_rx.recv().await {
                Some(input) if input.remaining_cells == state.remaining_cells() => {
                    debug!(player = %self.name, mv = %input.mv, "Human move received");
                    return Ok(input.mv);
                }
                Some(input) => {
                    debug!(
                        player = %self.name,
                        mv = %input.mv,
                        stamp = input.remaining_cells,
                        "Discarding input chosen on an earlier board"
                    );
                }
                None => anyhow::bail!("Input channel closed"),
            }
        }
    }

    fn name(&self) -> &str {
        &self.name
    }
}

//! Game orchestration between players.

use crate::players::{Player, Seating};
use anyhow::Result;
use strictly_sos::{MatchResult, MatchState, Move, PlayerId};
use tokio::sync::mpsc;
use tracing::{debug, info, instrument, warn};

/// Messages sent from orchestrator to UI.
#[derive(Debug, Clone)]
pub enum GameEvent {
    /// Fresh snapshot of the match.
    StateChanged(MatchState),
    /// The AI seat is deciding.
    AiThinking {
        /// AI display name.
        name: String,
    },
    /// A move was committed.
    MoveMade {
        /// Seat that moved.
        player: PlayerId,
        /// Display name of that seat.
        name: String,
        /// The move.
        mv: Move,
        /// Sequences completed by it.
        points: u32,
    },
    /// A submitted move was refused; the same seat moves again.
    MoveRejected {
        /// Display name of the seat.
        name: String,
        /// Why it was refused.
        reason: String,
    },
    /// Board full.
    GameOver {
        /// Final result.
        result: MatchResult,
        /// Winner's display name, `None` on a draw.
        winner: Option<String>,
    },
}

/// Drives a match: asks the seat holding the turn for a move and commits it.
pub struct Orchestrator {
    state: MatchState,
    player_one: Box<dyn Player>,
    player_two: Box<dyn Player>,
    event_tx: mpsc::UnboundedSender<GameEvent>,
}

impl Orchestrator {
    /// Creates a new orchestrator over a fresh or in-progress match.
    pub fn new(
        state: MatchState,
        seating: Seating,
        event_tx: mpsc::UnboundedSender<GameEvent>,
    ) -> Self {
        Self {
            state,
            player_one: seating.one,
            player_two: seating.two,
            event_tx,
        }
    }

    /// Current match state.
    pub fn state(&self) -> &MatchState {
        &self.state
    }

    fn name(&self, player: PlayerId) -> String {
        match player {
            PlayerId::One => self.player_one.name().to_string(),
            PlayerId::Two => self.player_two.name().to_string(),
        }
    }

    /// Runs the match to completion and returns the final state.
    #[instrument(skip(self), fields(size = self.state.grid().size()))]
    pub async fn run(&mut self) -> Result<MatchState> {
        info!("Starting game orchestration");
        self.event_tx.send(GameEvent::StateChanged(self.state.clone()))?;

        loop {
            if let Some(result) = self.state.match_result() {
                let winner = match result {
                    MatchResult::Winner(player) => Some(self.name(player)),
                    MatchResult::Draw => None,
                };
                info!(%result, "Match finished");
                self.event_tx.send(GameEvent::GameOver { result, winner })?;
                return Ok(self.state.clone());
            }

            let seat = self.state.current_player();
            let name = self.name(seat);
            let player = match seat {
                PlayerId::One => &mut self.player_one,
                PlayerId::Two => &mut self.player_two,
            };

            if player.is_ai() {
                self.event_tx.send(GameEvent::AiThinking { name: name.clone() })?;
            }

            debug!(player = %name, "Waiting for move");
            let mv = player.get_move(&self.state).await?;

            match self.state.submit_move(seat, mv) {
                Ok(placement) => {
                    self.event_tx.send(GameEvent::MoveMade {
                        player: seat,
                        name,
                        mv,
                        points: placement.points(),
                    })?;
                    self.event_tx
                        .send(GameEvent::StateChanged(self.state.clone()))?;
                }
                Err(e) => {
                    warn!(player = %name, error = %e, "Move rejected");
                    self.event_tx.send(GameEvent::MoveRejected {
                        name,
                        reason: e.to_string(),
                    })?;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use crate::players::HumanInput;
    use strictly_sos::{Letter, Mode};

    fn stamped(remaining_cells: usize, row: usize, col: usize, letter: Letter) -> HumanInput {
        HumanInput {
            remaining_cells,
            mv: Move::at(row, col, letter),
        }
    }

    fn made_moves(event_rx: &mut mpsc::UnboundedReceiver<GameEvent>) -> Vec<(PlayerId, Move)> {
        let mut moves = Vec::new();
        while let Ok(event) = event_rx.try_recv() {
            if let GameEvent::MoveMade { player, mv, .. } = event {
                moves.push((player, mv));
            }
        }
        moves
    }

    #[tokio::test]
    async fn test_rejected_move_asks_same_seat_again() {
        let config = GameConfig::default().with_vs_ai(false).with_board_size(3);
        let seating = Seating::from_config(&config);
        let one = seating.one_input.clone().unwrap();
        let two = seating.two_input.clone().unwrap();

        let (event_tx, mut event_rx) = mpsc::unbounded_channel();
        let mut orchestrator =
            Orchestrator::new(MatchState::new(3, Mode::HumanVsHuman), seating, event_tx);

        one.send(stamped(9, 1, 1, Letter::O)).unwrap();
        // Seat two first tries the occupied centre.
        two.send(stamped(8, 1, 1, Letter::S)).unwrap();
        two.send(stamped(8, 0, 0, Letter::O)).unwrap();
        let rest = [(0, 1), (0, 2), (1, 0), (1, 2), (2, 0), (2, 1), (2, 2)];
        for (i, (r, c)) in rest.into_iter().enumerate() {
            let input = stamped(7 - i, r, c, Letter::O);
            if i % 2 == 0 {
                one.send(input).unwrap();
            } else {
                two.send(input).unwrap();
            }
        }

        let final_state = orchestrator.run().await.unwrap();
        assert!(final_state.is_over());
        assert_eq!(final_state.match_result(), Some(MatchResult::Draw));

        let mut rejected = 0;
        while let Ok(event) = event_rx.try_recv() {
            if matches!(event, GameEvent::MoveRejected { .. }) {
                rejected += 1;
            }
        }
        assert_eq!(rejected, 1);
    }

    #[tokio::test]
    async fn test_extra_press_not_played_on_later_turn() {
        let config = GameConfig::default()
            .with_board_size(3)
            .with_ai_delay_ms(0)
            .with_seed(4);
        let seating = Seating::from_config(&config);
        let one = seating.one_input.clone().unwrap();

        // Two presses on the opening board; only the first belongs to this turn.
        one.send(stamped(9, 0, 0, Letter::S)).unwrap();
        one.send(stamped(9, 2, 2, Letter::O)).unwrap();
        drop(one);

        let (event_tx, mut event_rx) = mpsc::unbounded_channel();
        let mut orchestrator =
            Orchestrator::new(MatchState::new(3, Mode::HumanVsAi), seating, event_tx);

        // The human's second turn finds only stale input, then a closed channel.
        assert!(orchestrator.run().await.is_err());

        let moves = made_moves(&mut event_rx);
        assert_eq!(moves.len(), 2);
        assert_eq!(moves[0], (PlayerId::One, Move::at(0, 0, Letter::S)));
        assert_eq!(moves[1].0, PlayerId::Two);
        assert_eq!(orchestrator.state().remaining_cells(), 7);
        assert_eq!(orchestrator.state().current_player(), PlayerId::One);
    }
}

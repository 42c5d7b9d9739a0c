//! Score tally invariant: every point is backed by a scored line.

use super::Invariant;
use crate::game::MatchState;
use crate::types::PlayerId;

/// Invariant: each seat's score equals the number of lines it scored.
pub struct ScoreTallyInvariant;

impl Invariant<MatchState> for ScoreTallyInvariant {
    fn holds(state: &MatchState) -> bool {
        [PlayerId::One, PlayerId::Two].into_iter().all(|player| {
            let lines = state
                .scored_lines()
                .iter()
                .filter(|line| line.player == player)
                .count();
            state.scores().get(player) as usize == lines
        })
    }

    fn description() -> &'static str {
        "Scores equal the number of lines each player completed"
    }
}

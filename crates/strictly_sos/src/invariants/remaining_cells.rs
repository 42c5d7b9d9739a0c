//! Remaining-cell invariant: the counter tracks the board.

use super::Invariant;
use crate::game::MatchState;

/// Invariant: `remaining_cells` equals the number of empty cells, and the
/// match is over exactly when it reaches zero.
pub struct RemainingCellsInvariant;

impl Invariant<MatchState> for RemainingCellsInvariant {
    fn holds(state: &MatchState) -> bool {
        let empty = state.grid().count_empty();
        state.remaining_cells() == empty && state.is_over() == (empty == 0)
    }

    fn description() -> &'static str {
        "Remaining cells match the board and end the match at zero"
    }
}

//! Scored lines invariant: recorded sequences stay on the board.

use super::Invariant;
use crate::game::MatchState;
use crate::types::{Cell, Letter};

/// Invariant: every recorded line still spells S-O-S.
///
/// Cells never return to empty or change letter, so a line that scored once
/// must remain readable for the rest of the match.
pub struct ScoredLinesInvariant;

impl Invariant<MatchState> for ScoredLinesInvariant {
    fn holds(state: &MatchState) -> bool {
        let expected = [Letter::S, Letter::O, Letter::S];
        state.scored_lines().iter().all(|line| {
            line.sequence
                .coords()
                .iter()
                .zip(expected)
                .all(|(coord, letter)| state.grid().get(*coord) == Some(Cell::Filled(letter)))
        })
    }

    fn description() -> &'static str {
        "Scored lines still spell S-O-S on the board"
    }
}

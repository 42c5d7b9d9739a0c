//! Heuristic opponent.
//!
//! The policy never touches the live match. It clones the grid once and
//! probes candidates on that scratch copy: write, scan, restore. Randomness
//! comes from the caller so tests can seed it.
//!
//! Decision cascade, each tier short-circuiting the next:
//!
//! 1. **Score now**: the move completing the most sequences.
//! 2. **Deny**: occupy a cell the opponent could score on, with the letter
//!    that would have scored there.
//! 3. **Build**: the move with the best threat value, biased toward the
//!    centre, with a little jitter.

use crate::action::Move;
use crate::game::MatchState;
use crate::rules::{DIRECTIONS, scan};
use crate::types::{Cell, Coord, Grid, Letter};
use rand::Rng;
use rand::seq::SliceRandom;
use strum::IntoEnumIterator;
use tracing::{debug, instrument};

/// Upper bound (exclusive) of the tie-breaking jitter added in tier three.
pub const JITTER: f64 = 0.05;

/// Weight of the centrality bonus in tier three.
pub const CENTRE_WEIGHT: f64 = 0.1;

/// Which tier of the cascade produced a move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
pub enum Tier {
    /// Completes at least one sequence.
    #[display("score")]
    Score,
    /// Takes a cell the opponent could score on.
    #[display("deny")]
    Deny,
    /// Best positional value.
    #[display("build")]
    Build,
    /// No candidate had a value; random empty cell.
    #[display("fallback")]
    Fallback,
}

/// Counts the sequences `letter` at `coord` would complete, leaving `grid`
/// exactly as it was.
pub fn simulate(grid: &mut Grid, coord: Coord, letter: Letter) -> usize {
    let Some(previous) = grid.get(coord) else {
        return 0;
    };
    grid.set(coord, Cell::Filled(letter));
    let count = scan(grid, coord).len();
    grid.set(coord, previous);
    count
}

/// Every empty-cell move with the number of sequences it would complete.
fn scoring_moves(scratch: &mut Grid) -> Vec<(Move, usize)> {
    let mut found = Vec::new();
    for coord in scratch.empty_cells() {
        for letter in Letter::iter() {
            let count = simulate(scratch, coord, letter);
            if count > 0 {
                found.push((Move::new(coord, letter), count));
            }
        }
    }
    found
}

/// Positional value of writing `letter` at `coord`, before centrality and
/// jitter.
///
/// An `O` wants open flanks (+2) or one `S` with an open partner (+1). An `S`
/// looks forward only: two open cells (+1) or `O` then open (+2). Lines that
/// run off the board contribute nothing.
pub fn threat_value(grid: &Grid, coord: Coord, letter: Letter) -> f64 {
    let at = |dir: (isize, isize), distance: isize| {
        coord.offset(dir, distance).and_then(|c| grid.get(c))
    };

    let mut value = 0.0;
    for dir in DIRECTIONS {
        match letter {
            Letter::O => {
                if let (Some(a), Some(b)) = (at(dir, -1), at(dir, 1)) {
                    match (a, b) {
                        (Cell::Empty, Cell::Empty) => value += 2.0,
                        (Cell::Filled(Letter::S), Cell::Empty)
                        | (Cell::Empty, Cell::Filled(Letter::S)) => value += 1.0,
                        _ => {}
                    }
                }
            }
            Letter::S => {
                if let (Some(mid), Some(end)) = (at(dir, 1), at(dir, 2)) {
                    match (mid, end) {
                        (Cell::Empty, Cell::Empty) => value += 1.0,
                        (Cell::Filled(Letter::O), Cell::Empty) => value += 2.0,
                        _ => {}
                    }
                }
            }
        }
    }
    value
}

/// Bonus for cells near the middle of the board.
pub fn centrality(size: usize, coord: Coord) -> f64 {
    let centre = (size as f64 - 1.0) / 2.0;
    let dx = coord.col as f64 - centre;
    let dy = coord.row as f64 - centre;
    CENTRE_WEIGHT * (size as f64 - (dx * dx + dy * dy).sqrt())
}

/// Picks a move for the seat holding the turn.
///
/// Returns `None` only when the board has no empty cell.
#[instrument(skip(state, rng), fields(remaining = state.remaining_cells()))]
pub fn choose_move<R: Rng>(state: &MatchState, rng: &mut R) -> Option<Move> {
    choose_move_with_tier(state, rng).map(|(mv, _)| mv)
}

/// Like [`choose_move`], also reporting which tier decided.
#[instrument(skip(state, rng))]
pub fn choose_move_with_tier<R: Rng>(
    state: &MatchState,
    rng: &mut R,
) -> Option<(Move, Tier)> {
    let mut scratch = state.grid().clone();
    let empty = scratch.empty_cells();
    if empty.is_empty() {
        return None;
    }

    // Tier 1: best immediate score.
    let scoring = scoring_moves(&mut scratch);
    if let Some(best) = scoring.iter().map(|(_, n)| *n).max() {
        let top: Vec<Move> = scoring
            .iter()
            .filter(|(_, n)| *n == best)
            .map(|(mv, _)| *mv)
            .collect();
        if let Some(mv) = top.choose(rng) {
            debug!(%mv, sequences = best, "Taking scoring move");
            return Some((*mv, Tier::Score));
        }
    }

    // Tier 2: deny the opponent's scoring squares. The board is shared, so
    // this is the same candidate set tier 1 examined.
    let threats: Vec<Move> = scoring_moves(&mut scratch)
        .into_iter()
        .map(|(mv, _)| mv)
        .collect();
    if let Some(mv) = threats.choose(rng) {
        debug!(%mv, "Denying opponent threat");
        return Some((*mv, Tier::Deny));
    }

    // Tier 3: build toward future sequences.
    let size = scratch.size();
    let mut best: Option<(Move, f64)> = None;
    for &coord in &empty {
        for letter in Letter::iter() {
            let value = threat_value(&scratch, coord, letter)
                + centrality(size, coord)
                + rng.gen_range(0.0..JITTER);
            if best.is_none_or(|(_, v)| value > v) {
                best = Some((Move::new(coord, letter), value));
            }
        }
    }
    if let Some((mv, value)) = best {
        debug!(%mv, value, "Building threat");
        return Some((mv, Tier::Build));
    }

    let coord = *empty.choose(rng)?;
    debug!(%coord, "Falling back to random cell");
    Some((Move::new(coord, Letter::S), Tier::Fallback))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Mode, PlayerId};
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_simulate_restores_grid() {
        let mut state = MatchState::new(3, Mode::HumanVsAi);
        state.place_at(0, 0, Letter::S, PlayerId::One).unwrap();
        state.place_at(0, 2, Letter::S, PlayerId::One).unwrap();
        let mut scratch = state.grid().clone();

        assert_eq!(simulate(&mut scratch, Coord::new(0, 1), Letter::O), 1);
        assert_eq!(simulate(&mut scratch, Coord::new(0, 1), Letter::S), 0);
        assert_eq!(&scratch, state.grid());
    }

    #[test]
    fn test_threat_value_o_open_flanks() {
        let grid = Grid::new(3);
        // Centre of an empty 3x3: all four lines have open flanks.
        assert_eq!(threat_value(&grid, Coord::new(1, 1), Letter::O), 8.0);
        // Corner O has no in-bounds flanks.
        assert_eq!(threat_value(&grid, Coord::new(0, 0), Letter::O), 0.0);
    }

    #[test]
    fn test_threat_value_s_forward_only() {
        let mut grid = Grid::new(3);
        // Top-left S looks right, down and down-right.
        assert_eq!(threat_value(&grid, Coord::new(0, 0), Letter::S), 3.0);
        grid.set(Coord::new(0, 1), Cell::Filled(Letter::O));
        assert_eq!(threat_value(&grid, Coord::new(0, 0), Letter::S), 4.0);
        // Bottom-right S has nothing ahead of it.
        assert_eq!(threat_value(&grid, Coord::new(2, 2), Letter::S), 0.0);
    }

    #[test]
    fn test_threat_value_o_one_s_flank() {
        let mut grid = Grid::new(3);
        grid.set(Coord::new(1, 0), Cell::Filled(Letter::S));
        // Row: S + empty (+1); column, both diagonals open (+2 each).
        assert_eq!(threat_value(&grid, Coord::new(1, 1), Letter::O), 7.0);
    }

    #[test]
    fn test_centrality_peaks_in_middle() {
        assert!((centrality(7, Coord::new(3, 3)) - 0.7).abs() < 1e-9);
        assert!(centrality(7, Coord::new(3, 3)) > centrality(7, Coord::new(0, 0)));
    }

    #[test]
    fn test_opening_move_is_centre_o() {
        let state = MatchState::new(7, Mode::HumanVsAi);
        let mut rng = StdRng::seed_from_u64(1);
        let (mv, tier) = choose_move_with_tier(&state, &mut rng).unwrap();
        assert_eq!(tier, Tier::Build);
        assert_eq!(mv, Move::at(3, 3, Letter::O));
    }

    #[test]
    fn test_prefers_double_score() {
        let mut state = MatchState::new(5, Mode::HumanVsAi);
        // (2,2) as O completes both the row and the column.
        for (r, c) in [(2, 1), (2, 3), (1, 2), (3, 2)] {
            state.place_at(r, c, Letter::S, PlayerId::One).unwrap();
        }
        // Single-score decoy: S at (4,2).
        state.place_at(4, 0, Letter::S, PlayerId::One).unwrap();
        state.place_at(4, 1, Letter::O, PlayerId::One).unwrap();

        let mut rng = StdRng::seed_from_u64(7);
        let (mv, tier) = choose_move_with_tier(&state, &mut rng).unwrap();
        assert_eq!(tier, Tier::Score);
        assert_eq!(mv, Move::at(2, 2, Letter::O));
    }

    #[test]
    fn test_full_board_has_no_move() {
        let mut state = MatchState::new(3, Mode::HumanVsAi);
        for coord in state.grid().coords().collect::<Vec<_>>() {
            state.place(coord, Letter::O, PlayerId::One).unwrap();
        }
        let mut rng = StdRng::seed_from_u64(0);
        assert_eq!(choose_move(&state, &mut rng), None);
    }

    #[test]
    fn test_does_not_mutate_state() {
        let mut state = MatchState::new(4, Mode::HumanVsAi);
        state.place_at(0, 0, Letter::S, PlayerId::One).unwrap();
        state.place_at(0, 1, Letter::O, PlayerId::One).unwrap();
        let before = state.clone();
        let mut rng = StdRng::seed_from_u64(3);
        let _ = choose_move(&state, &mut rng);
        assert_eq!(state, before);
    }
}

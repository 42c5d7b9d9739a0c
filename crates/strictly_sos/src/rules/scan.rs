//! Sequence detection around a freshly placed letter.

use crate::types::{Cell, Coord, Grid, Letter, Sequence};
use tracing::{instrument, trace};

/// The four undirected lines through a cell: row, column, both diagonals.
pub const DIRECTIONS: [(isize, isize); 4] = [(0, 1), (1, 0), (1, 1), (1, -1)];

/// Cell `distance` steps from `origin` along `dir`, if it is on the board.
fn neighbour(
    grid: &Grid,
    origin: Coord,
    dir: (isize, isize),
    distance: isize,
) -> Option<(Coord, Cell)> {
    let coord = origin.offset(dir, distance)?;
    grid.get(coord).map(|cell| (coord, cell))
}

/// Finds every S-O-S sequence that includes `at`.
///
/// An `O` is checked as the middle of each line; an `S` is checked as both
/// the start (looking forward) and the end (looking backward). Directions are
/// independent, so one placement can complete several sequences. Empty or
/// out-of-bounds cells yield nothing.
#[instrument(skip(grid), fields(size = grid.size()))]
pub fn scan(grid: &Grid, at: Coord) -> Vec<Sequence> {
    let mut found = Vec::new();

    let Some(Cell::Filled(letter)) = grid.get(at) else {
        return found;
    };

    for dir in DIRECTIONS {
        match letter {
            Letter::O => {
                if let (Some((before, b)), Some((after, a))) =
                    (neighbour(grid, at, dir, -1), neighbour(grid, at, dir, 1))
                    && b.holds(Letter::S)
                    && a.holds(Letter::S)
                {
                    found.push(Sequence::new(before, at, after));
                }
            }
            Letter::S => {
                if let (Some((mid, m)), Some((end, e))) =
                    (neighbour(grid, at, dir, 1), neighbour(grid, at, dir, 2))
                    && m.holds(Letter::O)
                    && e.holds(Letter::S)
                {
                    found.push(Sequence::new(at, mid, end));
                }
                if let (Some((mid, m)), Some((start, s))) =
                    (neighbour(grid, at, dir, -1), neighbour(grid, at, dir, -2))
                    && m.holds(Letter::O)
                    && s.holds(Letter::S)
                {
                    found.push(Sequence::new(start, mid, at));
                }
            }
        }
    }

    trace!(count = found.len(), "Scan complete");
    found
}

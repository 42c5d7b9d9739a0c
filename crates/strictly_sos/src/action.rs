//! First-class action types for SOS.
//!
//! A move is the player's intent: where to write and which letter. It can be
//! validated independently of execution, and the AI produces the same type a
//! human front end does.

use crate::types::{Coord, Letter, PlayerId};
use serde::{Deserialize, Serialize};

/// Placement of a letter on a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_new::new)]
pub struct Move {
    /// Target cell.
    pub coord: Coord,
    /// Letter to write.
    pub letter: Letter,
}

impl Move {
    /// Convenience constructor from raw row and column.
    pub fn at(row: usize, col: usize, letter: Letter) -> Self {
        Self::new(Coord::new(row, col), letter)
    }
}

impl std::fmt::Display for Move {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} at {}", self.letter, self.coord)
    }
}

/// Why a placement was rejected. Rejections never mutate the match.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum MoveError {
    /// The coordinate is off the board.
    #[display("{_0} is off the board")]
    OutOfBounds(Coord),

    /// The cell already holds a letter.
    #[display("Cell {_0} is already occupied")]
    CellOccupied(Coord),

    /// The board is full.
    #[display("Match is already over")]
    MatchOver,

    /// Another seat holds the turn.
    #[display("It's not {_0}'s turn")]
    NotYourTurn(PlayerId),

    /// A postcondition failed after a placement.
    #[display("Invariant violation: {_0}")]
    InvariantViolation(String),
}

impl std::error::Error for MoveError {}

//! Preconditions for placements.
//!
//! Each check is a small named rule so rejection reasons stay explicit and
//! testable on their own. [`LegalPlacement`] composes the board-level rules
//! used by `place`; [`LegalSubmission`] adds turn ownership for `submit_move`.

use crate::action::{Move, MoveError};
use crate::game::MatchState;
use crate::types::{Coord, PlayerId};
use tracing::instrument;

/// Precondition: the match has not ended.
pub struct MatchInProgress;

impl MatchInProgress {
    /// Rejects with `MatchOver` once the board is full.
    #[instrument(skip(state))]
    pub fn check(state: &MatchState) -> Result<(), MoveError> {
        if state.is_over() {
            Err(MoveError::MatchOver)
        } else {
            Ok(())
        }
    }
}

/// Precondition: the target lies on the board.
pub struct CellInBounds;

impl CellInBounds {
    /// Rejects coordinates off the board.
    #[instrument(skip(state))]
    pub fn check(coord: Coord, state: &MatchState) -> Result<(), MoveError> {
        if state.grid().in_bounds(coord) {
            Ok(())
        } else {
            Err(MoveError::OutOfBounds(coord))
        }
    }
}

/// Precondition: the target cell is empty.
pub struct CellIsEmpty;

impl CellIsEmpty {
    /// Rejects cells that already hold a letter.
    #[instrument(skip(state))]
    pub fn check(coord: Coord, state: &MatchState) -> Result<(), MoveError> {
        if state.grid().is_empty(coord) {
            Ok(())
        } else {
            Err(MoveError::CellOccupied(coord))
        }
    }
}

/// Precondition: `player` holds the turn.
pub struct PlayersTurn;

impl PlayersTurn {
    /// Rejects submissions from the seat not holding the turn.
    #[instrument(skip(state))]
    pub fn check(player: PlayerId, state: &MatchState) -> Result<(), MoveError> {
        if state.current_player() == player {
            Ok(())
        } else {
            Err(MoveError::NotYourTurn(player))
        }
    }
}

/// Board-level legality: match running, cell on the board and empty.
pub struct LegalPlacement;

impl LegalPlacement {
    /// Runs the board-level checks in order, stopping at the first failure.
    #[instrument(skip(state))]
    pub fn check(coord: Coord, state: &MatchState) -> Result<(), MoveError> {
        MatchInProgress::check(state)?;
        CellInBounds::check(coord, state)?;
        CellIsEmpty::check(coord, state)?;
        Ok(())
    }
}

/// Full legality of a submitted move, including turn ownership.
pub struct LegalSubmission;

impl LegalSubmission {
    /// Board-level checks plus turn ownership.
    #[instrument(skip(state))]
    pub fn check(player: PlayerId, mv: &Move, state: &MatchState) -> Result<(), MoveError> {
        MatchInProgress::check(state)?;
        PlayersTurn::check(player, state)?;
        LegalPlacement::check(mv.coord, state)
    }
}

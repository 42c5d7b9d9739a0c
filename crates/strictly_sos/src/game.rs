//! Match state and the move resolver.
//!
//! [`MatchState`] is the single source of truth for a match. It is owned by
//! whoever drives the game loop and mutated only through [`MatchState::place`]
//! and the turn operations built on it.

use crate::action::{Move, MoveError};
use crate::contracts::{LegalPlacement, LegalSubmission};
use crate::invariants::{InvariantSet, SosInvariants};
use crate::rules::{self, MatchResult};
use crate::types::{Cell, Coord, Grid, Letter, Mode, PlayerId, Scores, Sequence};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};

/// A sequence credited to the player who completed it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoredLine {
    /// The S-O-S cells.
    pub sequence: Sequence,
    /// Who scored it.
    pub player: PlayerId,
}

/// Outcome of a successful placement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Placement {
    /// True iff at least one sequence was completed.
    scored: bool,
    /// Every sequence the placement completed.
    sequences: Vec<Sequence>,
}

impl Placement {
    /// True iff at least one sequence was completed.
    pub fn scored(&self) -> bool {
        self.scored
    }

    /// Sequences completed by the placement.
    pub fn sequences(&self) -> &[Sequence] {
        &self.sequences
    }

    /// Points earned by the placement, one per sequence.
    pub fn points(&self) -> u32 {
        self.sequences.len() as u32
    }
}

/// Complete state of one match.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchState {
    pub(crate) grid: Grid,
    pub(crate) scores: Scores,
    pub(crate) current_player: PlayerId,
    pub(crate) pending_letter: Letter,
    pub(crate) remaining_cells: usize,
    pub(crate) is_over: bool,
    pub(crate) mode: Mode,
    pub(crate) scored_lines: Vec<ScoredLine>,
}

impl MatchState {
    /// Starts a fresh match: empty grid, zero scores, player one to move.
    #[instrument]
    pub fn new(size: usize, mode: Mode) -> Self {
        info!(size, %mode, "Starting new match");
        Self {
            grid: Grid::new(size),
            scores: Scores::default(),
            current_player: PlayerId::One,
            pending_letter: Letter::S,
            remaining_cells: size * size,
            is_over: size == 0,
            mode,
            scored_lines: Vec::new(),
        }
    }

    /// Discards this match and starts another with the same size and mode.
    #[instrument(skip(self))]
    pub fn restart(&self) -> Self {
        Self::new(self.grid.size(), self.mode)
    }

    /// The board.
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Point totals.
    pub fn scores(&self) -> &Scores {
        &self.scores
    }

    /// Seat holding the turn.
    pub fn current_player(&self) -> PlayerId {
        self.current_player
    }

    /// Letter pre-selected for the next placement.
    pub fn pending_letter(&self) -> Letter {
        self.pending_letter
    }

    /// Empty cells left.
    pub fn remaining_cells(&self) -> usize {
        self.remaining_cells
    }

    /// True once the board is full.
    pub fn is_over(&self) -> bool {
        self.is_over
    }

    /// Who controls seat two.
    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Lines scored so far, oldest first.
    pub fn scored_lines(&self) -> &[ScoredLine] {
        &self.scored_lines
    }

    /// True when the seat holding the turn is driven by the AI.
    pub fn is_ai_turn(&self) -> bool {
        !self.is_over && self.mode.is_ai(self.current_player)
    }

    /// True when `(row, col)` may receive a letter right now.
    #[instrument(skip(self))]
    pub fn is_valid_placement(&self, row: usize, col: usize) -> bool {
        LegalPlacement::check(Coord::new(row, col), self).is_ok()
    }

    /// Sets the letter for the current player's next placement.
    #[instrument(skip(self))]
    pub fn select_letter(&mut self, letter: Letter) {
        self.pending_letter = letter;
    }

    /// Writes `letter` at `coord` for `player` and scores the result.
    ///
    /// Rejected placements (off the board, occupied, match over) leave the
    /// state untouched. Turn order is not checked here; see
    /// [`MatchState::submit_move`].
    #[instrument(skip(self), fields(remaining = self.remaining_cells))]
    pub fn place(
        &mut self,
        coord: Coord,
        letter: Letter,
        player: PlayerId,
    ) -> Result<Placement, MoveError> {
        if let Err(e) = LegalPlacement::check(coord, self) {
            warn!(error = %e, "Placement rejected");
            return Err(e);
        }

        self.grid.set(coord, Cell::Filled(letter));
        self.remaining_cells -= 1;

        let sequences = rules::scan(&self.grid, coord);
        for sequence in &sequences {
            self.scores.add(player, 1);
            self.scored_lines.push(ScoredLine {
                sequence: *sequence,
                player,
            });
        }

        if self.remaining_cells == 0 {
            self.is_over = true;
            info!(
                one = self.scores.get(PlayerId::One),
                two = self.scores.get(PlayerId::Two),
                "Board full, match over"
            );
        }

        debug!(count = sequences.len(), "Placement applied");

        #[cfg(debug_assertions)]
        self.verify()?;

        Ok(Placement {
            scored: !sequences.is_empty(),
            sequences,
        })
    }

    /// Placement by raw row and column.
    pub fn place_at(
        &mut self,
        row: usize,
        col: usize,
        letter: Letter,
        player: PlayerId,
    ) -> Result<Placement, MoveError> {
        self.place(Coord::new(row, col), letter, player)
    }

    /// Passes the turn unless the last placement scored. No-op once over.
    #[instrument(skip(self))]
    pub fn advance_turn(&mut self, scored: bool) {
        if self.is_over || scored {
            return;
        }
        self.current_player = self.current_player.opponent();
        debug!(next = %self.current_player, "Turn passed");
    }

    /// Commits a move for `player`: checks turn ownership, places, and
    /// advances the turn.
    ///
    /// This is the entry point for both human input and AI decisions. Any
    /// submission out of turn or after the match ended is rejected without
    /// mutation.
    #[instrument(skip(self), fields(player = %player, mv = %mv))]
    pub fn submit_move(&mut self, player: PlayerId, mv: Move) -> Result<Placement, MoveError> {
        if let Err(e) = LegalSubmission::check(player, &mv, self) {
            warn!(error = %e, "Submission rejected");
            return Err(e);
        }

        self.pending_letter = mv.letter;
        let placement = self.place(mv.coord, mv.letter, player)?;
        self.advance_turn(placement.scored);
        Ok(placement)
    }

    /// Final result, available once the board is full.
    #[instrument(skip(self))]
    pub fn match_result(&self) -> Option<MatchResult> {
        self.is_over.then(|| rules::decide(&self.scores))
    }

    /// Checks every match invariant.
    #[instrument(skip(self))]
    pub fn verify(&self) -> Result<(), MoveError> {
        SosInvariants::check_all(self).map_err(|violations| {
            let descriptions = violations
                .iter()
                .map(|v| v.description.as_str())
                .collect::<Vec<_>>()
                .join("; ");
            warn!(%descriptions, "Invariant check failed");
            MoveError::InvariantViolation(descriptions)
        })
    }
}

impl Default for MatchState {
    fn default() -> Self {
        Self::new(crate::types::DEFAULT_SIZE, Mode::default())
    }
}

//! Strictly SOS - pure game logic for the SOS letter game
//!
//! Players take turns writing `S` or `O` on a square grid. Completing
//! S-O-S in any row, column or diagonal scores a point per sequence and
//! grants another placement. When the board fills, the higher score wins.
//!
//! # Architecture
//!
//! - **Types**: grid, cells, letters, seats, sequences
//! - **Rules**: sequence detection and the end-of-match decision
//! - **Game**: [`MatchState`], the move resolver and turn handling
//! - **Contracts / Invariants**: named preconditions and state invariants
//! - **AI**: the three-tier heuristic opponent
//!
//! # Example
//!
//! ```
//! use strictly_sos::{Letter, MatchState, Mode, Move, PlayerId};
//!
//! let mut state = MatchState::new(7, Mode::HumanVsHuman);
//! state.submit_move(PlayerId::One, Move::at(0, 0, Letter::S)).unwrap();
//! state.submit_move(PlayerId::Two, Move::at(0, 1, Letter::O)).unwrap();
//! let placement = state.submit_move(PlayerId::One, Move::at(0, 2, Letter::S)).unwrap();
//!
//! assert!(placement.scored());
//! assert_eq!(state.current_player(), PlayerId::One);
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod action;
mod game;
mod types;

pub mod ai;
pub mod contracts;
pub mod invariants;
pub mod rules;

// Crate-level exports - Domain types
pub use types::{
    Cell, Coord, DEFAULT_SIZE, Grid, Letter, MIN_SIZE, Mode, PlayerId, Scores, Sequence,
};

// Crate-level exports - Actions
pub use action::{Move, MoveError};

// Crate-level exports - Match state
pub use game::{MatchState, Placement, ScoredLine};

// Crate-level exports - Rules and AI
pub use ai::{Tier, choose_move};
pub use rules::{MatchResult, scan};

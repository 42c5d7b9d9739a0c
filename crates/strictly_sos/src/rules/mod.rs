//! Game rules for SOS.
//!
//! Pure functions over board contents. Nothing here mutates a grid, so the
//! same rules serve real placements and AI simulation on scratch boards.

pub mod outcome;
pub mod scan;

pub use outcome::{MatchResult, decide};
pub use scan::{DIRECTIONS, scan};

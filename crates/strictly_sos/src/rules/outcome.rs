//! End-of-match decision.

use crate::types::{PlayerId, Scores};
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// Final result of a completed match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, derive_more::Display)]
pub enum MatchResult {
    /// Scores are equal.
    #[display("Draw")]
    Draw,
    /// The seat with strictly more points.
    #[display("{_0} wins")]
    Winner(PlayerId),
}

/// Compares raw scores. No tiebreak beyond equality.
#[instrument]
pub fn decide(scores: &Scores) -> MatchResult {
    let one = scores.get(PlayerId::One);
    let two = scores.get(PlayerId::Two);
    match one.cmp(&two) {
        std::cmp::Ordering::Equal => MatchResult::Draw,
        std::cmp::Ordering::Greater => MatchResult::Winner(PlayerId::One),
        std::cmp::Ordering::Less => MatchResult::Winner(PlayerId::Two),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_equal_scores_draw() {
        assert_eq!(decide(&Scores::default()), MatchResult::Draw);

        let mut scores = Scores::default();
        scores.add(PlayerId::One, 3);
        scores.add(PlayerId::Two, 3);
        assert_eq!(decide(&scores), MatchResult::Draw);
    }

    #[test]
    fn test_higher_score_wins() {
        let mut scores = Scores::default();
        scores.add(PlayerId::Two, 2);
        scores.add(PlayerId::One, 1);
        assert_eq!(decide(&scores), MatchResult::Winner(PlayerId::Two));

        scores.add(PlayerId::One, 5);
        assert_eq!(decide(&scores), MatchResult::Winner(PlayerId::One));
    }

    #[test]
    fn test_display() {
        assert_eq!(MatchResult::Winner(PlayerId::One).to_string(), "Player 1 wins");
        assert_eq!(MatchResult::Draw.to_string(), "Draw");
    }
}

//! Computer player backed by the three-tier heuristic.

use super::Player;
use anyhow::Result;
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::time::Duration;
use strictly_sos::{MatchState, Move, ai};
use tracing::{debug, instrument};

/// AI seat. Decides instantly, then waits `delay` so a human can follow.
pub struct HeuristicAi {
    name: String,
    delay: Duration,
    rng: StdRng,
}

impl HeuristicAi {
    /// Creates an AI player; `seed` makes its choices reproducible.
    pub fn new(name: impl Into<String>, delay: Duration, seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self {
            name: name.into(),
            delay,
            rng,
        }
    }
}

#[async_trait::async_trait]
impl Player for HeuristicAi {
    #[instrument(skip_all, fields(ai = %self.name))]
    async fn get_move(&mut self, state: &MatchState) -> Result<Move> {
        let (mv, tier) = ai::choose_move_with_tier(state, &mut self.rng)
            .ok_or_else(|| anyhow::anyhow!("No valid moves available"))?;
        debug!(%mv, %tier, "AI chose move");

        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        Ok(mv)
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn is_ai(&self) -> bool {
        true
    }
}

//! Headless AI-vs-AI matches for exercising the heuristic.

use crate::orchestrator::{GameEvent, Orchestrator};
use crate::players::{HeuristicAi, Seating};
use anyhow::Result;
use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use strictly_sos::{MatchResult, MatchState, Mode, PlayerId};
use tokio::sync::mpsc;
use tracing::{debug, info, instrument};

/// Tally of a batch of self-play matches.
#[derive(Debug, Clone, Default, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct SelfPlayReport {
    /// Matches played.
    games: u32,
    /// Board side length.
    size: usize,
    /// Matches won by seat one.
    one_wins: u32,
    /// Matches won by seat two.
    two_wins: u32,
    /// Drawn matches.
    draws: u32,
    /// Points scored by seat one across all matches.
    one_points: u32,
    /// Points scored by seat two across all matches.
    two_points: u32,
    /// Moves refused by the resolver. Always zero for a sound policy.
    rejected_moves: u32,
}

impl SelfPlayReport {
    fn record(&mut self, state: &MatchState, rejected: u32) {
        self.games += 1;
        self.one_points += state.scores().get(PlayerId::One);
        self.two_points += state.scores().get(PlayerId::Two);
        self.rejected_moves += rejected;
        match state.match_result() {
            Some(MatchResult::Winner(PlayerId::One)) => self.one_wins += 1,
            Some(MatchResult::Winner(PlayerId::Two)) => self.two_wins += 1,
            Some(MatchResult::Draw) | None => self.draws += 1,
        }
    }
}

impl std::fmt::Display for SelfPlayReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "{} games on {}x{}", self.games, self.size, self.size)?;
        writeln!(
            f,
            "  Player 1: {} wins, {} points",
            self.one_wins, self.one_points
        )?;
        writeln!(
            f,
            "  Player 2: {} wins, {} points",
            self.two_wins, self.two_points
        )?;
        write!(f, "  Draws: {}", self.draws)
    }
}

/// Plays `games` matches between two heuristic AIs with no move delay.
///
/// Seeds are derived from `seed` per match and seat, so a seeded run is
/// reproducible.
#[instrument]
pub async fn run_self_play(games: u32, size: usize, seed: Option<u64>) -> Result<SelfPlayReport> {
    info!("Starting self-play");
    let mut report = SelfPlayReport {
        size,
        ..Default::default()
    };

    for game in 0..games {
        let seat_seed = |player: PlayerId| {
            seed.map(|s| {
                s.wrapping_mul(1_000_003)
                    .wrapping_add(u64::from(game) * 2 + u64::from(player.number()))
            })
        };
        let seating = Seating {
            one: Box::new(HeuristicAi::new(
                "AI 1",
                Duration::ZERO,
                seat_seed(PlayerId::One),
            )),
            two: Box::new(HeuristicAi::new(
                "AI 2",
                Duration::ZERO,
                seat_seed(PlayerId::Two),
            )),
            one_input: None,
            two_input: None,
        };

        let (event_tx, mut event_rx) = mpsc::unbounded_channel();
        let mut orchestrator =
            Orchestrator::new(MatchState::new(size, Mode::AiVsAi), seating, event_tx);
        let final_state = orchestrator.run().await?;

        let mut rejected = 0;
        while let Ok(event) = event_rx.try_recv() {
            if let GameEvent::MoveRejected { reason, .. } = event {
                debug!(%reason, "Self-play move rejected");
                rejected += 1;
            }
        }

        debug!(
            game,
            one = final_state.scores().get(PlayerId::One),
            two = final_state.scores().get(PlayerId::Two),
            "Self-play match finished"
        );
        report.record(&final_state, rejected);
    }

    info!(
        one_wins = report.one_wins,
        two_wins = report.two_wins,
        draws = report.draws,
        "Self-play complete"
    );
    Ok(report)
}

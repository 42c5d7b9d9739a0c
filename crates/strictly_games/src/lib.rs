//! Strictly Games - SOS front end
//!
//! Terminal UI and headless self-play on top of the [`strictly_sos`] rule
//! engine.
//!
//! # Architecture
//!
//! - **Config**: TOML settings with command-line overrides
//! - **Players**: human seats fed by the UI, heuristic AI seats
//! - **Orchestrator**: asks the seat holding the turn for a move and commits it
//! - **TUI**: ratatui front end driving an orchestrator task
//! - **Self-play**: AI-vs-AI batches for exercising the heuristic
//!
//! # Example
//!
//! ```no_run
//! use strictly_games::run_self_play;
//!
//! # async fn example() -> anyhow::Result<()> {
//! let report = run_self_play(5, 7, Some(42)).await?;
//! println!("{}", report);
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod cli;
pub mod config;
pub mod orchestrator;
pub mod players;
pub mod self_play;
pub mod tui;

pub use config::{ConfigError, GameConfig};
pub use orchestrator::{GameEvent, Orchestrator};
pub use players::{HeuristicAi, HumanInput, HumanPlayer, Player, Seating};
pub use self_play::{SelfPlayReport, run_self_play};
pub use tui::run_tui;

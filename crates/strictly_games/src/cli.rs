//! Command-line interface for strictly_games.

use crate::config::{ConfigError, GameConfig};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use strictly_sos::DEFAULT_SIZE;
use tracing::instrument;

/// Strictly Games - SOS in the terminal
#[derive(Parser, Debug)]
#[command(name = "strictly_games")]
#[command(about = "Play SOS against a friend or a heuristic AI", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Play in the terminal UI
    Play(PlayArgs),

    /// Run headless AI-vs-AI matches and print the tally
    SelfPlay {
        /// Number of matches
        #[arg(short, long, default_value = "10")]
        games: u32,

        /// Board side length
        #[arg(short, long, default_value_t = DEFAULT_SIZE)]
        size: usize,

        /// Seed for reproducible runs
        #[arg(long)]
        seed: Option<u64>,

        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },
}

/// Options for an interactive match. Flags override the config file.
#[derive(Args, Debug, Default)]
pub struct PlayArgs {
    /// Path to a TOML config file (defaults to ./strictly_sos.toml if present)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Board side length
    #[arg(short, long)]
    pub size: Option<usize>,

    /// Play against the AI
    #[arg(long, conflicts_with = "hot_seat")]
    pub vs_ai: bool,

    /// Two players share the keyboard
    #[arg(long)]
    pub hot_seat: bool,

    /// Pause before the AI moves, in milliseconds
    #[arg(long)]
    pub ai_delay_ms: Option<u64>,

    /// Seed for the AI's random choices
    #[arg(long)]
    pub seed: Option<u64>,
}

impl PlayArgs {
    /// Loads the config file and applies the command-line overrides.
    #[instrument(skip(self))]
    pub fn resolve(&self) -> Result<GameConfig, ConfigError> {
        let mut config = GameConfig::load(self.config.as_deref())?;
        if let Some(size) = self.size {
            config = config.with_board_size(size);
        }
        if self.vs_ai {
            config = config.with_vs_ai(true);
        }
        if self.hot_seat {
            config = config.with_vs_ai(false);
        }
        if let Some(ms) = self.ai_delay_ms {
            config = config.with_ai_delay_ms(ms);
        }
        if let Some(seed) = self.seed {
            config = config.with_seed(seed);
        }
        config.validate()
    }
}

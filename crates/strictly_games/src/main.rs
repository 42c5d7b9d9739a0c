//! Strictly Games - SOS
//!
//! Interactive terminal play or headless self-play.

#![warn(missing_docs)]

use anyhow::Result;
use clap::Parser;
use strictly_games::cli::{Cli, Command};
use strictly_games::{run_self_play, run_tui};
use tracing::{info, instrument};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    match cli.command {
        Command::Play(args) => {
            let config = args.resolve()?;
            run_tui(config).await
        }
        Command::SelfPlay {
            games,
            size,
            seed,
            json,
        } => self_play(games, size, seed, json).await,
    }
}

/// Run AI-vs-AI matches and print the tally
#[instrument]
async fn self_play(games: u32, size: usize, seed: Option<u64>, json: bool) -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = strictly_games::GameConfig::default()
        .with_board_size(size)
        .validate()?;

    info!("Running self-play");
    let report = run_self_play(games, *config.board_size(), seed).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("{}", report);
    }
    Ok(())
}

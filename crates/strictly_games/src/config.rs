//! Game configuration loaded from TOML.

use derive_getters::Getters;
use derive_more::{Display, Error};
use derive_setters::Setters;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use strictly_sos::{DEFAULT_SIZE, MIN_SIZE, Mode, PlayerId};
use tracing::{debug, info, instrument};

/// Largest board the terminal front end can lay out.
pub const MAX_SIZE: usize = 26;

/// File picked up from the working directory when no `--config` is given.
pub const DEFAULT_CONFIG_FILE: &str = "strictly_sos.toml";

/// Settings for a session.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Setters, Serialize, Deserialize)]
#[setters(prefix = "with_")]
pub struct GameConfig {
    /// Side length of the board.
    #[serde(default = "default_board_size")]
    board_size: usize,

    /// Seat two is the heuristic AI.
    #[serde(default = "default_vs_ai")]
    vs_ai: bool,

    /// Pause before the AI commits its move, in milliseconds.
    #[serde(default = "default_ai_delay_ms")]
    ai_delay_ms: u64,

    /// Display name for seat one.
    #[serde(default)]
    #[setters(strip_option)]
    player_one_name: Option<String>,

    /// Display name for seat two.
    #[serde(default)]
    #[setters(strip_option)]
    player_two_name: Option<String>,

    /// Seed for the AI's random source. Unseeded when absent.
    #[serde(default)]
    #[setters(strip_option)]
    seed: Option<u64>,
}

#[instrument]
fn default_board_size() -> usize {
    DEFAULT_SIZE
}

#[instrument]
fn default_vs_ai() -> bool {
    true
}

#[instrument]
fn default_ai_delay_ms() -> u64 {
    250
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            board_size: default_board_size(),
            vs_ai: default_vs_ai(),
            ai_delay_ms: default_ai_delay_ms(),
            player_one_name: None,
            player_two_name: None,
            seed: None,
        }
    }
}

impl GameConfig {
    /// Parses and validates configuration from TOML text.
    #[instrument(skip(content))]
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))?;
        config.validate()
    }

    /// Loads configuration from a TOML file.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;

        let config = Self::from_toml_str(&content)?;
        info!(board_size = config.board_size, vs_ai = config.vs_ai, "Config loaded successfully");
        Ok(config)
    }

    /// Loads `path` if given, otherwise [`DEFAULT_CONFIG_FILE`] if present,
    /// otherwise defaults.
    #[instrument]
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::from_file(path),
            None if Path::new(DEFAULT_CONFIG_FILE).exists() => Self::from_file(DEFAULT_CONFIG_FILE),
            None => {
                debug!("No config file, using defaults");
                Ok(Self::default())
            }
        }
    }

    /// Checks value ranges.
    #[instrument(skip(self))]
    pub fn validate(self) -> Result<Self, ConfigError> {
        if !(MIN_SIZE..=MAX_SIZE).contains(&self.board_size) {
            return Err(ConfigError::new(format!(
                "board_size must be between {} and {}, got {}",
                MIN_SIZE, MAX_SIZE, self.board_size
            )));
        }
        Ok(self)
    }

    /// Seat control implied by `vs_ai`.
    pub fn mode(&self) -> Mode {
        if self.vs_ai {
            Mode::HumanVsAi
        } else {
            Mode::HumanVsHuman
        }
    }

    /// AI pause as a duration.
    pub fn ai_delay(&self) -> Duration {
        Duration::from_millis(self.ai_delay_ms)
    }

    /// Display name for `player`, falling back to a mode-appropriate label.
    pub fn name_for(&self, player: PlayerId) -> String {
        let configured = match player {
            PlayerId::One => self.player_one_name.as_ref(),
            PlayerId::Two => self.player_two_name.as_ref(),
        };
        match configured {
            Some(name) => name.clone(),
            None if self.mode().is_ai(player) => "AI".to_string(),
            None => player.to_string(),
        }
    }
}

/// Configuration error.
#[derive(Debug, Clone, Display, Error)]
#[display("Config error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a new configuration error.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(message: String) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message,
            line: loc.line(),
            file: loc.file(),
        }
    }
}

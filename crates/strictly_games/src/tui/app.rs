//! Application state and logic.

use super::input::move_cursor;
use crate::config::GameConfig;
use crate::orchestrator::GameEvent;
use crate::players::HumanInput;
use crossterm::event::KeyCode;
use strictly_sos::{Coord, Letter, MatchResult, MatchState, Move, PlayerId};
use tracing::debug;

/// What the event loop should do after a key press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Redraw only.
    None,
    /// Hand the move to the seat's input channel.
    Submit(PlayerId, HumanInput),
    /// Throw the match away and start over.
    Restart,
    /// Leave the program.
    Quit,
}

/// Main application state.
pub struct App {
    snapshot: MatchState,
    cursor: Coord,
    status_message: String,
    names: [String; 2],
    last_move: Option<Coord>,
}

impl App {
    /// Creates a new application for the configured match.
    pub fn new(config: &GameConfig) -> Self {
        let snapshot = MatchState::new(*config.board_size(), config.mode());
        let names = [
            config.name_for(PlayerId::One),
            config.name_for(PlayerId::Two),
        ];
        let mut app = Self {
            cursor: centre(snapshot.grid().size()),
            snapshot,
            status_message: String::new(),
            names,
            last_move: None,
        };
        app.status_message = app.turn_message();
        app
    }

    /// Latest match snapshot from the orchestrator.
    pub fn snapshot(&self) -> &MatchState {
        &self.snapshot
    }

    /// Highlighted cell.
    pub fn cursor(&self) -> Coord {
        self.cursor
    }

    /// Letter the next placement will use.
    pub fn letter(&self) -> Letter {
        self.snapshot.pending_letter()
    }

    /// Gets the current status message.
    pub fn status_message(&self) -> &str {
        &self.status_message
    }

    /// Cell of the most recent placement.
    pub fn last_move(&self) -> Option<Coord> {
        self.last_move
    }

    /// Display name for a seat.
    pub fn name(&self, player: PlayerId) -> &str {
        match player {
            PlayerId::One => &self.names[0],
            PlayerId::Two => &self.names[1],
        }
    }

    fn turn_message(&self) -> String {
        let player = self.snapshot.current_player();
        format!("{} to move", self.name(player))
    }

    /// Handles a game event from the orchestrator.
    pub fn handle_event(&mut self, event: GameEvent) {
        debug!(?event, "Handling game event");

        match event {
            GameEvent::StateChanged(state) => {
                self.snapshot = state;
            }
            GameEvent::AiThinking { name } => {
                self.status_message = format!("{} is thinking...", name);
            }
            GameEvent::MoveMade { name, mv, points, .. } => {
                self.last_move = Some(mv.coord);
                self.status_message = match points {
                    0 => format!("{} placed {}", name, mv),
                    1 => format!("{} placed {} and scored, going again", name, mv),
                    n => format!("{} placed {} and scored {}, going again", name, mv, n),
                };
            }
            GameEvent::MoveRejected { name, reason } => {
                self.status_message = format!("{}: {}", name, reason);
            }
            GameEvent::GameOver { result, winner } => {
                let scores = self.snapshot.scores();
                let tally = format!(
                    "{}-{}",
                    scores.get(PlayerId::One),
                    scores.get(PlayerId::Two)
                );
                self.status_message = match (result, winner) {
                    (MatchResult::Winner(_), Some(name)) => format!(
                        "{} wins {}! Press 'r' to restart or 'q' to quit.",
                        name, tally
                    ),
                    (MatchResult::Winner(player), None) => format!(
                        "{} wins {}! Press 'r' to restart or 'q' to quit.",
                        player, tally
                    ),
                    (MatchResult::Draw, _) => format!(
                        "Draw {}! Press 'r' to restart or 'q' to quit.",
                        tally
                    ),
                };
            }
        }
    }

    /// Maps a key press to an action, updating cursor and letter in place.
    pub fn handle_key(&mut self, key: KeyCode) -> Action {
        match key {
            KeyCode::Char('q') | KeyCode::Esc => Action::Quit,
            KeyCode::Char('r') => Action::Restart,
            KeyCode::Char('s') | KeyCode::Char('S') => {
                self.snapshot.select_letter(Letter::S);
                Action::None
            }
            KeyCode::Char('o') | KeyCode::Char('O') => {
                self.snapshot.select_letter(Letter::O);
                Action::None
            }
            KeyCode::Tab => {
                self.snapshot.select_letter(self.letter().toggled());
                Action::None
            }
            KeyCode::Enter | KeyCode::Char(' ') => self.submit(),
            other => {
                self.cursor = move_cursor(self.cursor, other, self.snapshot.grid().size());
                Action::None
            }
        }
    }

    /// Moves the cursor to a clicked cell and places there.
    pub fn handle_click(&mut self, coord: Coord) -> Action {
        if !self.snapshot.grid().in_bounds(coord) {
            return Action::None;
        }
        self.cursor = coord;
        self.submit()
    }

    fn submit(&mut self) -> Action {
        match self.submission() {
            Some((player, mv)) => {
                Action::Submit(player, HumanInput::for_state(&self.snapshot, mv))
            }
            None => Action::None,
        }
    }

    /// The move the cursor and letter describe, if the local player may make it.
    fn submission(&mut self) -> Option<(PlayerId, Move)> {
        if self.snapshot.is_over() {
            self.status_message = "Match over. Press 'r' to restart or 'q' to quit.".to_string();
            return None;
        }
        if self.snapshot.is_ai_turn() {
            let ai = self.name(self.snapshot.current_player()).to_string();
            self.status_message = format!("Waiting for {}", ai);
            return None;
        }
        if !self.snapshot.is_valid_placement(self.cursor.row, self.cursor.col) {
            self.status_message = format!("{} is already taken", self.cursor);
            return None;
        }
        Some((
            self.snapshot.current_player(),
            Move::new(self.cursor, self.letter()),
        ))
    }

    /// Resets the view for a fresh match.
    pub fn restart(&mut self) {
        debug!("Restarting game");
        self.snapshot = self.snapshot.restart();
        self.cursor = centre(self.snapshot.grid().size());
        self.last_move = None;
        self.status_message = format!("New match. {}", self.turn_message());
    }
}

fn centre(size: usize) -> Coord {
    Coord::new(size / 2, size / 2)
}

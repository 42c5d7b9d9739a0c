//! Terminal UI for SOS.

mod app;
mod input;
mod ui;

pub use app::{Action, App};
pub use input::move_cursor;
pub use ui::{board_area, cell_at};

use crate::config::GameConfig;
use crate::orchestrator::{GameEvent, Orchestrator};
use crate::players::{HumanInput, Seating};
use anyhow::Result;
use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyEventKind, MouseButton,
        MouseEventKind,
    },
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend, layout::Rect};
use std::io::{self, Stdout};
use std::time::Duration;
use strictly_sos::{MatchState, PlayerId};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, error, info, instrument, warn};

/// Log file used while the terminal is in raw mode.
pub const LOG_FILE: &str = "strictly_sos_tui.log";

type CrosstermTerminal = Terminal<CrosstermBackend<Stdout>>;

/// One running match: the orchestrator task plus the channels into and out
/// of it. Aborts the task on drop.
pub struct Session {
    handle: JoinHandle<()>,
    event_rx: mpsc::UnboundedReceiver<GameEvent>,
    one_input: Option<mpsc::UnboundedSender<HumanInput>>,
    two_input: Option<mpsc::UnboundedSender<HumanInput>>,
}

impl Session {
    /// Seats players from `config` and spawns the orchestrator.
    #[instrument(skip(config), fields(size = config.board_size(), vs_ai = config.vs_ai()))]
    pub fn start(config: &GameConfig) -> Self {
        let seating = Seating::from_config(config);
        let one_input = seating.one_input.clone();
        let two_input = seating.two_input.clone();

        let (event_tx, event_rx) = mpsc::unbounded_channel();
        let state = MatchState::new(*config.board_size(), config.mode());
        let mut orchestrator = Orchestrator::new(state, seating, event_tx);

        let handle = tokio::spawn(async move {
            if let Err(e) = orchestrator.run().await {
                error!(error = %e, "Orchestrator error");
            }
        });

        info!("Session started");
        Self {
            handle,
            event_rx,
            one_input,
            two_input,
        }
    }

    /// Next pending event, if any.
    pub fn try_event(&mut self) -> Option<GameEvent> {
        self.event_rx.try_recv().ok()
    }

    /// Forwards a move to a human seat. Returns false for AI seats.
    pub fn submit(&self, player: PlayerId, input: HumanInput) -> bool {
        let channel = match player {
            PlayerId::One => &self.one_input,
            PlayerId::Two => &self.two_input,
        };
        match channel {
            Some(tx) => tx.send(input).is_ok(),
            None => false,
        }
    }
}

impl Drop for Session {
    fn drop(&mut self) {
        debug!("Aborting orchestrator task");
        self.handle.abort();
    }
}

/// Runs the interactive game until the user quits.
pub async fn run_tui(config: GameConfig) -> Result<()> {
    // Log to a file so output does not tear the alternate screen
    let log_file = std::fs::File::create(LOG_FILE)?;
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::sync::Arc::new(log_file))
        .with_ansi(false)
        .try_init();

    info!(?config, "Starting SOS TUI");

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_app(&mut terminal, &config).await;

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = &res {
        error!(error = ?err, "Game loop error");
    }

    res
}

async fn run_app(terminal: &mut CrosstermTerminal, config: &GameConfig) -> Result<()> {
    let mut app = App::new(config);
    let mut session = Session::start(config);

    loop {
        while let Some(event) = session.try_event() {
            app.handle_event(event);
        }

        terminal.draw(|f| ui::draw(f, &app))?;

        if !event::poll(Duration::from_millis(50))? {
            // Let the orchestrator task make progress
            tokio::task::yield_now().await;
            continue;
        }
        let action = match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => app.handle_key(key.code),
            Event::Mouse(mouse) if mouse.kind == MouseEventKind::Down(MouseButton::Left) => {
                let size = terminal.size()?;
                let screen = Rect::new(0, 0, size.width, size.height);
                let board = app.snapshot().grid().size();
                match cell_at(screen, board, mouse.column, mouse.row) {
                    Some(coord) => app.handle_click(coord),
                    None => Action::None,
                }
            }
            _ => continue,
        };

        match action {
            Action::None => {}
            Action::Quit => {
                info!("User quit");
                return Ok(());
            }
            Action::Restart => {
                info!("Restarting match");
                drop(session);
                app.restart();
                session = Session::start(config);
            }
            Action::Submit(player, input) => {
                if !session.submit(player, input) {
                    warn!(%player, mv = %input.mv, "No input channel for seat");
                }
            }
        }
    }
}

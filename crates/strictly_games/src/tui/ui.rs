//! Stateless UI rendering for SOS.

use super::app::App;
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};
use std::collections::HashMap;
use std::rc::Rc;
use strictly_sos::{Cell, Coord, Letter, MatchState, PlayerId};

fn screen_layout(area: Rect) -> Rc<[Rect]> {
    Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Title
            Constraint::Length(3), // Scoreboard
            Constraint::Min(5),    // Board
            Constraint::Length(3), // Status
            Constraint::Length(1), // Help
        ])
        .split(area)
}

/// Bordered board rectangle for a screen of `area` and a board of side `size`.
pub fn board_area(area: Rect, size: usize) -> Rect {
    let width = (size * 3 + 2) as u16;
    let height = (size + 2) as u16;
    center_rect(screen_layout(area)[2], width, height)
}

/// Board cell under the terminal position `(column, row)`, if any.
pub fn cell_at(area: Rect, size: usize, column: u16, row: u16) -> Option<Coord> {
    let board = board_area(area, size);
    let left = board.x + 1;
    let top = board.y + 1;
    if column < left || row < top {
        return None;
    }
    let coord = Coord::new(usize::from(row - top), usize::from((column - left) / 3));
    let inside = coord.row < size
        && coord.col < size
        && column < board.x + board.width.saturating_sub(1)
        && row < board.y + board.height.saturating_sub(1);
    inside.then_some(coord)
}

/// Renders the whole screen.
pub fn draw(frame: &mut Frame, app: &App) {
    let screen = frame.area();
    let chunks = screen_layout(screen);

    let title = Paragraph::new("Strictly Games - SOS")
        .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
        .alignment(Alignment::Center);
    frame.render_widget(title, chunks[0]);

    draw_scoreboard(frame, chunks[1], app);
    draw_board(frame, screen, app);

    let status = Paragraph::new(app.status_message())
        .style(Style::default().fg(Color::Yellow))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(status, chunks[3]);

    const HELP: &str = "arrows/hjkl move  s/o/tab letter  enter/click place  r restart  q quit";
    let help = Paragraph::new(HELP)
        .style(Style::default().fg(Color::DarkGray))
        .alignment(Alignment::Center);
    frame.render_widget(help, chunks[4]);
}

fn seat_color(player: PlayerId) -> Color {
    match player {
        PlayerId::One => Color::Blue,
        PlayerId::Two => Color::Red,
    }
}

fn draw_scoreboard(frame: &mut Frame, area: Rect, app: &App) {
    let state = app.snapshot();
    let mut spans = Vec::new();
    for player in [PlayerId::One, PlayerId::Two] {
        let marker = if !state.is_over() && state.current_player() == player {
            "> "
        } else {
            "  "
        };
        spans.push(Span::raw(marker));
        spans.push(Span::styled(
            format!("{}: {}", app.name(player), state.scores().get(player)),
            Style::default()
                .fg(seat_color(player))
                .add_modifier(Modifier::BOLD),
        ));
        spans.push(Span::raw("    "));
    }
    spans.push(Span::styled(
        format!("Letter: {}", app.letter()),
        Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
    ));

    let scoreboard = Paragraph::new(Line::from(spans))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(scoreboard, area);
}

/// Owner of each cell that belongs to a scored line. Later lines win.
fn line_owners(state: &MatchState) -> HashMap<Coord, PlayerId> {
    let mut owners = HashMap::new();
    for line in state.scored_lines() {
        for coord in line.sequence.coords() {
            owners.insert(*coord, line.player);
        }
    }
    owners
}

fn draw_board(frame: &mut Frame, screen: Rect, app: &App) {
    let state = app.snapshot();
    let grid = state.grid();
    let owners = line_owners(state);

    let lines: Vec<Line> = (0..grid.size())
        .map(|row| {
            let spans: Vec<Span> = (0..grid.size())
                .map(|col| {
                    let coord = Coord::new(row, col);
                    let (symbol, mut style) = match grid.get(coord) {
                        Some(Cell::Filled(Letter::S)) => (" S ", Style::default()),
                        Some(Cell::Filled(Letter::O)) => (" O ", Style::default()),
                        _ => (" · ", Style::default().fg(Color::DarkGray)),
                    };
                    if let Some(player) = owners.get(&coord) {
                        style = style.fg(seat_color(*player)).add_modifier(Modifier::BOLD);
                    }
                    if app.last_move() == Some(coord) {
                        style = style.add_modifier(Modifier::UNDERLINED);
                    }
                    if app.cursor() == coord {
                        style = style.add_modifier(Modifier::REVERSED);
                    }
                    Span::styled(symbol, style)
                })
                .collect();
            Line::from(spans)
        })
        .collect();

    let board = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .title(format!(" {}x{} ", grid.size(), grid.size())),
    );
    frame.render_widget(board, board_area(screen, grid.size()));
}

fn center_rect(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use crate::orchestrator::GameEvent;
    use ratatui::{Terminal, backend::TestBackend};
    use strictly_sos::Move;

    #[test]
    fn test_line_owners_marks_all_three_cells() {
        let mut state = MatchState::new(3, strictly_sos::Mode::HumanVsHuman);
        state.place_at(0, 0, Letter::S, PlayerId::One).unwrap();
        state.place_at(0, 2, Letter::S, PlayerId::One).unwrap();
        state.place_at(0, 1, Letter::O, PlayerId::Two).unwrap();

        let owners = line_owners(&state);
        assert_eq!(owners.len(), 3);
        assert!(owners.values().all(|p| *p == PlayerId::Two));
    }

    #[test]
    fn test_center_rect_fits_area() {
        let area = Rect::new(0, 0, 10, 4);
        let rect = center_rect(area, 20, 2);
        assert_eq!(rect.width, 10);
        assert_eq!(rect.y, 1);
    }

    #[test]
    fn test_cell_at_maps_clicks_inside_board() {
        let area = Rect::new(0, 0, 80, 20);
        let board = board_area(area, 3);

        assert_eq!(cell_at(area, 3, board.x + 1, board.y + 1), Some(Coord::new(0, 0)));
        assert_eq!(cell_at(area, 3, board.x + 3, board.y + 1), Some(Coord::new(0, 0)));
        assert_eq!(cell_at(area, 3, board.x + 4, board.y + 2), Some(Coord::new(1, 1)));
        assert_eq!(cell_at(area, 3, board.x + 9, board.y + 3), Some(Coord::new(2, 2)));
        // Borders and outside.
        assert_eq!(cell_at(area, 3, board.x, board.y + 1), None);
        assert_eq!(cell_at(area, 3, board.x + 1, board.y), None);
        assert_eq!(cell_at(area, 3, board.x + 10, board.y + 1), None);
        assert_eq!(cell_at(area, 3, 0, 0), None);
    }

    #[test]
    fn test_draw_renders_scores_and_board() {
        let config = GameConfig::default().with_vs_ai(false).with_board_size(3);
        let mut app = App::new(&config);
        let mut state = app.snapshot().clone();
        state
            .submit_move(PlayerId::One, Move::at(0, 0, Letter::S))
            .unwrap();
        app.handle_event(GameEvent::StateChanged(state));

        let mut terminal = Terminal::new(TestBackend::new(80, 20)).unwrap();
        terminal.draw(|f| draw(f, &app)).unwrap();

        let rendered: String = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect();
        assert!(rendered.contains("Player 1: 0"));
        assert!(rendered.contains("Player 2: 0"));
        assert!(rendered.contains("3x3"));
        assert!(rendered.contains('S'));
    }
}

//! Cursor movement for keyboard navigation.

use crossterm::event::KeyCode;
use strictly_sos::Coord;

/// Moves the cursor one cell for arrow keys and `hjkl`, clamped to the board.
pub fn move_cursor(cursor: Coord, key: KeyCode, size: usize) -> Coord {
    let last = size.saturating_sub(1);
    match key {
        KeyCode::Up | KeyCode::Char('k') => Coord::new(cursor.row.saturating_sub(1), cursor.col),
        KeyCode::Down | KeyCode::Char('j') => Coord::new((cursor.row + 1).min(last), cursor.col),
        KeyCode::Left | KeyCode::Char('h') => Coord::new(cursor.row, cursor.col.saturating_sub(1)),
        KeyCode::Right | KeyCode::Char('l') => Coord::new(cursor.row, (cursor.col + 1).min(last)),
        _ => cursor,
    }
}

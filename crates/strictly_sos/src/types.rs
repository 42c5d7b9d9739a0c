//! Core domain types for SOS.

use derive_more::Display;
use serde::{Deserialize, Serialize};
use strum::EnumIter;
use tracing::instrument;

/// Default side length of the board.
pub const DEFAULT_SIZE: usize = 7;

/// Smallest board on which a sequence fits.
pub const MIN_SIZE: usize = 3;

/// Letter a player can place.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Display, Serialize, Deserialize, EnumIter,
)]
pub enum Letter {
    /// The outer letters of a sequence.
    #[default]
    #[display("S")]
    S,
    /// The middle letter of a sequence.
    #[display("O")]
    O,
}

impl Letter {
    /// Returns the other letter.
    pub fn toggled(self) -> Self {
        match self {
            Letter::S => Letter::O,
            Letter::O => Letter::S,
        }
    }
}

/// One of the two seats at the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Serialize, Deserialize, EnumIter)]
pub enum PlayerId {
    /// Moves first.
    #[display("Player 1")]
    One,
    /// Moves second; the AI seat in single-player matches.
    #[display("Player 2")]
    Two,
}

impl PlayerId {
    /// Returns the opponent seat.
    pub fn opponent(self) -> Self {
        match self {
            PlayerId::One => PlayerId::Two,
            PlayerId::Two => PlayerId::One,
        }
    }

    /// Seat number (1 or 2).
    pub fn number(self) -> u8 {
        match self {
            PlayerId::One => 1,
            PlayerId::Two => 2,
        }
    }
}

/// A cell on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Cell {
    /// Nothing placed yet.
    #[default]
    Empty,
    /// Holds a letter.
    Filled(Letter),
}

impl Cell {
    /// True when the cell holds `letter`.
    pub fn holds(self, letter: Letter) -> bool {
        self == Cell::Filled(letter)
    }
}

/// Zero-based board coordinate.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Display,
    Serialize,
    Deserialize,
    derive_new::new,
)]
#[display("({row}, {col})")]
pub struct Coord {
    /// Row index, top to bottom.
    pub row: usize,
    /// Column index, left to right.
    pub col: usize,
}

impl Coord {
    /// Steps `distance` cells along `(dr, dc)`, or `None` if that leaves the
    /// non-negative quadrant. Upper bounds are the grid's concern.
    pub fn offset(self, (dr, dc): (isize, isize), distance: isize) -> Option<Coord> {
        let row = self.row.checked_add_signed(dr * distance)?;
        let col = self.col.checked_add_signed(dc * distance)?;
        Some(Coord { row, col })
    }
}

/// Square N×N grid, row-major.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grid {
    size: usize,
    cells: Vec<Cell>,
}

impl Grid {
    /// Creates an empty grid of side `size`.
    #[instrument]
    pub fn new(size: usize) -> Self {
        Self {
            size,
            cells: vec![Cell::Empty; size * size],
        }
    }

    /// Side length.
    pub fn size(&self) -> usize {
        self.size
    }

    /// True iff `coord` lies on the board.
    pub fn in_bounds(&self, coord: Coord) -> bool {
        coord.row < self.size && coord.col < self.size
    }

    fn index(&self, coord: Coord) -> Option<usize> {
        self.in_bounds(coord)
            .then_some(coord.row * self.size + coord.col)
    }

    /// Gets the cell at `coord`, `None` when out of bounds.
    pub fn get(&self, coord: Coord) -> Option<Cell> {
        self.index(coord).map(|i| self.cells[i])
    }

    /// Overwrites the cell at `coord`. Out-of-bounds writes are ignored.
    ///
    /// Match code goes through [`crate::MatchState::place`]; this is the raw
    /// setter used for scratch boards and test fixtures.
    pub fn set(&mut self, coord: Coord, cell: Cell) {
        if let Some(i) = self.index(coord) {
            self.cells[i] = cell;
        }
    }

    /// True iff `coord` is on the board and empty.
    pub fn is_empty(&self, coord: Coord) -> bool {
        self.get(coord) == Some(Cell::Empty)
    }

    /// All cells in row-major order.
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Coordinates of every empty cell, row-major.
    pub fn empty_cells(&self) -> Vec<Coord> {
        self.coords().filter(|&c| self.is_empty(c)).collect()
    }

    /// Number of empty cells.
    pub fn count_empty(&self) -> usize {
        self.cells.iter().filter(|c| **c == Cell::Empty).count()
    }

    /// Iterates every coordinate row-major.
    pub fn coords(&self) -> impl Iterator<Item = Coord> + '_ {
        (0..self.size).flat_map(move |row| (0..self.size).map(move |col| Coord { row, col }))
    }

    /// Formats the grid as text, `.` for empty cells.
    pub fn display(&self) -> String {
        let mut result = String::new();
        for row in 0..self.size {
            for col in 0..self.size {
                let symbol = match self.cells[row * self.size + col] {
                    Cell::Empty => '.',
                    Cell::Filled(Letter::S) => 'S',
                    Cell::Filled(Letter::O) => 'O',
                };
                result.push(symbol);
                if col + 1 < self.size {
                    result.push(' ');
                }
            }
            if row + 1 < self.size {
                result.push('\n');
            }
        }
        result
    }
}

impl Default for Grid {
    fn default() -> Self {
        Self::new(DEFAULT_SIZE)
    }
}

/// Three collinear adjacent cells spelling S-O-S, in board order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Sequence([Coord; 3]);

impl Sequence {
    pub(crate) fn new(start: Coord, middle: Coord, end: Coord) -> Self {
        Self([start, middle, end])
    }

    /// The three coordinates, S first, O in the middle.
    pub fn coords(&self) -> &[Coord; 3] {
        &self.0
    }

    /// First endpoint.
    pub fn start(&self) -> Coord {
        self.0[0]
    }

    /// Middle cell (the `O`).
    pub fn middle(&self) -> Coord {
        self.0[1]
    }

    /// Last endpoint.
    pub fn end(&self) -> Coord {
        self.0[2]
    }

    /// True when `coord` is one of the three cells.
    pub fn contains(&self, coord: Coord) -> bool {
        self.0.contains(&coord)
    }
}

/// Point totals for both seats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Scores {
    one: u32,
    two: u32,
}

impl Scores {
    /// Points held by `player`.
    pub fn get(&self, player: PlayerId) -> u32 {
        match player {
            PlayerId::One => self.one,
            PlayerId::Two => self.two,
        }
    }

    /// Sum of both seats.
    pub fn total(&self) -> u32 {
        self.one + self.two
    }

    pub(crate) fn add(&mut self, player: PlayerId, points: u32) {
        match player {
            PlayerId::One => self.one += points,
            PlayerId::Two => self.two += points,
        }
    }
}

/// Who controls each seat.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Display, Serialize, Deserialize)]
pub enum Mode {
    /// Two humans share the keyboard.
    #[display("Two players")]
    HumanVsHuman,
    /// Seat two is the heuristic AI.
    #[default]
    #[display("Single player")]
    HumanVsAi,
    /// Both seats are the heuristic AI (self-play).
    #[display("AI vs AI")]
    AiVsAi,
}

impl Mode {
    /// True when `player` is driven by the AI policy in this mode.
    pub fn is_ai(self, player: PlayerId) -> bool {
        match self {
            Mode::HumanVsHuman => false,
            Mode::HumanVsAi => player == PlayerId::Two,
            Mode::AiVsAi => true,
        }
    }
}

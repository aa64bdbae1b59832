//! The [`Cell`] type: one grid position and its traversal state.

use std::fmt;
use std::hash::{Hash, Hasher};

use crate::geom::Point;

/// Traversal state of a [`Cell`]. Exactly one applies at a time.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CellState {
    #[default]
    Empty,
    Start,
    End,
    Barrier,
    /// Discovered, waiting in the frontier.
    Open,
    /// Popped from the frontier and relaxed.
    Closed,
    /// Part of the reconstructed shortest path.
    Path,
}

impl CellState {
    /// Start or End.
    #[inline]
    pub const fn is_endpoint(self) -> bool {
        matches!(self, Self::Start | Self::End)
    }

    /// Open, Closed or Path: state left behind by a search.
    #[inline]
    pub const fn is_discovered(self) -> bool {
        matches!(self, Self::Open | Self::Closed | Self::Path)
    }

    /// Anything but a barrier can be walked through.
    #[inline]
    pub const fn is_passable(self) -> bool {
        !matches!(self, Self::Barrier)
    }

    /// One-character rendering, handy for logs and test fixtures.
    pub const fn glyph(self) -> char {
        match self {
            Self::Empty => '.',
            Self::Start => 'S',
            Self::End => 'E',
            Self::Barrier => '#',
            Self::Open => 'o',
            Self::Closed => 'x',
            Self::Path => '*',
        }
    }
}

impl fmt::Display for CellState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Empty => "empty",
            Self::Start => "start",
            Self::End => "end",
            Self::Barrier => "barrier",
            Self::Open => "open",
            Self::Closed => "closed",
            Self::Path => "path",
        };
        f.write_str(name)
    }
}

/// A single grid position.
///
/// Identity is the `(row, column)` pair: equality and hashing ignore
/// `state`, which changes while a search runs. `x`/`y` are the pixel
/// coordinates of the cell's top-left corner for a presentation layer.
#[derive(Copy, Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Cell {
    pub row: i32,
    pub column: i32,
    pub x: i32,
    pub y: i32,
    pub state: CellState,
}

impl Cell {
    /// Create an empty cell at `(row, column)` for a grid whose cells are
    /// `width` pixels wide. Pixel coordinates saturate at `i32` bounds.
    pub const fn new(row: i32, column: i32, width: i32) -> Self {
        Self {
            row,
            column,
            x: column.saturating_mul(width),
            y: row.saturating_mul(width),
            state: CellState::Empty,
        }
    }

    /// Grid position of the cell.
    #[inline]
    pub const fn pos(&self) -> Point {
        Point::at(self.row, self.column)
    }

    /// Set the state (builder).
    #[inline]
    pub const fn with_state(mut self, state: CellState) -> Self {
        self.state = state;
        self
    }
}

impl PartialEq for Cell {
    fn eq(&self, other: &Self) -> bool {
        self.row == other.row && self.column == other.column
    }
}

impl Eq for Cell {}

impl Hash for Cell {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.row.hash(state);
        self.column.hash(state);
    }
}

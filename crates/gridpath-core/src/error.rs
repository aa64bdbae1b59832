//! Errors raised by [`Grid`](crate::Grid) operations.

use std::fmt;

use crate::geom::Point;

/// Errors that can occur when editing a grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GridError {
    /// The edit would break a grid invariant, e.g. making the start cell
    /// the end cell too.
    InvalidOperation { pos: Point, reason: &'static str },
    /// The position lies outside the grid.
    OutOfBounds(Point),
    /// Rejected grid configuration.
    InvalidConfig(String),
}

impl fmt::Display for GridError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidOperation { pos, reason } => {
                write!(f, "invalid operation at {pos}: {reason}")
            }
            Self::OutOfBounds(pos) => write!(f, "position {pos} is outside the grid"),
            Self::InvalidConfig(msg) => write!(f, "invalid grid configuration: {msg}"),
        }
    }
}

impl std::error::Error for GridError {}

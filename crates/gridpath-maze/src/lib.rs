//! Maze generation for gridpath grids.

pub mod maze;

pub use maze::{MazeGen, MazeOutcome};

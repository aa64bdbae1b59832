//! **gridpath-core**: grid model for shortest-path visualisation.
//!
//! This crate provides the types shared by the *gridpath* crates: geometry
//! primitives, cells and their traversal states, the square [`Grid`] with
//! its start/end designation and predecessor map, and the
//! [`StepObserver`] hook through which long-running algorithms report
//! progress to a presentation layer.

pub mod cell;
pub mod config;
pub mod error;
pub mod geom;
pub mod grid;
pub mod observer;

pub use cell::{Cell, CellState};
pub use config::GridConfig;
pub use error::GridError;
pub use geom::{Point, Range};
pub use grid::{Grid, Predecessors};
pub use observer::{NoopObserver, StepObserver};

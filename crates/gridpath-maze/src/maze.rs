//! Depth-first maze carving.
//!
//! The grid starts fully blocked. Carving walks from a corner with an
//! explicit stack: at each step it looks two cells away along each axis for
//! cells that are still barriers, picks one at random, and clears it along
//! with the wall cell in between. When the top of the stack has no such
//! cell left it is popped. The result is a spanning tree over the cells at
//! even offsets from the origin, so every open cell is reachable from every
//! other.

use gridpath_core::{CellState, Grid, GridError, Point, StepObserver};
use rand::Rng;

/// Result of a maze generation run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MazeOutcome {
    /// Cells turned from barrier to empty, the origin included.
    pub carved: usize,
    /// `false` if the observer stopped the run early.
    pub completed: bool,
}

/// Maze generator over a [`Grid`].
pub struct MazeGen<R: Rng> {
    pub rng: R,
    stack: Vec<Point>,
    nbuf: Vec<Point>,
}

impl<R: Rng> MazeGen<R> {
    /// Create a generator drawing from `rng`.
    pub fn new(rng: R) -> Self {
        Self {
            rng,
            stack: Vec::new(),
            nbuf: Vec::with_capacity(4),
        }
    }

    /// Carve a maze starting from the top-left corner.
    ///
    /// Resets the grid first: start, end and any previous search output are
    /// gone afterwards, and the caller places new endpoints on open cells.
    /// `observer` runs after every carve step and may stop the run. An empty
    /// grid is left as is.
    pub fn generate<O: StepObserver>(&mut self, grid: &mut Grid, observer: O) -> MazeOutcome {
        if grid.is_empty() {
            return MazeOutcome {
                carved: 0,
                completed: true,
            };
        }
        self.carve(grid, Point::ZERO, observer)
    }

    /// Carve a maze starting from `origin`.
    pub fn generate_from<O: StepObserver>(
        &mut self,
        grid: &mut Grid,
        origin: Point,
        observer: O,
    ) -> Result<MazeOutcome, GridError> {
        if !grid.contains(origin) {
            return Err(GridError::OutOfBounds(origin));
        }
        Ok(self.carve(grid, origin, observer))
    }

    /// Carve loop; `origin` is in bounds.
    fn carve<O: StepObserver>(
        &mut self,
        grid: &mut Grid,
        origin: Point,
        mut observer: O,
    ) -> MazeOutcome {
        log::debug!("maze: carving {}x{} from {origin}", grid.rows(), grid.columns());

        grid.reset();
        grid.fill(CellState::Barrier);

        self.stack.clear();
        grid.mark(origin, CellState::Empty);
        self.stack.push(origin);
        let mut carved = 1usize;

        let mut nbuf = std::mem::take(&mut self.nbuf);
        let mut completed = true;

        while let Some(&current) = self.stack.last() {
            nbuf.clear();
            grid.neighbors_at(current, 2, &mut nbuf);
            nbuf.retain(|&p| grid.state(p) == Some(CellState::Barrier));

            if nbuf.is_empty() {
                self.stack.pop();
                continue;
            }

            let next = nbuf[self.rng.random_range(0..nbuf.len())];
            grid.mark(current.midpoint(next), CellState::Empty);
            grid.mark(next, CellState::Empty);
            carved += 2;
            self.stack.push(next);

            if !observer.step(grid) {
                completed = false;
                break;
            }
        }

        self.nbuf = nbuf;
        log::debug!("maze: carved {carved} cells, completed={completed}");
        MazeOutcome { carved, completed }
    }
}

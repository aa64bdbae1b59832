//! Shortest-path search on a 4-connected unit grid.
//!
//! All searches run through [`PathSearch`], which reuses its node caches
//! between runs and writes results straight into the
//! [`Grid`](gridpath_core::Grid): cell markings for display and the
//! predecessor map for path reconstruction.
//!
//! - **Dijkstra** ([`PathSearch::dijkstra`]) with lazy deletion
//! - **A\*** ([`PathSearch::astar`]) with a pluggable [`Heuristic`]
//! - **Path reconstruction** ([`mark_path`], [`path_points`])
//! - **Reachability** flood fill ([`PathSearch::reachable`])
//!
//! A* defaults to the [`Euclidean`] heuristic; [`Manhattan`] is exact on
//! open grids. Both are admissible, so A* and Dijkstra find paths of the
//! same length; they differ in how many cells they expand.
//!
//! ```
//! use gridpath_core::{Grid, NoopObserver, Point};
//! use gridpath_search::{mark_path, run_astar};
//!
//! let mut grid = Grid::new(5, 16);
//! grid.set_start(Point::at(0, 0)).unwrap();
//! grid.set_end(Point::at(4, 4)).unwrap();
//! let outcome = run_astar(&mut grid, NoopObserver).unwrap();
//! assert_eq!(outcome.cost(), Some(8));
//! assert_eq!(mark_path(&mut grid, false).unwrap(), 7);
//! ```

mod astar;
mod dijkstra;
mod distance;
mod path;
mod reach;
mod search;
mod traits;

use gridpath_core::{Grid, StepObserver};

pub use distance::{euclidean, manhattan};
pub use path::{PathError, mark_path, path_points};
pub use search::{PathSearch, SearchError, SearchOutcome, SearchStats, UNREACHABLE};
pub use traits::{Euclidean, Heuristic, Manhattan};

/// Run Dijkstra on `grid` with a fresh engine.
pub fn run_dijkstra<O: StepObserver>(
    grid: &mut Grid,
    observer: O,
) -> Result<SearchOutcome, SearchError> {
    PathSearch::new().dijkstra(grid, observer)
}

/// Run A* with the [`Euclidean`] heuristic on `grid` with a fresh engine.
pub fn run_astar<O: StepObserver>(
    grid: &mut Grid,
    observer: O,
) -> Result<SearchOutcome, SearchError> {
    PathSearch::new().astar(grid, &Euclidean, observer)
}

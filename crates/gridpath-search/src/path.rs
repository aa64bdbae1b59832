//! Path reconstruction from the grid's predecessor map.

use std::fmt;

use gridpath_core::{CellState, Grid, Point};

/// Errors from walking a predecessor chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathError {
    /// The grid has no start or no end cell.
    MissingEndpoint,
    /// The latest search did not reach the end (no path, or cancelled).
    Incomplete,
    /// The chain from the end does not lead back to the start within
    /// `rows × columns` steps: a link is missing or the chain loops.
    Broken { at: Point, steps: usize },
}

impl fmt::Display for PathError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingEndpoint => write!(f, "path needs both a start and an end cell"),
            Self::Incomplete => write!(f, "the last search did not reach the end cell"),
            Self::Broken { at, steps } => {
                write!(f, "broken predecessor chain at {at} after {steps} steps")
            }
        }
    }
}

impl std::error::Error for PathError {}

/// Cells strictly between end and start, walking from the end.
///
/// The walk is iterative and bounded by the number of cells in the grid.
fn walk(grid: &Grid) -> Result<Vec<Point>, PathError> {
    let (Some(start), Some(end)) = (grid.start(), grid.end()) else {
        return Err(PathError::MissingEndpoint);
    };
    let preds = grid.predecessors();
    if !preds.is_complete() {
        return Err(PathError::Incomplete);
    }

    let max_steps = grid.len();
    let mut chain = Vec::new();
    let mut cur = end;
    for steps in 0..max_steps {
        let prev = grid.index(cur).and_then(|i| preds.get(i));
        let Some(prev) = prev else {
            log::warn!("predecessor chain has no link at {cur}");
            return Err(PathError::Broken { at: cur, steps });
        };
        if prev == start {
            return Ok(chain);
        }
        chain.push(prev);
        cur = prev;
    }
    log::warn!("predecessor chain exceeds {max_steps} steps");
    Err(PathError::Broken {
        at: cur,
        steps: max_steps,
    })
}

/// Mark the shortest path found by the latest search.
///
/// Walks back from the end to the start (both excluded) and sets each cell
/// to `Path`, or back to `Closed` when `erase` is set (used to clear a
/// stale overlay before the endpoints move). The whole chain is checked
/// before any cell changes, so on error the grid is untouched. Returns the
/// number of cells visited.
pub fn mark_path(grid: &mut Grid, erase: bool) -> Result<usize, PathError> {
    let chain = walk(grid)?;
    let state = if erase {
        CellState::Closed
    } else {
        CellState::Path
    };
    for &p in chain.iter() {
        grid.mark(p, state);
    }
    log::debug!("mark_path: {} cells set to {state}", chain.len());
    Ok(chain.len())
}

/// The full path from start to end, both included.
pub fn path_points(grid: &Grid) -> Result<Vec<Point>, PathError> {
    let mut chain = walk(grid)?;
    let (Some(start), Some(end)) = (grid.start(), grid.end()) else {
        return Err(PathError::MissingEndpoint);
    };
    chain.push(start);
    chain.reverse();
    chain.push(end);
    Ok(chain)
}

#[cfg(test)]
mod tests {
    use gridpath_core::NoopObserver;

    use super::*;
    use crate::PathSearch;

    fn solved(rows: i32, start: Point, end: Point) -> Grid {
        let mut g = Grid::new(rows, 10);
        g.set_start(start).unwrap();
        g.set_end(end).unwrap();
        assert!(PathSearch::new().dijkstra(&mut g, NoopObserver).unwrap().is_found());
        g
    }

    #[test]
    fn marks_interior_cells_only() {
        let mut g = solved(5, Point::at(0, 0), Point::at(4, 4));
        assert_eq!(mark_path(&mut g, false).unwrap(), 7);
        assert_eq!(g.count(CellState::Path), 7);
        assert_eq!(g.state(Point::at(0, 0)), Some(CellState::Start));
        assert_eq!(g.state(Point::at(4, 4)), Some(CellState::End));
    }

    #[test]
    fn path_points_are_connected() {
        let g = solved(6, Point::at(5, 1), Point::at(0, 4));
        let path = path_points(&g).unwrap();
        assert_eq!(path.first(), Some(&Point::at(5, 1)));
        assert_eq!(path.last(), Some(&Point::at(0, 4)));
        assert_eq!(path.len(), 9);
        for w in path.windows(2) {
            assert_eq!(crate::manhattan(w[0], w[1]), 1);
        }
    }

    #[test]
    fn erase_restores_only_the_chain() {
        let mut g = solved(5, Point::at(0, 0), Point::at(4, 4));
        let before: Vec<CellState> = g.cells().map(|c| c.state).collect();
        let path = path_points(&g).unwrap();

        mark_path(&mut g, false).unwrap();
        mark_path(&mut g, true).unwrap();

        assert_eq!(g.count(CellState::Path), 0);
        for (c, old) in g.cells().zip(before) {
            if path.contains(&c.pos()) {
                assert_ne!(c.state, CellState::Path);
            } else {
                assert_eq!(c.state, old);
            }
        }
    }

    #[test]
    fn adjacent_endpoints_mark_nothing() {
        let mut g = solved(3, Point::at(1, 1), Point::at(1, 2));
        assert_eq!(mark_path(&mut g, false).unwrap(), 0);
        assert_eq!(path_points(&g).unwrap().len(), 2);
    }

    #[test]
    fn no_path_refuses_marking() {
        let mut g = Grid::new(3, 1);
        g.set_start(Point::at(0, 0)).unwrap();
        g.set_end(Point::at(0, 2)).unwrap();
        for r in 0..3 {
            g.set_barrier(Point::at(r, 1)).unwrap();
        }
        let outcome = PathSearch::new().dijkstra(&mut g, NoopObserver).unwrap();
        assert!(!outcome.is_found());
        assert_eq!(mark_path(&mut g, false), Err(PathError::Incomplete));
        assert_eq!(g.count(CellState::Path), 0);
    }

    #[test]
    fn missing_endpoint() {
        let mut g = Grid::new(3, 1);
        g.set_start(Point::at(0, 0)).unwrap();
        assert_eq!(mark_path(&mut g, false), Err(PathError::MissingEndpoint));
    }

    #[test]
    fn missing_link_is_broken() {
        let mut g = Grid::new(3, 1);
        g.set_start(Point::at(0, 0)).unwrap();
        g.set_end(Point::at(2, 2)).unwrap();
        let end_idx = g.index(Point::at(2, 2)).unwrap();
        g.predecessors_mut().set(end_idx, Point::at(1, 2));
        g.predecessors_mut().set_complete();

        let err = mark_path(&mut g, false).unwrap_err();
        assert_eq!(
            err,
            PathError::Broken {
                at: Point::at(1, 2),
                steps: 1
            }
        );
        assert_eq!(g.count(CellState::Path), 0);
    }

    #[test]
    fn cycle_is_detected_within_bound() {
        let mut g = Grid::new(3, 1);
        g.set_start(Point::at(0, 0)).unwrap();
        g.set_end(Point::at(2, 2)).unwrap();
        let a = Point::at(1, 1);
        let b = Point::at(1, 2);
        let end_idx = g.index(Point::at(2, 2)).unwrap();
        let a_idx = g.index(a).unwrap();
        let b_idx = g.index(b).unwrap();
        g.predecessors_mut().set(end_idx, b);
        g.predecessors_mut().set(b_idx, a);
        g.predecessors_mut().set(a_idx, b);
        g.predecessors_mut().set_complete();

        assert!(matches!(
            path_points(&g),
            Err(PathError::Broken { steps: 9, .. })
        ));
        assert!(mark_path(&mut g, false).is_err());
        assert_eq!(g.count(CellState::Path), 0);
    }
}

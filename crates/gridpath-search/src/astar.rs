use gridpath_core::{CellState, Grid, StepObserver};

use crate::search::{PathSearch, SearchError, SearchOutcome, SearchStats};
use crate::traits::Heuristic;

impl PathSearch {
    /// Shortest path from the grid's start to its end with A*.
    ///
    /// The frontier is ordered by `f = g + heuristic`, then by insertion
    /// order. A cell is in the frontier at most once: when a queued cell's
    /// `g` drops it gets a new entry with the lower `f` and the old one is
    /// skipped when popped. Closed cells are not final: if a later
    /// relaxation finds a shorter `g` for one, it is re-opened and queued
    /// again, so an admissible but inconsistent heuristic still yields a
    /// shortest path.
    ///
    /// Cell markings, observer calls and outcomes follow
    /// [`dijkstra`](Self::dijkstra).
    pub fn astar<H: Heuristic, O: StepObserver>(
        &mut self,
        grid: &mut Grid,
        heuristic: &H,
        mut observer: O,
    ) -> Result<SearchOutcome, SearchError> {
        let (start, end) = self.begin(grid)?;
        log::debug!("astar: {start} -> {end} on {}x{}", grid.rows(), grid.columns());

        let Some(start_idx) = grid.index(start) else {
            return Err(SearchError::MissingEndpoint { start: None, end: Some(end) });
        };
        let Some(goal_idx) = grid.index(end) else {
            return Err(SearchError::MissingEndpoint { start: Some(start), end: None });
        };

        let mut stats = SearchStats::default();
        let start_entry = self.push(start_idx, heuristic.estimate(start, end), &mut stats);
        {
            let node = self.node_mut(start_idx);
            node.g = 0;
            node.queued = true;
            node.entry = start_entry;
        }

        let mut nbuf = std::mem::take(&mut self.nbuf);

        let outcome = loop {
            let Some(current) = self.open.pop() else {
                break SearchOutcome::NoPath { stats };
            };

            let ci = current.idx;
            let current_g = {
                let n = self.node_mut(ci);
                // Superseded by a later entry, or already expanded.
                if !n.queued || n.entry != current.seq {
                    continue;
                }
                n.queued = false;
                n.g
            };
            let cp = grid.point(ci);

            if ci == goal_idx {
                grid.predecessors_mut().set_complete();
                break SearchOutcome::Found {
                    cost: current_g,
                    stats,
                };
            }

            nbuf.clear();
            grid.neighbors(cp, &mut nbuf);

            for &np in nbuf.iter() {
                let Some(ni) = grid.index(np) else {
                    continue;
                };
                if grid.state(np) == Some(CellState::Barrier) {
                    continue;
                }

                let tentative = current_g + 1;
                let f = f64::from(tentative) + heuristic.estimate(np, end);
                let n = self.node_mut(ni);
                if tentative >= n.g {
                    continue;
                }
                n.g = tentative;
                let was_queued = n.queued;
                let reopened = std::mem::replace(&mut n.closed, false);
                n.queued = true;
                grid.predecessors_mut().set(ni, cp);

                let entry = if was_queued {
                    self.requeue(ni, f)
                } else {
                    if reopened {
                        log::trace!("astar: reopened {np} with g={tentative}");
                    }
                    grid.mark(np, CellState::Open);
                    self.push(ni, f, &mut stats)
                };
                self.node_mut(ni).entry = entry;
            }

            self.node_mut(ci).closed = true;
            grid.mark(cp, CellState::Closed);

            stats.expanded += 1;
            log::trace!("astar: expanded {cp} with g={current_g}");

            if !observer.step(grid) {
                break SearchOutcome::Cancelled { stats };
            }
        };

        self.nbuf = nbuf;
        log::debug!("astar: {outcome}");
        Ok(outcome)
    }
}

#[cfg(test)]
mod tests {
    use gridpath_core::{Grid, NoopObserver, Point};

    use super::*;
    use crate::distance::manhattan;
    use crate::path::path_points;
    use crate::traits::{Euclidean, Manhattan};

    fn open_grid(rows: i32, start: Point, end: Point) -> Grid {
        let mut g = Grid::new(rows, 10);
        g.set_start(start).unwrap();
        g.set_end(end).unwrap();
        g
    }

    #[test]
    fn open_grid_corner_to_corner() {
        let mut g = open_grid(5, Point::at(0, 0), Point::at(4, 4));
        let outcome = PathSearch::new()
            .astar(&mut g, &Euclidean, NoopObserver)
            .unwrap();
        assert_eq!(outcome.cost(), Some(8));
        assert_eq!(path_points(&g).unwrap().len(), 9);
    }

    #[test]
    fn open_grid_matches_manhattan_distance() {
        let pairs = [
            (Point::at(0, 0), Point::at(7, 7)),
            (Point::at(3, 6), Point::at(3, 0)),
            (Point::at(7, 1), Point::at(0, 4)),
            (Point::at(2, 2), Point::at(5, 3)),
        ];
        let mut ps = PathSearch::new();
        for (s, e) in pairs {
            let mut g = open_grid(8, s, e);
            let euclid = ps.astar(&mut g, &Euclidean, NoopObserver).unwrap();
            assert_eq!(euclid.cost(), Some(manhattan(s, e)));
            assert_eq!(path_points(&g).unwrap().len() as i32, manhattan(s, e) + 1);

            let manh = ps.astar(&mut g, &Manhattan, NoopObserver).unwrap();
            assert_eq!(manh.cost(), Some(manhattan(s, e)));
        }
    }

    #[test]
    fn detour_around_barrier() {
        let mut g = open_grid(3, Point::at(0, 0), Point::at(0, 2));
        g.set_barrier(Point::at(0, 1)).unwrap();
        let outcome = PathSearch::new()
            .astar(&mut g, &Euclidean, NoopObserver)
            .unwrap();
        assert_eq!(outcome.cost(), Some(4));
        assert!(!path_points(&g).unwrap().contains(&Point::at(0, 1)));
    }

    #[test]
    fn full_wall_means_no_path() {
        let mut g = open_grid(3, Point::at(0, 0), Point::at(0, 2));
        for r in 0..3 {
            g.set_barrier(Point::at(r, 1)).unwrap();
        }
        let outcome = PathSearch::new()
            .astar(&mut g, &Euclidean, NoopObserver)
            .unwrap();
        assert!(matches!(outcome, SearchOutcome::NoPath { .. }));
        assert!(!g.predecessors().is_complete());
    }

    #[test]
    fn heuristic_guides_expansion() {
        // A* should expand no more cells than Dijkstra on an open grid.
        let mut g = open_grid(12, Point::at(0, 0), Point::at(11, 11));
        let mut ps = PathSearch::new();
        let d = ps.dijkstra(&mut g, NoopObserver).unwrap();
        let a = ps.astar(&mut g, &Euclidean, NoopObserver).unwrap();
        assert_eq!(d.cost(), a.cost());
        assert!(a.stats().expanded <= d.stats().expanded);
    }

    #[test]
    fn custom_heuristic_closure() {
        let mut g = open_grid(6, Point::at(0, 5), Point::at(5, 0));
        let zero = |_: Point, _: Point| 0.0;
        let outcome = PathSearch::new().astar(&mut g, &zero, NoopObserver).unwrap();
        assert_eq!(outcome.cost(), Some(10));
    }

    #[test]
    fn lowered_queued_cell_moves_up_the_frontier() {
        // ....
        // #S5.
        // E#4.
        // ....
        // (2,2) is first queued with g=6 from the long way round, then
        // lowered to g=2 through (1,2). Its old f=10 would let the end be
        // reached at cost 8 before the short branch is expanded.
        let mut g = open_grid(4, Point::at(1, 1), Point::at(2, 0));
        g.set_barrier(Point::at(1, 0)).unwrap();
        g.set_barrier(Point::at(2, 1)).unwrap();
        let h = |p: Point, _: Point| match (p.row(), p.column()) {
            (1, 2) => 5.0,
            (2, 2) => 4.0,
            _ => 0.0,
        };

        let mut ps = PathSearch::new();
        let d = ps.dijkstra(&mut g, NoopObserver).unwrap();
        assert_eq!(d.cost(), Some(6));

        let a = ps.astar(&mut g, &h, NoopObserver).unwrap();
        assert_eq!(a.cost(), Some(6));
        let path = path_points(&g).unwrap();
        assert_eq!(path.len(), 7);
        assert!(path.contains(&Point::at(2, 2)));
        assert_eq!(ps.distance(&g, Point::at(2, 2)), 2);
    }

    #[test]
    fn reopened_cells_are_expanded_again() {
        // Same layout; (1,3) and (2,3) are closed on the long way round and
        // re-opened once the cheaper branch through (1,2) is found.
        let mut g = open_grid(4, Point::at(1, 1), Point::at(2, 0));
        g.set_barrier(Point::at(1, 0)).unwrap();
        g.set_barrier(Point::at(2, 1)).unwrap();
        let h = |p: Point, _: Point| match (p.row(), p.column()) {
            (1, 2) => 5.0,
            (2, 2) => 4.0,
            _ => 0.0,
        };
        let outcome = PathSearch::new().astar(&mut g, &h, NoopObserver).unwrap();
        assert!(outcome.is_found());
        // More expansions than reachable non-end cells means some cell was
        // expanded twice.
        assert!(outcome.stats().expanded > g.len() - 3);
    }

    #[test]
    fn no_duplicate_frontier_entries() {
        let mut g = open_grid(10, Point::at(0, 0), Point::at(9, 9));
        let outcome = PathSearch::new()
            .astar(&mut g, &Manhattan, NoopObserver)
            .unwrap();
        // Every push adds a distinct cell, so there are at most as many
        // pushes as cells.
        assert!(outcome.stats().pushed <= g.len());
    }

    #[test]
    fn endpoints_keep_their_state() {
        let mut g = open_grid(4, Point::at(3, 0), Point::at(0, 3));
        PathSearch::new()
            .astar(&mut g, &Euclidean, NoopObserver)
            .unwrap();
        assert_eq!(g.state(Point::at(3, 0)), Some(CellState::Start));
        assert_eq!(g.state(Point::at(0, 3)), Some(CellState::End));
    }

    #[test]
    fn cancel_leaves_partial_markings() {
        let mut g = open_grid(8, Point::at(0, 0), Point::at(7, 7));
        let outcome = PathSearch::new()
            .astar(&mut g, &Euclidean, |_: &Grid| false)
            .unwrap();
        assert_eq!(
            outcome,
            SearchOutcome::Cancelled {
                stats: SearchStats {
                    expanded: 1,
                    pushed: 3
                }
            }
        );
        assert_eq!(g.count(CellState::Open), 2);
        assert!(!g.predecessors().is_complete());
    }

    #[test]
    fn missing_start_is_a_precondition_error() {
        let mut g = Grid::new(3, 1);
        g.set_end(Point::at(1, 1)).unwrap();
        let err = PathSearch::new()
            .astar(&mut g, &Euclidean, NoopObserver)
            .unwrap_err();
        assert!(matches!(err, SearchError::MissingEndpoint { start: None, .. }));
    }
}

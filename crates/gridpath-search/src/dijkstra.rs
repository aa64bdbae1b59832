use gridpath_core::{CellState, Grid, StepObserver};

use crate::search::{PathSearch, SearchError, SearchOutcome, SearchStats};

impl PathSearch {
    /// Shortest path from the grid's start to its end with Dijkstra's
    /// algorithm on unit edge weights.
    ///
    /// The frontier is ordered by distance, then by insertion order, and
    /// may hold several entries for one cell; entries made stale by a
    /// cheaper distance are skipped when popped. Cells are marked `Open`
    /// when discovered and `Closed` when popped (start and end keep their
    /// state). After each relaxed cell `observer` is called; returning
    /// `false` stops the run with [`SearchOutcome::Cancelled`].
    ///
    /// The predecessor map is stored on the grid and flagged complete when
    /// the end is reached.
    pub fn dijkstra<O: StepObserver>(
        &mut self,
        grid: &mut Grid,
        mut observer: O,
    ) -> Result<SearchOutcome, SearchError> {
        let (start, end) = self.begin(grid)?;
        log::debug!("dijkstra: {start} -> {end} on {}x{}", grid.rows(), grid.columns());

        let Some(start_idx) = grid.index(start) else {
            return Err(SearchError::MissingEndpoint { start: None, end: Some(end) });
        };
        let Some(goal_idx) = grid.index(end) else {
            return Err(SearchError::MissingEndpoint { start: Some(start), end: None });
        };

        let mut stats = SearchStats::default();
        self.node_mut(start_idx).g = 0;
        self.push(start_idx, 0.0, &mut stats);

        let mut nbuf = std::mem::take(&mut self.nbuf);

        let outcome = loop {
            let Some(current) = self.open.pop() else {
                break SearchOutcome::NoPath { stats };
            };

            let ci = current.idx;
            let cp = grid.point(ci);
            let (current_g, closed) = {
                let n = self.node_mut(ci);
                (n.g, n.closed)
            };
            // Lazy deletion: closed cells and superseded entries.
            if closed || current.key > f64::from(current_g) {
                continue;
            }
            if grid.state(cp) == Some(CellState::Barrier) {
                continue;
            }

            self.node_mut(ci).closed = true;
            grid.mark(cp, CellState::Closed);

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
                if grid.state(np) == Some(CellState::Barrier) || self.node_mut(ni).closed {
                    continue;
                }
                grid.mark(np, CellState::Open);

                let tentative = current_g + 1;
                let n = self.node_mut(ni);
                if tentative >= n.g {
                    continue;
                }
                n.g = tentative;
                grid.predecessors_mut().set(ni, cp);
                self.push(ni, f64::from(tentative), &mut stats);
            }

            stats.expanded += 1;
            log::trace!("dijkstra: expanded {cp} at distance {current_g}");

            if !observer.step(grid) {
                break SearchOutcome::Cancelled { stats };
            }
        };

        self.nbuf = nbuf;
        log::debug!("dijkstra: {outcome}");
        Ok(outcome)
    }
}

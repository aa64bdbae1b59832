use gridpath_core::{Grid, Point};

use crate::PathSearch;

impl PathSearch {
    /// Flood-fill from `from` over non-barrier cells.
    ///
    /// Returns every reachable position in breadth-first order, starting
    /// with `from` itself, or an empty slice if `from` is outside the grid
    /// or a barrier. Cell states are not modified.
    pub fn reachable(&mut self, grid: &Grid, from: Point) -> &[Point] {
        self.fill_results.clear();
        self.fill_queue.clear();
        self.seen.clear();
        self.seen.resize(grid.len(), false);

        let Some(si) = grid.index(from) else {
            return &self.fill_results;
        };
        if !grid.state(from).is_some_and(|s| s.is_passable()) {
            return &self.fill_results;
        }
        self.seen[si] = true;
        self.fill_queue.push_back(si);
        self.fill_results.push(from);

        let mut nbuf = std::mem::take(&mut self.nbuf);

        while let Some(ci) = self.fill_queue.pop_front() {
            let cp = grid.point(ci);
            nbuf.clear();
            grid.neighbors(cp, &mut nbuf);

            for &np in nbuf.iter() {
                let Some(ni) = grid.index(np) else {
                    continue;
                };
                if self.seen[ni] || !grid.state(np).is_some_and(|s| s.is_passable()) {
                    continue;
                }
                self.seen[ni] = true;
                self.fill_queue.push_back(ni);
                self.fill_results.push(np);
            }
        }

        self.nbuf = nbuf;
        &self.fill_results
    }

    /// Whether `to` can be reached from `from` through non-barrier cells.
    pub fn is_reachable(&mut self, grid: &Grid, from: Point, to: Point) -> bool {
        let Some(ti) = grid.index(to) else {
            return false;
        };
        self.reachable(grid, from);
        self.seen.get(ti).copied().unwrap_or(false)
    }
}

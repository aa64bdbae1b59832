//! The [`Grid`] type: a square matrix of [`Cell`]s with a start, an end and
//! the predecessor map left by the latest search.
//!
//! Cells live in a flat row-major buffer; a position's index is
//! `row * columns + column`. All maps keyed by cell (see [`Predecessors`])
//! use that index rather than cell identity.

use crate::cell::{Cell, CellState};
use crate::config::GridConfig;
use crate::error::GridError;
use crate::geom::{Point, Range};

// ---------------------------------------------------------------------------
// Predecessors
// ---------------------------------------------------------------------------

/// Predecessor map of a search: for each reached cell, the cell it was
/// reached from on the best path known when the search stopped.
///
/// The map is *complete* once a search has reached the end cell; only then
/// does the chain from the end back to the start describe a shortest path.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Predecessors {
    links: Vec<Option<Point>>,
    count: usize,
    complete: bool,
}

impl Predecessors {
    /// An empty map for a grid of `len` cells.
    pub fn new(len: usize) -> Self {
        Self {
            links: vec![None; len],
            count: 0,
            complete: false,
        }
    }

    /// Predecessor of the cell with flat index `idx`.
    #[inline]
    pub fn get(&self, idx: usize) -> Option<Point> {
        self.links.get(idx).copied().flatten()
    }

    /// Record `from` as the predecessor of the cell with index `idx`.
    /// Out-of-range indices are ignored.
    pub fn set(&mut self, idx: usize, from: Point) {
        if let Some(slot) = self.links.get_mut(idx) {
            if slot.is_none() {
                self.count += 1;
            }
            *slot = Some(from);
        }
    }

    /// Flag the map as the result of a search that reached its end cell.
    #[inline]
    pub fn set_complete(&mut self) {
        self.complete = true;
    }

    /// Whether the search that filled the map reached its end cell.
    #[inline]
    pub fn is_complete(&self) -> bool {
        self.complete
    }

    /// Drop every link, keeping capacity.
    pub fn clear(&mut self) {
        self.complete = false;
        if self.count == 0 {
            return;
        }
        for slot in self.links.iter_mut() {
            *slot = None;
        }
        self.count = 0;
    }

    /// Number of cells with a recorded predecessor.
    #[inline]
    pub fn len(&self) -> usize {
        self.count
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }
}

// ---------------------------------------------------------------------------
// Grid
// ---------------------------------------------------------------------------

/// A `rows × rows` grid of cells.
///
/// Invariants maintained by every method:
/// - at most one `Start` and at most one `End` cell, never the same cell;
/// - `start()`/`end()` always point at the cell carrying that state;
/// - dimensions never change after construction.
///
/// Cloning gives an independent copy, suitable for a what-if search.
#[derive(Debug, Clone)]
pub struct Grid {
    rows: i32,
    cell_width: i32,
    cells: Vec<Cell>,
    start: Option<Point>,
    end: Option<Point>,
    predecessors: Predecessors,
}

impl Grid {
    /// Create an all-empty grid of `rows × rows` cells. Negative sizes are
    /// clamped to zero and oversized pixel coordinates saturate; use
    /// [`from_config`](Self::from_config) for validated input.
    pub fn new(rows: i32, cell_width: i32) -> Self {
        let rows = rows.max(0);
        let cells = Self::init_cells(rows, cell_width);
        let len = cells.len();
        Self {
            rows,
            cell_width,
            cells,
            start: None,
            end: None,
            predecessors: Predecessors::new(len),
        }
    }

    /// Create a grid from a validated [`GridConfig`].
    pub fn from_config(cfg: &GridConfig) -> Result<Self, GridError> {
        cfg.validate()?;
        Ok(Self::new(cfg.rows, cfg.cell_width))
    }

    fn init_cells(rows: i32, cell_width: i32) -> Vec<Cell> {
        Range::new(0, 0, rows, rows)
            .iter()
            .map(|p| Cell::new(p.row(), p.column(), cell_width))
            .collect()
    }

    /// Number of rows.
    #[inline]
    pub fn rows(&self) -> i32 {
        self.rows
    }

    /// Number of columns (equal to rows).
    #[inline]
    pub fn columns(&self) -> i32 {
        self.rows
    }

    /// Pixel width of a cell.
    #[inline]
    pub fn cell_width(&self) -> i32 {
        self.cell_width
    }

    /// Total number of cells.
    #[inline]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// The bounding range of the grid.
    #[inline]
    pub fn bounds(&self) -> Range {
        Range::new(0, 0, self.rows, self.rows)
    }

    /// Whether `p` is inside the grid.
    #[inline]
    pub fn contains(&self, p: Point) -> bool {
        self.bounds().contains(p)
    }

    /// Flat index of `p`, or `None` if out of bounds.
    #[inline]
    pub fn index(&self, p: Point) -> Option<usize> {
        if !self.contains(p) {
            return None;
        }
        Some((p.y as usize) * (self.rows as usize) + (p.x as usize))
    }

    /// Position of the cell with flat index `idx`.
    #[inline]
    pub fn point(&self, idx: usize) -> Point {
        let w = self.rows.max(1) as usize;
        Point::new((idx % w) as i32, (idx / w) as i32)
    }

    fn index_checked(&self, p: Point) -> Result<usize, GridError> {
        self.index(p).ok_or(GridError::OutOfBounds(p))
    }

    /// The cell at `p`, or `None` if out of bounds.
    #[inline]
    pub fn cell(&self, p: Point) -> Option<&Cell> {
        self.index(p).map(|i| &self.cells[i])
    }

    /// State of the cell at `p`, or `None` if out of bounds.
    #[inline]
    pub fn state(&self, p: Point) -> Option<CellState> {
        self.cell(p).map(|c| c.state)
    }

    /// Row-major iterator over all cells.
    pub fn cells(&self) -> impl ExactSizeIterator<Item = &Cell> + '_ {
        self.cells.iter()
    }

    /// Count cells in the given state.
    pub fn count(&self, state: CellState) -> usize {
        self.cells.iter().filter(|c| c.state == state).count()
    }

    /// Current start cell.
    #[inline]
    pub fn start(&self) -> Option<Point> {
        self.start
    }

    /// Current end cell.
    #[inline]
    pub fn end(&self) -> Option<Point> {
        self.end
    }

    /// Predecessor map of the latest search (empty before any search).
    #[inline]
    pub fn predecessors(&self) -> &Predecessors {
        &self.predecessors
    }

    /// Mutable access to the predecessor map, used by search engines.
    #[inline]
    pub fn predecessors_mut(&mut self) -> &mut Predecessors {
        &mut self.predecessors
    }

    // -----------------------------------------------------------------------
    // Endpoints and barriers
    // -----------------------------------------------------------------------

    /// Make `p` the start cell. The previous start, if any, becomes empty.
    ///
    /// Fails if `p` is the current end cell.
    pub fn set_start(&mut self, p: Point) -> Result<(), GridError> {
        let idx = self.index_checked(p)?;
        if self.end == Some(p) {
            return Err(GridError::InvalidOperation {
                pos: p,
                reason: "start cannot be the end cell",
            });
        }
        if let Some(old) = self.start.replace(p) {
            if let Some(oi) = self.index(old) {
                self.cells[oi].state = CellState::Empty;
            }
        }
        self.cells[idx].state = CellState::Start;
        Ok(())
    }

    /// Make `p` the end cell. The previous end, if any, becomes empty.
    ///
    /// Fails if `p` is the current start cell.
    pub fn set_end(&mut self, p: Point) -> Result<(), GridError> {
        let idx = self.index_checked(p)?;
        if self.start == Some(p) {
            return Err(GridError::InvalidOperation {
                pos: p,
                reason: "end cannot be the start cell",
            });
        }
        if let Some(old) = self.end.replace(p) {
            if let Some(oi) = self.index(old) {
                self.cells[oi].state = CellState::Empty;
            }
        }
        self.cells[idx].state = CellState::End;
        Ok(())
    }

    /// Turn `p` into a barrier. Start and end cells cannot be blocked.
    pub fn set_barrier(&mut self, p: Point) -> Result<(), GridError> {
        let idx = self.index_checked(p)?;
        if self.cells[idx].state.is_endpoint() {
            return Err(GridError::InvalidOperation {
                pos: p,
                reason: "start and end cells cannot be barriers",
            });
        }
        self.cells[idx].state = CellState::Barrier;
        Ok(())
    }

    /// Flip `p` between barrier and empty. Returns whether `p` is a barrier
    /// afterwards.
    pub fn toggle_barrier(&mut self, p: Point) -> Result<bool, GridError> {
        let idx = self.index_checked(p)?;
        if self.cells[idx].state == CellState::Barrier {
            self.cells[idx].state = CellState::Empty;
            return Ok(false);
        }
        self.set_barrier(p)?;
        Ok(true)
    }

    /// Reset `p` to empty. Clearing the start or end cell unsets it.
    pub fn clear_cell(&mut self, p: Point) -> Result<(), GridError> {
        let idx = self.index_checked(p)?;
        if self.start == Some(p) {
            self.start = None;
        } else if self.end == Some(p) {
            self.end = None;
        }
        self.cells[idx].state = CellState::Empty;
        Ok(())
    }

    /// Set the display state of a non-endpoint cell.
    ///
    /// This is the setter used by search and generation algorithms. Start
    /// and end cells keep their state, and `Start`/`End` cannot be set
    /// through it. Returns whether the cell changed.
    pub fn mark(&mut self, p: Point, state: CellState) -> bool {
        if state.is_endpoint() {
            return false;
        }
        let Some(idx) = self.index(p) else {
            return false;
        };
        let cell = &mut self.cells[idx];
        if cell.state.is_endpoint() || cell.state == state {
            return false;
        }
        cell.state = state;
        true
    }

    // -----------------------------------------------------------------------
    // Adjacency
    // -----------------------------------------------------------------------

    /// Append the in-bounds cells directly above, below, left and right of
    /// `p` to `buf`, in that order. The caller clears `buf` before calling.
    #[inline]
    pub fn neighbors(&self, p: Point, buf: &mut Vec<Point>) {
        self.neighbors_at(p, 1, buf);
    }

    /// Like [`neighbors`](Self::neighbors) but for cells exactly `k` steps
    /// away along one axis.
    pub fn neighbors_at(&self, p: Point, k: i32, buf: &mut Vec<Point>) {
        for n in p.axis_neighbors(k) {
            if self.contains(n) {
                buf.push(n);
            }
        }
    }

    // -----------------------------------------------------------------------
    // Resets
    // -----------------------------------------------------------------------

    /// Discard every cell state, the endpoints and the predecessor map.
    pub fn reset(&mut self) {
        self.cells = Self::init_cells(self.rows, self.cell_width);
        self.start = None;
        self.end = None;
        self.predecessors.clear();
    }

    /// Clear search output only: Open, Closed and Path cells become empty
    /// and the predecessor map is dropped. Start, end and barriers stay.
    pub fn reset_discovered(&mut self) {
        let mut cleared = 0usize;
        for c in self.cells.iter_mut() {
            if c.state.is_discovered() {
                c.state = CellState::Empty;
                cleared += 1;
            }
        }
        self.predecessors.clear();
        log::trace!("reset_discovered: {cleared} cells cleared");
    }

    /// Set every cell to `state`, dropping the endpoints. Used by
    /// generators that start from a fully blocked grid.
    pub fn fill(&mut self, state: CellState) {
        if state.is_endpoint() {
            return;
        }
        self.start = None;
        self.end = None;
        self.predecessors.clear();
        for c in self.cells.iter_mut() {
            c.state = state;
        }
    }

    /// Render the grid as rows of [`CellState::glyph`] characters.
    pub fn to_ascii(&self) -> String {
        let mut s = String::with_capacity(self.cells.len() + self.rows as usize);
        for (i, c) in self.cells.iter().enumerate() {
            if i > 0 && c.column == 0 {
                s.push('\n');
            }
            s.push(c.state.glyph());
        }
        s
    }
}

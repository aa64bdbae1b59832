use std::collections::BinaryHeap;
use std::fmt;

use gridpath_core::{Grid, Point};

/// Sentinel distance meaning "not reached".
pub const UNREACHABLE: i32 = i32::MAX;

// ---------------------------------------------------------------------------
// Outcome
// ---------------------------------------------------------------------------

/// Counters collected during one search run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SearchStats {
    /// Cells popped from the frontier and relaxed.
    pub expanded: usize,
    /// Frontier insertions, including the start cell.
    pub pushed: usize,
}

/// How a search run ended. None of these is an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SearchOutcome {
    /// The end cell was reached; `cost` is the number of steps from start.
    /// The grid's predecessor map encodes the path.
    Found { cost: i32, stats: SearchStats },
    /// The frontier ran dry: the end cannot be reached. The predecessor map
    /// is incomplete.
    NoPath { stats: SearchStats },
    /// The step observer asked to stop. Cell markings are partial and the
    /// predecessor map must not be used for path marking.
    Cancelled { stats: SearchStats },
}

impl SearchOutcome {
    #[inline]
    pub fn is_found(&self) -> bool {
        matches!(self, Self::Found { .. })
    }

    /// Path cost if the end was reached.
    #[inline]
    pub fn cost(&self) -> Option<i32> {
        match self {
            Self::Found { cost, .. } => Some(*cost),
            _ => None,
        }
    }

    #[inline]
    pub fn stats(&self) -> SearchStats {
        match self {
            Self::Found { stats, .. } | Self::NoPath { stats } | Self::Cancelled { stats } => {
                *stats
            }
        }
    }
}

impl fmt::Display for SearchOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = self.stats();
        match self {
            Self::Found { cost, .. } => write!(
                f,
                "found path of {cost} steps ({} expanded, {} pushed)",
                s.expanded, s.pushed
            ),
            Self::NoPath { .. } => write!(f, "no path ({} expanded)", s.expanded),
            Self::Cancelled { .. } => write!(f, "cancelled after {} steps", s.expanded),
        }
    }
}

/// A search could not start.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchError {
    /// The grid has no start or no end cell.
    MissingEndpoint { start: Option<Point>, end: Option<Point> },
}

impl fmt::Display for SearchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingEndpoint { start, end } => {
                let missing = match (start, end) {
                    (None, None) => "start and end",
                    (None, Some(_)) => "start",
                    _ => "end",
                };
                write!(f, "cannot search: {missing} not set")
            }
        }
    }
}

impl std::error::Error for SearchError {}

// ---------------------------------------------------------------------------
// Internal node for the priority-queue searches
// ---------------------------------------------------------------------------

#[derive(Clone)]
pub(crate) struct Node {
    pub(crate) g: i32,
    pub(crate) generation: u32,
    /// Popped and relaxed during this run.
    pub(crate) closed: bool,
    /// Currently waiting in the frontier (A* membership set).
    pub(crate) queued: bool,
    /// Insertion number of the cell's live frontier entry; older entries
    /// for the same cell are superseded.
    pub(crate) entry: u64,
}

impl Node {
    fn fresh(generation: u32) -> Self {
        Self {
            g: UNREACHABLE,
            generation,
            closed: false,
            queued: false,
            entry: 0,
        }
    }
}

impl Default for Node {
    fn default() -> Self {
        Self::fresh(0)
    }
}

/// Frontier entry: ordered by `key`, then by insertion sequence, so that
/// among equal keys the earliest pushed entry pops first.
#[derive(Clone, Copy, Debug)]
pub(crate) struct NodeRef {
    pub(crate) idx: usize,
    pub(crate) key: f64,
    pub(crate) seq: u64,
}

impl Ord for NodeRef {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        // Reverse so BinaryHeap (max-heap) pops smallest key, then oldest.
        other
            .key
            .total_cmp(&self.key)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

impl PartialOrd for NodeRef {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for NodeRef {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == std::cmp::Ordering::Equal
    }
}

impl Eq for NodeRef {}

// ---------------------------------------------------------------------------
// PathSearch
// ---------------------------------------------------------------------------

/// Search engine running Dijkstra and A* over a [`Grid`].
///
/// `PathSearch` owns its node array, frontier and scratch buffers and
/// reuses them between runs: nodes are invalidated lazily by bumping a
/// generation counter, so repeated searches on same-sized grids do not
/// allocate. One engine serves one search at a time; run concurrent
/// what-if searches with separate engines on cloned grids.
#[derive(Default)]
pub struct PathSearch {
    pub(crate) nodes: Vec<Node>,
    pub(crate) generation: u32,
    pub(crate) seq: u64,
    pub(crate) open: BinaryHeap<NodeRef>,
    // flood-fill caches
    pub(crate) seen: Vec<bool>,
    pub(crate) fill_queue: std::collections::VecDeque<usize>,
    pub(crate) fill_results: Vec<Point>,
    // shared scratch buffer for neighbor queries
    pub(crate) nbuf: Vec<Point>,
}

impl PathSearch {
    /// Create an engine with empty caches; they grow on first use.
    pub fn new() -> Self {
        Self {
            nbuf: Vec::with_capacity(4),
            ..Self::default()
        }
    }

    /// Start a new run over a grid of `len` cells.
    pub(crate) fn prepare(&mut self, len: usize) {
        if self.nodes.len() < len {
            self.nodes.resize(len, Node::default());
        }
        self.generation = self.generation.wrapping_add(1);
        if self.generation == 0 {
            // Wrapped: nodes from generation 0 would look current.
            for n in self.nodes.iter_mut() {
                *n = Node::fresh(u32::MAX);
            }
            self.generation = 1;
        }
        self.seq = 0;
        self.open.clear();
    }

    /// Node for `idx`, reset first if it belongs to an earlier run.
    #[inline]
    pub(crate) fn node_mut(&mut self, idx: usize) -> &mut Node {
        let cur_gen = self.generation;
        let n = &mut self.nodes[idx];
        if n.generation != cur_gen {
            *n = Node::fresh(cur_gen);
        }
        n
    }

    /// Insert `idx` into the frontier with the next insertion number, which
    /// is returned.
    #[inline]
    pub(crate) fn push(&mut self, idx: usize, key: f64, stats: &mut SearchStats) -> u64 {
        stats.pushed += 1;
        self.requeue(idx, key)
    }

    /// Add a fresh entry for a cell that is already in the frontier, with
    /// an updated key. Not counted as an insertion.
    #[inline]
    pub(crate) fn requeue(&mut self, idx: usize, key: f64) -> u64 {
        let seq = self.seq;
        self.seq += 1;
        self.open.push(NodeRef { idx, key, seq });
        seq
    }

    /// Shared prologue of every search: check the endpoints, clear the
    /// previous run's markings and predecessors, and reset the caches.
    ///
    /// Returns the start and end positions.
    pub(crate) fn begin(&mut self, grid: &mut Grid) -> Result<(Point, Point), SearchError> {
        let (Some(start), Some(end)) = (grid.start(), grid.end()) else {
            return Err(SearchError::MissingEndpoint {
                start: grid.start(),
                end: grid.end(),
            });
        };
        grid.reset_discovered();
        self.prepare(grid.len());
        Ok((start, end))
    }

    /// Best-known distance from the start to `p` after the latest run, or
    /// [`UNREACHABLE`].
    pub fn distance(&self, grid: &Grid, p: Point) -> i32 {
        match grid.index(p).and_then(|i| self.nodes.get(i)) {
            Some(n) if n.generation == self.generation => n.g,
            _ => UNREACHABLE,
        }
    }
}


#[cfg(all(test, feature = "serde"))]
mod serde_tests {
    use super::*;

    #[test]
    fn outcome_round_trip() {
        let stats = SearchStats {
            expanded: 12,
            pushed: 19,
        };
        for outcome in [
            SearchOutcome::Found { cost: 8, stats },
            SearchOutcome::NoPath { stats },
            SearchOutcome::Cancelled { stats },
        ] {
            let json = serde_json::to_string(&outcome).unwrap();
            let back: SearchOutcome = serde_json::from_str(&json).unwrap();
            assert_eq!(outcome, back);
        }
    }

    #[test]
    fn stats_field_names() {
        let json = serde_json::to_value(SearchStats {
            expanded: 3,
            pushed: 4,
        })
        .unwrap();
        assert_eq!(json["expanded"], 3);
        assert_eq!(json["pushed"], 4);
    }
}

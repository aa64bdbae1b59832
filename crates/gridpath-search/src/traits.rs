use gridpath_core::Point;

use crate::distance;

/// Distance estimate guiding A* toward the end cell.
///
/// Must never overestimate the number of 4-connected unit steps from
/// `from` to `to` (admissible), or A* may return a longer path.
pub trait Heuristic {
    fn estimate(&self, from: Point, to: Point) -> f64;
}

/// Straight-line distance in grid steps. The default A* heuristic.
#[derive(Debug, Default, Clone, Copy)]
pub struct Euclidean;

impl Heuristic for Euclidean {
    #[inline]
    fn estimate(&self, from: Point, to: Point) -> f64 {
        distance::euclidean(from, to)
    }
}

/// Sum of row and column offsets; exact on an open 4-connected grid.
#[derive(Debug, Default, Clone, Copy)]
pub struct Manhattan;

impl Heuristic for Manhattan {
    #[inline]
    fn estimate(&self, from: Point, to: Point) -> f64 {
        f64::from(distance::manhattan(from, to))
    }
}

impl<F> Heuristic for F
where
    F: Fn(Point, Point) -> f64,
{
    #[inline]
    fn estimate(&self, from: Point, to: Point) -> f64 {
        self(from, to)
    }
}

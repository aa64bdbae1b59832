use crate::grid::Grid;

/// Hook called after each step of a long-running grid algorithm.
///
/// The observer only gets shared access to the grid, so it may read cell
/// states (to render progress, for example) but cannot change them.
/// Returning `false` asks the algorithm to stop at the next check.
pub trait StepObserver {
    fn step(&mut self, grid: &Grid) -> bool;
}

impl<F> StepObserver for F
where
    F: FnMut(&Grid) -> bool,
{
    #[inline]
    fn step(&mut self, grid: &Grid) -> bool {
        self(grid)
    }
}

/// Observer that never interrupts.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopObserver;

impl StepObserver for NoopObserver {
    #[inline]
    fn step(&mut self, _grid: &Grid) -> bool {
        true
    }
}

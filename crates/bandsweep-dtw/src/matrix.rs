//! Reusable cumulative-cost buffer for the DTW recurrence.

use std::ops::{Index, IndexMut};

/// Dense row-major grid of cumulative alignment costs.
///
/// The backing allocation only grows, so one buffer serves every pair of a
/// sweep. Each [`reset`][CostMatrix::reset] re-initializes exactly the region
/// the next computation reads, which keeps costs from leaking between pairs.
#[derive(Debug, Clone, Default)]
pub(crate) struct CostMatrix {
    rows: usize,
    cols: usize,
    data: Vec<f64>,
}

impl CostMatrix {
    /// Create a buffer able to hold a `rows x cols` grid without reallocating.
    pub(crate) fn with_capacity(rows: usize, cols: usize) -> Self {
        Self {
            rows: 0,
            cols: 0,
            data: Vec::with_capacity(rows.saturating_mul(cols)),
        }
    }

    /// Resize to `rows x cols`, fill every cell with +inf, and set `(0, 0)` to zero.
    pub(crate) fn reset(&mut self, rows: usize, cols: usize) {
        debug_assert!(rows > 0 && cols > 0, "cost matrix must be at least 1x1");
        self.rows = rows;
        self.cols = cols;
        self.data.clear();
        self.data.resize(rows * cols, f64::INFINITY);
        self.data[0] = 0.0;
    }

    /// Return the number of cells the buffer can hold without reallocating.
    pub(crate) fn capacity(&self) -> usize {
        self.data.capacity()
    }

    /// Return the current grid shape as `(rows, cols)`.
    #[cfg(test)]
    pub(crate) fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }
}

impl Index<(usize, usize)> for CostMatrix {
    type Output = f64;

    fn index(&self, (i, j): (usize, usize)) -> &Self::Output {
        debug_assert!(i < self.rows && j < self.cols, "cell ({i}, {j}) out of bounds");
        &self.data[i * self.cols + j]
    }
}

impl IndexMut<(usize, usize)> for CostMatrix {
    fn index_mut(&mut self, (i, j): (usize, usize)) -> &mut Self::Output {
        debug_assert!(i < self.rows && j < self.cols, "cell ({i}, {j}) out of bounds");
        &mut self.data[i * self.cols + j]
    }
}

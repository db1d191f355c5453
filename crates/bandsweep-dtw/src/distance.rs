//! DTW distance newtype wrapper.

use std::cmp::Ordering;
use std::fmt;
use std::ops::Add;

/// A non-negative cumulative DTW alignment cost.
///
/// May be [`DtwDistance::INFINITY`] when the band makes the terminal cell
/// unreachable. That is a valid result and compares greater than every
/// finite distance.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct DtwDistance(f64);

impl DtwDistance {
    /// Infinite DTW distance, produced when no in-band path reaches the terminal cell.
    pub const INFINITY: Self = Self(f64::INFINITY);

    /// Zero distance, the cost of aligning a series with itself.
    pub const ZERO: Self = Self(0.0);

    /// Create a new DTW distance from a raw value.
    pub(crate) fn new(value: f64) -> Self {
        Self(value)
    }

    /// Return the raw distance value.
    #[must_use]
    pub fn value(self) -> f64 {
        self.0
    }

    /// Return true unless the terminal cell was unreachable.
    #[must_use]
    pub fn is_finite(self) -> bool {
        self.0.is_finite()
    }

    /// Total ordering comparison using [`f64::total_cmp`].
    #[must_use]
    pub fn total_cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

impl Add for DtwDistance {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0 + rhs.0)
    }
}

impl fmt::Display for DtwDistance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.6}", self.0)
    }
}

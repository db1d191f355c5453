//! Per-step cost strategies plugged into the DTW engine.

use crate::series::{Axis, Sample};

/// Pointwise cost of aligning one sample of series A with one sample of series B.
///
/// Implementations must be pure and return a non-negative value.
pub trait CostStrategy {
    /// Return the cost of matching `a` with `b`.
    fn cost(&self, a: &Sample, b: &Sample) -> f64;
}

/// Squared difference on the `x` coordinate only.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Univariate;

impl CostStrategy for Univariate {
    #[inline]
    fn cost(&self, a: &Sample, b: &Sample) -> f64 {
        (a.x - b.x).powi(2)
    }
}

/// Squared difference on a single chosen axis. One DTW_I term.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SingleAxis(pub Axis);

impl CostStrategy for SingleAxis {
    #[inline]
    fn cost(&self, a: &Sample, b: &Sample) -> f64 {
        (a.component(self.0) - b.component(self.0)).powi(2)
    }
}

/// Squared Euclidean distance over all three axes jointly (DTW_D).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Dependent;

impl CostStrategy for Dependent {
    #[inline]
    fn cost(&self, a: &Sample, b: &Sample) -> f64 {
        (a.x - b.x).powi(2) + (a.y - b.y).powi(2) + (a.z - b.z).powi(2)
    }
}

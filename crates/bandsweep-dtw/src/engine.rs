//! Banded DTW recurrence.

use tracing::{instrument, trace};

use crate::constraint::{BandConstraint, BandFraction};
use crate::distance::DtwDistance;
use crate::error::DtwError;
use crate::matrix::CostMatrix;
use crate::series::Sample;
use crate::strategy::CostStrategy;

/// DTW calculator owning its reusable alignment buffer.
///
/// One engine serves any number of sequential `compute` calls. Each call
/// re-initializes the region of the buffer it uses, so no cost survives from
/// one pair to the next. Requiring `&mut self` rules out two calls sharing a
/// buffer at once; use one engine per thread.
#[derive(Debug, Clone, Default)]
pub struct DtwEngine {
    matrix: CostMatrix,
    widen_to_length_difference: bool,
}

impl DtwEngine {
    /// Create an engine with an empty buffer that grows on first use.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an engine whose buffer already fits any pair with
    /// `len_a <= max_len_a` and `len_b <= max_len_b`.
    ///
    /// Sizing from the longest loaded series avoids reallocations during a
    /// sweep. Longer pairs are still accepted; the buffer grows to fit them.
    #[must_use]
    pub fn with_capacity(max_len_a: usize, max_len_b: usize) -> Self {
        Self {
            matrix: CostMatrix::with_capacity(max_len_a, max_len_b),
            widen_to_length_difference: false,
        }
    }

    /// Widen every band to at least `|len_a - len_b|` so the terminal cell is
    /// always reachable. Disabled by default: a too-narrow band then yields
    /// [`DtwDistance::INFINITY`].
    #[must_use]
    pub fn with_length_difference_widening(mut self, enabled: bool) -> Self {
        self.widen_to_length_difference = enabled;
        self
    }

    /// Return true if bands are widened to the length difference.
    #[must_use]
    pub fn widens_to_length_difference(&self) -> bool {
        self.widen_to_length_difference
    }

    /// Return the number of cells the buffer holds without reallocating.
    #[must_use]
    pub fn buffer_capacity(&self) -> usize {
        self.matrix.capacity()
    }

    /// Return the constraint applied to a pair of the given lengths.
    #[must_use]
    pub fn constraint_for(&self, band: BandFraction, len_a: usize, len_b: usize) -> BandConstraint {
        let constraint = band.constraint(len_a);
        if self.widen_to_length_difference {
            constraint.widened_to(len_a.abs_diff(len_b))
        } else {
            constraint
        }
    }

    /// Compute the banded DTW alignment cost of `a` against `b`.
    ///
    /// The buffer is a `len_a x len_b` grid where cell `(i, j)` holds the
    /// cheapest cumulative cost of aligning `a[..=i]` with `b[..=j]`. Every
    /// path starts at cell `(0, 0)`, which is fixed at zero: the first pair of
    /// samples is never charged. Cells of the first row accumulate from the
    /// left, cells of the first column from above, and every other cell takes
    /// the cheapest of its three predecessors.
    ///
    /// Only cells with `|i - j| <= r` are written, where `r` comes from
    /// [`BandFraction::constraint`]. Every other cell stays +inf and acts as a
    /// wall. Runs in O(len_a * band width) time.
    ///
    /// The result is [`DtwDistance::INFINITY`] when no in-band path reaches
    /// the last cell, which happens when the band is narrower than the length
    /// difference. That is a valid distance, not an error.
    ///
    /// # Errors
    ///
    /// | Variant | Condition |
    /// |---|---|
    /// | [`DtwError::EmptySeries`] | `a` or `b` has no samples |
    #[instrument(level = "trace", skip(self, a, b, strategy), fields(len_a = a.len(), len_b = b.len()))]
    pub fn compute<S: CostStrategy>(
        &mut self,
        a: &[Sample],
        b: &[Sample],
        band: BandFraction,
        strategy: &S,
    ) -> Result<DtwDistance, DtwError> {
        if a.is_empty() || b.is_empty() {
            return Err(DtwError::EmptySeries);
        }

        let n = a.len();
        let m = b.len();
        let constraint = self.constraint_for(band, n, m);

        self.matrix.reset(n, m);

        for (i, sample_a) in a.iter().enumerate() {
            for j in constraint.column_range(i, m) {
                let previous = match (i, j) {
                    (0, 0) => continue,
                    (0, _) => self.matrix[(0, j - 1)],
                    (_, 0) => self.matrix[(i - 1, 0)],
                    _ => {
                        let above = self.matrix[(i - 1, j)];
                        let left = self.matrix[(i, j - 1)];
                        let diag = self.matrix[(i - 1, j - 1)];
                        above.min(left).min(diag)
                    }
                };
                self.matrix[(i, j)] = strategy.cost(sample_a, &b[j]) + previous;
            }
        }

        let total = self.matrix[(n - 1, m - 1)];
        trace!(?constraint, total, "alignment complete");
        Ok(DtwDistance::new(total))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::strategy::{Dependent, Univariate};

    fn line(values: &[f64]) -> Vec<Sample> {
        values.iter().copied().map(Sample::scalar).collect()
    }

    fn band(fraction: f64) -> BandFraction {
        BandFraction::new(fraction).unwrap()
    }

    #[test]
    fn identical_series_distance_zero() {
        let a = line(&[0.0, 1.0, 2.0]);
        let mut engine = DtwEngine::new();
        let d = engine
            .compute(&a, &a, BandFraction::UNCONSTRAINED, &Univariate)
            .unwrap();
        assert_eq!(d.value(), 0.0);
    }

    #[test]
    fn longer_series_collapses_onto_single_sample() {
        // a=[0,5], b=[0]: both samples of a align to b[0], cost 0 + 25.
        let a = line(&[0.0, 5.0]);
        let b = line(&[0.0]);
        let mut engine = DtwEngine::new();
        let d = engine
            .compute(&a, &b, BandFraction::UNCONSTRAINED, &Univariate)
            .unwrap();
        assert_eq!(d.value(), 25.0);
    }

    #[test]
    fn hand_computed_2x2() {
        // a=[0,1], b=[1,0]
        // C[0][0] = 0, C[0][1] = 0 + 0, C[1][0] = 0 + 0
        // C[1][1] = 1 + min(0, 0, 0) = 1
        let a = line(&[0.0, 1.0]);
        let b = line(&[1.0, 0.0]);
        let mut engine = DtwEngine::new();
        let d = engine
            .compute(&a, &b, BandFraction::UNCONSTRAINED, &Univariate)
            .unwrap();
        assert!((d.value() - 1.0).abs() < 1e-10);
    }

    #[test]
    fn first_pair_is_not_charged() {
        let mut engine = DtwEngine::new();
        let single = engine
            .compute(&line(&[1.0]), &line(&[5.0]), BandFraction::UNCONSTRAINED, &Univariate)
            .unwrap();
        assert_eq!(single.value(), 0.0);

        // a=[1,2], b=[3,2]: (0,0) free, then a[1]-b[1] costs 0.
        let d = engine
            .compute(&line(&[1.0, 2.0]), &line(&[3.0, 2.0]), BandFraction::UNCONSTRAINED, &Univariate)
            .unwrap();
        assert_eq!(d.value(), 0.0);

        let diagonal = engine
            .compute(&line(&[1.0, 2.0]), &line(&[3.0, 2.0]), band(0.0), &Univariate)
            .unwrap();
        assert_eq!(diagonal.value(), 0.0);
    }

    #[test]
    fn first_row_accumulates_from_the_left() {
        // a=[0], b=[0,3,4]: only the first row exists, 0 + 9 + 16.
        let mut engine = DtwEngine::new();
        let d = engine
            .compute(&line(&[0.0]), &line(&[0.0, 3.0, 4.0]), BandFraction::UNCONSTRAINED, &Univariate)
            .unwrap();
        assert_eq!(d.value(), 25.0);
    }

    #[test]
    fn zero_band_forces_diagonal() {
        // a=[0,0,0], b=[1,1,1]; radius 0 leaves only the diagonal: 0 + 1 + 1.
        let a = line(&[0.0, 0.0, 0.0]);
        let b = line(&[1.0, 1.0, 1.0]);
        let mut engine = DtwEngine::new();
        let d = engine.compute(&a, &b, band(0.0), &Univariate).unwrap();
        assert!((d.value() - 2.0).abs() < 1e-10);
    }

    #[test]
    fn zero_band_on_unequal_lengths_is_unreachable() {
        let a = line(&[0.0, 1.0, 2.0]);
        let b = line(&[0.0, 2.0]);
        let mut engine = DtwEngine::new();
        let d = engine.compute(&a, &b, band(0.0), &Univariate).unwrap();
        assert_eq!(d, DtwDistance::INFINITY);
    }

    #[test]
    fn widening_makes_terminal_cell_reachable() {
        let a = line(&[0.0, 1.0, 2.0]);
        let b = line(&[0.0, 2.0]);
        let mut engine = DtwEngine::new().with_length_difference_widening(true);
        assert!(engine.widens_to_length_difference());
        let d = engine.compute(&a, &b, band(0.0), &Univariate).unwrap();
        // Radius 1: a[0]-b[0], a[1]-b[1] or b[0], a[2]-b[1] -> best 0 + 1 + 0.
        assert!((d.value() - 1.0).abs() < 1e-10);
    }

    #[test]
    fn banded_distance_geq_unconstrained() {
        let a = line(&[0.0, 1.0, 0.0, 1.0, 0.0, 3.0, 0.0, 1.0]);
        let b = line(&[1.0, 0.0, 1.0, 0.0, 1.0, 0.0, 3.0, 0.0]);
        let mut engine = DtwEngine::new();
        let full = engine
            .compute(&a, &b, BandFraction::UNCONSTRAINED, &Univariate)
            .unwrap();
        let narrow = engine.compute(&a, &b, band(0.125), &Univariate).unwrap();
        assert!(narrow.value() >= full.value() - 1e-10);
    }

    #[test]
    fn reuse_does_not_leak_between_pairs() {
        let mut engine = DtwEngine::new();
        let big_a = line(&[9.0, 8.0, 7.0, 6.0, 5.0]);
        let big_b = line(&[1.0, 2.0, 3.0, 4.0, 5.0]);
        let small = line(&[1.0, 2.0]);

        let fresh = DtwEngine::new()
            .compute(&small, &small, band(0.0), &Univariate)
            .unwrap();
        engine.compute(&big_a, &big_b, BandFraction::UNCONSTRAINED, &Univariate).unwrap();
        let reused = engine.compute(&small, &small, band(0.0), &Univariate).unwrap();

        assert_eq!(fresh, reused);
    }

    #[test]
    fn radius_follows_first_series_length() {
        // len_a = 2 with fraction 0.5 gives radius 1; len_a = 4 gives radius 2.
        let short = line(&[0.0, 0.0]);
        let long = line(&[0.0, 0.0, 0.0, 0.0]);
        let engine = DtwEngine::new();
        assert_eq!(
            engine.constraint_for(band(0.5), short.len(), long.len()),
            BandConstraint::SakoeChibaRadius(1)
        );
        assert_eq!(
            engine.constraint_for(band(0.5), long.len(), short.len()),
            BandConstraint::SakoeChibaRadius(2)
        );
    }

    #[test]
    fn dependent_uses_all_axes() {
        let a = vec![Sample::new(0.0, 0.0, 0.0), Sample::new(0.0, 0.0, 0.0)];
        let b = vec![Sample::new(0.0, 0.0, 0.0), Sample::new(1.0, 2.0, 2.0)];
        let mut engine = DtwEngine::new();
        let d = engine
            .compute(&a, &b, BandFraction::UNCONSTRAINED, &Dependent)
            .unwrap();
        assert_eq!(d.value(), 9.0);
    }

    #[test]
    fn rejects_empty_input() {
        let a = line(&[1.0]);
        let mut engine = DtwEngine::new();
        let result = engine.compute(&a, &[], BandFraction::UNCONSTRAINED, &Univariate);
        assert!(matches!(result, Err(DtwError::EmptySeries)));
        let result = engine.compute(&[], &a, BandFraction::UNCONSTRAINED, &Univariate);
        assert!(matches!(result, Err(DtwError::EmptySeries)));
    }

    #[test]
    fn with_capacity_presizes_buffer() {
        let engine = DtwEngine::with_capacity(9, 9);
        assert!(engine.buffer_capacity() >= 81);
    }
}

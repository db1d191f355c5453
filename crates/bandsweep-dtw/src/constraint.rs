//! Band fraction and band constraint types for DTW computation.

use std::fmt;
use std::ops::Range;

use crate::error::DtwError;

/// Configured band width as a fraction of the first series' length.
///
/// Fractions at or above [`BandFraction::UNCONSTRAINED`] denote a full,
/// unconstrained alignment.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct BandFraction(f64);

impl BandFraction {
    /// Sentinel fraction meaning "no band".
    pub const UNCONSTRAINED: Self = Self(10.0);

    /// The ascending fractions evaluated by a default sweep.
    pub const DEFAULT_SWEEP: [Self; 8] = [
        Self(0.0),
        Self(0.01),
        Self(0.05),
        Self(0.1),
        Self(0.2),
        Self(0.5),
        Self(1.0),
        Self::UNCONSTRAINED,
    ];

    /// Create a band fraction.
    ///
    /// # Errors
    ///
    /// Returns [`DtwError::InvalidBandFraction`] if `value` is negative, NaN, or infinite.
    pub fn new(value: f64) -> Result<Self, DtwError> {
        if !value.is_finite() || value < 0.0 {
            return Err(DtwError::InvalidBandFraction { value });
        }
        Ok(Self(value))
    }

    /// Return the raw fraction.
    #[must_use]
    pub fn value(self) -> f64 {
        self.0
    }

    /// Return the fraction as a percentage (`0.05` -> `5.0`).
    #[must_use]
    pub fn as_percent(self) -> f64 {
        self.0 * 100.0
    }

    /// Return true if this fraction denotes an unconstrained alignment.
    #[must_use]
    pub fn is_unconstrained(self) -> bool {
        self.0 >= Self::UNCONSTRAINED.0
    }

    /// Derive the per-pair constraint when the first series has `len_a` samples.
    ///
    /// The radius is `ceil(len_a * fraction)`; the second series' length plays no part.
    #[must_use]
    pub fn constraint(self, len_a: usize) -> BandConstraint {
        if self.is_unconstrained() {
            return BandConstraint::Unconstrained;
        }
        let radius = (len_a as f64 * self.0).ceil() as usize;
        BandConstraint::SakoeChibaRadius(radius)
    }
}

impl fmt::Display for BandFraction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_unconstrained() {
            f.write_str("unconstrained")
        } else {
            let percent = format!("{:.4}", self.as_percent());
            let percent = percent.trim_end_matches('0').trim_end_matches('.');
            write!(f, "{percent}%")
        }
    }
}

/// Constraint on the DTW warping window.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum BandConstraint {
    /// No constraint. Full cost matrix is computed.
    #[default]
    Unconstrained,

    /// Sakoe-Chiba band: cell (i,j) is valid only if |i - j| <= radius.
    SakoeChibaRadius(usize),
}

impl BandConstraint {
    /// Return the valid column range for a given row in the cost matrix.
    ///
    /// For unconstrained DTW, returns `0..n_cols`.
    /// For Sakoe-Chiba, returns the intersection of `[row - r, row + r]` with `[0, n_cols)`.
    /// The range is empty when the whole band lies to the right of the last column.
    #[must_use]
    pub fn column_range(&self, row: usize, n_cols: usize) -> Range<usize> {
        match self {
            Self::Unconstrained => 0..n_cols,
            Self::SakoeChibaRadius(r) => {
                let start = row.saturating_sub(*r).min(n_cols);
                let end = row.saturating_add(*r).saturating_add(1).min(n_cols);
                start..end
            }
        }
    }

    /// Widen the band so that its radius is at least `min_radius`.
    #[must_use]
    pub fn widened_to(self, min_radius: usize) -> Self {
        match self {
            Self::Unconstrained => Self::Unconstrained,
            Self::SakoeChibaRadius(r) => Self::SakoeChibaRadius(r.max(min_radius)),
        }
    }
}

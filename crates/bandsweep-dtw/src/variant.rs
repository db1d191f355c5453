//! The three distance variants and how each maps onto engine calls.

use std::fmt;
use std::str::FromStr;

use crate::constraint::BandFraction;
use crate::distance::DtwDistance;
use crate::engine::DtwEngine;
use crate::error::DtwError;
use crate::series::{Axis, Sample};
use crate::strategy::{Dependent, SingleAxis, Univariate};

/// Distance variant evaluated by the classifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Variant {
    /// Univariate DTW on the `x` coordinate.
    Dtw,
    /// Independent DTW: one alignment per axis, costs summed.
    DtwI,
    /// Dependent DTW: one alignment over the joint 3-D cost.
    DtwD,
}

impl Variant {
    /// All variants in sweep order.
    pub const ALL: [Variant; 3] = [Variant::Dtw, Variant::DtwI, Variant::DtwD];

    /// Return true if the variant is evaluated on the multivariate datasets.
    #[must_use]
    pub fn is_multivariate(self) -> bool {
        !matches!(self, Self::Dtw)
    }

    /// Compute the variant's distance between `a` and `b` under `band`.
    ///
    /// DTW and DTW_D cost one engine call. DTW_I runs the engine once per axis
    /// and sums the three alignment costs.
    ///
    /// # Errors
    ///
    /// Returns [`DtwError::EmptySeries`] if either input is empty.
    pub fn distance(
        self,
        engine: &mut DtwEngine,
        a: &[Sample],
        b: &[Sample],
        band: BandFraction,
    ) -> Result<DtwDistance, DtwError> {
        match self {
            Self::Dtw => engine.compute(a, b, band, &Univariate),
            Self::DtwD => engine.compute(a, b, band, &Dependent),
            Self::DtwI => Axis::ALL.iter().try_fold(
                DtwDistance::ZERO,
                |acc, &axis| -> Result<DtwDistance, DtwError> {
                    Ok(acc + engine.compute(a, b, band, &SingleAxis(axis))?)
                },
            ),
        }
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Dtw => "DTW",
            Self::DtwI => "DTW_I",
            Self::DtwD => "DTW_D",
        };
        f.write_str(name)
    }
}

impl FromStr for Variant {
    type Err = DtwError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "dtw" => Ok(Self::Dtw),
            "dtw-i" | "dtw_i" => Ok(Self::DtwI),
            "dtw-d" | "dtw_d" => Ok(Self::DtwD),
            _ => Err(DtwError::UnknownVariant { name: s.to_string() }),
        }
    }
}

//! Banded DTW distance computation over labelled 1-3 dimensional series.
//!
//! Pure math library with zero I/O. Provides the sample/series data model,
//! the three per-step cost strategies (DTW, DTW_I, DTW_D), and a Sakoe-Chiba
//! banded DTW engine that owns its reusable alignment buffer.

mod constraint;
mod distance;
mod engine;
mod error;
mod matrix;
mod series;
mod strategy;
mod variant;

pub use constraint::{BandConstraint, BandFraction};
pub use distance::DtwDistance;
pub use engine::DtwEngine;
pub use error::DtwError;
pub use series::{Axis, ClassLabel, Sample, Series};
pub use strategy::{CostStrategy, Dependent, SingleAxis, Univariate};
pub use variant::Variant;

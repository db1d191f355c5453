//! Nearest-neighbour classification with banded DTW distances.
//!
//! Provides 1-NN classification of labelled series under one
//! (variant, band) configuration, and the sweep harness that evaluates every
//! configuration of a variant x band grid and reports accuracy and wall time.

mod classifier;
mod error;
mod sweep;

pub use classifier::{Evaluation, NearestNeighbor, Prediction};
pub use error::KnnError;
pub use sweep::{Split, SweepConfig, SweepData, SweepRecord, SweepReport};

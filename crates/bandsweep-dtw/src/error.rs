//! Error types for series validation and DTW computation.

/// Errors from series construction, band configuration and DTW computation.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DtwError {
    /// Returned when a series with no samples is constructed or passed to the engine.
    #[error("invalid series: must contain at least one sample")]
    EmptySeries,

    /// Returned when a sample coordinate is NaN, infinity, or negative infinity.
    #[error("series contains non-finite coordinate at sample {index}")]
    NonFiniteValue {
        /// Position of the first sample holding a non-finite coordinate.
        index: usize,
    },

    /// Returned when a band fraction is negative or not finite.
    #[error("band fraction must be finite and non-negative, got {value}")]
    InvalidBandFraction {
        /// The rejected fraction.
        value: f64,
    },

    /// Returned when a distance variant name cannot be parsed.
    #[error("unknown DTW variant \"{name}\" (expected dtw, dtw-i, or dtw-d)")]
    UnknownVariant {
        /// The rejected name.
        name: String,
    },
}

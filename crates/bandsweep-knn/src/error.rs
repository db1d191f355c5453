use bandsweep_dtw::DtwError;

/// Errors from nearest-neighbour classification and sweep evaluation.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum KnnError {
    /// Returned when the training set has no series to compare against.
    #[error("insufficient training data: the training set is empty")]
    InsufficientTrainingData,

    /// Returned when the test set is empty, leaving accuracy undefined.
    #[error("cannot evaluate accuracy on an empty test set")]
    EmptyTestSet,

    /// Wraps a DTW error raised while computing a distance.
    #[error("DTW error during classification: {0}")]
    Dtw(#[from] DtwError),
}

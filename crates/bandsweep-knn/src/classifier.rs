//! One-nearest-neighbour classification under a single DTW configuration.

use std::time::{Duration, Instant};

use bandsweep_dtw::{BandFraction, ClassLabel, DtwDistance, DtwEngine, Series, Variant};
use tracing::{debug, instrument};

use crate::error::KnnError;

/// A single (variant, band) nearest-neighbour classifier.
///
/// Holds no training state: every call searches the full training set it is given.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NearestNeighbor {
    variant: Variant,
    band: BandFraction,
}

/// Outcome of classifying one query series.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Prediction {
    /// Label of the nearest training series.
    pub label: ClassLabel,
    /// Distance to the nearest training series. May be infinite.
    pub distance: DtwDistance,
    /// Index of the nearest training series in the training slice.
    pub neighbor: usize,
}

/// Accuracy and timing of one configuration over a full test set.
#[derive(Debug, Clone, PartialEq)]
pub struct Evaluation {
    /// Number of test series whose predicted label matched their own.
    pub correct: usize,
    /// Number of test series classified.
    pub total: usize,
    /// `correct / total`, in `[0, 1]`.
    pub accuracy: f64,
    /// Predicted label for each test series, in test order.
    pub predictions: Vec<ClassLabel>,
    /// Wall-clock time of the whole classification loop.
    pub elapsed: Duration,
}

impl Evaluation {
    /// Return the accuracy as a percentage.
    #[must_use]
    pub fn accuracy_percent(&self) -> f64 {
        self.accuracy * 100.0
    }
}

impl NearestNeighbor {
    /// Create a classifier for the given variant and band.
    #[must_use]
    pub fn new(variant: Variant, band: BandFraction) -> Self {
        Self { variant, band }
    }

    /// Return the distance variant.
    #[must_use]
    pub fn variant(&self) -> Variant {
        self.variant
    }

    /// Return the band fraction.
    #[must_use]
    pub fn band(&self) -> BandFraction {
        self.band
    }

    /// Find the training series nearest to `query`.
    ///
    /// Training order matters: the first training series is the initial
    /// candidate and a later one replaces it only when strictly closer, so on
    /// ties the earliest series wins. Infinite distances are ordinary
    /// candidates; if every distance is infinite the first series is returned.
    ///
    /// # Errors
    ///
    /// | Variant | Condition |
    /// |---|---|
    /// | [`KnnError::InsufficientTrainingData`] | `train` is empty |
    /// | [`KnnError::Dtw`] | A distance computation failed |
    pub fn classify(
        &self,
        engine: &mut DtwEngine,
        train: &[Series],
        query: &Series,
    ) -> Result<Prediction, KnnError> {
        let mut best: Option<Prediction> = None;

        for (neighbor, candidate) in train.iter().enumerate() {
            let distance =
                self.variant
                    .distance(engine, query.samples(), candidate.samples(), self.band)?;
            let closer = best.is_none_or(|b| distance < b.distance);
            if closer {
                best = Some(Prediction {
                    label: candidate.label(),
                    distance,
                    neighbor,
                });
            }
        }

        best.ok_or(KnnError::InsufficientTrainingData)
    }

    /// Classify every series in `test` against `train` and measure accuracy.
    ///
    /// Elapsed time covers the whole loop, including every distance computation.
    ///
    /// # Errors
    ///
    /// | Variant | Condition |
    /// |---|---|
    /// | [`KnnError::InsufficientTrainingData`] | `train` is empty |
    /// | [`KnnError::EmptyTestSet`] | `test` is empty |
    /// | [`KnnError::Dtw`] | A distance computation failed |
    #[instrument(skip(self, engine, train, test), fields(variant = %self.variant, band = %self.band, n_train = train.len(), n_test = test.len()))]
    pub fn evaluate(
        &self,
        engine: &mut DtwEngine,
        train: &[Series],
        test: &[Series],
    ) -> Result<Evaluation, KnnError> {
        if train.is_empty() {
            return Err(KnnError::InsufficientTrainingData);
        }
        if test.is_empty() {
            return Err(KnnError::EmptyTestSet);
        }

        let start = Instant::now();
        let mut correct = 0;
        let mut predictions = Vec::with_capacity(test.len());

        for query in test {
            let prediction = self.classify(engine, train, query)?;
            if prediction.label == query.label() {
                correct += 1;
            }
            predictions.push(prediction.label);
        }

        let elapsed = start.elapsed();
        let accuracy = correct as f64 / test.len() as f64;
        debug!(correct, accuracy, elapsed_s = elapsed.as_secs_f64(), "configuration evaluated");

        Ok(Evaluation {
            correct,
            total: test.len(),
            accuracy,
            predictions,
            elapsed,
        })
    }
}

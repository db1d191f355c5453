//! Variant x band sweep harness.

use bandsweep_dtw::{BandFraction, DtwEngine, Series, Variant};
use tracing::{info, instrument, warn};

use crate::classifier::{Evaluation, NearestNeighbor};
use crate::error::KnnError;

/// A training/test pair of labelled series collections.
#[derive(Debug, Clone, Default)]
pub struct Split {
    /// Training series, searched in order.
    pub train: Vec<Series>,
    /// Test series, each classified against `train`.
    pub test: Vec<Series>,
}

impl Split {
    /// Create a split from owned training and test collections.
    #[must_use]
    pub fn new(train: Vec<Series>, test: Vec<Series>) -> Self {
        Self { train, test }
    }

    fn max_len(&self) -> usize {
        self.train
            .iter()
            .chain(&self.test)
            .map(Series::len)
            .max()
            .unwrap_or(0)
    }
}

/// Every collection a sweep reads.
///
/// [`Variant::Dtw`] is evaluated on `univariate`; DTW_I and DTW_D on
/// `multivariate`. The two splits are independent datasets.
#[derive(Debug, Clone, Default)]
pub struct SweepData {
    /// One-dimensional training and test series.
    pub univariate: Split,
    /// Three-dimensional training and test series.
    pub multivariate: Split,
}

impl SweepData {
    /// Return the split a variant is evaluated on.
    #[must_use]
    pub fn split_for(&self, variant: Variant) -> &Split {
        if variant.is_multivariate() {
            &self.multivariate
        } else {
            &self.univariate
        }
    }

    fn max_len(&self) -> usize {
        self.univariate.max_len().max(self.multivariate.max_len())
    }
}

/// The result of one (variant, band) configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct SweepRecord {
    /// Distance variant of this configuration.
    pub variant: Variant,
    /// Band fraction of this configuration.
    pub band: BandFraction,
    /// Evaluation, or the error that stopped this configuration.
    pub outcome: Result<Evaluation, KnnError>,
}

/// All records of a sweep, in evaluation order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SweepReport {
    /// One record per configuration: variants outermost, bands innermost.
    pub records: Vec<SweepRecord>,
}

impl SweepReport {
    /// Iterate over configurations that completed.
    pub fn completed(&self) -> impl Iterator<Item = (&SweepRecord, &Evaluation)> + '_ {
        self.records
            .iter()
            .filter_map(|r| r.outcome.as_ref().ok().map(|e| (r, e)))
    }

    /// Iterate over configurations that failed.
    pub fn failures(&self) -> impl Iterator<Item = (&SweepRecord, &KnnError)> + '_ {
        self.records
            .iter()
            .filter_map(|r| r.outcome.as_ref().err().map(|e| (r, e)))
    }

    /// Return the most accurate completed configuration. Ties keep the earliest record.
    #[must_use]
    pub fn best(&self) -> Option<(&SweepRecord, &Evaluation)> {
        self.completed().fold(None, |best, candidate| match best {
            Some((_, b)) if b.accuracy >= candidate.1.accuracy => best,
            _ => Some(candidate),
        })
    }
}

/// Configuration of a sweep.
///
/// Construct via [`SweepConfig::new`], then chain `with_*` methods to override defaults.
///
/// # Defaults
///
/// | Parameter | Default |
/// |---|---|
/// | `variants` | [`Variant::ALL`] (DTW, DTW_I, DTW_D) |
/// | `bands` | [`BandFraction::DEFAULT_SWEEP`] |
/// | `widen_to_length_difference` | false |
#[derive(Debug, Clone, PartialEq)]
pub struct SweepConfig {
    variants: Vec<Variant>,
    bands: Vec<BandFraction>,
    widen_to_length_difference: bool,
}

impl Default for SweepConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl SweepConfig {
    /// Create a sweep over every variant and the default band fractions.
    #[must_use]
    pub fn new() -> Self {
        Self {
            variants: Variant::ALL.to_vec(),
            bands: BandFraction::DEFAULT_SWEEP.to_vec(),
            widen_to_length_difference: false,
        }
    }

    /// Set the variants to evaluate, in order.
    #[must_use]
    pub fn with_variants(mut self, variants: Vec<Variant>) -> Self {
        self.variants = variants;
        self
    }

    /// Set the band fractions to evaluate per variant, in order.
    #[must_use]
    pub fn with_bands(mut self, bands: Vec<BandFraction>) -> Self {
        self.bands = bands;
        self
    }

    /// Widen each band to the pair's length difference so every distance is finite.
    #[must_use]
    pub fn with_length_difference_widening(mut self, enabled: bool) -> Self {
        self.widen_to_length_difference = enabled;
        self
    }

    /// Return the configured variants.
    #[must_use]
    pub fn variants(&self) -> &[Variant] {
        &self.variants
    }

    /// Return the configured band fractions.
    #[must_use]
    pub fn bands(&self) -> &[BandFraction] {
        &self.bands
    }

    /// Run every configuration and collect the records.
    #[must_use]
    pub fn run(&self, data: &SweepData) -> SweepReport {
        self.run_with(data, |_| {})
    }

    /// Run every configuration, handing each record to `sink` as soon as it
    /// is finished, and collect the records.
    ///
    /// A configuration that fails is recorded with its error and the sweep
    /// moves on to the next one.
    #[instrument(skip_all, fields(n_variants = self.variants.len(), n_bands = self.bands.len()))]
    pub fn run_with<F>(&self, data: &SweepData, mut sink: F) -> SweepReport
    where
        F: FnMut(&SweepRecord),
    {
        let max_len = data.max_len();
        let mut engine = DtwEngine::with_capacity(max_len, max_len)
            .with_length_difference_widening(self.widen_to_length_difference);
        let mut records = Vec::with_capacity(self.variants.len() * self.bands.len());

        for &variant in &self.variants {
            let split = data.split_for(variant);
            for &band in &self.bands {
                let knn = NearestNeighbor::new(variant, band);
                let outcome = knn.evaluate(&mut engine, &split.train, &split.test);
                match &outcome {
                    Ok(eval) => info!(
                        %variant,
                        %band,
                        accuracy = eval.accuracy,
                        elapsed_s = eval.elapsed.as_secs_f64(),
                        "configuration complete"
                    ),
                    Err(e) => warn!(%variant, %band, error = %e, "configuration failed"),
                }
                let record = SweepRecord {
                    variant,
                    band,
                    outcome,
                };
                sink(&record);
                records.push(record);
            }
        }

        SweepReport { records }
    }
}

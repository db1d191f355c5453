//! JSON result writer for sweep reports.

use std::fs;
use std::path::{Path, PathBuf};

use bandsweep_knn::{SweepRecord, SweepReport};
use serde::Serialize;
use tracing::{debug, info, instrument};

use crate::domain::ExperimentName;
use crate::IoError;

/// Writes sweep reports to JSON files.
///
/// Creates the output directory on construction if it does not exist.
/// Output files are named `{experiment}_sweep.json`.
pub struct ResultWriter {
    output_dir: PathBuf,
    experiment: ExperimentName,
}

impl ResultWriter {
    /// Create a new writer targeting the given directory and experiment name.
    ///
    /// # Errors
    ///
    /// Returns [`IoError::OutputDirCreate`] if the directory cannot be created.
    #[instrument(skip_all, fields(dir = %output_dir.display(), experiment = %experiment))]
    pub fn new(output_dir: &Path, experiment: ExperimentName) -> Result<Self, IoError> {
        fs::create_dir_all(output_dir).map_err(|e| IoError::OutputDirCreate {
            path: output_dir.to_path_buf(),
            source: e,
        })?;
        debug!("output directory ready");
        Ok(Self {
            output_dir: output_dir.to_path_buf(),
            experiment,
        })
    }

    /// Return the path `write_sweep` writes to.
    #[must_use]
    pub fn sweep_path(&self) -> PathBuf {
        self.output_dir
            .join(format!("{}_sweep.json", self.experiment.as_str()))
    }

    /// Write a sweep report to `{experiment}_sweep.json` and return the path.
    ///
    /// # Errors
    ///
    /// | Variant | Condition |
    /// |---|---|
    /// | [`IoError::Serialize`] | The artifact cannot be serialized |
    /// | [`IoError::WriteFile`] | The file cannot be written |
    #[instrument(skip_all)]
    pub fn write_sweep(&self, report: &SweepReport) -> Result<PathBuf, IoError> {
        let path = self.sweep_path();

        let best = report.best().map(|(record, _)| BestEntry {
            variant: record.variant.to_string(),
            band_fraction: record.band.value(),
        });

        let artifact = SweepArtifact {
            experiment: self.experiment.as_str(),
            n_configurations: report.records.len(),
            n_failed: report.failures().count(),
            best,
            records: report.records.iter().map(RecordEntry::from).collect(),
        };

        let json = serde_json::to_string_pretty(&artifact)?;
        fs::write(&path, &json).map_err(|e| IoError::WriteFile {
            path: path.clone(),
            source: e,
        })?;

        info!(path = %path.display(), "sweep result written");
        Ok(path)
    }
}

// --- JSON artifact structs ---

#[derive(Serialize)]
struct SweepArtifact<'a> {
    experiment: &'a str,
    n_configurations: usize,
    n_failed: usize,
    best: Option<BestEntry>,
    records: Vec<RecordEntry>,
}

#[derive(Serialize)]
struct BestEntry {
    variant: String,
    band_fraction: f64,
}

#[derive(Serialize)]
struct RecordEntry {
    variant: String,
    band_fraction: f64,
    band_percent: f64,
    unconstrained: bool,
    accuracy_percent: Option<f64>,
    correct: Option<usize>,
    total: Option<usize>,
    elapsed_s: Option<f64>,
    error: Option<String>,
}

impl From<&SweepRecord> for RecordEntry {
    fn from(record: &SweepRecord) -> Self {
        let eval = record.outcome.as_ref().ok();
        Self {
            variant: record.variant.to_string(),
            band_fraction: record.band.value(),
            band_percent: record.band.as_percent(),
            unconstrained: record.band.is_unconstrained(),
            accuracy_percent: eval.map(|e| e.accuracy_percent()),
            correct: eval.map(|e| e.correct),
            total: eval.map(|e| e.total),
            elapsed_s: eval.map(|e| e.elapsed.as_secs_f64()),
            error: record.outcome.as_ref().err().map(ToString::to_string),
        }
    }
}

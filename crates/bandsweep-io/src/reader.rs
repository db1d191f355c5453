//! Whitespace-separated labelled series reader.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use bandsweep_dtw::{ClassLabel, Sample, Series};
use tracing::{debug, info, instrument, warn};

use crate::domain::Dimensionality;
use crate::IoError;

/// Reads labelled series from a text file, one series per line.
///
/// Expected line format:
/// - `label v1 v2 v3 ...`, tokens separated by any whitespace
/// - `label` is an integer (`3`, or an integral real such as `3.0e+00`)
/// - the values are grouped into samples of [`Dimensionality::width`] values
///
/// Parsing of a line stops at the first token that is not a finite real, and a
/// trailing group shorter than the sample width is dropped. Blank lines are
/// ignored. Lines with a label but no complete sample are skipped.
///
/// # Errors
///
/// | Variant | Condition |
/// |---|---|
/// | [`IoError::FileNotFound`] | File doesn't exist |
/// | [`IoError::ReadFile`] | File can't be read or isn't valid UTF-8 |
/// | [`IoError::InvalidLabel`] | A line does not start with an integer label |
/// | [`IoError::EmptyDataset`] | No line produced a series |
pub struct SeriesReader {
    path: PathBuf,
    dims: Dimensionality,
}

impl SeriesReader {
    /// Create a new reader for the given file and sample width.
    pub fn new(path: &Path, dims: Dimensionality) -> Self {
        Self {
            path: path.to_path_buf(),
            dims,
        }
    }

    /// Read and parse the file, returning its series in file order.
    #[instrument(skip(self), fields(path = %self.path.display(), dims = ?self.dims))]
    pub fn read(&self) -> Result<Vec<Series>, IoError> {
        let text = std::fs::read_to_string(&self.path).map_err(|e| {
            let path = self.path.clone();
            match e.kind() {
                ErrorKind::NotFound => IoError::FileNotFound { path, source: e },
                _ => IoError::ReadFile { path, source: e },
            }
        })?;
        let series = parse_series(&text, self.dims, &self.path)?;
        info!(
            n_series = series.len(),
            max_len = series.iter().map(Series::len).max().unwrap_or(0),
            "series loaded"
        );
        Ok(series)
    }
}

/// Parse labelled series from in-memory text. `source` names the input in errors.
///
/// # Errors
///
/// Same conditions as [`SeriesReader::read`], minus the file access errors.
pub fn parse_series(
    text: &str,
    dims: Dimensionality,
    source: &Path,
) -> Result<Vec<Series>, IoError> {
    let width = dims.width();
    let mut series = Vec::new();

    for (line_index, line) in text.lines().enumerate() {
        let line_no = line_index + 1;
        let mut tokens = line.split_whitespace();
        let Some(raw_label) = tokens.next() else {
            continue;
        };

        let label = parse_label(raw_label).ok_or_else(|| IoError::InvalidLabel {
            path: source.to_path_buf(),
            line: line_no,
            raw: raw_label.to_string(),
        })?;

        let values: Vec<f64> = tokens
            .map_while(|t| t.parse::<f64>().ok().filter(|v| v.is_finite()))
            .collect();

        let groups = values.chunks_exact(width);
        if !groups.remainder().is_empty() {
            debug!(line = line_no, dropped = groups.remainder().len(), "dropped partial sample");
        }
        let samples: Vec<Sample> = groups
            .map(|g| match dims {
                Dimensionality::Univariate => Sample::scalar(g[0]),
                Dimensionality::Trivariate => Sample::new(g[0], g[1], g[2]),
            })
            .collect();

        match Series::new(label, samples) {
            Ok(s) => series.push(s),
            Err(e) => warn!(line = line_no, error = %e, "skipping record"),
        }
    }

    if series.is_empty() {
        return Err(IoError::EmptyDataset {
            path: source.to_path_buf(),
        });
    }

    Ok(series)
}

fn parse_label(raw: &str) -> Option<ClassLabel> {
    if let Ok(v) = raw.parse::<i64>() {
        return Some(ClassLabel::new(v));
    }
    let v: f64 = raw.parse().ok()?;
    if v.is_finite() && v.fract() == 0.0 && v.abs() < i64::MAX as f64 {
        Some(ClassLabel::new(v as i64))
    } else {
        None
    }
}

//! I/O error types for bandsweep-io.

use std::path::PathBuf;

/// Errors from series loading and result serialization.
#[derive(Debug, thiserror::Error)]
pub enum IoError {
    /// Returned when the input file does not exist.
    #[error("file not found: {path}")]
    FileNotFound {
        /// Path that was attempted.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// Returned when the input file exists but cannot be read as UTF-8 text.
    #[error("cannot read {path}")]
    ReadFile {
        /// Path that was attempted.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// Returned when a record does not start with an integer class label.
    #[error("invalid class label \"{raw}\" in {path} at line {line}")]
    InvalidLabel {
        /// Path (or source name) of the input.
        path: PathBuf,
        /// One-based line number.
        line: usize,
        /// The raw token that failed to parse.
        raw: String,
    },

    /// Returned when the input holds no usable series.
    #[error("empty dataset (no series) in {path}")]
    EmptyDataset {
        /// Path (or source name) of the input.
        path: PathBuf,
    },

    /// Returned when the experiment name contains characters outside `[a-zA-Z0-9_-]`.
    #[error("invalid experiment name \"{name}\": must match [a-zA-Z0-9_-]+")]
    InvalidExperimentName {
        /// The invalid name.
        name: String,
    },

    /// Returned when the output directory cannot be created.
    #[error("cannot create output directory {path}")]
    OutputDirCreate {
        /// Path that was attempted.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// Returned when a result file or report stream cannot be written.
    #[error("cannot write {path}")]
    WriteFile {
        /// Path that was attempted.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// Returned when the text report stream cannot be written.
    #[error("cannot write report line")]
    Report(#[from] std::io::Error),

    /// Returned when a result artifact cannot be serialized.
    #[error("cannot serialize result artifact")]
    Serialize(#[from] serde_json::Error),
}

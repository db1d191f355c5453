//! Series loading and sweep result reporting for the bandsweep pipeline.

mod domain;
mod error;
mod reader;
mod report;
mod writer;

pub use domain::{Dimensionality, ExperimentName};
pub use error::IoError;
pub use reader::{SeriesReader, parse_series};
pub use report::TextReporter;
pub use writer::ResultWriter;

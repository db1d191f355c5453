//! Human-readable sweep report lines.

use std::io::Write;

use bandsweep_dtw::Variant;
use bandsweep_knn::SweepRecord;

use crate::IoError;

/// Streams one line per sweep record to any writer.
///
/// A header line precedes the first record of each variant:
///
/// ```text
/// DTW_D --------------------------------
/// band: 5% -- accuracy: 92.5% -- time: 0.0123s
/// ```
pub struct TextReporter<W: Write> {
    out: W,
    current: Option<Variant>,
}

impl<W: Write> TextReporter<W> {
    /// Create a reporter writing to `out`.
    pub fn new(out: W) -> Self {
        Self { out, current: None }
    }

    /// Write the line for one record, preceded by a header if the variant changed.
    ///
    /// # Errors
    ///
    /// Returns [`IoError::Report`] if the underlying writer fails.
    pub fn report(&mut self, record: &SweepRecord) -> Result<(), IoError> {
        if self.current != Some(record.variant) {
            if self.current.is_some() {
                writeln!(self.out)?;
            }
            writeln!(self.out, "{} {}", record.variant, "-".repeat(32))?;
            self.current = Some(record.variant);
        }

        match &record.outcome {
            Ok(eval) => writeln!(
                self.out,
                "band: {} -- accuracy: {:.2}% -- time: {:.4}s",
                record.band,
                eval.accuracy_percent(),
                eval.elapsed.as_secs_f64()
            )?,
            Err(e) => writeln!(self.out, "band: {} -- failed: {e}", record.band)?,
        }
        Ok(())
    }

    /// Flush and return the underlying writer.
    ///
    /// # Errors
    ///
    /// Returns [`IoError::Report`] if flushing fails.
    pub fn finish(mut self) -> Result<W, IoError> {
        self.out.flush()?;
        Ok(self.out)
    }
}

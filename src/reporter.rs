//! Diagnostics emitted while loading records.

use crate::loader::{LineError, LoadReport};

/// Receiver of load events.
///
/// Every line which does not produce a record, other than a blank one, is
/// passed to [`Reporter::skipped`].
pub trait Reporter {
    /// Line `line` (1-based) was skipped because of `error`.
    fn skipped(&self, line: usize, error: &LineError);

    /// A load finished.
    fn loaded(&self, report: &LoadReport);
}

impl<T> Reporter for &T
where
    T: ?Sized + Reporter,
{
    #[inline]
    fn skipped(&self, line: usize, error: &LineError) {
        (*self).skipped(line, error);
    }

    #[inline]
    fn loaded(&self, report: &LoadReport) {
        (*self).loaded(report);
    }
}

/// Reporter which emits skipped lines as warnings through `tracing`.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingReporter;

impl Reporter for TracingReporter {
    fn skipped(&self, line: usize, error: &LineError) {
        match error {
            LineError::Key(field) | LineError::Value(field) => {
                tracing::warn!(line, "Skipping line: {error}: {field}");
            }
            LineError::MissingSeparator { text, .. } => {
                tracing::warn!(line, "Skipping line: {error}: `{text}`");
            }
            LineError::Encoding => {
                tracing::warn!(line, "Skipping line: {error}");
            }
        }
    }

    fn loaded(&self, report: &LoadReport) {
        tracing::info!(
            loaded = report.loaded,
            skipped = report.skipped,
            "Finished loading records"
        );
    }
}

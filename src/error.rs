//! Error types surfaced by the harmonizing and reporting stages.

use thiserror::Error;

/// Raised when a wave identifier has no entry in the wave table.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unsupported survey wave: {year}")]
pub struct UnsupportedWaveError {
    pub year: u16,
}

/// Failures of a whole report run.
///
/// Per-wave problems are recorded in the report itself; these only cover
/// conditions where no report can be produced.
#[derive(Error, Debug)]
pub enum ReportError {
    /// Every configured wave failed to load or harmonize.
    #[error("no survey wave could be harmonized ({failed} failed)")]
    NoWaves { failed: usize },

    /// The report configuration is unusable.
    #[error("invalid report configuration: {message}")]
    Config { message: String },
}

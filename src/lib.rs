//! Multi-wave survey harmonization and party/age cohort aggregation.
//!
//! Raw waves are mapped onto a common record schema ([`harmonize`]),
//! pooled ([`merge`]) and summarized as survey-weighted means of an
//! environmental-support scale per party and age cohort ([`cohorts`]).
//! [`report`] sequences the stages for a set of wave sources.

pub mod cohorts;
pub mod config;
pub mod error;
pub mod harmonize;
pub mod loader;
pub mod merge;
pub mod output;
pub mod report;
pub mod telemetry;

pub use error::{ReportError, UnsupportedWaveError};

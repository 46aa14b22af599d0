//! Report driver: load, harmonize, pool, aggregate, render.
//!
//! Waves are processed one after another and independently. A wave that
//! cannot be loaded or harmonized is recorded as failed in the report and
//! the remaining waves carry on.

use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{error, info, warn};

use crate::cohorts::{AggregateResult, Binning, PartyResult, aggregate, aggregate_by_party};
use crate::config::ReportConfig;
use crate::error::ReportError;
use crate::harmonize::{NormalizedRecord, harmonize_wave};
use crate::loader::{CsvWaveSource, WaveSource};
use crate::merge::merge_waves;
use crate::output::{CohortRow, CsvTableRenderer, JsonReportRenderer, Renderer, to_rows};

/// Outcome of one wave.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum WaveStatus {
    Harmonized { records: usize },
    Failed { error: String },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WaveSummary {
    pub year: u16,
    #[serde(flatten)]
    pub status: WaveStatus,
}

/// Everything a presentation layer needs from one run.
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub generated_at: DateTime<Utc>,
    pub binning: Binning,
    pub waves: Vec<WaveSummary>,
    pub pooled_records: usize,
    pub rows: Vec<CohortRow>,
    pub by_party: PartyResult,
    #[serde(skip)]
    pub result: AggregateResult,
}

impl Report {
    /// Waves that failed, with their error text.
    pub fn failed_waves(&self) -> impl Iterator<Item = (u16, &str)> {
        self.waves.iter().filter_map(|w| match &w.status {
            WaveStatus::Failed { error } => Some((w.year, error.as_str())),
            WaveStatus::Harmonized { .. } => None,
        })
    }
}

/// Runs every stage except rendering.
///
/// Fails only when no wave could be harmonized.
#[tracing::instrument(skip_all, fields(waves = sources.len(), binning = ?binning))]
pub fn build_report(
    sources: &[&dyn WaveSource],
    binning: Binning,
) -> std::result::Result<Report, ReportError> {
    let mut summaries = Vec::with_capacity(sources.len());
    let mut harmonized: Vec<Vec<NormalizedRecord>> = Vec::new();

    for source in sources {
        let year = source.year();
        match load_and_harmonize(*source) {
            Ok(records) => {
                info!(year, records = records.len(), "Wave harmonized");
                summaries.push(WaveSummary {
                    year,
                    status: WaveStatus::Harmonized {
                        records: records.len(),
                    },
                });
                harmonized.push(records);
            }
            Err(e) => {
                error!(year, error = %e, "Wave failed");
                summaries.push(WaveSummary {
                    year,
                    status: WaveStatus::Failed {
                        error: format!("{e:#}"),
                    },
                });
            }
        }
    }

    if harmonized.is_empty() {
        return Err(ReportError::NoWaves {
            failed: summaries.len(),
        });
    }

    let pooled = merge_waves(harmonized);
    let result = aggregate(&pooled, binning);
    let by_party = aggregate_by_party(&pooled);

    if result.is_empty() {
        warn!(records = pooled.len(), "No cohort has eligible records");
    }
    info!(records = pooled.len(), groups = result.len(), "Cohorts aggregated");

    Ok(Report {
        generated_at: Utc::now(),
        binning,
        waves: summaries,
        pooled_records: pooled.len(),
        rows: to_rows(&result, binning),
        by_party,
        result,
    })
}

/// Builds the report and hands it to `renderer`.
pub fn run_report(
    sources: &[&dyn WaveSource],
    binning: Binning,
    renderer: &dyn Renderer,
) -> Result<Report> {
    let report = build_report(sources, binning)?;
    renderer.render(&report)?;
    Ok(report)
}

/// Runs the report described by a configuration file: CSV wave sources in,
/// CSV table out, plus the JSON report when configured.
pub fn run_from_config(config: &ReportConfig) -> Result<Report> {
    let sources: Vec<CsvWaveSource> = config
        .waves()
        .map(|(year, path)| CsvWaveSource::new(year, path))
        .collect();
    let sources: Vec<&dyn WaveSource> = sources.iter().map(|s| s as &dyn WaveSource).collect();

    let report = run_report(
        &sources,
        config.binning(),
        &CsvTableRenderer {
            path: config.output().to_path_buf(),
        },
    )?;

    if let Some(path) = config.report_json() {
        JsonReportRenderer {
            path: path.to_path_buf(),
        }
        .render(&report)?;
    }

    Ok(report)
}

fn load_and_harmonize(source: &dyn WaveSource) -> Result<Vec<NormalizedRecord>> {
    let raws = source.load()?;
    Ok(harmonize_wave(source.year(), raws)?)
}

//! Presentation handoff for cohort results.
//!
//! Flattens an [`AggregateResult`] into `(party, cohort, weighted mean)` rows
//! and writes them as CSV or JSON, or logs them.

use anyhow::{Context, Result};
use csv::WriterBuilder;
use serde::Serialize;
use std::fs::{self, File};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::cohorts::{AggregateResult, Binning, cohort_label};
use crate::harmonize::Party;
use crate::report::Report;

/// One line of the comparison table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CohortRow {
    pub party: Party,
    pub cohort: i32,
    pub weighted_mean_env_scale: f64,
    pub respondents: usize,
    pub weight_sum: f64,
    pub cohort_label: String,
}

/// Rows in (party, cohort) order.
pub fn to_rows(result: &AggregateResult, binning: Binning) -> Vec<CohortRow> {
    result
        .iter()
        .map(|(key, stat)| CohortRow {
            party: key.party,
            cohort: key.cohort,
            weighted_mean_env_scale: stat.weighted_mean,
            respondents: stat.respondents,
            weight_sum: stat.weight_sum,
            cohort_label: cohort_label(binning, key.cohort),
        })
        .collect()
}

/// Consumer of a finished report, e.g. a chart or table generator.
pub trait Renderer {
    fn render(&self, report: &Report) -> Result<()>;
}

/// Writes the comparison table as CSV, replacing any existing file.
#[derive(Debug, Clone)]
pub struct CsvTableRenderer {
    pub path: PathBuf,
}

impl Renderer for CsvTableRenderer {
    fn render(&self, report: &Report) -> Result<()> {
        write_rows(&self.path, &report.rows)
    }
}

/// Writes the whole report, wave statuses included, as pretty JSON.
#[derive(Debug, Clone)]
pub struct JsonReportRenderer {
    pub path: PathBuf,
}

impl Renderer for JsonReportRenderer {
    fn render(&self, report: &Report) -> Result<()> {
        write_json(&self.path, report)
    }
}

/// Logs the table through `tracing`.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogRenderer;

impl Renderer for LogRenderer {
    fn render(&self, report: &Report) -> Result<()> {
        for row in &report.rows {
            info!(
                party = %row.party,
                cohort = %row.cohort_label,
                mean = row.weighted_mean_env_scale,
                respondents = row.respondents,
                "Cohort"
            );
        }
        Ok(())
    }
}

/// Writes rows to `path` with a header line.
pub fn write_rows(path: &Path, rows: &[CohortRow]) -> Result<()> {
    ensure_parent(path)?;
    debug!(path = %path.display(), rows = rows.len(), "Writing cohort table");

    let file = File::create(path)
        .with_context(|| format!("Failed to create output file: {}", path.display()))?;
    let mut writer = WriterBuilder::new().has_headers(true).from_writer(file);

    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush()?;

    Ok(())
}

/// Serializes `value` as pretty JSON to `path`.
pub fn write_json(path: &Path, value: &impl Serialize) -> Result<()> {
    ensure_parent(path)?;
    let body = serde_json::to_vec_pretty(value)?;
    fs::write(path, body).with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(())
}

fn ensure_parent(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cohorts::aggregate;
    use crate::harmonize::NormalizedRecord;
    use crate::merge::PooledDataset;
    use std::env;

    fn temp_path(name: &str) -> PathBuf {
        env::temp_dir().join(name)
    }

    #[test]
    fn test_to_rows_sorted_with_labels() {
        let rows = to_rows(&sample_result(), Binning::Bands);

        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].party, Party::Democrat);
        assert_eq!(rows[0].cohort, 1);
        assert_eq!(rows[0].cohort_label, "18-38");
        assert_eq!(rows[1].party, Party::Democrat);
        assert_eq!(rows[1].cohort, 4);
        assert_eq!(rows[1].cohort_label, "74+");
        assert_eq!(rows[2].party, Party::Republican);
        assert_eq!(rows[2].weighted_mean_env_scale, 1.0);
    }

    #[test]
    fn test_write_rows_header_and_lines() {
        let path = temp_path("survey_cohorts_test_rows.csv");
        let _ = fs::remove_file(&path);

        let rows = to_rows(&sample_result(), Binning::Bands);
        write_rows(&path, &rows).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        let lines: Vec<_> = content.lines().collect();
        assert_eq!(lines.len(), 4);
        assert!(lines[0].starts_with("party,cohort,weighted_mean_env_scale"));
        assert!(lines[1].starts_with("Democrat,1,"));

        // rewriting replaces rather than appends
        write_rows(&path, &rows).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap().lines().count(), 4);

        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_write_rows_creates_parent_dir() {
        let dir = temp_path("survey_cohorts_test_nested");
        let _ = fs::remove_dir_all(&dir);
        let path = dir.join("out").join("table.csv");

        write_rows(&path, &[]).unwrap();
        assert!(path.exists());

        fs::remove_dir_all(&dir).unwrap();
    }

    // Helper functions for tests
    fn sample_result() -> AggregateResult {
        let records = vec![
            NormalizedRecord::new(2020, None, Some(25), Some(Party::Democrat), [true; 4], Some(1.0)),
            NormalizedRecord::new(2020, None, Some(90), Some(Party::Democrat), [true, true, false, false], Some(1.0)),
            NormalizedRecord::new(2020, None, Some(60), Some(Party::Republican), [true, false, false, false], Some(2.0)),
            NormalizedRecord::new(2020, None, Some(60), None, [false; 4], Some(1.0)),
        ];
        aggregate(&PooledDataset::from(records), Binning::Bands)
    }
}

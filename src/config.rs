//! Report configuration file.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::cohorts::Binning;
use crate::error::ReportError;

const CONFIG_ENV: &str = "SURVEY_COHORTS_CONFIG";
const DEFAULT_CONFIG_PATH: &str = "survey_cohorts.json";

/// Where a report run reads its waves from and writes its table to.
///
/// Stored as a plain JSON object on disk:
/// ```json
/// {
///   "waves": { "2016": "data/cces16.csv.gz", "2020": "data/cces20.csv" },
///   "binning": "capped",
///   "output": "out/cohorts.csv",
///   "report_json": "out/report.json"
/// }
/// ```
/// `binning` defaults to `bands`; `report_json` is optional.
#[derive(Debug, Clone, Deserialize)]
pub struct ReportConfig {
    waves: BTreeMap<u16, PathBuf>,
    #[serde(default)]
    binning: Binning,
    output: PathBuf,
    #[serde(default)]
    report_json: Option<PathBuf>,
}

impl ReportConfig {
    /// Loads the config from a JSON file at `path`.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config: {}", path.display()))?;
        Self::from_json(&content)
    }

    /// Loads `.env` if present, then the file named by `SURVEY_COHORTS_CONFIG`.
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();
        let path = std::env::var(CONFIG_ENV).unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
        Self::load(path)
    }

    pub fn from_json(content: &str) -> Result<Self> {
        let config: ReportConfig = serde_json::from_str(content)?;
        if config.waves.is_empty() {
            return Err(ReportError::Config {
                message: "no waves listed".to_string(),
            }
            .into());
        }
        Ok(config)
    }

    /// `(year, path)` pairs in year order.
    pub fn waves(&self) -> impl Iterator<Item = (u16, &Path)> {
        self.waves.iter().map(|(y, p)| (*y, p.as_path()))
    }

    pub fn binning(&self) -> Binning {
        self.binning
    }

    pub fn output(&self) -> &Path {
        &self.output
    }

    pub fn report_json(&self) -> Option<&Path> {
        self.report_json.as_deref()
    }
}

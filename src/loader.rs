//! Raw wave loading.
//!
//! Survey extracts arrive as delimited text with a header row, optionally
//! gzip-compressed. Every cell is read as text; interpretation is left to
//! the harmonizer.

use anyhow::{Context, Result};
use flate2::read::GzDecoder;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::harmonize::RawWaveRecord;

/// Supplies the raw records of one survey wave.
pub trait WaveSource {
    /// Wave identifier the records belong to.
    fn year(&self) -> u16;

    fn load(&self) -> Result<Vec<RawWaveRecord>>;
}

/// A wave stored as a CSV file. Paths ending in `.gz` are decompressed on the fly.
#[derive(Debug, Clone)]
pub struct CsvWaveSource {
    year: u16,
    path: PathBuf,
}

impl CsvWaveSource {
    pub fn new(year: u16, path: impl Into<PathBuf>) -> Self {
        Self {
            year,
            path: path.into(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl WaveSource for CsvWaveSource {
    fn year(&self) -> u16 {
        self.year
    }

    fn load(&self) -> Result<Vec<RawWaveRecord>> {
        let file = File::open(&self.path)
            .with_context(|| format!("Failed to open wave file: {}", self.path.display()))?;

        let reader: Box<dyn Read> = if is_gzip(&self.path) {
            Box::new(GzDecoder::new(BufReader::new(file)))
        } else {
            Box::new(BufReader::new(file))
        };

        let rows = read_records(reader)
            .with_context(|| format!("Failed to read wave file: {}", self.path.display()))?;

        debug!(year = self.year, path = %self.path.display(), rows = rows.len(), "Wave file loaded");
        Ok(rows)
    }
}

/// A wave already held in memory.
#[derive(Debug, Clone, Default)]
pub struct InMemoryWaveSource {
    year: u16,
    records: Vec<RawWaveRecord>,
}

impl InMemoryWaveSource {
    pub fn new(year: u16, records: Vec<RawWaveRecord>) -> Self {
        Self { year, records }
    }
}

impl WaveSource for InMemoryWaveSource {
    fn year(&self) -> u16 {
        self.year
    }

    fn load(&self) -> Result<Vec<RawWaveRecord>> {
        Ok(self.records.clone())
    }
}

/// Reads header-keyed records from any CSV stream.
pub fn read_records<R: Read>(reader: R) -> Result<Vec<RawWaveRecord>> {
    let mut rdr = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut rows = Vec::new();
    for result in rdr.deserialize() {
        let record: RawWaveRecord = result?;
        rows.push(record);
    }

    Ok(rows)
}

fn is_gzip(path: &Path) -> bool {
    path.extension().and_then(|e| e.to_str()) == Some("gz")
}

//! Per-wave schema table.
//!
//! Each supported wave names its own columns and answer codes. Adding a wave
//! is a new entry in [`WAVES`]; the harmonizer has no per-year branches.

use crate::error::UnsupportedWaveError;

/// One environmental question: its column and the answer code counted as supportive.
#[derive(Debug, Clone, Copy)]
pub struct Indicator {
    pub field: &'static str,
    pub supportive: i64,
}

/// Column names and codes for one survey wave.
#[derive(Debug, Clone, Copy)]
pub struct WaveConfig {
    pub year: u16,
    pub birth_year: &'static str,
    /// 7-point party-identification column, mapped by [`crate::harmonize::Party::from_pid7`].
    pub party: &'static str,
    pub state: &'static str,
    pub weight: &'static str,
    pub indicators: [Indicator; 4],
}

const fn ind(field: &'static str, supportive: i64) -> Indicator {
    Indicator { field, supportive }
}

/// Supported waves, ordered by year.
pub static WAVES: &[WaveConfig] = &[
    WaveConfig {
        year: 2016,
        birth_year: "birthyr",
        party: "pid7",
        state: "inputstate",
        weight: "commonweight_vv",
        indicators: [
            ind("CC16_333a", 1),
            ind("CC16_333b", 1),
            ind("CC16_333c", 1),
            ind("CC16_333d", 2),
        ],
    },
    WaveConfig {
        year: 2018,
        birth_year: "birthyr",
        party: "pid7",
        state: "inputstate",
        weight: "commonweight",
        indicators: [
            ind("CC18_415a", 1),
            ind("CC18_415b", 1),
            ind("CC18_415c", 1),
            ind("CC18_415d", 1),
        ],
    },
    WaveConfig {
        year: 2020,
        birth_year: "birthyr",
        party: "pid7",
        state: "inputstate",
        weight: "commonweight",
        indicators: [
            ind("CC20_333a", 1),
            ind("CC20_333b", 1),
            ind("CC20_333c", 1),
            ind("CC20_333d", 2),
        ],
    },
];

/// Looks up the schema for `year`.
pub fn wave_config(year: u16) -> Result<&'static WaveConfig, UnsupportedWaveError> {
    WAVES
        .iter()
        .find(|w| w.year == year)
        .ok_or(UnsupportedWaveError { year })
}

/// Years present in the wave table.
pub fn supported_years() -> impl Iterator<Item = u16> {
    WAVES.iter().map(|w| w.year)
}

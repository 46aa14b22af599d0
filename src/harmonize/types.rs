//! Record types flowing out of the harmonizer.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// One respondent's answers in one wave, keyed by that wave's column names.
///
/// Cells are kept as text; interpretation happens against the wave table.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(transparent)]
pub struct RawWaveRecord {
    fields: HashMap<String, String>,
}

impl RawWaveRecord {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style setter, mostly useful for fixtures.
    pub fn with(mut self, field: &str, value: impl Into<String>) -> Self {
        self.fields.insert(field.to_string(), value.into());
        self
    }

    /// Raw cell text, if the column is present.
    pub fn get(&self, field: &str) -> Option<&str> {
        self.fields.get(field).map(String::as_str)
    }

    /// Numeric value of a cell. Empty, non-numeric and non-finite cells are missing.
    pub fn number(&self, field: &str) -> Option<f64> {
        self.get(field)
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .and_then(|s| s.parse::<f64>().ok())
            .filter(|v| v.is_finite())
    }

    /// Integer answer code of a cell. `"3"` and `"3.0"` both read as 3;
    /// fractional values are not codes and read as missing.
    pub fn code(&self, field: &str) -> Option<i64> {
        self.number(field)
            .filter(|v| v.fract() == 0.0)
            .map(|v| v as i64)
    }
}

/// Three-way party bucket derived from the 7-point party-identification scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Party {
    Democrat,
    Independent,
    Republican,
}

impl Party {
    /// Maps a 7-point party-id code: 1-3 lean/strong Democrat, 4 pure
    /// independent, 5-7 lean/strong Republican. Anything else is unknown.
    pub fn from_pid7(code: Option<i64>) -> Option<Party> {
        match code? {
            1..=3 => Some(Party::Democrat),
            4 => Some(Party::Independent),
            5..=7 => Some(Party::Republican),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Party::Democrat => "Democrat",
            Party::Independent => "Independent",
            Party::Republican => "Republican",
        }
    }
}

impl fmt::Display for Party {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A respondent in the common schema shared by every wave.
///
/// Built only through [`NormalizedRecord::new`], so `env_scale` always equals
/// the number of set indicators.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NormalizedRecord {
    year: u16,
    state_fips: Option<u16>,
    age: Option<i32>,
    party: Option<Party>,
    env_1: u8,
    env_2: u8,
    env_3: u8,
    env_4: u8,
    env_scale: u8,
    weight: Option<f64>,
}

impl NormalizedRecord {
    pub fn new(
        year: u16,
        state_fips: Option<u16>,
        age: Option<i32>,
        party: Option<Party>,
        indicators: [bool; 4],
        weight: Option<f64>,
    ) -> Self {
        let [env_1, env_2, env_3, env_4] = indicators.map(u8::from);

        Self {
            year,
            state_fips,
            age,
            party,
            env_1,
            env_2,
            env_3,
            env_4,
            env_scale: env_1 + env_2 + env_3 + env_4,
            weight,
        }
    }

    pub fn year(&self) -> u16 {
        self.year
    }

    pub fn state_fips(&self) -> Option<u16> {
        self.state_fips
    }

    pub fn age(&self) -> Option<i32> {
        self.age
    }

    pub fn party(&self) -> Option<Party> {
        self.party
    }

    /// The four 0/1 indicators in question order.
    pub fn indicators(&self) -> [u8; 4] {
        [self.env_1, self.env_2, self.env_3, self.env_4]
    }

    /// Count of supportive answers, 0 through 4.
    pub fn env_scale(&self) -> u8 {
        self.env_scale
    }

    pub fn weight(&self) -> Option<f64> {
        self.weight
    }
}

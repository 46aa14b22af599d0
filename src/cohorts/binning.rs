//! Age-to-cohort binning: capped single years or fixed bands.

use serde::{Deserialize, Serialize};

/// Ages at or above this collapse to a single value under [`Binning::Capped`].
pub const AGE_CAP: i32 = 85;

/// Inclusive age range carrying an ordinal cohort label.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AgeBand {
    pub label: i32,
    pub min: i32,
    pub max: i32,
}

impl AgeBand {
    pub fn contains(&self, age: i32) -> bool {
        (self.min..=self.max).contains(&age)
    }
}

/// Cohort bands, evaluated in order.
pub static AGE_BANDS: &[AgeBand] = &[
    AgeBand { label: 1, min: 18, max: 38 },
    AgeBand { label: 2, min: 39, max: 54 },
    AgeBand { label: 3, min: 55, max: 73 },
    AgeBand { label: 4, min: 74, max: 85 },
];

/// Label for any age outside every band, including ages above 85 and under 18.
pub const FALLBACK_BAND: i32 = 4;

/// How ages turn into the cohort part of an aggregation key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Binning {
    /// Single years of age, capped at [`AGE_CAP`].
    Capped,
    /// Ordinal labels 1-4 from [`AGE_BANDS`].
    #[default]
    Bands,
}

impl Binning {
    pub fn cohort(&self, age: i32) -> i32 {
        match self {
            Binning::Capped => cap_age(age),
            Binning::Bands => age_band(age),
        }
    }
}

pub fn cap_age(age: i32) -> i32 {
    age.min(AGE_CAP)
}

pub fn age_band(age: i32) -> i32 {
    AGE_BANDS
        .iter()
        .find(|band| band.contains(age))
        .map_or(FALLBACK_BAND, |band| band.label)
}

/// Human-readable cohort name for display, e.g. `"39-54"` or `"85+"`.
pub fn cohort_label(binning: Binning, cohort: i32) -> String {
    match binning {
        Binning::Capped if cohort >= AGE_CAP => format!("{AGE_CAP}+"),
        Binning::Capped => cohort.to_string(),
        Binning::Bands if cohort == FALLBACK_BAND => {
            let min = AGE_BANDS
                .iter()
                .find(|b| b.label == FALLBACK_BAND)
                .map_or(AGE_CAP, |b| b.min);
            format!("{min}+")
        }
        Binning::Bands => AGE_BANDS
            .iter()
            .find(|b| b.label == cohort)
            .map_or_else(|| cohort.to_string(), |b| format!("{}-{}", b.min, b.max)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cap_age() {
        assert_eq!(cap_age(90), 85);
        assert_eq!(cap_age(85), 85);
        assert_eq!(cap_age(84), 84);
        assert_eq!(cap_age(18), 18);
    }

    #[test]
    fn test_age_band_boundaries() {
        assert_eq!(age_band(18), 1);
        assert_eq!(age_band(38), 1);
        assert_eq!(age_band(39), 2);
        assert_eq!(age_band(54), 2);
        assert_eq!(age_band(55), 3);
        assert_eq!(age_band(73), 3);
        assert_eq!(age_band(74), 4);
        assert_eq!(age_band(85), 4);
    }

    #[test]
    fn test_age_band_catch_all() {
        assert_eq!(age_band(86), 4);
        assert_eq!(age_band(200), 4);
        assert_eq!(age_band(17), 4);
        assert_eq!(age_band(-3), 4);
    }

    #[test]
    fn test_bands_are_contiguous() {
        for pair in AGE_BANDS.windows(2) {
            assert_eq!(pair[0].max + 1, pair[1].min);
            assert_eq!(pair[0].label + 1, pair[1].label);
        }
    }

    #[test]
    fn test_binning_dispatch() {
        assert_eq!(Binning::Capped.cohort(97), 85);
        assert_eq!(Binning::Bands.cohort(97), 4);
        assert_eq!(Binning::Bands.cohort(40), 2);
        assert_eq!(Binning::default(), Binning::Bands);
    }

    #[test]
    fn test_cohort_label() {
        assert_eq!(cohort_label(Binning::Bands, 1), "18-38");
        assert_eq!(cohort_label(Binning::Bands, 3), "55-73");
        assert_eq!(cohort_label(Binning::Bands, 4), "74+");
        assert_eq!(cohort_label(Binning::Capped, 42), "42");
        assert_eq!(cohort_label(Binning::Capped, 85), "85+");
    }
}

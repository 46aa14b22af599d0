//! Survey-wave harmonization.
//!
//! Maps each wave's raw columns onto [`NormalizedRecord`] using the wave
//! table in [`waves`]. Malformed cells never fail a record: they become
//! non-matching indicators, or absent age, party, state and weight.

pub mod types;
pub mod waves;

pub use types::{NormalizedRecord, Party, RawWaveRecord};
pub use waves::{Indicator, WAVES, WaveConfig, supported_years, wave_config};

use crate::error::UnsupportedWaveError;
use tracing::debug;

/// Harmonizes a single raw record from wave `year`.
pub fn harmonize_record(
    year: u16,
    raw: &RawWaveRecord,
) -> Result<NormalizedRecord, UnsupportedWaveError> {
    let config = wave_config(year)?;
    Ok(apply(config, raw))
}

/// Harmonizes every record of one wave.
///
/// The wave is resolved before any record is touched, so an unsupported
/// year yields an error and no records.
pub fn harmonize_wave<I>(year: u16, raws: I) -> Result<Vec<NormalizedRecord>, UnsupportedWaveError>
where
    I: IntoIterator<Item = RawWaveRecord>,
{
    let config = wave_config(year)?;

    let records: Vec<NormalizedRecord> = raws.into_iter().map(|raw| apply(config, &raw)).collect();

    let unknown_party = records.iter().filter(|r| r.party().is_none()).count();
    let unknown_age = records.iter().filter(|r| r.age().is_none()).count();
    let no_weight = records.iter().filter(|r| r.weight().is_none()).count();
    debug!(
        year,
        records = records.len(),
        unknown_party,
        unknown_age,
        no_weight,
        "Wave harmonized"
    );

    Ok(records)
}

fn apply(config: &WaveConfig, raw: &RawWaveRecord) -> NormalizedRecord {
    let age = raw
        .code(config.birth_year)
        .and_then(|birth| i64::from(config.year).checked_sub(birth))
        .and_then(|age| i32::try_from(age).ok());

    let party = Party::from_pid7(raw.code(config.party));

    let state_fips = raw
        .code(config.state)
        .and_then(|fips| u16::try_from(fips).ok());

    let indicators = config
        .indicators
        .map(|ind| raw.code(ind.field) == Some(ind.supportive));

    NormalizedRecord::new(
        config.year,
        state_fips,
        age,
        party,
        indicators,
        raw.number(config.weight),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_harmonize_full_record() {
        let raw = respondent_2016("1970", "2", "1", "2", "1", "2", "0.8");
        let r = harmonize_record(2016, &raw).unwrap();

        assert_eq!(r.year(), 2016);
        assert_eq!(r.age(), Some(46));
        assert_eq!(r.party(), Some(Party::Democrat));
        assert_eq!(r.state_fips(), Some(6));
        // 2016 counts "2" as supportive on the fourth question only
        assert_eq!(r.indicators(), [1, 0, 1, 1]);
        assert_eq!(r.env_scale(), 3);
        assert_eq!(r.weight(), Some(0.8));
    }

    #[test]
    fn test_supportive_code_is_per_question() {
        // same answers read differently in 2018, where every question uses code 1
        let raw = RawWaveRecord::new()
            .with("birthyr", "1980")
            .with("pid7", "6")
            .with("CC18_415a", "1")
            .with("CC18_415b", "2")
            .with("CC18_415c", "1")
            .with("CC18_415d", "2")
            .with("commonweight", "1.0");
        let r = harmonize_record(2018, &raw).unwrap();

        assert_eq!(r.indicators(), [1, 0, 1, 0]);
        assert_eq!(r.env_scale(), 2);
        assert_eq!(r.party(), Some(Party::Republican));
    }

    #[test]
    fn test_malformed_cells_are_tolerated() {
        let raw = respondent_2016("", "9", "Support", "", "8", "2.0", "abc");
        let r = harmonize_record(2016, &raw).unwrap();

        assert_eq!(r.age(), None);
        assert_eq!(r.party(), None);
        // "2.0" still reads as code 2
        assert_eq!(r.indicators(), [0, 0, 0, 1]);
        assert_eq!(r.env_scale(), 1);
        assert_eq!(r.weight(), None);
    }

    #[test]
    fn test_out_of_range_birth_year_is_absent_age() {
        for birthyr in ["-1e19", "1e19", "-9223372036854775808", "5000000000"] {
            let raw = RawWaveRecord::new().with("birthyr", birthyr).with("pid7", "1");
            let r = harmonize_record(2016, &raw).unwrap();

            assert_eq!(r.age(), None, "birthyr {birthyr}");
            assert_eq!(r.party(), Some(Party::Democrat));
        }
    }

    #[test]
    fn test_missing_columns_are_tolerated() {
        let r = harmonize_record(2020, &RawWaveRecord::new()).unwrap();

        assert_eq!(r.age(), None);
        assert_eq!(r.party(), None);
        assert_eq!(r.state_fips(), None);
        assert_eq!(r.env_scale(), 0);
        assert_eq!(r.weight(), None);
    }

    #[test]
    fn test_party_mapping_every_wave() {
        for year in supported_years() {
            let cfg = wave_config(year).unwrap();
            for code in 0..=9 {
                let raw = RawWaveRecord::new().with(cfg.party, code.to_string());
                let r = harmonize_record(year, &raw).unwrap();
                let expected = match code {
                    1..=3 => Some(Party::Democrat),
                    4 => Some(Party::Independent),
                    5..=7 => Some(Party::Republican),
                    _ => None,
                };
                assert_eq!(r.party(), expected, "year {year} code {code}");
            }
        }
    }

    #[test]
    fn test_unsupported_wave() {
        let raw = respondent_2016("1970", "2", "1", "2", "1", "2", "0.8");
        let err = harmonize_record(2017, &raw).unwrap_err();
        assert_eq!(err.year, 2017);

        let err = harmonize_wave(1990, vec![raw]).unwrap_err();
        assert_eq!(err, UnsupportedWaveError { year: 1990 });
    }

    #[test]
    fn test_harmonize_wave_keeps_every_record() {
        let raws = vec![
            respondent_2016("1950", "7", "1", "1", "1", "2", "1.1"),
            respondent_2016("", "", "", "", "", "", ""),
            respondent_2016("1990", "4", "2", "2", "2", "1", "0.9"),
        ];
        let records = harmonize_wave(2016, raws).unwrap();

        assert_eq!(records.len(), 3);
        assert_eq!(records[0].env_scale(), 4);
        assert_eq!(records[1].party(), None);
        assert_eq!(records[2].env_scale(), 0);
        for r in &records {
            assert!(r.env_scale() <= 4);
            assert_eq!(r.env_scale(), r.indicators().iter().sum::<u8>());
        }
    }

    // Helper functions for tests
    fn respondent_2016(
        birthyr: &str,
        pid7: &str,
        a: &str,
        b: &str,
        c: &str,
        d: &str,
        weight: &str,
    ) -> RawWaveRecord {
        RawWaveRecord::new()
            .with("birthyr", birthyr)
            .with("pid7", pid7)
            .with("inputstate", "6")
            .with("CC16_333a", a)
            .with("CC16_333b", b)
            .with("CC16_333c", c)
            .with("CC16_333d", d)
            .with("commonweight_vv", weight)
    }
}

//! Cohort aggregation.
//!
//! Groups a pooled dataset by party and binned age and computes the
//! survey-weighted mean of `env_scale` per group.

pub mod aggregate;
pub mod binning;
pub mod types;
pub mod utility;

pub use aggregate::{aggregate, aggregate_by_party, aggregate_with};
pub use binning::{AGE_BANDS, AGE_CAP, AgeBand, Binning, age_band, cap_age, cohort_label};
pub use types::{AggregateResult, CohortKey, CohortStat, PartyResult};

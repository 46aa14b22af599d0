//! Grouping of pooled records into party/cohort weighted means.

use std::collections::BTreeMap;
use tracing::debug;

use crate::cohorts::binning::Binning;
use crate::cohorts::types::{AggregateResult, CohortKey, CohortStat, PartyResult};
use crate::cohorts::utility::WeightedAccumulator;
use crate::harmonize::NormalizedRecord;
use crate::merge::PooledDataset;

/// Aggregates a pooled dataset by party and binned age.
///
/// Records with unknown party or age are skipped, as are records whose
/// weight is missing or not positive.
pub fn aggregate(dataset: &PooledDataset, binning: Binning) -> AggregateResult {
    aggregate_with(dataset, |age| binning.cohort(age))
}

/// Like [`aggregate`] but with an arbitrary age-to-cohort function.
pub fn aggregate_with<F>(dataset: &PooledDataset, bin: F) -> AggregateResult
where
    F: Fn(i32) -> i32,
{
    let groups = group_by(dataset, |r| {
        Some(CohortKey {
            party: r.party()?,
            cohort: bin(r.age()?),
        })
    });

    AggregateResult { groups }
}

/// Aggregates by party alone. Records without an age still count here.
pub fn aggregate_by_party(dataset: &PooledDataset) -> PartyResult {
    group_by(dataset, NormalizedRecord::party)
}

fn group_by<K, F>(dataset: &PooledDataset, key_of: F) -> BTreeMap<K, CohortStat>
where
    K: Ord + Copy,
    F: Fn(&NormalizedRecord) -> Option<K>,
{
    let mut accumulators: BTreeMap<K, WeightedAccumulator> = BTreeMap::new();
    let mut unkeyed = 0usize;
    let mut unweighted = 0usize;

    for record in dataset.iter() {
        let Some(key) = key_of(record) else {
            unkeyed += 1;
            continue;
        };

        let acc = accumulators.entry(key).or_default();
        if !acc.push(f64::from(record.env_scale()), record.weight()) {
            unweighted += 1;
        }
    }

    let groups: BTreeMap<K, CohortStat> = accumulators
        .into_iter()
        .filter_map(|(key, acc)| {
            Some((
                key,
                CohortStat {
                    weighted_mean: acc.mean()?,
                    stddev: acc.stddev()?,
                    respondents: acc.count(),
                    weight_sum: acc.weight_sum(),
                },
            ))
        })
        .collect();

    debug!(
        records = dataset.len(),
        unkeyed,
        unweighted,
        groups = groups.len(),
        "Aggregated cohorts"
    );

    groups
}

//! Data types produced by the cohort aggregator.

use serde::Serialize;
use std::collections::BTreeMap;

use crate::harmonize::Party;

/// Grouping key: party and the binned cohort (capped age or band label).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct CohortKey {
    pub party: Party,
    pub cohort: i32,
}

/// Weighted summary of `env_scale` for one group.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CohortStat {
    pub weighted_mean: f64,
    pub stddev: f64,
    /// Records that contributed, i.e. had a usable weight.
    pub respondents: usize,
    pub weight_sum: f64,
}

/// Group statistics keyed by [`CohortKey`]. Groups with no eligible
/// records are absent; iteration is in key order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AggregateResult {
    pub(crate) groups: BTreeMap<CohortKey, CohortStat>,
}

impl AggregateResult {
    pub fn get(&self, party: Party, cohort: i32) -> Option<&CohortStat> {
        self.groups.get(&CohortKey { party, cohort })
    }

    /// Weighted mean `env_scale` for a group, if the group has data.
    pub fn mean(&self, party: Party, cohort: i32) -> Option<f64> {
        self.get(party, cohort).map(|s| s.weighted_mean)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&CohortKey, &CohortStat)> {
        self.groups.iter()
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}

/// Party-only view, ignoring age.
pub type PartyResult = BTreeMap<Party, CohortStat>;

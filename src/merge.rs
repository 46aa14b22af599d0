//! Pooling of harmonized waves into one dataset.

use serde::Serialize;

use crate::harmonize::NormalizedRecord;

/// All harmonized records across waves, each treated as an independent observation.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct PooledDataset {
    records: Vec<NormalizedRecord>,
}

impl PooledDataset {
    pub fn records(&self) -> &[NormalizedRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &NormalizedRecord> {
        self.records.iter()
    }
}

impl From<Vec<NormalizedRecord>> for PooledDataset {
    fn from(records: Vec<NormalizedRecord>) -> Self {
        Self { records }
    }
}

/// Concatenates per-wave collections. No records are dropped or deduplicated.
pub fn merge_waves<I>(waves: I) -> PooledDataset
where
    I: IntoIterator<Item = Vec<NormalizedRecord>>,
{
    let records = waves.into_iter().flatten().collect();
    PooledDataset { records }
}

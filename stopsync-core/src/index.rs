//! Registry lookup index keyed by public stop identifier.

use std::collections::HashMap;

use log::warn;

use crate::stop::RegistryStop;

/// Mapping from `ref` to [`RegistryStop`], built once per run.
///
/// The registry is expected to carry unique identifiers. When it does not,
/// the later record overwrites the earlier one; every overwrite is logged
/// and counted so the anomaly surfaces in the run statistics.
#[derive(Debug, Clone, Default)]
pub struct RegistryIndex {
    by_ref: HashMap<String, RegistryStop>,
    duplicates: usize,
}

impl RegistryIndex {
    /// Build the index from loaded registry stops.
    pub fn from_stops<I>(stops: I) -> Self
    where
        I: IntoIterator<Item = RegistryStop>,
    {
        let mut index = Self::default();
        for stop in stops {
            if let Some(previous) = index.by_ref.insert(stop.ref_id.clone(), stop) {
                warn!(
                    "duplicate registry ref {}: replacing node {}",
                    previous.ref_id, previous.node_id
                );
                index.duplicates += 1;
            }
        }
        index
    }

    /// Look up a registry stop by its public identifier.
    pub fn get(&self, ref_id: &str) -> Option<&RegistryStop> {
        self.by_ref.get(ref_id)
    }

    /// Number of distinct identifiers in the index.
    pub fn len(&self) -> usize {
        self.by_ref.len()
    }

    /// Whether the index holds no registry stops.
    pub fn is_empty(&self) -> bool {
        self.by_ref.is_empty()
    }

    /// Number of duplicate identifiers dropped while building the index.
    pub fn duplicate_count(&self) -> usize {
        self.duplicates
    }
}

//! Per-trait tallies: cumulative success counts and frequency snapshots.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::catalog::TraitKind;

/// Mapping from trait to a count, in catalog order.
///
/// Missing traits read as zero.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TraitCounts(BTreeMap<TraitKind, u32>);

impl TraitCounts {
    pub fn new() -> Self {
        Self::default()
    }

    /// A tally with an explicit zero for every catalog trait.
    pub fn zeroed() -> Self {
        Self(TraitKind::ALL.iter().map(|&k| (k, 0)).collect())
    }

    pub fn get(&self, kind: TraitKind) -> u32 {
        self.0.get(&kind).copied().unwrap_or(0)
    }

    /// Whether the trait has an entry, zero or not.
    pub fn contains(&self, kind: TraitKind) -> bool {
        self.0.contains_key(&kind)
    }

    pub fn set(&mut self, kind: TraitKind, count: u32) {
        self.0.insert(kind, count);
    }

    pub fn increment(&mut self, kind: TraitKind) {
        self.add(kind, 1);
    }

    pub fn add(&mut self, kind: TraitKind, n: u32) {
        *self.0.entry(kind).or_insert(0) += n;
    }

    /// Entries in catalog order, zeros included if stored.
    pub fn iter(&self) -> impl Iterator<Item = (TraitKind, u32)> + '_ {
        self.0.iter().map(|(&k, &v)| (k, v))
    }

    /// Traits with a count above zero.
    pub fn present(&self) -> impl Iterator<Item = TraitKind> + '_ {
        self.iter().filter(|(_, v)| *v > 0).map(|(k, _)| k)
    }

    pub fn total(&self) -> u32 {
        self.0.values().sum()
    }

    /// Sum over a subset of traits.
    pub fn sum_of(&self, kinds: &[TraitKind]) -> u32 {
        kinds.iter().map(|&k| self.get(k)).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

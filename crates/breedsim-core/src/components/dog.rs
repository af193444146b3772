//! Dog-related components: Dog and the TraitSet it carries.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::catalog::TraitKind;

/// Set of traits, kept in catalog order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TraitSet(BTreeSet<TraitKind>);

impl TraitSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark a trait present. Returns false if it already was.
    pub fn insert(&mut self, kind: TraitKind) -> bool {
        self.0.insert(kind)
    }

    pub fn contains(&self, kind: TraitKind) -> bool {
        self.0.contains(&kind)
    }

    /// True when every listed trait is present.
    pub fn contains_all(&self, kinds: &[TraitKind]) -> bool {
        kinds.iter().all(|k| self.0.contains(k))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }

    /// Traits in catalog order.
    pub fn iter(&self) -> impl Iterator<Item = TraitKind> + '_ {
        self.0.iter().copied()
    }

    /// Display names in catalog order.
    pub fn names(&self) -> Vec<&'static str> {
        self.iter().map(TraitKind::name).collect()
    }
}

impl FromIterator<TraitKind> for TraitSet {
    fn from_iter<I: IntoIterator<Item = TraitKind>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl Extend<TraitKind> for TraitSet {
    fn extend<I: IntoIterator<Item = TraitKind>>(&mut self, iter: I) {
        self.0.extend(iter);
    }
}

/// One member of a generation's litter.
///
/// Dogs carry no identity or ancestry. Lineage lives at the population
/// level through the inherited-trait set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dog {
    pub traits: TraitSet,
}

impl Dog {
    pub fn new(traits: TraitSet) -> Self {
        Self { traits }
    }

    pub fn has(&self, kind: TraitKind) -> bool {
        self.traits.contains(kind)
    }

    /// Whether this dog alone carries every required trait.
    pub fn satisfies(&self, required: &[TraitKind]) -> bool {
        self.traits.contains_all(required)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trait_set_keeps_catalog_order() {
        let set: TraitSet = [TraitKind::Loyalty, TraitKind::FloppyEars, TraitKind::ThickFur]
            .into_iter()
            .collect();
        assert_eq!(set.names(), vec!["Floppy Ears", "Thick Fur", "Loyalty"]);
    }

    #[test]
    fn insert_reports_new_members() {
        let mut set = TraitSet::new();
        assert!(set.insert(TraitKind::BigEyes));
        assert!(!set.insert(TraitKind::BigEyes));
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn satisfies_needs_every_trait() {
        let required = [TraitKind::BigEyes, TraitKind::Loyalty];
        let partial = Dog::new([TraitKind::BigEyes].into_iter().collect());
        let full = Dog::new(
            [TraitKind::BigEyes, TraitKind::Loyalty, TraitKind::ThickFur]
                .into_iter()
                .collect(),
        );
        assert!(!partial.satisfies(&required));
        assert!(full.satisfies(&required));
    }

    #[test]
    fn empty_requirement_is_trivially_met() {
        assert!(Dog::default().satisfies(&[]));
    }
}

//! The edge label secondary index (§3 `LabelIndexKey`, §4.3).
//!
//! Maps `Label -> {EdgeId}`.

use loomgraph_common::hash::{FxHashMap, FxHashSet};
use loomgraph_common::{EdgeId, Label};
use parking_lot::RwLock;

/// The label index: one bucket per distinct edge label seen across all
/// live edges.
pub struct LabelIndex {
    buckets: RwLock<FxHashMap<Label, FxHashSet<EdgeId>>>,
}

impl LabelIndex {
    /// Creates a new, empty label index.
    #[must_use]
    pub fn new() -> Self {
        Self { buckets: RwLock::new(FxHashMap::default()) }
    }

    /// Adds `edge` to the bucket for `label`.
    pub fn index(&self, edge: EdgeId, label: Label) {
        self.buckets.write().entry(label).or_default().insert(edge);
    }

    /// Removes `edge` from the bucket for `label`, dropping the bucket
    /// entirely once it's empty.
    pub fn unindex(&self, edge: EdgeId, label: &Label) {
        let mut buckets = self.buckets.write();
        if let Some(set) = buckets.get_mut(label) {
            set.remove(&edge);
            if set.is_empty() {
                buckets.remove(label);
            }
        }
    }

    /// Returns the live edge ids with the given label.
    #[must_use]
    pub fn find(&self, label: &str) -> Vec<EdgeId> {
        self.buckets.read().get(label).map(|s| s.iter().copied().collect()).unwrap_or_default()
    }

    /// Returns the number of distinct labels, for [`crate::stats`].
    #[must_use]
    pub fn bucket_count(&self) -> usize {
        self.buckets.read().len()
    }

    /// Returns the total number of `(label, edge)` entries, for [`crate::stats`].
    #[must_use]
    pub fn entry_count(&self) -> usize {
        self.buckets.read().values().map(FxHashSet::len).sum()
    }
}

impl Default for LabelIndex {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn index_and_find_roundtrip() {
        let idx = LabelIndex::new();
        let knows = Label::from("knows");

        idx.index(EdgeId::new(1), knows.clone());
        idx.index(EdgeId::new(2), knows.clone());

        let mut found = idx.find("knows");
        found.sort();
        assert_eq!(found, vec![EdgeId::new(1), EdgeId::new(2)]);
    }

    #[test]
    fn unindex_empties_bucket() {
        let idx = LabelIndex::new();
        let knows = Label::from("knows");

        idx.index(EdgeId::new(1), knows.clone());
        idx.unindex(EdgeId::new(1), &knows);

        assert!(idx.find("knows").is_empty());
        assert_eq!(idx.bucket_count(), 0);
    }
}

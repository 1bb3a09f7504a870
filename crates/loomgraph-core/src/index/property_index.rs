//! The property secondary index (§3 `PropertyIndexKey`, §4.3).
//!
//! Maps `(PropertyKey, PropertyValue) -> {NodeId}`. This is the structure
//! `find_nodes_by_property` reads and `MutationEngine` is the sole writer
//! of.

use loomgraph_common::hash::{FxHashMap, FxHashSet};
use loomgraph_common::{NodeId, PropertyKey, PropertyValue};
use parking_lot::RwLock;

/// The property index: one bucket per distinct `(key, value)` pair seen
/// across all live nodes.
pub struct PropertyIndex {
    buckets: RwLock<FxHashMap<(PropertyKey, PropertyValue), FxHashSet<NodeId>>>,
}

impl PropertyIndex {
    /// Creates a new, empty property index.
    #[must_use]
    pub fn new() -> Self {
        Self { buckets: RwLock::new(FxHashMap::default()) }
    }

    /// Adds `node` to the bucket for `(key, value)`. Idempotent: indexing
    /// the same pair twice does not produce a duplicate entry, since the
    /// bucket is a set.
    pub fn index(&self, node: NodeId, key: PropertyKey, value: PropertyValue) {
        self.buckets.write().entry((key, value)).or_default().insert(node);
    }

    /// Removes `node` from the bucket for `(key, value)`, dropping the
    /// bucket entirely once it's empty.
    pub fn unindex(&self, node: NodeId, key: &PropertyKey, value: &PropertyValue) {
        let mut buckets = self.buckets.write();
        let bucket_key = (key.clone(), value.clone());
        if let Some(set) = buckets.get_mut(&bucket_key) {
            set.remove(&node);
            if set.is_empty() {
                buckets.remove(&bucket_key);
            }
        }
    }

    /// Returns the live node ids with property `key == value`.
    #[must_use]
    pub fn find(&self, key: &PropertyKey, value: &PropertyValue) -> Vec<NodeId> {
        let bucket_key = (key.clone(), value.clone());
        self.buckets.read().get(&bucket_key).map(|s| s.iter().copied().collect()).unwrap_or_default()
    }

    /// Returns the number of distinct `(key, value)` buckets, for [`crate::stats`].
    #[must_use]
    pub fn bucket_count(&self) -> usize {
        self.buckets.read().len()
    }

    /// Returns the total number of `(bucket, node)` entries, for [`crate::stats`].
    #[must_use]
    pub fn entry_count(&self) -> usize {
        self.buckets.read().values().map(FxHashSet::len).sum()
    }
}

impl Default for PropertyIndex {
    fn default() -> Self {
        Self::new()
    }
}

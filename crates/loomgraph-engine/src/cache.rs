//! The bounded query-result cache (§4.6).
//!
//! Memoizes `traverse` and `shortest_path` results, keyed by the operation
//! and its canonicalized arguments. A cache is purely an optimization:
//! [`QueryCache::get`] only ever returns what the uncached kernel would
//! have computed at the version it was inserted at, so disabling it never
//! changes a result (Testable Property 8).

use indexmap::IndexMap;
use loomgraph_common::{NodeId, Version};
use loomgraph_core::query::path::PathOutcome;
use loomgraph_core::{Direction, Node};
use parking_lot::Mutex;
use std::time::{Duration, Instant};

/// The operation a cache entry was computed for, plus its arguments.
/// Together these form the cache key (§4.6 `(op, canonical_args)`).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum CacheOp {
    /// A `traverse(start, direction, depth)` call.
    Traverse { start: NodeId, direction: Direction, depth: usize },
    /// A `shortest_path(from, to, max_depth)` call.
    ShortestPath { from: NodeId, to: NodeId, max_depth: usize },
}

/// A memoized result.
#[derive(Debug, Clone)]
pub enum CacheValue {
    /// The node list a `traverse` call returned.
    Nodes(Vec<Node>),
    /// The outcome a `shortest_path` call returned.
    Path(PathOutcome),
}

struct Entry {
    value: CacheValue,
    inserted_at_version: Version,
    inserted_at: Instant,
}

/// A bounded, version-stamped, TTL-expiring memo table.
pub struct QueryCache {
    entries: Mutex<IndexMap<CacheOp, Entry>>,
    capacity: usize,
    ttl: Duration,
}

impl QueryCache {
    /// Creates a cache with the given entry-count bound and TTL.
    #[must_use]
    pub fn new(capacity: usize, ttl: Duration) -> Self {
        Self { entries: Mutex::new(IndexMap::new()), capacity, ttl }
    }

    /// Looks up `op`. Returns `Some` only if an entry exists, was inserted
    /// at exactly `current_version`, and hasn't aged past the TTL;
    /// otherwise returns `None` without mutating the cache beyond LRU
    /// bookkeeping on a hit.
    pub fn get(&self, op: &CacheOp, current_version: Version) -> Option<CacheValue> {
        let mut entries = self.entries.lock();
        let fresh = match entries.get(op) {
            Some(entry) => {
                entry.inserted_at_version == current_version && entry.inserted_at.elapsed() < self.ttl
            }
            None => return None,
        };
        if !fresh {
            entries.shift_remove(op);
            return None;
        }
        // Move the hit entry to the back so eviction stays LRU-ish.
        let (key, entry) = entries.shift_remove_entry(op)?;
        let value = entry.value.clone();
        entries.insert(key, entry);
        Some(value)
    }

    /// Records the result of computing `op` at `version`. Evicts the
    /// least-recently-used entry first if the cache is at capacity.
    pub fn put(&self, op: CacheOp, value: CacheValue, version: Version) {
        if self.capacity == 0 {
            return;
        }
        let mut entries = self.entries.lock();
        if entries.len() >= self.capacity && !entries.contains_key(&op) {
            entries.shift_remove_index(0);
        }
        entries.insert(op, Entry { value, inserted_at_version: version, inserted_at: Instant::now() });
    }

    /// Drops every entry. Called by the mutation engine is unnecessary in
    /// practice (version stamping already invalidates stale entries
    /// lazily) but exposed for hosts that want to reclaim memory eagerly.
    pub fn clear(&self) {
        self.entries.lock().clear();
    }

    /// Returns the number of entries currently cached, live or stale.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    /// Returns `true` if the cache holds no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn node(id: u64) -> Node {
        Node::new(NodeId::new(id), loomgraph_common::PropertyMap::default())
    }

    #[test]
    fn hit_returns_value_at_matching_version() {
        let cache = QueryCache::new(10, Duration::from_secs(60));
        let op = CacheOp::Traverse { start: NodeId::new(1), direction: Direction::Out, depth: 2 };
        cache.put(op.clone(), CacheValue::Nodes(vec![node(2)]), Version::zero().next());

        let hit = cache.get(&op, Version::zero().next());
        assert!(matches!(hit, Some(CacheValue::Nodes(nodes)) if nodes.len() == 1));
    }

    #[test]
    fn stale_version_is_a_miss() {
        let cache = QueryCache::new(10, Duration::from_secs(60));
        let op = CacheOp::Traverse { start: NodeId::new(1), direction: Direction::Out, depth: 2 };
        cache.put(op.clone(), CacheValue::Nodes(vec![]), Version::zero());

        assert!(cache.get(&op, Version::zero().next()).is_none());
    }

    #[test]
    fn expired_ttl_is_a_miss() {
        let cache = QueryCache::new(10, Duration::from_millis(0));
        let op = CacheOp::ShortestPath { from: NodeId::new(1), to: NodeId::new(2), max_depth: 5 };
        cache.put(op.clone(), CacheValue::Path(PathOutcome::NotFound), Version::zero());
        std::thread::sleep(Duration::from_millis(2));

        assert!(cache.get(&op, Version::zero()).is_none());
    }

    #[test]
    fn capacity_bound_is_respected() {
        let cache = QueryCache::new(2, Duration::from_secs(60));
        for i in 0..5 {
            let op = CacheOp::Traverse { start: NodeId::new(i), direction: Direction::Out, depth: 1 };
            cache.put(op, CacheValue::Nodes(vec![]), Version::zero());
        }
        assert!(cache.len() <= 2);
    }

    #[test]
    fn zero_capacity_disables_storage() {
        let cache = QueryCache::new(0, Duration::from_secs(60));
        let op = CacheOp::Traverse { start: NodeId::new(1), direction: Direction::Out, depth: 1 };
        cache.put(op.clone(), CacheValue::Nodes(vec![]), Version::zero());
        assert!(cache.is_empty());
        assert!(cache.get(&op, Version::zero()).is_none());
    }
}

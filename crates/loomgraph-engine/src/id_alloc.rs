//! Monotonic id generation (§4.1).

use loomgraph_common::{EdgeId, NodeId};
use std::sync::atomic::{AtomicU64, Ordering};

/// One atomic counter per id kind, both starting at 1 so `0` stays the
/// reserved invalid sentinel (§3).
pub struct IdAllocator {
    next_node: AtomicU64,
    next_edge: AtomicU64,
}

impl IdAllocator {
    /// Creates a fresh allocator. Only [`crate::mutation::MutationEngine`]
    /// should hold one.
    #[must_use]
    pub fn new() -> Self {
        Self { next_node: AtomicU64::new(1), next_edge: AtomicU64::new(1) }
    }

    /// Returns the next node id and advances the counter.
    pub fn next_node_id(&self) -> NodeId {
        NodeId::new(self.next_node.fetch_add(1, Ordering::Relaxed))
    }

    /// Returns the next edge id and advances the counter.
    pub fn next_edge_id(&self) -> EdgeId {
        EdgeId::new(self.next_edge.fetch_add(1, Ordering::Relaxed))
    }
}

impl Default for IdAllocator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_are_distinct_and_increasing() {
        let alloc = IdAllocator::new();
        let a = alloc.next_node_id();
        let b = alloc.next_node_id();
        assert_ne!(a, b);
        assert!(b.raw() > a.raw());
        assert!(a.is_valid());
    }

    #[test]
    fn node_and_edge_counters_are_independent() {
        let alloc = IdAllocator::new();
        let node = alloc.next_node_id();
        let edge = alloc.next_edge_id();
        assert_eq!(node.raw(), 1);
        assert_eq!(edge.raw(), 1);
    }
}

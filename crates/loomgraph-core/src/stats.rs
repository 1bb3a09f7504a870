//! Advisory counts and memory estimates (§4.10).
//!
//! Stable Rust gives no allocator-introspection API, so `memory` is a
//! structural estimate built from `size_of` and the live element counts,
//! not a true heap snapshot. It is meant to track growth, not to be exact.

use crate::index::IndexLayer;
use crate::store::Store;
use loomgraph_common::{EdgeId, Label, NodeId, PropertyKey, PropertyValue, Version};
use serde::{Deserialize, Serialize};

/// Structural counts and an advisory memory estimate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stats {
    /// Number of live nodes.
    pub total_nodes: usize,
    /// Number of live edges.
    pub total_edges: usize,
    /// Advisory byte estimates, broken down by component.
    pub memory: MemoryStats,
}

/// Advisory byte estimates for the store and the secondary indices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemoryStats {
    /// Estimated bytes held by node records.
    pub nodes: usize,
    /// Estimated bytes held by edge records, including adjacency entries.
    pub edges: usize,
    /// Estimated bytes held by the property and label indices.
    pub indices: usize,
}

/// Computes [`Stats`] for the given store and index layer.
#[must_use]
pub fn compute(store: &Store, index: &IndexLayer) -> Stats {
    let total_nodes = store.node_count();
    let total_edges = store.edge_count();

    let node_bytes = total_nodes
        * (std::mem::size_of::<NodeId>() + std::mem::size_of::<PropertyKey>() + std::mem::size_of::<PropertyValue>());
    // Each live edge occupies one record plus one adjacency slot in each
    // of the two directions (§4.2).
    let edge_slot = std::mem::size_of::<EdgeId>()
        + 2 * std::mem::size_of::<NodeId>()
        + std::mem::size_of::<Label>()
        + 2 * (std::mem::size_of::<NodeId>() + std::mem::size_of::<EdgeId>());
    let edge_bytes = total_edges * edge_slot;

    let property_entries = index.properties.entry_count();
    let label_entries = index.labels.entry_count();
    let index_bytes = property_entries * std::mem::size_of::<NodeId>()
        + label_entries * std::mem::size_of::<EdgeId>();

    Stats {
        total_nodes,
        total_edges,
        memory: MemoryStats {
            nodes: node_bytes,
            edges: edge_bytes,
            indices: index_bytes,
        },
    }
}

/// Stamps a [`Stats`] snapshot with the store version it was computed
/// against, for callers that want to correlate a stats read with a
/// specific point in the mutation log.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct VersionedStats {
    /// The stats snapshot.
    pub stats: Stats,
    /// The store version at the time of the read.
    pub version: Version,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_store_has_zero_counts() {
        let store = Store::new();
        let index = IndexLayer::new();
        let stats = compute(&store, &index);
        assert_eq!(stats.total_nodes, 0);
        assert_eq!(stats.total_edges, 0);
        assert_eq!(stats.memory.nodes, 0);
        assert_eq!(stats.memory.edges, 0);
    }

    #[test]
    fn node_insertion_grows_memory_estimate() {
        let store = Store::new();
        let index = IndexLayer::new();
        store.insert_node(NodeId::new(1), loomgraph_common::PropertyMap::default());
        let stats = compute(&store, &index);
        assert_eq!(stats.total_nodes, 1);
        assert!(stats.memory.nodes > 0);
    }
}

//! The concurrent in-memory store (§4.2).
//!
//! `Store` owns the four logical maps the rest of the spec talks about:
//! `nodes`, `edges`, `out_adj`, `in_adj`. Every read method here is safe to
//! call from any number of threads concurrently; the write methods are
//! meant to be called only by the engine crate's `MutationEngine`, which
//! serializes all writers so the maps are never seen half-updated.

use crate::adjacency::AdjacencyIndex;
use crate::direction::Direction;
use crate::edge::Edge;
use crate::node::Node;
use loomgraph_common::hash::FxHashMap;
use loomgraph_common::{EdgeId, NodeId, PropertyMap};
use parking_lot::RwLock;

/// The concurrent store of nodes, edges, and adjacency (§4.2 C2).
pub struct Store {
    nodes: RwLock<FxHashMap<NodeId, Node>>,
    edges: RwLock<FxHashMap<EdgeId, Edge>>,
    out_adj: AdjacencyIndex,
    in_adj: AdjacencyIndex,
}

impl Store {
    /// Creates a new, empty store.
    #[must_use]
    pub fn new() -> Self {
        Self {
            nodes: RwLock::new(FxHashMap::default()),
            edges: RwLock::new(FxHashMap::default()),
            out_adj: AdjacencyIndex::new(),
            in_adj: AdjacencyIndex::new(),
        }
    }

    // === Reader-facing API ===

    /// Looks up a node by id.
    #[must_use]
    pub fn get_node(&self, id: NodeId) -> Option<Node> {
        self.nodes.read().get(&id).cloned()
    }

    /// Looks up an edge by id.
    #[must_use]
    pub fn get_edge(&self, id: EdgeId) -> Option<Edge> {
        self.edges.read().get(&id).cloned()
    }

    /// Returns `true` if `id` refers to a live node.
    #[must_use]
    pub fn node_exists(&self, id: NodeId) -> bool {
        self.nodes.read().contains_key(&id)
    }

    /// Returns the live outgoing edge ids for `id` (empty if the node is
    /// absent).
    #[must_use]
    pub fn outgoing(&self, id: NodeId) -> Vec<EdgeId> {
        self.out_adj.edges(id).into_iter().map(|(_, e)| e).collect()
    }

    /// Returns the live incoming edge ids for `id` (empty if the node is
    /// absent).
    #[must_use]
    pub fn incoming(&self, id: NodeId) -> Vec<EdgeId> {
        self.in_adj.edges(id).into_iter().map(|(_, e)| e).collect()
    }

    /// Returns the neighbor node ids reachable from `id` in one hop, in the
    /// given direction. Used by [`crate::query::traversal`] and
    /// [`crate::query::path`].
    #[must_use]
    pub fn neighbor_nodes(&self, id: NodeId, direction: Direction) -> Vec<NodeId> {
        match direction {
            Direction::Out => self.out_adj.neighbors(id),
            Direction::In => self.in_adj.neighbors(id),
            Direction::Both => {
                let mut combined = self.out_adj.neighbors(id);
                combined.extend(self.in_adj.neighbors(id));
                combined
            }
        }
    }

    /// Returns a snapshot of every live node. O(n); intended for the
    /// pattern dispatcher's `MATCH (n) RETURN n` and for analytics
    /// collaborators (§6), not for hot paths.
    #[must_use]
    pub fn list_nodes(&self) -> Vec<Node> {
        self.nodes.read().values().cloned().collect()
    }

    /// Returns a snapshot of every live edge.
    #[must_use]
    pub fn list_edges(&self) -> Vec<Edge> {
        self.edges.read().values().cloned().collect()
    }

    /// Returns the number of live nodes.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.nodes.read().len()
    }

    /// Returns the number of live edges.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.edges.read().len()
    }

    // === Writer-only API (§4.2) ===
    //
    // These are `pub` because `MutationEngine` lives in a different crate,
    // but nothing outside `MutationEngine` should call them: doing so
    // bypasses validation and index maintenance and can violate the §3
    // invariants.

    /// Inserts a new node record. The caller must have already validated
    /// `properties` and allocated `id` from the `IdAllocator`.
    pub fn insert_node(&self, id: NodeId, properties: PropertyMap) {
        self.nodes.write().insert(id, Node::new(id, properties));
    }

    /// Inserts a new edge record.
    pub fn insert_edge(&self, edge: Edge) {
        let id = edge.id;
        self.edges.write().insert(id, edge);
    }

    /// Removes a node's entry. The caller must have already removed every
    /// incident edge (§4.5 `delete_node` step order).
    pub fn remove_node_entry(&self, id: NodeId) -> Option<Node> {
        let node = self.nodes.write().remove(&id);
        self.out_adj.remove_owner(id);
        self.in_adj.remove_owner(id);
        node
    }

    /// Removes an edge's entry.
    pub fn remove_edge_entry(&self, id: EdgeId) -> Option<Edge> {
        self.edges.write().remove(&id)
    }

    /// Records `edge_id` as outgoing from `from` and/or incoming to `to`,
    /// per `kind`.
    pub fn adj_add(&self, from: NodeId, to: NodeId, edge_id: EdgeId) {
        self.out_adj.add(from, to, edge_id);
        self.in_adj.add(to, from, edge_id);
    }

    /// Tombstones `edge_id` out of both adjacency directions.
    pub fn adj_remove(&self, from: NodeId, to: NodeId, edge_id: EdgeId) {
        self.out_adj.remove(from, edge_id);
        self.in_adj.remove(to, edge_id);
    }
}

impl Default for Store {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn label(s: &str) -> loomgraph_common::Label {
        loomgraph_common::Label::from(s)
    }

    #[test]
    fn insert_and_get_node() {
        let store = Store::new();
        let id = NodeId::new(1);
        store.insert_node(id, PropertyMap::default());
        assert!(store.get_node(id).is_some());
        assert_eq!(store.node_count(), 1);
    }

    #[test]
    fn insert_edge_updates_both_adjacency_directions() {
        let store = Store::new();
        let a = NodeId::new(1);
        let b = NodeId::new(2);
        store.insert_node(a, PropertyMap::default());
        store.insert_node(b, PropertyMap::default());

        let edge_id = EdgeId::new(1);
        store.insert_edge(Edge::new(edge_id, a, b, label("knows"), PropertyMap::default()));
        store.adj_add(a, b, edge_id);

        assert_eq!(store.outgoing(a), vec![edge_id]);
        assert_eq!(store.incoming(b), vec![edge_id]);
        assert!(store.outgoing(b).is_empty());
    }

    #[test]
    fn remove_node_entry_clears_adjacency_buckets() {
        let store = Store::new();
        let a = NodeId::new(1);
        let b = NodeId::new(2);
        store.insert_node(a, PropertyMap::default());
        store.insert_node(b, PropertyMap::default());
        let edge_id = EdgeId::new(1);
        store.insert_edge(Edge::new(edge_id, a, b, label("knows"), PropertyMap::default()));
        store.adj_add(a, b, edge_id);

        store.adj_remove(a, b, edge_id);
        store.remove_edge_entry(edge_id);
        store.remove_node_entry(a);

        assert!(store.get_node(a).is_none());
        assert!(store.incoming(b).is_empty());
    }

    #[test]
    fn both_direction_dedupes_via_adjacency_union() {
        let store = Store::new();
        let a = NodeId::new(1);
        let b = NodeId::new(2);
        store.insert_node(a, PropertyMap::default());
        store.insert_node(b, PropertyMap::default());
        let e1 = EdgeId::new(1);
        let e2 = EdgeId::new(2);
        store.insert_edge(Edge::new(e1, a, b, label("knows"), PropertyMap::default()));
        store.adj_add(a, b, e1);
        store.insert_edge(Edge::new(e2, b, a, label("knows"), PropertyMap::default()));
        store.adj_add(b, a, e2);

        let both: std::collections::HashSet<_> = store.neighbor_nodes(a, Direction::Both).into_iter().collect();
        assert_eq!(both.len(), 1);
        assert!(both.contains(&b));
    }
}

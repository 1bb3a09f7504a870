//! Chunked adjacency lists with delta buffers (§4.2).
//!
//! This is the primary adjacency structure backing the [`crate::store::Store`].
//! It is optimized for:
//! - O(1) amortized edge insertion
//! - cache-friendly sequential scans
//! - tombstone-based deletion, so a deleted edge disappears from every
//!   adjacency set without requiring a full rewrite of the owning node's
//!   list
//!
//! One instance is used for the outgoing direction and, when backward
//! adjacency is enabled (it always is for this core — §4.7's `in`/`both`
//! directions need it), a second instance for the incoming direction.

use loomgraph_common::hash::{FxHashMap, FxHashSet};
use loomgraph_common::{EdgeId, NodeId};
use parking_lot::RwLock;
use smallvec::SmallVec;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Default chunk capacity (number of edges per chunk).
const DEFAULT_CHUNK_CAPACITY: usize = 64;

/// A chunk of adjacency entries.
#[derive(Debug, Clone)]
struct AdjacencyChunk {
    /// Neighbor node ids.
    neighbors: Vec<NodeId>,
    /// Edge ids, parallel to `neighbors`.
    edge_ids: Vec<EdgeId>,
    capacity: usize,
}

impl AdjacencyChunk {
    fn new(capacity: usize) -> Self {
        Self {
            neighbors: Vec::with_capacity(capacity),
            edge_ids: Vec::with_capacity(capacity),
            capacity,
        }
    }

    fn len(&self) -> usize {
        self.neighbors.len()
    }

    fn is_full(&self) -> bool {
        self.neighbors.len() >= self.capacity
    }

    fn push(&mut self, neighbor: NodeId, edge_id: EdgeId) -> bool {
        if self.is_full() {
            return false;
        }
        self.neighbors.push(neighbor);
        self.edge_ids.push(edge_id);
        true
    }

    fn iter(&self) -> impl Iterator<Item = (NodeId, EdgeId)> + '_ {
        self.neighbors.iter().copied().zip(self.edge_ids.iter().copied())
    }
}

/// Adjacency list for a single node, in one direction.
#[derive(Debug)]
struct AdjacencyList {
    chunks: Vec<AdjacencyChunk>,
    /// Recent insertions not yet folded into a chunk.
    delta: SmallVec<[(NodeId, EdgeId); 8]>,
    /// Tombstones: edges removed from this list but not yet compacted out.
    deleted: FxHashSet<EdgeId>,
}

impl AdjacencyList {
    fn new() -> Self {
        Self {
            chunks: Vec::new(),
            delta: SmallVec::new(),
            deleted: FxHashSet::default(),
        }
    }

    fn add(&mut self, neighbor: NodeId, edge_id: EdgeId) {
        if let Some(last) = self.chunks.last_mut() {
            if last.push(neighbor, edge_id) {
                return;
            }
        }
        self.delta.push((neighbor, edge_id));
    }

    fn mark_deleted(&mut self, edge_id: EdgeId) {
        self.deleted.insert(edge_id);
    }

    fn iter(&self) -> impl Iterator<Item = (NodeId, EdgeId)> + '_ {
        let deleted = &self.deleted;
        self.chunks
            .iter()
            .flat_map(AdjacencyChunk::iter)
            .chain(self.delta.iter().copied())
            .filter(move |(_, edge_id)| !deleted.contains(edge_id))
    }

    fn neighbors(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.iter().map(|(n, _)| n)
    }

    fn degree(&self) -> usize {
        self.iter().count()
    }

    fn compact(&mut self, chunk_capacity: usize) {
        if self.delta.is_empty() {
            return;
        }
        let last_has_room = self.chunks.last().is_some_and(|c| !c.is_full());
        let mut current = if last_has_room {
            self.chunks.pop().unwrap()
        } else {
            AdjacencyChunk::new(chunk_capacity)
        };
        for (neighbor, edge_id) in self.delta.drain(..) {
            if !current.push(neighbor, edge_id) {
                self.chunks.push(current);
                current = AdjacencyChunk::new(chunk_capacity);
                current.push(neighbor, edge_id);
            }
        }
        if current.len() > 0 {
            self.chunks.push(current);
        }
    }
}

/// One direction's worth of adjacency lists for every node with at least
/// one edge in that direction.
pub struct AdjacencyIndex {
    lists: RwLock<FxHashMap<NodeId, AdjacencyList>>,
    chunk_capacity: usize,
    total_count: AtomicUsize,
    deleted_count: AtomicUsize,
}

impl AdjacencyIndex {
    /// Creates a new, empty adjacency index.
    #[must_use]
    pub fn new() -> Self {
        Self {
            lists: RwLock::new(FxHashMap::default()),
            chunk_capacity: DEFAULT_CHUNK_CAPACITY,
            total_count: AtomicUsize::new(0),
            deleted_count: AtomicUsize::new(0),
        }
    }

    /// Records an edge `owner -> neighbor` (for the forward index, `owner`
    /// is the edge's `from`/`neighbor` is `to`; for the backward index
    /// they're swapped by the caller).
    pub fn add(&self, owner: NodeId, neighbor: NodeId, edge_id: EdgeId) {
        let mut lists = self.lists.write();
        lists.entry(owner).or_insert_with(AdjacencyList::new).add(neighbor, edge_id);
        self.total_count.fetch_add(1, Ordering::Relaxed);
    }

    /// Tombstones an edge under `owner`'s list.
    pub fn remove(&self, owner: NodeId, edge_id: EdgeId) {
        let mut lists = self.lists.write();
        if let Some(list) = lists.get_mut(&owner) {
            list.mark_deleted(edge_id);
            self.deleted_count.fetch_add(1, Ordering::Relaxed);
        }
    }

    /// Drops `owner`'s adjacency list entirely (called once all of its
    /// incident edges have already been tombstoned, as part of node
    /// deletion).
    pub fn remove_owner(&self, owner: NodeId) {
        self.lists.write().remove(&owner);
    }

    /// Returns the live neighbor ids for `owner`.
    pub fn neighbors(&self, owner: NodeId) -> Vec<NodeId> {
        let lists = self.lists.read();
        lists.get(&owner).map(|l| l.neighbors().collect()).unwrap_or_default()
    }

    /// Returns the live `(neighbor, edge_id)` pairs for `owner`.
    pub fn edges(&self, owner: NodeId) -> Vec<(NodeId, EdgeId)> {
        let lists = self.lists.read();
        lists.get(&owner).map(|l| l.iter().collect()).unwrap_or_default()
    }

    /// Returns just the live edge ids for `owner`.
    pub fn edge_ids(&self, owner: NodeId) -> FxHashSet<EdgeId> {
        let lists = self.lists.read();
        lists
            .get(&owner)
            .map(|l| l.iter().map(|(_, e)| e).collect())
            .unwrap_or_default()
    }

    /// Returns the live degree of `owner`.
    pub fn degree(&self, owner: NodeId) -> usize {
        self.lists.read().get(&owner).map_or(0, AdjacencyList::degree)
    }

    /// Folds delta buffers into chunks for every tracked node. Purely an
    /// internal performance optimization; does not change observable
    /// results.
    pub fn compact(&self) {
        let mut lists = self.lists.write();
        for list in lists.values_mut() {
            list.compact(self.chunk_capacity);
        }
    }
}

impl Default for AdjacencyIndex {
    fn default() -> Self {
        Self::new()
    }
}

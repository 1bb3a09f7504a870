//! # loomgraph-engine
//!
//! Wires the read-only kernels in `loomgraph-core` to the one component
//! allowed to mutate them: [`mutation::MutationEngine`]. [`Engine`] is the
//! public facade a host embeds; it owns the store, the index layer, the
//! writer, the query cache, and the pattern dispatcher, and is the type
//! that actually implements the external interface in §6.
//!
//! ## Modules
//!
//! - [`id_alloc`] - monotonic node/edge id generation (§4.1)
//! - [`validator`] - input validation for ids, labels, properties (§4.4)
//! - [`mutation`] - the serialized writer (§4.5)
//! - [`cache`] - the bounded, version-stamped query cache (§4.6)
//! - [`pattern`] - the closed pattern-grammar dispatcher (§4.9)
//! - [`config`] - the engine's configuration surface (§10.3)

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod cache;
pub mod config;
pub mod id_alloc;
pub mod mutation;
pub mod pattern;
pub mod validator;

pub use config::EngineConfig;
pub use mutation::MutationEngine;
pub use pattern::QueryResult;

use cache::{CacheOp, CacheValue, QueryCache};
use loomgraph_common::{EdgeId, Error, Label, NodeId, PropertyKey, PropertyMap, PropertyValue, Result};
use loomgraph_core::query::path::PathOutcome;
use loomgraph_core::query::CancelToken;
use loomgraph_core::{stats, Direction, Edge, IndexLayer, Node, Store};
use std::sync::Arc;

/// The public entry point: an in-memory property graph plus everything
/// needed to read and write it (§6).
pub struct Engine {
    store: Arc<Store>,
    index: Arc<IndexLayer>,
    mutation: MutationEngine,
    cache: QueryCache,
    config: EngineConfig,
}

impl Engine {
    /// Creates a new, empty engine with the given configuration.
    #[must_use]
    pub fn new(config: EngineConfig) -> Self {
        let store = Arc::new(Store::new());
        let index = Arc::new(IndexLayer::new());
        let mutation = MutationEngine::new(Arc::clone(&store), Arc::clone(&index));
        let cache = QueryCache::new(config.cache_capacity, config.cache_ttl);
        Self { store, index, mutation, cache, config }
    }

    /// Creates a new, empty engine with default (in-memory) configuration.
    #[must_use]
    pub fn new_in_memory() -> Self {
        Self::new(EngineConfig::in_memory())
    }

    // === Mutations (§4.5), delegated straight to the writer ===

    /// Creates a node. See [`MutationEngine::create_node`].
    pub fn create_node(&self, properties: PropertyMap) -> Result<NodeId> {
        self.mutation.create_node(properties)
    }

    /// Creates an edge. See [`MutationEngine::create_edge`].
    pub fn create_edge(&self, from: NodeId, to: NodeId, label: Label, properties: PropertyMap) -> Result<EdgeId> {
        self.mutation.create_edge(from, to, label, properties)
    }

    /// Deletes a node and its incident edges. See
    /// [`MutationEngine::delete_node`].
    pub fn delete_node(&self, id: NodeId) -> Result<()> {
        self.mutation.delete_node(id)
    }

    /// Deletes a single edge. See [`MutationEngine::delete_edge`].
    pub fn delete_edge(&self, id: EdgeId) -> Result<()> {
        self.mutation.delete_edge(id)
    }

    // === Direct lookups (§4.2) ===

    /// Looks up a node by id.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NodeNotFound`] if `id` is not live.
    pub fn get_node(&self, id: NodeId) -> Result<Node> {
        self.store.get_node(id).ok_or(Error::NodeNotFound { id })
    }

    /// Looks up an edge by id.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EdgeNotFound`] if `id` is not live.
    pub fn get_edge(&self, id: EdgeId) -> Result<Edge> {
        self.store.get_edge(id).ok_or(Error::EdgeNotFound { id })
    }

    // === Secondary index lookups (§4.3) ===

    /// Returns every live node with property `key == value`.
    #[must_use]
    pub fn find_nodes_by_property(&self, key: &PropertyKey, value: &PropertyValue) -> Vec<Node> {
        self.index.properties.find(key, value).into_iter().filter_map(|id| self.store.get_node(id)).collect()
    }

    /// Returns every live edge with the given label.
    #[must_use]
    pub fn find_edges_by_label(&self, label: &str) -> Vec<Edge> {
        self.index.labels.find(label).into_iter().filter_map(|id| self.store.get_edge(id)).collect()
    }

    // === Traversal and shortest path (§4.7, §4.8), cached per §4.6 ===

    /// Breadth-first traversal from `start`, bounded by `depth`. See
    /// [`loomgraph_core::query::traversal::traverse`].
    pub fn traverse(&self, start: NodeId, direction: Direction, depth: usize) -> Result<Vec<Node>> {
        self.traverse_with_cancel(start, direction, depth, None)
    }

    /// Same as [`Self::traverse`], but checks `cancel` between BFS levels
    /// (§5, §10.5).
    pub fn traverse_with_cancel(
        &self,
        start: NodeId,
        direction: Direction,
        depth: usize,
        cancel: Option<&CancelToken>,
    ) -> Result<Vec<Node>> {
        let op = CacheOp::Traverse { start, direction, depth };
        let version = self.mutation.version();

        if self.config.cache_enabled {
            if let Some(CacheValue::Nodes(nodes)) = self.cache.get(&op, version) {
                tracing::trace!(?op, "traversal cache hit");
                return Ok(nodes);
            }
            tracing::trace!(?op, "traversal cache miss");
        }

        let result = loomgraph_core::query::traversal::traverse(&self.store, start, direction, depth, cancel)?;
        if self.config.cache_enabled {
            self.cache.put(op, CacheValue::Nodes(result.clone()), version);
        }
        Ok(result)
    }

    /// Bidirectional shortest path between `from` and `to`. See
    /// [`loomgraph_core::query::path::shortest_path`].
    pub fn shortest_path(&self, from: NodeId, to: NodeId, max_depth: usize) -> Result<Vec<NodeId>> {
        self.shortest_path_with_cancel(from, to, max_depth, None)
    }

    /// Same as [`Self::shortest_path`], but checks `cancel` between BFS
    /// half-steps (§5, §10.5).
    pub fn shortest_path_with_cancel(
        &self,
        from: NodeId,
        to: NodeId,
        max_depth: usize,
        cancel: Option<&CancelToken>,
    ) -> Result<Vec<NodeId>> {
        let op = CacheOp::ShortestPath { from, to, max_depth };
        let version = self.mutation.version();

        if self.config.cache_enabled {
            if let Some(CacheValue::Path(outcome)) = self.cache.get(&op, version) {
                tracing::trace!(?op, "shortest path cache hit");
                return outcome_to_result(outcome, from, to);
            }
            tracing::trace!(?op, "shortest path cache miss");
        }

        let outcome = loomgraph_core::query::path::shortest_path(&self.store, from, to, max_depth, cancel)?;
        if self.config.cache_enabled {
            self.cache.put(op, CacheValue::Path(outcome.clone()), version);
        }
        outcome_to_result(outcome, from, to)
    }

    // === Pattern dispatcher (§4.9) ===

    /// Parses and dispatches a pattern drawn from the closed grammar.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnsupportedPattern`] if `pattern` is not recognized.
    pub fn query(&self, pattern: &str) -> Result<QueryResult> {
        pattern::dispatch(&self.store, &self.index, pattern)
    }

    // === Stats (§4.10) ===

    /// Reports live counts and an advisory memory estimate.
    #[must_use]
    pub fn stats(&self) -> stats::Stats {
        stats::compute(&self.store, &self.index)
    }

    /// Returns the current mutation version (§3 invariant 6).
    #[must_use]
    pub fn version(&self) -> loomgraph_common::Version {
        self.mutation.version()
    }
}

fn outcome_to_result(outcome: PathOutcome, from: NodeId, to: NodeId) -> Result<Vec<NodeId>> {
    match outcome {
        PathOutcome::Found(path) => Ok(path),
        PathOutcome::NotFound => Err(Error::PathNotFound { from, to }),
    }
}

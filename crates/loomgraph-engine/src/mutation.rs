//! The serialized writer (§4.5).
//!
//! `MutationEngine` is the only component allowed to call
//! [`Store`]'s writer-only methods or the index layer's `index`/`unindex`
//! methods. A single internal lock serializes concurrent callers; none of
//! the locks it takes are ever held across a reader's lookup, since reads
//! go straight to [`Store`] and [`IndexLayer`] without going through this
//! type at all.

use crate::id_alloc::IdAllocator;
use crate::validator::{validate_edge_label, validate_node_id, validate_node_properties};
use loomgraph_common::{EdgeId, Error, Label, NodeId, PropertyMap, Result, Version};
use loomgraph_core::{Edge, IndexLayer, Store};
use parking_lot::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// The single writer over a [`Store`]/[`IndexLayer`] pair.
pub struct MutationEngine {
    store: Arc<Store>,
    index: Arc<IndexLayer>,
    ids: IdAllocator,
    version: AtomicU64,
    write_lock: Mutex<()>,
}

impl MutationEngine {
    /// Builds a new engine over a fresh, empty store and index layer.
    #[must_use]
    pub fn new(store: Arc<Store>, index: Arc<IndexLayer>) -> Self {
        Self { store, index, ids: IdAllocator::new(), version: AtomicU64::new(0), write_lock: Mutex::new(()) }
    }

    /// Returns the current mutation version (§3 invariant 6).
    #[must_use]
    pub fn version(&self) -> Version {
        Version::new(self.version.load(Ordering::SeqCst))
    }

    fn bump_version(&self) -> Version {
        Version::new(self.version.fetch_add(1, Ordering::SeqCst) + 1)
    }

    /// Creates a node with `properties`. See §4.5.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidProperty`] if any value fails validation.
    pub fn create_node(&self, properties: PropertyMap) -> Result<NodeId> {
        let properties = validate_node_properties(&properties)?;

        let _guard = self.write_lock.lock();
        let id = self.ids.next_node_id();
        self.store.insert_node(id, properties.clone());
        for (key, value) in &properties {
            self.index.properties.index(id, key.clone(), value.clone());
        }
        let version = self.bump_version();
        drop(_guard);

        tracing::debug!(node_id = %id, %version, "node created");
        Ok(id)
    }

    /// Creates an edge from `from` to `to`. See §4.5. Self-loops and
    /// parallel edges are both permitted.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidId`], [`Error::InvalidLabel`],
    /// [`Error::InvalidProperty`], or [`Error::NodeNotFound`].
    pub fn create_edge(&self, from: NodeId, to: NodeId, label: Label, properties: PropertyMap) -> Result<EdgeId> {
        validate_node_id(from)?;
        validate_node_id(to)?;
        validate_edge_label(&label)?;
        let properties = validate_node_properties(&properties)?;

        let _guard = self.write_lock.lock();
        if !self.store.node_exists(from) {
            return Err(Error::NodeNotFound { id: from });
        }
        if !self.store.node_exists(to) {
            return Err(Error::NodeNotFound { id: to });
        }

        let id = self.ids.next_edge_id();
        self.store.insert_edge(Edge::new(id, from, to, label.clone(), properties));
        self.store.adj_add(from, to, id);
        self.index.labels.index(id, label);
        let version = self.bump_version();
        drop(_guard);

        tracing::debug!(edge_id = %id, %from, %to, %version, "edge created");
        Ok(id)
    }

    /// Deletes a node and every edge incident to it. See §4.5 for the
    /// required step order.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NodeNotFound`] if `id` does not refer to a live
    /// node.
    pub fn delete_node(&self, id: NodeId) -> Result<()> {
        let _guard = self.write_lock.lock();
        let Some(node) = self.store.get_node(id) else {
            return Err(Error::NodeNotFound { id });
        };

        let mut incident: Vec<EdgeId> = self.store.outgoing(id);
        incident.extend(self.store.incoming(id));
        incident.sort_unstable_by_key(|id| id.raw());
        incident.dedup();

        for edge_id in incident {
            self.delete_edge_locked(edge_id);
        }

        for (key, value) in &node.properties {
            self.index.properties.unindex(id, key, value);
        }
        self.store.remove_node_entry(id);
        let version = self.bump_version();
        drop(_guard);

        tracing::debug!(node_id = %id, %version, "node deleted");
        Ok(())
    }

    /// Deletes a single edge. See §4.5.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EdgeNotFound`] if `id` does not refer to a live
    /// edge.
    pub fn delete_edge(&self, id: EdgeId) -> Result<()> {
        let _guard = self.write_lock.lock();
        if self.store.get_edge(id).is_none() {
            return Err(Error::EdgeNotFound { id });
        }
        self.delete_edge_locked(id);
        let version = self.bump_version();
        drop(_guard);

        tracing::debug!(edge_id = %id, %version, "edge deleted");
        Ok(())
    }

    /// Removes `id`'s store entry, adjacency entries, and label index
    /// entry. Caller must already hold `write_lock` and have confirmed the
    /// edge exists.
    fn delete_edge_locked(&self, id: EdgeId) {
        let Some(edge) = self.store.remove_edge_entry(id) else { return };
        self.store.adj_remove(edge.from, edge.to, id);
        self.index.labels.unindex(id, &edge.label);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use loomgraph_common::{PropertyKey, PropertyValue};

    fn engine() -> MutationEngine {
        MutationEngine::new(Arc::new(Store::new()), Arc::new(IndexLayer::new()))
    }

    #[test]
    fn create_node_bumps_version_and_indexes_properties() {
        let engine = engine();
        let mut props = PropertyMap::default();
        props.insert(PropertyKey::from("name"), PropertyValue::from("Ada"));
        let id = engine.create_node(props).unwrap();
        assert!(id.is_valid());
        assert_eq!(engine.version(), Version::new(1));
    }

    #[test]
    fn create_edge_requires_existing_endpoints() {
        let engine = engine();
        let a = engine.create_node(PropertyMap::default()).unwrap();
        let err = engine
            .create_edge(a, NodeId::new(9999), Label::from("KNOWS"), PropertyMap::default())
            .unwrap_err();
        assert_eq!(err.tag(), "NodeNotFound");
    }

    #[test]
    fn self_loop_and_parallel_edges_are_allowed() {
        let engine = engine();
        let a = engine.create_node(PropertyMap::default()).unwrap();
        let loop_edge = engine.create_edge(a, a, Label::from("SELF"), PropertyMap::default()).unwrap();
        let e1 = engine.create_edge(a, a, Label::from("SELF"), PropertyMap::default()).unwrap();
        assert_ne!(loop_edge, e1);
    }

    #[test]
    fn delete_node_removes_incident_edges_first() {
        let engine = engine();
        let a = engine.create_node(PropertyMap::default()).unwrap();
        let b = engine.create_node(PropertyMap::default()).unwrap();
        let edge_id = engine.create_edge(a, b, Label::from("KNOWS"), PropertyMap::default()).unwrap();

        engine.delete_node(a).unwrap();

        assert!(engine.delete_edge(edge_id).is_err());
    }

    #[test]
    fn delete_missing_node_is_not_found() {
        let engine = engine();
        let err = engine.delete_node(NodeId::new(42)).unwrap_err();
        assert_eq!(err.tag(), "NodeNotFound");
    }

    #[test]
    fn invalid_property_rejects_before_any_mutation() {
        let engine = engine();
        let mut props = PropertyMap::default();
        props.insert(PropertyKey::from("bio"), PropertyValue::from("x".repeat(100_000)));
        assert!(engine.create_node(props).is_err());
        assert_eq!(engine.version(), Version::zero());
    }
}

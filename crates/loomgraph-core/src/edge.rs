//! The edge record (§3).

use loomgraph_common::{EdgeId, Label, NodeId, PropertyMap, PropertyValue};

/// A live edge: an id, its endpoints, a label, and its property map.
#[derive(Debug, Clone)]
pub struct Edge {
    /// The edge's identifier.
    pub id: EdgeId,
    /// The source node.
    pub from: NodeId,
    /// The destination node.
    pub to: NodeId,
    /// The edge's label.
    pub label: Label,
    /// The edge's properties.
    pub properties: PropertyMap,
}

impl Edge {
    /// Creates a new edge record.
    #[must_use]
    pub fn new(id: EdgeId, from: NodeId, to: NodeId, label: Label, properties: PropertyMap) -> Self {
        Self { id, from, to, label, properties }
    }

    /// Returns `true` if this edge is a self-loop (`from == to`), which §4.5
    /// explicitly allows.
    #[must_use]
    pub fn is_self_loop(&self) -> bool {
        self.from == self.to
    }

    /// Returns a single property value by key, if present.
    #[must_use]
    pub fn get_property(&self, key: &str) -> Option<&PropertyValue> {
        self.properties.get(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn self_loop_is_detected() {
        let a = NodeId::new(1);
        let e = Edge::new(EdgeId::new(1), a, a, Label::from("SELF"), PropertyMap::default());
        assert!(e.is_self_loop());
    }
}

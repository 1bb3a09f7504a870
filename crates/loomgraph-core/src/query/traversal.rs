//! Breadth-first traversal (§4.7).

use super::CancelToken;
use crate::direction::Direction;
use crate::node::Node;
use crate::store::Store;
use loomgraph_common::hash::FxHashSet;
use loomgraph_common::{Error, NodeId, Result};
use std::collections::VecDeque;

/// Returns the nodes reachable from `start` in at most `depth` hops
/// following `direction`, excluding `start` itself (§4.7).
///
/// `cancel`, if given, is polled between BFS levels; if cancellation is
/// requested mid-search the nodes found up to the last completed level are
/// returned rather than the full result.
///
/// # Errors
///
/// Returns [`Error::NodeNotFound`] if `start` does not exist.
pub fn traverse(
    store: &Store,
    start: NodeId,
    direction: Direction,
    depth: usize,
    cancel: Option<&CancelToken>,
) -> Result<Vec<Node>> {
    if !store.node_exists(start) {
        return Err(Error::NodeNotFound { id: start });
    }

    let mut visited: FxHashSet<NodeId> = FxHashSet::default();
    visited.insert(start);

    if depth == 0 {
        return Ok(Vec::new());
    }

    let mut queue: VecDeque<(NodeId, usize)> = VecDeque::new();
    queue.push_back((start, 0));

    let mut result_ids = Vec::new();

    while let Some((node, level)) = queue.pop_front() {
        if level > depth {
            continue;
        }
        if node != start {
            result_ids.push(node);
        }
        if level < depth {
            if let Some(token) = cancel {
                if token.is_cancelled() {
                    break;
                }
            }
            for neighbor in store.neighbor_nodes(node, direction) {
                if visited.insert(neighbor) {
                    queue.push_back((neighbor, level + 1));
                }
            }
        }
    }

    Ok(result_ids.into_iter().filter_map(|id| store.get_node(id)).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use loomgraph_common::{Label, PropertyMap};

    fn chain(len: u64) -> (Store, Vec<NodeId>) {
        let store = Store::new();
        let mut ids = Vec::new();
        for i in 0..len {
            let id = NodeId::new(i + 1);
            store.insert_node(id, PropertyMap::default());
            ids.push(id);
        }
        for (i, window) in ids.windows(2).enumerate() {
            let edge_id = loomgraph_common::EdgeId::new(i as u64 + 1);
            store.insert_edge(crate::edge::Edge::new(
                edge_id,
                window[0],
                window[1],
                Label::from("next"),
                PropertyMap::default(),
            ));
            store.adj_add(window[0], window[1], edge_id);
        }
        (store, ids)
    }

    #[test]
    fn depth_zero_is_empty() {
        let (store, ids) = chain(3);
        let result = traverse(&store, ids[0], Direction::Out, 0, None).unwrap();
        assert!(result.is_empty());
    }

    #[test]
    fn excludes_start_and_respects_depth() {
        let (store, ids) = chain(4); // A -> B -> C -> D
        let one_hop = traverse(&store, ids[0], Direction::Out, 1, None).unwrap();
        assert_eq!(one_hop.len(), 1);
        assert_eq!(one_hop[0].id, ids[1]);

        let two_hop = traverse(&store, ids[0], Direction::Out, 2, None).unwrap();
        let mut two_hop_ids: Vec<_> = two_hop.iter().map(|n| n.id).collect();
        two_hop_ids.sort();
        assert_eq!(two_hop_ids, vec![ids[1], ids[2]]);
    }

    #[test]
    fn missing_start_is_not_found() {
        let store = Store::new();
        let err = traverse(&store, NodeId::new(99), Direction::Out, 1, None).unwrap_err();
        assert_eq!(err.tag(), "NodeNotFound");
    }

    #[test]
    fn cycles_terminate() {
        let store = Store::new();
        let a = NodeId::new(1);
        let b = NodeId::new(2);
        store.insert_node(a, PropertyMap::default());
        store.insert_node(b, PropertyMap::default());
        let e1 = loomgraph_common::EdgeId::new(1);
        let e2 = loomgraph_common::EdgeId::new(2);
        store.insert_edge(crate::edge::Edge::new(e1, a, b, Label::from("x"), PropertyMap::default()));
        store.adj_add(a, b, e1);
        store.insert_edge(crate::edge::Edge::new(e2, b, a, Label::from("x"), PropertyMap::default()));
        store.adj_add(b, a, e2);

        let result = traverse(&store, a, Direction::Out, 100, None).unwrap();
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].id, b);
    }

    #[test]
    fn cancellation_stops_early_without_erroring() {
        let (store, ids) = chain(5);
        let token = CancelToken::new();
        token.cancel();
        let result = traverse(&store, ids[0], Direction::Out, 4, Some(&token)).unwrap();
        // The start node's own level (0) always completes before the
        // first cancellation check, so its direct neighbor is still found.
        assert_eq!(result.len(), 1);
    }
}

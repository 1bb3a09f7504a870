//! Bidirectional shortest path (§4.8).

use super::CancelToken;
use crate::direction::Direction;
use crate::store::Store;
use loomgraph_common::hash::{FxHashMap, FxHashSet};
use loomgraph_common::{Error, NodeId, Result};

/// The result of a [`shortest_path`] search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathOutcome {
    /// A path was found; the node ids run from `from` to `to` inclusive.
    Found(Vec<NodeId>),
    /// No path exists within `max_depth` hops.
    NotFound,
}

/// Finds a shortest path between `from` and `to`, expanding in both
/// directions (§4.8). Traversal ignores edge direction: a path may use any
/// edge incident to a node regardless of which endpoint it was declared
/// from.
///
/// When more than one shortest path exists, the one whose meeting node has
/// the lowest [`NodeId`] is returned, breaking ties deterministically
/// rather than by insertion or hash order.
///
/// # Errors
///
/// Returns [`Error::NodeNotFound`] if either `from` or `to` does not exist.
pub fn shortest_path(
    store: &Store,
    from: NodeId,
    to: NodeId,
    max_depth: usize,
    cancel: Option<&CancelToken>,
) -> Result<PathOutcome> {
    if !store.node_exists(from) {
        return Err(Error::NodeNotFound { id: from });
    }
    if !store.node_exists(to) {
        return Err(Error::NodeNotFound { id: to });
    }

    if from == to {
        return Ok(PathOutcome::Found(vec![from]));
    }

    let mut front_parent: FxHashMap<NodeId, NodeId> = FxHashMap::default();
    let mut back_parent: FxHashMap<NodeId, NodeId> = FxHashMap::default();
    front_parent.insert(from, from);
    back_parent.insert(to, to);

    let mut front_frontier: Vec<NodeId> = vec![from];
    let mut back_frontier: Vec<NodeId> = vec![to];

    if let Some(meeting) = intersect(&front_frontier, &back_parent) {
        return Ok(PathOutcome::Found(build_path(meeting, &front_parent, &back_parent)));
    }

    for _ in 0..max_depth {
        if let Some(token) = cancel {
            if token.is_cancelled() {
                return Ok(PathOutcome::NotFound);
            }
        }

        let grow_front = front_frontier.len() <= back_frontier.len();
        if grow_front {
            front_frontier = expand(store, &front_frontier, &mut front_parent);
        } else {
            back_frontier = expand(store, &back_frontier, &mut back_parent);
        }

        let meeting = if grow_front {
            intersect(&front_frontier, &back_parent)
        } else {
            intersect(&back_frontier, &front_parent)
        };

        if let Some(meeting) = meeting {
            return Ok(PathOutcome::Found(build_path(meeting, &front_parent, &back_parent)));
        }

        if front_frontier.is_empty() && back_frontier.is_empty() {
            break;
        }
    }

    Ok(PathOutcome::NotFound)
}

fn expand(
    store: &Store,
    frontier: &[NodeId],
    parent: &mut FxHashMap<NodeId, NodeId>,
) -> Vec<NodeId> {
    let mut next = Vec::new();
    let mut seen_this_level: FxHashSet<NodeId> = FxHashSet::default();
    for &node in frontier {
        for neighbor in store.neighbor_nodes(node, Direction::Both) {
            if !parent.contains_key(&neighbor) && seen_this_level.insert(neighbor) {
                parent.insert(neighbor, node);
                next.push(neighbor);
            }
        }
    }
    next.sort_unstable_by_key(|id| id.raw());
    next
}

fn intersect(frontier: &[NodeId], other_parent: &FxHashMap<NodeId, NodeId>) -> Option<NodeId> {
    frontier
        .iter()
        .copied()
        .filter(|id| other_parent.contains_key(id))
        .min_by_key(|id| id.raw())
}

fn build_path(
    meeting: NodeId,
    front_parent: &FxHashMap<NodeId, NodeId>,
    back_parent: &FxHashMap<NodeId, NodeId>,
) -> Vec<NodeId> {
    let mut front_half = Vec::new();
    let mut cursor = meeting;
    loop {
        front_half.push(cursor);
        let parent = front_parent[&cursor];
        if parent == cursor {
            break;
        }
        cursor = parent;
    }
    front_half.reverse();

    let mut back_half = Vec::new();
    let mut cursor = meeting;
    loop {
        let parent = back_parent[&cursor];
        if parent == cursor {
            break;
        }
        back_half.push(parent);
        cursor = parent;
    }

    front_half.extend(back_half);
    front_half
}

#[cfg(test)]
mod tests {
    use super::*;
    use loomgraph_common::{EdgeId, Label, PropertyMap};

    fn line(len: u64) -> (Store, Vec<NodeId>) {
        let store = Store::new();
        let mut ids = Vec::new();
        for i in 0..len {
            let id = NodeId::new(i + 1);
            store.insert_node(id, PropertyMap::default());
            ids.push(id);
        }
        for (i, window) in ids.windows(2).enumerate() {
            let edge_id = EdgeId::new(i as u64 + 1);
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
    fn path_to_self_is_single_node() {
        let (store, ids) = line(3);
        let outcome = shortest_path(&store, ids[0], ids[0], 10, None).unwrap();
        assert_eq!(outcome, PathOutcome::Found(vec![ids[0]]));
    }

    #[test]
    fn finds_path_along_a_line() {
        let (store, ids) = line(5);
        let outcome = shortest_path(&store, ids[0], ids[4], 10, None).unwrap();
        assert_eq!(outcome, PathOutcome::Found(ids));
    }

    #[test]
    fn unreachable_within_max_depth_is_not_found() {
        let (store, ids) = line(5);
        let outcome = shortest_path(&store, ids[0], ids[4], 1, None).unwrap();
        assert_eq!(outcome, PathOutcome::NotFound);
    }

    #[test]
    fn missing_endpoint_is_node_not_found() {
        let (store, ids) = line(2);
        let err = shortest_path(&store, ids[0], NodeId::new(999), 5, None).unwrap_err();
        assert_eq!(err.tag(), "NodeNotFound");
    }

    #[test]
    fn ties_break_on_lowest_node_id() {
        // A connects to both B and C, each of which connects to D: two
        // shortest paths of equal length, tie-broken on the lower id.
        let store = Store::new();
        let a = NodeId::new(1);
        let b = NodeId::new(2);
        let c = NodeId::new(3);
        let d = NodeId::new(4);
        for id in [a, b, c, d] {
            store.insert_node(id, PropertyMap::default());
        }
        let mut next_edge = 1u64;
        let mut connect = |store: &Store, from: NodeId, to: NodeId| {
            let id = EdgeId::new(next_edge);
            next_edge += 1;
            store.insert_edge(crate::edge::Edge::new(id, from, to, Label::from("x"), PropertyMap::default()));
            store.adj_add(from, to, id);
        };
        connect(&store, a, b);
        connect(&store, a, c);
        connect(&store, b, d);
        connect(&store, c, d);

        let outcome = shortest_path(&store, a, d, 5, None).unwrap();
        assert_eq!(outcome, PathOutcome::Found(vec![a, b, d]));
    }
}

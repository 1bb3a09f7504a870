//! Traversal direction (§4.7).

/// Which adjacency a traversal follows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Follow outgoing edges only (`from -> to`).
    Out,
    /// Follow incoming edges only (`to -> from`).
    In,
    /// Follow both, deduplicated.
    Both,
}

//! The crate-wide error taxonomy.
//!
//! Every fallible operation in Loomgraph returns one of these variants. Each
//! carries enough context to render a message without a second lookup, and
//! callers are expected to pattern-match on the variant rather than parse
//! the message.

use crate::types::{EdgeId, NodeId};
use thiserror::Error;

/// The result type used throughout Loomgraph.
pub type Result<T> = std::result::Result<T, Error>;

/// Stable, machine-matchable error tags surfaced by the core.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum Error {
    /// An id was non-positive, malformed, or of the wrong kind.
    #[error("invalid id: {reason}")]
    InvalidId {
        /// Why the id was rejected.
        reason: String,
    },

    /// An edge label was empty or exceeded the 256-byte limit.
    #[error("invalid label: {reason}")]
    InvalidLabel {
        /// Why the label was rejected.
        reason: String,
    },

    /// A property map contained an unsupported value type or an oversized
    /// string.
    #[error("invalid property: {reason}")]
    InvalidProperty {
        /// Why the property was rejected.
        reason: String,
    },

    /// A generic "no such entity" result, used by code paths (e.g. the
    /// pattern dispatcher) that don't know ahead of time whether the
    /// missing thing was a node or an edge.
    #[error("not found")]
    NotFound,

    /// `traverse`/`shortest_path`/direct lookups were given a node id with
    /// no corresponding live node.
    #[error("node not found: {id}")]
    NodeNotFound {
        /// The id that did not resolve.
        id: NodeId,
    },

    /// `get_edge`/`delete_edge` were given an edge id with no corresponding
    /// live edge.
    #[error("edge not found: {id}")]
    EdgeNotFound {
        /// The id that did not resolve.
        id: EdgeId,
    },

    /// `shortest_path` found no path within `max_depth` hops.
    #[error("no path from {from} to {to}")]
    PathNotFound {
        /// The search's source node.
        from: NodeId,
        /// The search's destination node.
        to: NodeId,
    },

    /// `query` was given text that does not match any of the closed set of
    /// recognized pattern templates.
    #[error("unsupported pattern: {input}{}", suggestion.as_ref().map(|s| format!(" (did you mean: {s}?)")).unwrap_or_default())]
    UnsupportedPattern {
        /// The raw text that failed to parse.
        input: String,
        /// A cheaply-computed nearest supported pattern, if any.
        suggestion: Option<String>,
    },
}

impl Error {
    /// Returns the stable machine-readable tag for this error, independent
    /// of the human-readable message.
    #[must_use]
    pub fn tag(&self) -> &'static str {
        match self {
            Self::InvalidId { .. } => "InvalidId",
            Self::InvalidLabel { .. } => "InvalidLabel",
            Self::InvalidProperty { .. } => "InvalidProperty",
            Self::NotFound => "NotFound",
            Self::NodeNotFound { .. } => "NodeNotFound",
            Self::EdgeNotFound { .. } => "EdgeNotFound",
            Self::PathNotFound { .. } => "PathNotFound",
            Self::UnsupportedPattern { .. } => "UnsupportedPattern",
        }
    }
}

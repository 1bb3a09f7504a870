//! # Loomgraph
//!
//! An embeddable, in-memory property-graph engine: constant-time primary
//! lookups, automatic secondary indexing on every property, and
//! bounded-depth traversal and shortest-path queries, all behind a single
//! [`Engine`].
//!
//! ## Quick Start
//!
//! ```rust
//! use loomgraph::{Direction, Engine, Label, PropertyMap};
//!
//! let engine = Engine::new_in_memory();
//!
//! let mut alice_props = PropertyMap::default();
//! alice_props.insert("name".into(), "Alice".into());
//! let alice = engine.create_node(alice_props).unwrap();
//!
//! let bob = engine.create_node(PropertyMap::default()).unwrap();
//! engine.create_edge(alice, bob, Label::from("KNOWS"), PropertyMap::default()).unwrap();
//!
//! let reachable = engine.traverse(alice, Direction::Out, 1).unwrap();
//! assert_eq!(reachable.len(), 1);
//! ```
//!
//! `Engine` is the only type most callers need; `loomgraph-core` and
//! `loomgraph-engine` are reusable layers underneath it for hosts that want
//! finer-grained control (e.g. a CLI wiring its own cancellation tokens).

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub use loomgraph_common::{
    EdgeId, Error, Label, NodeId, PropertyKey, PropertyMap, PropertyValue, Result, Version,
};
pub use loomgraph_core::query::CancelToken;
pub use loomgraph_core::stats::{MemoryStats, Stats};
pub use loomgraph_core::{Direction, Edge, Node};
pub use loomgraph_engine::{Engine, EngineConfig, QueryResult};

//! Secondary indices that make property and label lookups fast.
//!
//! - [`property_index`] - `(key, value) -> {NodeId}`, backs
//!   `find_nodes_by_property`.
//! - [`label_index`] - `label -> {EdgeId}`, backs `find_edges_by_label`.

pub mod label_index;
pub mod property_index;

pub use label_index::LabelIndex;
pub use property_index::PropertyIndex;

/// The two secondary indices, bundled together because every mutation
/// touches both the store and this layer as one unit (§1, §2 C3).
#[derive(Default)]
pub struct IndexLayer {
    /// Property index: `(key, value) -> {NodeId}`.
    pub properties: PropertyIndex,
    /// Label index: `label -> {EdgeId}`.
    pub labels: LabelIndex,
}

impl IndexLayer {
    /// Creates a new, empty index layer.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

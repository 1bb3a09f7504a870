//! # loomgraph-common
//!
//! Foundation layer for Loomgraph: identifiers, property values, errors, and
//! hashing utilities shared by every other Loomgraph crate.
//!
//! This crate has no internal dependencies and should be kept minimal.
//!
//! ## Modules
//!
//! - [`types`] - Core type definitions (`NodeId`, `EdgeId`, `PropertyValue`, ...)
//! - [`error`] - The crate-wide error taxonomy
//! - [`hash`] - Fast hash map/set aliases

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod error;
pub mod hash;
pub mod types;

pub use error::{Error, Result};
pub use types::{
    EdgeId, Label, NodeId, PropertyKey, PropertyMap, PropertyValue, Version, MAX_LABEL_LEN,
    MAX_PROPERTY_KEY_LEN, MAX_PROPERTY_STRING_LEN,
};

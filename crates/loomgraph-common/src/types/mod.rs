//! Core type definitions for Loomgraph.
//!
//! - Identifiers: [`NodeId`], [`EdgeId`], [`Version`]
//! - Properties: [`PropertyValue`], [`PropertyKey`], [`PropertyMap`], [`Label`]

mod id;
mod value;

pub use id::{EdgeId, NodeId, Version};
pub use value::{
    Label, PropertyKey, PropertyMap, PropertyValue, MAX_LABEL_LEN, MAX_PROPERTY_KEY_LEN,
    MAX_PROPERTY_STRING_LEN,
};

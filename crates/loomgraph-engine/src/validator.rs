//! Input validation for ids, labels, and property maps (§4.4).

use loomgraph_common::{
    Error, Label, NodeId, PropertyKey, PropertyMap, PropertyValue, Result, MAX_LABEL_LEN,
    MAX_PROPERTY_STRING_LEN,
};

/// Validates that `id` is a well-formed node id (nonzero; §3, §4.4).
pub fn validate_node_id(id: NodeId) -> Result<()> {
    if id.is_valid() {
        Ok(())
    } else {
        Err(Error::InvalidId { reason: "node id must be nonzero".to_string() })
    }
}

/// Validates a caller-supplied property map, returning a canonicalized
/// copy (interned keys, unchanged values) or `InvalidProperty`.
///
/// The only thing that can make a value invalid is an oversized string;
/// [`PropertyValue`]'s closed set of variants already rules out unsupported
/// types at the type level.
pub fn validate_node_properties(properties: &PropertyMap) -> Result<PropertyMap> {
    for (key, value) in properties {
        validate_property_entry(key, value)?;
    }
    Ok(properties.clone())
}

fn validate_property_entry(key: &PropertyKey, value: &PropertyValue) -> Result<()> {
    if key.as_str().is_empty() {
        return Err(Error::InvalidProperty { reason: "property key must not be empty".to_string() });
    }
    if value.byte_len() > MAX_PROPERTY_STRING_LEN {
        return Err(Error::InvalidProperty {
            reason: format!(
                "property '{key}' is {} bytes, exceeds the {MAX_PROPERTY_STRING_LEN}-byte limit",
                value.byte_len()
            ),
        });
    }
    Ok(())
}

/// Validates an edge label: non-empty, at most [`MAX_LABEL_LEN`] bytes.
pub fn validate_edge_label(label: &Label) -> Result<()> {
    let s = label.as_str();
    if s.is_empty() {
        return Err(Error::InvalidLabel { reason: "label must not be empty".to_string() });
    }
    if s.len() > MAX_LABEL_LEN {
        return Err(Error::InvalidLabel {
            reason: format!("label is {} bytes, exceeds the {MAX_LABEL_LEN}-byte limit", s.len()),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_node_id_is_invalid() {
        let err = validate_node_id(NodeId::new(0)).unwrap_err();
        assert_eq!(err.tag(), "InvalidId");
    }

    #[test]
    fn empty_label_is_rejected() {
        let err = validate_edge_label(&Label::from("")).unwrap_err();
        assert_eq!(err.tag(), "InvalidLabel");
    }

    #[test]
    fn oversized_label_is_rejected() {
        let huge = "x".repeat(MAX_LABEL_LEN + 1);
        let err = validate_edge_label(&Label::from(huge)).unwrap_err();
        assert_eq!(err.tag(), "InvalidLabel");
    }

    #[test]
    fn normal_label_passes() {
        assert!(validate_edge_label(&Label::from("KNOWS")).is_ok());
    }

    #[test]
    fn oversized_string_property_is_rejected() {
        let mut props = PropertyMap::default();
        props.insert(PropertyKey::from("bio"), PropertyValue::from("y".repeat(MAX_PROPERTY_STRING_LEN + 1)));
        let err = validate_node_properties(&props).unwrap_err();
        assert_eq!(err.tag(), "InvalidProperty");
    }

    #[test]
    fn ordinary_properties_pass() {
        let mut props = PropertyMap::default();
        props.insert(PropertyKey::from("age"), PropertyValue::from(30i64));
        assert!(validate_node_properties(&props).is_ok());
    }
}

//! The closed pattern grammar (§4.9).
//!
//! Four recognized forms, nothing else:
//!
//! - `MATCH (n) RETURN n` - every live node
//! - `MATCH (n {key: "value"}) RETURN n` - nodes with a matching property
//! - `MATCH ()-[:LABEL]-() RETURN r` - every live edge with that label
//! - `COUNT(n)` / `COUNT(e)` - node or edge cardinality
//!
//! This is not a general query language: no composition, no filters beyond
//! a single property equality, no joins. Anything else is rejected with
//! `UnsupportedPattern`, carrying a best-effort suggestion (§7).

use loomgraph_common::{Error, Label, PropertyKey, PropertyValue, Result};
use loomgraph_core::index::IndexLayer;
use loomgraph_core::store::Store;
use loomgraph_core::{Edge, Node};

/// The structured result of dispatching a recognized pattern.
#[derive(Debug, Clone)]
pub enum QueryResult {
    /// A node list, from the all-nodes or property-match forms.
    Nodes(Vec<Node>),
    /// An edge list, from the label-match form.
    Edges(Vec<Edge>),
    /// A cardinality, from `COUNT(...)`.
    Count(usize),
}

#[derive(Debug, Clone)]
enum ParsedPattern {
    AllNodes,
    NodesByProperty { key: PropertyKey, value: PropertyValue },
    EdgesByLabel { label: Label },
    CountNodes,
    CountEdges,
}

const TEMPLATES: &[&str] = &[
    "MATCH (n) RETURN n",
    "MATCH (n {key: \"value\"}) RETURN n",
    "MATCH ()-[:LABEL]-() RETURN r",
    "COUNT(n)",
    "COUNT(e)",
];

/// Parses and dispatches `pattern` against `store`/`index`.
///
/// # Errors
///
/// Returns [`Error::UnsupportedPattern`] if `pattern` matches none of the
/// four recognized templates.
pub fn dispatch(store: &Store, index: &IndexLayer, pattern: &str) -> Result<QueryResult> {
    let parsed = parse(pattern).map_err(|_| unsupported(pattern))?;
    Ok(match parsed {
        ParsedPattern::AllNodes => QueryResult::Nodes(store.list_nodes()),
        ParsedPattern::NodesByProperty { key, value } => {
            let ids = index.properties.find(&key, &value);
            QueryResult::Nodes(ids.into_iter().filter_map(|id| store.get_node(id)).collect())
        }
        ParsedPattern::EdgesByLabel { label } => {
            let ids = index.labels.find(label.as_str());
            QueryResult::Edges(ids.into_iter().filter_map(|id| store.get_edge(id)).collect())
        }
        ParsedPattern::CountNodes => QueryResult::Count(store.node_count()),
        ParsedPattern::CountEdges => QueryResult::Count(store.edge_count()),
    })
}

fn unsupported(input: &str) -> Error {
    let suggestion = nearest_template(input);
    tracing::warn!(pattern = input, suggestion = suggestion.as_deref(), "unsupported query pattern");
    Error::UnsupportedPattern { input: input.to_string(), suggestion }
}

fn nearest_template(input: &str) -> Option<String> {
    TEMPLATES
        .iter()
        .min_by_key(|template| edit_distance(input, template))
        .map(|template| (*template).to_string())
}

/// Classic Levenshtein edit distance, used only to pick a cheap suggestion
/// among the four known templates (§7, §10.5).
fn edit_distance(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    let mut prev: Vec<usize> = (0..=b.len()).collect();
    let mut curr = vec![0usize; b.len() + 1];

    for i in 1..=a.len() {
        curr[0] = i;
        for j in 1..=b.len() {
            let cost = usize::from(a[i - 1] != b[j - 1]);
            curr[j] = (prev[j] + 1).min(curr[j - 1] + 1).min(prev[j - 1] + cost);
        }
        std::mem::swap(&mut prev, &mut curr);
    }
    prev[b.len()]
}

fn parse(input: &str) -> std::result::Result<ParsedPattern, ()> {
    let trimmed = input.trim();
    let upper = trimmed.to_ascii_uppercase();

    if upper.starts_with("COUNT(") && trimmed.ends_with(')') {
        return match trimmed[6..trimmed.len() - 1].trim() {
            "n" => Ok(ParsedPattern::CountNodes),
            "e" => Ok(ParsedPattern::CountEdges),
            _ => Err(()),
        };
    }

    if upper.starts_with("MATCH") {
        if trimmed.contains("-[:") {
            return parse_label_match(trimmed);
        }
        if trimmed.contains('{') {
            return parse_property_match(trimmed);
        }
        return parse_all_nodes(trimmed);
    }

    Err(())
}

fn parse_all_nodes(input: &str) -> std::result::Result<ParsedPattern, ()> {
    let rest = strip_keyword(input, "MATCH").ok_or(())?;
    let (var, rest) = parse_parenthesized_identifier(rest.trim_start())?;
    let rest = strip_keyword(rest.trim_start(), "RETURN").ok_or(())?;
    if rest.trim() == var {
        Ok(ParsedPattern::AllNodes)
    } else {
        Err(())
    }
}

fn parse_property_match(input: &str) -> std::result::Result<ParsedPattern, ()> {
    let rest = strip_keyword(input, "MATCH").ok_or(())?;
    let rest = rest.trim_start().strip_prefix('(').ok_or(())?;
    let (_var, rest) = parse_identifier(rest);
    let rest = rest.trim_start().strip_prefix('{').ok_or(())?;

    let colon = rest.find(':').ok_or(())?;
    let key = rest[..colon].trim();
    if key.is_empty() {
        return Err(());
    }
    let rest = rest[colon + 1..].trim_start();
    let (value, rest) = parse_quoted_string(rest)?;

    let rest = rest.trim_start().strip_prefix('}').ok_or(())?;
    let rest = rest.trim_start().strip_prefix(')').ok_or(())?;
    let rest = strip_keyword(rest.trim_start(), "RETURN").ok_or(())?;
    let _return_var = rest.trim();

    Ok(ParsedPattern::NodesByProperty {
        key: PropertyKey::from(key),
        value: PropertyValue::from(value),
    })
}

fn parse_label_match(input: &str) -> std::result::Result<ParsedPattern, ()> {
    let rest = strip_keyword(input, "MATCH").ok_or(())?;
    let rest = rest.trim_start().strip_prefix("()").ok_or(())?;
    let rest = rest.strip_prefix("-[:").ok_or(())?;
    let close = rest.find("]-()").ok_or(())?;
    let label = rest[..close].trim();
    if label.is_empty() {
        return Err(());
    }
    let rest = &rest[close + "]-()".len()..];
    let rest = strip_keyword(rest.trim_start(), "RETURN").ok_or(())?;
    let _return_var = rest.trim();

    Ok(ParsedPattern::EdgesByLabel { label: Label::from(label) })
}

fn strip_keyword<'a>(input: &'a str, keyword: &str) -> Option<&'a str> {
    if input.len() < keyword.len() {
        return None;
    }
    let (head, tail) = input.split_at(keyword.len());
    if head.eq_ignore_ascii_case(keyword) {
        Some(tail)
    } else {
        None
    }
}

fn parse_parenthesized_identifier(input: &str) -> std::result::Result<(&str, &str), ()> {
    let rest = input.strip_prefix('(').ok_or(())?;
    let (ident, rest) = parse_identifier(rest);
    let rest = rest.strip_prefix(')').ok_or(())?;
    if ident.is_empty() {
        Err(())
    } else {
        Ok((ident, rest))
    }
}

fn parse_identifier(input: &str) -> (&str, &str) {
    let end = input.find(|c: char| !(c.is_alphanumeric() || c == '_')).unwrap_or(input.len());
    input.split_at(end)
}

fn parse_quoted_string(input: &str) -> std::result::Result<(&str, &str), ()> {
    let rest = input.strip_prefix('"').ok_or(())?;
    let end = rest.find('"').ok_or(())?;
    Ok((&rest[..end], &rest[end + 1..]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use loomgraph_common::NodeId;

    fn setup() -> (Store, IndexLayer) {
        let store = Store::new();
        let index = IndexLayer::new();
        let id = NodeId::new(1);
        let mut props = loomgraph_common::PropertyMap::default();
        props.insert(PropertyKey::from("city"), PropertyValue::from("Boston"));
        store.insert_node(id, props.clone());
        for (k, v) in &props {
            index.properties.index(id, k.clone(), v.clone());
        }
        (store, index)
    }

    #[test]
    fn all_nodes_pattern_dispatches_to_list_nodes() {
        let (store, index) = setup();
        let result = dispatch(&store, &index, "MATCH (n) RETURN n").unwrap();
        assert!(matches!(result, QueryResult::Nodes(nodes) if nodes.len() == 1));
    }

    #[test]
    fn property_pattern_dispatches_to_property_index() {
        let (store, index) = setup();
        let result = dispatch(&store, &index, r#"MATCH (n {city: "Boston"}) RETURN n"#).unwrap();
        assert!(matches!(result, QueryResult::Nodes(nodes) if nodes.len() == 1));

        let empty = dispatch(&store, &index, r#"MATCH (n {city: "Cairo"}) RETURN n"#).unwrap();
        assert!(matches!(empty, QueryResult::Nodes(nodes) if nodes.is_empty()));
    }

    #[test]
    fn label_pattern_dispatches_to_label_index() {
        let (store, index) = setup();
        let a = NodeId::new(1);
        let b = NodeId::new(2);
        store.insert_node(b, loomgraph_common::PropertyMap::default());
        let edge_id = loomgraph_common::EdgeId::new(1);
        store.insert_edge(Edge::new(edge_id, a, b, Label::from("KNOWS"), loomgraph_common::PropertyMap::default()));
        index.labels.index(edge_id, Label::from("KNOWS"));

        let result = dispatch(&store, &index, "MATCH ()-[:KNOWS]-() RETURN r").unwrap();
        assert!(matches!(result, QueryResult::Edges(edges) if edges.len() == 1));
    }

    #[test]
    fn count_patterns_dispatch_to_store_counters() {
        let (store, index) = setup();
        assert!(matches!(dispatch(&store, &index, "COUNT(n)").unwrap(), QueryResult::Count(1)));
        assert!(matches!(dispatch(&store, &index, "COUNT(e)").unwrap(), QueryResult::Count(0)));
    }

    #[test]
    fn unrecognized_pattern_is_unsupported_with_a_suggestion() {
        let (store, index) = setup();
        let err = dispatch(&store, &index, "MATCH (n RETURN n").unwrap_err();
        match err {
            Error::UnsupportedPattern { suggestion, .. } => assert!(suggestion.is_some()),
            other => panic!("expected UnsupportedPattern, got {other:?}"),
        }
    }
}

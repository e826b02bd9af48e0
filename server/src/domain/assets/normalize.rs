//! Tree normalization
//!
//! Flattens a parsed XML tree into [`Record`]s.
//!
//! Collapsing rules (applied recursively, children first):
//! - a group with exactly one text entry becomes that text
//! - a group with exactly one node becomes that node's record, unwrapped
//! - any other group becomes an ordered list, each entry normalized on its own
//!
//! Attributes are merged into the record before children, so a child with the
//! same name as an attribute replaces it.

use super::types::{RawChild, RawNode, Record, TEXT_KEY, Value};

/// Normalize a node into a record.
pub fn normalize(node: &RawNode) -> Record {
    let mut record: Record = node
        .attributes
        .iter()
        .map(|(k, v)| (k.clone(), Value::Text(v.clone())))
        .collect();

    if let Some(text) = &node.text {
        record.insert(TEXT_KEY.to_string(), Value::Text(text.clone()));
    }

    for (name, group) in &node.children {
        record.insert(name.clone(), normalize_children(group));
    }

    record
}

/// Normalize a named child group with the collapsing rules.
pub fn normalize_children(group: &[RawChild]) -> Value {
    match group {
        [RawChild::Text(text)] => Value::Text(text.clone()),
        [RawChild::Node(node)] => Value::Record(normalize(node)),
        _ => Value::List(group.iter().map(normalize_child).collect()),
    }
}

fn normalize_child(child: &RawChild) -> Value {
    match child {
        RawChild::Text(text) => Value::Text(text.clone()),
        RawChild::Node(node) => Value::Record(normalize(node)),
    }
}

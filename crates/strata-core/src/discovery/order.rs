use crate::node::{Node, NodeExt, ParentRef};
use std::collections::HashMap;
use tracing::trace;

///
/// ForwardReference
///
/// A child listed before its parent in the same sequence. The loader would
/// see the child's edge before the parent node exists.
///

#[derive(Clone, Debug, PartialEq)]
pub struct ForwardReference {
    pub child_position: usize,
    pub child_type: String,
    pub parent_position: usize,
    pub parent: ParentRef,
}

/// Report every node whose parent appears later in `nodes`.
///
/// Parents absent from the sequence are not reported; the loader resolves
/// those against nodes it already stores.
#[must_use]
pub fn find_forward_references(nodes: &[&dyn Node]) -> Vec<ForwardReference> {
    // first position of each node key
    let mut first_seen = HashMap::new();
    for (position, node) in nodes.iter().enumerate() {
        first_seen.entry(key_string(&node.key())).or_insert(position);
    }

    let mut found = Vec::new();
    for (position, node) in nodes.iter().enumerate() {
        let Some(parent) = node.parent_reference() else {
            continue;
        };
        let Some(&parent_position) = first_seen.get(&key_string(&parent)) else {
            continue;
        };
        if parent_position > position {
            found.push(ForwardReference {
                child_position: position,
                child_type: node.node_type().to_string(),
                parent_position,
                parent,
            });
        }
    }

    trace!(forward = found.len(), "checked sequence for forward references");

    found
}

// key_string
// property bags are key-ordered, so the rendered form is canonical
fn key_string(reference: &ParentRef) -> String {
    serde_json::to_string(reference).unwrap_or_else(|_| reference.to_string())
}

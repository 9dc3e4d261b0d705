use crate::document::{DocumentAdapter, NodeId};
use crate::dom::element::Position;

/// Position of `node` among the element children of its element parent.
///
/// Nodes without an element parent (the root `html`) get the default
/// `(0, 0, 1, 1)`.
pub fn compute_position<D: DocumentAdapter + ?Sized>(document: &D, node: NodeId) -> Position {
    let Some(parent) = document.parent_element(node) else {
        return Position::default();
    };

    let tag = document.node(node).map(|n| n.tag_name.as_str()).unwrap_or("");
    let siblings = document.element_children(parent);

    let mut position = Position {
        index_in_parent: 0,
        index_of_type: 0,
        total_siblings: siblings.len(),
        total_siblings_of_type: 0,
    };

    for (i, &sibling) in siblings.iter().enumerate() {
        if sibling == node {
            position.index_in_parent = i;
            position.index_of_type = position.total_siblings_of_type;
        }
        if document.node(sibling).is_some_and(|n| n.tag_name == tag) {
            position.total_siblings_of_type += 1;
        }
    }

    position
}

/// 1-based `:nth-child` index among all element siblings, whatever the parent kind
pub fn nth_child<D: DocumentAdapter + ?Sized>(document: &D, node: NodeId) -> usize {
    document
        .parent(node)
        .map(|parent| document.element_children(parent))
        .and_then(|siblings| siblings.iter().position(|&s| s == node))
        .map_or(1, |i| i + 1)
}

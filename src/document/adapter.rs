use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Handle to a node stored in a document arena
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NodeId(pub usize);

/// Kind of a raw document node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeKind {
    Document,
    Element,
    Text,
    Comment,
    Other,
}

/// A node as supplied by the document collaborator. Read-only to extraction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawNode {
    pub kind: NodeKind,

    /// Tag name as parsed (case-sensitive for SVG and MathML), empty for non-element nodes
    #[serde(default)]
    pub tag_name: String,

    #[serde(default)]
    pub attributes: IndexMap<String, String>,

    /// All descendant text, concatenated in document order
    #[serde(default)]
    pub text: String,

    /// Text of the immediate text children only
    #[serde(default)]
    pub direct_text: String,

    #[serde(default)]
    pub children: Vec<NodeId>,

    #[serde(default)]
    pub parent: Option<NodeId>,
}

impl RawNode {
    pub fn new(kind: NodeKind) -> Self {
        Self {
            kind,
            tag_name: String::new(),
            attributes: IndexMap::new(),
            text: String::new(),
            direct_text: String::new(),
            children: Vec::new(),
            parent: None,
        }
    }

    pub fn is_element(&self) -> bool {
        self.kind == NodeKind::Element && !self.tag_name.is_empty()
    }

    pub fn get_attribute(&self, key: &str) -> Option<&str> {
        self.attributes.get(key).map(String::as_str)
    }

    /// Whitespace-separated class tokens, in attribute order
    pub fn classes(&self) -> Vec<&str> {
        self.get_attribute("class")
            .map(|c| c.split_whitespace().collect())
            .unwrap_or_default()
    }
}

/// Navigable, queryable view of one parsed document.
///
/// Implementors own the node arena and answer match counts for locator
/// strings against the whole document. Everything else is provided on top
/// of [`DocumentAdapter::node`].
pub trait DocumentAdapter {
    fn node(&self, id: NodeId) -> Option<&RawNode>;

    /// The document node itself (not an element)
    fn root(&self) -> NodeId;

    /// Entry point for hierarchy extraction, usually the `body` element
    fn body(&self) -> Option<NodeId>;

    /// Number of elements matched by `locator` anywhere in the document
    fn count_matches(&self, locator: &str) -> usize;

    /// Attribute carrying each element's pre-assigned token
    fn token_attribute(&self) -> &str;

    fn children(&self, id: NodeId) -> &[NodeId] {
        self.node(id).map(|n| n.children.as_slice()).unwrap_or(&[])
    }

    fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).and_then(|n| n.parent)
    }

    /// Parent, but only when it is an element
    fn parent_element(&self, id: NodeId) -> Option<NodeId> {
        self.parent(id)
            .filter(|&p| self.node(p).is_some_and(RawNode::is_element))
    }

    fn element_children(&self, id: NodeId) -> Vec<NodeId> {
        self.children(id)
            .iter()
            .copied()
            .filter(|&c| self.node(c).is_some_and(RawNode::is_element))
            .collect()
    }

    fn attributes(&self, id: NodeId) -> Option<&IndexMap<String, String>> {
        self.node(id).map(|n| &n.attributes)
    }

    fn text(&self, id: NodeId) -> &str {
        self.node(id).map(|n| n.text.as_str()).unwrap_or("")
    }

    fn direct_text(&self, id: NodeId) -> &str {
        self.node(id).map(|n| n.direct_text.as_str()).unwrap_or("")
    }

    /// The element's pre-assigned unique token, if it was stamped
    fn token(&self, id: NodeId) -> Option<&str> {
        self.node(id)
            .and_then(|n| n.get_attribute(self.token_attribute()))
    }
}

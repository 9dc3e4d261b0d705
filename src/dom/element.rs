use crate::dom::strategy::SelectorStrategy;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Coarse semantic category of an element
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ElementType {
    Structure,
    Container,
    Interactive,
    Media,
    Content,
}

/// Ordinal position of an element among its element siblings (0-based)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Position {
    pub index_in_parent: usize,
    pub index_of_type: usize,
    pub total_siblings: usize,
    pub total_siblings_of_type: usize,
}

impl Default for Position {
    fn default() -> Self {
        Self {
            index_in_parent: 0,
            index_of_type: 0,
            total_siblings: 1,
            total_siblings_of_type: 1,
        }
    }
}

/// One retained element of the extracted hierarchy
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HierarchicalElement {
    /// Opaque token, unique within one extraction
    pub id: String,

    /// HTML tag name (e.g., "div", "button", "input")
    pub tag: String,

    /// All descendant text, trimmed
    pub text: String,

    /// Text of the element's own text nodes, trimmed
    pub direct_text: String,

    /// Primary locator: the first strategy after ranking
    pub selector: String,

    /// Ranked locator strategies, never empty
    pub strategies: Vec<SelectorStrategy>,

    /// First verified-unique locator
    pub unique_locator: String,

    /// Allow-listed attributes (id, class, href, ...)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attributes: Option<IndexMap<String, String>>,

    /// Retained child elements, in document order
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<HierarchicalElement>,

    /// Token of the parent element, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<String>,

    pub depth: usize,

    pub is_container: bool,

    pub has_content: bool,

    pub element_type: ElementType,

    pub position: Position,
}

impl HierarchicalElement {
    /// Pre-order iterator over this element and all its descendants
    pub fn walk(&self) -> Walk<'_> {
        Walk { stack: vec![self] }
    }

    /// Find an element in this subtree by its token
    pub fn find_by_id(&self, id: &str) -> Option<&HierarchicalElement> {
        self.walk().find(|e| e.id == id)
    }
}

/// Pre-order traversal driven by an explicit stack
pub struct Walk<'a> {
    stack: Vec<&'a HierarchicalElement>,
}

impl<'a> Iterator for Walk<'a> {
    type Item = &'a HierarchicalElement;

    fn next(&mut self) -> Option<Self::Item> {
        let element = self.stack.pop()?;
        self.stack.extend(element.children.iter().rev());
        Some(element)
    }
}

/// Flat, serializable view of an element: everything but the nested children
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct FlatElement<'a> {
    pub id: &'a str,
    pub tag: &'a str,
    pub text: &'a str,
    pub direct_text: &'a str,
    pub selector: &'a str,
    pub strategies: &'a [SelectorStrategy],
    pub unique_locator: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attributes: Option<&'a IndexMap<String, String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<&'a str>,
    pub child_ids: Vec<&'a str>,
    pub depth: usize,
    pub is_container: bool,
    pub has_content: bool,
    pub element_type: ElementType,
    pub position: Position,
}

impl<'a> From<&'a HierarchicalElement> for FlatElement<'a> {
    fn from(element: &'a HierarchicalElement) -> Self {
        Self {
            id: &element.id,
            tag: &element.tag,
            text: &element.text,
            direct_text: &element.direct_text,
            selector: &element.selector,
            strategies: &element.strategies,
            unique_locator: &element.unique_locator,
            attributes: element.attributes.as_ref(),
            parent_id: element.parent_id.as_deref(),
            child_ids: element.children.iter().map(|c| c.id.as_str()).collect(),
            depth: element.depth,
            is_container: element.is_container,
            has_content: element.has_content,
            element_type: element.element_type,
            position: element.position,
        }
    }
}

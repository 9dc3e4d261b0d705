use crate::document::adapter::{DocumentAdapter, NodeId, NodeKind, RawNode};
use html5ever::{LocalName, Namespace, QualName};
use log::debug;
use scraper::{Html, Node, Selector, StrTendril};
use std::collections::HashMap;
use std::fmt;

/// Attribute used to stamp element tokens unless configured otherwise
pub const DEFAULT_TOKEN_ATTRIBUTE: &str = "data-element-id";

/// A parsed HTML document backed by `scraper`.
///
/// Every element is stamped with a traversal-order token (`el-0`, `el-1`, ...)
/// in the token attribute before the arena is built, so locators keyed on
/// that attribute can be verified against the document like any other.
pub struct HtmlDocument {
    html: Html,
    nodes: Vec<RawNode>,
    body: Option<NodeId>,
    tokens: HashMap<String, NodeId>,
    token_attribute: String,
}

impl HtmlDocument {
    /// Parse markup, stamping tokens into `data-element-id`
    pub fn parse(markup: &str) -> Self {
        Self::parse_with_token_attribute(markup, DEFAULT_TOKEN_ATTRIBUTE)
    }

    /// Parse markup, stamping tokens into a custom attribute
    pub fn parse_with_token_attribute(markup: &str, token_attribute: &str) -> Self {
        let mut html = Html::parse_document(markup);
        let stamped_count = stamp_tokens(&mut html, token_attribute);
        let (nodes, body) = build_arena(&html);

        let tokens = nodes
            .iter()
            .enumerate()
            .filter_map(|(i, n)| {
                n.get_attribute(token_attribute)
                    .map(|t| (t.to_string(), NodeId(i)))
            })
            .collect();

        debug!(
            "Parsed document: {} nodes, {} elements stamped with '{}'",
            nodes.len(),
            stamped_count,
            token_attribute
        );

        Self {
            html,
            nodes,
            body,
            tokens,
            token_attribute: token_attribute.to_string(),
        }
    }

    /// Nodes matched by `locator`, in document order
    pub fn select(&self, locator: &str) -> Vec<NodeId> {
        let Ok(selector) = Selector::parse(locator) else {
            debug!("Unparsable locator '{}'", locator);
            return Vec::new();
        };

        self.html
            .select(&selector)
            .filter_map(|el| el.value().attr(&self.token_attribute))
            .filter_map(|token| self.find_by_token(token))
            .collect()
    }

    /// Node carrying the given stamped token
    pub fn find_by_token(&self, token: &str) -> Option<NodeId> {
        self.tokens.get(token).copied()
    }

    /// All nodes in document (pre-)order; index 0 is the document node
    pub fn nodes(&self) -> &[RawNode] {
        &self.nodes
    }

    pub fn element_count(&self) -> usize {
        self.nodes.iter().filter(|n| n.is_element()).count()
    }
}

impl fmt::Debug for HtmlDocument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HtmlDocument")
            .field("nodes", &self.nodes.len())
            .field("body", &self.body)
            .field("token_attribute", &self.token_attribute)
            .finish()
    }
}

impl DocumentAdapter for HtmlDocument {
    fn node(&self, id: NodeId) -> Option<&RawNode> {
        self.nodes.get(id.0)
    }

    fn root(&self) -> NodeId {
        NodeId(0)
    }

    fn body(&self) -> Option<NodeId> {
        self.body
    }

    fn count_matches(&self, locator: &str) -> usize {
        match Selector::parse(locator) {
            Ok(selector) => self.html.select(&selector).count(),
            Err(e) => {
                debug!("Unparsable locator '{}': {:?}", locator, e);
                0
            }
        }
    }

    fn token_attribute(&self) -> &str {
        &self.token_attribute
    }
}

/// Write `el-<n>` into the token attribute of every element, in pre-order.
/// A value already present under that name is overwritten.
fn stamp_tokens(html: &mut Html, attribute: &str) -> usize {
    let elements: Vec<_> = html
        .tree
        .root()
        .descendants()
        .filter(|node| node.value().is_element())
        .map(|node| node.id())
        .collect();

    let name = QualName::new(None, Namespace::from(""), LocalName::from(attribute));
    for (ordinal, &id) in elements.iter().enumerate() {
        let Some(mut node) = html.tree.get_mut(id) else {
            continue;
        };
        if let Node::Element(element) = node.value() {
            element
                .attrs
                .insert(name.clone(), StrTendril::from(format!("el-{}", ordinal)));
        }
    }

    elements.len()
}

/// `prefix:local` for namespaced attributes such as `xlink:href`
fn attribute_name(name: &QualName) -> String {
    match &name.prefix {
        Some(prefix) => format!("{}:{}", prefix, name.local),
        None => name.local.to_string(),
    }
}

/// Flatten the parsed tree into an arena, iteratively and in pre-order
fn build_arena(html: &Html) -> (Vec<RawNode>, Option<NodeId>) {
    let mut nodes: Vec<RawNode> = Vec::new();
    let mut body = None;
    let mut stack = vec![(html.tree.root(), None)];

    while let Some((node, parent)) = stack.pop() {
        let id = NodeId(nodes.len());

        let mut raw = match node.value() {
            Node::Document | Node::Fragment => RawNode::new(NodeKind::Document),
            Node::Element(element) => {
                let mut raw = RawNode::new(NodeKind::Element);
                // foreign content (svg, math) keeps its case-sensitive names
                raw.tag_name = element.name().to_string();
                raw.attributes = element
                    .attrs
                    .iter()
                    .map(|(name, value)| (attribute_name(name), value.to_string()))
                    .collect();
                raw.direct_text = node
                    .children()
                    .filter_map(|c| c.value().as_text())
                    .map(|t| &**t)
                    .collect();
                if body.is_none() && raw.tag_name == "body" {
                    body = Some(id);
                }
                raw
            }
            Node::Text(text) => {
                let mut raw = RawNode::new(NodeKind::Text);
                raw.text = String::from(&**text);
                raw.direct_text = raw.text.clone();
                raw
            }
            Node::Comment(comment) => {
                let mut raw = RawNode::new(NodeKind::Comment);
                raw.text = String::from(&**comment);
                raw
            }
            _ => RawNode::new(NodeKind::Other),
        };

        raw.parent = parent;
        if let Some(NodeId(p)) = parent {
            nodes[p].children.push(id);
        }
        nodes.push(raw);

        let children: Vec<_> = node.children().collect();
        stack.extend(children.into_iter().rev().map(|c| (c, Some(id))));
    }

    // Children follow their parent in pre-order, so a reverse sweep sees
    // every child's aggregate text before the parent needs it.
    for i in (0..nodes.len()).rev() {
        if nodes[i].kind != NodeKind::Element {
            continue;
        }
        let text: String = nodes[i]
            .children
            .iter()
            .map(|&NodeId(c)| &nodes[c])
            .filter(|child| matches!(child.kind, NodeKind::Element | NodeKind::Text))
            .map(|child| child.text.as_str())
            .collect();
        nodes[i].text = text;
    }

    (nodes, body)
}

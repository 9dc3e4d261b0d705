use crate::document::{DocumentAdapter, MatchCache, NodeId};
use crate::dom::classify::{classify, is_container};
use crate::dom::config::ExtractOptions;
use crate::dom::element::{FlatElement, HierarchicalElement};
use crate::dom::position::compute_position;
use crate::dom::stats::TreeStats;
use crate::dom::strategy::{generate_strategies, primary_locator, unique_locator};
use log::{debug, trace, warn};
use serde::{Deserialize, Serialize};

/// Result of one hierarchy extraction
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Extraction {
    /// Top-level retained elements, in document order
    pub tree: Vec<HierarchicalElement>,

    pub stats: TreeStats,
}

impl Extraction {
    /// Pre-order sequence of every retained element
    pub fn flat(&self) -> Vec<&HierarchicalElement> {
        flatten(&self.tree)
    }

    /// Serializable flat records, without nested children
    pub fn flat_view(&self) -> Vec<FlatElement<'_>> {
        self.flat().into_iter().map(FlatElement::from).collect()
    }

    /// Find an element anywhere in the tree by its token
    pub fn find_by_id(&self, id: &str) -> Option<&HierarchicalElement> {
        self.tree.iter().find_map(|root| root.find_by_id(id))
    }

    pub fn is_empty(&self) -> bool {
        self.tree.is_empty()
    }
}

/// Pre-order projection of a built tree: each root before its children,
/// children in original order.
pub fn flatten(tree: &[HierarchicalElement]) -> Vec<&HierarchicalElement> {
    let mut flat = Vec::new();
    let mut stack: Vec<&HierarchicalElement> = tree.iter().rev().collect();

    while let Some(element) = stack.pop() {
        flat.push(element);
        stack.extend(element.children.iter().rev());
    }

    flat
}

/// Builds the annotated element hierarchy of a document.
///
/// Traversal is an explicit work stack carrying `(node, parent, depth)`;
/// nodes are first annotated in pre-order into slots, then assembled into
/// owned subtrees bottom-up.
pub struct HierarchyBuilder<'o> {
    options: &'o ExtractOptions,
}

struct Frame {
    node: NodeId,
    parent: Option<usize>,
    depth: usize,
}

struct Slot {
    parent: Option<usize>,
    element: Option<HierarchicalElement>,
}

impl<'o> HierarchyBuilder<'o> {
    pub fn new(options: &'o ExtractOptions) -> Self {
        Self { options }
    }

    /// Build the tree rooted at the document's body (or root element)
    pub fn build<D: DocumentAdapter + ?Sized>(&self, document: &D) -> Vec<HierarchicalElement> {
        let entry = document
            .body()
            .or_else(|| document.element_children(document.root()).first().copied());
        let Some(entry) = entry else {
            return Vec::new();
        };

        let mut cache = MatchCache::new(document);
        let mut slots: Vec<Slot> = Vec::new();
        let mut truncated = 0usize;
        let mut fallback_tokens = 0usize;

        let mut stack: Vec<Frame> = document
            .children(entry)
            .iter()
            .rev()
            .map(|&node| Frame { node, parent: None, depth: 0 })
            .collect();

        while let Some(Frame { node, parent, depth }) = stack.pop() {
            let Some(raw) = document.node(node) else {
                continue;
            };
            if !raw.is_element() {
                continue;
            }

            let text = raw.text.trim();
            let element_children = document.element_children(node);

            if text.is_empty()
                && element_children.is_empty()
                && !self.options.is_kept(&raw.tag_name)
            {
                trace!("Pruned empty <{}>", raw.tag_name);
                continue;
            }

            let id = match document.token(node) {
                Some(token) => token.to_string(),
                None => {
                    fallback_tokens += 1;
                    format!("el-x{}", node.0)
                }
            };

            let position = compute_position(document, node);
            let strategies = generate_strategies(&mut cache, node, &id, &position);
            let parent_id = parent.and_then(|p| slots[p].element.as_ref().map(|e| e.id.clone()));

            let element = HierarchicalElement {
                selector: primary_locator(&strategies).to_string(),
                unique_locator: unique_locator(&strategies).to_string(),
                id,
                tag: raw.tag_name.clone(),
                text: text.to_string(),
                direct_text: raw.direct_text.trim().to_string(),
                strategies,
                attributes: self.options.select_attributes(&raw.attributes),
                children: Vec::new(),
                parent_id,
                depth,
                is_container: is_container(&raw.tag_name),
                has_content: text.chars().count() > self.options.content_threshold
                    || !element_children.is_empty(),
                element_type: classify(&raw.tag_name),
                position,
            };
            trace!("<{}> {} -> {}", element.tag, element.id, element.selector);

            let slot = slots.len();
            slots.push(Slot {
                parent,
                element: Some(element),
            });

            if depth >= self.options.max_depth {
                if !element_children.is_empty() {
                    truncated += 1;
                }
                continue;
            }

            stack.extend(element_children.into_iter().rev().map(|child| Frame {
                node: child,
                parent: Some(slot),
                depth: depth + 1,
            }));
        }

        if truncated > 0 {
            warn!(
                "Depth cap {} reached: {} subtree(s) truncated",
                self.options.max_depth, truncated
            );
        }
        if fallback_tokens > 0 {
            warn!("{} element(s) carried no stamped token", fallback_tokens);
        }
        debug!(
            "Built {} elements; {} locator queries, {} cache hits",
            slots.len(),
            cache.misses(),
            cache.hits()
        );

        assemble(slots)
    }
}

/// Move every slot into its parent's children. Slots are in pre-order, so
/// walking them backwards completes each subtree before its parent is reached.
fn assemble(mut slots: Vec<Slot>) -> Vec<HierarchicalElement> {
    let mut roots = Vec::new();

    for i in (0..slots.len()).rev() {
        let parent = slots[i].parent;
        let Some(mut element) = slots[i].element.take() else {
            continue;
        };
        // children were pushed last-first
        element.children.reverse();

        match parent.and_then(|p| slots[p].element.as_mut()) {
            Some(parent) => parent.children.push(element),
            None => roots.push(element),
        }
    }

    roots.reverse();
    roots
}

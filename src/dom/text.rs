use crate::document::{DocumentAdapter, NodeId};
use crate::dom::config::ExtractOptions;
use crate::dom::css::escape_identifier;
use indexmap::IndexMap;
use log::debug;
use serde::{Deserialize, Serialize};

/// A text-bearing element with a best-effort locator.
///
/// Locators here are not verified against the document.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TextElement {
    pub tag: String,

    /// Trimmed text content
    pub text: String,

    pub selector: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attributes: Option<IndexMap<String, String>>,

    /// 1-based occurrence among elements with identical text
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub occurrence: Option<usize>,

    /// Number of elements sharing this exact text
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duplicate_count: Option<usize>,
}

/// `#id` when present, otherwise the tag with up to three class tokens
fn primary_selector(tag: &str, id: Option<&str>, classes: &[&str]) -> String {
    if let Some(id) = id.map(str::trim).filter(|id| !id.is_empty()) {
        return format!("#{}", escape_identifier(id));
    }

    let mut selector = tag.to_string();
    for class in classes.iter().take(3) {
        selector.push('.');
        selector.push_str(&escape_identifier(class));
    }
    selector
}

/// Collect every element below the body whose trimmed text length lies in
/// the configured bounds. Elements with identical text are told apart by
/// `tag:nth-of-type(k)` in encounter order.
pub fn extract_text_elements<D: DocumentAdapter + ?Sized>(
    document: &D,
    options: &ExtractOptions,
) -> Vec<TextElement> {
    let entry = document
        .body()
        .or_else(|| document.element_children(document.root()).first().copied());
    let Some(entry) = entry else {
        return Vec::new();
    };

    let mut elements = Vec::new();
    let mut stack: Vec<NodeId> = document.element_children(entry).into_iter().rev().collect();

    while let Some(node) = stack.pop() {
        let Some(raw) = document.node(node) else {
            continue;
        };
        if options.skips_text(&raw.tag_name) {
            continue;
        }
        stack.extend(document.element_children(node).into_iter().rev());

        let text = raw.text.trim();
        let length = text.chars().count();
        if length < options.min_text_length || length > options.max_text_length {
            continue;
        }

        elements.push(TextElement {
            tag: raw.tag_name.clone(),
            text: text.to_string(),
            selector: primary_selector(&raw.tag_name, raw.get_attribute("id"), &raw.classes()),
            attributes: options.select_attributes(&raw.attributes),
            occurrence: None,
            duplicate_count: None,
        });
    }

    let mut groups: IndexMap<&str, Vec<usize>> = IndexMap::new();
    for (i, element) in elements.iter().enumerate() {
        groups.entry(element.text.as_str()).or_default().push(i);
    }

    let duplicates: Vec<Vec<usize>> = groups
        .into_values()
        .filter(|indices| indices.len() > 1)
        .collect();

    for indices in &duplicates {
        for (k, &i) in indices.iter().enumerate() {
            let element = &mut elements[i];
            element.selector = format!("{}:nth-of-type({})", element.tag, k + 1);
            element.occurrence = Some(k + 1);
            element.duplicate_count = Some(indices.len());
        }
    }

    debug!(
        "Collected {} text elements ({} duplicate groups)",
        elements.len(),
        duplicates.len()
    );

    elements
}

use crate::dom::element::HierarchicalElement;
use serde::{Deserialize, Serialize};

/// Aggregate counts over a flattened hierarchy
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TreeStats {
    pub max_depth: usize,
    pub container_elements: usize,
    /// Non-container elements with content
    pub content_elements: usize,
    pub total_elements: usize,
}

impl TreeStats {
    pub fn from_flat(flat: &[&HierarchicalElement]) -> Self {
        flat.iter().fold(Self::default(), |mut stats, element| {
            stats.max_depth = stats.max_depth.max(element.depth);
            if element.is_container {
                stats.container_elements += 1;
            } else if element.has_content {
                stats.content_elements += 1;
            }
            stats.total_elements += 1;
            stats
        })
    }
}

//! Locator synthesis and hierarchy extraction
//!
//! This module turns a parsed document into an annotated element hierarchy:
//! - SelectorStrategy: ranked, match-count-verified locator candidates
//! - HierarchicalElement: retained element with locators, position and category
//! - HierarchyBuilder: iterative descent with content-based pruning
//! - Extraction / TreeStats: the tree, its pre-order flattening and aggregates
//! - TextElement: the lighter flat text-element contract

pub mod classify;
pub mod config;
pub mod css;
pub mod element;
pub mod position;
pub mod stats;
pub mod strategy;
pub mod text;
pub mod tree;

pub use config::ExtractOptions;
pub use element::{ElementType, FlatElement, HierarchicalElement, Position};
pub use stats::TreeStats;
pub use strategy::{SelectorStrategy, StrategyKind};
pub use text::{TextElement, extract_text_elements};
pub use tree::{Extraction, HierarchyBuilder, flatten};

use crate::document::{DocumentAdapter, MatchCache, NodeId};
use log::debug;

/// Extract the annotated hierarchy, its flattening stats included
pub fn extract_hierarchy<D: DocumentAdapter + ?Sized>(
    document: &D,
    options: &ExtractOptions,
) -> Extraction {
    let tree = HierarchyBuilder::new(options).build(document);
    let stats = TreeStats::from_flat(&flatten(&tree));
    debug!(
        "Extracted {} elements across {} roots (max depth {})",
        stats.total_elements,
        tree.len(),
        stats.max_depth
    );
    Extraction { tree, stats }
}

/// Ranked strategies for a single element, outside of a full extraction
pub fn strategies_for<D: DocumentAdapter + ?Sized>(
    document: &D,
    node: NodeId,
) -> Vec<SelectorStrategy> {
    let Some(token) = document.token(node) else {
        return Vec::new();
    };
    let mut cache = MatchCache::new(document);
    let position = position::compute_position(document, node);
    strategy::generate_strategies(&mut cache, node, token, &position)
}

use crate::document::{DocumentAdapter, MatchCache, NodeId};
use crate::dom::css::{escape_attribute_value, escape_identifier};
use crate::dom::element::Position;
use crate::dom::position::nth_child;
use log::trace;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::cmp::Reverse;

/// How a locator was derived
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StrategyKind {
    Id,
    Class,
    ComboClass,
    AllClasses,
    NthChild,
    NthOfType,
    UniquePath,
    UniqueAttribute,
}

/// One candidate locator for an element
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SelectorStrategy {
    pub locator: String,

    pub kind: StrategyKind,

    /// Heuristic trust in [0, 1]
    pub reliability: f64,

    pub description: String,

    /// Whether the locator matches exactly one element of the document
    pub is_unique: bool,
}

impl SelectorStrategy {
    pub fn new(
        locator: impl Into<String>,
        kind: StrategyKind,
        reliability: f64,
        description: impl Into<String>,
        is_unique: bool,
    ) -> Self {
        Self {
            locator: locator.into(),
            kind,
            reliability: reliability.clamp(0.0, 1.0),
            description: description.into(),
            is_unique,
        }
    }
}

/// Layout, spacing and typography utility tokens (Tailwind-style), with
/// optional variant prefixes such as `md:` or `hover:`.
static UTILITY_CLASS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^(?:[a-z0-9]+:)*-?(?:(?:w|h|min-w|min-h|max-w|max-h|size|p|px|py|pt|pr|pb|pl|m|mx|my|mt|mr|mb|ml|gap|gap-x|gap-y|space-x|space-y|text|font|leading|tracking|bg|border|rounded|shadow|opacity|z|top|right|bottom|left|inset|order|col|row|basis|grow|shrink|items|justify|self|place|overflow|object|aspect|line-clamp|columns|decoration|ring|outline|divide)-\S+|(?:flex|grid|block|inline|inline-block|inline-flex|hidden|contents|relative|absolute|fixed|sticky|static|truncate|underline|uppercase|lowercase|capitalize|italic|container|grow|shrink)(?:-\S+)?)$",
    )
    .expect("utility class pattern is valid")
});

/// Short or layout-oriented class token with little semantic value
pub fn is_utility_class(token: &str) -> bool {
    token.chars().count() <= 2 || UTILITY_CLASS.is_match(token)
}

/// Order class tokens from most to least specific: utility tokens last,
/// otherwise longer names first. Ties keep attribute order.
pub fn rank_classes<'c>(classes: &[&'c str]) -> Vec<&'c str> {
    let mut ranked = classes.to_vec();
    ranked.sort_by_key(|c| (is_utility_class(c), Reverse(c.chars().count())));
    ranked
}

/// Reliability for a verified locator: `unique` when it matched once,
/// otherwise `1 / count` but never below `floor`.
fn score(count: usize, unique: f64, floor: f64) -> f64 {
    match count {
        1 => unique,
        0 => floor,
        n => floor.max(1.0 / n as f64),
    }
}

/// Locator-generating pass over one element.
///
/// Verifiable candidates go through the shared [`MatchCache`]; the two
/// structural fallbacks are unique by construction.
struct Candidates<'c, 'a, D: DocumentAdapter + ?Sized> {
    cache: &'c mut MatchCache<'a, D>,
    strategies: Vec<SelectorStrategy>,
}

impl<D: DocumentAdapter + ?Sized> Candidates<'_, '_, D> {
    fn verified(
        &mut self,
        locator: String,
        kind: StrategyKind,
        (unique, floor): (f64, f64),
        description: String,
    ) -> usize {
        let count = self.cache.count(&locator);
        trace!("{} -> {} match(es)", locator, count);
        self.strategies.push(SelectorStrategy::new(
            locator,
            kind,
            score(count, unique, floor),
            description,
            count == 1,
        ));
        count
    }
}

/// Generate and rank every locator strategy for `node`.
///
/// The result is never empty and always ends up containing a unique-path
/// and a unique-attribute strategy, so at least one entry is unique.
pub fn generate_strategies<D: DocumentAdapter + ?Sized>(
    cache: &mut MatchCache<'_, D>,
    node: NodeId,
    token: &str,
    position: &Position,
) -> Vec<SelectorStrategy> {
    let document = cache.document();
    let Some(raw) = document.node(node) else {
        return Vec::new();
    };
    let tag = raw.tag_name.as_str();

    let mut classes: Vec<&str> = Vec::new();
    for class in raw.classes() {
        if !classes.contains(&class) {
            classes.push(class);
        }
    }

    let mut candidates = Candidates {
        cache,
        strategies: Vec::new(),
    };

    // Id
    if let Some(id) = raw.get_attribute("id").map(str::trim).filter(|id| !id.is_empty()) {
        candidates.verified(
            format!("#{}", escape_identifier(id)),
            StrategyKind::Id,
            (1.0, 0.5),
            format!("Element id: {}", id),
        );
    }

    // Single classes
    let mut primary_count = None;
    for class in &classes {
        let count = candidates.verified(
            format!("{}.{}", tag, escape_identifier(class)),
            StrategyKind::Class,
            (1.0, 0.3),
            format!("Class: {}", class),
        );
        primary_count.get_or_insert(count);
    }

    // Pairwise combinations
    for (i, first) in classes.iter().enumerate() {
        for second in &classes[i + 1..] {
            candidates.verified(
                format!("{}.{}.{}", tag, escape_identifier(first), escape_identifier(second)),
                StrategyKind::ComboClass,
                (0.95, 0.4),
                format!("Class combination: {} + {}", first, second),
            );
        }
    }

    // All classes at once
    if !classes.is_empty() {
        let joined: String = classes
            .iter()
            .map(|c| format!(".{}", escape_identifier(c)))
            .collect();
        candidates.verified(
            format!("{}{}", tag, joined),
            StrategyKind::AllClasses,
            (0.98, 0.5),
            format!("All classes: {}", classes.join(" ")),
        );
    }

    // Most specific pair
    if classes.len() >= 2 {
        let ranked = rank_classes(&classes);
        candidates.verified(
            format!("{}.{}.{}", tag, escape_identifier(ranked[0]), escape_identifier(ranked[1])),
            StrategyKind::ComboClass,
            (0.96, 0.45),
            format!("Specific class pair: {} + {}", ranked[0], ranked[1]),
        );
    }

    // Primary class is ambiguous: pin it down by position
    if let (Some(primary), Some(count)) = (classes.first(), primary_count) {
        if count != 1 {
            let base = format!("{}.{}", tag, escape_identifier(primary));
            candidates.verified(
                format!("{}:nth-child({})", base, position.index_in_parent + 1),
                StrategyKind::NthChild,
                (0.8, 0.4),
                format!("Class {} at child position {}", primary, position.index_in_parent + 1),
            );
            candidates.verified(
                format!("{}:nth-of-type({})", base, position.index_of_type + 1),
                StrategyKind::NthOfType,
                (0.75, 0.35),
                format!("Class {} at type position {}", primary, position.index_of_type + 1),
            );
        }
    }

    let mut strategies = candidates.strategies;

    strategies.push(SelectorStrategy::new(
        unique_path(document, node),
        StrategyKind::UniquePath,
        0.7,
        "Positional path from the document root",
        true,
    ));

    strategies.push(SelectorStrategy::new(
        format!(
            "[{}=\"{}\"]",
            document.token_attribute(),
            escape_attribute_value(token)
        ),
        StrategyKind::UniqueAttribute,
        1.0,
        format!("Stamped element token: {}", token),
        true,
    ));

    rank_strategies(&mut strategies);
    strategies
}

/// Unique strategies first, then descending reliability. Stable, so ties
/// keep generation order.
pub fn rank_strategies(strategies: &mut [SelectorStrategy]) {
    strategies.sort_by(|a, b| {
        b.is_unique
            .cmp(&a.is_unique)
            .then(b.reliability.total_cmp(&a.reliability))
    });
}

/// Locator of the top-ranked strategy
pub fn primary_locator(strategies: &[SelectorStrategy]) -> &str {
    strategies.first().map(|s| s.locator.as_str()).unwrap_or("")
}

/// Locator of the first unique strategy, falling back to the unique path
pub fn unique_locator(strategies: &[SelectorStrategy]) -> &str {
    strategies
        .iter()
        .find(|s| s.is_unique)
        .or_else(|| strategies.iter().find(|s| s.kind == StrategyKind::UniquePath))
        .map(|s| s.locator.as_str())
        .unwrap_or("")
}

/// `tag:nth-child(k)` chain from the document's root element down to `node`
pub fn unique_path<D: DocumentAdapter + ?Sized>(document: &D, node: NodeId) -> String {
    let mut steps = Vec::new();
    let mut current = Some(node);

    while let Some(id) = current {
        let Some(raw) = document.node(id).filter(|n| n.is_element()) else {
            break;
        };
        steps.push(format!("{}:nth-child({})", raw.tag_name, nth_child(document, id)));
        current = document.parent(id);
    }

    steps.reverse();
    steps.join(" > ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::HtmlDocument;
    use crate::dom::position::compute_position;

    fn first_in_body(doc: &HtmlDocument) -> NodeId {
        doc.element_children(doc.body().unwrap())[0]
    }

    fn strategies_for(doc: &HtmlDocument, node: NodeId) -> Vec<SelectorStrategy> {
        let mut cache = MatchCache::new(doc);
        let token = doc.token(node).unwrap().to_string();
        let position = compute_position(doc, node);
        generate_strategies(&mut cache, node, &token, &position)
    }

    #[test]
    fn test_id_strategy_ranks_first() {
        let doc = HtmlDocument::parse("<div id=\"x\"><p>Hello</p></div>");
        let div = first_in_body(&doc);
        let strategies = strategies_for(&doc, div);

        assert_eq!(primary_locator(&strategies), "#x");
        assert_eq!(strategies[0].kind, StrategyKind::Id);
        assert_eq!(strategies[0].reliability, 1.0);
        assert!(strategies[0].is_unique);
        assert_eq!(unique_locator(&strategies), "#x");
    }

    #[test]
    fn test_duplicate_id_is_not_unique() {
        let doc = HtmlDocument::parse("<p id=\"dup\">a</p><p id=\"dup\">b</p>");
        let p = first_in_body(&doc);
        let strategies = strategies_for(&doc, p);

        let id = strategies.iter().find(|s| s.kind == StrategyKind::Id).unwrap();
        assert_eq!(id.reliability, 0.5);
        assert!(!id.is_unique);
        assert_ne!(unique_locator(&strategies), "#dup");
    }

    #[test]
    fn test_bare_element_gets_only_fallbacks() {
        let doc = HtmlDocument::parse("<p>plain</p>");
        let p = first_in_body(&doc);
        let strategies = strategies_for(&doc, p);

        assert_eq!(strategies.len(), 2);
        assert_eq!(strategies[0].kind, StrategyKind::UniqueAttribute);
        assert_eq!(strategies[0].locator, "[data-element-id=\"el-3\"]");
        assert_eq!(strategies[1].kind, StrategyKind::UniquePath);
        assert_eq!(
            strategies[1].locator,
            "html:nth-child(1) > body:nth-child(2) > p:nth-child(1)"
        );
        assert!(strategies.iter().all(|s| s.is_unique));
        assert_eq!(doc.count_matches(&strategies[1].locator), 1);
    }

    #[test]
    fn test_shared_class_scores_by_match_count() {
        let doc = HtmlDocument::parse(
            "<span class=\"tag\">A</span><span class=\"tag\">B</span><span class=\"tag\">C</span>",
        );
        let span = first_in_body(&doc);
        let strategies = strategies_for(&doc, span);

        let class = strategies.iter().find(|s| s.kind == StrategyKind::Class).unwrap();
        assert_eq!(class.locator, "span.tag");
        assert!(!class.is_unique);
        assert!((class.reliability - 1.0 / 3.0).abs() < 1e-9);

        let nth_child = strategies.iter().find(|s| s.kind == StrategyKind::NthChild).unwrap();
        assert_eq!(nth_child.locator, "span.tag:nth-child(1)");
        assert!(nth_child.is_unique);
        assert_eq!(nth_child.reliability, 0.8);

        let nth_of_type = strategies.iter().find(|s| s.kind == StrategyKind::NthOfType).unwrap();
        assert_eq!(nth_of_type.locator, "span.tag:nth-of-type(1)");
        assert_eq!(nth_of_type.reliability, 0.75);
    }

    #[test]
    fn test_unique_class_skips_position_fallback() {
        let doc = HtmlDocument::parse("<span class=\"only\">A</span>");
        let strategies = strategies_for(&doc, first_in_body(&doc));
        assert!(strategies.iter().all(|s| s.kind != StrategyKind::NthChild));
        assert_eq!(primary_locator(&strategies), "span.only");
    }

    #[test]
    fn test_combinations() {
        let doc = HtmlDocument::parse(
            "<div class=\"card featured w-full\">x</div><div class=\"card\">y</div><div class=\"featured\">z</div>",
        );
        let strategies = strategies_for(&doc, first_in_body(&doc));
        let locators: Vec<_> = strategies.iter().map(|s| s.locator.as_str()).collect();

        assert!(locators.contains(&"div.card.featured"));
        assert!(locators.contains(&"div.card.w-full"));
        assert!(locators.contains(&"div.featured.w-full"));
        assert!(locators.contains(&"div.card.featured.w-full"));

        let all = strategies
            .iter()
            .find(|s| s.description.starts_with("All classes"))
            .unwrap();
        assert_eq!(all.reliability, 0.98);

        let specific = strategies
            .iter()
            .find(|s| s.description.starts_with("Specific class pair"))
            .unwrap();
        assert_eq!(specific.locator, "div.featured.card");
        assert_eq!(specific.reliability, 0.96);
    }

    #[test]
    fn test_utility_class_deprioritized() {
        let doc = HtmlDocument::parse("<h1 class=\"w-full hero-title\">Welcome</h1>");
        let strategies = strategies_for(&doc, first_in_body(&doc));

        let specific = strategies
            .iter()
            .find(|s| s.description.starts_with("Specific class pair"))
            .unwrap();
        assert_eq!(specific.locator, "h1.hero-title.w-full");
        assert_eq!(specific.description, "Specific class pair: hero-title + w-full");
    }

    #[test]
    fn test_all_classes_for_two_class_element() {
        let doc = HtmlDocument::parse("<h1 class=\"w-full hero-title\">Welcome</h1>");
        let strategies = strategies_for(&doc, first_in_body(&doc));

        let all = strategies
            .iter()
            .find(|s| s.kind == StrategyKind::AllClasses)
            .unwrap();
        assert_eq!(all.locator, "h1.w-full.hero-title");
        assert_eq!(all.description, "All classes: w-full hero-title");
        assert_eq!(all.reliability, 0.98);
        assert!(all.is_unique);
    }

    #[test]
    fn test_all_classes_for_single_class() {
        let doc = HtmlDocument::parse("<li class=\"item\">a</li><li class=\"item\">b</li>");
        let strategies = strategies_for(&doc, first_in_body(&doc));

        let all = strategies
            .iter()
            .find(|s| s.kind == StrategyKind::AllClasses)
            .unwrap();
        assert_eq!(all.locator, "li.item");
        assert!(!all.is_unique);
        assert_eq!(all.reliability, 0.5);
        assert!(strategies.iter().all(|s| s.kind != StrategyKind::ComboClass));
    }

    #[test]
    fn test_escaped_utility_locators_verify() {
        let doc = HtmlDocument::parse("<div class=\"md:flex\">a</div><div>b</div>");
        let strategies = strategies_for(&doc, first_in_body(&doc));
        let class = strategies.iter().find(|s| s.kind == StrategyKind::Class).unwrap();
        assert_eq!(class.locator, "div.md\\:flex");
        assert!(class.is_unique);
    }

    #[test]
    fn test_rank_strategies() {
        let mut strategies = vec![
            SelectorStrategy::new("a", StrategyKind::Class, 0.9, "", false),
            SelectorStrategy::new("b", StrategyKind::UniquePath, 0.7, "", true),
            SelectorStrategy::new("c", StrategyKind::Id, 1.0, "", true),
            SelectorStrategy::new("d", StrategyKind::UniqueAttribute, 1.0, "", true),
        ];
        rank_strategies(&mut strategies);
        let order: Vec<_> = strategies.iter().map(|s| s.locator.as_str()).collect();
        assert_eq!(order, vec!["c", "d", "b", "a"]);
        assert_eq!(primary_locator(&strategies), "c");
    }

    #[test]
    fn test_unique_locator_falls_back_to_path() {
        let strategies = vec![
            SelectorStrategy::new("a", StrategyKind::Class, 0.9, "", false),
            SelectorStrategy::new("html > body", StrategyKind::UniquePath, 0.7, "", false),
        ];
        assert_eq!(unique_locator(&strategies), "html > body");
    }

    #[test]
    fn test_is_utility_class() {
        assert!(is_utility_class("w-full"));
        assert!(is_utility_class("mt-4"));
        assert!(is_utility_class("md:flex"));
        assert!(is_utility_class("text-lg"));
        assert!(is_utility_class("flex"));
        assert!(is_utility_class("px"));
        assert!(!is_utility_class("hero-title"));
        assert!(!is_utility_class("navbar"));
        assert!(!is_utility_class("card"));
    }

    #[test]
    fn test_rank_classes() {
        let ranked = rank_classes(&["w-full", "btn", "primary-action", "mt-2"]);
        assert_eq!(ranked, vec!["primary-action", "btn", "w-full", "mt-2"]);
    }
}

use crate::dom::element::ElementType;

/// Page landmarks
const STRUCTURE_TAGS: &[&str] = &["header", "nav", "main", "footer", "aside", "section", "article"];

/// Block and grouping tags
const CONTAINER_TAGS: &[&str] = &[
    "div",
    "ul",
    "ol",
    "dl",
    "table",
    "thead",
    "tbody",
    "tfoot",
    "tr",
    "fieldset",
    "figure",
    "details",
    "blockquote",
];

const INTERACTIVE_TAGS: &[&str] = &[
    "a", "button", "input", "select", "textarea", "label", "form", "option", "summary",
];

const MEDIA_TAGS: &[&str] = &[
    "img", "video", "audio", "picture", "svg", "canvas", "iframe", "source", "embed", "object",
];

/// Tags flagged `is_container`: grouping tags, landmarks and forms
const CONTAINER_FLAG_TAGS: &[&str] = &[
    "div",
    "section",
    "article",
    "header",
    "footer",
    "main",
    "nav",
    "aside",
    "ul",
    "ol",
    "dl",
    "table",
    "form",
    "fieldset",
    "figure",
    "details",
    "blockquote",
];

fn contains(set: &[&str], tag: &str) -> bool {
    set.iter().any(|&t| t.eq_ignore_ascii_case(tag))
}

/// Coarse semantic category of a tag
pub fn classify(tag: &str) -> ElementType {
    if contains(STRUCTURE_TAGS, tag) {
        ElementType::Structure
    } else if contains(CONTAINER_TAGS, tag) {
        ElementType::Container
    } else if contains(INTERACTIVE_TAGS, tag) {
        ElementType::Interactive
    } else if contains(MEDIA_TAGS, tag) {
        ElementType::Media
    } else {
        ElementType::Content
    }
}

/// Container flag, computed independently of [`classify`]
pub fn is_container(tag: &str) -> bool {
    contains(CONTAINER_FLAG_TAGS, tag)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("header", ElementType::Structure)]
    #[case("nav", ElementType::Structure)]
    #[case("section", ElementType::Structure)]
    #[case("div", ElementType::Container)]
    #[case("ul", ElementType::Container)]
    #[case("a", ElementType::Interactive)]
    #[case("button", ElementType::Interactive)]
    #[case("form", ElementType::Interactive)]
    #[case("img", ElementType::Media)]
    #[case("video", ElementType::Media)]
    #[case("p", ElementType::Content)]
    #[case("span", ElementType::Content)]
    #[case("DIV", ElementType::Container)]
    fn test_classify(#[case] tag: &str, #[case] expected: ElementType) {
        assert_eq!(classify(tag), expected);
    }

    #[rstest]
    #[case("div", true)]
    #[case("main", true)]
    #[case("form", true)]
    #[case("tr", false)]
    #[case("p", false)]
    #[case("button", false)]
    fn test_is_container(#[case] tag: &str, #[case] expected: bool) {
        assert_eq!(is_container(tag), expected);
    }

    #[test]
    fn test_flags_are_independent() {
        // interactive by category, still a container
        assert_eq!(classify("form"), ElementType::Interactive);
        assert!(is_container("form"));

        // container by category, not flagged
        assert_eq!(classify("tbody"), ElementType::Container);
        assert!(!is_container("tbody"));
    }
}

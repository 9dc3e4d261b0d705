use crate::error::{ForgeError, Result};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Options controlling hierarchy and text-element extraction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractOptions {
    /// Aggregate text must be longer than this for `has_content`
    pub content_threshold: usize,

    /// Deepest depth kept; deeper subtrees are truncated
    pub max_depth: usize,

    /// Tags kept even when empty
    pub keep_tags: Vec<String>,

    /// Attributes copied onto extracted elements
    pub attribute_allowlist: Vec<String>,

    /// Text-element bounds (trimmed character count, inclusive)
    pub min_text_length: usize,
    pub max_text_length: usize,

    /// Tags never reported as text elements
    pub skip_text_tags: Vec<String>,
}

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self {
            content_threshold: 3,
            max_depth: 256,
            keep_tags: strings(&["header", "nav", "main", "footer", "aside", "section", "article"]),
            attribute_allowlist: strings(&["id", "class", "href", "src", "alt", "title", "role"]),
            min_text_length: 1,
            max_text_length: 500,
            skip_text_tags: strings(&["script", "style", "noscript"]),
        }
    }
}

impl ExtractOptions {
    /// Create options with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method: set the content threshold
    pub fn content_threshold(mut self, threshold: usize) -> Self {
        self.content_threshold = threshold;
        self
    }

    /// Builder method: set the depth cap
    pub fn max_depth(mut self, depth: usize) -> Self {
        self.max_depth = depth;
        self
    }

    /// Builder method: set the always-keep tags
    pub fn keep_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.keep_tags = tags.into_iter().map(Into::into).collect();
        self
    }

    /// Builder method: set the text-element length bounds
    pub fn text_length(mut self, min: usize, max: usize) -> Self {
        self.min_text_length = min;
        self.max_text_length = max;
        self
    }

    pub fn is_kept(&self, tag: &str) -> bool {
        self.keep_tags.iter().any(|t| t.eq_ignore_ascii_case(tag))
    }

    /// Allow-listed subset of `attributes`, in allow-list order; `None` when empty
    pub fn select_attributes(
        &self,
        attributes: &IndexMap<String, String>,
    ) -> Option<IndexMap<String, String>> {
        let selected: IndexMap<String, String> = self
            .attribute_allowlist
            .iter()
            .filter_map(|name| attributes.get(name).map(|value| (name.clone(), value.clone())))
            .collect();
        (!selected.is_empty()).then_some(selected)
    }

    pub fn skips_text(&self, tag: &str) -> bool {
        self.skip_text_tags.iter().any(|t| t.eq_ignore_ascii_case(tag))
    }

    /// Reject inconsistent settings
    pub fn validate(&self) -> Result<()> {
        if self.max_depth == 0 {
            return Err(ForgeError::InvalidOptions("max_depth must be at least 1".to_string()));
        }
        if self.min_text_length > self.max_text_length {
            return Err(ForgeError::InvalidOptions(format!(
                "min_text_length ({}) exceeds max_text_length ({})",
                self.min_text_length, self.max_text_length
            )));
        }
        Ok(())
    }

    /// Parse and validate options from JSON; missing fields take defaults
    pub fn from_json_str(json: &str) -> Result<Self> {
        let options: Self = serde_json::from_str(json)?;
        options.validate()?;
        Ok(options)
    }

    /// Load options from a JSON file
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        Self::from_json_str(&std::fs::read_to_string(path)?)
    }
}

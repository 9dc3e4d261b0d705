use crate::document::adapter::DocumentAdapter;
use std::collections::HashMap;

/// Per-request memo of locator match counts.
///
/// Every candidate locator is verified against the whole document; the same
/// strings recur across siblings (shared classes, shared positions), so the
/// cache is threaded explicitly through strategy generation.
pub struct MatchCache<'a, D: DocumentAdapter + ?Sized> {
    document: &'a D,
    counts: HashMap<String, usize>,
    hits: usize,
    misses: usize,
}

impl<'a, D: DocumentAdapter + ?Sized> MatchCache<'a, D> {
    pub fn new(document: &'a D) -> Self {
        Self {
            document,
            counts: HashMap::new(),
            hits: 0,
            misses: 0,
        }
    }

    /// Match count for `locator`, querying the document on first use
    pub fn count(&mut self, locator: &str) -> usize {
        if let Some(&count) = self.counts.get(locator) {
            self.hits += 1;
            return count;
        }

        let count = self.document.count_matches(locator);
        self.misses += 1;
        self.counts.insert(locator.to_string(), count);
        count
    }

    pub fn document(&self) -> &'a D {
        self.document
    }

    pub fn hits(&self) -> usize {
        self.hits
    }

    pub fn misses(&self) -> usize {
        self.misses
    }

    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }
}

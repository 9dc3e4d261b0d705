//! Parsed-document collaborator
//!
//! Extraction reads documents only through the [`DocumentAdapter`] trait:
//! - DocumentAdapter / RawNode: navigable arena plus whole-document match counts
//! - HtmlDocument: the `scraper`-backed implementation with token stamping
//! - MatchCache: per-request memo of locator match counts

pub mod adapter;
pub mod cache;
pub mod html;

pub use adapter::{DocumentAdapter, NodeId, NodeKind, RawNode};
pub use cache::MatchCache;
pub use html::{DEFAULT_TOKEN_ATTRIBUTE, HtmlDocument};

use crate::error::Result;
use std::path::Path;

/// Read and parse an HTML file
pub fn load_document(path: impl AsRef<Path>) -> Result<HtmlDocument> {
    let markup = std::fs::read_to_string(path)?;
    Ok(HtmlDocument::parse(&markup))
}

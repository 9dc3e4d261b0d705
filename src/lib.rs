//! # locator-forge
//!
//! A Rust library for turning parsed HTML documents into annotated element
//! hierarchies, where every retained element carries ranked CSS locators
//! whose match counts have been verified against the whole document.
//!
//! ## Features
//!
//! - **Locator Synthesis**: id, class, class-combination, positional and path locators,
//!   scored by uniqueness
//! - **Guaranteed Unique Locator**: each element is stamped with a token attribute that
//!   always matches once
//! - **Hierarchy Extraction**: iterative descent that prunes wrappers without meaningful content
//! - **Text Elements**: a lighter flat list of text-bearing elements
//! - **Tool System**: JSON-driven operations, also exposed through the `locator-forge` CLI
//!
//! ## Command Line
//!
//! ```bash
//! # Annotated hierarchy of a saved page
//! cargo run -- hierarchy page.html --pretty
//!
//! # How many elements does a locator match?
//! cargo run -- count page.html "nav a.link"
//! ```
//!
//! ## Library Usage
//!
//! ### Extracting a Hierarchy
//!
//! ```rust,no_run
//! use locator_forge::{ExtractOptions, HtmlDocument, extract_hierarchy};
//!
//! let doc = HtmlDocument::parse(r#"<div id="x"><p>Hello</p></div>"#);
//! let extraction = extract_hierarchy(&doc, &ExtractOptions::default());
//!
//! for element in extraction.flat() {
//!     println!("{} -> {}", element.tag, element.selector);
//! }
//! println!("{} elements", extraction.stats.total_elements);
//! ```
//!
//! ### Using the Tool System
//!
//! ```rust,no_run
//! use locator_forge::{ExtractOptions, HtmlDocument};
//! use locator_forge::tools::{ToolContext, ToolRegistry};
//! use serde_json::json;
//!
//! # fn main() -> locator_forge::Result<()> {
//! let doc = HtmlDocument::parse("<span class=\"tag\">A</span><span class=\"tag\">B</span>");
//! let options = ExtractOptions::default();
//! let registry = ToolRegistry::with_defaults();
//! let mut context = ToolContext::new(&doc, &options);
//!
//! let result = registry.execute("count_matches", json!({"locator": "span.tag"}), &mut context)?;
//! println!("{:?}", result.data);
//! # Ok(())
//! # }
//! ```
//!
//! ## Module Overview
//!
//! - [`document`]: the parsed-document collaborator and its `scraper` implementation
//! - [`dom`]: locator strategies, hierarchy building, flattening and statistics
//! - [`tools`]: named operations with JSON parameters
//! - [`error`]: Error types and result aliases

pub mod document;
pub mod dom;
pub mod error;
pub mod tools;

pub use document::{DocumentAdapter, HtmlDocument, MatchCache, NodeId, load_document};
pub use dom::{
    ElementType, ExtractOptions, Extraction, HierarchicalElement, Position, SelectorStrategy,
    StrategyKind, TextElement, TreeStats, extract_hierarchy, extract_text_elements,
};
pub use error::{ForgeError, Result};
pub use tools::{Tool, ToolContext, ToolRegistry, ToolResult};

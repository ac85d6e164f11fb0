//! # markdown-endpoint
//!
//! Convert rendered HTML and its content metadata into a Markdown document:
//! a frontmatter block, a blank line, then the converted body.
//!
//! ## Design
//!
//! Conversion is a fixed pipeline of named text stages rather than a DOM walk:
//!
//! - **Normalize**: strip structural comment markers, decode entities
//! - **Block rules**: headings, code, quotes, lists, paragraphs, rules,
//!   breaks, figures
//! - **Inline rules**: images, links, emphasis, code, strikethrough
//! - **Strip**: drop every remaining tag
//! - **Whitespace**: collapse blank runs and trim
//!
//! Every stage is total: malformed markup degrades, it never fails.
//!
//! ## Example
//!
//! ```rust
//! use chrono::NaiveDate;
//! use markdown_endpoint::{convert, ContentMetadata};
//!
//! let meta = ContentMetadata::new(
//!     "Hello World",
//!     NaiveDate::from_ymd_opt(2024, 3, 9).unwrap(),
//!     "Jane Doe",
//!     "https://example.com/hello-world/",
//! );
//!
//! let doc = convert("<h1>Hello World</h1><p>It <em>works</em>.</p>", &meta);
//! assert_eq!(doc.body(), "# Hello World\n\nIt *works*.");
//! assert!(doc.to_string().starts_with("---\ntitle: Hello World\n"));
//! ```
//!
//! ## Example (custom rule)
//!
//! ```rust
//! use markdown_endpoint::{MarkdownConverter, Rule};
//!
//! let mut converter = MarkdownConverter::new();
//! converter.add_rule("mark", Rule::for_tag("mark", |el, _| format!("=={}==", el.body)));
//! assert_eq!(converter.convert_body("<p><mark>hot</mark></p>"), "==hot==");
//! ```

#[cfg(feature = "html")]
pub mod html;
pub mod normalize;
mod protect;
mod rules;
mod service;
mod utilities;

#[cfg(feature = "html")]
pub use html::convert_nested_lists;
pub use markdown_endpoint_core::{
    ContentMetadata, ConvertOptions, Frontmatter, FrontmatterValue, ListMode, MarkdownDocument,
};
pub use rules::{Context, Element, Filter, ReplacementFn, Rule, Rules, TransformFn};
pub use service::{convert, MarkdownConverter};
pub use utilities::*;

/// Error type for markdown-endpoint operations
#[derive(Debug, thiserror::Error)]
pub enum ConvertError {
    #[error("Invalid rule pattern: {0}")]
    InvalidPattern(#[from] regex::Error),
}

pub type Result<T> = std::result::Result<T, ConvertError>;

//! markdown-endpoint-core - metadata, frontmatter and document assembly
//!
//! This crate holds the parts of the Markdown export that know nothing about
//! HTML: the content metadata model, the frontmatter serializer, conversion
//! options, the final whitespace pass and the document assembler. It is used
//! by `markdown-endpoint` (the HTML conversion engine) and
//! `markdown-endpoint-http` (request negotiation).
//!
//! # Architecture
//!
//! ```text
//! ContentMetadata ──▶ Frontmatter ──┐
//!                                   ├──▶ MarkdownDocument
//! converted body ──▶ whitespace ────┘
//! ```
//!
//! # Example
//!
//! ```rust
//! use chrono::NaiveDate;
//! use markdown_endpoint_core::{ContentMetadata, Frontmatter, MarkdownDocument};
//!
//! let meta = ContentMetadata::new(
//!     "Hello World",
//!     NaiveDate::from_ymd_opt(2024, 3, 9).unwrap(),
//!     "Jane Doe",
//!     "https://example.com/hello",
//! )
//! .with_tags(["rust", "markdown"]);
//!
//! let doc = MarkdownDocument::new(Frontmatter::from(&meta), "Body".to_string());
//! assert!(doc.to_string().contains("tags: [\"rust\", \"markdown\"]"));
//! ```

mod document;
mod frontmatter;
mod metadata;
mod options;
mod whitespace;

pub use document::MarkdownDocument;
pub use frontmatter::{
    needs_quoting, quote, Frontmatter, FrontmatterValue, DELIMITER, METADATA_KEYS,
};
pub use metadata::ContentMetadata;
pub use options::{ConvertOptions, ListMode};
pub use whitespace::collapse_and_trim;

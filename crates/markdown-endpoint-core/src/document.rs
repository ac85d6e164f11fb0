//! Final document assembly

use std::fmt;

use crate::frontmatter::Frontmatter;

/// Frontmatter block, one blank line, then the Markdown body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkdownDocument {
    frontmatter: Frontmatter,
    body: String,
}

impl MarkdownDocument {
    /// Assemble a document. The body is expected to be normalized already.
    pub fn new(frontmatter: Frontmatter, body: String) -> Self {
        Self { frontmatter, body }
    }

    pub fn frontmatter(&self) -> &Frontmatter {
        &self.frontmatter
    }

    pub fn body(&self) -> &str {
        &self.body
    }

    /// Full document text
    pub fn to_markdown(&self) -> String {
        let frontmatter = self.frontmatter.render();
        let mut out = String::with_capacity(frontmatter.len() + 1 + self.body.len());
        out.push_str(&frontmatter);
        out.push('\n');
        out.push_str(&self.body);
        out
    }
}

impl fmt::Display for MarkdownDocument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_markdown())
    }
}

impl From<MarkdownDocument> for String {
    fn from(doc: MarkdownDocument) -> Self {
        doc.to_markdown()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_line_between_parts() {
        let mut fm = Frontmatter::new();
        fm.insert("title", "Doc");
        let doc = MarkdownDocument::new(fm, "Body text".to_string());
        assert_eq!(doc.to_string(), "---\ntitle: Doc\n---\n\nBody text");
    }

    #[test]
    fn test_empty_body() {
        let doc = MarkdownDocument::new(Frontmatter::new(), String::new());
        assert_eq!(doc.to_markdown(), "---\n---\n\n");
    }
}

//! MarkdownConverter - the main entry point for HTML to Markdown conversion.

use once_cell::sync::Lazy;
use tracing::debug;

use markdown_endpoint_core::{
    collapse_and_trim, ContentMetadata, ConvertOptions, Frontmatter, MarkdownDocument,
};

use crate::normalize::normalize;
use crate::protect::ProtectedSegments;
use crate::rules::{Context, Rule, Rules};
use crate::utilities::strip_tags;

static DEFAULT_CONVERTER: Lazy<MarkdownConverter> = Lazy::new(MarkdownConverter::new);

/// Convert markup and metadata with the default options.
///
/// Never fails: malformed markup degrades to best-effort output.
pub fn convert(html: &str, metadata: &ContentMetadata) -> MarkdownDocument {
    DEFAULT_CONVERTER.convert(html, metadata)
}

/// The main service for converting HTML to Markdown
pub struct MarkdownConverter {
    options: ConvertOptions,
    rules: Rules,
}

impl MarkdownConverter {
    /// Create a new MarkdownConverter with default options
    pub fn new() -> Self {
        Self {
            options: ConvertOptions::default(),
            rules: Rules::new(),
        }
    }

    /// Create a MarkdownConverter with custom options
    pub fn with_options(options: ConvertOptions) -> Self {
        Self {
            options,
            rules: Rules::new(),
        }
    }

    /// Add a custom rule, applied before the built-in rules
    pub fn add_rule(&mut self, key: &str, rule: Rule) -> &mut Self {
        self.rules.add(key, rule);
        self
    }

    /// Remove a custom or built-in rule by key
    pub fn remove_rule(&mut self, key: &str) -> Option<Rule> {
        self.rules.remove(key)
    }

    /// Apply a plugin
    pub fn use_plugin<F>(&mut self, plugin: F) -> &mut Self
    where
        F: FnOnce(&mut Self),
    {
        plugin(self);
        self
    }

    /// Get the current options
    pub fn options(&self) -> &ConvertOptions {
        &self.options
    }

    /// Get mutable access to options
    pub fn options_mut(&mut self) -> &mut ConvertOptions {
        &mut self.options
    }

    /// Get the rule set
    pub fn rules(&self) -> &Rules {
        &self.rules
    }

    /// Convert markup and metadata into a complete document
    pub fn convert(&self, html: &str, metadata: &ContentMetadata) -> MarkdownDocument {
        let frontmatter = Frontmatter::from(metadata);
        let body = self.convert_body(html);
        MarkdownDocument::new(frontmatter, body)
    }

    /// Convert markup into a Markdown body without frontmatter
    pub fn convert_body(&self, html: &str) -> String {
        #[cfg(not(feature = "html"))]
        if self.options.list_mode == markdown_endpoint_core::ListMode::Nested {
            debug!("nested list mode needs the `html` feature, lists are flattened");
        }

        let mut segments = ProtectedSegments::new();
        let normalized = normalize(html);
        let converted = {
            let mut ctx = Context::new(&self.options, &mut segments);
            self.rules.apply(&normalized, &mut ctx)
        };

        // Anything still shaped like a tag is dropped before code comes back
        let stripped = strip_tags(&converted);
        let restored = segments.restore(&stripped);
        let body = collapse_and_trim(&restored);

        debug!(
            input_len = html.len(),
            output_len = body.len(),
            protected = segments.len(),
            "converted html to markdown"
        );
        body
    }
}

impl Default for MarkdownConverter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn body(html: &str) -> String {
        MarkdownConverter::new().convert_body(html)
    }

    fn metadata() -> ContentMetadata {
        ContentMetadata::new(
            "Hello",
            NaiveDate::from_ymd_opt(2024, 5, 1).unwrap(),
            "Jane",
            "https://example.com/hello/",
        )
    }

    #[test]
    fn test_plain_text_unchanged() {
        assert_eq!(body("  Just some text.\nSecond line.  "), "Just some text.\nSecond line.");
    }

    #[test]
    fn test_heading() {
        let service = MarkdownConverter::new();
        let rules_output = {
            let mut segments = ProtectedSegments::new();
            let mut ctx = Context::new(service.options(), &mut segments);
            service.rules().apply("<h2>Title</h2>", &mut ctx)
        };
        assert!(rules_output.contains("\n## Title\n"));
        assert_eq!(body("<h2>Title</h2>"), "## Title");
    }

    #[test]
    fn test_lists() {
        assert_eq!(body("<p>x</p><ul><li>A</li><li>B</li></ul><p>y</p>"), "x\n\n- A\n- B\n\ny");
        assert_eq!(body("<ol><li>X</li><li>Y</li></ol>"), "1. X\n2. Y");
    }

    #[test]
    fn test_code_block_entities() {
        assert_eq!(body("<pre><code>a &lt; b</code></pre>"), "```\na < b\n```");
    }

    #[test]
    fn test_code_block_keeps_literal_markup() {
        let html = "<pre><code>&lt;div class=\"x\"&gt;\n  &lt;b&gt;hi&lt;/b&gt;\n&lt;/div&gt;</code></pre>";
        assert_eq!(body(html), "```\n<div class=\"x\">\n  <b>hi</b>\n</div>\n```");
    }

    #[test]
    fn test_code_block_in_blockquote() {
        let html = "<blockquote><pre><code>one\ntwo</code></pre></blockquote>";
        assert_eq!(body(html), "> ```\n> one\n> two\n> ```");
    }

    #[test]
    fn test_inline_formatting() {
        let html = r#"<p>A <strong>bold</strong>, <em>light</em>, <code>x</code> and <a href="/y">link</a> <del>old</del>.</p>"#;
        assert_eq!(body(html), "A **bold**, *light*, `x` and [link](/y) ~~old~~.");
    }

    #[test]
    fn test_figure() {
        let html = r#"<figure><img src="x.png" alt="A"><figcaption>Cap</figcaption></figure>"#;
        assert_eq!(body(html), "![A](x.png)\n*Cap*");
    }

    #[test]
    fn test_figure_without_image() {
        assert_eq!(body("<figure><p>no image here</p></figure>"), "");
    }

    #[test]
    fn test_unknown_tags_removed() {
        assert_eq!(body("<div><span class=\"x\">Hi</span> <custom-el>there</custom-el></div>"), "Hi there");
    }

    #[test]
    fn test_bare_less_than_survives() {
        assert_eq!(body("<p>1 &lt; 2</p>"), "1 < 2");
    }

    #[test]
    fn test_line_break() {
        assert_eq!(body("<p>a<br>b</p>"), "a  \nb");
    }

    #[test]
    fn test_horizontal_rule() {
        assert_eq!(body("<p>a</p><hr><p>b</p>"), "a\n\n---\n\nb");
    }

    #[test]
    fn test_custom_rule() {
        let mut service = MarkdownConverter::new();
        service.add_rule(
            "mark",
            Rule::for_tag("mark", |el, _| format!("=={}==", el.body)),
        );
        assert_eq!(service.convert_body("<p><mark>hot</mark></p>"), "==hot==");
    }

    #[test]
    fn test_options() {
        let options = ConvertOptions {
            bullet_list_marker: '*',
            strong_delimiter: "__".to_string(),
            fence: "~~~".to_string(),
            ..Default::default()
        };
        let service = MarkdownConverter::with_options(options);
        assert_eq!(service.convert_body("<ul><li><b>A</b></li></ul>"), "* A");
        assert_eq!(service.convert_body("<p><b>A</b></p>"), "__A__");
        assert_eq!(service.convert_body("<pre>x</pre>"), "~~~\nx\n~~~");
    }

    #[cfg(feature = "html")]
    #[test]
    fn test_nested_list_mode() {
        let mut service = MarkdownConverter::new();
        let html = "<ul><li>A<ul><li>B</li></ul></li><li>C</li></ul>";
        // Flat mode stops at the first closing tag, the tail survives as text
        assert_eq!(service.convert_body(html), "- AB\nC");

        service.options_mut().list_mode = markdown_endpoint_core::ListMode::Nested;
        assert_eq!(service.convert_body(html), "- A\n  - B\n- C");
    }

    #[test]
    fn test_highlighted_code_has_no_markup() {
        let html = r#"<pre class="wp-block-code"><code><span class="k">fn</span> main() {}</code></pre>"#;
        let out = body(html);
        assert_eq!(out, "```\nfn main() {}\n```");
        assert_eq!(strip_tags(&out), out);
    }

    #[test]
    fn test_stray_less_than_before_blockquote() {
        let html = "<p>if x&lt;y then</p><blockquote>quoted</blockquote>";
        assert_eq!(body(html), "if x<y then\n\n> quoted");
    }

    #[cfg(feature = "html")]
    #[test]
    fn test_nested_mode_keeps_entity_text() {
        let html = "<ul><li>show &amp;lt;b&amp;gt; literally</li><li>Fish &amp; Chips</li></ul>";
        let flat = body(html);
        let mut service = MarkdownConverter::new();
        service.options_mut().list_mode = markdown_endpoint_core::ListMode::Nested;
        assert_eq!(flat, "- show &lt;b&gt; literally\n- Fish & Chips");
        assert_eq!(service.convert_body(html), flat);
    }

    #[test]
    fn test_convert_document() {
        let doc = convert("<p>Body</p>", &metadata().with_tags(["a", "b"]));
        assert_eq!(
            doc.to_string(),
            "---\ntitle: Hello\npublished_at: 2024-05-01\nauthor_name: Jane\ncanonical_url: \"https://example.com/hello/\"\ntags: [\"a\", \"b\"]\n---\n\nBody"
        );
    }
}

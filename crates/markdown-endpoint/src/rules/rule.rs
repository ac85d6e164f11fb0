//! Rule and Filter types for HTML conversion.

use regex::{Captures, Regex};

use markdown_endpoint_core::ConvertOptions;

use crate::protect::ProtectedSegments;
use crate::utilities::find_attribute;
use crate::{ConvertError, Result};

/// Type alias for replacement functions
pub type ReplacementFn = Box<dyn Fn(&Element<'_>, &mut Context<'_>) -> String + Send + Sync>;

/// Type alias for whole-buffer transforms
pub type TransformFn = Box<dyn Fn(&str, &mut Context<'_>) -> String + Send + Sync>;

/// A matched piece of markup handed to a replacement function
#[derive(Debug, Clone, Copy)]
pub struct Element<'a> {
    /// Lowercase tag name the filter was built for; empty for pattern filters
    pub tag: &'a str,
    /// Raw attribute text of the opening tag
    pub attrs: &'a str,
    /// Text between the opening and closing tag; empty for void elements
    pub body: &'a str,
    /// The complete matched text
    pub raw: &'a str,
}

impl<'a> Element<'a> {
    /// Look up an attribute value on the opening tag
    pub fn attr(&self, name: &str) -> Option<&'a str> {
        find_attribute(self.attrs, name)
    }
}

/// Per-invocation state shared by all rules of one conversion
pub struct Context<'a> {
    options: &'a ConvertOptions,
    segments: &'a mut ProtectedSegments,
}

impl<'a> Context<'a> {
    pub(crate) fn new(options: &'a ConvertOptions, segments: &'a mut ProtectedSegments) -> Self {
        Self { options, segments }
    }

    /// Options of the running conversion
    pub fn options(&self) -> &ConvertOptions {
        self.options
    }

    /// Move `text` out of the working buffer until the final restore.
    ///
    /// Returns the placeholder to emit in its place. Later rules and the
    /// final tag strip never see the protected text.
    pub fn protect(&mut self, text: &str) -> String {
        self.segments.protect(text)
    }

    pub(crate) fn segments_mut(&mut self) -> &mut ProtectedSegments {
        self.segments
    }
}

/// A filter determines which markup a rule applies to
pub struct Filter {
    tag: String,
    pattern: Regex,
}

impl Filter {
    /// Match a paired element `<tag ...>body</tag>`, shortest body first
    pub fn element(tag: &str) -> Self {
        let tag = tag.to_lowercase();
        let pattern = format!(
            r"(?is)<{t}\b(?P<attrs>[^>]*)>(?P<body>.*?)</{t}\s*>",
            t = regex::escape(&tag)
        );
        Self::compiled(tag, &pattern)
    }

    /// Match a void element `<tag ...>` or `<tag ... />`
    pub fn void(tag: &str) -> Self {
        let tag = tag.to_lowercase();
        let pattern = format!(r"(?i)<{t}\b(?P<attrs>[^>]*)>", t = regex::escape(&tag));
        Self::compiled(tag, &pattern)
    }

    /// Match an arbitrary regex.
    ///
    /// The named groups `attrs` and `body` fill the matching [`Element`]
    /// fields; without a `body` group the first capture group (or the whole
    /// match) is used.
    pub fn pattern(pattern: &str) -> Result<Self> {
        let pattern = Regex::new(pattern).map_err(ConvertError::InvalidPattern)?;
        Ok(Self::from_regex("", pattern))
    }

    /// Wrap an already compiled regex, reporting `tag` to replacements
    pub fn from_regex(tag: &str, pattern: Regex) -> Self {
        Self {
            tag: tag.to_lowercase(),
            pattern,
        }
    }

    fn compiled(tag: String, pattern: &str) -> Self {
        // The tag is escaped, so the pattern is always valid
        let pattern = Regex::new(pattern).expect("escaped tag pattern should compile");
        Self { tag, pattern }
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }

    fn to_element<'a>(&'a self, caps: &'a Captures<'_>) -> Element<'a> {
        let raw = caps.get(0).map_or("", |m| m.as_str());
        Element {
            tag: &self.tag,
            attrs: caps.name("attrs").map_or("", |m| m.as_str()),
            body: caps
                .name("body")
                .or_else(|| caps.get(1))
                .map_or(raw, |m| m.as_str()),
            raw,
        }
    }
}

enum RuleKind {
    Replace {
        filters: Vec<Filter>,
        replacement: ReplacementFn,
    },
    Transform(TransformFn),
}

/// A rule rewrites one construct of the working buffer into Markdown
pub struct Rule {
    kind: RuleKind,
}

impl Rule {
    /// Create a new rule from a single filter
    pub fn new<F>(filter: Filter, replacement: F) -> Self
    where
        F: Fn(&Element<'_>, &mut Context<'_>) -> String + Send + Sync + 'static,
    {
        Self::with_filters(vec![filter], replacement)
    }

    /// Create a rule that tries each filter in turn over the whole buffer
    pub fn with_filters<F>(filters: Vec<Filter>, replacement: F) -> Self
    where
        F: Fn(&Element<'_>, &mut Context<'_>) -> String + Send + Sync + 'static,
    {
        Self {
            kind: RuleKind::Replace {
                filters,
                replacement: Box::new(replacement),
            },
        }
    }

    /// Create a rule that matches a single paired element
    pub fn for_tag<F>(tag: &str, replacement: F) -> Self
    where
        F: Fn(&Element<'_>, &mut Context<'_>) -> String + Send + Sync + 'static,
    {
        Self::new(Filter::element(tag), replacement)
    }

    /// Create a rule that matches multiple paired elements, one tag after another
    pub fn for_tags<F>(tags: &[&str], replacement: F) -> Self
    where
        F: Fn(&Element<'_>, &mut Context<'_>) -> String + Send + Sync + 'static,
    {
        Self::with_filters(tags.iter().map(|t| Filter::element(t)).collect(), replacement)
    }

    /// Create a rule that matches a void element
    pub fn for_void_tag<F>(tag: &str, replacement: F) -> Self
    where
        F: Fn(&Element<'_>, &mut Context<'_>) -> String + Send + Sync + 'static,
    {
        Self::new(Filter::void(tag), replacement)
    }

    /// Create a rule from a regex pattern
    pub fn for_pattern<F>(pattern: &str, replacement: F) -> Result<Self>
    where
        F: Fn(&Element<'_>, &mut Context<'_>) -> String + Send + Sync + 'static,
    {
        Ok(Self::new(Filter::pattern(pattern)?, replacement))
    }

    /// Create a rule that rewrites the whole buffer at once
    pub fn transform<F>(transform: F) -> Self
    where
        F: Fn(&str, &mut Context<'_>) -> String + Send + Sync + 'static,
    {
        Self {
            kind: RuleKind::Transform(Box::new(transform)),
        }
    }

    /// Apply this rule to the buffer
    pub fn apply(&self, input: &str, ctx: &mut Context<'_>) -> String {
        match &self.kind {
            RuleKind::Replace {
                filters,
                replacement,
            } => {
                let mut output = input.to_string();
                for filter in filters {
                    let replaced = filter
                        .pattern
                        .replace_all(&output, |caps: &Captures<'_>| {
                            replacement(&filter.to_element(caps), &mut *ctx)
                        })
                        .into_owned();
                    output = replaced;
                }
                output
            }
            RuleKind::Transform(transform) => transform(input, ctx),
        }
    }
}

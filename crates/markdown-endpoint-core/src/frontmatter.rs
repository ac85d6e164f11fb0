//! Frontmatter serialization
//!
//! Renders a [`ContentMetadata`] snapshot as a YAML-like block delimited by
//! `---` lines. Keys keep a fixed order; list values are flow sequences of
//! double-quoted scalars; plain scalars are quoted only when they contain a
//! character YAML would otherwise interpret.

use std::fmt;

use chrono::NaiveDate;
use indexmap::IndexMap;

use crate::metadata::ContentMetadata;

/// Delimiter line above and below the block
pub const DELIMITER: &str = "---";

/// Keys emitted for [`ContentMetadata`], in output order
pub const METADATA_KEYS: [&str; 7] = [
    "title",
    "published_at",
    "author_name",
    "canonical_url",
    "tags",
    "categories",
    "excerpt",
];

/// Characters that force a scalar to be double-quoted
const SPECIAL_CHARS: &[char] = &[
    ':', '-', '[', ']', '{', '}', '#', '&', '*', '!', '|', '>', '\'', '"', '%', '@', '`',
];

/// A single frontmatter value
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FrontmatterValue {
    /// String scalar, quoted only when needed
    Text(String),
    /// Date scalar, always bare as `YYYY-MM-DD`
    Date(NaiveDate),
    /// Flow sequence of always-quoted strings
    List(Vec<String>),
}

impl From<&str> for FrontmatterValue {
    fn from(value: &str) -> Self {
        FrontmatterValue::Text(value.to_string())
    }
}

impl From<String> for FrontmatterValue {
    fn from(value: String) -> Self {
        FrontmatterValue::Text(value)
    }
}

impl From<NaiveDate> for FrontmatterValue {
    fn from(value: NaiveDate) -> Self {
        FrontmatterValue::Date(value)
    }
}

impl From<Vec<String>> for FrontmatterValue {
    fn from(value: Vec<String>) -> Self {
        FrontmatterValue::List(value)
    }
}

/// Ordered key/value record rendered above the Markdown body
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Frontmatter {
    entries: IndexMap<String, FrontmatterValue>,
}

impl Frontmatter {
    /// Create an empty frontmatter block
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a key. An existing key keeps its position and takes the new value.
    pub fn insert(&mut self, key: &str, value: impl Into<FrontmatterValue>) -> &mut Self {
        self.entries.insert(key.to_string(), value.into());
        self
    }

    pub fn get(&self, key: &str) -> Option<&FrontmatterValue> {
        self.entries.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Render the block, delimiters included, ending with a newline
    pub fn render(&self) -> String {
        let mut out = String::with_capacity(64 * (self.entries.len() + 1));
        out.push_str(DELIMITER);
        out.push('\n');
        for (key, value) in &self.entries {
            out.push_str(key);
            out.push(':');
            out.push(' ');
            render_value(value, &mut out);
            out.push('\n');
        }
        out.push_str(DELIMITER);
        out.push('\n');
        out
    }
}

impl From<&ContentMetadata> for Frontmatter {
    fn from(meta: &ContentMetadata) -> Self {
        let mut fm = Frontmatter::new();
        fm.insert("title", meta.title.as_str())
            .insert("published_at", meta.published_at)
            .insert("author_name", meta.author_name.as_str())
            .insert("canonical_url", meta.canonical_url.as_str());

        // Empty optionals are omitted rather than rendered as `[]` or `""`
        if let Some(tags) = meta.tags.as_ref().filter(|t| !t.is_empty()) {
            fm.insert("tags", tags.clone());
        }
        if let Some(categories) = meta.categories.as_ref().filter(|c| !c.is_empty()) {
            fm.insert("categories", categories.clone());
        }
        if let Some(excerpt) = meta.excerpt.as_deref().filter(|e| !e.is_empty()) {
            fm.insert("excerpt", excerpt);
        }
        fm
    }
}

impl fmt::Display for Frontmatter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

fn render_value(value: &FrontmatterValue, out: &mut String) {
    match value {
        FrontmatterValue::Text(text) => {
            if needs_quoting(text) {
                push_quoted(text, out);
            } else {
                out.push_str(text);
            }
        }
        FrontmatterValue::Date(date) => {
            out.push_str(&date.format("%Y-%m-%d").to_string());
        }
        FrontmatterValue::List(items) => {
            out.push('[');
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    out.push_str(", ");
                }
                push_quoted(item, out);
            }
            out.push(']');
        }
    }
}

/// Whether a scalar must be double-quoted
pub fn needs_quoting(value: &str) -> bool {
    value
        .chars()
        .any(|c| SPECIAL_CHARS.contains(&c) || matches!(c, '\n' | '\r' | '\t'))
}

/// Double-quote a scalar, escaping backslashes, quotes and line control characters
pub fn quote(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    push_quoted(value, &mut out);
    out
}

fn push_quoted(value: &str, out: &mut String) {
    out.push('"');
    for c in value.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            _ => out.push(c),
        }
    }
    out.push('"');
}

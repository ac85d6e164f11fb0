//! Utility functions for text-level HTML processing.

use std::borrow::Cow;

use once_cell::sync::Lazy;
use regex::Regex;

/// Comments and anything shaped like an opening, closing or declaration tag.
///
/// A tag may wrap onto a new line but never spans a blank line or a line
/// starting with `>`, so emitted blockquote prefixes never close a stray `<`.
static TAG_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?s)<!--.*?-->|</?[A-Za-z](?:[^>\n]|\n[^>\n])*>|<[!?](?:[^>\n]|\n[^>\n])*>")
        .expect("TAG_RE should compile")
});

static ATTR_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r#"(?:^|\s)(?P<name>[A-Za-z_:][-A-Za-z0-9_:.]*)\s*=\s*(?:"(?P<dq>[^"]*)"|'(?P<sq>[^']*)'|(?P<uq>[^\s"'=<>`]+))"#,
    )
    .expect("ATTR_RE should compile")
});

static IMG_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)<img\b(?P<attrs>[^>]*)>").expect("IMG_RE should compile"));

static LI_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?is)<li\b[^>]*>(?P<body>.*?)</li\s*>").expect("LI_RE should compile")
});

static FIGCAPTION_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?is)<figcaption\b[^>]*>(?P<body>.*?)</figcaption\s*>")
        .expect("FIGCAPTION_RE should compile")
});

/// Remove every tag and comment, keeping text content
pub fn strip_tags(html: &str) -> String {
    let mut text = TAG_RE.replace_all(html, "").into_owned();
    // Removing one tag can join the halves of another, e.g. `<<b>p>`
    loop {
        let next = match TAG_RE.replace_all(&text, "") {
            Cow::Borrowed(_) => break,
            Cow::Owned(stripped) => stripped,
        };
        text = next;
    }
    text
}

/// Decode HTML named and numeric character references.
///
/// Sequences that are not valid references are kept as they are.
pub fn decode_entities(text: &str) -> Cow<'_, str> {
    html_escape::decode_html_entities(text)
}

/// Collapse runs of whitespace to single spaces
pub fn collapse_whitespace(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    let mut prev_was_whitespace = false;

    for c in s.chars() {
        if c.is_whitespace() {
            if !prev_was_whitespace {
                result.push(' ');
                prev_was_whitespace = true;
            }
        } else {
            result.push(c);
            prev_was_whitespace = false;
        }
    }

    result
}

/// Find an attribute value in the raw attribute text of a tag.
///
/// Names compare case-insensitively; double-quoted, single-quoted and
/// unquoted values are accepted.
pub fn find_attribute<'a>(attrs: &'a str, name: &str) -> Option<&'a str> {
    ATTR_RE.captures_iter(attrs).find_map(|caps| {
        if !caps["name"].eq_ignore_ascii_case(name) {
            return None;
        }
        caps.name("dq")
            .or_else(|| caps.name("sq"))
            .or_else(|| caps.name("uq"))
            .map(|m| m.as_str())
    })
}

/// An `<img>` reference found in markup
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageRef {
    pub src: String,
    pub alt: Option<String>,
}

impl ImageRef {
    /// Build from the attribute text of an `<img>` tag; `None` without a non-empty `src`
    pub fn from_attrs(attrs: &str) -> Option<Self> {
        let src = find_attribute(attrs, "src").filter(|s| !s.is_empty())?;
        Some(Self {
            src: src.to_string(),
            alt: find_attribute(attrs, "alt").map(str::to_string),
        })
    }

    /// Markdown image syntax, `![alt](src)`
    pub fn to_markdown(&self) -> String {
        format!("![{}]({})", self.alt.as_deref().unwrap_or(""), self.src)
    }
}

/// Pick the image a figure stands for: the first with both `src` and `alt`,
/// otherwise the first with a `src`.
pub fn find_figure_image(html: &str) -> Option<ImageRef> {
    let images: Vec<ImageRef> = IMG_RE
        .captures_iter(html)
        .filter_map(|caps| ImageRef::from_attrs(&caps["attrs"]))
        .collect();

    let index = images
        .iter()
        .position(|img| img.alt.is_some())
        .unwrap_or(0);
    images.into_iter().nth(index)
}

/// Caption text of the first `<figcaption>`, tags stripped and trimmed
pub fn find_figure_caption(html: &str) -> Option<String> {
    let caps = FIGCAPTION_RE.captures(html)?;
    let caption = strip_tags(&caps["body"]).trim().to_string();
    if caption.is_empty() {
        None
    } else {
        Some(caption)
    }
}

/// Convert the inside of a `<figure>`.
///
/// Emits the image and an optional italic caption line; a figure without an
/// image produces nothing at all.
pub fn convert_figure(html: &str, em_delimiter: char) -> String {
    let Some(image) = find_figure_image(html) else {
        return String::new();
    };

    let mut out = format!("\n{}", image.to_markdown());
    if let Some(caption) = find_figure_caption(html) {
        out.push('\n');
        out.push(em_delimiter);
        out.push_str(&caption);
        out.push(em_delimiter);
    }
    out.push('\n');
    out
}

/// Item marker of a flattened list
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListMarker {
    Bullet(char),
    Ordered,
}

/// Convert the inside of a `<ul>`/`<ol>` to one level of Markdown items.
///
/// Item text has its tags stripped and is trimmed. Ordered items count from
/// 1 regardless of any numbering in the source. A list without items
/// produces nothing.
pub fn convert_list(html: &str, marker: ListMarker) -> String {
    let lines: Vec<String> = LI_RE
        .captures_iter(html)
        .enumerate()
        .map(|(i, caps)| {
            let text = strip_tags(&caps["body"]);
            match marker {
                ListMarker::Bullet(bullet) => format!("{} {}", bullet, text.trim()),
                ListMarker::Ordered => format!("{}. {}", i + 1, text.trim()),
            }
        })
        .collect();

    if lines.is_empty() {
        return String::new();
    }
    format!("\n{}\n", lines.join("\n"))
}

/// Language hint from a `class="language-xyz"` (or `lang-xyz`) attribute
pub fn code_language(attrs: &str) -> Option<&str> {
    find_attribute(attrs, "class")?
        .split_whitespace()
        .find_map(|class| {
            class
                .strip_prefix("language-")
                .or_else(|| class.strip_prefix("lang-"))
        })
        .filter(|lang| !lang.is_empty())
}

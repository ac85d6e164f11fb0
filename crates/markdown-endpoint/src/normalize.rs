//! Entity and marker normalization, the first stage of a conversion.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::protect::{CLOSE, OPEN};
use crate::utilities::{decode_entities, strip_tags};

/// Structural comment markers such as `<!-- wp:paragraph -->`,
/// `<!-- /wp:paragraph -->` or `<!-- wp:spacer {"height":"2em"} /-->`
static MARKER_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?s)<!--\s*/?[A-Za-z][A-Za-z0-9_-]*:[^>]*-->").expect("MARKER_RE should compile")
});

/// `<pre>` elements, whose contents are decoded later by the code rules
static PRE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?is)<pre\b.*?</pre\s*>").expect("PRE_RE should compile"));

/// Strip structural markers and decode entities outside `<pre>` elements.
///
/// Placeholder characters used for protected segments are dropped from the
/// input so they cannot be forged.
pub fn normalize(html: &str) -> String {
    let cleaned: String = html.chars().filter(|&c| c != OPEN && c != CLOSE).collect();
    let stripped = strip_markers(&cleaned);
    decode_outside_pre(&stripped)
}

/// Remove every structural comment marker
pub fn strip_markers(html: &str) -> String {
    MARKER_RE.replace_all(html, "").into_owned()
}

fn decode_outside_pre(html: &str) -> String {
    let mut out = String::with_capacity(html.len());
    let mut last = 0;
    for pre in PRE_RE.find_iter(html) {
        out.push_str(&decode_entities(&html[last..pre.start()]));
        out.push_str(pre.as_str());
        last = pre.end();
    }
    out.push_str(&decode_entities(&html[last..]));
    out
}

/// Text of a fragment with its tags stripped.
///
/// `<pre>` contents are still encoded at this point, so they are decoded
/// here; text outside `<pre>` was decoded by [`normalize`] already.
pub(crate) fn text_content(html: &str) -> String {
    let mut out = String::with_capacity(html.len());
    let mut last = 0;
    for pre in PRE_RE.find_iter(html) {
        out.push_str(&strip_tags(&html[last..pre.start()]));
        out.push_str(&decode_entities(&strip_tags(pre.as_str())));
        last = pre.end();
    }
    out.push_str(&strip_tags(&html[last..]));
    out
}

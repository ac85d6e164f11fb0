//! Protected segments
//!
//! Fenced code content is decoded once and then parked outside the working
//! buffer behind a placeholder made of two private-use characters around a
//! decimal index. Nothing downstream (blockquote prefixing, inline rules, the
//! final tag strip) can rewrite it; [`ProtectedSegments::restore`] puts it back.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

pub(crate) const OPEN: char = '\u{E000}';
pub(crate) const CLOSE: char = '\u{E001}';

static TOKEN_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\x{E000}(\d+)\x{E001}").expect("TOKEN_RE should compile"));

#[derive(Debug, Default)]
pub(crate) struct ProtectedSegments {
    segments: Vec<String>,
}

impl ProtectedSegments {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn len(&self) -> usize {
        self.segments.len()
    }

    /// Store `text` and return its placeholder
    pub(crate) fn protect(&mut self, text: &str) -> String {
        let id = self.segments.len();
        self.segments.push(text.to_string());
        format!("{OPEN}{id}{CLOSE}")
    }

    /// Prefix every line after the first of each segment referenced in `text`.
    ///
    /// The placeholder line itself receives the prefix from the caller, so
    /// only continuation lines are touched. Empty lines get the prefix
    /// without trailing whitespace.
    pub(crate) fn prefix_continuation_lines(&mut self, text: &str, prefix: &str) {
        let bare = prefix.trim_end();
        for caps in TOKEN_RE.captures_iter(text) {
            let Some(segment) = caps[1]
                .parse::<usize>()
                .ok()
                .and_then(|id| self.segments.get_mut(id))
            else {
                continue;
            };

            let mut prefixed = String::with_capacity(segment.len() + prefix.len() * 4);
            for (i, line) in segment.split('\n').enumerate() {
                if i > 0 {
                    prefixed.push('\n');
                    prefixed.push_str(if line.is_empty() { bare } else { prefix });
                }
                prefixed.push_str(line);
            }
            *segment = prefixed;
        }
    }

    /// Replace every placeholder with its segment. Unknown indices vanish.
    pub(crate) fn restore(&self, text: &str) -> String {
        if self.segments.is_empty() {
            return text.to_string();
        }
        TOKEN_RE
            .replace_all(text, |caps: &Captures<'_>| {
                caps[1]
                    .parse::<usize>()
                    .ok()
                    .and_then(|id| self.segments.get(id))
                    .cloned()
                    .unwrap_or_default()
            })
            .into_owned()
    }
}

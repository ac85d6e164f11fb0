//! Block-level rules.
//!
//! Each rule rewrites the whole buffer and runs in the order returned by
//! [`block_rules`]. A rule only matches markup, never Markdown emitted by an
//! earlier rule:
//!
//! 1. `heading` - `<h1>`..`<h6>`
//! 2. `fenced_code` - `<pre><code>`; content decoded from the untouched
//!    source and protected from everything that follows
//! 3. `preformatted` - `<pre>` without `<code>`, inner tags stripped
//! 4. `blockquote` - sees fences from 2 and 3 only as placeholder lines
//! 5. `nested_list` - only with [`ListMode::Nested`] and the `html` feature
//! 6. `unordered_list` / 7. `ordered_list` - flattened items
//! 8. `paragraph`, 9. `horizontal_rule`, 10. `line_break`
//! 11. `figure` - before the inline image rules so a figure image is
//!     converted once
//!
//! [`ListMode::Nested`]: markdown_endpoint_core::ListMode::Nested

use once_cell::sync::Lazy;
use regex::Regex;

use super::{Context, Filter, Rule};
use crate::normalize::text_content;
use crate::utilities::{
    code_language, convert_figure, convert_list, decode_entities, strip_tags, ListMarker,
};

static FENCED_CODE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?is)<pre\b[^>]*>\s*<code\b(?P<attrs>[^>]*)>(?P<body>.*?)</code\s*>\s*</pre\s*>")
        .expect("FENCED_CODE_RE should compile")
});

/// Create all block rules, keyed by name, in application order
pub fn block_rules() -> Vec<(&'static str, Rule)> {
    let mut rules = vec![
        ("heading", heading_rule()),
        ("fenced_code", fenced_code_rule()),
        ("preformatted", preformatted_rule()),
        ("blockquote", blockquote_rule()),
    ];
    #[cfg(feature = "html")]
    rules.push(("nested_list", crate::html::nested_list_rule()));
    rules.extend([
        ("unordered_list", unordered_list_rule()),
        ("ordered_list", ordered_list_rule()),
        ("paragraph", paragraph_rule()),
        ("horizontal_rule", horizontal_rule()),
        ("line_break", line_break_rule()),
        ("figure", figure_rule()),
    ]);
    rules
}

fn heading_rule() -> Rule {
    Rule::for_tags(&["h1", "h2", "h3", "h4", "h5", "h6"], |el, _| {
        let level: usize = el.tag[1..].parse().unwrap_or(1);
        let text = text_content(el.body);
        format!("\n{} {}\n", "#".repeat(level), text.trim())
    })
}

fn fenced_code_rule() -> Rule {
    Rule::new(
        Filter::from_regex("pre", Regex::clone(&FENCED_CODE_RE)),
        |el, ctx| {
            // Raw markup (highlighter spans) goes, escaped markup is kept as text
            let stripped = strip_tags(el.body);
            let code = decode_entities(&stripped);
            fence(code.trim(), code_language(el.attrs), ctx)
        },
    )
}

fn preformatted_rule() -> Rule {
    Rule::for_tag("pre", |el, ctx| {
        let text = strip_tags(el.body);
        let code = decode_entities(&text);
        fence(code.trim(), None, ctx)
    })
}

/// Park `code` as a protected segment and emit a fence around its placeholder
fn fence(code: &str, language: Option<&str>, ctx: &mut Context<'_>) -> String {
    let token = ctx.protect(code);
    let fence = &ctx.options().fence;
    format!("\n{fence}{}\n{token}\n{fence}\n", language.unwrap_or(""))
}

fn blockquote_rule() -> Rule {
    Rule::for_tag("blockquote", |el, ctx| {
        let text = strip_tags(el.body);
        // Fenced code inside the quote must carry the prefix on every line
        ctx.segments_mut().prefix_continuation_lines(&text, "> ");

        let quoted: Vec<String> = text
            .trim()
            .split('\n')
            .map(|line| {
                let line = line.trim();
                if line.is_empty() {
                    String::new()
                } else {
                    format!("> {}", line)
                }
            })
            .collect();
        format!("\n{}\n", quoted.join("\n"))
    })
}

fn unordered_list_rule() -> Rule {
    Rule::for_tag("ul", |el, ctx| {
        convert_list(el.body, ListMarker::Bullet(ctx.options().bullet_list_marker))
    })
}

fn ordered_list_rule() -> Rule {
    Rule::for_tag("ol", |el, _| convert_list(el.body, ListMarker::Ordered))
}

fn paragraph_rule() -> Rule {
    Rule::for_tag("p", |el, _| format!("\n\n{}\n\n", el.body.trim()))
}

fn horizontal_rule() -> Rule {
    Rule::for_void_tag("hr", |_, ctx| format!("\n{}\n", ctx.options().hr))
}

fn line_break_rule() -> Rule {
    Rule::for_void_tag("br", |_, _| "  \n".to_string())
}

fn figure_rule() -> Rule {
    Rule::for_tag("figure", |el, ctx| {
        convert_figure(el.body, ctx.options().em_delimiter)
    })
}

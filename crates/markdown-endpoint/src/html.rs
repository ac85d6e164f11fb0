//! Tree-based list conversion.
//!
//! With [`ListMode::Nested`] each outermost `<ul>`/`<ol>` span is parsed with
//! scraper and rendered with its hierarchy: child items are indented to the
//! content column of their parent item (two spaces under `- `, three under
//! `1. `) and every ordered level counts from 1. Spans whose tags never
//! balance are left to the flat list rules.

use once_cell::sync::Lazy;
use regex::Regex;
use scraper::{ElementRef, Html, Node};

use markdown_endpoint_core::ListMode;

use crate::rules::Rule;
use crate::utilities::collapse_whitespace;

static LIST_TAG_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)<(?P<close>/?)(?:ul|ol)\b[^>]*>").expect("LIST_TAG_RE should compile")
});

/// Block rule that renders nested lists when [`ListMode::Nested`] is set
pub(crate) fn nested_list_rule() -> Rule {
    Rule::transform(|input, ctx| {
        if ctx.options().list_mode != ListMode::Nested {
            return input.to_string();
        }
        convert_nested_lists(input, ctx.options().bullet_list_marker)
    })
}

/// Replace every balanced outermost list in `html` with nested Markdown items
pub fn convert_nested_lists(html: &str, bullet: char) -> String {
    let mut out = String::with_capacity(html.len());
    let mut last = 0;
    let mut depth = 0usize;
    let mut start = 0;

    for caps in LIST_TAG_RE.captures_iter(html) {
        let Some(tag) = caps.get(0) else {
            continue;
        };
        if caps["close"].is_empty() {
            if depth == 0 {
                start = tag.start();
            }
            depth += 1;
        } else if depth > 0 {
            depth -= 1;
            if depth == 0 {
                out.push_str(&html[last..start]);
                out.push_str(&render_fragment(&html[start..tag.end()], bullet));
                last = tag.end();
            }
        }
    }

    out.push_str(&html[last..]);
    out
}

fn render_fragment(fragment: &str, bullet: char) -> String {
    // Entities were decoded before this stage; the parser must not decode again
    let document = Html::parse_fragment(&fragment.replace('&', "&amp;"));
    let mut lines = Vec::new();

    for child in document.root_element().children().filter_map(ElementRef::wrap) {
        if is_list(&child) {
            render_list(child, 0, bullet, &mut lines);
        }
    }

    if lines.is_empty() {
        return String::new();
    }
    format!("\n{}\n", lines.join("\n"))
}

fn is_list(element: &ElementRef) -> bool {
    matches!(element.value().name(), "ul" | "ol")
}

fn render_list(list: ElementRef, indent: usize, bullet: char, lines: &mut Vec<String>) {
    let ordered = list.value().name() == "ol";
    let mut counter = 0;

    for child in list.children().filter_map(ElementRef::wrap) {
        match child.value().name() {
            "li" => {
                counter += 1;
                let marker = if ordered {
                    format!("{}.", counter)
                } else {
                    bullet.to_string()
                };

                let mut text = String::new();
                let mut nested = Vec::new();
                for node in child.children() {
                    match node.value() {
                        Node::Text(t) => text.push_str(&t.text),
                        Node::Element(_) => {
                            if let Some(element) = ElementRef::wrap(node) {
                                if is_list(&element) {
                                    nested.push(element);
                                } else {
                                    text.extend(element.text());
                                }
                            }
                        }
                        _ => {}
                    }
                }

                lines.push(format!(
                    "{}{} {}",
                    " ".repeat(indent),
                    marker,
                    collapse_whitespace(&text).trim()
                ));
                for element in nested {
                    render_list(element, indent + marker.len() + 1, bullet, lines);
                }
            }
            // Invalid but common: a list directly inside a list
            "ul" | "ol" => render_list(child, indent + 2, bullet, lines),
            _ => {}
        }
    }
}

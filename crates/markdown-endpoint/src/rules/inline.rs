//! Inline rules, applied after every block rule.

use super::Rule;
use crate::utilities::{strip_tags, ImageRef};

/// Create all inline rules, keyed by name, in application order
pub fn inline_rules() -> Vec<(&'static str, Rule)> {
    vec![
        ("image_with_alt", image_with_alt_rule()),
        ("image", image_rule()),
        ("link", link_rule()),
        ("strong", strong_rule()),
        ("emphasis", emphasis_rule()),
        ("code", code_rule()),
        ("strikethrough", strikethrough_rule()),
    ]
}

fn image_with_alt_rule() -> Rule {
    Rule::for_void_tag("img", |el, _| match ImageRef::from_attrs(el.attrs) {
        Some(image) if image.alt.is_some() => image.to_markdown(),
        _ => el.raw.to_string(),
    })
}

fn image_rule() -> Rule {
    Rule::for_void_tag("img", |el, _| match ImageRef::from_attrs(el.attrs) {
        Some(image) => format!("![]({})", image.src),
        None => el.raw.to_string(),
    })
}

fn link_rule() -> Rule {
    Rule::for_tag("a", |el, _| match el.attr("href").filter(|h| !h.is_empty()) {
        Some(href) => format!("[{}]({})", strip_tags(el.body), href),
        None => el.raw.to_string(),
    })
}

fn strong_rule() -> Rule {
    Rule::for_tags(&["strong", "b"], |el, ctx| {
        let delimiter = &ctx.options().strong_delimiter;
        format!("{delimiter}{}{delimiter}", el.body)
    })
}

fn emphasis_rule() -> Rule {
    Rule::for_tags(&["em", "i"], |el, ctx| {
        let delimiter = ctx.options().em_delimiter;
        format!("{delimiter}{}{delimiter}", el.body)
    })
}

/// Inline code keeps its captured text verbatim: no second entity decode
/// and no tag stripping at this point.
fn code_rule() -> Rule {
    Rule::for_tag("code", |el, _| format!("`{}`", el.body))
}

fn strikethrough_rule() -> Rule {
    Rule::for_tags(&["del", "s", "strike"], |el, ctx| {
        let delimiter = &ctx.options().strike_delimiter;
        format!("{delimiter}{}{delimiter}", el.body)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protect::ProtectedSegments;
    use crate::rules::Context;
    use markdown_endpoint_core::ConvertOptions;

    fn run_all(input: &str) -> String {
        let options = ConvertOptions::default();
        let mut segments = ProtectedSegments::new();
        let mut ctx = Context::new(&options, &mut segments);
        inline_rules()
            .iter()
            .fold(input.to_string(), |acc, (_, rule)| rule.apply(&acc, &mut ctx))
    }

    #[test]
    fn test_image_with_alt() {
        assert_eq!(run_all(r#"<img src="a.png" alt="An image">"#), "![An image](a.png)");
    }

    #[test]
    fn test_image_alt_before_src() {
        assert_eq!(run_all(r#"<img alt="A" src="a.png" />"#), "![A](a.png)");
    }

    #[test]
    fn test_image_without_alt() {
        assert_eq!(run_all(r#"<img src="a.png">"#), "![](a.png)");
    }

    #[test]
    fn test_image_without_src_left_for_strip() {
        assert_eq!(run_all(r#"<img alt="A">"#), r#"<img alt="A">"#);
    }

    #[test]
    fn test_link_strips_inner_tags() {
        assert_eq!(
            run_all(r#"<a href="https://example.com" rel="x"><span>Ex</span>ample</a>"#),
            "[Example](https://example.com)"
        );
    }

    #[test]
    fn test_linked_image() {
        assert_eq!(
            run_all(r#"<a href="/big.png"><img src="small.png" alt="S"></a>"#),
            "[![S](small.png)](/big.png)"
        );
    }

    #[test]
    fn test_anchor_without_href_untouched() {
        assert_eq!(run_all(r#"<a id="top">Top</a>"#), r#"<a id="top">Top</a>"#);
    }

    #[test]
    fn test_emphasis_variants() {
        assert_eq!(run_all("<strong>a</strong> <b>b</b>"), "**a** **b**");
        assert_eq!(run_all("<em>a</em> <i>b</i>"), "*a* *b*");
        assert_eq!(run_all("<del>a</del> <s>b</s> <strike>c</strike>"), "~~a~~ ~~b~~ ~~c~~");
    }

    #[test]
    fn test_inline_code_is_verbatim() {
        assert_eq!(run_all("<code>&amp;x</code>"), "`&amp;x`");
        assert_eq!(run_all("<code>a <b>b</b></code>"), "`a **b**`");
    }

    #[test]
    fn test_no_false_matches_on_similar_tags() {
        assert_eq!(run_all("<span>x</span><small>y</small>"), "<span>x</span><small>y</small>");
    }
}

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use chrono::NaiveDate;
use http::header::{ACCEPT, CONTENT_TYPE};
use http::Request;
use markdown_endpoint::{MarkdownConverter, Rule};
use markdown_endpoint_core::ContentMetadata;
use markdown_endpoint_http::{
    discovery_link, EndpointError, MarkdownInterceptor, NegotiationConfig, Resource,
    ResourceResolver,
};

struct Site {
    resources: HashMap<String, Resource>,
}

impl Site {
    fn new() -> Self {
        let meta = |title: &str, url: &str| {
            ContentMetadata::new(title, NaiveDate::from_ymd_opt(2024, 6, 30).unwrap(), "Ana", url)
                .with_tags(["rust"])
        };
        let mut resources = HashMap::new();
        resources.insert(
            "/blog/hello/".to_string(),
            Resource::new(
                "<!-- wp:paragraph --><p>Hello &amp; welcome</p><!-- /wp:paragraph -->",
                meta("Hello", "https://example.com/blog/hello/"),
            ),
        );
        resources.insert(
            "/internal/notes/".to_string(),
            Resource::new("<p>internal</p>", meta("Notes", "https://example.com/internal/notes/"))
                .private(),
        );
        Self { resources }
    }
}

impl ResourceResolver for Site {
    type Error = String;

    fn resolve(&self, path: &str) -> Result<Option<Resource>, String> {
        if path.starts_with("/broken") {
            return Err("database unavailable".to_string());
        }
        Ok(self.resources.get(path).cloned())
    }
}

fn interceptor() -> MarkdownInterceptor<Site> {
    let config = NegotiationConfig {
        trailing_slash: true,
        ..Default::default()
    };
    MarkdownInterceptor::with_config(Site::new(), config)
}

/// Converter whose only extra rule counts how often conversion runs
fn counting_converter() -> (MarkdownConverter, Arc<AtomicUsize>) {
    let runs = Arc::new(AtomicUsize::new(0));
    let counter = runs.clone();
    let mut converter = MarkdownConverter::new();
    converter.add_rule(
        "count",
        Rule::transform(move |input, _| {
            counter.fetch_add(1, Ordering::SeqCst);
            input.to_string()
        }),
    );
    (converter, runs)
}

const EXPECTED: &str = "---
title: Hello
published_at: 2024-06-30
author_name: Ana
canonical_url: \"https://example.com/blog/hello/\"
tags: [\"rust\"]
---

Hello & welcome";

#[test]
fn test_all_three_signals_serve_the_same_document() {
    let interceptor = interceptor();
    let requests = [
        Request::get("/blog/hello.md").body(()).unwrap(),
        Request::get("/blog/hello/?format=md").body(()).unwrap(),
        Request::get("/blog/hello/")
            .header(ACCEPT, "text/markdown")
            .body(())
            .unwrap(),
    ];

    for request in &requests {
        let response = interceptor.intercept(request).unwrap().unwrap();
        assert_eq!(response.headers()[CONTENT_TYPE], "text/markdown; charset=utf-8");
        assert_eq!(response.body(), EXPECTED);
    }
}

#[test]
fn test_html_requests_pass_through() {
    let request = Request::get("/blog/hello/")
        .header(ACCEPT, "text/html,application/xhtml+xml")
        .body(())
        .unwrap();
    assert!(interceptor().intercept(&request).unwrap().is_none());
}

#[test]
fn test_converter_not_run_for_refused_requests() {
    let (converter, runs) = counting_converter();
    let interceptor = interceptor().with_converter(converter);

    let private = Request::get("/internal/notes.md").body(()).unwrap();
    assert!(matches!(
        interceptor.intercept(&private),
        Err(EndpointError::NotPublic(_))
    ));

    let missing = Request::get("/nope.md").body(()).unwrap();
    assert!(matches!(
        interceptor.intercept(&missing),
        Err(EndpointError::NotFound(path)) if path == "/nope/"
    ));
    assert_eq!(runs.load(Ordering::SeqCst), 0);

    let public = Request::get("/blog/hello.md").body(()).unwrap();
    assert!(interceptor.intercept(&public).unwrap().is_some());
    assert_eq!(runs.load(Ordering::SeqCst), 1);
}

#[test]
fn test_resolver_failure() {
    let request = Request::get("/broken/page.md").body(()).unwrap();
    match interceptor().intercept(&request) {
        Err(EndpointError::Resolver(message)) => assert_eq!(message, "database unavailable"),
        other => panic!("expected resolver error, got {other:?}"),
    }
}

#[test]
fn test_discovery_link_for_site_resources() {
    let site = Site::new();
    assert_eq!(
        discovery_link(&site.resources["/blog/hello/"]).unwrap(),
        "<link rel=\"alternate\" type=\"text/markdown\" href=\"https://example.com/blog/hello.md\" />"
    );
    assert!(discovery_link(&site.resources["/internal/notes/"]).is_none());
}

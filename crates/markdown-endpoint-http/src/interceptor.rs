//! Serve the Markdown representation in front of the host's HTML handler.

use http::header::{CONTENT_TYPE, X_CONTENT_TYPE_OPTIONS};
use http::{Request, Response, StatusCode};
use markdown_endpoint::MarkdownConverter;
use markdown_endpoint_core::MarkdownDocument;
use tracing::{debug, warn};

use crate::negotiate::{MarkdownRequest, NegotiationConfig};
use crate::resource::ResourceResolver;
use crate::{EndpointError, Result};

pub const MARKDOWN_CONTENT_TYPE: &str = "text/markdown; charset=utf-8";

/// Answers Markdown requests; everything else passes through
pub struct MarkdownInterceptor<R> {
    resolver: R,
    config: NegotiationConfig,
    converter: MarkdownConverter,
}

impl<R: ResourceResolver> MarkdownInterceptor<R> {
    pub fn new(resolver: R) -> Self {
        Self::with_config(resolver, NegotiationConfig::default())
    }

    pub fn with_config(resolver: R, config: NegotiationConfig) -> Self {
        Self {
            resolver,
            config,
            converter: MarkdownConverter::new(),
        }
    }

    /// Use a configured converter (options, custom rules)
    pub fn with_converter(mut self, converter: MarkdownConverter) -> Self {
        self.converter = converter;
        self
    }

    pub fn config(&self) -> &NegotiationConfig {
        &self.config
    }

    pub fn converter(&self) -> &MarkdownConverter {
        &self.converter
    }

    /// Handle a request.
    ///
    /// `Ok(None)` when the request does not ask for Markdown. Unknown and
    /// non-public resources are errors and the converter is not run.
    pub fn intercept<B>(&self, request: &Request<B>) -> Result<Option<Response<String>>> {
        let Some(md) = MarkdownRequest::detect_uri(request.uri(), request.headers(), &self.config)
        else {
            return Ok(None);
        };
        debug!(path = %md.resource_path, signal = ?md.signal, "markdown requested");

        let resource = self
            .resolver
            .resolve(&md.resource_path)
            .map_err(|e| {
                warn!(path = %md.resource_path, error = %e, "resource resolver failed");
                EndpointError::Resolver(e.to_string())
            })?
            .ok_or_else(|| EndpointError::NotFound(md.resource_path.clone()))?;

        if !resource.public {
            debug!(path = %md.resource_path, "refusing non-public resource");
            return Err(EndpointError::NotPublic(md.resource_path));
        }

        let document = self.converter.convert(&resource.html, &resource.metadata);
        markdown_response(&document).map(Some)
    }
}

/// 200 response carrying the document text
pub fn markdown_response(document: &MarkdownDocument) -> Result<Response<String>> {
    let response = Response::builder()
        .status(StatusCode::OK)
        .header(CONTENT_TYPE, MARKDOWN_CONTENT_TYPE)
        .header(X_CONTENT_TYPE_OPTIONS, "nosniff")
        .body(document.to_markdown())?;
    Ok(response)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use markdown_endpoint_core::{ContentMetadata, Frontmatter};
    use std::convert::Infallible;

    use crate::resource::Resource;

    fn lookup(path: &str) -> std::result::Result<Option<Resource>, Infallible> {
        let meta = ContentMetadata::new(
            "Hello",
            NaiveDate::from_ymd_opt(2024, 5, 1).unwrap(),
            "Jane",
            "https://example.com/hello/",
        );
        Ok(match path {
            "/hello" => Some(Resource::new("<p>Hi <b>there</b></p>", meta)),
            "/draft" => Some(Resource::new("<p>secret</p>", meta).private()),
            _ => None,
        })
    }

    fn get(uri: &str) -> Request<()> {
        Request::get(uri).body(()).unwrap()
    }

    #[test]
    fn test_markdown_response_headers() {
        let doc = MarkdownDocument::new(Frontmatter::new(), "x".to_string());
        let response = markdown_response(&doc).unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()[CONTENT_TYPE], MARKDOWN_CONTENT_TYPE);
        assert_eq!(response.headers()[X_CONTENT_TYPE_OPTIONS], "nosniff");
        assert_eq!(response.body(), "---\n---\n\nx");
    }

    #[test]
    fn test_intercept_suffix() {
        let interceptor = MarkdownInterceptor::new(lookup);
        let response = interceptor.intercept(&get("/hello.md")).unwrap().unwrap();
        assert!(response.body().ends_with("---\n\nHi **there**"));
    }

    #[test]
    fn test_pass_through() {
        let interceptor = MarkdownInterceptor::new(lookup);
        assert!(interceptor.intercept(&get("/hello")).unwrap().is_none());
    }

    #[test]
    fn test_errors() {
        let interceptor = MarkdownInterceptor::new(lookup);
        assert!(matches!(
            interceptor.intercept(&get("/missing.md")),
            Err(EndpointError::NotFound(path)) if path == "/missing"
        ));
        assert!(matches!(
            interceptor.intercept(&get("/draft.md")),
            Err(EndpointError::NotPublic(path)) if path == "/draft"
        ));
    }
}

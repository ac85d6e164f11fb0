//! # markdown-endpoint-http
//!
//! HTTP plumbing around [`markdown_endpoint`]: decide whether a request asks
//! for Markdown (`.md` suffix, `?format=md`, `Accept: text/markdown`), resolve
//! the resource through a host hook and answer with a `text/markdown`
//! response. Also renders the `<link rel="alternate">` discovery element.
//!
//! ```rust
//! use std::convert::Infallible;
//!
//! use chrono::NaiveDate;
//! use markdown_endpoint_core::ContentMetadata;
//! use markdown_endpoint_http::{MarkdownInterceptor, Resource};
//!
//! let interceptor = MarkdownInterceptor::new(|path: &str| -> Result<Option<Resource>, Infallible> {
//!     let meta = ContentMetadata::new(
//!         "Hello",
//!         NaiveDate::from_ymd_opt(2024, 5, 1).unwrap(),
//!         "Jane",
//!         "https://example.com/hello/",
//!     );
//!     Ok((path == "/hello").then(|| Resource::new("<p>Hi</p>", meta)))
//! });
//!
//! let request = http::Request::get("/hello.md").body(()).unwrap();
//! let response = interceptor.intercept(&request).unwrap().unwrap();
//! assert!(response.body().ends_with("---\n\nHi"));
//! ```

mod discovery;
mod interceptor;
mod negotiate;
mod resource;

pub use discovery::{discovery_link, markdown_url};
pub use interceptor::{markdown_response, MarkdownInterceptor, MARKDOWN_CONTENT_TYPE};
pub use negotiate::{MarkdownRequest, MarkdownSignal, NegotiationConfig};
pub use resource::{Resource, ResourceResolver};

/// Error type for the HTTP surface
#[derive(Debug, thiserror::Error)]
pub enum EndpointError {
    #[error("No resource at {0}")]
    NotFound(String),

    #[error("Resource at {0} is not public")]
    NotPublic(String),

    #[error("Resource lookup failed: {0}")]
    Resolver(String),

    #[error("HTTP error: {0}")]
    Http(#[from] http::Error),
}

pub type Result<T> = std::result::Result<T, EndpointError>;

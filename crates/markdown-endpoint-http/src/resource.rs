//! Resources as seen by the endpoint, and the host hook that finds them.

use markdown_endpoint_core::ContentMetadata;

/// A singular content resource: its rendered markup and metadata.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resource {
    /// Markup after the host's own rendering
    pub html: String,
    pub metadata: ContentMetadata,
    /// Whether the resource's type is publicly viewable
    pub public: bool,
}

impl Resource {
    pub fn new(html: impl Into<String>, metadata: ContentMetadata) -> Self {
        Self {
            html: html.into(),
            metadata,
            public: true,
        }
    }

    /// Mark the resource as not publicly viewable
    pub fn private(mut self) -> Self {
        self.public = false;
        self
    }
}

/// Host hook resolving a request path to a singular resource.
///
/// Return `Ok(None)` for paths that do not name a singular resource
/// (archives, feeds, unknown paths).
pub trait ResourceResolver {
    type Error: std::fmt::Display;

    fn resolve(&self, path: &str) -> std::result::Result<Option<Resource>, Self::Error>;
}

impl<F, E> ResourceResolver for F
where
    F: Fn(&str) -> std::result::Result<Option<Resource>, E>,
    E: std::fmt::Display,
{
    type Error = E;

    fn resolve(&self, path: &str) -> std::result::Result<Option<Resource>, E> {
        self(path)
    }
}

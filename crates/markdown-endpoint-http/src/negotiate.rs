//! Content negotiation: does a request ask for the Markdown representation?

use http::header::ACCEPT;
use http::request::Parts;
use http::{HeaderMap, Uri};
use url::form_urlencoded;

/// Negotiation settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NegotiationConfig {
    /// Path suffix selecting Markdown
    pub suffix: String,
    /// Query parameter name selecting a format
    pub query_param: String,
    /// Query parameter value selecting Markdown
    pub query_value: String,
    /// Media type looked for in `Accept`
    pub media_type: String,
    /// Append `/` to a suffix-stripped path, for hosts whose permalinks end in a slash
    pub trailing_slash: bool,
}

impl Default for NegotiationConfig {
    fn default() -> Self {
        Self {
            suffix: ".md".to_string(),
            query_param: "format".to_string(),
            query_value: "md".to_string(),
            media_type: "text/markdown".to_string(),
            trailing_slash: false,
        }
    }
}

/// Which request signal selected Markdown
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkdownSignal {
    /// Path ends with the configured suffix
    Suffix,
    /// `format=md` query parameter
    Query,
    /// `Accept` header names `text/markdown`
    Accept,
}

/// A request that asks for Markdown, with the path of the underlying resource
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkdownRequest {
    pub signal: MarkdownSignal,
    /// Path to resolve, suffix already stripped
    pub resource_path: String,
    /// Original query string, if any
    pub query: Option<String>,
}

impl MarkdownRequest {
    /// Inspect request parts. Returns `None` when none of the signals is present.
    pub fn detect(parts: &Parts, config: &NegotiationConfig) -> Option<Self> {
        Self::detect_uri(&parts.uri, &parts.headers, config)
    }

    /// Inspect a URI and its headers.
    ///
    /// The suffix wins over the query parameter, which wins over `Accept`.
    pub fn detect_uri(uri: &Uri, headers: &HeaderMap, config: &NegotiationConfig) -> Option<Self> {
        let path = uri.path();
        let query = uri.query().map(str::to_string);

        if let Some(stripped) = strip_suffix(path, config) {
            return Some(Self {
                signal: MarkdownSignal::Suffix,
                resource_path: stripped,
                query,
            });
        }

        let signal = if wants_query_format(uri.query(), config) {
            MarkdownSignal::Query
        } else if accepts_markdown(headers, config) {
            MarkdownSignal::Accept
        } else {
            return None;
        };

        Some(Self {
            signal,
            resource_path: path.to_string(),
            query,
        })
    }

    /// Path plus the original query string
    pub fn resource_uri(&self) -> String {
        match &self.query {
            Some(query) => format!("{}?{}", self.resource_path, query),
            None => self.resource_path.clone(),
        }
    }
}

fn strip_suffix(path: &str, config: &NegotiationConfig) -> Option<String> {
    if config.suffix.is_empty() {
        return None;
    }
    let mut stripped = path.strip_suffix(config.suffix.as_str())?.to_string();
    if stripped.is_empty() {
        stripped.push('/');
    } else if config.trailing_slash && !stripped.ends_with('/') {
        stripped.push('/');
    }
    Some(stripped)
}

fn wants_query_format(query: Option<&str>, config: &NegotiationConfig) -> bool {
    query.is_some_and(|q| {
        form_urlencoded::parse(q.as_bytes())
            .any(|(key, value)| key == config.query_param.as_str() && value == config.query_value.as_str())
    })
}

fn accepts_markdown(headers: &HeaderMap, config: &NegotiationConfig) -> bool {
    let media_type = config.media_type.to_ascii_lowercase();
    headers
        .get_all(ACCEPT)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .any(|value| value.to_ascii_lowercase().contains(&media_type))
}

#[cfg(test)]
mod tests {
    use super::*;
    use http::HeaderValue;

    fn detect(uri: &str, accept: Option<&str>) -> Option<MarkdownRequest> {
        let uri: Uri = uri.parse().unwrap();
        let mut headers = HeaderMap::new();
        if let Some(accept) = accept {
            headers.insert(ACCEPT, HeaderValue::from_str(accept).unwrap());
        }
        MarkdownRequest::detect_uri(&uri, &headers, &NegotiationConfig::default())
    }

    #[test]
    fn test_suffix() {
        let request = detect("/2024/05/hello.md", None).unwrap();
        assert_eq!(request.signal, MarkdownSignal::Suffix);
        assert_eq!(request.resource_path, "/2024/05/hello");
    }

    #[test]
    fn test_suffix_keeps_query() {
        let request = detect("/hello.md?preview=1", None).unwrap();
        assert_eq!(request.resource_uri(), "/hello?preview=1");
    }

    #[test]
    fn test_suffix_with_trailing_slash_permalinks() {
        let (parts, ()) = http::Request::get("/hello.md").body(()).unwrap().into_parts();
        let config = NegotiationConfig {
            trailing_slash: true,
            ..Default::default()
        };
        let request = MarkdownRequest::detect(&parts, &config).unwrap();
        assert_eq!(request.resource_path, "/hello/");
    }

    #[test]
    fn test_query_parameter() {
        let request = detect("/hello/?format=md", None).unwrap();
        assert_eq!(request.signal, MarkdownSignal::Query);
        assert_eq!(request.resource_path, "/hello/");
        assert!(detect("/hello/?format=html", None).is_none());
    }

    #[test]
    fn test_accept_header() {
        let request = detect("/hello/", Some("text/markdown, text/html;q=0.8")).unwrap();
        assert_eq!(request.signal, MarkdownSignal::Accept);
        assert!(detect("/hello/", Some("Text/Markdown")).is_some());
        assert!(detect("/hello/", Some("text/html")).is_none());
    }

    #[test]
    fn test_plain_request() {
        assert!(detect("/hello/", None).is_none());
        assert!(detect("/readme.mdx", None).is_none());
    }
}

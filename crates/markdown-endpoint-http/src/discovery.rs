//! Auto-discovery: advertise the Markdown representation from the HTML page.

use crate::resource::Resource;

/// Markdown URL for a permalink: trailing slashes removed, `.md` appended
pub fn markdown_url(permalink: &str) -> String {
    format!("{}.md", permalink.trim_end_matches('/'))
}

/// `<link rel="alternate">` element for the page head.
///
/// `None` for resources that are not publicly viewable.
pub fn discovery_link(resource: &Resource) -> Option<String> {
    if !resource.public {
        return None;
    }
    let url = markdown_url(&resource.metadata.canonical_url);
    Some(format!(
        r#"<link rel="alternate" type="text/markdown" href="{}" />"#,
        html_escape::encode_double_quoted_attribute(&url)
    ))
}

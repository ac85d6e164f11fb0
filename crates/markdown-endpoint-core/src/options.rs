//! Configuration options for HTML to Markdown conversion

use serde::{Deserialize, Serialize};

/// How `<ul>`/`<ol>` structures are rendered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ListMode {
    /// Every item of a list is emitted at one level, nested lists included.
    #[default]
    Flat,
    /// Nested lists keep their hierarchy as indented items.
    ///
    /// This changes output compared to [`ListMode::Flat`] and requires the
    /// `html` feature of the `markdown-endpoint` crate; without it the
    /// converter falls back to flat lists.
    Nested,
}

/// Options for the conversion pipeline
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConvertOptions {
    /// List rendering mode
    pub list_mode: ListMode,

    /// Fence string for code blocks
    pub fence: String,

    /// Horizontal rule string
    pub hr: String,

    /// Bullet list marker
    pub bullet_list_marker: char,

    /// Strong delimiter
    pub strong_delimiter: String,

    /// Emphasis delimiter
    pub em_delimiter: char,

    /// Strikethrough delimiter
    pub strike_delimiter: String,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self {
            list_mode: ListMode::Flat,
            fence: "```".to_string(),
            hr: "---".to_string(),
            bullet_list_marker: '-',
            strong_delimiter: "**".to_string(),
            em_delimiter: '*',
            strike_delimiter: "~~".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_config_keeps_defaults() {
        let options: ConvertOptions =
            serde_json::from_str(r#"{"list_mode": "nested", "fence": "~~~"}"#).unwrap();
        assert_eq!(options.list_mode, ListMode::Nested);
        assert_eq!(options.fence, "~~~");
        assert_eq!(options.bullet_list_marker, '-');
        assert_eq!(options.hr, "---");
    }
}

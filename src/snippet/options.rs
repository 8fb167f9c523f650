use serde::{Deserialize, Serialize};

use super::FragmenterConfig;
use crate::HighlightError;

/// Default number of fragments returned per document.
pub const DEFAULT_MAX_NUM_FRAGMENTS: usize = 3;

/// Default number of chars of a document considered for highlighting.
pub const DEFAULT_MAX_CHARS_TO_ANALYZE: usize = 75 * 1024;

/// Define how the fragments of a document should be selected and rendered.
///
/// ```rust
/// use highlight_fragments::snippet::{FragmenterConfig, HighlightOptions};
///
/// let options = HighlightOptions::from_json(
///     r#"{"max_num_fragments": 5, "fragmenter": {"type": "line_marker"}}"#,
/// )
/// .unwrap();
/// assert_eq!(options.max_num_fragments(), 5);
/// assert!(options.merge_contiguous_fragments());
/// assert!(matches!(options.fragmenter(), FragmenterConfig::LineMarker { .. }));
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HighlightOptions {
    max_num_fragments: usize,
    merge_contiguous_fragments: bool,
    max_chars_to_analyze: usize,
    fragmenter: FragmenterConfig,
    pre_tag: String,
    post_tag: String,
}

impl Default for HighlightOptions {
    fn default() -> HighlightOptions {
        HighlightOptions {
            max_num_fragments: DEFAULT_MAX_NUM_FRAGMENTS,
            merge_contiguous_fragments: true,
            max_chars_to_analyze: DEFAULT_MAX_CHARS_TO_ANALYZE,
            fragmenter: FragmenterConfig::default(),
            pre_tag: "<b>".to_string(),
            post_tag: "</b>".to_string(),
        }
    }
}

impl HighlightOptions {
    /// Parses options from a JSON document. Missing keys take their default value.
    pub fn from_json(json: &str) -> crate::Result<HighlightOptions> {
        let options: HighlightOptions = serde_json::from_str(json)?;
        options.validate()?;
        Ok(options)
    }

    /// Checks that the options describe a usable highlighter.
    pub fn validate(&self) -> crate::Result<()> {
        if self.max_chars_to_analyze == 0 {
            return Err(HighlightError::InvalidArgument(
                "max_chars_to_analyze must be greater than 0".to_string(),
            ));
        }
        self.fragmenter.build()?;
        Ok(())
    }

    /// Returns the maximum number of fragments returned per document.
    pub fn max_num_fragments(&self) -> usize {
        self.max_num_fragments
    }

    /// Sets the maximum number of fragments returned per document.
    pub fn set_max_num_fragments(mut self, max_num_fragments: usize) -> HighlightOptions {
        self.max_num_fragments = max_num_fragments;
        self
    }

    /// Returns true iff contiguous fragments get merged.
    pub fn merge_contiguous_fragments(&self) -> bool {
        self.merge_contiguous_fragments
    }

    pub fn set_merge_contiguous_fragments(mut self, merge: bool) -> HighlightOptions {
        self.merge_contiguous_fragments = merge;
        self
    }

    /// Tokens starting at or after this char offset are ignored.
    pub fn max_chars_to_analyze(&self) -> usize {
        self.max_chars_to_analyze
    }

    pub fn set_max_chars_to_analyze(mut self, max_chars_to_analyze: usize) -> HighlightOptions {
        self.max_chars_to_analyze = max_chars_to_analyze;
        self
    }

    pub fn fragmenter(&self) -> &FragmenterConfig {
        &self.fragmenter
    }

    /// Sets the fragmenter strategy.
    pub fn set_fragmenter(mut self, fragmenter: FragmenterConfig) -> HighlightOptions {
        self.fragmenter = fragmenter;
        self
    }

    pub fn pre_tag(&self) -> &str {
        &self.pre_tag
    }

    pub fn post_tag(&self) -> &str {
        &self.post_tag
    }

    /// Sets the tags wrapped around highlighted terms.
    pub fn set_tags(mut self, pre_tag: &str, post_tag: &str) -> HighlightOptions {
        self.pre_tag = pre_tag.to_string();
        self.post_tag = post_tag.to_string();
        self
    }
}

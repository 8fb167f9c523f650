use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::tokenizer::Token;
use crate::HighlightError;

/// Default width, in chars, of the windows of a [`FixedWidthFragmenter`].
pub const DEFAULT_FRAGMENT_SIZE: usize = 100;

/// Default pattern of the line markers recognized by a [`LineMarkerFragmenter`].
pub const DEFAULT_LINE_MARKER_PATTERN: &str = "&LINE-[A-Za-z0-9]+;";

pub trait FragmenterClone {
    fn box_clone(&self) -> Box<dyn Fragmenter>;
}

impl<T: Fragmenter + Clone> FragmenterClone for T {
    fn box_clone(&self) -> Box<dyn Fragmenter> {
        Box::new(self.clone())
    }
}

/// A `Fragmenter` decides where the fragments of a document start.
///
/// It is stateful: `start` is called once at the beginning of every pass,
/// then `is_new_fragment` once for every token, in document order.
///
/// Implementations must never signal a boundary on the first token of a pass,
/// nor on an alternate term (position increment of `0`).
pub trait Fragmenter: 'static + Send + Sync + FragmenterClone {
    /// Resets the fragmenter for a new pass over `text`.
    fn start(&mut self, text: &str);

    /// Returns true if a new fragment starts at `token`.
    fn is_new_fragment(&mut self, token: &Token) -> bool;
}

/// Cuts the document into windows of roughly `fragment_size` chars.
///
/// A new fragment starts at the first token whose end lies more than
/// `fragment_size` chars after the start of the current window.
#[derive(Clone, Debug)]
pub struct FixedWidthFragmenter {
    fragment_size: usize,
    window_start: Option<usize>,
}

impl FixedWidthFragmenter {
    /// Creates a new `FixedWidthFragmenter`.
    ///
    /// # Panics
    /// The method panics if `fragment_size` is 0.
    pub fn new(fragment_size: usize) -> FixedWidthFragmenter {
        assert!(fragment_size > 0, "Fragment size must be strictly greater than 0.");
        FixedWidthFragmenter {
            fragment_size,
            window_start: None,
        }
    }

    pub fn fragment_size(&self) -> usize {
        self.fragment_size
    }
}

impl Fragmenter for FixedWidthFragmenter {
    fn start(&mut self, _text: &str) {
        self.window_start = None;
    }

    fn is_new_fragment(&mut self, token: &Token) -> bool {
        let Some(window_start) = self.window_start else {
            self.window_start = Some(token.offset_from);
            return false;
        };
        if token.is_alternate() {
            return false;
        }
        if token.offset_to.saturating_sub(window_start) > self.fragment_size {
            self.window_start = Some(token.offset_from);
            return true;
        }
        false
    }
}

/// Starts a new fragment at every structural marker token, such as the
/// `&LINE-12;` line markers.
#[derive(Clone, Debug)]
pub struct LineMarkerFragmenter {
    marker: Regex,
    seen_token: bool,
}

impl LineMarkerFragmenter {
    /// Creates a fragmenter recognizing tokens whose whole text matches `pattern`.
    pub fn new(pattern: &str) -> crate::Result<LineMarkerFragmenter> {
        let marker = Regex::new(&format!("^(?:{pattern})$"))?;
        Ok(LineMarkerFragmenter {
            marker,
            seen_token: false,
        })
    }

    /// Returns true if `token` is a marker.
    pub fn is_marker(&self, token: &Token) -> bool {
        self.marker.is_match(&token.text)
    }
}

impl Default for LineMarkerFragmenter {
    fn default() -> LineMarkerFragmenter {
        LineMarkerFragmenter {
            marker: Regex::new(&format!("^(?:{DEFAULT_LINE_MARKER_PATTERN})$"))
                .expect("the default line marker pattern is valid"),
            seen_token: false,
        }
    }
}

impl Fragmenter for LineMarkerFragmenter {
    fn start(&mut self, _text: &str) {
        self.seen_token = false;
    }

    fn is_new_fragment(&mut self, token: &Token) -> bool {
        if !self.seen_token {
            self.seen_token = true;
            return false;
        }
        !token.is_alternate() && self.is_marker(token)
    }
}

/// Selects and configures the fragmenter strategy.
///
/// ```rust
/// use highlight_fragments::snippet::FragmenterConfig;
///
/// let config: FragmenterConfig =
///     serde_json::from_str(r#"{"type": "line_marker", "pattern": "<lb/>"}"#).unwrap();
/// assert!(config.build().is_ok());
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum FragmenterConfig {
    /// See [`FixedWidthFragmenter`].
    FixedWidth {
        /// Width of a fragment, in chars.
        fragment_size: usize,
    },
    /// See [`LineMarkerFragmenter`].
    LineMarker {
        /// Regular expression matching the whole text of a marker token.
        #[serde(default = "default_line_marker_pattern")]
        pattern: String,
    },
}

fn default_line_marker_pattern() -> String {
    DEFAULT_LINE_MARKER_PATTERN.to_string()
}

impl Default for FragmenterConfig {
    fn default() -> FragmenterConfig {
        FragmenterConfig::FixedWidth {
            fragment_size: DEFAULT_FRAGMENT_SIZE,
        }
    }
}

impl FragmenterConfig {
    /// Builds the configured fragmenter.
    pub fn build(&self) -> crate::Result<Box<dyn Fragmenter>> {
        match self {
            FragmenterConfig::FixedWidth { fragment_size: 0 } => Err(
                HighlightError::InvalidArgument("fragment_size must be greater than 0".to_string()),
            ),
            FragmenterConfig::FixedWidth { fragment_size } => {
                Ok(Box::new(FixedWidthFragmenter::new(*fragment_size)))
            }
            FragmenterConfig::LineMarker { pattern } => {
                Ok(Box::new(LineMarkerFragmenter::new(pattern)?))
            }
        }
    }
}

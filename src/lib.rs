//! # `highlight-fragments`
//!
//! Selects, scores and renders highlighted passages of a document for the
//! display of search results.
//!
//! Given the tokens of a document and a query-derived relevance signal, the
//! [`Highlighter`](snippet::Highlighter) returns the best, non-overlapping
//! fragments of the document, contiguous fragments being merged when that
//! improves their relevance, with the matching terms wrapped in highlight
//! markup.
//!
//! ```rust
//! use highlight_fragments::snippet::{FieldStatisticsCache, HighlightOptions, Highlighter};
//! use highlight_fragments::tokenizer::{LowerCaser, SimpleTokenizer, TextAnalyzer};
//!
//! # fn main() -> highlight_fragments::Result<()> {
//! let analyzer = TextAnalyzer::from(SimpleTokenizer).filter(LowerCaser);
//! let highlighter = Highlighter::new(HighlightOptions::default().set_tags("[", "]"))?;
//! let fragments = highlighter.highlight_terms(
//!     "body",
//!     "Of Man's first disobedience, and the fruit",
//!     &analyzer,
//!     vec![("fruit", 1.0)],
//!     FieldStatisticsCache::global(),
//! )?;
//! assert_eq!(fragments[0].text, "Of Man's first disobedience, and the [fruit]");
//! # Ok(())
//! # }
//! ```
//!
//! The crate is organized as follows:
//! - [`tokenizer`]: tokenizers, token filters and replayable token cursors,
//! - [`snippet`]: fragmentation, scoring, merging and ranking of fragments.

mod error;
pub mod snippet;
pub mod tokenizer;

pub use crate::error::HighlightError;

/// Relevance of a token or a fragment.
pub type Score = f32;

/// `highlight-fragments` result type.
pub type Result<T> = std::result::Result<T, HighlightError>;

//! Selects, scores and renders the best fragments of a document.
//!
//! Highlighting a document goes through the following steps:
//! - the text is cut into fragments by a [`Fragmenter`], and every fragment
//!   is scored by a [`FragmentScorer`] while its text is rendered, escaped,
//!   with the matching terms wrapped in highlight tags,
//! - contiguous fragments are merged as long as merging improves their score,
//! - the best fragments are returned, best first.
//!
//! ```rust
//! use highlight_fragments::snippet::{HighlightOptions, Highlighter, TermScorer};
//! use highlight_fragments::tokenizer::{CachingTokenStream, SimpleTokenizer, Tokenizer};
//!
//! # fn main() -> highlight_fragments::Result<()> {
//! let text = "The quick brown fox jumps";
//! let highlighter = Highlighter::new(HighlightOptions::default())?;
//! let mut cursor = CachingTokenStream::new(SimpleTokenizer.token_stream(text));
//! let mut scorer = TermScorer::new(vec![("quick", 1.0), ("fox", 1.0)]);
//! let fragments = highlighter.best_fragments(text, &mut cursor, &mut scorer)?;
//! assert_eq!(fragments.len(), 1);
//! assert_eq!(fragments[0].text, "The <b>quick</b> brown <b>fox</b> jumps");
//! assert_eq!(fragments[0].score, 2.0);
//! # Ok(())
//! # }
//! ```
mod builder;
mod encoder;
mod field_statistics;
mod fragment;
mod fragmenter;
mod merger;
mod options;
mod scorer;
mod top_fragments;

use log::debug;

pub use self::encoder::{HighlightFormatter, HtmlEncoder};
pub use self::field_statistics::{FieldStatistics, FieldStatisticsCache};
pub use self::fragment::FragmentRecord;
pub use self::fragmenter::{
    FixedWidthFragmenter, Fragmenter, FragmenterClone, FragmenterConfig, LineMarkerFragmenter,
    DEFAULT_FRAGMENT_SIZE, DEFAULT_LINE_MARKER_PATTERN,
};
pub use self::options::{
    HighlightOptions, DEFAULT_MAX_CHARS_TO_ANALYZE, DEFAULT_MAX_NUM_FRAGMENTS,
};
pub use self::scorer::{FragmentScorer, TermScorer};
use self::top_fragments::TopFragments;
use crate::tokenizer::{CachingTokenStream, TextAnalyzer, TokenCursor};
use crate::Score;

/// Highlights documents according to a set of [`HighlightOptions`].
///
/// A `Highlighter` holds no per-document state and can be shared between
/// threads.
pub struct Highlighter {
    options: HighlightOptions,
    formatter: HighlightFormatter,
    fragmenter: Box<dyn Fragmenter>,
}

impl Clone for Highlighter {
    fn clone(&self) -> Self {
        Highlighter {
            options: self.options.clone(),
            formatter: self.formatter.clone(),
            fragmenter: self.fragmenter.box_clone(),
        }
    }
}

impl Highlighter {
    /// Creates a `Highlighter`, or returns an error if the options are invalid.
    pub fn new(options: HighlightOptions) -> crate::Result<Highlighter> {
        options.validate()?;
        let fragmenter = options.fragmenter().build()?;
        let formatter = HighlightFormatter::new(options.pre_tag(), options.post_tag());
        Ok(Highlighter {
            options,
            formatter,
            fragmenter,
        })
    }

    pub fn options(&self) -> &HighlightOptions {
        &self.options
    }

    /// Returns the best fragments of `text`, best first.
    ///
    /// `cursor` must yield the tokens of `text`. It is read more than once,
    /// and so is the `scorer`: both are rewound before use.
    ///
    /// At most `max_num_fragments` fragments are returned, and only fragments
    /// with a positive score. A document without any token yields no fragment.
    /// An error reading the token stream aborts the highlighting of the
    /// document.
    pub fn best_fragments(
        &self,
        text: &str,
        cursor: &mut dyn TokenCursor,
        scorer: &mut dyn FragmentScorer,
    ) -> crate::Result<Vec<FragmentRecord>> {
        let mut fragmenter = self.fragmenter.box_clone();
        let builder::FragmentSet {
            buffer,
            mut fragments,
        } = builder::build_fragments(
            text,
            cursor,
            fragmenter.as_mut(),
            scorer,
            &self.formatter,
            self.options.max_chars_to_analyze(),
        )?;
        if fragments.is_empty() {
            return Ok(Vec::new());
        }
        fragments.retain(|fragment| fragment.score > 0.0);
        debug!("{} fragments with a positive score", fragments.len());
        if self.options.merge_contiguous_fragments() && fragments.len() > 1 {
            merger::merge_contiguous_fragments(&mut fragments, cursor, scorer)?;
        }
        let mut top_fragments = TopFragments::with_limit(self.options.max_num_fragments());
        for fragment in fragments {
            top_fragments.collect(fragment);
        }
        Ok(top_fragments
            .into_sorted_vec()
            .iter()
            .map(|fragment| fragment.to_record(&buffer))
            .collect())
    }

    /// Highlights the occurrences of weighted query `terms` in `text`.
    ///
    /// `text` is tokenized with `analyzer`, and the terms are scored with a
    /// [`TermScorer`]. If `field_statistics` holds statistics for `field`,
    /// term weights are scaled by their idf.
    pub fn highlight_terms<T: ToString>(
        &self,
        field: &str,
        text: &str,
        analyzer: &TextAnalyzer,
        terms: impl IntoIterator<Item = (T, Score)>,
        field_statistics: &FieldStatisticsCache,
    ) -> crate::Result<Vec<FragmentRecord>> {
        let mut scorer = TermScorer::new(terms);
        match field_statistics.get(field)? {
            Some(statistics) => scorer = scorer.with_field_statistics(&statistics),
            None => debug!("no statistics for field `{field}`, using raw term weights"),
        }
        let mut cursor = CachingTokenStream::new(analyzer.token_stream(text));
        self.best_fragments(text, &mut cursor, &mut scorer)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use maplit::hashmap;

    use super::*;
    use crate::tokenizer::{
        LowerCaser, PreTokenizedCursor, SimpleTokenizer, Token, Tokenizer,
    };
    use crate::HighlightError;

    fn highlight(options: HighlightOptions, text: &str, terms: Vec<(&str, Score)>) -> Vec<FragmentRecord> {
        let highlighter = Highlighter::new(options).unwrap();
        let mut cursor = CachingTokenStream::new(SimpleTokenizer.token_stream(text));
        let mut scorer = TermScorer::new(terms);
        highlighter
            .best_fragments(text, &mut cursor, &mut scorer)
            .unwrap()
    }

    #[test]
    fn test_best_fragments_are_ranked() {
        let options = HighlightOptions::default()
            .set_fragmenter(FragmenterConfig::FixedWidth { fragment_size: 10 })
            .set_merge_contiguous_fragments(false)
            .set_max_num_fragments(2);
        let fragments = highlight(
            options,
            "aaaa bbbb cccc dddd eeee ffff",
            vec![("aaaa", 1.0), ("cccc", 3.0), ("eeee", 2.0)],
        );
        let ranking: Vec<(usize, Score)> = fragments
            .iter()
            .map(|fragment| (fragment.sequence_number, fragment.score))
            .collect();
        assert_eq!(ranking, vec![(1, 3.0), (2, 2.0)]);
        assert_eq!(fragments[0].text, " <b>cccc</b> dddd");
        assert_eq!((fragments[0].start_offset, fragments[0].end_offset), (9, 19));
    }

    #[test]
    fn test_zero_score_fragments_do_not_bridge() {
        let options = HighlightOptions::default()
            .set_fragmenter(FragmenterConfig::FixedWidth { fragment_size: 10 });
        let fragments = highlight(
            options,
            "aaaa bbbb cccc dddd eeee ffff",
            vec![("aaaa", 1.0), ("eeee", 2.0)],
        );
        assert_eq!(fragments.len(), 2);
        assert_eq!(fragments[0].text, " <b>eeee</b> ffff");
        assert_eq!(fragments[1].text, "<b>aaaa</b> bbbb");
    }

    #[test]
    fn test_merged_fragments() {
        let options = HighlightOptions::default()
            .set_fragmenter(FragmenterConfig::FixedWidth { fragment_size: 10 });
        let fragments = highlight(
            options,
            "aaaa bbbb cccc dddd",
            vec![("bbbb", 0.4), ("cccc", 0.6)],
        );
        assert_eq!(fragments.len(), 1);
        assert_eq!(fragments[0].sequence_number, 0);
        assert!((fragments[0].score - 1.0).abs() < 1e-6);
        assert_eq!(fragments[0].text, "aaaa <b>bbbb</b> <b>cccc</b> dddd");
    }

    #[test]
    fn test_no_match() {
        let fragments = highlight(HighlightOptions::default(), "nothing to see", vec![("fox", 1.0)]);
        assert!(fragments.is_empty());
    }

    #[test]
    fn test_max_num_fragments_0() {
        let options = HighlightOptions::default().set_max_num_fragments(0);
        let fragments = highlight(options, "a fox", vec![("fox", 1.0)]);
        assert!(fragments.is_empty());
    }

    #[test]
    fn test_token_stream_error_is_surfaced() {
        let text = "one two";
        let tokens = vec![
            Token {
                offset_from: 4,
                offset_to: 7,
                position_increment: 1,
                text: "two".to_string(),
            },
            Token {
                offset_from: 0,
                offset_to: 3,
                position_increment: 1,
                text: "one".to_string(),
            },
        ];
        let highlighter = Highlighter::new(HighlightOptions::default()).unwrap();
        let mut cursor = PreTokenizedCursor::from_tokens(text, &tokens);
        let mut scorer = TermScorer::new(vec![("one", 1.0)]);
        let result = highlighter.best_fragments(text, &mut cursor, &mut scorer);
        assert!(matches!(result, Err(HighlightError::TokenStream(_))));
    }

    #[test]
    fn test_highlight_terms_with_field_statistics() {
        let analyzer = TextAnalyzer::from(SimpleTokenizer).filter(LowerCaser);
        let highlighter = Highlighter::new(
            HighlightOptions::default()
                .set_fragmenter(FragmenterConfig::FixedWidth { fragment_size: 10 })
                .set_merge_contiguous_fragments(false),
        )
        .unwrap();
        let cache = FieldStatisticsCache::default();
        let text = "Common word rare word";
        let terms: HashMap<&str, Score> = hashmap! { "common" => 1.0, "rare" => 1.0 };

        let fragments = highlighter
            .highlight_terms("body", text, &analyzer, terms.clone(), &cache)
            .unwrap();
        assert_eq!(fragments.len(), 2);
        assert_eq!(fragments[0].score, fragments[1].score);

        let corpus = "common common common common rare";
        cache
            .get_or_build("body", || {
                let mut cursor = CachingTokenStream::new(analyzer.token_stream(corpus));
                FieldStatistics::from_cursor(&mut cursor)
            })
            .unwrap();
        let fragments = highlighter
            .highlight_terms("body", text, &analyzer, terms, &cache)
            .unwrap();
        assert_eq!(fragments.len(), 2);
        assert_eq!(fragments[0].text, " word <b>rare</b>");
        assert!(fragments[0].score > fragments[1].score);
    }

    #[test]
    fn test_invalid_options() {
        let options = HighlightOptions::default()
            .set_fragmenter(FragmenterConfig::FixedWidth { fragment_size: 0 });
        assert!(matches!(
            Highlighter::new(options),
            Err(HighlightError::InvalidArgument(_))
        ));
    }
}

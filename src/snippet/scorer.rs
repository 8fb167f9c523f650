use rustc_hash::{FxHashMap, FxHashSet};

use super::FieldStatistics;
use crate::tokenizer::Token;
use crate::Score;

/// Computes the relevance of tokens and fragments for a given query.
///
/// The highlighter drives a `FragmentScorer` through the token stream of
/// a document, in order:
/// - `start_fragment` is called every time a new fragment opens,
/// - `token_score` is called once per token,
/// - `fragment_score` is read when the fragment is frozen.
///
/// Merging two fragments replays the stream from the start: `reset` must
/// bring the scorer back to the state it had before the first token.
pub trait FragmentScorer {
    /// Called when a new fragment opens.
    fn start_fragment(&mut self);

    /// Returns the score contributed by `token`. Never negative.
    fn token_score(&mut self, token: &Token) -> Score;

    /// Returns the score of the fragment opened by the last call to `start_fragment`.
    ///
    /// Alternate terms at the same position must not be counted twice unless
    /// they are distinct matches.
    fn fragment_score(&self) -> Score;

    /// Rewinds the scorer for a fresh pass over the token stream.
    fn reset(&mut self);
}

impl<S: FragmentScorer + ?Sized> FragmentScorer for Box<S> {
    fn start_fragment(&mut self) {
        (**self).start_fragment();
    }

    fn token_score(&mut self, token: &Token) -> Score {
        (**self).token_score(token)
    }

    fn fragment_score(&self) -> Score {
        (**self).fragment_score()
    }

    fn reset(&mut self) {
        (**self).reset();
    }
}

/// Scores fragments against a set of weighted query terms.
///
/// A token scores the weight of the query term it matches. The score of a
/// fragment is the sum of the weights of the distinct query terms it contains,
/// so that repeated occurrences, or alternates matching the same term, do not
/// inflate it.
///
/// ```rust
/// use highlight_fragments::snippet::{FragmentScorer, TermScorer};
/// use highlight_fragments::tokenizer::Token;
///
/// let mut scorer = TermScorer::new(vec![("fox", 1.0), ("dog", 0.5)]);
/// scorer.start_fragment();
/// let fox = Token { text: "fox".to_string(), ..Token::default() };
/// assert_eq!(scorer.token_score(&fox), 1.0);
/// assert_eq!(scorer.token_score(&fox), 1.0);
/// assert_eq!(scorer.fragment_score(), 1.0);
/// ```
#[derive(Clone, Debug)]
pub struct TermScorer {
    weights: FxHashMap<String, Score>,
    found_terms: FxHashSet<String>,
    fragment_score: Score,
}

impl TermScorer {
    /// Creates a scorer for the given `(term, weight)` pairs.
    ///
    /// Terms must be normalized the same way as the tokens they will be
    /// compared to. Negative weights are clamped to 0.
    pub fn new<T: ToString>(terms: impl IntoIterator<Item = (T, Score)>) -> TermScorer {
        let weights = terms
            .into_iter()
            .map(|(term, weight)| (term.to_string(), weight.max(0.0)))
            .collect();
        TermScorer {
            weights,
            found_terms: FxHashSet::default(),
            fragment_score: 0.0,
        }
    }

    /// Multiplies the weight of every term by its idf in the field statistics,
    /// so that rare terms weigh more than common ones.
    #[must_use]
    pub fn with_field_statistics(mut self, field_statistics: &FieldStatistics) -> TermScorer {
        for (term, weight) in self.weights.iter_mut() {
            *weight *= field_statistics.idf(term);
        }
        self
    }

    /// Returns the weight of `term`, or `None` if it is not a query term.
    pub fn weight(&self, term: &str) -> Option<Score> {
        self.weights.get(term).copied()
    }
}

impl FragmentScorer for TermScorer {
    fn start_fragment(&mut self) {
        self.found_terms.clear();
        self.fragment_score = 0.0;
    }

    fn token_score(&mut self, token: &Token) -> Score {
        let Some(weight) = self.weight(&token.text) else {
            return 0.0;
        };
        if !self.found_terms.contains(&token.text) {
            self.found_terms.insert(token.text.clone());
            self.fragment_score += weight;
        }
        weight
    }

    fn fragment_score(&self) -> Score {
        self.fragment_score
    }

    fn reset(&mut self) {
        self.start_fragment();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tokenizer::{CachingTokenStream, SimpleTokenizer, TokenCursor, Tokenizer};

    fn token(text: &str, position_increment: usize) -> Token {
        Token {
            offset_from: 0,
            offset_to: text.chars().count(),
            position_increment,
            text: text.to_string(),
        }
    }

    #[test]
    fn test_term_scorer_counts_distinct_terms() {
        let mut scorer = TermScorer::new(vec![("quick", 1.0), ("fox", 2.0)]);
        scorer.start_fragment();
        assert_eq!(scorer.token_score(&token("the", 1)), 0.0);
        assert_eq!(scorer.token_score(&token("quick", 1)), 1.0);
        assert_eq!(scorer.token_score(&token("fox", 1)), 2.0);
        assert_eq!(scorer.token_score(&token("fox", 1)), 2.0);
        assert_eq!(scorer.fragment_score(), 3.0);
        scorer.start_fragment();
        assert_eq!(scorer.fragment_score(), 0.0);
    }

    #[test]
    fn test_term_scorer_alternates() {
        let mut scorer = TermScorer::new(vec![("fast", 1.0), ("quick", 1.0), ("rapid", 0.5)]);
        scorer.start_fragment();
        scorer.token_score(&token("quick", 1));
        scorer.token_score(&token("quick", 0));
        assert_eq!(scorer.fragment_score(), 1.0);
        // distinct matches at the same position both count.
        scorer.token_score(&token("rapid", 0));
        assert_eq!(scorer.fragment_score(), 1.5);
    }

    #[test]
    fn test_term_scorer_clamps_negative_weights() {
        let mut scorer = TermScorer::new(vec![("fox", -3.0)]);
        scorer.start_fragment();
        assert_eq!(scorer.token_score(&token("fox", 1)), 0.0);
        assert_eq!(scorer.fragment_score(), 0.0);
    }

    #[test]
    fn test_term_scorer_with_field_statistics() {
        let mut cursor = CachingTokenStream::new(SimpleTokenizer.token_stream("a a a a b"));
        let statistics = FieldStatistics::from_cursor(&mut cursor).unwrap();
        let scorer = TermScorer::new(vec![("a", 1.0), ("b", 1.0)])
            .with_field_statistics(&statistics);
        assert!(scorer.weight("b").unwrap() > scorer.weight("a").unwrap());
        assert!(scorer.weight("a").unwrap() > 0.0);
        cursor.reset();
        assert!(cursor.advance().unwrap());
    }
}

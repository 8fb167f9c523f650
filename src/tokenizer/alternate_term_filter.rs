//! # Example
//! ```rust
//! use highlight_fragments::tokenizer::*;
//!
//! let tokenizer = TextAnalyzer::from(SimpleTokenizer)
//!     .filter(AlternateTermFilter::new(vec![("fox", vec!["vixen"])]));
//!
//! let mut stream = tokenizer.token_stream("crafty fox");
//! assert_eq!(stream.next().unwrap().text, "crafty");
//! assert_eq!(stream.next().unwrap().text, "fox");
//! let alternate = stream.next().unwrap();
//! assert_eq!(alternate.text, "vixen");
//! assert_eq!(alternate.position_increment, 0);
//! assert!(stream.next().is_none());
//! ```
use std::sync::Arc;

use rustc_hash::FxHashMap;

use super::{Token, TokenFilter, TokenStream};
use crate::tokenizer::BoxTokenStream;

/// `TokenFilter` that injects alternate terms (synonyms, normalized spellings...)
/// right after the token they stand for.
///
/// Alternates share the offsets of the original token and carry a position
/// increment of `0`.
#[derive(Clone)]
pub struct AlternateTermFilter {
    alternates: Arc<FxHashMap<String, Vec<String>>>,
}

impl AlternateTermFilter {
    /// Creates an `AlternateTermFilter` from a list of `(term, alternates)` pairs.
    pub fn new<T, A>(entries: impl IntoIterator<Item = (T, Vec<A>)>) -> AlternateTermFilter
    where
        T: ToString,
        A: ToString,
    {
        let alternates = entries
            .into_iter()
            .map(|(term, alternates)| {
                let alternates = alternates.iter().map(ToString::to_string).collect();
                (term.to_string(), alternates)
            })
            .collect();
        AlternateTermFilter {
            alternates: Arc::new(alternates),
        }
    }
}

impl TokenFilter for AlternateTermFilter {
    fn transform<'a>(&self, token_stream: BoxTokenStream<'a>) -> BoxTokenStream<'a> {
        BoxTokenStream::from(AlternateTermFilterStream {
            alternates: self.alternates.clone(),
            tail: token_stream,
            pending: Vec::new(),
            token: Token::default(),
        })
    }
}

pub struct AlternateTermFilterStream<'a> {
    alternates: Arc<FxHashMap<String, Vec<String>>>,
    tail: BoxTokenStream<'a>,
    // stored in reverse order, so that `pop` yields them in declaration order.
    pending: Vec<String>,
    token: Token,
}

impl<'a> TokenStream for AlternateTermFilterStream<'a> {
    fn advance(&mut self) -> bool {
        if let Some(alternate) = self.pending.pop() {
            self.token.text = alternate;
            self.token.position_increment = 0;
            return true;
        }
        if !self.tail.advance() {
            return false;
        }
        self.token.clone_from(self.tail.token());
        if let Some(alternates) = self.alternates.get(&self.token.text) {
            self.pending.extend(alternates.iter().rev().cloned());
        }
        true
    }

    fn token(&self) -> &Token {
        &self.token
    }

    fn token_mut(&mut self) -> &mut Token {
        &mut self.token
    }
}

#[cfg(test)]
mod tests {
    use super::AlternateTermFilter;
    use crate::tokenizer::tests::assert_token;
    use crate::tokenizer::{SimpleTokenizer, TextAnalyzer, Token, TokenStream};

    #[test]
    fn test_alternate_term_filter() {
        let analyzer = TextAnalyzer::from(SimpleTokenizer).filter(AlternateTermFilter::new(vec![
            ("quick", vec!["fast", "rapid"]),
        ]));
        let mut token_stream = analyzer.token_stream("the quick fox");
        let mut tokens: Vec<Token> = vec![];
        token_stream.process(&mut |token: &Token| tokens.push(token.clone()));
        assert_eq!(tokens.len(), 5);
        assert_token(&tokens[1], "quick", 4, 9);
        assert_token(&tokens[2], "fast", 4, 9);
        assert_token(&tokens[3], "rapid", 4, 9);
        assert_eq!(tokens[1].position_increment, 1);
        assert_eq!(tokens[2].position_increment, 0);
        assert_eq!(tokens[3].position_increment, 0);
        assert_eq!(tokens[4].position_increment, 1);
    }
}

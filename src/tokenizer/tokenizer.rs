// The tokenizer module contains all of the tools used to process
// text in `highlight-fragments`.
use highlight_tokenizer_api::{BoxTokenFilter, BoxTokenStream, TokenFilter, Tokenizer};

/// `TextAnalyzer` tokenizes an input text into tokens and modifies the resulting `TokenStream`.
///
/// It simply wraps a `Tokenizer` and a list of `TokenFilter` that are applied sequentially.
pub struct TextAnalyzer {
    tokenizer: Box<dyn Tokenizer>,
    token_filters: Vec<BoxTokenFilter>,
}

impl<T: Tokenizer> From<T> for TextAnalyzer {
    fn from(tokenizer: T) -> Self {
        TextAnalyzer::new(tokenizer, Vec::new())
    }
}

impl TextAnalyzer {
    /// Creates a new `TextAnalyzer` given a tokenizer and a vector of `BoxTokenFilter`.
    ///
    /// When creating a `TextAnalyzer` from a `Tokenizer` alone, prefer using
    /// `TextAnalyzer::from(tokenizer)`.
    pub fn new<T: Tokenizer>(tokenizer: T, token_filters: Vec<BoxTokenFilter>) -> TextAnalyzer {
        TextAnalyzer {
            tokenizer: Box::new(tokenizer),
            token_filters,
        }
    }

    /// Appends a token filter to the current tokenizer.
    ///
    /// The method consumes the current `TextAnalyzer` and returns a
    /// new one.
    ///
    /// # Example
    ///
    /// ```rust
    /// use highlight_fragments::tokenizer::*;
    ///
    /// let analyzer = TextAnalyzer::from(SimpleTokenizer)
    ///     .filter(LowerCaser)
    ///     .filter(AlternateTermFilter::new(vec![("fox", vec!["vixen"])]));
    /// ```
    #[must_use]
    pub fn filter<F: Into<BoxTokenFilter>>(mut self, token_filter: F) -> Self {
        self.token_filters.push(token_filter.into());
        self
    }

    /// Creates a token stream for a given `str`.
    pub fn token_stream<'a>(&self, text: &'a str) -> BoxTokenStream<'a> {
        let mut token_stream = self.tokenizer.token_stream(text);
        for token_filter in &self.token_filters {
            token_stream = token_filter.transform(token_stream);
        }
        token_stream
    }
}

impl Clone for TextAnalyzer {
    fn clone(&self) -> Self {
        TextAnalyzer {
            tokenizer: self.tokenizer.box_clone(),
            token_filters: self
                .token_filters
                .iter()
                .map(|token_filter| token_filter.box_clone())
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tokenizer::{AlternateTermFilter, LowerCaser, SimpleTokenizer, Token, TokenStream};

    #[test]
    fn test_text_analyzer_applies_filters_in_order() {
        let analyzer = TextAnalyzer::from(SimpleTokenizer)
            .filter(LowerCaser)
            .filter(AlternateTermFilter::new(vec![("fox", vec!["vixen"])]));
        let mut token_stream = analyzer.clone().token_stream("Crafty FOX");
        let mut tokens: Vec<Token> = vec![];
        token_stream.process(&mut |token: &Token| tokens.push(token.clone()));
        let texts: Vec<&str> = tokens.iter().map(|token| token.text.as_str()).collect();
        assert_eq!(texts, vec!["crafty", "fox", "vixen"]);
    }
}

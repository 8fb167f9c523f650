use regex::Regex;

use super::{BoxTokenStream, Token, TokenStream, Tokenizer};
use crate::HighlightError;

/// Tokenize the text by using a regex pattern.
/// Each match of the regex emits a distinct token, empty tokens will not be emitted.
///
/// This is the tokenizer of choice for texts carrying structural markers, since a pattern such
/// as `&LINE-[A-Za-z0-9]+;|\w+` emits the markers as tokens of their own, ready for the
/// [`LineMarkerFragmenter`](crate::snippet::LineMarkerFragmenter).
///
/// Example: `` 'aaa' bbb 'ccc' 'ddd' `` with the pattern `` '(?:\w*)' `` will be tokenized as
/// followed:
///
/// | Term     | 'aaa' | 'ccc'  | 'ddd' |
/// |----------|-------|--------|-------|
/// | Offsets  |0,5    | 10,15  | 16,21 |
///
/// # Example
///
/// ```rust
/// use highlight_fragments::tokenizer::*;
///
/// let tokenizer = RegexTokenizer::new(r"'(?:\w*)'").unwrap();
/// let mut stream = tokenizer.token_stream("'aaa' bbb 'ccc' 'ddd'");
/// {
///     let token = stream.next().unwrap();
///     assert_eq!(token.text, "'aaa'");
///     assert_eq!(token.offset_from, 0);
///     assert_eq!(token.offset_to, 5);
/// }
/// {
///     let token = stream.next().unwrap();
///     assert_eq!(token.text, "'ccc'");
///     assert_eq!(token.offset_from, 10);
///     assert_eq!(token.offset_to, 15);
/// }
/// {
///     let token = stream.next().unwrap();
///     assert_eq!(token.text, "'ddd'");
///     assert_eq!(token.offset_from, 16);
///     assert_eq!(token.offset_to, 21);
/// }
/// assert!(stream.next().is_none());
/// ```
#[derive(Clone)]
pub struct RegexTokenizer {
    regex: Regex,
}

impl RegexTokenizer {
    /// Creates a new RegexTokenizer.
    pub fn new(regex_pattern: &str) -> crate::Result<RegexTokenizer> {
        Regex::new(regex_pattern)
            .map_err(|_| HighlightError::InvalidArgument(regex_pattern.to_owned()))
            .map(|regex| Self { regex })
    }
}

impl Tokenizer for RegexTokenizer {
    fn token_stream<'a>(&self, text: &'a str) -> BoxTokenStream<'a> {
        BoxTokenStream::from(RegexTokenStream {
            regex: self.regex.clone(),
            text,
            token: Token::default(),
            char_cursor: 0,
        })
    }
}

pub struct RegexTokenStream<'a> {
    regex: Regex,
    text: &'a str,
    token: Token,
    char_cursor: usize,
}

impl<'a> TokenStream for RegexTokenStream<'a> {
    fn advance(&mut self) -> bool {
        let Some(regex_match) = self.regex.find(self.text) else {
            return false;
        };
        if regex_match.as_str().is_empty() {
            return false;
        }
        self.token.text.clear();
        self.token.text.push_str(regex_match.as_str());

        // regex offsets are bytes, tokens are expressed in chars.
        self.char_cursor += self.text[..regex_match.start()].chars().count();
        self.token.offset_from = self.char_cursor;
        self.char_cursor += regex_match.as_str().chars().count();
        self.token.offset_to = self.char_cursor;
        self.token.position_increment = 1;

        self.text = &self.text[regex_match.end()..];
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
    use crate::tokenizer::regex_tokenizer::RegexTokenizer;
    use crate::tokenizer::tests::assert_token;
    use crate::tokenizer::{TextAnalyzer, Token, TokenStream};

    #[test]
    fn test_regex_tokenizer() {
        let tokens = token_stream_helper("'aaa' bbb 'ccc' 'ddd'", r"'(?:\w*)'");
        assert_eq!(tokens.len(), 3);
        assert_token(&tokens[0], "'aaa'", 0, 5);
        assert_token(&tokens[1], "'ccc'", 10, 15);
        assert_token(&tokens[2], "'ddd'", 16, 21);
    }

    #[test]
    fn test_regex_tokenizer_line_markers() {
        let tokens = token_stream_helper(
            "&LINE-1;in Alexandria &LINE-2;year",
            r"&LINE-[A-Za-z0-9]+;|\w+",
        );
        let texts: Vec<&str> = tokens.iter().map(|token| token.text.as_str()).collect();
        assert_eq!(texts, vec!["&LINE-1;", "in", "Alexandria", "&LINE-2;", "year"]);
        assert_token(&tokens[2], "Alexandria", 11, 21);
        assert_token(&tokens[3], "&LINE-2;", 22, 30);
        assert_token(&tokens[4], "year", 30, 34);
    }

    #[test]
    fn test_regex_tokenizer_offsets_are_chars() {
        let tokens = token_stream_helper("Русский текст", r"\w+");
        assert_token(&tokens[0], "Русский", 0, 7);
        assert_token(&tokens[1], "текст", 8, 13);
    }

    #[test]
    fn test_regexp_tokenizer_no_match_on_input_data() {
        let tokens = token_stream_helper("aaa", r"'(?:\w*)'");
        assert_eq!(tokens.len(), 0);
    }

    #[test]
    fn test_regexp_tokenizer_no_input_data() {
        let tokens = token_stream_helper("", r"'(?:\w*)'");
        assert_eq!(tokens.len(), 0);
    }

    #[test]
    fn test_regexp_tokenizer_error_on_invalid_regex() {
        let tokenizer = RegexTokenizer::new(r"\@(");
        assert!(tokenizer.is_err());
        assert_eq!(
            tokenizer.err().unwrap().to_string(),
            "An invalid argument was passed: '\\@('"
        );
    }

    fn token_stream_helper(text: &str, pattern: &str) -> Vec<Token> {
        let r = RegexTokenizer::new(pattern).unwrap();
        let a = TextAnalyzer::from(r);
        let mut token_stream = a.token_stream(text);
        let mut tokens: Vec<Token> = vec![];
        let mut add_token = |token: &Token| {
            tokens.push(token.clone());
        };
        token_stream.process(&mut add_token);
        tokens
    }
}

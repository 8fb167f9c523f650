//! Tokenizers are in charge of chopping text into a stream of tokens
//! ready for highlighting.
//!
//! Offsets of the emitted tokens are expressed in chars, not bytes, and
//! alternate terms (synonyms...) are flagged with a position increment of `0`.
//!
//! By default, `highlight-fragments` offers the following building blocks:
//!
//! ## `SimpleTokenizer`
//!
//! Chops the text on punctuation and whitespaces.
//!
//! ## `RegexTokenizer`
//!
//! Each match of a regular expression is a token. This is typically used to
//! keep structural markers such as `&LINE-12;` as tokens of their own.
//!
//! ## Filters
//!
//! `LowerCaser` lowercases tokens, `AlternateTermFilter` injects
//! same-position alternates.
//!
//! # Replay
//!
//! The highlighter consumes tokens through the [`TokenCursor`] trait, which
//! can be rewound. Wrap any token stream in a [`CachingTokenStream`] or use a
//! [`PreTokenizedCursor`] over externally supplied tokens.
//!
//! ```rust
//! use highlight_fragments::tokenizer::*;
//!
//! let analyzer = TextAnalyzer::from(SimpleTokenizer).filter(LowerCaser);
//! let mut cursor = CachingTokenStream::new(analyzer.token_stream("Hello, happy tax payer"));
//! assert!(cursor.advance().unwrap());
//! assert_eq!(cursor.token().text, "hello");
//! cursor.reset();
//! assert!(cursor.advance().unwrap());
//! assert_eq!(cursor.token().offset_to, 5);
//! ```
mod alternate_term_filter;
mod caching_token_stream;
mod lower_caser;
mod regex_tokenizer;
mod simple_tokenizer;
mod tokenized_string;
#[allow(clippy::module_inception)]
mod tokenizer;

pub use highlight_tokenizer_api::{
    BoxTokenFilter, BoxTokenStream, Token, TokenFilter, TokenStream, Tokenizer,
};

pub use self::alternate_term_filter::AlternateTermFilter;
pub use self::caching_token_stream::{CachingTokenStream, TokenCursor};
pub use self::lower_caser::LowerCaser;
pub use self::regex_tokenizer::RegexTokenizer;
pub use self::simple_tokenizer::SimpleTokenizer;
pub(crate) use self::tokenized_string::check_token;
pub use self::tokenized_string::{PreTokenizedCursor, PreTokenizedString};
pub use self::tokenizer::TextAnalyzer;

use super::{BoxTokenStream, Token, TokenStream};

/// A replayable, ordered sequence of tokens.
///
/// Highlighting reads the token stream of a document more than once: the
/// fragments are built on a first pass, and every merge candidate is
/// re-scored by replaying the stream from its start.
pub trait TokenCursor {
    /// Advance to the next token.
    ///
    /// Returns `Ok(false)` if there are no other tokens, and an error if the
    /// underlying stream could not be read.
    fn advance(&mut self) -> crate::Result<bool>;

    /// Returns a reference to the current token.
    ///
    /// Must only be called after a call to `advance` returned `Ok(true)`.
    fn token(&self) -> &Token;

    /// Rewinds the cursor to the start of the stream.
    fn reset(&mut self);
}

/// Wraps a [`TokenStream`] and caches the tokens it yields, so that the
/// stream can be replayed after a call to [`TokenCursor::reset`].
///
/// The wrapped stream is only consumed on demand: a first pass stopping
/// early leaves the rest of the stream untouched until a later pass asks
/// for it.
pub struct CachingTokenStream<'a> {
    tail: Option<BoxTokenStream<'a>>,
    cache: Vec<Token>,
    // index of the next token to be returned.
    next_token: usize,
}

impl<'a> CachingTokenStream<'a> {
    /// Wraps a token stream.
    pub fn new(token_stream: BoxTokenStream<'a>) -> CachingTokenStream<'a> {
        CachingTokenStream {
            tail: Some(token_stream),
            cache: Vec::new(),
            next_token: 0,
        }
    }

    /// Number of tokens pulled from the wrapped stream so far.
    pub fn num_cached_tokens(&self) -> usize {
        self.cache.len()
    }
}

impl<'a> TokenCursor for CachingTokenStream<'a> {
    fn advance(&mut self) -> crate::Result<bool> {
        if self.next_token < self.cache.len() {
            self.next_token += 1;
            return Ok(true);
        }
        let Some(tail) = self.tail.as_mut() else {
            return Ok(false);
        };
        if tail.advance() {
            self.cache.push(tail.token().clone());
            self.next_token += 1;
            Ok(true)
        } else {
            self.tail = None;
            Ok(false)
        }
    }

    fn token(&self) -> &Token {
        &self.cache[self.next_token - 1]
    }

    fn reset(&mut self) {
        self.next_token = 0;
    }
}

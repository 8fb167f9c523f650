use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use super::{Token, TokenCursor};
use crate::HighlightError;

/// Struct representing pre-tokenized text
#[derive(Debug, Clone, Serialize, Deserialize, Eq, PartialEq)]
pub struct PreTokenizedString {
    /// Original text
    pub text: String,
    /// Tokens derived from the text
    pub tokens: Vec<Token>,
}

impl Ord for PreTokenizedString {
    fn cmp(&self, other: &Self) -> Ordering {
        self.text.cmp(&other.text)
    }
}

impl PartialOrd for PreTokenizedString {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// [`TokenCursor`] over externally supplied tokens.
///
/// Tokens are validated as they are read: offsets must fall within the text
/// and start offsets must never decrease. A token breaking these rules aborts
/// the read with a [`HighlightError::TokenStream`] error.
pub struct PreTokenizedCursor<'a> {
    tokens: &'a [Token],
    num_chars: usize,
    // index of the next token to be returned.
    next_token: usize,
}

impl<'a> PreTokenizedCursor<'a> {
    /// Creates a cursor over the tokens of a `PreTokenizedString`.
    pub fn new(tokenized_string: &'a PreTokenizedString) -> PreTokenizedCursor<'a> {
        PreTokenizedCursor::from_tokens(&tokenized_string.text, &tokenized_string.tokens)
    }

    /// Creates a cursor over tokens derived from `text`.
    pub fn from_tokens(text: &str, tokens: &'a [Token]) -> PreTokenizedCursor<'a> {
        PreTokenizedCursor {
            tokens,
            num_chars: text.chars().count(),
            next_token: 0,
        }
    }

    fn check_token_at(&self, ordinal: usize) -> crate::Result<()> {
        let previous_start = ordinal
            .checked_sub(1)
            .map(|i| self.tokens[i].offset_from)
            .unwrap_or(0);
        check_token(ordinal, &self.tokens[ordinal], self.num_chars, previous_start)
    }
}

/// Checks that `token` lies within a text of `num_chars` chars and does not
/// start before `previous_start`, the start of the token read before it.
pub(crate) fn check_token(
    ordinal: usize,
    token: &Token,
    num_chars: usize,
    previous_start: usize,
) -> crate::Result<()> {
    if token.offset_from > token.offset_to || token.offset_to > num_chars {
        return Err(HighlightError::TokenStream(format!(
            "token #{ordinal} `{}` has offsets {}..{} outside of a text of {num_chars} chars",
            token.text, token.offset_from, token.offset_to
        )));
    }
    if token.offset_from < previous_start {
        return Err(HighlightError::TokenStream(format!(
            "token #{ordinal} `{}` starts at {}, before its predecessor at {previous_start}",
            token.text, token.offset_from
        )));
    }
    Ok(())
}

impl<'a> TokenCursor for PreTokenizedCursor<'a> {
    fn advance(&mut self) -> crate::Result<bool> {
        if self.next_token >= self.tokens.len() {
            return Ok(false);
        }
        self.check_token_at(self.next_token)?;
        self.next_token += 1;
        Ok(true)
    }

    fn token(&self) -> &Token {
        &self.tokens[self.next_token - 1]
    }

    fn reset(&mut self) {
        self.next_token = 0;
    }
}

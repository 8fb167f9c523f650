use serde::{Deserialize, Serialize};

use crate::tokenizer::Token;
use crate::Score;

/// Reference to a token of the stream, stable across replays.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct TokenRef {
    /// Rank of the token in the token stream.
    pub ordinal: usize,
    pub offset_from: usize,
    pub offset_to: usize,
}

impl TokenRef {
    pub fn new(ordinal: usize, token: &Token) -> TokenRef {
        TokenRef {
            ordinal,
            offset_from: token.offset_from,
            offset_to: token.offset_to,
        }
    }
}

/// A scored candidate snippet, as tracked while highlighting a document.
///
/// The rendered text of all of the fragments of a document lives in a
/// single shared buffer: a fragment only knows its `[text_start, text_end)`
/// window in that buffer, which is what makes merging two adjacent fragments
/// free.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct Fragment {
    pub sequence_number: usize,
    pub first_token: Option<TokenRef>,
    pub last_token: Option<TokenRef>,
    pub text_start: usize,
    pub text_end: usize,
    /// Char offsets of the document span rendered in this fragment.
    pub doc_start: usize,
    pub doc_end: usize,
    pub score: Score,
}

impl Fragment {
    pub fn new(sequence_number: usize, text_start: usize, doc_start: usize) -> Fragment {
        Fragment {
            sequence_number,
            first_token: None,
            last_token: None,
            text_start,
            text_end: text_start,
            doc_start,
            doc_end: doc_start,
            score: 0.0,
        }
    }

    pub fn add_token(&mut self, ordinal: usize, token: &Token) {
        let token_ref = TokenRef::new(ordinal, token);
        self.first_token.get_or_insert(token_ref);
        self.last_token = Some(token_ref);
    }

    pub fn freeze(&mut self, score: Score, text_end: usize, doc_end: usize) {
        self.score = score.max(0.0);
        self.text_end = text_end;
        self.doc_end = doc_end;
    }

    /// Returns true if `self` directly follows `previous`: they are adjacent
    /// in the rendered text, and the last token of `previous` ends before the
    /// first token of `self` starts.
    pub fn follows(&self, previous: &Fragment) -> bool {
        let (Some(last), Some(first)) = (previous.last_token, self.first_token) else {
            return false;
        };
        previous.text_end == self.text_start && last.offset_to <= first.offset_from
    }

    /// Absorbs `next`, which must follow `self`.
    pub fn merge(&mut self, next: Fragment, score: Score) {
        debug_assert!(next.follows(self));
        self.text_end = next.text_end;
        self.doc_end = next.doc_end;
        self.last_token = next.last_token;
        self.score = score;
    }

    pub fn to_record(&self, buffer: &str) -> FragmentRecord {
        FragmentRecord {
            sequence_number: self.sequence_number,
            score: self.score,
            text: buffer[self.text_start..self.text_end].to_string(),
            start_offset: self.doc_start,
            end_offset: self.doc_end,
        }
    }
}

/// A highlighted fragment, as returned by the [`Highlighter`](super::Highlighter).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FragmentRecord {
    /// Rank of the fragment in document order, at creation time.
    pub sequence_number: usize,
    /// Relevance of the fragment, as computed by the fragment scorer.
    pub score: Score,
    /// Rendered text: escaped, with highlighted terms wrapped in tags.
    pub text: String,
    /// Char offset of the start of the document span rendered in `text`.
    pub start_offset: usize,
    /// Char offset of the end of the document span rendered in `text`.
    pub end_offset: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn token(offset_from: usize, offset_to: usize) -> Token {
        Token {
            offset_from,
            offset_to,
            position_increment: 1,
            text: String::new(),
        }
    }

    fn fragment(
        sequence_number: usize,
        tokens: &[(usize, Token)],
        text: (usize, usize),
    ) -> Fragment {
        let mut fragment = Fragment::new(sequence_number, text.0, 0);
        for (ordinal, token) in tokens {
            fragment.add_token(*ordinal, token);
        }
        fragment.freeze(1.0, text.1, 0);
        fragment
    }

    #[test]
    fn test_follows() {
        let first = fragment(0, &[(0, token(0, 3)), (1, token(4, 7))], (0, 7));
        let second = fragment(1, &[(2, token(8, 11))], (7, 11));
        let detached = fragment(2, &[(3, token(12, 14))], (12, 14));
        assert!(second.follows(&first));
        assert!(!first.follows(&second));
        assert!(!detached.follows(&second));
    }

    #[test]
    fn test_follows_requires_ordered_tokens() {
        let first = fragment(0, &[(0, token(0, 5))], (0, 5));
        let overlapping = fragment(1, &[(1, token(3, 6))], (5, 6));
        assert!(!overlapping.follows(&first));
    }

    #[test]
    fn test_merge() {
        let mut first = fragment(0, &[(0, token(0, 3))], (0, 3));
        let second = fragment(1, &[(1, token(4, 7)), (2, token(8, 9))], (3, 9));
        first.merge(second, 2.5);
        assert_eq!(first.sequence_number, 0);
        assert_eq!(first.text_end, 9);
        assert_eq!(first.last_token.map(|token| token.ordinal), Some(2));
        assert_eq!(first.score, 2.5);
        let record = first.to_record("abcdefghi");
        assert_eq!(record.text, "abcdefghi");
    }

    #[test]
    fn test_freeze_never_negative() {
        let mut fragment = Fragment::new(0, 0, 0);
        fragment.freeze(-1.0, 0, 0);
        assert_eq!(fragment.score, 0.0);
    }
}

use std::iter::Enumerate;
use std::str::Chars;

use super::{BoxTokenStream, Token, TokenStream, Tokenizer};

/// Tokenize the text by splitting on whitespaces and punctuation.
///
/// Offsets are expressed in chars.
#[derive(Clone, Debug, Default)]
pub struct SimpleTokenizer;

pub struct SimpleTokenStream<'a> {
    chars: Enumerate<Chars<'a>>,
    token: Token,
}

impl Tokenizer for SimpleTokenizer {
    fn token_stream<'a>(&self, text: &'a str) -> BoxTokenStream<'a> {
        BoxTokenStream::from(SimpleTokenStream {
            chars: text.chars().enumerate(),
            token: Token::default(),
        })
    }
}

impl<'a> SimpleTokenStream<'a> {
    // search for the end of the current token, pushing its chars into the token text.
    fn search_token_end(&mut self, offset_from: usize) -> usize {
        let mut offset_to = offset_from + 1;
        for (offset, c) in self.chars.by_ref() {
            if !c.is_alphanumeric() {
                break;
            }
            self.token.text.push(c);
            offset_to = offset + 1;
        }
        offset_to
    }
}

impl<'a> TokenStream for SimpleTokenStream<'a> {
    fn advance(&mut self) -> bool {
        self.token.text.clear();
        self.token.position_increment = 1;
        while let Some((offset_from, c)) = self.chars.next() {
            if c.is_alphanumeric() {
                self.token.text.push(c);
                self.token.offset_from = offset_from;
                self.token.offset_to = self.search_token_end(offset_from);
                return true;
            }
        }
        false
    }

    fn token(&self) -> &Token {
        &self.token
    }

    fn token_mut(&mut self) -> &mut Token {
        &mut self.token
    }
}

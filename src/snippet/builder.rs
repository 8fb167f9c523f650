use log::debug;

use super::encoder::{HighlightFormatter, HtmlEncoder};
use super::fragment::Fragment;
use super::{FragmentScorer, Fragmenter};
use crate::tokenizer::{check_token, Token, TokenCursor};
use crate::Score;

/// Fragments of a document, together with the buffer holding their
/// rendered text.
#[derive(Debug, Default)]
pub(crate) struct FragmentSet {
    pub buffer: String,
    /// Fragments, in document order.
    pub fragments: Vec<Fragment>,
}

/// Tokens overlapping each other, or sharing a position, rendered as a
/// single span.
#[derive(Debug)]
struct PendingGroup {
    start: usize,
    end: usize,
    score: Score,
}

impl PendingGroup {
    fn new(token: &Token, score: Score) -> PendingGroup {
        PendingGroup {
            start: token.offset_from,
            end: token.offset_to,
            score,
        }
    }

    fn accepts(&self, token: &Token) -> bool {
        token.is_alternate() || token.offset_from < self.end
    }

    fn add(&mut self, token: &Token, score: Score) {
        self.start = self.start.min(token.offset_from);
        self.end = self.end.max(token.offset_to);
        self.score += score;
    }
}

struct FragmentBuilder<'a> {
    chars: Vec<char>,
    formatter: &'a HighlightFormatter,
    buffer: String,
    fragments: Vec<Fragment>,
    current: Fragment,
    pending: Option<PendingGroup>,
    // char offset up to which the document has been rendered.
    flushed_to: usize,
}

impl<'a> FragmentBuilder<'a> {
    fn new(text: &str, formatter: &'a HighlightFormatter) -> FragmentBuilder<'a> {
        FragmentBuilder {
            chars: text.chars().collect(),
            formatter,
            buffer: String::with_capacity(text.len()),
            fragments: Vec::new(),
            current: Fragment::new(0, 0, 0),
            pending: None,
            flushed_to: 0,
        }
    }

    fn joins_pending_group(&self, token: &Token) -> bool {
        self.pending
            .as_ref()
            .map(|group| group.accepts(token))
            .unwrap_or(false)
    }

    fn append_untouched(&mut self, end: usize) {
        if end > self.flushed_to {
            HtmlEncoder::encode_into(&self.chars[self.flushed_to..end], &mut self.buffer);
            self.flushed_to = end;
        }
    }

    fn flush_pending(&mut self) {
        let Some(group) = self.pending.take() else {
            return;
        };
        let start = group.start.max(self.flushed_to);
        let end = group.end.max(start);
        self.append_untouched(start);
        let span = &self.chars[start..end];
        if group.score > 0.0 {
            self.formatter.highlight_into(span, &mut self.buffer);
        } else {
            HtmlEncoder::encode_into(span, &mut self.buffer);
        }
        self.flushed_to = end;
    }

    fn add_token(&mut self, ordinal: usize, token: &Token, score: Score, joins_group: bool) {
        self.current.add_token(ordinal, token);
        match self.pending.as_mut() {
            Some(group) if joins_group => group.add(token, score),
            _ => {
                self.flush_pending();
                self.pending = Some(PendingGroup::new(token, score));
            }
        }
    }

    /// Freezes the current fragment and opens the next one.
    fn close_fragment(&mut self, score: Score) {
        let text_end = self.buffer.len();
        let next = Fragment::new(self.current.sequence_number + 1, text_end, self.flushed_to);
        let mut fragment = std::mem::replace(&mut self.current, next);
        fragment.freeze(score, text_end, self.flushed_to);
        self.fragments.push(fragment);
    }

    fn finish(mut self, score: Score, max_chars_to_analyze: usize) -> FragmentSet {
        self.flush_pending();
        if self.chars.len() < max_chars_to_analyze {
            self.append_untouched(self.chars.len());
        }
        let text_end = self.buffer.len();
        let doc_end = self.flushed_to;
        self.current.freeze(score, text_end, doc_end);
        self.fragments.push(self.current);
        FragmentSet {
            buffer: self.buffer,
            fragments: self.fragments,
        }
    }
}

/// Splits `text` into scored fragments and renders them.
///
/// The cursor, scorer and fragmenter are all rewound first. Tokens starting
/// at or after `max_chars_to_analyze` are not read. If the cursor yields no
/// token before that limit, the returned set is empty.
pub(crate) fn build_fragments(
    text: &str,
    cursor: &mut dyn TokenCursor,
    fragmenter: &mut dyn Fragmenter,
    scorer: &mut dyn FragmentScorer,
    formatter: &HighlightFormatter,
    max_chars_to_analyze: usize,
) -> crate::Result<FragmentSet> {
    cursor.reset();
    scorer.reset();
    fragmenter.start(text);
    scorer.start_fragment();
    let mut builder = FragmentBuilder::new(text, formatter);
    let mut num_tokens = 0;
    let mut previous_start = 0;
    // set when a boundary falls on a token extending the pending group.
    let mut boundary_pending = false;
    while cursor.advance()? {
        let token = cursor.token();
        if token.offset_from >= max_chars_to_analyze {
            break;
        }
        check_token(num_tokens, token, builder.chars.len(), previous_start)?;
        previous_start = token.offset_from;
        let joins_group = builder.joins_pending_group(token);
        if fragmenter.is_new_fragment(token) || boundary_pending {
            if joins_group {
                // the group and its score stay in the current fragment.
                boundary_pending = true;
            } else {
                builder.flush_pending();
                builder.close_fragment(scorer.fragment_score());
                scorer.start_fragment();
                boundary_pending = false;
            }
        }
        let score = scorer.token_score(token);
        builder.add_token(num_tokens, token, score, joins_group);
        num_tokens += 1;
    }
    if num_tokens == 0 {
        debug!("no token to highlight");
        return Ok(FragmentSet::default());
    }
    let fragment_set = builder.finish(scorer.fragment_score(), max_chars_to_analyze);
    debug!(
        "built {} fragments out of {num_tokens} tokens",
        fragment_set.fragments.len()
    );
    Ok(fragment_set)
}

use log::{debug, warn};

use super::fragment::Fragment;
use super::FragmentScorer;
use crate::tokenizer::TokenCursor;
use crate::Score;

/// Score of a merge candidate that could not be re-scored.
const INVALID_MERGE_SCORE: Score = -1.0;

/// Added to the re-score of a merge candidate when a match ends the first
/// fragment while another one opens the second. The scorer cannot tell those
/// matches apart from unrelated ones, and merging keeps them together.
const MERGE_TIE_BONUS: Score = 0.1;

/// Re-scores the concatenation of `first` and `second` by replaying the
/// token stream.
///
/// Returns at least `max(first.score, second.score)`, or
/// `INVALID_MERGE_SCORE` if the replay could not find the tokens delimiting
/// the fragments.
fn rescore_merge(
    first: &Fragment,
    second: &Fragment,
    cursor: &mut dyn TokenCursor,
    scorer: &mut dyn FragmentScorer,
) -> crate::Result<Score> {
    let max_score = first.score.max(second.score);
    let (Some(first_start), Some(first_end), Some(second_start), Some(second_end)) = (
        first.first_token,
        first.last_token,
        second.first_token,
        second.last_token,
    ) else {
        return Ok(INVALID_MERGE_SCORE);
    };
    cursor.reset();
    scorer.reset();
    let mut ordinal = 0;
    loop {
        if !cursor.advance()? {
            warn!(
                "token #{} not found while re-scoring fragment {}",
                first_start.ordinal, first.sequence_number
            );
            return Ok(INVALID_MERGE_SCORE);
        }
        if ordinal == first_start.ordinal {
            break;
        }
        scorer.token_score(cursor.token());
        ordinal += 1;
    }
    scorer.start_fragment();
    let score = scorer.token_score(cursor.token());
    let mut last_score = if ordinal == first_end.ordinal { score } else { 0.0 };
    let mut second_score = 0.0;
    let mut in_second_position = false;
    while ordinal < second_end.ordinal {
        if !cursor.advance()? {
            warn!(
                "token #{} not found while re-scoring fragment {}",
                second_end.ordinal, second.sequence_number
            );
            return Ok(INVALID_MERGE_SCORE);
        }
        ordinal += 1;
        let token = cursor.token();
        let score = scorer.token_score(token);
        if ordinal == first_end.ordinal {
            last_score = score;
        } else if ordinal == second_start.ordinal {
            in_second_position = true;
        } else if in_second_position {
            second_score += score;
            if token.position_increment > 0 {
                in_second_position = false;
            }
        }
    }
    let mut score = scorer.fragment_score();
    if last_score != 0.0 && second_score != 0.0 && score == max_score {
        score += MERGE_TIE_BONUS;
    }
    debug!(
        "merging fragments {} and {} scores {score} (best of both: {max_score})",
        first.sequence_number, second.sequence_number
    );
    Ok(score.max(max_score))
}

/// Merges contiguous fragments, as long as merging scores better than either
/// of the fragments on its own.
///
/// `fragments` must be in document order. Runs until a full pass does not
/// merge anything, and returns the number of merges.
pub(crate) fn merge_contiguous_fragments(
    fragments: &mut Vec<Fragment>,
    cursor: &mut dyn TokenCursor,
    scorer: &mut dyn FragmentScorer,
) -> crate::Result<usize> {
    let mut num_merges = 0;
    loop {
        let mut merged = false;
        let mut i = 0;
        while i + 1 < fragments.len() {
            if fragments[i + 1].follows(&fragments[i]) {
                let score = rescore_merge(&fragments[i], &fragments[i + 1], cursor, scorer)?;
                if score > fragments[i].score && score > fragments[i + 1].score {
                    let next = fragments.remove(i + 1);
                    fragments[i].merge(next, score);
                    num_merges += 1;
                    merged = true;
                    // the merged fragment may now merge with its new neighbour.
                    continue;
                }
            }
            i += 1;
        }
        if !merged {
            break;
        }
    }
    debug!("{num_merges} merges, {} fragments left", fragments.len());
    Ok(num_merges)
}

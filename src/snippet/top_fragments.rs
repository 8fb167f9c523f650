use std::cmp::Ordering;
use std::collections::BinaryHeap;

use super::fragment::Fragment;

// Rust heap is a max-heap and we need a min heap:
// a "greater" fragment is a worse one, so that the heap top is the
// first fragment to be evicted.
struct RankedFragment(Fragment);

impl PartialOrd for RankedFragment {
    fn partial_cmp(&self, other: &RankedFragment) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for RankedFragment {
    #[inline]
    fn cmp(&self, other: &RankedFragment) -> Ordering {
        other
            .0
            .score
            .partial_cmp(&self.0.score)
            .unwrap_or(Ordering::Equal)
            // earlier fragments win ties.
            .then_with(|| self.0.sequence_number.cmp(&other.0.sequence_number))
    }
}

impl PartialEq for RankedFragment {
    fn eq(&self, other: &RankedFragment) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for RankedFragment {}

/// Keeps track of the `limit` best fragments.
///
/// Fragments are ranked by decreasing score, ties being broken by increasing
/// sequence number. Fragments with a score of `0` or less are ignored.
///
/// The implementation is based on a `BinaryHeap`.
/// The theorical complexity for collecting the top `K` out of `n` fragments
/// is `O(n log K)`.
pub(crate) struct TopFragments {
    limit: usize,
    heap: BinaryHeap<RankedFragment>,
}

impl TopFragments {
    /// Creates a `TopFragments` retaining at most `limit` fragments.
    ///
    /// A limit of 0 is accepted and retains nothing.
    pub fn with_limit(limit: usize) -> TopFragments {
        TopFragments {
            limit,
            heap: BinaryHeap::with_capacity(limit),
        }
    }

    /// Return true iff at least K fragments have gone through
    /// the collector.
    #[inline]
    pub fn at_capacity(&self) -> bool {
        self.heap.len() >= self.limit
    }

    pub fn collect(&mut self, fragment: Fragment) {
        if fragment.score <= 0.0 || self.limit == 0 {
            return;
        }
        let ranked = RankedFragment(fragment);
        if !self.at_capacity() {
            self.heap.push(ranked);
            return;
        }
        if let Some(mut worst) = self.heap.peek_mut() {
            if ranked < *worst {
                *worst = ranked;
            }
        }
    }

    /// Returns the retained fragments, best first.
    pub fn into_sorted_vec(self) -> Vec<Fragment> {
        self.heap
            .into_sorted_vec()
            .into_iter()
            .map(|RankedFragment(fragment)| fragment)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Score;

    fn fragment(sequence_number: usize, score: Score) -> Fragment {
        let mut fragment = Fragment::new(sequence_number, 0, 0);
        fragment.score = score;
        fragment
    }

    fn ranking(top_fragments: TopFragments) -> Vec<(Score, usize)> {
        top_fragments
            .into_sorted_vec()
            .into_iter()
            .map(|fragment| (fragment.score, fragment.sequence_number))
            .collect()
    }

    #[test]
    fn test_top_fragments_not_at_capacity() {
        let mut top_fragments = TopFragments::with_limit(4);
        top_fragments.collect(fragment(1, 0.8));
        top_fragments.collect(fragment(3, 0.2));
        top_fragments.collect(fragment(5, 0.3));
        assert!(!top_fragments.at_capacity());
        assert_eq!(ranking(top_fragments), vec![(0.8, 1), (0.3, 5), (0.2, 3)]);
    }

    #[test]
    fn test_top_fragments_at_capacity() {
        let mut top_fragments = TopFragments::with_limit(4);
        top_fragments.collect(fragment(1, 0.8));
        top_fragments.collect(fragment(3, 0.2));
        top_fragments.collect(fragment(5, 0.3));
        top_fragments.collect(fragment(7, 0.9));
        top_fragments.collect(fragment(9, 0.1));
        top_fragments.collect(fragment(11, 0.25));
        assert!(top_fragments.at_capacity());
        assert_eq!(
            ranking(top_fragments),
            vec![(0.9, 7), (0.8, 1), (0.3, 5), (0.25, 11)]
        );
    }

    #[test]
    fn test_top_fragments_ties_favor_earlier_fragments() {
        let mut top_fragments = TopFragments::with_limit(2);
        top_fragments.collect(fragment(4, 0.5));
        top_fragments.collect(fragment(2, 0.5));
        top_fragments.collect(fragment(0, 0.5));
        top_fragments.collect(fragment(6, 0.5));
        assert_eq!(ranking(top_fragments), vec![(0.5, 0), (0.5, 2)]);
    }

    #[test]
    fn test_top_fragments_ignores_zero_scores() {
        let mut top_fragments = TopFragments::with_limit(3);
        top_fragments.collect(fragment(0, 0.0));
        top_fragments.collect(fragment(1, 0.4));
        top_fragments.collect(fragment(2, -1.0));
        assert_eq!(ranking(top_fragments), vec![(0.4, 1)]);
    }

    #[test]
    fn test_top_0() {
        let mut top_fragments = TopFragments::with_limit(0);
        top_fragments.collect(fragment(0, 1.0));
        assert!(ranking(top_fragments).is_empty());
    }
}

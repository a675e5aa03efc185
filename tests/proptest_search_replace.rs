//! Property-based tests for search, match navigation and replace.
//!
//! Uses proptest to verify invariants that must hold across all valid inputs.

use proptest::prelude::*;
use quillpad::replace::{replace_all, replace_one};
use quillpad::search::{Direction, SearchMode, find_all, search};

// ============================================================================
// Strategies
// ============================================================================

/// Text over a tiny alphabet so queries hit often.
fn dense_text() -> impl Strategy<Value = String> {
    prop::collection::vec(prop::sample::select(vec!['a', 'b', ' ', 'é', '中']), 0..60)
        .prop_map(|chars| chars.into_iter().collect())
}

fn query() -> impl Strategy<Value = String> {
    prop::collection::vec(prop::sample::select(vec!['a', 'b', 'é']), 1..4)
        .prop_map(|chars| chars.into_iter().collect())
}

// ============================================================================
// Search Properties
// ============================================================================

proptest! {
    /// Forward search from offset 0 is the same as searching everything.
    #[test]
    fn forward_from_start_equals_all(text in dense_text(), q in query()) {
        let forward = search(&text, &q, SearchMode::Forward, 0);
        let all = search(&text, &q, SearchMode::All, 0);
        prop_assert_eq!(forward.offsets(), all.offsets());
    }

    /// Every reported offset really starts an occurrence, and none overlap.
    #[test]
    fn matches_are_real_and_disjoint(text in dense_text(), q in query()) {
        let chars: Vec<char> = text.chars().collect();
        let needle: Vec<char> = q.chars().collect();
        let offsets = find_all(&text, &q);
        for pair in offsets.windows(2) {
            prop_assert!(pair[0] + needle.len() <= pair[1], "overlap in {:?}", offsets);
        }
        for &at in &offsets {
            prop_assert_eq!(&chars[at..at + needle.len()], needle.as_slice());
        }
    }

    /// Forward results start at or after the caret, in ascending order.
    #[test]
    fn forward_starts_at_caret(text in dense_text(), q in query(), caret in 0usize..70) {
        let forward = search(&text, &q, SearchMode::Forward, caret);
        for &at in forward.offsets() {
            prop_assert!(at >= caret.min(text.chars().count()));
        }
        prop_assert!(forward.offsets().windows(2).all(|w| w[0] < w[1]));
    }

    /// Backward results end at or before the caret, nearest first.
    #[test]
    fn backward_is_descending(text in dense_text(), q in query(), caret in 0usize..70) {
        let q_len = q.chars().count();
        let matches = search(&text, &q, SearchMode::Backward, caret);
        prop_assert!(matches.offsets().windows(2).all(|w| w[0] >= w[1] + q_len));
        for &at in matches.offsets() {
            prop_assert!(at + q_len <= caret);
        }
    }

    /// Advancing N times around a set of N matches returns to the start.
    #[test]
    fn advance_full_cycle_returns(text in dense_text(), q in query()) {
        let mut matches = search(&text, &q, SearchMode::All, 0);
        prop_assume!(!matches.is_empty());
        let start = matches.cursor();
        for _ in 0..matches.len() {
            matches.advance(Direction::Next);
        }
        prop_assert_eq!(matches.cursor(), start);
    }

    /// Stepping back from the first match lands on the last.
    #[test]
    fn previous_from_first_wraps(text in dense_text(), q in query()) {
        let mut matches = search(&text, &q, SearchMode::All, 0);
        prop_assume!(!matches.is_empty());
        prop_assert_eq!(matches.cursor(), Some(0));
        let last = matches.offsets().last().copied();
        prop_assert_eq!(matches.advance(Direction::Previous), last);
        prop_assert_eq!(matches.cursor(), Some(matches.len() - 1));
    }
}

// ============================================================================
// Replace Properties
// ============================================================================

proptest! {
    /// After replacing every occurrence, the query is gone.
    ///
    /// The replacement uses chars outside the query alphabet so it cannot
    /// combine with its neighbours into a new occurrence.
    #[test]
    fn replace_all_leaves_no_match(
        text in dense_text(),
        q in query(),
        r in "[xy]{1,3}",
    ) {
        let replaced = replace_all(&text, &q, &r);
        prop_assert!(search(&replaced, &q, SearchMode::All, 0).is_empty());
    }

    /// Replacing with the query itself changes nothing.
    #[test]
    fn replace_with_self_is_identity(text in dense_text(), q in query()) {
        prop_assert_eq!(replace_all(&text, &q, &q), text);
    }

    /// Text outside the selection is kept verbatim.
    #[test]
    fn replace_one_keeps_outside(
        text in dense_text(),
        q in query(),
        a in 0usize..70,
        b in 0usize..70,
    ) {
        let len = text.chars().count();
        let (start, end) = (a.min(b).min(len), a.max(b).min(len));
        let out = replace_one(&text, start, end, &q, "#");
        let prefix: String = text.chars().take(start).collect();
        let suffix: String = text.chars().skip(end).collect();
        prop_assert!(out.starts_with(&prefix));
        prop_assert!(out.ends_with(&suffix));
    }
}

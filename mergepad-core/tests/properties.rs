//! Property-based tests for the diff block list and merge session.
//!
//! Uses proptest to generate line sequences over a tiny alphabet so that
//! matches, insertions and replacements all show up frequently.

use mergepad_core::{compare, BlockKind, DiffAlgorithm, DiffEngine, LineSequence, MergeSession};
use proptest::prelude::*;

/// Strategy for a document: up to 12 lines drawn from a three-letter alphabet
/// (plus the empty line).
fn document_strategy() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec("[abc]?", 0..12)
}

fn algorithm_strategy() -> impl Strategy<Value = DiffAlgorithm> {
    prop_oneof![
        Just(DiffAlgorithm::Myers),
        Just(DiffAlgorithm::Patience),
        Just(DiffAlgorithm::Lcs),
    ]
}

/// `true` if `needle` appears in `haystack` in order (not necessarily contiguous).
fn is_subsequence(needle: &[String], haystack: &[String]) -> bool {
    let mut rest = haystack.iter();
    needle.iter().all(|line| rest.any(|h| h == line))
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    /// Property: block ranges tile both inputs exactly and in order.
    #[test]
    fn blocks_tile_both_inputs(
        left in document_strategy(),
        right in document_strategy(),
        algorithm in algorithm_strategy(),
    ) {
        let result = DiffEngine::new(algorithm)
            .compare(LineSequence::from(left.clone()), LineSequence::from(right.clone()));

        let (mut l, mut r) = (0, 0);
        for block in result.blocks() {
            prop_assert_eq!(block.left.start, l, "gap or overlap on the left");
            prop_assert_eq!(block.right.start, r, "gap or overlap on the right");
            prop_assert!(block.has_left() || block.has_right(), "empty block");
            l = block.left.end;
            r = block.right.end;
        }
        prop_assert_eq!(l, left.len());
        prop_assert_eq!(r, right.len());
    }

    /// Property: kinds match their ranges and runs are maximal.
    #[test]
    fn blocks_are_maximal_and_well_typed(
        left in document_strategy(),
        right in document_strategy(),
        algorithm in algorithm_strategy(),
    ) {
        let result = DiffEngine::new(algorithm)
            .compare(LineSequence::from(left), LineSequence::from(right));

        for block in result.blocks() {
            match block.kind {
                BlockKind::Equal => {
                    prop_assert_eq!(result.left_lines(block), result.right_lines(block));
                }
                BlockKind::LeftOnly => prop_assert!(block.has_left() && !block.has_right()),
                BlockKind::RightOnly => prop_assert!(!block.has_left() && block.has_right()),
                BlockKind::Replaced => prop_assert!(block.has_left() && block.has_right()),
            }
        }
        for pair in result.blocks().windows(2) {
            prop_assert_ne!(
                pair[0].kind.is_difference(),
                pair[1].kind.is_difference(),
                "adjacent blocks of the same class should have been merged"
            );
        }

        let expected: Vec<usize> = result
            .blocks()
            .iter()
            .enumerate()
            .filter(|(_, b)| b.kind != BlockKind::Equal)
            .map(|(i, _)| i)
            .collect();
        prop_assert_eq!(result.differences(), expected.as_slice());
    }

    /// Property: taking both sides of every difference, in order, yields a
    /// document containing each input as a subsequence.
    #[test]
    fn use_both_everywhere_is_a_supersequence(
        left in document_strategy(),
        right in document_strategy(),
    ) {
        let result = compare(LineSequence::from(left.clone()), LineSequence::from(right.clone()));
        prop_assume!(!result.is_identical());

        let equal_lines: usize = result
            .blocks()
            .iter()
            .filter(|b| b.kind == BlockKind::Equal)
            .map(|b| b.left.len())
            .sum();

        let mut session = MergeSession::new(result);
        while session.next_difference() {
            session.use_both();
        }
        let merged = session.output();

        prop_assert!(is_subsequence(&left, merged));
        prop_assert!(is_subsequence(&right, merged));
        prop_assert_eq!(merged.len(), left.len() + right.len() - equal_lines);
    }

    /// Property: identical inputs give one Equal block and no differences.
    #[test]
    fn identical_inputs_have_no_differences(doc in document_strategy()) {
        let result = compare(LineSequence::from(doc.clone()), LineSequence::from(doc.clone()));
        prop_assert!(result.differences().is_empty());
        if doc.is_empty() {
            prop_assert!(result.blocks().is_empty());
        } else {
            prop_assert_eq!(result.blocks().len(), 1);
            prop_assert_eq!(result.blocks()[0].left.clone(), 0..doc.len());
        }
    }

    /// Property: next then previous returns to where the cursor was, except at
    /// the last difference where next is a no-op.
    #[test]
    fn next_then_previous_round_trips(
        left in document_strategy(),
        right in document_strategy(),
        pick in any::<prop::sample::Index>(),
    ) {
        let mut session = MergeSession::new(compare(left.into(), right.into()));
        let count = session.difference_count();
        prop_assume!(count >= 2);

        let start = pick.index(count - 1);
        session.select(start);
        prop_assert!(session.next_difference());
        prop_assert!(session.prev_difference());
        prop_assert_eq!(session.cursor(), Some(start));

        session.select(count - 1);
        prop_assert!(!session.next_difference());
        prop_assert_eq!(session.cursor(), Some(count - 1));
    }

    /// Property: aligned rows list every line of each side exactly once, in order.
    #[test]
    fn aligned_rows_cover_each_side_once(
        left in document_strategy(),
        right in document_strategy(),
    ) {
        let result = compare(LineSequence::from(left.clone()), LineSequence::from(right.clone()));
        let rows = result.aligned_rows();
        let lefts: Vec<usize> = rows.iter().filter_map(|r| r.left).collect();
        let rights: Vec<usize> = rows.iter().filter_map(|r| r.right).collect();
        prop_assert_eq!(lefts, (0..left.len()).collect::<Vec<_>>());
        prop_assert_eq!(rights, (0..right.len()).collect::<Vec<_>>());
    }

    /// Property: line lookups find the block whose range holds the line.
    #[test]
    fn line_lookup_matches_block_ranges(
        left in document_strategy(),
        right in document_strategy(),
    ) {
        let result = compare(LineSequence::from(left.clone()), LineSequence::from(right.clone()));
        for line in 0..left.len() {
            let block = result.block_at_left_line(line).and_then(|i| result.block(i));
            prop_assert!(block.is_some_and(|b| b.left.contains(&line)));
        }
        for line in 0..right.len() {
            let block = result.block_at_right_line(line).and_then(|i| result.block(i));
            prop_assert!(block.is_some_and(|b| b.right.contains(&line)));
        }
        prop_assert_eq!(result.block_at_left_line(left.len()), None);
    }
}

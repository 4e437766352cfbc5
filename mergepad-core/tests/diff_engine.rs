//! Integration tests for the diff engine's block list.
//!
//! Exercises: compare, DiffEngine with every algorithm, differences list,
//! block lookups by line.

use mergepad_core::{compare, BlockKind, DiffAlgorithm, DiffBlock, DiffEngine, LineSequence};

fn seq(lines: &[&str]) -> LineSequence {
    lines.iter().copied().collect()
}

fn block(kind: BlockKind, left: std::ops::Range<usize>, right: std::ops::Range<usize>) -> DiffBlock {
    DiffBlock { kind, left, right }
}

#[test]
fn single_replaced_line_between_equal_lines() {
    let result = compare(seq(&["A", "B", "C"]), seq(&["A", "X", "C"]));
    assert_eq!(
        result.blocks(),
        &[
            block(BlockKind::Equal, 0..1, 0..1),
            block(BlockKind::Replaced, 1..2, 1..2),
            block(BlockKind::Equal, 2..3, 2..3),
        ]
    );
    assert_eq!(result.differences(), &[1], "only the middle block is a difference");
}

#[test]
fn trailing_left_line_is_left_only() {
    let result = compare(seq(&["A", "B"]), seq(&["A"]));
    assert_eq!(
        result.blocks(),
        &[block(BlockKind::Equal, 0..1, 0..1), block(BlockKind::LeftOnly, 1..2, 1..1)]
    );
    assert_eq!(result.differences(), &[1]);
}

#[test]
fn empty_left_is_one_right_only_block() {
    let result = compare(seq(&[]), seq(&["X"]));
    assert_eq!(result.blocks(), &[block(BlockKind::RightOnly, 0..0, 0..1)]);
    assert_eq!(result.differences(), &[0]);
}

#[test]
fn empty_right_is_one_left_only_block() {
    let result = compare(seq(&["X", "Y"]), seq(&[]));
    assert_eq!(result.blocks(), &[block(BlockKind::LeftOnly, 0..2, 0..0)]);
}

#[test]
fn both_empty_produces_no_blocks() {
    let result = compare(seq(&[]), seq(&[]));
    assert!(result.blocks().is_empty());
    assert!(result.is_identical());
}

#[test]
fn identical_documents_are_one_equal_block() {
    let lines = ["fn main() {", "    println!(\"hi\");", "}"];
    let result = compare(seq(&lines), seq(&lines));
    assert_eq!(result.blocks(), &[block(BlockKind::Equal, 0..3, 0..3)]);
    assert!(result.differences().is_empty());
    assert!(result.is_identical());
}

#[test]
fn whitespace_differences_are_real_differences() {
    let result = compare(seq(&["a", "b "]), seq(&["a", "b"]));
    assert_eq!(result.differences().len(), 1, "trailing space must not be normalized away");
    assert_eq!(result.blocks()[1].kind, BlockKind::Replaced);
}

#[test]
fn inserted_run_in_the_middle_is_right_only() {
    let result = compare(seq(&["a", "d"]), seq(&["a", "b", "c", "d"]));
    assert_eq!(
        result.blocks(),
        &[
            block(BlockKind::Equal, 0..1, 0..1),
            block(BlockKind::RightOnly, 1..1, 1..3),
            block(BlockKind::Equal, 1..2, 3..4),
        ]
    );
}

#[test]
fn every_algorithm_agrees_on_a_simple_edit() {
    for algorithm in [DiffAlgorithm::Myers, DiffAlgorithm::Patience, DiffAlgorithm::Lcs] {
        let engine = DiffEngine::new(algorithm);
        assert_eq!(engine.algorithm(), algorithm);
        let result = engine.compare(seq(&["one", "two", "three"]), seq(&["one", "2", "three"]));
        assert_eq!(
            result.blocks(),
            &[
                block(BlockKind::Equal, 0..1, 0..1),
                block(BlockKind::Replaced, 1..2, 1..2),
                block(BlockKind::Equal, 2..3, 2..3),
            ],
            "algorithm {algorithm:?}"
        );
    }
}

#[test]
fn comparison_is_deterministic() {
    let left = seq(&["a", "b", "a", "c", "b", "a"]);
    let right = seq(&["b", "a", "c", "a", "b"]);
    let first = compare(left.clone(), right.clone());
    let second = compare(left, right);
    assert_eq!(first.blocks(), second.blocks());
}

#[test]
fn lookups_map_lines_and_blocks() {
    let result = compare(seq(&["a", "b", "c"]), seq(&["a", "x", "y", "c"]));
    assert_eq!(result.block_at_left_line(1), Some(1));
    assert_eq!(result.block_at_right_line(2), Some(1));
    assert_eq!(result.block_at_right_line(9), None);
    assert_eq!(result.difference_position(1), Some(0));
    assert_eq!(result.difference_position(0), None, "equal blocks are not differences");
    assert_eq!(result.difference(0), result.block(1));
    assert_eq!(result.left_lines(&result.blocks()[1]), &["b".to_owned()]);
    assert_eq!(result.right_lines(&result.blocks()[1]), &["x".to_owned(), "y".to_owned()]);
}

#[test]
fn repeated_blank_lines_keep_blocks_in_document_order() {
    let left = ["b", "", "", "", "", "a", ""];
    let right = ["", "b", "a", "a", "a", "", "a", "a", "a", "", ""];
    for algorithm in [DiffAlgorithm::Myers, DiffAlgorithm::Patience, DiffAlgorithm::Lcs] {
        let result = DiffEngine::new(algorithm).compare(seq(&left), seq(&right));
        let (mut l, mut r) = (0, 0);
        for b in result.blocks() {
            assert_eq!((b.left.start, b.right.start), (l, r), "{algorithm:?}: {b:?}");
            l = b.left.end;
            r = b.right.end;
        }
        assert_eq!((l, r), (left.len(), right.len()), "{algorithm:?}");

        for line in 0..left.len() {
            let found = result.block_at_left_line(line).and_then(|i| result.block(i));
            assert!(found.is_some_and(|b| b.left.contains(&line)), "{algorithm:?}: left line {line}");
        }
        for line in 0..right.len() {
            let found = result.block_at_right_line(line).and_then(|i| result.block(i));
            assert!(found.is_some_and(|b| b.right.contains(&line)), "{algorithm:?}: right line {line}");
        }
    }
}

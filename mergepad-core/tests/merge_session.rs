//! Integration tests for the merge session state machine.
//!
//! Exercises: cursor navigation, use_left / use_right / use_both, clear,
//! serialize, unchanged-context writing and block views.

use mergepad_core::{compare, join_lines, BlockKind, LineSequence, MergeChoice, MergeSession};

fn seq(lines: &[&str]) -> LineSequence {
    lines.iter().copied().collect()
}

fn session(left: &[&str], right: &[&str]) -> MergeSession {
    MergeSession::new(compare(seq(left), seq(right)))
}

#[test]
fn use_right_on_replaced_writes_surrounding_context() {
    let mut s = session(&["A", "B", "C"], &["A", "X", "C"]);
    assert!(s.next_difference());
    assert_eq!(s.use_right(), 3);
    assert_eq!(s.serialize(), join_lines(&["A", "X", "C"]));
}

#[test]
fn use_left_on_trailing_left_only() {
    let mut s = session(&["A", "B"], &["A"]);
    s.next_difference();
    s.use_left();
    assert_eq!(s.serialize(), join_lines(&["A", "B"]));
}

#[test]
fn use_right_from_empty_left() {
    let mut s = session(&[], &["X"]);
    s.next_difference();
    s.use_right();
    assert_eq!(s.serialize(), "X");
}

#[test]
fn new_session_has_no_cursor_and_empty_output() {
    let s = session(&["a"], &["b"]);
    assert_eq!(s.cursor(), None);
    assert!(s.current_block().is_none());
    assert!(s.output().is_empty());
    assert_eq!(s.serialize(), "");
}

#[test]
fn accept_without_cursor_is_a_no_op() {
    let mut s = session(&["a"], &["b"]);
    assert_eq!(s.use_left(), 0);
    assert_eq!(s.use_right(), 0);
    assert_eq!(s.use_both(), 0);
    assert!(s.output().is_empty());
}

#[test]
fn use_left_on_right_only_changes_nothing() {
    let mut s = session(&["a"], &["a", "b"]);
    s.next_difference();
    assert_eq!(s.current_block().map(|b| b.kind), Some(BlockKind::RightOnly));
    assert_eq!(s.use_left(), 0);
    assert!(s.output().is_empty(), "no context is written for a no-op accept");
    assert_eq!(s.cursor(), Some(0));
}

#[test]
fn use_right_on_left_only_changes_nothing() {
    let mut s = session(&["a", "b"], &["a"]);
    s.next_difference();
    assert_eq!(s.use_right(), 0);
    assert!(s.output().is_empty());
}

#[test]
fn use_both_appends_left_then_right() {
    let mut s = session(&["keep", "old"], &["keep", "new"]);
    s.next_difference();
    s.use_both();
    assert_eq!(s.output(), &["keep", "old", "new"]);
}

#[test]
fn navigation_saturates_at_both_ends() {
    let mut s = session(&["a", "1", "b", "2", "c"], &["a", "x", "b", "y", "c"]);
    assert_eq!(s.difference_count(), 2);

    assert!(s.next_difference());
    assert_eq!(s.cursor(), Some(0));
    assert!(!s.prev_difference(), "previous at the first difference is a no-op");
    assert_eq!(s.cursor(), Some(0));

    assert!(s.next_difference());
    assert_eq!(s.cursor(), Some(1));
    assert!(!s.next_difference(), "next at the last difference is a no-op");
    assert_eq!(s.cursor(), Some(1));

    assert!(s.prev_difference());
    assert_eq!(s.cursor(), Some(0));
}

#[test]
fn previous_from_unset_selects_first() {
    let mut s = session(&["a", "1", "b", "2"], &["a", "x", "b", "y"]);
    assert!(s.prev_difference());
    assert_eq!(s.cursor(), Some(0));
}

#[test]
fn navigation_without_differences_leaves_cursor_unset() {
    let mut s = session(&["same"], &["same"]);
    assert!(!s.next_difference());
    assert!(!s.prev_difference());
    assert_eq!(s.cursor(), None);
}

#[test]
fn select_jumps_and_ignores_out_of_range() {
    let mut s = session(&["a", "1", "b", "2"], &["a", "x", "b", "y"]);
    assert!(s.select(1));
    assert_eq!(s.current_block_index(), Some(3));
    assert!(!s.select(2));
    assert_eq!(s.cursor(), Some(1));
}

#[test]
fn skipped_differences_contribute_nothing() {
    let mut s = session(&["a", "1", "b", "2", "c"], &["a", "x", "b", "y", "c"]);
    s.select(1);
    s.use_right();
    assert_eq!(s.output(), &["a", "b", "y", "c"]);
}

#[test]
fn revisiting_an_earlier_difference_appends_at_the_end() {
    let mut s = session(&["a", "1", "b", "2", "c"], &["a", "x", "b", "y", "c"]);
    s.select(1);
    s.use_left();
    s.select(0);
    assert_eq!(s.use_right(), 1, "only the chosen line, no context");
    assert_eq!(s.output(), &["a", "b", "2", "c", "x"]);
}

#[test]
fn merging_in_order_builds_the_whole_document() {
    let mut s = session(&["a", "1", "b", "2", "c"], &["a", "x", "b", "y", "c"]);
    s.next_difference();
    s.use_left();
    s.next_difference();
    s.use_right();
    assert_eq!(s.output(), &["a", "1", "b", "y", "c"]);
}

#[test]
fn clear_empties_output_but_keeps_cursor() {
    let mut s = session(&["a", "1", "b"], &["a", "x", "b"]);
    s.next_difference();
    s.use_left();
    s.clear();
    assert!(s.output().is_empty());
    assert_eq!(s.cursor(), Some(0));

    s.accept(MergeChoice::Right);
    assert_eq!(s.output(), &["a", "x", "b"], "context is written again after a clear");
}

#[test]
fn block_views_mark_only_the_current_block() {
    let mut s = session(&["a", "1", "b"], &["a", "x", "b"]);
    assert!(s.block_views().all(|v| !v.is_current));

    s.next_difference();
    let views: Vec<_> = s.block_views().collect();
    assert_eq!(views.len(), 3);
    assert_eq!(views.iter().filter(|v| v.is_current).count(), 1);
    assert!(views[1].is_current);
    assert_eq!(views[1].kind, BlockKind::Replaced);
    assert_eq!(views[1].left, 1..2);
    assert_eq!(views[1].right, 1..2);
}

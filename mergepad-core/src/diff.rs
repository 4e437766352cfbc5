//! Line diff engine: whole-line alignment coalesced into typed blocks.
//!
//! [`DiffEngine::compare`] runs one of `similar`'s alignment algorithms over the
//! two line slices and folds the raw opcodes into [`DiffBlock`]s. The fold is what
//! gives the block list its shape:
//!
//! - the blocks' left ranges tile `0..left.len()` and their right ranges tile
//!   `0..right.len()`, in increasing order with no gaps or overlaps;
//! - a maximal run of matching lines is always exactly one `Equal` block;
//! - a maximal run of non-matching lines is one block, `Replaced` when both sides
//!   have content and `LeftOnly` / `RightOnly` otherwise.
//!
//! The opcodes come straight from the algorithm with no compaction pass, so they
//! arrive in document order for every [`DiffAlgorithm`]. The fold merges
//! adjacent opcodes of the same class, and debug builds assert the tiling of
//! the finished block list.

use std::ops::Range;

use serde::Deserialize;
use similar::algorithms::{diff_slices, Capture};
use similar::{Algorithm, DiffTag};
use tracing::debug;

use crate::text::LineSequence;

/// Alignment algorithm used by [`DiffEngine`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DiffAlgorithm {
    /// Myers' O(ND) algorithm (default).
    #[default]
    Myers,
    /// Patience diff; anchors on unique lines, often reads better on code.
    Patience,
    /// Classic dynamic-programming longest common subsequence.
    Lcs,
}

impl From<DiffAlgorithm> for Algorithm {
    fn from(value: DiffAlgorithm) -> Self {
        match value {
            DiffAlgorithm::Myers => Algorithm::Myers,
            DiffAlgorithm::Patience => Algorithm::Patience,
            DiffAlgorithm::Lcs => Algorithm::Lcs,
        }
    }
}

/// Classification of one diff block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BlockKind {
    /// Lines present, unchanged, on both sides.
    Equal,
    /// Lines only in the left document.
    LeftOnly,
    /// Lines only in the right document.
    RightOnly,
    /// Lines on both sides that differ.
    Replaced,
}

impl BlockKind {
    /// `true` for every kind except `Equal`.
    pub fn is_difference(self) -> bool {
        self != BlockKind::Equal
    }

    fn for_change(left: &Range<usize>, right: &Range<usize>) -> Self {
        match (left.is_empty(), right.is_empty()) {
            (false, false) => BlockKind::Replaced,
            (false, true) => BlockKind::LeftOnly,
            _ => BlockKind::RightOnly,
        }
    }
}

/// One contiguous block of the comparison.
///
/// `left` and `right` are half-open line ranges into the compared sequences.
/// `left` is empty for `RightOnly`, `right` is empty for `LeftOnly`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiffBlock {
    pub kind: BlockKind,
    pub left: Range<usize>,
    pub right: Range<usize>,
}

impl DiffBlock {
    pub fn has_left(&self) -> bool {
        !self.left.is_empty()
    }

    pub fn has_right(&self) -> bool {
        !self.right.is_empty()
    }

    /// Rows this block occupies in an aligned side-by-side view.
    pub fn aligned_height(&self) -> usize {
        self.left.len().max(self.right.len())
    }
}

/// One row of the aligned side-by-side projection of a [`DiffResult`].
///
/// `None` on a side marks a filler row: the other side of the same block is
/// longer at that point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AlignedRow {
    /// Index into [`DiffResult::blocks`].
    pub block: usize,
    pub left: Option<usize>,
    pub right: Option<usize>,
}

/// Summary counts for a comparison.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DiffStats {
    pub left_only: usize,
    pub right_only: usize,
    pub replaced: usize,
    /// Left lines covered by difference blocks.
    pub left_lines: usize,
    /// Right lines covered by difference blocks.
    pub right_lines: usize,
}

impl DiffStats {
    /// Number of difference blocks.
    pub fn differences(&self) -> usize {
        self.left_only + self.right_only + self.replaced
    }
}

/// The immutable outcome of one comparison.
///
/// Owns the two compared sequences, so everything downstream (merge session,
/// renderers) reads exactly the snapshot the blocks were computed against.
#[derive(Debug, Clone)]
pub struct DiffResult {
    left: LineSequence,
    right: LineSequence,
    blocks: Vec<DiffBlock>,
    differences: Vec<usize>,
}

impl DiffResult {
    fn new(left: LineSequence, right: LineSequence, blocks: Vec<DiffBlock>) -> Self {
        let differences = blocks
            .iter()
            .enumerate()
            .filter(|(_, b)| b.kind.is_difference())
            .map(|(i, _)| i)
            .collect();
        Self { left, right, blocks, differences }
    }

    pub fn left(&self) -> &LineSequence {
        &self.left
    }

    pub fn right(&self) -> &LineSequence {
        &self.right
    }

    /// All blocks in document order.
    pub fn blocks(&self) -> &[DiffBlock] {
        &self.blocks
    }

    pub fn block(&self, index: usize) -> Option<&DiffBlock> {
        self.blocks.get(index)
    }

    /// Block indices of every non-`Equal` block, in document order.
    pub fn differences(&self) -> &[usize] {
        &self.differences
    }

    /// The block behind entry `position` of [`differences`](Self::differences).
    pub fn difference(&self, position: usize) -> Option<&DiffBlock> {
        self.differences.get(position).and_then(|&b| self.blocks.get(b))
    }

    /// Position within [`differences`](Self::differences) of a block index, if
    /// that block is a difference.
    pub fn difference_position(&self, block: usize) -> Option<usize> {
        self.differences.binary_search(&block).ok()
    }

    /// `true` when the two sides compared equal line for line.
    pub fn is_identical(&self) -> bool {
        self.differences.is_empty()
    }

    pub fn left_lines(&self, block: &DiffBlock) -> &[String] {
        self.left.slice(block.left.clone())
    }

    pub fn right_lines(&self, block: &DiffBlock) -> &[String] {
        self.right.slice(block.right.clone())
    }

    /// Index of the block containing left line `line`.
    pub fn block_at_left_line(&self, line: usize) -> Option<usize> {
        // Blocks tile each side in order, so range ends are sorted.
        let i = self.blocks.partition_point(|b| b.left.end <= line);
        self.blocks.get(i).filter(|b| b.left.contains(&line)).map(|_| i)
    }

    /// Index of the block containing right line `line`.
    pub fn block_at_right_line(&self, line: usize) -> Option<usize> {
        let i = self.blocks.partition_point(|b| b.right.end <= line);
        self.blocks.get(i).filter(|b| b.right.contains(&line)).map(|_| i)
    }

    pub fn stats(&self) -> DiffStats {
        let mut stats = DiffStats::default();
        for block in &self.blocks {
            match block.kind {
                BlockKind::Equal => continue,
                BlockKind::LeftOnly => stats.left_only += 1,
                BlockKind::RightOnly => stats.right_only += 1,
                BlockKind::Replaced => stats.replaced += 1,
            }
            stats.left_lines += block.left.len();
            stats.right_lines += block.right.len();
        }
        stats
    }

    /// Projects the blocks onto aligned side-by-side rows.
    ///
    /// Each block yields `max(left, right)` rows; the shorter side gets filler
    /// rows at the end of the block.
    pub fn aligned_rows(&self) -> Vec<AlignedRow> {
        let total = self.blocks.iter().map(DiffBlock::aligned_height).sum();
        let mut rows = Vec::with_capacity(total);
        for (index, block) in self.blocks.iter().enumerate() {
            for k in 0..block.aligned_height() {
                rows.push(AlignedRow {
                    block: index,
                    left: (k < block.left.len()).then(|| block.left.start + k),
                    right: (k < block.right.len()).then(|| block.right.start + k),
                });
            }
        }
        rows
    }

    /// First aligned row of block `index` (see [`aligned_rows`](Self::aligned_rows)).
    pub fn aligned_row_of_block(&self, index: usize) -> usize {
        self.blocks.iter().take(index).map(DiffBlock::aligned_height).sum()
    }
}

/// Computes [`DiffResult`]s with a fixed alignment algorithm.
#[derive(Debug, Clone, Copy, Default)]
pub struct DiffEngine {
    algorithm: DiffAlgorithm,
}

impl DiffEngine {
    pub fn new(algorithm: DiffAlgorithm) -> Self {
        Self { algorithm }
    }

    pub fn algorithm(&self) -> DiffAlgorithm {
        self.algorithm
    }

    /// Compares two line sequences. Pure and deterministic; never fails.
    ///
    /// Cost is polynomial in the input size. There is no cancellation, so very
    /// large documents should be compared off the UI thread.
    pub fn compare(&self, left: LineSequence, right: LineSequence) -> DiffResult {
        // `capture_diff_slices` would also compact the opcodes, which can
        // reorder them. The plain hook keeps them in document order.
        let mut capture = Capture::new();
        if let Err(never) =
            diff_slices(self.algorithm.into(), &mut capture, left.lines(), right.lines())
        {
            match never {}
        }
        let blocks = coalesce(capture.into_ops().iter().map(|op| op.as_tag_tuple()));
        debug_assert!(
            tiles(&blocks, left.len(), right.len()),
            "blocks do not tile the inputs: {blocks:?}"
        );
        let result = DiffResult::new(left, right, blocks);
        debug!(
            algorithm = ?self.algorithm,
            left_lines = result.left.len(),
            right_lines = result.right.len(),
            blocks = result.blocks.len(),
            differences = result.differences.len(),
            "compared documents"
        );
        result
    }
}

/// Compares with the default engine (Myers).
pub fn compare(left: LineSequence, right: LineSequence) -> DiffResult {
    DiffEngine::default().compare(left, right)
}

/// Folds raw `(tag, left, right)` opcodes into maximal typed blocks.
///
/// Adjacent opcodes of the same class (matching vs. non-matching) are merged,
/// and empty opcodes are dropped.
fn coalesce<I>(ops: I) -> Vec<DiffBlock>
where
    I: IntoIterator<Item = (DiffTag, Range<usize>, Range<usize>)>,
{
    let mut blocks: Vec<DiffBlock> = Vec::new();

    for (tag, left, right) in ops {
        if left.is_empty() && right.is_empty() {
            continue;
        }
        let is_equal = matches!(tag, DiffTag::Equal);

        if let Some(last) = blocks.last_mut() {
            let same_class = (last.kind == BlockKind::Equal) == is_equal;
            if same_class && last.left.end == left.start && last.right.end == right.start {
                last.left.end = left.end;
                last.right.end = right.end;
                if !is_equal {
                    last.kind = BlockKind::for_change(&last.left, &last.right);
                }
                continue;
            }
        }

        let kind = if is_equal { BlockKind::Equal } else { BlockKind::for_change(&left, &right) };
        blocks.push(DiffBlock { kind, left, right });
    }

    blocks
}

/// True when the block ranges cover `0..left_len` and `0..right_len` in order
/// with no gaps or overlaps.
fn tiles(blocks: &[DiffBlock], left_len: usize, right_len: usize) -> bool {
    let mut left = 0;
    let mut right = 0;
    for block in blocks {
        if block.left.start != left || block.right.start != right {
            return false;
        }
        left = block.left.end;
        right = block.right.end;
    }
    left == left_len && right == right_len
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn coalesce_merges_delete_then_insert_into_replaced() {
        let blocks = coalesce([
            (DiffTag::Equal, 0..1, 0..1),
            (DiffTag::Delete, 1..2, 1..1),
            (DiffTag::Insert, 2..2, 1..3),
            (DiffTag::Equal, 2..3, 3..4),
        ]);
        assert_eq!(
            blocks,
            vec![
                DiffBlock { kind: BlockKind::Equal, left: 0..1, right: 0..1 },
                DiffBlock { kind: BlockKind::Replaced, left: 1..2, right: 1..3 },
                DiffBlock { kind: BlockKind::Equal, left: 2..3, right: 3..4 },
            ]
        );
    }

    #[test]
    fn coalesce_merges_split_equal_runs() {
        let blocks = coalesce([(DiffTag::Equal, 0..2, 0..2), (DiffTag::Equal, 2..5, 2..5)]);
        assert_eq!(blocks, vec![DiffBlock { kind: BlockKind::Equal, left: 0..5, right: 0..5 }]);
    }

    #[test]
    fn coalesce_keeps_one_sided_runs_one_sided() {
        let blocks = coalesce([(DiffTag::Delete, 0..1, 0..0), (DiffTag::Delete, 1..3, 0..0)]);
        assert_eq!(blocks, vec![DiffBlock { kind: BlockKind::LeftOnly, left: 0..3, right: 0..0 }]);
    }

    #[test]
    fn coalesce_drops_empty_ops() {
        assert!(coalesce([(DiffTag::Equal, 0..0, 0..0)]).is_empty());
    }

    #[test]
    fn tiles_rejects_backwards_ranges() {
        let blocks = [
            DiffBlock { kind: BlockKind::Equal, left: 0..2, right: 0..2 },
            DiffBlock { kind: BlockKind::LeftOnly, left: 2..5, right: 7..7 },
            DiffBlock { kind: BlockKind::Equal, left: 5..6, right: 6..7 },
        ];
        assert!(!tiles(&blocks, 6, 7));
        assert!(tiles(&blocks[..1], 2, 2));
        assert!(tiles(&[], 0, 0));
    }

    #[test]
    fn aligned_rows_pad_the_shorter_side() {
        let left: LineSequence = ["a", "b", "c"].into_iter().collect();
        let right: LineSequence = ["a", "x"].into_iter().collect();
        let result = compare(left, right);
        let rows = result.aligned_rows();
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0], AlignedRow { block: 0, left: Some(0), right: Some(0) });
        assert_eq!(rows[1], AlignedRow { block: 1, left: Some(1), right: Some(1) });
        assert_eq!(rows[2], AlignedRow { block: 1, left: Some(2), right: None });
        assert_eq!(result.aligned_row_of_block(1), 1);
    }

    #[test]
    fn stats_count_kinds_and_lines() {
        let left: LineSequence = ["a", "b", "c", "d"].into_iter().collect();
        let right: LineSequence = ["a", "x", "c", "e", "f"].into_iter().collect();
        let stats = compare(left, right).stats();
        assert_eq!(stats.replaced, 2);
        assert_eq!(stats.differences(), 2);
        assert_eq!(stats.left_lines, 2);
        assert_eq!(stats.right_lines, 3);
    }
}

//! Merge session: a cursor over the differences of one [`DiffResult`] and the
//! output buffer the user builds from them.
//!
//! # State machine
//!
//! A session starts with the cursor unset. [`next_difference`] and
//! [`prev_difference`] move it among the differences in document order and
//! saturate at both ends. Accept operations ([`use_left`], [`use_right`],
//! [`use_both`]) and [`clear`] only touch the output buffer, never the cursor.
//! A new comparison means a new session; nothing carries over.
//!
//! # Unchanged context
//!
//! The output buffer is meant to read as the merged document, so unchanged lines
//! are written for the user. The session tracks a *frontier*: the first block not
//! yet written. Accepting a difference at or past the frontier writes the `Equal`
//! blocks between the frontier and the chosen block, then the chosen lines, then
//! the `Equal` blocks that directly follow it, and moves the frontier up to the
//! next difference. Differences skipped on the way contribute nothing. Accepting
//! a difference behind the frontier appends only the chosen lines.
//!
//! [`next_difference`]: MergeSession::next_difference
//! [`prev_difference`]: MergeSession::prev_difference
//! [`use_left`]: MergeSession::use_left
//! [`use_right`]: MergeSession::use_right
//! [`use_both`]: MergeSession::use_both
//! [`clear`]: MergeSession::clear

use std::ops::Range;

use tracing::debug;

use crate::diff::{BlockKind, DiffBlock, DiffResult};
use crate::text::join_lines;

/// Which side(s) of the current difference to take.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MergeChoice {
    Left,
    Right,
    /// Left lines followed by right lines.
    Both,
}

/// What a renderer needs to colour one block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockView {
    /// Index into [`DiffResult::blocks`].
    pub index: usize,
    pub kind: BlockKind,
    pub left: Range<usize>,
    pub right: Range<usize>,
    /// `true` for the block under the cursor; overrides the kind's colour.
    pub is_current: bool,
}

/// Cursor and output buffer over one immutable [`DiffResult`].
#[derive(Debug, Clone)]
pub struct MergeSession {
    result: DiffResult,
    /// Index into `result.differences()`.
    cursor: Option<usize>,
    output: Vec<String>,
    /// First block index whose content has not been written to `output`.
    frontier: usize,
}

impl MergeSession {
    pub fn new(result: DiffResult) -> Self {
        Self { result, cursor: None, output: Vec::new(), frontier: 0 }
    }

    pub fn result(&self) -> &DiffResult {
        &self.result
    }

    /// Position of the cursor within the differences list, if set.
    pub fn cursor(&self) -> Option<usize> {
        self.cursor
    }

    pub fn difference_count(&self) -> usize {
        self.result.differences().len()
    }

    /// Block index (into [`DiffResult::blocks`]) under the cursor.
    pub fn current_block_index(&self) -> Option<usize> {
        self.cursor.and_then(|c| self.result.differences().get(c).copied())
    }

    pub fn current_block(&self) -> Option<&DiffBlock> {
        self.current_block_index().and_then(|i| self.result.block(i))
    }

    /// Moves to the next difference. Returns `false` when nothing moved.
    ///
    /// From the unset state this selects the first difference.
    pub fn next_difference(&mut self) -> bool {
        let count = self.difference_count();
        let target = match self.cursor {
            _ if count == 0 => return false,
            None => 0,
            Some(c) if c + 1 < count => c + 1,
            Some(_) => return false,
        };
        self.cursor = Some(target);
        true
    }

    /// Moves to the previous difference. Returns `false` when nothing moved.
    ///
    /// From the unset state this selects the first difference.
    pub fn prev_difference(&mut self) -> bool {
        let target = match self.cursor {
            _ if self.difference_count() == 0 => return false,
            None => 0,
            Some(0) => return false,
            Some(c) => c - 1,
        };
        self.cursor = Some(target);
        true
    }

    /// Puts the cursor on difference `position`. Out of range is a no-op.
    pub fn select(&mut self, position: usize) -> bool {
        if position >= self.difference_count() || self.cursor == Some(position) {
            return false;
        }
        self.cursor = Some(position);
        true
    }

    pub fn use_left(&mut self) -> usize {
        self.accept(MergeChoice::Left)
    }

    pub fn use_right(&mut self) -> usize {
        self.accept(MergeChoice::Right)
    }

    pub fn use_both(&mut self) -> usize {
        self.accept(MergeChoice::Both)
    }

    /// Appends the chosen side(s) of the current difference to the output.
    ///
    /// Returns the number of lines appended, unchanged context included. Zero
    /// means the action did not apply (no cursor, or the chosen side is empty)
    /// and the buffer is untouched.
    pub fn accept(&mut self, choice: MergeChoice) -> usize {
        let Some(block_index) = self.current_block_index() else {
            return 0;
        };
        let Some(block) = self.result.block(block_index) else {
            return 0;
        };

        let chosen: Vec<String> = match choice {
            MergeChoice::Left => self.result.left_lines(block).to_vec(),
            MergeChoice::Right => self.result.right_lines(block).to_vec(),
            MergeChoice::Both => self
                .result
                .left_lines(block)
                .iter()
                .chain(self.result.right_lines(block))
                .cloned()
                .collect(),
        };
        if chosen.is_empty() {
            debug!(block = block_index, ?choice, "nothing to merge for this choice");
            return 0;
        }

        let before = self.output.len();
        if block_index >= self.frontier {
            let next = self
                .result
                .differences()
                .iter()
                .copied()
                .find(|&b| b > block_index)
                .unwrap_or(self.result.blocks().len());
            self.write_unchanged(self.frontier..block_index);
            self.output.extend(chosen);
            self.write_unchanged(block_index + 1..next);
            self.frontier = next;
        } else {
            self.output.extend(chosen);
        }

        let appended = self.output.len() - before;
        debug!(block = block_index, ?choice, appended, "merged difference");
        appended
    }

    /// Empties the output buffer. The cursor stays where it is.
    pub fn clear(&mut self) {
        self.output.clear();
        self.frontier = 0;
        debug!("cleared merge output");
    }

    /// The merged lines so far.
    pub fn output(&self) -> &[String] {
        &self.output
    }

    /// The merged document, joined with the platform line terminator.
    pub fn serialize(&self) -> String {
        join_lines(&self.output)
    }

    /// Every block with its highlighting information, in document order.
    pub fn block_views(&self) -> impl Iterator<Item = BlockView> + '_ {
        let current = self.current_block_index();
        self.result.blocks().iter().enumerate().map(move |(index, block)| BlockView {
            index,
            kind: block.kind,
            left: block.left.clone(),
            right: block.right.clone(),
            is_current: current == Some(index),
        })
    }

    /// Writes the `Equal` blocks within `blocks` to the output.
    fn write_unchanged(&mut self, blocks: Range<usize>) {
        for block in self.result.blocks().get(blocks).unwrap_or_default() {
            if block.kind == BlockKind::Equal {
                self.output.extend_from_slice(self.result.left_lines(block));
            }
        }
    }
}

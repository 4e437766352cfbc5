//! Diff and merge model for mergepad.
//!
//! Everything here is UI-agnostic and synchronous. The terminal front end calls
//! into it through a small surface:
//!
//! - [`LineSequence`] / [`split_lines`] / [`join_lines`] -- documents as lines
//! - [`DiffEngine`] / [`DiffResult`] / [`DiffBlock`] -- the typed block list
//! - [`MergeSession`] -- difference cursor plus the merge output buffer
//! - [`read_document`] / [`write_document`] -- file I/O with [`DocumentError`]

pub mod diff;
pub mod document;
pub mod error;
pub mod session;
pub mod text;

pub use diff::{
    compare, AlignedRow, BlockKind, DiffAlgorithm, DiffBlock, DiffEngine, DiffResult, DiffStats,
};
pub use document::{read_document, write_document};
pub use error::{DocumentError, DocumentResult};
pub use session::{BlockView, MergeChoice, MergeSession};
pub use text::{join_lines, split_lines, LineSequence, LINE_ENDING};

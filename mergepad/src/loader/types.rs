//! Owned data types for the document loader thread.
//!
//! Everything here is fully owned and `Send`, so requests can move from the UI
//! thread to the loader and results can move back without borrowing from either.

use std::path::PathBuf;

use mergepad_core::{DiffAlgorithm, DiffResult, DocumentError, LineSequence};
use ratatui::text::{Line, Span};

/// Which of the two compared documents an operation targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Left,
    Right,
}

impl Side {
    /// Lower-case name used in status messages ("left", "right").
    pub fn label(self) -> &'static str {
        match self {
            Side::Left => "left",
            Side::Right => "right",
        }
    }
}

/// Commands sent from the UI thread to the loader thread.
///
/// Sent over a `crossbeam_channel::Sender<LoaderRequest>` owned by `AppState`.
#[derive(Debug)]
pub enum LoaderRequest {
    /// Read a document from disk into one side.
    Load { side: Side, path: PathBuf },
    /// Compare two snapshots of the loaded documents.
    Compare {
        /// Document generation the snapshots were taken at; echoed back so the
        /// UI can tell whether a document was reloaded while the diff ran.
        generation: u64,
        left: LineSequence,
        right: LineSequence,
        algorithm: DiffAlgorithm,
    },
    /// Write the serialized merge to disk.
    Save { path: PathBuf, text: String },
}

/// A document read from disk, with its lines pre-styled for the pane renderer.
#[derive(Debug, Clone, Default)]
pub struct LoadedDocument {
    pub lines: LineSequence,
    /// One styled line per entry of `lines`. `'static` so it can live in
    /// `AppState` without re-highlighting on every frame.
    pub styled: Vec<Line<'static>>,
}

impl LoadedDocument {
    /// Wraps lines without syntax colouring.
    pub fn plain(lines: LineSequence) -> Self {
        let styled = lines.iter().map(|l| Line::from(Span::raw(l.clone()))).collect();
        Self { lines, styled }
    }
}

/// Results sent from the loader thread back to the UI thread.
///
/// Carried inside `AppEvent::Loader(Box<LoaderResult>)`; boxing keeps the event
/// enum small since a `DiffResult` holds both documents.
#[derive(Debug)]
pub enum LoaderResult {
    Loaded {
        side: Side,
        path: PathBuf,
        outcome: Result<LoadedDocument, DocumentError>,
    },
    Compared {
        generation: u64,
        result: DiffResult,
    },
    Saved {
        path: PathBuf,
        outcome: Result<(), DocumentError>,
    },
}

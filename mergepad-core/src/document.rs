//! Whole-document file I/O.
//!
//! Reads are UTF-8 only; the bytes are decoded strictly so a binary file is
//! reported instead of silently mangled. Writes replace the target in place.

use std::fs;
use std::path::Path;

use tracing::{debug, warn};

use crate::error::{DocumentError, DocumentResult};
use crate::text::LineSequence;

/// Reads the file at `path` and splits it into lines.
///
/// # Errors
///
/// [`DocumentError::Read`] when the file cannot be read and
/// [`DocumentError::Decode`] when it is not UTF-8.
pub fn read_document(path: &Path) -> DocumentResult<LineSequence> {
    let bytes = fs::read(path).map_err(|source| {
        warn!(path = %path.display(), error = %source, "document read failed");
        DocumentError::Read { path: path.to_path_buf(), source }
    })?;
    let text = String::from_utf8(bytes).map_err(|source| {
        warn!(path = %path.display(), "document is not UTF-8");
        DocumentError::Decode { path: path.to_path_buf(), source }
    })?;
    let lines = LineSequence::from_text(&text);
    debug!(path = %path.display(), lines = lines.len(), "document loaded");
    Ok(lines)
}

/// Writes `text` to `path`, creating or truncating the file.
///
/// # Errors
///
/// [`DocumentError::Write`] when the target cannot be written.
pub fn write_document(path: &Path, text: &str) -> DocumentResult<()> {
    fs::write(path, text).map_err(|source| {
        warn!(path = %path.display(), error = %source, "document write failed");
        DocumentError::Write { path: path.to_path_buf(), source }
    })?;
    debug!(path = %path.display(), bytes = text.len(), "document saved");
    Ok(())
}

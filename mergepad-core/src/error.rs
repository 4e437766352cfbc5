//! Error types for document I/O.

use std::path::PathBuf;

/// Errors raised while loading or saving a document.
///
/// None of these are fatal: the caller reports them and stays interactive.
/// Invalid merge actions are not errors at all; see
/// [`MergeSession::accept`](crate::session::MergeSession::accept).
#[derive(Debug, thiserror::Error)]
pub enum DocumentError {
    /// The file is missing or unreadable.
    #[error("could not open {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The file was read but is not UTF-8 text.
    #[error("could not open {}: not valid UTF-8 text", .path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: std::string::FromUtf8Error,
    },

    /// The save target could not be written.
    #[error("could not save {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl DocumentError {
    /// The path the failed operation was working on.
    pub fn path(&self) -> &std::path::Path {
        match self {
            DocumentError::Read { path, .. }
            | DocumentError::Decode { path, .. }
            | DocumentError::Write { path, .. } => path,
        }
    }
}

/// Convenience alias for document results.
pub type DocumentResult<T> = Result<T, DocumentError>;

//! Background thread that serves load, compare and save requests.
//!
//! The thread owns nothing but its channels: every request carries the data it
//! needs and every result is fully owned, so the merge model itself stays on
//! the UI thread.

use crossbeam_channel::Receiver;
use mergepad_core::{read_document, write_document, DiffEngine};
use tokio::sync::mpsc::UnboundedSender;

use crate::event::AppEvent;
use crate::highlight;
use crate::loader::types::{LoadedDocument, LoaderRequest, LoaderResult};

/// Entry point for the loader thread.
///
/// Loops over incoming requests until the channel is closed (sender dropped)
/// or the event bus receiver is gone.
pub fn loader_loop(
    rx: Receiver<LoaderRequest>,
    event_tx: UnboundedSender<AppEvent>,
    syntax_highlight: bool,
) {
    if syntax_highlight {
        highlight::warm_up();
    }

    for request in rx {
        let result = handle_request(request, syntax_highlight);
        if event_tx.send(AppEvent::Loader(Box::new(result))).is_err() {
            break;
        }
    }
    tracing::debug!("loader thread exiting");
}

/// Runs one request to completion.
///
/// Also called directly on the UI thread when no loader thread is running.
pub fn handle_request(request: LoaderRequest, syntax_highlight: bool) -> LoaderResult {
    match request {
        LoaderRequest::Load { side, path } => {
            let outcome = read_document(&path).map(|lines| {
                if syntax_highlight {
                    let styled = highlight::style_lines(&lines, &path);
                    LoadedDocument { lines, styled }
                } else {
                    LoadedDocument::plain(lines)
                }
            });
            LoaderResult::Loaded {
                side,
                path,
                outcome,
            }
        }
        LoaderRequest::Compare {
            generation,
            left,
            right,
            algorithm,
        } => LoaderResult::Compared {
            generation,
            result: DiffEngine::new(algorithm).compare(left, right),
        },
        LoaderRequest::Save { path, text } => {
            let outcome = write_document(&path, &text);
            LoaderResult::Saved { path, outcome }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loader::types::Side;
    use mergepad_core::{DiffAlgorithm, LineSequence};

    #[test]
    fn load_reads_and_styles_every_line() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("left.txt");
        std::fs::write(&path, "one\ntwo\n").unwrap();

        let result = handle_request(
            LoaderRequest::Load {
                side: Side::Left,
                path: path.clone(),
            },
            false,
        );
        match result {
            LoaderResult::Loaded {
                side: Side::Left,
                path: p,
                outcome: Ok(doc),
            } => {
                assert_eq!(p, path);
                assert_eq!(doc.lines.lines(), &["one", "two"]);
                assert_eq!(doc.styled.len(), 2);
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn load_failure_is_reported_not_raised() {
        let dir = tempfile::TempDir::new().unwrap();
        let result = handle_request(
            LoaderRequest::Load {
                side: Side::Right,
                path: dir.path().join("missing.txt"),
            },
            false,
        );
        assert!(matches!(
            result,
            LoaderResult::Loaded {
                side: Side::Right,
                outcome: Err(_),
                ..
            }
        ));
    }

    #[test]
    fn compare_echoes_generation() {
        let left: LineSequence = ["a", "b"].into_iter().collect();
        let right: LineSequence = ["a", "c"].into_iter().collect();
        let result = handle_request(
            LoaderRequest::Compare {
                generation: 7,
                left,
                right,
                algorithm: DiffAlgorithm::Patience,
            },
            false,
        );
        match result {
            LoaderResult::Compared { generation, result } => {
                assert_eq!(generation, 7);
                assert_eq!(result.differences().len(), 1);
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn save_writes_text() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("out.txt");
        let result = handle_request(
            LoaderRequest::Save {
                path: path.clone(),
                text: "merged".to_owned(),
            },
            false,
        );
        assert!(matches!(result, LoaderResult::Saved { outcome: Ok(()), .. }));
        assert_eq!(std::fs::read_to_string(path).unwrap(), "merged");
    }
}

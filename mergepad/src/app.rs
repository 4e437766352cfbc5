//! Central application state for mergepad.
//!
//! This module owns all mutable UI state: the current mode, which panel has
//! focus, per-panel scroll offsets and viewport heights, panel geometry, the two
//! loaded documents and the merge session. No ratatui rendering logic lives
//! here; `app.rs` is read by the render module and mutated by the keybinding
//! dispatcher and by loader results.

use std::path::PathBuf;

use crossbeam_channel::{SendError, Sender};
use mergepad_core::{AlignedRow, DiffAlgorithm, DiffResult, LineSequence, MergeChoice, MergeSession};
use ratatui::layout::Rect;
use ratatui::text::Line;

use crate::loader::types::{LoadedDocument, LoaderRequest, LoaderResult, Side};
use crate::loader::worker::handle_request;

/// Rows kept visible above the current difference when navigation scrolls to it.
const SCROLL_CONTEXT: usize = 2;

/// Editor mode controlling which keybinding set is active.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Normal vim-style navigation mode (default).
    #[default]
    Normal,
    /// A path prompt is open; keys edit `AppState::prompt`.
    Prompt,
    /// Full-screen help overlay is shown above all panels.
    HelpOverlay,
    /// Quit confirmation shown when the merged result has unsaved lines.
    ConfirmQuit,
}

/// Which panel currently has keyboard focus.
///
/// Cycle order: `Left` → `Right` → `Merged` → `Left`.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum PanelFocus {
    #[default]
    Left,
    Right,
    Merged,
}

impl PanelFocus {
    pub fn prev(self) -> Self {
        match self {
            PanelFocus::Left => PanelFocus::Merged,
            PanelFocus::Right => PanelFocus::Left,
            PanelFocus::Merged => PanelFocus::Right,
        }
    }

    pub fn next(self) -> Self {
        match self {
            PanelFocus::Left => PanelFocus::Right,
            PanelFocus::Right => PanelFocus::Merged,
            PanelFocus::Merged => PanelFocus::Left,
        }
    }

    /// Position in `AppState::panel_areas`.
    pub fn index(self) -> usize {
        match self {
            PanelFocus::Left => 0,
            PanelFocus::Right => 1,
            PanelFocus::Merged => 2,
        }
    }
}

impl From<Side> for PanelFocus {
    fn from(side: Side) -> Self {
        match side {
            Side::Left => PanelFocus::Left,
            Side::Right => PanelFocus::Right,
        }
    }
}

/// What an open path prompt will do on Enter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptTarget {
    Load(Side),
    Save,
}

/// An open single-line path prompt.
#[derive(Debug, Clone)]
pub struct Prompt {
    pub target: PromptTarget,
    pub input: String,
}

/// Message shown in the status bar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusMessage {
    pub text: String,
    pub is_error: bool,
}

/// One of the two compared documents as shown in its pane.
#[derive(Debug, Clone, Default)]
pub struct Document {
    /// `None` until a file has been loaded into this side.
    pub path: Option<PathBuf>,
    /// The contents came from a terminal paste rather than a file.
    pub pasted: bool,
    pub lines: LineSequence,
    /// Pre-styled copy of `lines`, one entry per line.
    pub styled: Vec<Line<'static>>,
}

impl Document {
    /// A file was loaded or text was pasted into this side.
    pub fn is_loaded(&self) -> bool {
        self.path.is_some() || self.pasted
    }
}

/// All mutable UI state passed through every render cycle.
pub struct AppState {
    pub mode: Mode,
    pub focus: PanelFocus,
    /// Open path prompt; `Some` exactly while `mode == Mode::Prompt`.
    pub prompt: Option<Prompt>,

    pub left: Document,
    pub right: Document,

    /// Merge session over the most recent compare. Replaced wholesale on every
    /// compare.
    pub session: Option<MergeSession>,
    /// Aligned rows of the current session's result, cached for sync view.
    pub aligned: Vec<AlignedRow>,
    /// A document was reloaded after the current session was computed.
    pub diff_stale: bool,
    /// A compare request is in flight on the loader thread.
    pub diff_loading: bool,
    /// Bumped on every successful load; compare results from an older
    /// generation arrive stale.
    pub generation: u64,
    /// Compare automatically once both documents have loaded (CLI startup).
    pub pending_compare: bool,

    pub algorithm: DiffAlgorithm,
    pub syntax_highlight: bool,
    /// Side panes render aligned rows and scroll together.
    pub sync_view: bool,

    pub left_scroll: usize,
    pub right_scroll: usize,
    /// Scroll offset into `aligned` while sync view is active.
    pub sync_scroll: usize,
    pub merged_scroll: usize,
    pub help_scroll: u16,

    /// Inner height of the document panes after borders, cached after each render.
    pub pane_viewport_height: u16,
    /// Inner height of the merged panel after borders, cached after each render.
    pub merged_viewport_height: u16,

    /// Width percentage of the left document pane. Default: 35.
    pub left_pct: u16,
    /// Width percentage of the right document pane. Default: 35.
    pub right_pct: u16,
    /// Share of the merged panel (width in wide layout, height in narrow). Default: 30.
    pub merged_pct: u16,
    /// Outer panel rectangles from the last render (Left, Right, Merged), for
    /// mouse hit-testing.
    pub panel_areas: [Rect; 3],

    /// Merged lines were appended since the last save, clear or compare.
    pub has_unsaved_merge: bool,
    /// Default save target, pre-filled into the save prompt.
    pub output_path: Option<PathBuf>,
    pub status: Option<StatusMessage>,

    /// Channel to the loader thread. `None` runs requests inline.
    pub loader_tx: Option<Sender<LoaderRequest>>,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            mode: Mode::default(),
            focus: PanelFocus::default(),
            prompt: None,
            left: Document::default(),
            right: Document::default(),
            session: None,
            aligned: Vec::new(),
            diff_stale: false,
            diff_loading: false,
            generation: 0,
            pending_compare: false,
            algorithm: DiffAlgorithm::default(),
            syntax_highlight: false,
            sync_view: false,
            left_scroll: 0,
            right_scroll: 0,
            sync_scroll: 0,
            merged_scroll: 0,
            help_scroll: 0,
            pane_viewport_height: 0,
            merged_viewport_height: 0,
            left_pct: 35,
            right_pct: 35,
            merged_pct: 30,
            panel_areas: [Rect::default(); 3],
            has_unsaved_merge: false,
            output_path: None,
            status: None,
            loader_tx: None,
        }
    }
}

impl AppState {
    pub fn document(&self, side: Side) -> &Document {
        match side {
            Side::Left => &self.left,
            Side::Right => &self.right,
        }
    }

    fn document_mut(&mut self, side: Side) -> &mut Document {
        match side {
            Side::Left => &mut self.left,
            Side::Right => &mut self.right,
        }
    }

    /// The session, unless the documents changed since it was computed.
    pub fn active_session(&self) -> Option<&MergeSession> {
        self.session.as_ref().filter(|_| !self.diff_stale)
    }

    pub fn active_result(&self) -> Option<&DiffResult> {
        self.active_session().map(MergeSession::result)
    }

    /// Sync view only applies while there is a fresh diff to align against.
    pub fn sync_active(&self) -> bool {
        self.sync_view && self.active_session().is_some()
    }

    /// The merged document so far.
    pub fn merged_lines(&self) -> &[String] {
        self.session.as_ref().map(MergeSession::output).unwrap_or_default()
    }

    pub fn set_status(&mut self, text: impl Into<String>) {
        self.status = Some(StatusMessage {
            text: text.into(),
            is_error: false,
        });
    }

    pub fn set_error(&mut self, text: impl Into<String>) {
        let text = text.into();
        tracing::warn!("{text}");
        self.status = Some(StatusMessage {
            text,
            is_error: true,
        });
    }

    // ------------------------------------------------------------------ loader

    /// Hands a request to the loader thread, or runs it inline when none is
    /// running.
    fn dispatch(&mut self, request: LoaderRequest) {
        let request = match &self.loader_tx {
            Some(tx) => match tx.send(request) {
                Ok(()) => return,
                Err(SendError(request)) => {
                    tracing::warn!("loader thread is gone; running requests inline");
                    self.loader_tx = None;
                    request
                }
            },
            None => request,
        };
        let result = handle_request(request, self.syntax_highlight);
        self.apply_loader_result(result);
    }

    pub fn request_load(&mut self, side: Side, path: PathBuf) {
        tracing::info!(side = side.label(), path = %path.display(), "loading document");
        self.set_status(format!("Loading {} file: {}", side.label(), path.display()));
        self.dispatch(LoaderRequest::Load { side, path });
    }

    /// Compares the currently loaded documents.
    pub fn request_compare(&mut self) {
        self.diff_loading = true;
        self.set_status("Comparing…");
        self.dispatch(LoaderRequest::Compare {
            generation: self.generation,
            left: self.left.lines.clone(),
            right: self.right.lines.clone(),
            algorithm: self.algorithm,
        });
    }

    /// Writes the merged document to `path`. An empty merge is refused.
    pub fn request_save(&mut self, path: PathBuf) {
        let Some(session) = self.session.as_ref().filter(|s| !s.output().is_empty()) else {
            self.set_status("Merged document is empty.");
            return;
        };
        let text = session.serialize();
        tracing::info!(path = %path.display(), lines = session.output().len(), "saving merge");
        self.dispatch(LoaderRequest::Save { path, text });
    }

    /// Applies a result from the loader thread.
    pub fn apply_loader_result(&mut self, result: LoaderResult) {
        match result {
            LoaderResult::Loaded {
                side,
                path,
                outcome: Ok(doc),
            } => self.install_document(side, Some(path), doc),
            LoaderResult::Loaded {
                outcome: Err(e), ..
            } => {
                self.pending_compare = false;
                self.set_error(e.to_string());
            }
            LoaderResult::Compared { generation, result } => {
                self.install_result(result, generation != self.generation);
            }
            LoaderResult::Saved {
                path,
                outcome: Ok(()),
            } => {
                self.has_unsaved_merge = false;
                self.set_status(format!("Merged file saved to: {}", path.display()));
                self.output_path = Some(path);
            }
            LoaderResult::Saved {
                outcome: Err(e), ..
            } => self.set_error(e.to_string()),
        }
    }

    /// Replaces the document on `side` with pasted text.
    ///
    /// Pasted text has no file name to pick a syntax from, so it is shown
    /// unstyled.
    pub fn paste_document(&mut self, side: Side, text: &str) {
        if text.is_empty() {
            self.set_status("Nothing to paste.");
            return;
        }
        let lines = LineSequence::from_text(text);
        tracing::info!(side = side.label(), lines = lines.len(), "pasted document");
        self.install_document(side, None, LoadedDocument::plain(lines));
    }

    fn install_document(&mut self, side: Side, path: Option<PathBuf>, doc: LoadedDocument) {
        let line_count = doc.lines.len();
        let message = match &path {
            Some(path) => format!("Loaded {} file: {}", side.label(), path.display()),
            None => format!("Pasted {line_count} line(s) into the {} pane.", side.label()),
        };
        *self.document_mut(side) = Document {
            pasted: path.is_none(),
            path,
            lines: doc.lines,
            styled: doc.styled,
        };
        self.generation += 1;
        match side {
            Side::Left => self.left_scroll = 0,
            Side::Right => self.right_scroll = 0,
        }
        if self.session.is_some() {
            self.diff_stale = true;
        }
        tracing::debug!(side = side.label(), lines = line_count, "document installed");
        self.set_status(message);

        if self.pending_compare && self.left.is_loaded() && self.right.is_loaded() {
            self.pending_compare = false;
            self.request_compare();
        }
    }

    /// Replaces the session with one over `result`, discarding the previous
    /// merged output.
    fn install_result(&mut self, result: DiffResult, stale: bool) {
        let discarded = self.has_unsaved_merge;
        let stats = result.stats();
        let identical = result.is_identical();

        self.aligned = result.aligned_rows();
        self.session = Some(MergeSession::new(result));
        self.diff_stale = stale;
        self.diff_loading = false;
        self.has_unsaved_merge = false;
        self.left_scroll = 0;
        self.right_scroll = 0;
        self.sync_scroll = 0;
        self.merged_scroll = 0;

        tracing::info!(
            differences = stats.differences(),
            left_only = stats.left_only,
            right_only = stats.right_only,
            replaced = stats.replaced,
            stale,
            "compare finished"
        );

        let mut message = if stale {
            "A document changed while comparing; press c to compare again.".to_owned()
        } else if identical {
            "The documents are identical.".to_owned()
        } else {
            format!("Found {} differing block(s).", stats.differences())
        };
        if discarded {
            message.push_str(" Previous merge discarded.");
        }
        self.set_status(message);
    }

    // -------------------------------------------------------------- navigation

    /// Returns the session if it can be navigated or merged, otherwise explains
    /// why not in the status bar.
    fn usable_session(&mut self) -> Option<&mut MergeSession> {
        if self.session.is_none() {
            self.set_status("Compare the documents first (c).");
            return None;
        }
        if self.diff_stale {
            self.set_status("Documents changed since the last compare; press c to compare again.");
            return None;
        }
        self.session.as_mut()
    }

    pub fn next_difference(&mut self) {
        if let Some(session) = self.usable_session() {
            session.next_difference();
            self.after_navigation();
        }
    }

    pub fn prev_difference(&mut self) {
        if let Some(session) = self.usable_session() {
            session.prev_difference();
            self.after_navigation();
        }
    }

    fn after_navigation(&mut self) {
        let Some(session) = self.session.as_ref() else {
            return;
        };
        match session.cursor() {
            Some(cursor) => {
                let total = session.difference_count();
                self.scroll_to_current();
                self.set_status(format!("Viewing difference {} of {}", cursor + 1, total));
            }
            None => self.set_status("The documents are identical."),
        }
    }

    /// Scrolls the document panes so the current difference is in view.
    pub fn scroll_to_current(&mut self) {
        let Some(session) = self.session.as_ref() else {
            return;
        };
        let (Some(index), Some(block)) = (session.current_block_index(), session.current_block())
        else {
            return;
        };
        self.sync_scroll = session
            .result()
            .aligned_row_of_block(index)
            .saturating_sub(SCROLL_CONTEXT);
        self.left_scroll = block.left.start.saturating_sub(SCROLL_CONTEXT);
        self.right_scroll = block.right.start.saturating_sub(SCROLL_CONTEXT);
    }

    /// Selects the difference shown at `row` (0-based, inside the borders) of
    /// `pane`, if the row belongs to one. Used for mouse clicks.
    pub fn select_difference_at(&mut self, pane: PanelFocus, row: usize) {
        let sync = self.sync_active();
        let Some(result) = self.active_result() else {
            return;
        };
        let block = match pane {
            _ if sync && pane != PanelFocus::Merged => {
                self.aligned.get(self.sync_scroll + row).map(|r| r.block)
            }
            PanelFocus::Left => result.block_at_left_line(self.left_scroll + row),
            PanelFocus::Right => result.block_at_right_line(self.right_scroll + row),
            PanelFocus::Merged => None,
        };
        let Some(position) = block.and_then(|b| result.difference_position(b)) else {
            return;
        };
        if let Some(session) = self.session.as_mut() {
            session.select(position);
            let total = session.difference_count();
            self.set_status(format!("Viewing difference {} of {}", position + 1, total));
        }
    }

    // ------------------------------------------------------------------- merge

    /// Appends the chosen side(s) of the current difference to the merge.
    pub fn accept(&mut self, choice: MergeChoice) {
        let Some(session) = self.usable_session() else {
            return;
        };
        if session.cursor().is_none() {
            self.set_status("No difference selected.");
            return;
        }
        let appended = session.accept(choice);
        let total = session.output().len();
        if appended == 0 {
            self.set_status("Nothing to merge for this choice.");
            return;
        }
        tracing::debug!(?choice, appended, "merge appended");
        self.has_unsaved_merge = true;
        self.merged_scroll = total.saturating_sub(self.merged_viewport_height.max(1) as usize);
        self.set_status("Appended selection to the merged document.");
    }

    pub fn clear_merge(&mut self) {
        if let Some(session) = self.session.as_mut() {
            session.clear();
        }
        self.has_unsaved_merge = false;
        self.merged_scroll = 0;
        self.set_status("Cleared merged document.");
    }

    pub fn toggle_sync_view(&mut self) {
        self.sync_view = !self.sync_view;
        if self.sync_view {
            self.sync_scroll = self.aligned_row_for_focus();
            self.set_status("Sync view enabled. Panes now scroll together.");
        } else {
            self.set_status("Sync view disabled.");
        }
    }

    /// The aligned row holding the first visible line of the focused side
    /// pane, so enabling sync view keeps that line in place.
    fn aligned_row_for_focus(&self) -> usize {
        let position = match self.focus {
            PanelFocus::Right => self
                .aligned
                .iter()
                .position(|r| r.right.is_some_and(|line| line >= self.right_scroll)),
            _ => self
                .aligned
                .iter()
                .position(|r| r.left.is_some_and(|line| line >= self.left_scroll)),
        };
        position.unwrap_or(0)
    }

    // ----------------------------------------------------------------- prompts

    /// Opens the load prompt for `side`, pre-filled with its current path.
    pub fn begin_load(&mut self, side: Side) {
        let input = self
            .document(side)
            .path
            .as_ref()
            .map(|p| p.display().to_string())
            .unwrap_or_default();
        self.open_prompt(PromptTarget::Load(side), input);
    }

    /// Opens the save prompt, unless there is nothing to save.
    pub fn begin_save(&mut self) {
        if self.merged_lines().is_empty() {
            self.set_status("Merged document is empty.");
            return;
        }
        let input = self
            .output_path
            .as_ref()
            .map(|p| p.display().to_string())
            .unwrap_or_default();
        self.open_prompt(PromptTarget::Save, input);
    }

    fn open_prompt(&mut self, target: PromptTarget, input: String) {
        self.prompt = Some(Prompt { target, input });
        self.mode = Mode::Prompt;
    }

    pub fn cancel_prompt(&mut self) {
        self.prompt = None;
        self.mode = Mode::Normal;
    }

    /// Runs the open prompt's action. An empty path cancels.
    pub fn submit_prompt(&mut self) {
        let Some(prompt) = self.prompt.take() else {
            self.mode = Mode::Normal;
            return;
        };
        self.mode = Mode::Normal;
        let input = prompt.input.trim();
        if input.is_empty() {
            return;
        }
        let path = PathBuf::from(input);
        match prompt.target {
            PromptTarget::Load(side) => {
                self.focus = side.into();
                self.request_load(side, path);
            }
            PromptTarget::Save => self.request_save(path),
        }
    }

    // ------------------------------------------------------------------ scroll

    /// Number of scrollable rows in the focused panel.
    fn scroll_len(&self) -> usize {
        match self.focus {
            PanelFocus::Left | PanelFocus::Right if self.sync_active() => self.aligned.len(),
            PanelFocus::Left => self.left.lines.len(),
            PanelFocus::Right => self.right.lines.len(),
            PanelFocus::Merged => self.merged_lines().len(),
        }
    }

    fn scroll_slot(&mut self) -> &mut usize {
        let sync = self.sync_active();
        match self.focus {
            PanelFocus::Left | PanelFocus::Right if sync => &mut self.sync_scroll,
            PanelFocus::Left => &mut self.left_scroll,
            PanelFocus::Right => &mut self.right_scroll,
            PanelFocus::Merged => &mut self.merged_scroll,
        }
    }

    fn viewport_height(&self) -> u16 {
        match self.focus {
            PanelFocus::Left | PanelFocus::Right => self.pane_viewport_height,
            PanelFocus::Merged => self.merged_viewport_height,
        }
    }

    /// Scrolls the focused panel down by `lines` rows, stopping at the last row.
    pub fn scroll_down(&mut self, lines: u16) {
        let max = self.scroll_len().saturating_sub(1);
        let slot = self.scroll_slot();
        *slot = slot.saturating_add(lines as usize).min(max);
    }

    pub fn scroll_up(&mut self, lines: u16) {
        let slot = self.scroll_slot();
        *slot = slot.saturating_sub(lines as usize);
    }

    pub fn scroll_top(&mut self) {
        *self.scroll_slot() = 0;
    }

    pub fn scroll_bottom(&mut self) {
        let max = self.scroll_len().saturating_sub(1);
        *self.scroll_slot() = max;
    }

    /// Uses the viewport height cached from the previous render; scrolls by at
    /// least one row on the first frame.
    pub fn half_page_down(&mut self) {
        self.scroll_down((self.viewport_height() / 2).max(1));
    }

    pub fn half_page_up(&mut self) {
        self.scroll_up((self.viewport_height() / 2).max(1));
    }

    pub fn full_page_down(&mut self) {
        self.scroll_down(self.viewport_height().max(1));
    }

    pub fn full_page_up(&mut self) {
        self.scroll_up(self.viewport_height().max(1));
    }

    // ------------------------------------------------------------------ layout

    /// Shrinks the merged panel by 5%, giving the space to the document panes.
    /// The merged panel will not shrink below 15%.
    pub fn shrink_merged_panel(&mut self) {
        const MIN_MERGED: u16 = 15;
        const STEP: u16 = 5;
        if self.merged_pct <= MIN_MERGED {
            return;
        }
        let transfer = STEP.min(self.merged_pct - MIN_MERGED);
        self.merged_pct -= transfer;
        let left_gain = transfer / 2;
        self.left_pct += left_gain;
        self.right_pct += transfer - left_gain;
    }

    /// Grows the merged panel by 5%, taken from the document panes. The
    /// merged panel will not grow above 70% and neither side drops below 10%.
    pub fn grow_merged_panel(&mut self) {
        const MAX_MERGED: u16 = 70;
        const MIN_SIDE: u16 = 10;
        const STEP: u16 = 5;
        if self.merged_pct >= MAX_MERGED {
            return;
        }
        let transfer = STEP.min(MAX_MERGED - self.merged_pct);
        let left_give = (transfer / 2).min(self.left_pct.saturating_sub(MIN_SIDE));
        let right_give = (transfer - transfer / 2).min(self.right_pct.saturating_sub(MIN_SIDE));
        self.left_pct -= left_give;
        self.right_pct -= right_give;
        self.merged_pct += left_give + right_give;
    }
}

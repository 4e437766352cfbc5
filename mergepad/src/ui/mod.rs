//! UI rendering module for mergepad.
//!
//! `render()` is the single entry point called by the event loop's
//! `terminal.draw()` closure. Layout arithmetic lives in `layout.rs`, the
//! document panes in `pane.rs` and the merged panel in `merge_view.rs`.

mod layout;
pub mod help;
pub mod keybindings;
pub mod merge_view;
pub mod pane;
pub mod prompt;

use ratatui::Frame;

use crate::app::{AppState, Mode};
use crate::loader::types::Side;
use crate::theme::Theme;
use layout::{compute_layout, inner_rect, render_status_bar};

/// Renders one complete frame: three panels, status bar and any overlay.
///
/// Viewport heights and panel areas are written back into `state` so that
/// scroll and mouse handling for the *next* event use this frame's geometry.
pub fn render(frame: &mut Frame, state: &mut AppState, theme: &Theme) {
    let [left, right, merged, status_bar] = compute_layout(frame, state);

    state.pane_viewport_height = inner_rect(left).height;
    state.merged_viewport_height = inner_rect(merged).height;
    state.panel_areas = [left, right, merged];

    let focus = state.focus;
    pane::render_document_pane(frame, left, Side::Left, focus, state, theme);
    pane::render_document_pane(frame, right, Side::Right, focus, state, theme);
    merge_view::render_merged(frame, merged, focus, state, theme);

    render_status_bar(frame, status_bar, state, theme);

    // Overlays last so they sit on top.
    match state.mode {
        Mode::HelpOverlay => help::render_help_overlay(frame, theme, state.help_scroll),
        Mode::ConfirmQuit => prompt::render_confirm_quit(frame, theme),
        Mode::Prompt => {
            if let Some(p) = &state.prompt {
                prompt::render_prompt(frame, p, theme);
            }
        }
        Mode::Normal => {}
    }
}

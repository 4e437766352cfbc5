//! Keybinding dispatcher for mergepad.
//!
//! Translates raw crossterm `KeyEvent`s into `AppState` mutations and returns a
//! `KeyAction` telling the event loop whether to continue or quit. The
//! dispatcher branches first on `state.mode` so that HelpOverlay, ConfirmQuit,
//! Prompt and Normal all have isolated handler functions.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use mergepad_core::MergeChoice;
use ratatui::layout::Position;
use std::path::PathBuf;

use crate::app::{AppState, Mode, PanelFocus};
use crate::loader::types::Side;
use crate::ui::layout::inner_rect;

/// Control-flow signal returned from the key dispatcher.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    /// Continue the event loop normally.
    Continue,
    /// Exit cleanly.
    Quit,
}

/// Dispatches a key event to the handler matching the current mode.
pub fn handle_key(key: KeyEvent, state: &mut AppState) -> KeyAction {
    match state.mode {
        Mode::HelpOverlay => handle_help(key, state),
        Mode::ConfirmQuit => handle_confirm_quit(key, state),
        Mode::Prompt => handle_prompt(key, state),
        Mode::Normal => handle_normal(key, state),
    }
}

// ---------------------------------------------------------------------------
// Normal mode
// ---------------------------------------------------------------------------

fn handle_normal(key: KeyEvent, state: &mut AppState) -> KeyAction {
    // Scroll keys first so Ctrl-b is not taken for "use both".
    if let Some(action) = handle_scroll_key(key, state) {
        return action;
    }
    if let Some(action) = handle_merge_key(key, state) {
        return action;
    }

    match key.code {
        // Panel focus
        KeyCode::Char('H') | KeyCode::BackTab => {
            state.focus = state.focus.prev();
            KeyAction::Continue
        }
        KeyCode::Char('L') | KeyCode::Tab => {
            state.focus = state.focus.next();
            KeyAction::Continue
        }

        // Documents
        KeyCode::Char('o') => { state.begin_load(Side::Left); KeyAction::Continue }
        KeyCode::Char('O') => { state.begin_load(Side::Right); KeyAction::Continue }
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => request_quit(state),
        KeyCode::Char('c') => { state.request_compare(); KeyAction::Continue }
        KeyCode::Char('s') => { state.toggle_sync_view(); KeyAction::Continue }

        // Merged panel resize
        KeyCode::Char('<') => { state.shrink_merged_panel(); KeyAction::Continue }
        KeyCode::Char('>') => { state.grow_merged_panel(); KeyAction::Continue }

        KeyCode::Char('?') => {
            state.help_scroll = 0;
            state.mode = Mode::HelpOverlay;
            KeyAction::Continue
        }

        KeyCode::Char('q') | KeyCode::Esc => request_quit(state),

        _ => KeyAction::Continue,
    }
}

/// Quits at once, or asks first when the merge has unsaved changes.
fn request_quit(state: &mut AppState) -> KeyAction {
    if state.has_unsaved_merge {
        state.mode = Mode::ConfirmQuit;
        KeyAction::Continue
    } else {
        KeyAction::Quit
    }
}

/// Difference navigation and merge actions. Returns `None` when the key
/// should fall through to the rest of the Normal handler.
fn handle_merge_key(key: KeyEvent, state: &mut AppState) -> Option<KeyAction> {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return None;
    }
    match key.code {
        KeyCode::Char('n') | KeyCode::Char(']') => state.next_difference(),
        KeyCode::Char('p') | KeyCode::Char('[') => state.prev_difference(),
        KeyCode::Char('1') => state.accept(MergeChoice::Left),
        KeyCode::Char('2') => state.accept(MergeChoice::Right),
        KeyCode::Char('b') | KeyCode::Char('3') => state.accept(MergeChoice::Both),
        KeyCode::Char('x') => state.clear_merge(),
        KeyCode::Char('w') => state.begin_save(),
        _ => return None,
    }
    Some(KeyAction::Continue)
}

/// j / k / g / G, arrows and the Ctrl page keys.
fn handle_scroll_key(key: KeyEvent, state: &mut AppState) -> Option<KeyAction> {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

    match key.code {
        KeyCode::Char('j') | KeyCode::Down => state.scroll_down(1),
        KeyCode::Char('k') | KeyCode::Up => state.scroll_up(1),
        KeyCode::Char('g') | KeyCode::Home => state.scroll_top(),
        KeyCode::Char('G') | KeyCode::End => state.scroll_bottom(),
        KeyCode::Char('d') if ctrl => state.half_page_down(),
        KeyCode::Char('u') if ctrl => state.half_page_up(),
        KeyCode::Char('f') if ctrl => state.full_page_down(),
        KeyCode::Char('b') if ctrl => state.full_page_up(),
        KeyCode::PageDown => state.full_page_down(),
        KeyCode::PageUp => state.full_page_up(),
        _ => return None,
    }
    Some(KeyAction::Continue)
}

// ---------------------------------------------------------------------------
// Prompt mode
// ---------------------------------------------------------------------------

/// Line editing for the path prompt.
fn handle_prompt(key: KeyEvent, state: &mut AppState) -> KeyAction {
    match key.code {
        KeyCode::Enter => state.submit_prompt(),
        KeyCode::Esc => state.cancel_prompt(),
        code => {
            let Some(prompt) = state.prompt.as_mut() else {
                state.mode = Mode::Normal;
                return KeyAction::Continue;
            };
            let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
            match code {
                KeyCode::Char('u') if ctrl => prompt.input.clear(),
                KeyCode::Char(c) if !ctrl => prompt.input.push(c),
                KeyCode::Backspace => {
                    prompt.input.pop();
                }
                _ => {}
            }
        }
    }
    KeyAction::Continue
}

// ---------------------------------------------------------------------------
// HelpOverlay mode
// ---------------------------------------------------------------------------

fn handle_help(key: KeyEvent, state: &mut AppState) -> KeyAction {
    match key.code {
        KeyCode::Char('j') | KeyCode::Down => {
            state.help_scroll = state.help_scroll.saturating_add(1);
        }
        KeyCode::Char('k') | KeyCode::Up => {
            state.help_scroll = state.help_scroll.saturating_sub(1);
        }
        KeyCode::Char('g') => state.help_scroll = 0,
        KeyCode::Char('G') => state.help_scroll = u16::MAX,
        KeyCode::Char('?') | KeyCode::Esc | KeyCode::Char('q') => state.mode = Mode::Normal,
        _ => {}
    }
    KeyAction::Continue
}

// ---------------------------------------------------------------------------
// ConfirmQuit mode
// ---------------------------------------------------------------------------

/// `y` confirms the quit; `n` or `Esc` returns to Normal mode.
fn handle_confirm_quit(key: KeyEvent, state: &mut AppState) -> KeyAction {
    match key.code {
        KeyCode::Char('y') | KeyCode::Char('Y') => KeyAction::Quit,
        KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
            state.mode = Mode::Normal;
            KeyAction::Continue
        }
        _ => KeyAction::Continue,
    }
}

// ---------------------------------------------------------------------------
// Mouse events
// ---------------------------------------------------------------------------

/// Bracketed paste. In a prompt the text is typed into the input (line breaks
/// dropped); otherwise it replaces the document in the focused side pane.
///
/// Terminals paste the path of a file dragged onto them, so a single line
/// naming an existing file loads that file instead.
pub fn handle_paste(text: &str, state: &mut AppState) {
    match state.mode {
        Mode::Prompt => {
            if let Some(prompt) = state.prompt.as_mut() {
                prompt.input.extend(text.chars().filter(|c| !matches!(c, '\r' | '\n')));
            }
        }
        Mode::Normal => {
            let side = match state.focus {
                PanelFocus::Left => Side::Left,
                PanelFocus::Right => Side::Right,
                PanelFocus::Merged => {
                    state.set_status("Focus the left or right pane to paste a document.");
                    return;
                }
            };
            match dropped_file(text) {
                Some(path) => state.request_load(side, path),
                None => state.paste_document(side, text),
            }
        }
        Mode::HelpOverlay | Mode::ConfirmQuit => {}
    }
}

/// The file named by a one-line paste, with any shell quoting stripped.
fn dropped_file(text: &str) -> Option<PathBuf> {
    let line = text.trim();
    if line.is_empty() || line.contains('\n') {
        return None;
    }
    let unquoted = line
        .strip_prefix('\'')
        .and_then(|l| l.strip_suffix('\''))
        .or_else(|| line.strip_prefix('"').and_then(|l| l.strip_suffix('"')))
        .unwrap_or(line);
    let path = PathBuf::from(unquoted);
    path.is_file().then_some(path)
}

/// Left click focuses a panel and selects the difference under the pointer;
/// the wheel scrolls the focused panel (or the help overlay) by 3 lines.
/// Mouse input is ignored while a prompt or the quit dialog is open.
pub fn handle_mouse(mouse: MouseEvent, state: &mut AppState) -> KeyAction {
    if matches!(state.mode, Mode::Prompt | Mode::ConfirmQuit) {
        return KeyAction::Continue;
    }
    let help = state.mode == Mode::HelpOverlay;
    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) if !help => {
            handle_mouse_click(mouse.column, mouse.row, state);
        }
        MouseEventKind::ScrollUp if help => state.help_scroll = state.help_scroll.saturating_sub(3),
        MouseEventKind::ScrollDown if help => state.help_scroll = state.help_scroll.saturating_add(3),
        MouseEventKind::ScrollUp => state.scroll_up(3),
        MouseEventKind::ScrollDown => state.scroll_down(3),
        _ => {}
    }
    KeyAction::Continue
}

/// Focuses the panel under (`col`, `row`) and, for a click inside a document
/// pane's text area, selects the difference shown on that row.
fn handle_mouse_click(col: u16, row: u16, state: &mut AppState) {
    let pos = Position { x: col, y: row };
    let hit = [PanelFocus::Left, PanelFocus::Right, PanelFocus::Merged]
        .into_iter()
        .find(|panel| {
            let area = state.panel_areas[panel.index()];
            area.width > 0 && area.contains(pos)
        });
    let Some(panel) = hit else {
        return;
    };
    state.focus = panel;

    let inner = inner_rect(state.panel_areas[panel.index()]);
    if inner.contains(pos) {
        state.select_difference_at(panel, (row - inner.y) as usize);
    }
}

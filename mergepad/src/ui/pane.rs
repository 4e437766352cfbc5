//! Document pane renderer for mergepad.
//!
//! Renders the Left and Right panes using a List widget with manual virtual
//! scrolling: only the visible window of rows is materialized per frame, so
//! rendering is O(viewport) regardless of document size.
//!
//! In sync view the rows come from the aligned row list (filler rows included)
//! and both panes share one scroll offset. Otherwise each pane walks its own
//! lines and looks up the block each line belongs to.

use mergepad_core::BlockKind;
use ratatui::{
    Frame,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{List, ListItem},
};

use crate::app::{AppState, Document, PanelFocus};
use crate::loader::types::Side;
use crate::theme::Theme;
use crate::ui::layout::{inner_rect, panel_block};

/// One visible row of a document pane.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaneRow {
    /// Line index into the document; `None` for a filler row.
    pub line: Option<usize>,
    /// Kind of the block the row belongs to and whether it is the current
    /// difference; `None` when there is no fresh diff.
    pub block: Option<(BlockKind, bool)>,
}

/// Renders one document pane.
pub fn render_document_pane(
    frame: &mut Frame,
    area: Rect,
    side: Side,
    focus: PanelFocus,
    state: &AppState,
    theme: &Theme,
) {
    let doc = state.document(side);
    let is_focused = focus == PanelFocus::from(side);
    frame.render_widget(panel_block(pane_title(side, doc, state), is_focused, theme), area);

    let inner = inner_rect(area);
    if doc.lines.is_empty() && !state.sync_active() {
        let msg = match (side, doc.is_loaded()) {
            (_, true) => "(empty file)",
            (Side::Left, false) => "Press o to load the left file.",
            (Side::Right, false) => "Press O to load the right file.",
        };
        let placeholder = ListItem::new(Line::styled(msg, Style::default().fg(theme.placeholder)));
        frame.render_widget(List::new(vec![placeholder]), inner);
        return;
    }

    let gutter_width = digits(doc.lines.len());
    let items: Vec<ListItem> = visible_rows(state, side, inner.height as usize)
        .into_iter()
        .map(|row| render_row(doc, row, gutter_width, theme))
        .collect();
    frame.render_widget(List::new(items), inner);
}

fn pane_title(side: Side, doc: &Document, state: &AppState) -> String {
    let label = match side {
        Side::Left => "Left",
        Side::Right => "Right",
    };
    let mut title = match &doc.path {
        Some(path) => format!(" {label}: {} ", path.display()),
        None if doc.pasted => format!(" {label}: (pasted) "),
        None => format!(" {label} "),
    };
    if state.diff_stale {
        title.push_str("(stale) ");
    }
    title
}

/// Computes the rows visible in a pane `height` rows tall.
pub fn visible_rows(state: &AppState, side: Side, height: usize) -> Vec<PaneRow> {
    let doc = state.document(side);
    let scroll = match side {
        Side::Left => state.left_scroll,
        Side::Right => state.right_scroll,
    };

    let Some(session) = state.active_session() else {
        return window(doc.lines.len(), scroll, height)
            .map(|line| PaneRow {
                line: Some(line),
                block: None,
            })
            .collect();
    };

    let result = session.result();
    let current = session.current_block_index();
    let block_of = |index: usize| {
        result
            .block(index)
            .map(|b| (b.kind, current == Some(index)))
    };

    if state.sync_view {
        return window(state.aligned.len(), state.sync_scroll, height)
            .map(|i| {
                let row = &state.aligned[i];
                PaneRow {
                    line: match side {
                        Side::Left => row.left,
                        Side::Right => row.right,
                    },
                    block: block_of(row.block),
                }
            })
            .collect();
    }

    window(doc.lines.len(), scroll, height)
        .map(|line| {
            let block = match side {
                Side::Left => result.block_at_left_line(line),
                Side::Right => result.block_at_right_line(line),
            };
            PaneRow {
                line: Some(line),
                block: block.and_then(block_of),
            }
        })
        .collect()
}

/// Index range of the rows visible from `scroll`, clamped to `total`.
fn window(total: usize, scroll: usize, height: usize) -> std::ops::Range<usize> {
    let start = scroll.min(total.saturating_sub(1));
    start..(start + height).min(total)
}

fn render_row(doc: &Document, row: PaneRow, gutter_width: usize, theme: &Theme) -> ListItem<'static> {
    let row_style = row.block.and_then(|(kind, current)| block_style(kind, current, theme));
    let is_current = matches!(row.block, Some((_, true)));

    let gutter = match row.line {
        Some(line) => format!("{:>gutter_width$} ", line + 1),
        None => " ".repeat(gutter_width + 1),
    };
    let mut spans = vec![Span::styled(gutter, Style::default().fg(theme.gutter))];

    if let Some(line) = row.line {
        match doc.styled.get(line) {
            // Syntax colours are dropped on the current block so the text stays
            // readable on the selection colour.
            Some(styled) if !is_current => spans.extend(styled.spans.iter().cloned()),
            _ => spans.push(Span::raw(doc.lines.get(line).unwrap_or_default().to_owned())),
        }
    }

    let item = ListItem::new(Line::from(spans));
    match row_style {
        Some(style) => item.style(style),
        None => item,
    }
}

/// Row style for a block: the kind's background, or the current-selection
/// colours. Equal blocks are not highlighted.
pub fn block_style(kind: BlockKind, is_current: bool, theme: &Theme) -> Option<Style> {
    if is_current && kind.is_difference() {
        return Some(
            Style::default()
                .bg(theme.diff_current)
                .fg(theme.diff_current_fg)
                .add_modifier(Modifier::BOLD),
        );
    }
    let bg = match kind {
        BlockKind::Equal => return None,
        BlockKind::LeftOnly => theme.diff_left_only,
        BlockKind::RightOnly => theme.diff_right_only,
        BlockKind::Replaced => theme.diff_replaced,
    };
    Some(Style::default().bg(bg))
}

/// Number of decimal digits in `n` (at least 2, so gutters don't jitter on
/// short files).
pub fn digits(n: usize) -> usize {
    n.to_string().len().max(2)
}

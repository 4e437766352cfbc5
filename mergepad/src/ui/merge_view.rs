//! Merged result panel renderer for mergepad.
//!
//! Shows the merge buffer with line numbers, virtually scrolled the same way
//! as the document panes. The title carries the line count and an unsaved
//! marker.

use ratatui::{
    Frame,
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{List, ListItem},
};

use crate::app::{AppState, PanelFocus};
use crate::theme::Theme;
use crate::ui::layout::{inner_rect, panel_block};
use crate::ui::pane::digits;

/// Renders the merged result panel from `state.merged_lines()`.
pub fn render_merged(
    frame: &mut Frame,
    area: Rect,
    focus: PanelFocus,
    state: &AppState,
    theme: &Theme,
) {
    let lines = state.merged_lines();
    let is_focused = focus == PanelFocus::Merged;
    let mut title = format!(" Merged ({}) ", lines.len());
    if state.has_unsaved_merge {
        title.push_str("[+] ");
    }
    frame.render_widget(panel_block(title, is_focused, theme), area);

    let inner = inner_rect(area);
    if lines.is_empty() {
        let hint = if state.session.is_none() {
            "Press c to compare the documents."
        } else {
            "Select a difference (n / p) and take a side with 1, 2 or b."
        };
        let placeholder = ListItem::new(Line::styled(hint, Style::default().fg(theme.placeholder)));
        frame.render_widget(List::new(vec![placeholder]), inner);
        return;
    }

    let total = lines.len();
    let start = state.merged_scroll.min(total.saturating_sub(1));
    let end = (start + inner.height as usize).min(total);
    let width = digits(total);

    let items: Vec<ListItem> = lines[start..end]
        .iter()
        .enumerate()
        .map(|(offset, text)| {
            ListItem::new(Line::from(vec![
                Span::styled(
                    format!("{:>width$} ", start + offset + 1),
                    Style::default().fg(theme.gutter),
                ),
                Span::raw(text.clone()),
            ]))
        })
        .collect();
    frame.render_widget(List::new(items), inner);
}

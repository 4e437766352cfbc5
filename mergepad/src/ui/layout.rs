//! Responsive 3-panel layout engine for mergepad.
//!
//! Pure layout arithmetic, called inside `terminal.draw()` on every render so
//! every frame reflects the current terminal size.
//!
//! # Panel geometry
//!
//! | Terminal width | Layout |
//! |----------------|--------|
//! | `>= 120` cols  | Left, Right, Merged side by side (`left_pct / right_pct / merged_pct`) |
//! | `< 120` cols   | Left and Right share the top row; Merged spans the bottom (`merged_pct` of the height) |
//!
//! `Spacing::Overlap(1)` combined with `Block::merge_borders(MergeStrategy::Fuzzy)`
//! makes adjacent panel borders share a single cell and merge their junctions.

use ratatui::{
    Frame,
    layout::{Constraint, Layout, Margin, Rect, Spacing},
    style::{Modifier, Style},
    symbols::merge::MergeStrategy,
    text::{Line, Span},
    widgets::{Block, BorderType, Paragraph},
};

use crate::app::{AppState, Mode};
use crate::theme::Theme;

/// Returns `[left, right, merged, status_bar]` for the current frame.
pub fn compute_layout(frame: &Frame, state: &AppState) -> [Rect; 4] {
    let term_width = frame.area().width;

    let [main_area, status_bar] =
        frame.area().layout(&Layout::vertical([Constraint::Fill(1), Constraint::Length(1)]));

    if term_width >= 120 {
        let [left, right, merged] = main_area.layout(
            &Layout::horizontal([
                Constraint::Percentage(state.left_pct),
                Constraint::Percentage(state.right_pct),
                Constraint::Percentage(state.merged_pct),
            ])
            .spacing(Spacing::Overlap(1)),
        );
        return [left, right, merged, status_bar];
    }

    let [top, merged] = main_area.layout(
        &Layout::vertical([
            Constraint::Percentage(100 - state.merged_pct.min(100)),
            Constraint::Percentage(state.merged_pct),
        ])
        .spacing(Spacing::Overlap(1)),
    );
    let [left, right] = top.layout(
        &Layout::horizontal([Constraint::Fill(1), Constraint::Fill(1)])
            .spacing(Spacing::Overlap(1)),
    );
    [left, right, merged, status_bar]
}

/// The inner `Rect` of a panel after removing the 1-cell border on each side.
pub fn inner_rect(area: Rect) -> Rect {
    area.inner(Margin { vertical: 1, horizontal: 1 })
}

/// Builds a bordered `Block` for a panel.
///
/// Focused panels get a thick border in `border_active`. `MergeStrategy::Fuzzy`
/// is required because `Exact` produces wrong junctions when `Thick` and
/// `Plain` borders meet.
pub fn panel_block<'a>(title: impl Into<Line<'a>>, is_focused: bool, theme: &Theme) -> Block<'a> {
    let border_style = if is_focused {
        Style::default().fg(theme.border_active)
    } else {
        Style::default().fg(theme.border_inactive)
    };
    let border_type = if is_focused { BorderType::Thick } else { BorderType::Plain };

    Block::bordered()
        .title(title)
        .border_type(border_type)
        .border_style(border_style)
        .merge_borders(MergeStrategy::Fuzzy)
}

/// Renders the 1-row status bar: mode indicator, difference position, sync
/// flag, then the latest status message.
pub fn render_status_bar(frame: &mut Frame, area: Rect, state: &AppState, theme: &Theme) {
    let (mode_text, mode_fg) = match state.mode {
        Mode::Prompt => (" PROMPT ", theme.status_mode_prompt),
        Mode::Normal | Mode::ConfirmQuit | Mode::HelpOverlay => {
            (" NORMAL ", theme.status_mode_normal)
        }
    };

    let mut spans = vec![Span::styled(
        mode_text,
        Style::default().fg(mode_fg).add_modifier(Modifier::BOLD),
    )];

    spans.push(Span::raw(format!(" {} ", diff_position_label(state))));
    if state.sync_view {
        spans.push(Span::styled("SYNC ", Style::default().fg(mode_fg)));
    }
    if state.has_unsaved_merge {
        spans.push(Span::raw("[+] "));
    }

    if let Some(status) = &state.status {
        let style = if status.is_error {
            Style::default().fg(theme.status_error).add_modifier(Modifier::BOLD)
        } else {
            Style::default()
        };
        spans.push(Span::raw("│ "));
        spans.push(Span::styled(status.text.clone(), style));
    }

    frame.render_widget(
        Paragraph::new(Line::from(spans))
            .style(Style::default().bg(theme.status_bar_bg).fg(theme.status_bar_fg)),
        area,
    );
}

/// Short summary of where the cursor is: `diff 2/5`, `no diff`, `stale`…
fn diff_position_label(state: &AppState) -> String {
    if state.diff_loading {
        return "comparing…".to_owned();
    }
    let Some(session) = state.session.as_ref() else {
        return "no diff".to_owned();
    };
    if state.diff_stale {
        return "stale".to_owned();
    }
    match (session.cursor(), session.difference_count()) {
        (_, 0) => "identical".to_owned(),
        (Some(cursor), total) => format!("diff {}/{}", cursor + 1, total),
        (None, total) => format!("diff -/{total}"),
    }
}

//! Help overlay renderer for mergepad.
//!
//! Draws a centred modal over the panel layout: `Clear` erases the area first,
//! then a bordered `Paragraph` is drawn in the same `terminal.draw()` closure.

use ratatui::{
    Frame,
    layout::Constraint,
    style::{Modifier, Style},
    text::{Line, Text},
    widgets::{Block, Clear, Paragraph, Wrap},
};

use crate::theme::Theme;

/// Renders the help overlay, scrolled by `help_scroll` rows.
///
/// Skipped on terminals narrower than 60 columns to avoid a zero-height `Rect`.
pub fn render_help_overlay(frame: &mut Frame, theme: &Theme, help_scroll: u16) {
    if frame.area().width < 60 {
        return;
    }

    let overlay_area = frame
        .area()
        .centered(Constraint::Percentage(80), Constraint::Percentage(80));

    frame.render_widget(Clear, overlay_area);

    let block = Block::bordered()
        .title(" Help: j/k scroll, ? or Esc to dismiss ")
        .border_style(Style::default().fg(theme.border_active));

    frame.render_widget(
        Paragraph::new(build_help_text())
            .block(block)
            .style(Style::default().bg(theme.background))
            .wrap(Wrap { trim: false })
            .scroll((help_scroll, 0)),
        overlay_area,
    );
}

fn heading(text: &'static str) -> Line<'static> {
    Line::styled(text, Style::default().add_modifier(Modifier::BOLD))
}

fn build_help_text() -> Text<'static> {
    Text::from(vec![
        heading("Documents"),
        Line::from("  o / O         Load the left / right file"),
        Line::from("  (paste)       Replace the focused side with pasted text"),
        Line::from("  c             Compare the loaded documents"),
        Line::from("  s             Toggle sync view (aligned rows, shared scrolling)"),
        Line::from(""),
        heading("Differences"),
        Line::from("  n / ]         Next difference"),
        Line::from("  p / [         Previous difference"),
        Line::from("  click         Select the difference under the pointer"),
        Line::from(""),
        heading("Merging"),
        Line::from("  1             Use left"),
        Line::from("  2             Use right"),
        Line::from("  b / 3         Use both (left, then right)"),
        Line::from("  x             Clear the merged result"),
        Line::from("  w             Save the merged result"),
        Line::from(""),
        heading("Navigation"),
        Line::from("  j / k         Scroll down / up one line"),
        Line::from("  g / G         Jump to top / bottom"),
        Line::from("  Ctrl-d / u    Scroll half page down / up"),
        Line::from("  Ctrl-f / b    Scroll full page down / up"),
        Line::from("  H / L, Tab    Move panel focus"),
        Line::from("  < / >         Shrink / grow the merged panel"),
        Line::from(""),
        heading("Prompts"),
        Line::from("  Enter         Confirm the path"),
        Line::from("  Esc           Cancel"),
        Line::from("  Ctrl-u        Clear the input"),
        Line::from(""),
        heading("General"),
        Line::from("  ?             Open / close this help overlay"),
        Line::from("  q / Esc / ^C  Quit (confirms if the merge is unsaved)"),
    ])
}

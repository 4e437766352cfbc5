//! Modal dialogs drawn over the panels: the path prompt and the quit
//! confirmation.

use ratatui::{
    Frame,
    layout::{Constraint, Position},
    style::{Modifier, Style},
    text::Line,
    widgets::{Block, Clear, Paragraph},
};

use crate::app::{Prompt, PromptTarget};
use crate::loader::types::Side;
use crate::theme::Theme;

/// Renders the single-line path prompt and places the terminal cursor at the
/// end of the input.
pub fn render_prompt(frame: &mut Frame, prompt: &Prompt, theme: &Theme) {
    let area = frame
        .area()
        .centered(Constraint::Percentage(70), Constraint::Length(3));
    frame.render_widget(Clear, area);

    let title = match prompt.target {
        PromptTarget::Load(Side::Left) => " Load left file (Enter to open, Esc to cancel) ",
        PromptTarget::Load(Side::Right) => " Load right file (Enter to open, Esc to cancel) ",
        PromptTarget::Save => " Save merged result (Enter to save, Esc to cancel) ",
    };
    let block = Block::bordered()
        .title(title)
        .border_style(Style::default().fg(theme.status_mode_prompt));

    // Keep the tail of long paths visible.
    let width = area.width.saturating_sub(2) as usize;
    let chars = prompt.input.chars().count();
    let skip = (chars + 1).saturating_sub(width);
    let visible: String = prompt.input.chars().skip(skip).collect();
    let cursor_x = area.x + 1 + (chars - skip) as u16;

    frame.render_widget(
        Paragraph::new(Line::from(visible))
            .block(block)
            .style(Style::default().bg(theme.background)),
        area,
    );
    frame.set_cursor_position(Position {
        x: cursor_x,
        y: area.y + 1,
    });
}

/// Renders the "quit with unsaved merge?" confirmation.
pub fn render_confirm_quit(frame: &mut Frame, theme: &Theme) {
    let area = frame
        .area()
        .centered(Constraint::Length(52), Constraint::Length(4));
    frame.render_widget(Clear, area);

    let block = Block::bordered()
        .title(" Unsaved merge ")
        .border_style(Style::default().fg(theme.status_error));
    let text = vec![
        Line::from("The merged result has not been saved."),
        Line::styled("Quit anyway? (y / n)", Style::default().add_modifier(Modifier::BOLD)),
    ];
    frame.render_widget(
        Paragraph::new(text)
            .block(block)
            .style(Style::default().bg(theme.background)),
        area,
    );
}

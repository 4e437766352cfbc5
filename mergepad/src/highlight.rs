//! Syntax colouring for document panes.
//!
//! Presentation only: colours are derived per line from the file extension and
//! never influence the diff. Only foreground colours and font styles are taken
//! from syntect, so the pane renderer stays free to paint block backgrounds.

use std::path::Path;
use std::sync::LazyLock;

use mergepad_core::LineSequence;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use syntect::easy::HighlightLines;
use syntect::highlighting::{FontStyle, ThemeSet};
use syntect::parsing::SyntaxSet;

static PS: LazyLock<SyntaxSet> = LazyLock::new(SyntaxSet::load_defaults_nonewlines);
static TS: LazyLock<ThemeSet> = LazyLock::new(ThemeSet::load_defaults);

/// Forces the lazy syntax and theme sets to load so the first document read
/// does not pay for it.
pub fn warm_up() {
    let _ = &*PS;
    let _ = &*TS;
}

/// Builds one styled line per input line.
///
/// Falls back to unstyled lines when the extension is unknown or no theme is
/// available.
pub fn style_lines(lines: &LineSequence, path: &Path) -> Vec<Line<'static>> {
    let plain = || lines.iter().map(|l| Line::from(Span::raw(l.clone()))).collect();

    let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("txt");
    let Some(syntax) = PS.find_syntax_by_extension(ext) else {
        return plain();
    };
    let Some(theme) = TS.themes.get("base16-ocean.dark").or_else(|| TS.themes.values().next())
    else {
        return plain();
    };

    // One highlighter for the whole document so multi-line constructs
    // (block comments, strings) carry their state across lines.
    let mut h = HighlightLines::new(syntax, theme);
    lines
        .iter()
        .map(|line| match h.highlight_line(line, &PS) {
            Ok(ranges) if !ranges.is_empty() => Line::from(
                ranges
                    .into_iter()
                    .map(|(style, text)| syntect_to_span(style, text))
                    .collect::<Vec<_>>(),
            ),
            _ => Line::from(Span::raw(line.clone())),
        })
        .collect()
}

/// Converts a syntect `(Style, &str)` pair to an owned ratatui `Span`,
/// keeping the foreground and font style only.
fn syntect_to_span(style: syntect::highlighting::Style, content: &str) -> Span<'static> {
    let mut ratatui_style = Style::default();
    let fg = style.foreground;
    if fg.a > 0 {
        ratatui_style = ratatui_style.fg(Color::Rgb(fg.r, fg.g, fg.b));
    }
    if style.font_style.contains(FontStyle::BOLD) {
        ratatui_style = ratatui_style.add_modifier(Modifier::BOLD);
    }
    if style.font_style.contains(FontStyle::ITALIC) {
        ratatui_style = ratatui_style.add_modifier(Modifier::ITALIC);
    }
    if style.font_style.contains(FontStyle::UNDERLINE) {
        ratatui_style = ratatui_style.add_modifier(Modifier::UNDERLINED);
    }
    Span::styled(content.to_owned(), ratatui_style)
}

//! Color theme system for mergepad.
//!
//! A `Theme` holds named `ratatui::style::Color` fields covering every UI
//! surface mergepad renders. Three built-in themes are provided:
//!
//! - `dark`: ANSI 256 indexed colors, safe on SSH sessions without truecolor.
//! - `catppuccin_mocha`: Catppuccin Mocha palette in RGB; requires truecolor.
//! - `light`: pale pastel block backgrounds on a light terminal.

use ratatui::style::Color;

/// All color values used across mergepad's UI surfaces.
#[derive(Debug, Clone)]
pub struct Theme {
    // Panel borders
    /// Border color for the currently focused panel.
    pub border_active: Color,
    /// Border color for unfocused panels.
    pub border_inactive: Color,

    // Difference highlights (backgrounds)
    /// Lines that exist only in the left document.
    pub diff_left_only: Color,
    /// Lines that exist only in the right document.
    pub diff_right_only: Color,
    /// Lines that differ between the two documents.
    pub diff_replaced: Color,
    /// The difference under the cursor.
    pub diff_current: Color,
    /// Text color drawn on top of `diff_current`.
    pub diff_current_fg: Color,

    // Panes
    /// Line-number gutter.
    pub gutter: Color,
    /// Placeholder and hint text in empty panes.
    pub placeholder: Color,

    // Status bar
    pub status_bar_bg: Color,
    pub status_bar_fg: Color,
    /// Mode indicator color when in NORMAL mode.
    pub status_mode_normal: Color,
    /// Mode indicator color while a path prompt is open.
    pub status_mode_prompt: Color,
    /// Status message color for failures.
    pub status_error: Color,

    // General
    /// Application background (used for clearing overlay areas).
    pub background: Color,
}

impl Theme {
    /// The built-in dark theme using ANSI 256 indexed colors.
    pub fn dark() -> Self {
        Self {
            border_active: Color::Cyan,
            border_inactive: Color::DarkGray,

            diff_left_only: Color::Indexed(52),
            diff_right_only: Color::Indexed(17),
            diff_replaced: Color::Indexed(58),
            diff_current: Color::Indexed(178),
            diff_current_fg: Color::Black,

            gutter: Color::DarkGray,
            placeholder: Color::DarkGray,

            status_bar_bg: Color::DarkGray,
            status_bar_fg: Color::White,
            status_mode_normal: Color::Cyan,
            status_mode_prompt: Color::Green,
            status_error: Color::LightRed,

            background: Color::Reset,
        }
    }

    /// Catppuccin Mocha theme using RGB truecolor values.
    ///
    /// Block backgrounds are the accent colors blended at roughly 20% over
    /// `base`, so syntax colours stay readable on top of them.
    ///
    /// Palette source: <https://github.com/catppuccin/catppuccin> Mocha variant.
    pub fn catppuccin_mocha() -> Self {
        let green = Color::Rgb(166, 227, 161); // #a6e3a1
        let red = Color::Rgb(243, 139, 168); // #f38ba8
        let yellow = Color::Rgb(249, 226, 175); // #f9e2af
        let lavender = Color::Rgb(180, 190, 254); // #b4befe
        let overlay1 = Color::Rgb(127, 132, 156); // #7f849c
        let overlay0 = Color::Rgb(108, 112, 134); // #6c7086
        let surface1 = Color::Rgb(69, 71, 90); // #45475a
        let base = Color::Rgb(30, 30, 46); // #1e1e2e
        let text = Color::Rgb(205, 214, 244); // #cdd6f4

        Self {
            border_active: lavender,
            border_inactive: overlay1,

            diff_left_only: Color::Rgb(73, 52, 70),  // red over base
            diff_right_only: Color::Rgb(51, 60, 87), // blue over base
            diff_replaced: Color::Rgb(74, 60, 64),   // peach over base
            diff_current: yellow,
            diff_current_fg: base,

            gutter: overlay0,
            placeholder: overlay1,

            status_bar_bg: surface1,
            status_bar_fg: text,
            status_mode_normal: lavender,
            status_mode_prompt: green,
            status_error: red,

            background: base,
        }
    }

    /// Light theme: pale red, blue and orange blocks, yellow current block.
    pub fn light() -> Self {
        Self {
            border_active: Color::Blue,
            border_inactive: Color::Gray,

            diff_left_only: Color::Rgb(0xff, 0xec, 0xec),
            diff_right_only: Color::Rgb(0xe8, 0xf4, 0xff),
            diff_replaced: Color::Rgb(0xff, 0xf4, 0xe5),
            diff_current: Color::Rgb(0xff, 0xe0, 0x66),
            diff_current_fg: Color::Black,

            gutter: Color::Gray,
            placeholder: Color::Gray,

            status_bar_bg: Color::Rgb(0xe0, 0xe0, 0xe0),
            status_bar_fg: Color::Black,
            status_mode_normal: Color::Blue,
            status_mode_prompt: Color::Green,
            status_error: Color::Red,

            background: Color::Reset,
        }
    }

    /// Resolves a theme name from config to a built-in theme.
    ///
    /// Unknown names fall back to `dark()` so a typo in config never prevents
    /// startup.
    pub fn from_name(name: &str) -> Self {
        match name {
            "catppuccin-mocha" | "catppuccin_mocha" => Self::catppuccin_mocha(),
            "light" => Self::light(),
            "dark" => Self::dark(),
            other => {
                tracing::warn!("unknown theme '{other}', falling back to 'dark'");
                Self::dark()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn theme_names_resolve() {
        assert_eq!(Theme::from_name("light").diff_current, Theme::light().diff_current);
        assert_eq!(
            Theme::from_name("catppuccin_mocha").background,
            Theme::catppuccin_mocha().background
        );
        assert_eq!(Theme::from_name("no-such-theme").border_active, Theme::dark().border_active);
    }

    #[test]
    fn difference_kinds_have_distinct_colors() {
        for theme in [Theme::dark(), Theme::catppuccin_mocha(), Theme::light()] {
            let colors = [
                theme.diff_left_only,
                theme.diff_right_only,
                theme.diff_replaced,
                theme.diff_current,
            ];
            for (i, a) in colors.iter().enumerate() {
                for b in &colors[i + 1..] {
                    assert_ne!(a, b);
                }
            }
        }
    }
}

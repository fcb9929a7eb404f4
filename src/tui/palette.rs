use ratatui::style::Color;

use crate::core::theme::Theme;

/// Colors for one theme. Components take a `Palette` instead of picking
/// colors themselves, so a theme switch is a plain re-render.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub fg: Color,
    pub bg: Color,
    pub muted: Color,
    pub accent: Color,
    pub code_bg: Color,
    pub bar_filled: Color,
    pub bar_empty: Color,
    /// syntect theme used for fenced code blocks.
    pub code_theme: &'static str,
}

impl Palette {
    pub fn for_theme(theme: Theme) -> Palette {
        match theme {
            Theme::Light => Palette {
                fg: Color::Rgb(30, 30, 36),
                bg: Color::Rgb(250, 250, 247),
                muted: Color::Rgb(120, 120, 128),
                accent: Color::Rgb(30, 90, 200),
                code_bg: Color::Rgb(232, 232, 228),
                bar_filled: Color::Rgb(30, 90, 200),
                bar_empty: Color::Rgb(210, 210, 214),
                code_theme: "base16-ocean.light",
            },
            Theme::Dark => Palette {
                fg: Color::Rgb(226, 226, 230),
                bg: Color::Rgb(22, 22, 28),
                muted: Color::Rgb(130, 130, 142),
                accent: Color::Rgb(110, 180, 255),
                code_bg: Color::Rgb(44, 44, 54),
                bar_filled: Color::Rgb(110, 180, 255),
                bar_empty: Color::Rgb(60, 60, 72),
                code_theme: "base16-ocean.dark",
            },
        }
    }
}

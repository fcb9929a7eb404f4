//! # TitleBar Component
//!
//! The persistent header line.
//!
//! ```text
//! ≡ Portfolio · Compétences            ⠹ Chargement…   FR|en   ☾ Activer le mode clair
//! ```
//!
//! - `≡` only on narrow terminals, where the nav list hides behind the menu
//! - spinner + loader text while `is_loading`
//! - language indicator, current language in bold
//! - theme icon with the label of what pressing `t` will do
//!
//! Stateless: every field is a prop, filled from `App` each frame.

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::core::i18n::t;
use crate::core::lang::Lang;
use crate::core::page::Page;
use crate::core::theme::Theme;
use crate::tui::component::Component;
use crate::tui::palette::Palette;

const SPINNER: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

pub struct TitleBar {
    pub lang: Lang,
    pub theme: Theme,
    pub page: Page,
    pub is_loading: bool,
    pub show_menu_icon: bool,
    pub menu_open: bool,
    pub spinner_frame: usize,
    pub palette: Palette,
}

impl TitleBar {
    fn left(&self) -> Line<'static> {
        let mut spans = Vec::new();
        if self.show_menu_icon {
            let icon = if self.menu_open { "✕ " } else { "≡ " };
            spans.push(Span::styled(icon, Style::default().fg(self.palette.accent)));
        }
        spans.push(Span::styled(
            t(self.lang, "site.title").to_string(),
            Style::default()
                .fg(self.palette.accent)
                .add_modifier(Modifier::BOLD),
        ));
        spans.push(Span::styled(" · ", Style::default().fg(self.palette.muted)));
        spans.push(Span::raw(t(self.lang, self.page.label_key()).to_string()));
        Line::from(spans)
    }

    fn right(&self) -> Line<'static> {
        let muted = Style::default().fg(self.palette.muted);
        let mut spans = Vec::new();

        if self.is_loading {
            let frame = SPINNER[self.spinner_frame % SPINNER.len()];
            spans.push(Span::styled(
                format!("{frame} {}   ", t(self.lang, "loader.loading")),
                Style::default().fg(self.palette.accent),
            ));
        }

        for (i, lang) in [Lang::Fr, Lang::En].into_iter().enumerate() {
            if i > 0 {
                spans.push(Span::styled("|", muted));
            }
            if lang == self.lang {
                spans.push(Span::styled(
                    lang.code().to_uppercase(),
                    Style::default().add_modifier(Modifier::BOLD),
                ));
            } else {
                spans.push(Span::styled(lang.code().to_string(), muted));
            }
        }

        let (icon, label) = if self.theme.is_dark() {
            ("☾", t(self.lang, "theme.to_light"))
        } else {
            ("☀", t(self.lang, "theme.to_dark"))
        };
        spans.push(Span::raw("   "));
        spans.push(Span::styled(icon, Style::default().fg(self.palette.accent)));
        spans.push(Span::styled(format!(" {label}"), muted));
        Line::from(spans)
    }
}

impl Component for TitleBar {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let right = self.right();
        let right_width = right.width() as u16;
        let [left_area, right_area] =
            Layout::horizontal([Constraint::Min(0), Constraint::Length(right_width)]).areas(area);

        frame.render_widget(Paragraph::new(self.left()), left_area);
        frame.render_widget(Paragraph::new(right), right_area);
    }
}

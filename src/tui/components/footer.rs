//! Bottom hint line: key hints on the left, the focused item (if any) and
//! the history position on the right.

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::core::fragment::Interactive;
use crate::core::i18n::t;
use crate::core::lang::Lang;
use crate::tui::component::Component;
use crate::tui::palette::Palette;

const HINTS: [&str; 7] = [
    "hint.navigate",
    "hint.history",
    "hint.theme",
    "hint.lang",
    "hint.menu",
    "hint.focus",
    "hint.quit",
];

pub struct Footer<'a> {
    pub lang: Lang,
    pub palette: Palette,
    pub focused: Option<&'a Interactive>,
    /// Header of the focused disclosure, resolved by the caller.
    pub focused_label: Option<&'a str>,
    /// 1-based history cursor and history length.
    pub position: (usize, usize),
}

impl Footer<'_> {
    fn hints(&self) -> Line<'static> {
        let muted = Style::default().fg(self.palette.muted);
        let mut spans = Vec::new();
        for (i, key) in HINTS.iter().enumerate() {
            if i > 0 {
                spans.push(Span::styled("  ", muted));
            }
            spans.push(Span::styled(t(self.lang, key).to_string(), muted));
        }
        Line::from(spans)
    }

    fn status(&self) -> Line<'static> {
        let mut spans = Vec::new();
        let focus = match (self.focused, self.focused_label) {
            (Some(Interactive::AnchorLink { label, target }), _) => {
                Some(format!("→ {label} (#{target})"))
            }
            (Some(Interactive::Disclosure(_)), Some(header)) => Some(format!("▸ {header}")),
            _ => None,
        };
        if let Some(focus) = focus {
            spans.push(Span::styled(
                focus,
                Style::default()
                    .fg(self.palette.accent)
                    .add_modifier(Modifier::BOLD),
            ));
            spans.push(Span::raw("   "));
        }
        let (cursor, len) = self.position;
        spans.push(Span::styled(
            format!("{cursor}/{len}"),
            Style::default().fg(self.palette.muted),
        ));
        Line::from(spans)
    }
}

impl Component for Footer<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let status = self.status();
        let [left, right] = Layout::horizontal([
            Constraint::Min(0),
            Constraint::Length(status.width() as u16),
        ])
        .areas(area);
        frame.render_widget(Paragraph::new(self.hints()), left);
        frame.render_widget(Paragraph::new(status), right);
    }
}

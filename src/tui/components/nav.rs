//! # Navigation List
//!
//! One row per page, in `Page::ALL` order. The page on screen gets the
//! active marker; the keyboard selection gets a highlight. The two differ
//! while the user is tabbing through links.
//!
//! Row rectangles from the last render are kept for mouse hit testing.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use unicode_width::UnicodeWidthStr;

use crate::core::i18n::t;
use crate::core::lang::Lang;
use crate::core::page::Page;
use crate::tui::component::{Component, EventHandler};
use crate::tui::event::TuiEvent;
use crate::tui::palette::Palette;

#[derive(Debug, Default)]
pub struct NavState {
    pub selected: usize,
    /// Page the selection was last synced to; the selection follows the
    /// displayed page whenever that changes.
    synced_page: Option<Page>,
    rows: Vec<Rect>,
}

impl NavState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Move the selection to `page` if the displayed page changed since last time.
    pub fn sync(&mut self, page: Page) {
        if self.synced_page != Some(page) {
            self.selected = page.index();
            self.synced_page = Some(page);
        }
    }

    fn hit_test(&self, col: u16, row: u16) -> Option<Page> {
        self.rows
            .iter()
            .position(|r| r.y == row && col >= r.x && col < r.x + r.width)
            .and_then(|i| Page::ALL.get(i).copied())
    }
}

impl EventHandler for NavState {
    /// Emits the page to navigate to.
    type Event = Page;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<Page> {
        let count = Page::ALL.len();
        match event {
            TuiEvent::NavNext => {
                self.selected = (self.selected + 1) % count;
                None
            }
            TuiEvent::NavPrev => {
                self.selected = (self.selected + count - 1) % count;
                None
            }
            TuiEvent::Follow => Page::ALL.get(self.selected).copied(),
            TuiEvent::Jump(i) => {
                let page = Page::ALL.get(*i).copied()?;
                self.selected = *i;
                Some(page)
            }
            TuiEvent::MouseClick(col, row) => {
                let page = self.hit_test(*col, *row)?;
                self.selected = page.index();
                Some(page)
            }
            _ => None,
        }
    }
}

/// Columns needed to show every label in `lang`, borders included.
pub fn nav_width(lang: Lang) -> u16 {
    let longest = Page::ALL
        .iter()
        .map(|p| t(lang, p.label_key()).width())
        .max()
        .unwrap_or(0);
    // border + "1 " + label + " ●" + border
    (longest + 8) as u16
}

pub struct NavList<'a> {
    pub lang: Lang,
    pub active: Page,
    pub palette: Palette,
    pub state: &'a mut NavState,
}

impl Component for NavList<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let block = Block::default()
            .borders(Borders::RIGHT)
            .border_style(Style::default().fg(self.palette.muted))
            .title(Span::styled(
                t(self.lang, "nav.title"),
                Style::default().fg(self.palette.muted),
            ));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        self.state.rows.clear();
        for (i, page) in Page::ALL.into_iter().enumerate() {
            let y = inner.y + i as u16;
            if y >= inner.y + inner.height {
                break;
            }
            let row = Rect::new(inner.x, y, inner.width, 1);
            self.state.rows.push(row);

            let is_active = page == self.active;
            let mut style = Style::default().fg(self.palette.fg);
            if is_active {
                style = style.fg(self.palette.accent).add_modifier(Modifier::BOLD);
            }
            if i == self.state.selected {
                style = style.add_modifier(Modifier::REVERSED);
            }

            let mut spans = vec![
                Span::styled(format!("{} ", i + 1), Style::default().fg(self.palette.muted)),
                Span::styled(t(self.lang, page.label_key()).to_string(), style),
            ];
            if is_active {
                spans.push(Span::styled(" ●", Style::default().fg(self.palette.accent)));
            }
            frame.render_widget(Paragraph::new(Line::from(spans)), row);
        }
    }
}

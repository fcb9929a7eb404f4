use std::time::Instant;

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::Style;
use ratatui::widgets::Block;

use crate::core::fragment::{Block as ContentBlock, Interactive};
use crate::core::state::{App, Opacity};
use crate::tui::component::Component;
use crate::tui::components::{ContentView, Footer, NavList, TitleBar, nav_width};
use crate::tui::palette::Palette;
use crate::tui::{NARROW_WIDTH, TuiState};

/// True when the nav list is shown beside the content.
pub fn nav_visible(width: u16, menu_open: bool) -> bool {
    width >= NARROW_WIDTH || menu_open
}

/// ```text
/// ┌ title bar ────────────────────────────────┐
/// │ nav │ content (scroll view)               │
/// └ footer ───────────────────────────────────┘
/// ```
///
/// On narrow terminals the nav column only appears while the menu is open.
pub fn draw_ui(frame: &mut Frame, app: &App, tui: &mut TuiState, spinner_frame: usize, now: Instant) {
    use Constraint::{Length, Min};

    let palette = Palette::for_theme(app.theme);
    let area = frame.area();
    frame.render_widget(
        Block::default().style(Style::default().fg(palette.fg).bg(palette.bg)),
        area,
    );

    let [title_area, body_area, footer_area] =
        Layout::vertical([Length(1), Min(0), Length(1)]).areas(area);
    let narrow = area.width < NARROW_WIDTH;

    TitleBar {
        lang: app.lang,
        theme: app.theme,
        page: app.page,
        is_loading: app.is_loading,
        show_menu_icon: narrow,
        menu_open: app.menu_open,
        spinner_frame,
        palette,
    }
    .render(frame, title_area);

    let content_area = if nav_visible(area.width, app.menu_open) {
        let [nav_area, content_area] =
            Layout::horizontal([Length(nav_width(app.lang)), Min(0)]).areas(body_area);
        tui.nav.sync(app.page);
        NavList {
            lang: app.lang,
            active: app.page,
            palette,
            state: &mut tui.nav,
        }
        .render(frame, nav_area);
        padded(content_area)
    } else {
        padded(body_area)
    };

    ContentView {
        fragment: app.content.as_ref(),
        content_rev: app.content_rev,
        lang: app.lang,
        palette,
        faded: app.opacity == Opacity::Hidden,
        now,
        state: &mut tui.content,
    }
    .render(frame, content_area);

    let focused = tui.content.focused();
    let focused_label = match (focused, app.content.as_ref()) {
        (Some(Interactive::Disclosure(i)), Some(fragment)) => match fragment.blocks.get(*i) {
            Some(ContentBlock::Disclosure(d)) => Some(d.header.as_str()),
            _ => None,
        },
        _ => None,
    };
    Footer {
        lang: app.lang,
        palette,
        focused,
        focused_label,
        position: (app.history.cursor() + 1, app.history.len()),
    }
    .render(frame, footer_area);
}

fn padded(area: Rect) -> Rect {
    let [_, inner, _] = Layout::horizontal([
        Constraint::Length(1),
        Constraint::Min(0),
        Constraint::Length(1),
    ])
    .areas(area);
    inner
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::action::{Action, update};
    use crate::core::page::Page;
    use crate::test_support::test_app;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn screen(width: u16, app: &App, tui: &mut TuiState) -> String {
        let mut terminal = Terminal::new(TestBackend::new(width, 20)).unwrap();
        terminal
            .draw(|f| draw_ui(f, app, tui, 0, Instant::now()))
            .unwrap();
        let buffer = terminal.backend().buffer().clone();
        buffer
            .content()
            .chunks(width as usize)
            .map(|row| row.iter().map(|c| c.symbol()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn loaded_app(body: &str) -> App {
        let mut app = test_app();
        app.content = Some(crate::core::fragment::Fragment::parse(body));
        app
    }

    #[test]
    fn breakpoint() {
        assert!(nav_visible(NARROW_WIDTH, false));
        assert!(!nav_visible(NARROW_WIDTH - 1, false));
        assert!(nav_visible(40, true));
    }

    #[test]
    fn wide_layout_shows_nav_and_content() {
        let app = loaded_app("Bonjour tout le monde");
        let mut tui = TuiState::new();
        let text = screen(100, &app, &mut tui);
        assert!(text.contains("Portfolio"));
        assert!(text.contains("Compétences"));
        assert!(text.contains("Bonjour tout le monde"));
        assert!(text.contains("1/1"));
    }

    #[test]
    fn narrow_layout_hides_nav_until_menu_opens() {
        let mut app = loaded_app("Bonjour");
        let mut tui = TuiState::new();
        let closed = screen(60, &app, &mut tui);
        assert!(closed.contains("≡"));
        assert!(!closed.contains("Compétences"));

        update(&mut app, Action::ToggleMenu);
        let open = screen(60, &app, &mut tui);
        assert!(open.contains("Compétences"));
    }

    #[test]
    fn empty_content_shows_placeholder() {
        let app = test_app();
        let mut tui = TuiState::new();
        assert!(screen(100, &app, &mut tui).contains("Aucun contenu chargé."));
    }

    #[test]
    fn nav_selection_follows_displayed_page() {
        let mut app = loaded_app("x");
        app.page = Page::Contact;
        let mut tui = TuiState::new();
        screen(100, &app, &mut tui);
        assert_eq!(tui.nav.selected, Page::Contact.index());
    }
}

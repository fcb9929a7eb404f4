//! # TUI Adapter
//!
//! The ratatui-specific layer. Handles terminal I/O, renders the UI,
//! and translates terminal events into `core::Action` values.
//!
//! This is the only module that knows about ratatui and crossterm.
//!
//! ## Event Loop
//!
//! ```text
//! draw (if needed) → poll terminal events → route to components / actions
//!                  → drain background actions (fetches, timers)
//! ```
//!
//! ## Redraw Strategy
//!
//! - **Animating** (loading spinner, bar fill, smooth scroll, pending swap):
//!   draws every ~40ms.
//! - **Idle**: sleeps up to 500ms and only redraws on events, resizes, or
//!   background actions.

mod component;
mod components;
mod event;
pub mod markdown;
pub mod palette;
mod ui;

use std::io::stdout;
use std::time::{Duration, Instant};

use crossterm::event::{DisableMouseCapture, EnableMouseCapture};
use crossterm::execute;
use log::{debug, info, warn};

use crate::core::action::Action;
use crate::core::config::ResolvedConfig;
use crate::core::fragment::Interactive;
use crate::core::page::Page;
use crate::core::prefs::{FilePrefs, MemoryPrefs, PrefStore};
use crate::core::state::App;
use crate::runtime::Runtime;
use crate::site;
use crate::tui::component::EventHandler;
use crate::tui::components::{ContentState, NavState};
use crate::tui::event::{TuiEvent, poll_event_immediate, poll_event_timeout};

/// Below this width the nav list collapses behind the menu toggle.
pub const NARROW_WIDTH: u16 = 90;

const ANIMATION_TICK: Duration = Duration::from_millis(40);
const IDLE_TICK: Duration = Duration::from_millis(500);

/// TUI-specific presentation state (not part of core state)
#[derive(Debug, Default)]
pub struct TuiState {
    pub nav: NavState,
    pub content: ContentState,
}

impl TuiState {
    pub fn new() -> Self {
        Self::default()
    }
}

struct TerminalModeGuard;

impl TerminalModeGuard {
    fn new() -> std::io::Result<Self> {
        execute!(stdout(), EnableMouseCapture)?;
        info!("Terminal modes enabled (mouse)");
        Ok(Self)
    }
}

impl Drop for TerminalModeGuard {
    fn drop(&mut self) {
        let _ = execute!(stdout(), DisableMouseCapture);
    }
}

fn open_prefs() -> Box<dyn PrefStore> {
    match FilePrefs::default_path() {
        Some(path) => {
            info!("Preferences at {}", path.display());
            Box::new(FilePrefs::open(path))
        }
        None => {
            warn!("No home directory; preferences will not be saved");
            Box::new(MemoryPrefs::new())
        }
    }
}

pub fn run(config: ResolvedConfig) -> std::io::Result<()> {
    let prefs = open_prefs();
    let app = App::from_config(&config, prefs.as_ref());
    let source = site::build_source(&config);
    info!("Serving fragments from {} ({})", config.site, source.name());

    let mut runtime = Runtime::new(app, source, prefs);
    let mut tui = TuiState::new();

    let mut terminal = ratatui::init();
    let _terminal_mode_guard = TerminalModeGuard::new();

    runtime.start();

    let start_time = Instant::now();
    let mut needs_redraw = true;

    loop {
        let now = Instant::now();

        if let Some(request) = runtime.app.scroll_request {
            tui.content.apply(request);
            runtime.dispatch(Action::ScrollHandled);
            needs_redraw = true;
        }
        if tui.content.step_scroll() {
            needs_redraw = true;
        }

        let app = &runtime.app;
        let animating = app.is_loading
            || app.pending.is_some()
            || tui.content.is_filling(now)
            || tui.content.is_scrolling();
        if animating {
            needs_redraw = true;
        }

        if needs_redraw {
            let spinner_frame = (start_time.elapsed().as_millis() / 80) as usize;
            terminal.draw(|f| ui::draw_ui(f, &runtime.app, &mut tui, spinner_frame, now))?;
            needs_redraw = false;
        }

        let timeout = if animating { ANIMATION_TICK } else { IDLE_TICK };
        let first_event = poll_event_timeout(timeout);
        if first_event.is_some() {
            needs_redraw = true;
        }

        let width = terminal.size()?.width;
        for event in first_event
            .into_iter()
            .chain(std::iter::from_fn(poll_event_immediate))
        {
            handle_event(&mut runtime, &mut tui, event, width);
        }

        if runtime.drain() {
            needs_redraw = true;
        }
        if runtime.should_quit() {
            break;
        }
    }

    info!("Shutting down");
    ratatui::restore();
    Ok(())
}

fn handle_event(runtime: &mut Runtime, tui: &mut TuiState, event: TuiEvent, width: u16) {
    let narrow = width < NARROW_WIDTH;
    let nav_shown = ui::nav_visible(width, runtime.app.menu_open);

    match event {
        TuiEvent::Resize => {}
        TuiEvent::ForceQuit => runtime.dispatch(Action::Quit),
        // Esc/q close the menu first on narrow terminals.
        TuiEvent::Quit if narrow && runtime.app.menu_open => runtime.dispatch(Action::CloseMenu),
        TuiEvent::Quit => runtime.dispatch(Action::Quit),
        TuiEvent::Back => runtime.dispatch(Action::HistoryBack),
        TuiEvent::Forward => runtime.dispatch(Action::HistoryForward),
        TuiEvent::ToggleTheme => runtime.dispatch(Action::ToggleTheme),
        TuiEvent::ToggleLang => runtime.dispatch(Action::ToggleLang),
        TuiEvent::ToggleMenu => {
            if narrow {
                runtime.dispatch(Action::ToggleMenu);
            } else {
                debug!("Menu toggle ignored on wide terminal");
            }
        }
        TuiEvent::NavNext | TuiEvent::NavPrev | TuiEvent::Follow | TuiEvent::Jump(_) => {
            if let Some(page) = tui.nav.handle_event(&event) {
                follow_link(runtime, page, narrow);
            }
        }
        TuiEvent::MouseClick(..) => {
            let page = if nav_shown {
                tui.nav.handle_event(&event)
            } else {
                None
            };
            match page {
                Some(page) => follow_link(runtime, page, narrow),
                None => activate(runtime, tui.content.handle_event(&event)),
            }
        }
        _ => activate(runtime, tui.content.handle_event(&event)),
    }
}

/// An item in the content was activated by key or click.
fn activate(runtime: &mut Runtime, item: Option<Interactive>) {
    match item {
        Some(Interactive::Disclosure(block)) => {
            runtime.dispatch(Action::ToggleDisclosure(block));
        }
        Some(Interactive::AnchorLink { target, .. }) => {
            runtime.dispatch(Action::ScrollToAnchor(target));
        }
        None => {}
    }
}

/// A nav link was followed: record a history entry, close the menu on narrow terminals.
fn follow_link(runtime: &mut Runtime, page: Page, narrow: bool) {
    runtime.dispatch(Action::Navigate {
        page: page.slug().to_string(),
        record: true,
    });
    if narrow {
        runtime.dispatch(Action::CloseMenu);
    }
}

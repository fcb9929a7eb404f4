//! # Actions
//!
//! Everything that can happen in the shell becomes an `Action`.
//! User follows a link? That's `Action::Navigate { page, record: true }`.
//! A fragment arrives? That's `Action::FragmentLoaded { .. }`.
//!
//! The `update()` function applies an action to the state and returns the
//! side effects it wants performed. No I/O here: fetching, timers and
//! preference writes are described as `Effect`s and executed by the runtime.
//!
//! ```text
//! State + Action  →  update()  →  New State + [Effect]
//! ```
//!
//! ## Navigation lifecycle
//!
//! ```text
//! Navigate ──► Fetch ──┬─► FragmentLoaded ──► (swap_delay) SwapContent ──► hook
//!                      │                  └─► (loader_delay) ClearLoader
//!                      └─► FragmentUnavailable ──► Navigate(home, record) | give up
//! ```
//!
//! Each `Navigate` bumps `nav_seq`; every later step carries the number it
//! started with and is dropped if a newer navigation has begun since.

use std::time::Duration;

use log::{debug, error, info, warn};

use crate::core::fragment::Fragment;
use crate::core::hooks::{self, HookTask};
use crate::core::lang::Lang;
use crate::core::page::{DEFAULT_PAGE, Page};
use crate::core::prefs::{LANG_KEY, THEME_KEY};
use crate::core::state::{App, Opacity, PendingSwap, ScrollRequest};

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Show `page` (validated here). `record` pushes a history entry,
    /// otherwise the current entry is replaced.
    Navigate { page: String, record: bool },
    FragmentLoaded {
        seq: u64,
        page: Page,
        body: String,
        record: bool,
    },
    FragmentUnavailable {
        seq: u64,
        page: Page,
        record: bool,
        reason: String,
    },
    SwapContent { seq: u64 },
    ClearLoader { seq: u64 },
    RunHookTask { rev: u64, task: HookTask },
    HistoryBack,
    HistoryForward,
    ToggleTheme,
    ToggleLang,
    SetLang(Lang),
    ToggleMenu,
    CloseMenu,
    /// Block index of the disclosure.
    ToggleDisclosure(usize),
    ScrollToAnchor(String),
    ScrollHandled,
    Quit,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    Fetch {
        seq: u64,
        page: Page,
        lang: Lang,
        record: bool,
    },
    /// Feed `action` back into `update` after `after`.
    Schedule { after: Duration, action: Action },
    SavePref { key: &'static str, value: String },
    Quit,
}

pub fn update(app: &mut App, action: Action) -> Vec<Effect> {
    match action {
        Action::Navigate { page, record } => navigate(app, &page, record),

        Action::FragmentLoaded {
            seq,
            page,
            body,
            record,
        } => {
            if seq != app.nav_seq {
                debug!("Dropping stale fragment for {page} (seq {seq}, current {})", app.nav_seq);
                return vec![];
            }
            info!("Loaded {page} ({} bytes)", body.len());
            app.opacity = Opacity::Hidden;
            app.pending = Some(PendingSwap {
                seq,
                page,
                fragment: Fragment::parse(&body),
            });
            if record {
                app.history.push(page);
            } else {
                app.history.replace(page);
            }
            vec![
                Effect::Schedule {
                    after: app.timing.swap_delay,
                    action: Action::SwapContent { seq },
                },
                clear_loader_later(app, seq),
            ]
        }

        Action::FragmentUnavailable {
            seq,
            page,
            record,
            reason,
        } => {
            if seq != app.nav_seq {
                debug!("Dropping stale failure for {page} (seq {seq})");
                return vec![];
            }
            if page != DEFAULT_PAGE {
                warn!("Fragment {page} unavailable ({reason}), falling back to {DEFAULT_PAGE}");
                navigate(app, DEFAULT_PAGE.slug(), true)
            } else {
                error!(
                    "Default fragment {page} unavailable ({reason}, record={record}); giving up"
                );
                vec![clear_loader_later(app, seq)]
            }
        }

        Action::SwapContent { seq } => {
            let Some(pending) = app.pending.take_if(|p| p.seq == seq) else {
                debug!("No pending swap for seq {seq}");
                return vec![];
            };
            let PendingSwap {
                page, mut fragment, ..
            } = pending;

            let task = hooks::run(page, &mut fragment);
            app.content = Some(fragment);
            app.page = page;
            app.opacity = Opacity::Visible;
            app.scroll_request = Some(ScrollRequest::Top);
            app.content_rev += 1;

            match task {
                Some(task) => vec![Effect::Schedule {
                    after: app.timing.bar_delay,
                    action: Action::RunHookTask {
                        rev: app.content_rev,
                        task,
                    },
                }],
                None => vec![],
            }
        }

        Action::ClearLoader { seq } => {
            if seq == app.nav_seq {
                app.is_loading = false;
            }
            vec![]
        }

        Action::RunHookTask { rev, task } => {
            if rev == app.content_rev
                && let Some(fragment) = app.content.as_mut()
            {
                hooks::apply(task, fragment);
            }
            vec![]
        }

        Action::HistoryBack => match app.history.back() {
            Some(page) => navigate(app, page.slug(), false),
            None => vec![],
        },

        Action::HistoryForward => match app.history.forward() {
            Some(page) => navigate(app, page.slug(), false),
            None => vec![],
        },

        Action::ToggleTheme => {
            app.theme = app.theme.toggled();
            info!("Theme set to {}", app.theme.as_pref());
            vec![Effect::SavePref {
                key: THEME_KEY,
                value: app.theme.as_pref().to_string(),
            }]
        }

        Action::ToggleLang => {
            let next = app.lang.toggled();
            update(app, Action::SetLang(next))
        }

        Action::SetLang(lang) => {
            if lang == app.lang {
                return vec![];
            }
            app.lang = lang;
            info!("Language set to {}", lang.code());
            let mut effects = vec![Effect::SavePref {
                key: LANG_KEY,
                value: lang.code().to_string(),
            }];
            let current = app.current_location();
            effects.extend(navigate(app, current.slug(), false));
            effects
        }

        Action::ToggleMenu => {
            app.menu_open = !app.menu_open;
            vec![]
        }

        Action::CloseMenu => {
            app.menu_open = false;
            vec![]
        }

        Action::ToggleDisclosure(block) => {
            if let Some(fragment) = app.content.as_mut()
                && !fragment.toggle_disclosure(block)
            {
                debug!("Block {block} is not a toggleable disclosure");
            }
            vec![]
        }

        Action::ScrollToAnchor(id) => {
            let target = app
                .content
                .as_ref()
                .filter(|f| f.anchor_scroll)
                .and_then(|f| f.anchor_target(&id));
            match target {
                Some(block) => app.scroll_request = Some(ScrollRequest::Block(block)),
                None => debug!("No anchor target for {id:?}"),
            }
            vec![]
        }

        Action::ScrollHandled => {
            app.scroll_request = None;
            vec![]
        }

        Action::Quit => vec![Effect::Quit],
    }
}

fn navigate(app: &mut App, requested: &str, record: bool) -> Vec<Effect> {
    let page = Page::resolve(requested);
    if page.slug() != requested {
        debug!("Unknown page {requested:?}, using {page}");
    }
    app.nav_seq += 1;
    app.is_loading = true;
    debug!("Navigate to {page} (seq {}, record={record})", app.nav_seq);
    vec![Effect::Fetch {
        seq: app.nav_seq,
        page,
        lang: app.lang,
        record,
    }]
}

fn clear_loader_later(app: &App, seq: u64) -> Effect {
    Effect::Schedule {
        after: app.timing.loader_delay,
        action: Action::ClearLoader { seq },
    }
}

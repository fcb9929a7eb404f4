//! # Effect Runtime
//!
//! Owns the `App` and executes the effects `update()` asks for:
//!
//! - `Fetch`: spawns a task on the fragment source, result comes back as an action
//! - `Schedule`: spawns a sleep, then sends the action (fire-and-forget timer)
//! - `SavePref`: writes the preference store synchronously
//!
//! Background tasks never touch state. They send `Action`s over a channel
//! that the owner drains with [`Runtime::drain`], so every mutation still goes
//! through `update()` on one thread.

use std::sync::Arc;
use std::time::Duration;

use log::{debug, info, warn};
use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender, unbounded_channel};

use crate::core::action::{Action, Effect, update};
use crate::core::prefs::PrefStore;
use crate::core::state::App;
use crate::site::FragmentSource;

pub struct Runtime {
    pub app: App,
    source: Arc<dyn FragmentSource>,
    prefs: Box<dyn PrefStore>,
    tx: UnboundedSender<Action>,
    rx: UnboundedReceiver<Action>,
    quit: bool,
}

impl Runtime {
    pub fn new(app: App, source: Arc<dyn FragmentSource>, prefs: Box<dyn PrefStore>) -> Self {
        let (tx, rx) = unbounded_channel();
        Self {
            app,
            source,
            prefs,
            tx,
            rx,
            quit: false,
        }
    }

    /// Loads the page named by the current history entry without recording.
    pub fn start(&mut self) {
        let page = self.app.current_location();
        self.dispatch(Action::Navigate {
            page: page.slug().to_string(),
            record: false,
        });
    }

    pub fn should_quit(&self) -> bool {
        self.quit
    }

    pub fn prefs(&self) -> &dyn PrefStore {
        self.prefs.as_ref()
    }

    /// Apply `action` and run its effects. Must be called inside a tokio runtime.
    pub fn dispatch(&mut self, action: Action) {
        debug!("Dispatch: {:?}", action);
        for effect in update(&mut self.app, action) {
            self.execute(effect);
        }
    }

    /// Dispatch everything background tasks have sent so far.
    /// Returns true if anything was processed.
    pub fn drain(&mut self) -> bool {
        let mut any = false;
        while let Ok(action) = self.rx.try_recv() {
            any = true;
            self.dispatch(action);
        }
        any
    }

    /// Keep dispatching until nothing arrives for `idle`.
    pub async fn run_until_idle(&mut self, idle: Duration) {
        while let Ok(Some(action)) = tokio::time::timeout(idle, self.rx.recv()).await {
            self.dispatch(action);
            if self.quit {
                break;
            }
        }
    }

    fn execute(&mut self, effect: Effect) {
        match effect {
            Effect::Fetch {
                seq,
                page,
                lang,
                record,
            } => {
                info!(
                    "Fetching {} ({}) from {} source, seq {}",
                    page,
                    lang.code(),
                    self.source.name(),
                    seq
                );
                let source = self.source.clone();
                let tx = self.tx.clone();
                tokio::spawn(async move {
                    let action = match source.fetch(lang, page).await {
                        Ok(body) => Action::FragmentLoaded {
                            seq,
                            page,
                            body,
                            record,
                        },
                        Err(e) => Action::FragmentUnavailable {
                            seq,
                            page,
                            record,
                            reason: e.to_string(),
                        },
                    };
                    if tx.send(action).is_err() {
                        warn!("Failed to deliver fetch result for {page}: receiver dropped");
                    }
                });
            }
            Effect::Schedule { after, action } => {
                let tx = self.tx.clone();
                tokio::spawn(async move {
                    if !after.is_zero() {
                        tokio::time::sleep(after).await;
                    }
                    if tx.send(action).is_err() {
                        debug!("Timer fired after receiver dropped");
                    }
                });
            }
            Effect::SavePref { key, value } => {
                if let Err(e) = self.prefs.set(key, &value) {
                    warn!("Failed to save preference {key}={value}: {e}");
                }
            }
            Effect::Quit => self.quit = true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::lang::Lang;
    use crate::core::page::Page;
    use crate::core::prefs::{LANG_KEY, MemoryPrefs, THEME_KEY};
    use crate::test_support::{StubSource, test_app};

    const IDLE: Duration = Duration::from_millis(100);

    #[tokio::test]
    async fn start_loads_the_initial_page() {
        let source = Arc::new(StubSource::default().with(Lang::Fr, Page::Home, "# Accueil"));
        let mut runtime = Runtime::new(test_app(), source.clone(), Box::new(MemoryPrefs::new()));
        runtime.start();
        runtime.run_until_idle(IDLE).await;

        assert_eq!(runtime.app.page, Page::Home);
        assert!(runtime.app.content.is_some());
        assert!(!runtime.app.is_loading);
        assert_eq!(runtime.app.history.len(), 1);
        assert_eq!(*source.requests.lock().unwrap(), vec![(Lang::Fr, Page::Home)]);
    }

    #[tokio::test]
    async fn toggles_write_preferences() {
        let source = Arc::new(
            StubSource::default()
                .with(Lang::Fr, Page::Home, "fr")
                .with(Lang::En, Page::Home, "en"),
        );
        let mut runtime = Runtime::new(test_app(), source, Box::new(MemoryPrefs::new()));
        runtime.start();
        runtime.run_until_idle(IDLE).await;

        runtime.dispatch(Action::ToggleTheme);
        runtime.dispatch(Action::ToggleLang);
        runtime.run_until_idle(IDLE).await;

        assert_eq!(runtime.prefs().get(THEME_KEY).as_deref(), Some("dark"));
        assert_eq!(runtime.prefs().get(LANG_KEY).as_deref(), Some("en"));
    }

    #[tokio::test]
    async fn quit_is_remembered() {
        let mut runtime = Runtime::new(
            test_app(),
            Arc::new(StubSource::default()),
            Box::new(MemoryPrefs::new()),
        );
        assert!(!runtime.should_quit());
        runtime.dispatch(Action::Quit);
        assert!(runtime.should_quit());
        assert!(!runtime.drain());
    }
}

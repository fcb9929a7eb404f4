//! # Application State
//!
//! Everything the shell knows, in one place. Presentation-only state
//! (scroll offsets, focus, animation clocks) lives in the `tui` module.
//!
//! ```text
//! App
//! ├── lang: Lang                     // selects the fragment folder + labels
//! ├── theme: Theme                   // light / dark
//! ├── history: History               // entries + cursor, the "URL bar"
//! ├── page: Page                     // page whose content is on screen
//! ├── content: Option<Fragment>      // what is on screen
//! ├── opacity: Opacity               // fade state of the content region
//! ├── is_loading: bool               // loading indicator
//! ├── menu_open: bool                // nav list on narrow terminals
//! ├── nav_seq: u64                   // latest navigation; older results are stale
//! ├── pending: Option<PendingSwap>   // fetched, waiting for fade-out to finish
//! ├── content_rev: u64               // bumps on every swap
//! ├── scroll_request: Option<…>      // consumed by the content view
//! └── timing: Timing                 // transition delays
//! ```
//!
//! State changes only happen through `update(state, action)` in action.rs.

use crate::core::config::{ResolvedConfig, Timing};
use crate::core::fragment::Fragment;
use crate::core::history::History;
use crate::core::lang::Lang;
use crate::core::page::{Page, page_from_location};
use crate::core::prefs::{LANG_KEY, PrefStore, THEME_KEY};
use crate::core::theme::{Theme, system_prefers_dark};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Opacity {
    Visible,
    Hidden,
}

/// Where the content view should scroll next.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollRequest {
    Top,
    /// Smoothly bring the block at this index into view.
    Block(usize),
}

/// A fetched fragment waiting for the fade-out to finish.
#[derive(Debug, Clone)]
pub struct PendingSwap {
    pub seq: u64,
    pub page: Page,
    pub fragment: Fragment,
}

pub struct App {
    pub lang: Lang,
    pub theme: Theme,
    pub history: History,
    pub page: Page,
    pub content: Option<Fragment>,
    pub opacity: Opacity,
    pub is_loading: bool,
    pub menu_open: bool,
    pub nav_seq: u64,
    pub pending: Option<PendingSwap>,
    pub content_rev: u64,
    pub scroll_request: Option<ScrollRequest>,
    pub timing: Timing,
}

impl App {
    /// `initial` seeds the history; nothing is loaded until the first `Navigate`.
    pub fn new(lang: Lang, theme: Theme, initial: Page, timing: Timing) -> Self {
        Self {
            lang,
            theme,
            history: History::new(initial),
            page: initial,
            content: None,
            opacity: Opacity::Visible,
            is_loading: false,
            menu_open: false,
            nav_seq: 0,
            pending: None,
            content_rev: 0,
            scroll_request: None,
            timing,
        }
    }

    /// Startup state from config and saved preferences.
    pub fn from_config(config: &ResolvedConfig, prefs: &dyn PrefStore) -> Self {
        let lang = config.lang_override.unwrap_or_else(|| {
            prefs
                .get(LANG_KEY)
                .and_then(|code| Lang::from_code(&code))
                .unwrap_or(config.default_lang)
        });
        let theme = Theme::initial(prefs.get(THEME_KEY).as_deref(), system_prefers_dark());
        let initial = page_from_location(&config.location);
        log::info!(
            "Starting on {} (lang={}, theme={})",
            initial,
            lang.code(),
            theme.as_pref()
        );
        Self::new(lang, theme, initial, config.timing)
    }

    /// Page named by the current history entry.
    pub fn current_location(&self) -> Page {
        self.history.current().page
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::SiteLocation;
    use crate::core::prefs::MemoryPrefs;
    use crate::test_support::test_app;

    fn config(lang_override: Option<Lang>, default_lang: Lang, location: &str) -> ResolvedConfig {
        ResolvedConfig {
            site: SiteLocation::parse("./site"),
            lang_override,
            default_lang,
            fragment_ext: "md".to_string(),
            location: location.to_string(),
            timing: Timing::immediate(),
        }
    }

    #[test]
    fn test_app_new_defaults() {
        let app = test_app();
        assert_eq!(app.page, Page::Home);
        assert!(!app.is_loading);
        assert!(app.content.is_none());
        assert_eq!(app.history.len(), 1);
        assert_eq!(app.opacity, Opacity::Visible);
    }

    #[test]
    fn saved_language_beats_config_default() {
        let prefs = MemoryPrefs::new().with(LANG_KEY, "en");
        let app = App::from_config(&config(None, Lang::Fr, ""), &prefs);
        assert_eq!(app.lang, Lang::En);
    }

    #[test]
    fn explicit_language_beats_saved_one() {
        let prefs = MemoryPrefs::new().with(LANG_KEY, "en");
        let app = App::from_config(&config(Some(Lang::Fr), Lang::En, ""), &prefs);
        assert_eq!(app.lang, Lang::Fr);
    }

    #[test]
    fn invalid_saved_language_falls_back() {
        let prefs = MemoryPrefs::new().with(LANG_KEY, "xx");
        let app = App::from_config(&config(None, Lang::Fr, ""), &prefs);
        assert_eq!(app.lang, Lang::Fr);
    }

    #[test]
    fn saved_theme_is_used() {
        let prefs = MemoryPrefs::new().with(THEME_KEY, "dark");
        let app = App::from_config(&config(None, Lang::Fr, ""), &prefs);
        assert_eq!(app.theme, Theme::Dark);
    }

    #[test]
    fn location_seeds_the_initial_page() {
        let app = App::from_config(&config(None, Lang::Fr, "#skills"), &MemoryPrefs::new());
        assert_eq!(app.current_location(), Page::Skills);

        let app = App::from_config(&config(None, Lang::Fr, "#doesnotexist"), &MemoryPrefs::new());
        assert_eq!(app.current_location(), Page::Home);
    }
}

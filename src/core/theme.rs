//! # Theme
//!
//! Light/dark preference. A saved choice always wins; otherwise the
//! environment's color scheme decides.
//!
//! Terminals have no `prefers-color-scheme`, so the environment preference is
//! read from `FOLIO_COLOR_SCHEME` (`dark`/`light`) and, failing that, from the
//! `COLORFGBG` convention (`"15;0"` = light text on a dark background).

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn from_pref(value: &str) -> Option<Theme> {
        match value {
            "dark" => Some(Theme::Dark),
            "light" => Some(Theme::Light),
            _ => None,
        }
    }

    pub fn as_pref(self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    pub fn is_dark(self) -> bool {
        self == Theme::Dark
    }

    pub fn toggled(self) -> Theme {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    /// Theme at startup: the saved value if it is valid, else the environment.
    pub fn initial(saved: Option<&str>, prefers_dark: bool) -> Theme {
        match saved.and_then(Theme::from_pref) {
            Some(theme) => theme,
            None if prefers_dark => Theme::Dark,
            None => Theme::Light,
        }
    }
}

/// Reads the color-scheme preference from the process environment.
pub fn system_prefers_dark() -> bool {
    prefers_dark_from(
        std::env::var("FOLIO_COLOR_SCHEME").ok().as_deref(),
        std::env::var("COLORFGBG").ok().as_deref(),
    )
}

fn prefers_dark_from(scheme: Option<&str>, colorfgbg: Option<&str>) -> bool {
    match scheme.map(str::trim) {
        Some("dark") => return true,
        Some("light") => return false,
        _ => {}
    }

    // Last field is the background color index; 0-6 and 8 are dark.
    colorfgbg
        .and_then(|v| v.rsplit(';').next())
        .and_then(|bg| bg.trim().parse::<u8>().ok())
        .is_some_and(|bg| bg <= 6 || bg == 8)
}

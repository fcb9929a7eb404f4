//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::core::config::Timing;
use crate::core::lang::Lang;
use crate::core::page::Page;
use crate::core::state::App;
use crate::core::theme::Theme;
use crate::site::{FetchError, FragmentSource};

/// Serves fragments from memory and remembers what was asked for.
#[derive(Default)]
pub struct StubSource {
    pages: HashMap<(Lang, Page), String>,
    pub requests: Mutex<Vec<(Lang, Page)>>,
}

impl StubSource {
    pub fn with(mut self, lang: Lang, page: Page, body: &str) -> Self {
        self.pages.insert((lang, page), body.to_string());
        self
    }
}

#[async_trait]
impl FragmentSource for StubSource {
    fn name(&self) -> &str {
        "stub"
    }

    async fn fetch(&self, lang: Lang, page: Page) -> Result<String, FetchError> {
        if let Ok(mut requests) = self.requests.lock() {
            requests.push((lang, page));
        }
        self.pages.get(&(lang, page)).cloned().ok_or(FetchError::Status {
            status: 404,
            url: format!("stub://{}/{}", lang.folder(), page.slug()),
        })
    }
}

/// Creates a test App: French, light theme, on home, no transition delays.
pub fn test_app() -> App {
    App::new(Lang::Fr, Theme::Light, Page::Home, Timing::immediate())
}

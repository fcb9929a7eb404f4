//! # Pages
//!
//! The fixed set of pages the site knows about, and how a location string
//! (`#skills`, `?page=about`, a full URL) resolves to one of them.
//!
//! Anything outside the set resolves to [`DEFAULT_PAGE`]. There is no
//! "not found" page: an unknown identifier is simply home.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Page shown when nothing else can be resolved.
pub const DEFAULT_PAGE: Page = Page::Home;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Page {
    #[default]
    Home,
    About,
    Resume,
    Projects,
    Skills,
    Engagements,
    Testimonials,
    Contact,
}

impl Page {
    /// Navigation order.
    pub const ALL: [Page; 8] = [
        Page::Home,
        Page::About,
        Page::Resume,
        Page::Projects,
        Page::Skills,
        Page::Engagements,
        Page::Testimonials,
        Page::Contact,
    ];

    pub fn slug(self) -> &'static str {
        match self {
            Page::Home => "home",
            Page::About => "about",
            Page::Resume => "resume",
            Page::Projects => "projects",
            Page::Skills => "skills",
            Page::Engagements => "engagements",
            Page::Testimonials => "testimonials",
            Page::Contact => "contact",
        }
    }

    /// Exact, case-sensitive match against the known slugs.
    pub fn from_slug(slug: &str) -> Option<Page> {
        Page::ALL.into_iter().find(|p| p.slug() == slug)
    }

    /// Like [`Page::from_slug`] but coerces unknown identifiers to the default page.
    pub fn resolve(slug: &str) -> Page {
        Page::from_slug(slug).unwrap_or(DEFAULT_PAGE)
    }

    /// Shareable anchor for this page, e.g. `#resume`.
    pub fn anchor(self) -> String {
        format!("#{}", self.slug())
    }

    /// Dictionary key of the navigation label.
    pub fn label_key(self) -> &'static str {
        match self {
            Page::Home => "nav.home",
            Page::About => "nav.about",
            Page::Resume => "nav.resume",
            Page::Projects => "nav.projects",
            Page::Skills => "nav.skills",
            Page::Engagements => "nav.engagements",
            Page::Testimonials => "nav.testimonials",
            Page::Contact => "nav.contact",
        }
    }

    /// Position in [`Page::ALL`].
    pub fn index(self) -> usize {
        Page::ALL.iter().position(|p| *p == self).unwrap_or(0)
    }
}

impl fmt::Display for Page {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

/// Resolve the page named by a location.
///
/// Accepts anything from a bare anchor (`#skills`) to a full URL
/// (`https://me.dev/index.html?page=about#skills`). The anchor wins when it
/// names a known page, then the `page` query parameter, then the default.
pub fn page_from_location(location: &str) -> Page {
    let (before_hash, anchor) = match location.split_once('#') {
        Some((before, after)) => (before, Some(after)),
        None => (location, None),
    };

    if let Some(page) = anchor.and_then(Page::from_slug) {
        return page;
    }

    let query = before_hash.split_once('?').map(|(_, q)| q);
    let from_query = query.and_then(|q| {
        q.split('&')
            .filter_map(|pair| pair.split_once('='))
            .find(|(key, _)| *key == "page")
            .and_then(|(_, value)| Page::from_slug(value))
    });

    from_query.unwrap_or(DEFAULT_PAGE)
}

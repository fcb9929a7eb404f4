//! # Static Labels
//!
//! Localized strings for everything that is not a fragment: header, nav
//! links, footer hints, loader text. Fragments carry their own language via
//! the folder they are fetched from.
//!
//! Lookups happen at render time, so switching language re-renders every
//! label without touching them one by one.

use crate::core::lang::Lang;

/// `(key, french, english)`
static DICTIONARY: &[(&str, &str, &str)] = &[
    ("site.title", "Portfolio", "Portfolio"),
    ("nav.home", "Accueil", "Home"),
    ("nav.about", "À propos", "About"),
    ("nav.resume", "Parcours", "Resume"),
    ("nav.projects", "Projets", "Projects"),
    ("nav.skills", "Compétences", "Skills"),
    ("nav.engagements", "Engagements", "Engagements"),
    ("nav.testimonials", "Témoignages", "Testimonials"),
    ("nav.contact", "Contact", "Contact"),
    ("nav.title", "Navigation", "Navigation"),
    ("loader.loading", "Chargement…", "Loading…"),
    ("theme.to_light", "Activer le mode clair", "Switch to light mode"),
    ("theme.to_dark", "Activer le mode sombre", "Switch to dark mode"),
    ("hint.navigate", "Tab/Entrée : naviguer", "Tab/Enter: navigate"),
    ("hint.history", "b/f : précédent/suivant", "b/f: back/forward"),
    ("hint.theme", "t : thème", "t: theme"),
    ("hint.lang", "l : langue", "l: language"),
    ("hint.menu", "m : menu", "m: menu"),
    ("hint.focus", "[ ] : éléments, Espace : ouvrir", "[ ]: items, Space: open"),
    ("hint.quit", "q : quitter", "q: quit"),
    ("content.empty", "Aucun contenu chargé.", "No content loaded."),
];

/// Look up `key` for `lang`. Unknown keys come back unchanged so a missing
/// entry shows up on screen instead of as a blank.
pub fn t<'a>(lang: Lang, key: &'a str) -> &'a str {
    match DICTIONARY.iter().find(|(k, _, _)| *k == key) {
        Some((_, fr, en)) => match lang {
            Lang::Fr => *fr,
            Lang::En => *en,
        },
        None => {
            log::debug!("Missing label for key {key:?}");
            key
        }
    }
}

/// All keys in the dictionary.
pub fn keys() -> impl Iterator<Item = &'static str> {
    DICTIONARY.iter().map(|(k, _, _)| *k)
}

//! # Navigation History
//!
//! A browser-style session history: a list of entries and a cursor.
//!
//! ```text
//! push(C) after back():   [A, B*, C_old]  →  [A, B, C*]   (forward entries dropped)
//! replace(D):             [A, B*, C]      →  [A, D*, C]
//! ```
//!
//! There is always at least one entry, the page the shell was opened on.

use crate::core::page::Page;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryEntry {
    pub page: Page,
    pub anchor: String,
}

impl HistoryEntry {
    pub fn new(page: Page) -> Self {
        Self {
            page,
            anchor: page.anchor(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct History {
    entries: Vec<HistoryEntry>,
    cursor: usize,
}

impl History {
    pub fn new(initial: Page) -> Self {
        Self {
            entries: vec![HistoryEntry::new(initial)],
            cursor: 0,
        }
    }

    pub fn current(&self) -> &HistoryEntry {
        &self.entries[self.cursor]
    }

    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Adds a new entry after the cursor, discarding any forward entries.
    pub fn push(&mut self, page: Page) {
        self.entries.truncate(self.cursor + 1);
        self.entries.push(HistoryEntry::new(page));
        self.cursor = self.entries.len() - 1;
    }

    /// Rewrites the current entry in place.
    pub fn replace(&mut self, page: Page) {
        self.entries[self.cursor] = HistoryEntry::new(page);
    }

    pub fn can_go_back(&self) -> bool {
        self.cursor > 0
    }

    pub fn can_go_forward(&self) -> bool {
        self.cursor + 1 < self.entries.len()
    }

    /// Moves the cursor back one entry and returns its page.
    pub fn back(&mut self) -> Option<Page> {
        if !self.can_go_back() {
            return None;
        }
        self.cursor -= 1;
        Some(self.current().page)
    }

    /// Moves the cursor forward one entry and returns its page.
    pub fn forward(&mut self) -> Option<Page> {
        if !self.can_go_forward() {
            return None;
        }
        self.cursor += 1;
        Some(self.current().page)
    }
}

//! # Core Application Logic
//!
//! This module contains Folio's business logic.
//! It knows nothing about any specific UI technology.
//!
//! ```text
//!                    ┌─────────────────────────┐
//!                    │         CORE            │
//!                    │  (this module)          │
//!                    │                         │
//!                    │  • State (app data)     │
//!                    │  • Action (events)      │
//!                    │  • update() (reducer)   │
//!                    │  • Page hooks           │
//!                    └───────────┬─────────────┘
//!                                │  Effects
//!            ┌───────────────────┼───────────────────┐
//!            ▼                   ▼                   ▼
//!     ┌────────────┐      ┌────────────┐      ┌────────────┐
//!     │    TUI     │      │  Runtime   │      │    Site    │
//!     │  Adapter   │      │ (timers,   │      │ (fragment  │
//!     │ (ratatui)  │      │  prefs)    │      │  sources)  │
//!     └────────────┘      └────────────┘      └────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`state`]: The `App` struct — all application state in one place
//! - [`action`]: The `Action` enum and `update()` — everything that can happen
//! - [`page`], [`lang`], [`theme`]: the small enumerated values
//! - [`history`]: back/forward session history
//! - [`fragment`], [`hooks`]: parsed page content and per-page behavior
//! - [`i18n`]: static labels
//! - [`config`], [`prefs`]: settings and persisted preferences

pub mod action;
pub mod config;
pub mod fragment;
pub mod history;
pub mod hooks;
pub mod i18n;
pub mod lang;
pub mod page;
pub mod prefs;
pub mod state;
pub mod theme;

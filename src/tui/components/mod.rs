//! # TUI Components
//!
//! ## Stateless (props only)
//!
//! - `TitleBar`: site title, page label, loader, language and theme indicators
//! - `Footer`: key hints, focused item, history position
//!
//! ## Stateful (props + `&mut` state, event-driven)
//!
//! - `NavList` / `NavState`: page links; emits the `Page` to open
//! - `ContentView` / `ContentState`: the scrollable fragment; emits the
//!   activated `Interactive`
//!
//! Components receive external data as props, never by reaching into `App`,
//! so each can be rendered and tested on its own.
//!
//! ```text
//! components/
//! ├── mod.rs        (this file)
//! ├── title_bar.rs
//! ├── nav.rs
//! ├── content.rs
//! └── footer.rs
//! ```

pub mod content;
pub mod footer;
pub mod nav;
mod title_bar;

pub use content::{ContentState, ContentView};
pub use footer::Footer;
pub use nav::{NavList, NavState, nav_width};
pub use title_bar::TitleBar;

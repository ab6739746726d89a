//! A desktop-style developer portfolio for terminal shells.
//!
//! The crate renders a small "operating system" in the terminal: an
//! animated wallpaper, draggable windows for each portfolio section, a
//! top bar with a system menu, and a dock. The [`desktop::Desktop`]
//! shell owns all of it and routes input; window stacking itself lives
//! in the `folio-wm` workspace crate so it stays testable without a
//! terminal.
//!
//! Everything here is driven by one event loop ([`event_loop::EventLoop`])
//! over the small I/O traits in [`term`], which is also how the integration
//! tests run the whole shell headless.

pub mod chrome;
pub mod clipboard;
pub mod components;
pub mod desktop;
pub mod event_loop;
pub mod help_asset;
pub mod i18n;
pub mod keybindings;
pub mod links;
pub mod logbuf;
pub mod panel;
pub mod prefs;
pub mod profile;
pub mod sections;
pub mod term;
pub mod term_color;
pub mod theme;
pub mod ui;
pub mod wallpaper;

pub use desktop::Desktop;
pub use prefs::{Prefs, PrefsStore};
pub use profile::Profile;
pub use sections::SectionId;

use std::time::Instant;

use crossterm::event::Event;
use ratatui::layout::Rect;

use crate::i18n::Language;
use crate::theme::Theme;
use crate::ui::Surface;

pub mod about;
pub mod confirm;
pub mod contact;
pub mod experience;
pub mod help_overlay;
pub mod hero;
pub mod log_view;
pub mod palette;
pub mod projects;
pub mod scroll_text;
pub mod skills;

pub use about::AboutWindow;
pub use confirm::{ConfirmChoice, ConfirmOverlay};
pub use contact::ContactWindow;
pub use experience::ExperienceWindow;
pub use help_overlay::HelpOverlay;
pub use hero::HeroWindow;
pub use log_view::LogOverlay;
pub use palette::{CommandPalette, PaletteAction, PaletteOutcome};
pub use projects::ProjectsWindow;
pub use scroll_text::ScrollText;
pub use skills::SkillsWindow;

/// UI state handed to `Component` methods.
///
/// Carries focus plus the two global presentation toggles so components
/// restyle themselves without holding references back into the shell.
#[derive(Debug, Clone, Copy)]
pub struct ViewContext {
    focused: bool,
    theme: Theme,
    language: Language,
}

impl ViewContext {
    pub const fn new(theme: Theme, language: Language) -> Self {
        Self {
            focused: false,
            theme,
            language,
        }
    }

    pub const fn focused(&self) -> bool {
        self.focused
    }

    pub const fn theme(&self) -> Theme {
        self.theme
    }

    pub const fn language(&self) -> Language {
        self.language
    }

    pub const fn with_focus(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }
}

impl Default for ViewContext {
    fn default() -> Self {
        Self::new(Theme::Dark, Language::En)
    }
}

/// A window body. The shell renders the active chrome around it and routes
/// events here only while the window is frontmost.
pub trait Component {
    fn render(&mut self, frame: &mut Surface<'_>, area: Rect, ctx: &ViewContext);

    /// Returns true when the event was consumed. Consumed events never reach
    /// the global single-key shortcuts, so text inputs can swallow letters.
    fn handle_event(&mut self, _event: &Event, _ctx: &ViewContext) -> bool {
        false
    }

    /// Animation step, called once per event-loop tick. Returns true when
    /// the component changed and wants a redraw.
    fn tick(&mut self, _now: Instant) -> bool {
        false
    }
}

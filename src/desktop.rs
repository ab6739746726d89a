//! The desktop shell: wallpaper, window stack, panel rows and overlays,
//! plus all of the input routing between them.
//!
//! Routing order for key events is fixed: modal overlays first, then the
//! open system menu, then Ctrl-modified globals, then the focused window's
//! component, then the single-key globals. Components consume what they
//! need (the contact form eats plain characters), so a shortcut only fires
//! when nothing closer to the user wanted the key.

use std::collections::BTreeMap;
use std::time::{Duration, Instant};

use crossterm::event::{
    Event, KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use folio_wm::{Geometry, Placement, Viewport, WindowManager, WindowState};
use ratatui::buffer::Buffer;
use tracing::{debug, info, warn};

use crate::chrome::{HeaderAction, WindowChrome};
use crate::components::{
    AboutWindow, CommandPalette, Component, ConfirmChoice, ConfirmOverlay, ContactWindow,
    ExperienceWindow, HelpOverlay, HeroWindow, LogOverlay, PaletteAction, PaletteOutcome,
    ProjectsWindow, SkillsWindow, ViewContext,
};
use crate::i18n::{Language, tr};
use crate::keybindings::{Action, KeyBindings};
use crate::links;
use crate::panel::{DockChip, Panel};
use crate::prefs::{Prefs, PrefsStore};
use crate::profile::Profile;
use crate::sections::SectionId;
use crate::theme::Theme;
use crate::ui::Surface;
use crate::wallpaper::Wallpaper;

/// How long a `g` prefix stays armed before the sequence lapses.
const SECTION_PREFIX_TIMEOUT: Duration = Duration::from_millis(1000);
/// Two header clicks within this window count as a double click.
const HEADER_DOUBLE_CLICK: Duration = Duration::from_millis(500);

/// Window sizing in terminal cells.
const WINDOW_PLACEMENT: Placement = Placement {
    default_width: 72,
    default_height: 18,
    cascade_step: 2,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MenuEntry {
    Section(SectionId),
    ToggleTheme,
    ToggleLanguage,
    ToggleMouse,
    ShowLog,
    ShowHelp,
    CloseAll,
    Logout,
}

fn menu_entries() -> Vec<MenuEntry> {
    let mut items: Vec<MenuEntry> = SectionId::ALL
        .into_iter()
        .map(MenuEntry::Section)
        .collect();
    items.extend([
        MenuEntry::ToggleTheme,
        MenuEntry::ToggleLanguage,
        MenuEntry::ToggleMouse,
        MenuEntry::ShowLog,
        MenuEntry::ShowHelp,
        MenuEntry::CloseAll,
        MenuEntry::Logout,
    ]);
    items
}

pub struct Desktop {
    profile: Profile,
    theme: Theme,
    language: Language,
    prefs_store: PrefsStore,
    kb: KeyBindings,
    wm: WindowManager<SectionId>,
    components: BTreeMap<SectionId, Box<dyn Component>>,
    panel: Panel<SectionId>,
    wallpaper: Wallpaper,
    palette: CommandPalette,
    confirm: ConfirmOverlay,
    help: HelpOverlay,
    log: LogOverlay,
    menu_open: bool,
    menu_selected: usize,
    section_prefix: Option<Instant>,
    last_header_click: Option<(SectionId, Instant)>,
    mouse_capture: bool,
    capture_request: Option<bool>,
    quit: bool,
}

impl Desktop {
    pub fn new(
        profile: Profile,
        prefs: Prefs,
        prefs_store: PrefsStore,
        mouse_capture: bool,
        start: Instant,
    ) -> Self {
        let components = build_components(&profile, start);
        // Placeholder viewport; the first render adopts the real terminal size.
        let mut wm = WindowManager::new(Viewport::with_origin(0, 1, 80, 22))
            .with_placement(WINDOW_PLACEMENT);
        wm.open(SectionId::Home);
        Self {
            profile,
            theme: prefs.theme,
            language: prefs.language,
            prefs_store,
            kb: KeyBindings::default(),
            wm,
            components,
            panel: Panel::new(),
            wallpaper: Wallpaper::new(),
            palette: CommandPalette::new(),
            confirm: ConfirmOverlay::new(),
            help: HelpOverlay::new(),
            log: LogOverlay::new(),
            menu_open: false,
            menu_selected: 0,
            section_prefix: None,
            last_header_click: None,
            mouse_capture,
            capture_request: None,
            quit: false,
        }
    }

    pub fn should_quit(&self) -> bool {
        self.quit
    }

    /// Pending mouse-capture switch for the input driver, if any.
    pub fn take_capture_request(&mut self) -> Option<bool> {
        self.capture_request.take()
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn language(&self) -> Language {
        self.language
    }

    /// Animation step between input events.
    pub fn tick(&mut self, now: Instant) {
        self.wallpaper.tick();
        if let Some(armed) = self.section_prefix
            && now.duration_since(armed) > SECTION_PREFIX_TIMEOUT
        {
            self.section_prefix = None;
        }
        for component in self.components.values_mut() {
            let _ = component.tick(now);
        }
    }

    pub fn handle_event(&mut self, event: &Event, now: Instant) {
        if let Event::Resize(width, height) = event {
            // The next render reconciles the viewport from the frame area.
            debug!(width, height, "terminal resized");
            return;
        }
        if self.confirm.visible() {
            if let Some(choice) = self.confirm.handle(event) {
                self.on_confirm(choice);
            }
            return;
        }
        if self.palette.visible() {
            match self.palette.handle(event) {
                PaletteOutcome::Run(action) => self.run_palette(action),
                PaletteOutcome::Ignored
                | PaletteOutcome::Consumed
                | PaletteOutcome::Closed => {}
            }
            return;
        }
        if self.help.visible() {
            self.help.handle(event);
            return;
        }
        if self.log.visible() {
            self.log.handle(event);
            return;
        }
        if self.menu_open {
            self.handle_menu_event(event);
            return;
        }
        match event {
            Event::Key(key) => self.handle_key(key, now),
            Event::Mouse(mouse) => self.handle_mouse(event, mouse, now),
            _ => {}
        }
    }

    fn handle_key(&mut self, key: &KeyEvent, now: Instant) {
        // An armed `g` prefix owns the very next key press.
        if let Some(armed) = self.section_prefix.take()
            && now.duration_since(armed) <= SECTION_PREFIX_TIMEOUT
        {
            if let KeyCode::Char(c) = key.code
                && let Some(section) = SectionId::from_hotkey(c.to_ascii_lowercase())
            {
                self.open_section(section);
            }
            return;
        }

        // Ctrl chords fire before the focused component so the contact form
        // cannot swallow quit or the palette.
        if key.modifiers.contains(KeyModifiers::CONTROL) {
            if self.kb.matches(Action::Quit, key) {
                self.request_logout();
                return;
            }
            if self.kb.matches(Action::OpenPalette, key) {
                self.palette.open(&self.profile, self.language);
                return;
            }
        }

        if let Some(section) = self.wm.top_visible() {
            let ctx = self.view_context().with_focus(true);
            if let Some(component) = self.components.get_mut(&section)
                && component.handle_event(&Event::Key(*key), &ctx)
            {
                return;
            }
        }

        if self.kb.matches(Action::Quit, key) {
            self.request_logout();
        } else if self.kb.matches(Action::OpenPalette, key) {
            self.palette.open(&self.profile, self.language);
        } else if self.kb.matches(Action::OpenHelp, key) {
            self.help.open();
        } else if self.kb.matches(Action::ToggleTheme, key) {
            self.toggle_theme();
        } else if self.kb.matches(Action::ToggleLanguage, key) {
            self.toggle_language();
        } else if self.kb.matches(Action::SectionPrefix, key) {
            self.section_prefix = Some(now);
        } else if self.kb.matches(Action::MinimizeActive, key) {
            if let Some(section) = self.wm.top_visible() {
                self.wm.minimize(section);
            }
        } else if self.kb.matches(Action::MaximizeActive, key) {
            if let Some(section) = self.wm.top_visible() {
                self.wm.maximize(section);
            }
        } else if self.kb.matches(Action::CloseActive, key) {
            if let Some(section) = self.wm.top_visible() {
                self.wm.close(section);
            }
        } else if self.kb.matches(Action::CycleNextWindow, key) {
            self.cycle_windows(true);
        } else if self.kb.matches(Action::CyclePrevWindow, key) {
            self.cycle_windows(false);
        } else if self.kb.matches(Action::MenuToggle, key) {
            self.menu_open = true;
            self.menu_selected = 0;
        }
    }

    fn handle_menu_event(&mut self, event: &Event) {
        match event {
            Event::Key(key) => {
                let items = menu_entries();
                if self.kb.matches(Action::MenuToggle, key) {
                    self.menu_open = false;
                } else if self.kb.matches(Action::MenuUp, key)
                    || self.kb.matches(Action::MenuPrev, key)
                {
                    self.menu_selected = (self.menu_selected + items.len() - 1) % items.len();
                } else if self.kb.matches(Action::MenuDown, key)
                    || self.kb.matches(Action::MenuNext, key)
                {
                    self.menu_selected = (self.menu_selected + 1) % items.len();
                } else if self.kb.matches(Action::MenuSelect, key) {
                    self.menu_open = false;
                    if let Some(entry) = items.get(self.menu_selected) {
                        self.run_menu_entry(*entry);
                    }
                }
                // Everything else dies here; the menu is modal.
            }
            Event::Mouse(mouse) => {
                if let Some(index) = self.panel.hit_test_menu_item(event) {
                    self.menu_open = false;
                    if let Some(entry) = menu_entries().get(index) {
                        self.run_menu_entry(*entry);
                    }
                } else if matches!(mouse.kind, MouseEventKind::Down(_)) {
                    // Clicking anywhere else, the menu button included, closes.
                    self.menu_open = false;
                } else if matches!(mouse.kind, MouseEventKind::ScrollUp) {
                    let len = menu_entries().len();
                    self.menu_selected = (self.menu_selected + len - 1) % len;
                } else if matches!(mouse.kind, MouseEventKind::ScrollDown) {
                    self.menu_selected = (self.menu_selected + 1) % menu_entries().len();
                }
            }
            _ => {}
        }
    }

    fn handle_mouse(&mut self, event: &Event, mouse: &MouseEvent, now: Instant) {
        match mouse.kind {
            MouseEventKind::Moved | MouseEventKind::Drag(MouseButton::Left) => {
                self.wallpaper.set_pointer(mouse.column, mouse.row);
                if self.wm.is_dragging() {
                    self.wm.update_drag(mouse.column as i32, mouse.row as i32);
                }
            }
            MouseEventKind::Up(MouseButton::Left) => {
                self.wm.end_drag();
            }
            MouseEventKind::Down(MouseButton::Left) => {
                if self.panel.hit_test_menu(event) {
                    self.menu_open = true;
                    self.menu_selected = 0;
                } else if self.panel.hit_test_theme(event) {
                    self.toggle_theme();
                } else if self.panel.hit_test_language(event) {
                    self.toggle_language();
                } else if self.panel.hit_test_mouse_indicator(event) {
                    self.set_mouse_capture(!self.mouse_capture);
                } else if let Some(section) = self.panel.hit_test_chip(event) {
                    self.open_section(section);
                } else if let Some(section) =
                    self.wm.hit_test(mouse.column as i32, mouse.row as i32)
                {
                    self.click_window(section, mouse, now);
                }
            }
            MouseEventKind::ScrollUp | MouseEventKind::ScrollDown => {
                if let Some(section) = self.wm.hit_test(mouse.column as i32, mouse.row as i32) {
                    self.forward_mouse_to(section, mouse);
                }
            }
            _ => {}
        }
    }

    fn click_window(&mut self, section: SectionId, mouse: &MouseEvent, now: Instant) {
        let Some(geometry) = self.wm.geometry_of(section) else {
            return;
        };
        match WindowChrome::hit_test(geometry, mouse.column, mouse.row) {
            HeaderAction::Close => self.wm.close(section),
            HeaderAction::Minimize => self.wm.minimize(section),
            HeaderAction::Maximize => {
                self.wm.activate(section);
                self.wm.maximize(section);
            }
            HeaderAction::Drag => {
                self.wm.activate(section);
                let double = self
                    .last_header_click
                    .is_some_and(|(s, t)| {
                        s == section && now.duration_since(t) <= HEADER_DOUBLE_CLICK
                    });
                if double {
                    self.last_header_click = None;
                    self.wm.maximize(section);
                } else {
                    self.last_header_click = Some((section, now));
                    self.wm
                        .begin_drag(section, mouse.column as i32, mouse.row as i32);
                }
            }
            HeaderAction::None => {
                self.wm.activate(section);
                self.forward_mouse_to(section, mouse);
            }
        }
    }

    /// Hand a mouse event to a window's component in window-local
    /// coordinates; the component rendered into its own offscreen buffer,
    /// so its hit rects live in that space.
    fn forward_mouse_to(&mut self, section: SectionId, mouse: &MouseEvent) -> bool {
        let Some(geometry) = self.wm.geometry_of(section) else {
            return false;
        };
        let column = (mouse.column as i32 - geometry.left).clamp(0, i32::from(u16::MAX)) as u16;
        let row = (mouse.row as i32 - geometry.top).clamp(0, i32::from(u16::MAX)) as u16;
        let translated = Event::Mouse(MouseEvent {
            kind: mouse.kind,
            column,
            row,
            modifiers: mouse.modifiers,
        });
        let ctx = self
            .view_context()
            .with_focus(self.wm.top_visible() == Some(section));
        match self.components.get_mut(&section) {
            Some(component) => component.handle_event(&translated, &ctx),
            None => false,
        }
    }

    fn cycle_windows(&mut self, forward: bool) {
        let order: Vec<SectionId> = self
            .wm
            .visible_back_to_front()
            .iter()
            .map(|w| w.key())
            .collect();
        if order.len() < 2 {
            return;
        }
        if forward {
            self.wm.activate(order[0]);
        } else {
            // Backwards rotation: re-raise everything except the current
            // top, which sinks it to the bottom of the stack.
            for section in &order[..order.len() - 1] {
                self.wm.activate(*section);
            }
        }
    }

    fn open_section(&mut self, section: SectionId) {
        info!(?section, "opening section");
        self.wm.open(section);
    }

    fn toggle_theme(&mut self) {
        self.theme = self.theme.toggle();
        info!(theme = self.theme.name(), "theme toggled");
        self.persist_prefs();
    }

    fn toggle_language(&mut self) {
        self.language = self.language.toggle();
        info!(language = self.language.tag(), "language toggled");
        self.persist_prefs();
    }

    fn persist_prefs(&self) {
        let prefs = Prefs {
            theme: self.theme,
            language: self.language,
        };
        if let Err(err) = self.prefs_store.save(prefs) {
            warn!(%err, "could not save preferences");
        }
    }

    fn set_mouse_capture(&mut self, enabled: bool) {
        self.mouse_capture = enabled;
        self.capture_request = Some(enabled);
        info!(enabled, "mouse capture");
    }

    fn request_logout(&mut self) {
        let lang = self.language;
        self.confirm.open(
            tr(lang, "confirm.logout.title"),
            tr(lang, "confirm.logout.body"),
            tr(lang, "confirm.accept"),
            tr(lang, "confirm.cancel"),
        );
    }

    fn on_confirm(&mut self, choice: ConfirmChoice) {
        if choice == ConfirmChoice::Accept {
            info!("logging out");
            self.wm.close_all();
            self.quit = true;
        }
    }

    fn run_palette(&mut self, action: PaletteAction) {
        match action {
            PaletteAction::OpenSection(section) => self.open_section(section),
            PaletteAction::ToggleTheme => self.toggle_theme(),
            PaletteAction::ToggleLanguage => self.toggle_language(),
            PaletteAction::OpenUrl(url) => {
                if let Err(err) = links::open_url(&url) {
                    warn!(%err, url, "could not open link");
                }
            }
            PaletteAction::ShowHelp => self.help.open(),
            PaletteAction::ShowLog => self.log.open(),
            PaletteAction::CloseAll => self.wm.close_all(),
            PaletteAction::Quit => self.request_logout(),
        }
    }

    fn run_menu_entry(&mut self, entry: MenuEntry) {
        match entry {
            MenuEntry::Section(section) => self.open_section(section),
            MenuEntry::ToggleTheme => self.toggle_theme(),
            MenuEntry::ToggleLanguage => self.toggle_language(),
            MenuEntry::ToggleMouse => self.set_mouse_capture(!self.mouse_capture),
            MenuEntry::ShowLog => self.log.open(),
            MenuEntry::ShowHelp => self.help.open(),
            MenuEntry::CloseAll => self.wm.close_all(),
            MenuEntry::Logout => self.request_logout(),
        }
    }

    fn view_context(&self) -> ViewContext {
        ViewContext::new(self.theme, self.language)
    }

    pub fn render(&mut self, frame: &mut Surface<'_>) {
        let area = frame.area();
        self.panel.begin_frame();
        let (top, _dock, desktop) = self.panel.split_area(area);

        let viewport = Viewport::with_origin(
            desktop.x as i32,
            desktop.y as i32,
            desktop.width.into(),
            desktop.height.into(),
        );
        if viewport != self.wm.viewport() {
            self.wm.set_viewport(viewport);
        }

        self.wallpaper.render(frame, desktop, self.theme);

        let stack: Vec<(SectionId, Geometry, WindowState)> = self
            .wm
            .visible_back_to_front()
            .iter()
            .map(|w| (w.key(), w.geometry(), w.state()))
            .collect();
        let focused = self.wm.top_visible();
        for (section, geometry, state) in stack {
            let size = crate::ui::geometry_size_rect(geometry);
            if size.width == 0 || size.height == 0 {
                continue;
            }
            let mut offscreen_buf = Buffer::empty(size);
            let mut offscreen = Surface::over(size, &mut offscreen_buf);
            let is_focused = focused == Some(section);
            WindowChrome::render(
                &mut offscreen,
                size,
                section.label(self.language),
                is_focused,
                state == WindowState::Maximized,
                self.theme,
            );
            let content = WindowChrome::content_area(size);
            if content.width > 0
                && content.height > 0
                && let Some(component) = self.components.get_mut(&section)
            {
                let ctx = ViewContext::new(self.theme, self.language).with_focus(is_focused);
                component.render(&mut offscreen, content, &ctx);
            }
            frame.compose(&offscreen_buf, geometry);
        }

        let title = format!(
            "{} · {}",
            self.profile.personal.name, self.profile.personal.title
        );
        self.panel.render_top(
            frame,
            &title,
            self.theme,
            self.language,
            self.mouse_capture,
            self.menu_open,
        );

        let chips = self.dock_chips();
        let language = self.language;
        self.panel.render_dock(frame, self.theme, &chips, |section| {
            format!("{} {}", section.icon(), section.label(language))
        });

        if self.menu_open {
            let labels = self.menu_labels();
            self.panel
                .render_menu(frame, true, area, self.theme, &labels, self.menu_selected);
            self.panel.render_menu_backdrop(frame, true, area, top);
        }

        self.log.render(frame, area, self.theme, self.language);
        self.help.render(frame, area, self.theme, self.language);
        self.palette.render(frame, area, self.theme, self.language);
        self.confirm.render(frame, area, self.theme);
    }

    /// One chip per section in registry order; sections without a window
    /// show as closed launchers.
    fn dock_chips(&self) -> Vec<DockChip<SectionId>> {
        SectionId::ALL
            .into_iter()
            .map(|section| {
                let entry = self.wm.dock().iter().find(|e| e.key == section);
                DockChip {
                    key: section,
                    state: entry.map(|e| e.state),
                    active: entry.is_some_and(|e| e.active),
                }
            })
            .collect()
    }

    fn menu_labels(&self) -> Vec<(Option<&'static str>, &'static str)> {
        let lang = self.language;
        menu_entries()
            .into_iter()
            .map(|entry| match entry {
                MenuEntry::Section(section) => (Some(section.icon()), section.label(lang)),
                MenuEntry::ToggleTheme => (None, tr(lang, "menu.theme")),
                MenuEntry::ToggleLanguage => (None, tr(lang, "menu.language")),
                MenuEntry::ToggleMouse => (None, tr(lang, "menu.mouse")),
                MenuEntry::ShowLog => (None, tr(lang, "menu.log")),
                MenuEntry::ShowHelp => (None, tr(lang, "menu.help")),
                MenuEntry::CloseAll => (None, tr(lang, "menu.close_all")),
                MenuEntry::Logout => (None, tr(lang, "menu.logout")),
            })
            .collect()
    }
}

fn build_components(
    profile: &Profile,
    start: Instant,
) -> BTreeMap<SectionId, Box<dyn Component>> {
    let mut map: BTreeMap<SectionId, Box<dyn Component>> = BTreeMap::new();
    map.insert(SectionId::Home, Box::new(HeroWindow::new(profile, start)));
    map.insert(SectionId::About, Box::new(AboutWindow::new(profile)));
    map.insert(
        SectionId::Experience,
        Box::new(ExperienceWindow::new(profile)),
    );
    map.insert(SectionId::Skills, Box::new(SkillsWindow::new(profile)));
    map.insert(SectionId::Projects, Box::new(ProjectsWindow::new(profile)));
    map.insert(SectionId::Contact, Box::new(ContactWindow::new(profile)));
    map
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::layout::Rect;

    fn desktop() -> Desktop {
        let profile = Profile::load(None).unwrap();
        let dir = std::env::temp_dir().join(format!("folio-desktop-{}", std::process::id()));
        let store = PrefsStore::at(dir.join("prefs.toml"));
        Desktop::new(profile, Prefs::default(), store, true, Instant::now())
    }

    fn key(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn ctrl(c: char) -> Event {
        Event::Key(KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL))
    }

    fn click(column: u16, row: u16) -> Event {
        Event::Mouse(MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column,
            row,
            modifiers: KeyModifiers::NONE,
        })
    }

    fn render_to(desktop: &mut Desktop, width: u16, height: u16) -> Buffer {
        let area = Rect {
            x: 0,
            y: 0,
            width,
            height,
        };
        let mut buf = Buffer::empty(area);
        let mut frame = Surface::over(area, &mut buf);
        desktop.render(&mut frame);
        buf
    }

    #[test]
    fn boots_with_the_home_window_open() {
        let d = desktop();
        assert!(d.wm.is_open(SectionId::Home));
        assert_eq!(d.wm.active(), Some(SectionId::Home));
        assert!(!d.should_quit());
    }

    #[test]
    fn g_sequence_opens_sections_and_lapses() {
        let mut d = desktop();
        let now = Instant::now();
        d.handle_event(&key(KeyCode::Char('g')), now);
        d.handle_event(&key(KeyCode::Char('p')), now + Duration::from_millis(300));
        assert!(d.wm.is_open(SectionId::Projects));

        d.handle_event(&key(KeyCode::Char('g')), now);
        d.handle_event(&key(KeyCode::Char('c')), now + Duration::from_millis(1500));
        assert!(!d.wm.is_open(SectionId::Contact));
    }

    #[test]
    fn armed_prefix_swallows_a_non_hotkey_second_press() {
        let mut d = desktop();
        let now = Instant::now();
        let theme = d.theme();
        d.handle_event(&key(KeyCode::Char('g')), now);
        // 't' would toggle the theme as a global, but it terminates the
        // sequence instead.
        d.handle_event(&key(KeyCode::Char('t')), now + Duration::from_millis(100));
        assert_eq!(d.theme(), theme);
        assert!(d.section_prefix.is_none());
    }

    #[test]
    fn theme_and_language_toggles_apply_and_persist() {
        let dir = tempfile::tempdir().unwrap();
        let store = PrefsStore::at(dir.path().join("prefs.toml"));
        let profile = Profile::load(None).unwrap();
        let mut d = Desktop::new(profile, Prefs::default(), store.clone(), true, Instant::now());
        let now = Instant::now();

        d.handle_event(&key(KeyCode::Char('t')), now);
        assert_eq!(d.theme(), Theme::Light);
        d.handle_event(&key(KeyCode::Char('l')), now);
        assert_eq!(d.language(), Language::Hi);

        let saved = store.load();
        assert_eq!(saved.theme, Theme::Light);
        assert_eq!(saved.language, Language::Hi);
    }

    #[test]
    fn contact_form_swallows_plain_letters_but_not_ctrl_chords() {
        let mut d = desktop();
        let now = Instant::now();
        d.handle_event(&key(KeyCode::Char('g')), now);
        d.handle_event(&key(KeyCode::Char('c')), now);
        assert_eq!(d.wm.top_visible(), Some(SectionId::Contact));

        let theme = d.theme();
        d.handle_event(&key(KeyCode::Char('t')), now);
        assert_eq!(d.theme(), theme);

        d.handle_event(&ctrl('k'), now);
        assert!(d.palette.visible());
    }

    #[test]
    fn tab_cycles_activation_through_visible_windows() {
        let mut d = desktop();
        let now = Instant::now();
        d.handle_event(&key(KeyCode::Char('g')), now);
        d.handle_event(&key(KeyCode::Char('a')), now);
        d.handle_event(&key(KeyCode::Char('g')), now);
        d.handle_event(&key(KeyCode::Char('s')), now);
        assert_eq!(d.wm.top_visible(), Some(SectionId::Skills));

        d.handle_event(&key(KeyCode::Tab), now);
        assert_eq!(d.wm.top_visible(), Some(SectionId::Home));
        d.handle_event(&key(KeyCode::Tab), now);
        assert_eq!(d.wm.top_visible(), Some(SectionId::About));

        // BackTab undoes the rotation.
        d.handle_event(&key(KeyCode::BackTab), now);
        assert_eq!(d.wm.top_visible(), Some(SectionId::Home));
    }

    #[test]
    fn window_keys_minimize_maximize_close() {
        let mut d = desktop();
        let now = Instant::now();
        d.handle_event(&key(KeyCode::Char('f')), now);
        assert_eq!(
            d.wm.state_of(SectionId::Home),
            Some(WindowState::Maximized)
        );
        d.handle_event(&key(KeyCode::Char('f')), now);
        assert_eq!(d.wm.state_of(SectionId::Home), Some(WindowState::Normal));

        d.handle_event(&key(KeyCode::Char('m')), now);
        assert_eq!(
            d.wm.state_of(SectionId::Home),
            Some(WindowState::Minimized)
        );
        // Hidden windows take no further window keys.
        d.handle_event(&key(KeyCode::Char('x')), now);
        assert!(d.wm.is_open(SectionId::Home));
    }

    #[test]
    fn quit_goes_through_the_confirm_overlay() {
        let mut d = desktop();
        let now = Instant::now();
        d.handle_event(&ctrl('q'), now);
        assert!(d.confirm.visible());

        d.handle_event(&key(KeyCode::Esc), now);
        assert!(!d.should_quit());
        assert!(!d.confirm.visible());

        d.handle_event(&ctrl('q'), now);
        d.handle_event(&key(KeyCode::Enter), now);
        assert!(d.should_quit());
        assert!(d.wm.is_empty());
    }

    #[test]
    fn escape_menu_runs_entries() {
        let mut d = desktop();
        let now = Instant::now();
        d.handle_event(&key(KeyCode::Esc), now);
        assert!(d.menu_open);

        // Seventh entry toggles the theme (after the six sections).
        for _ in 0..6 {
            d.handle_event(&key(KeyCode::Down), now);
        }
        d.handle_event(&key(KeyCode::Enter), now);
        assert!(!d.menu_open);
        assert_eq!(d.theme(), Theme::Light);
    }

    #[test]
    fn menu_up_wraps_to_logout_and_asks_for_confirmation() {
        let mut d = desktop();
        let now = Instant::now();
        d.handle_event(&key(KeyCode::Esc), now);
        d.handle_event(&key(KeyCode::Up), now);
        d.handle_event(&key(KeyCode::Enter), now);
        assert!(d.confirm.visible());
        d.handle_event(&key(KeyCode::Char('n')), now);
        assert!(!d.should_quit());
    }

    #[test]
    fn palette_runs_a_section_command() {
        let mut d = desktop();
        let now = Instant::now();
        d.handle_event(&key(KeyCode::Char('/')), now);
        assert!(d.palette.visible());
        for c in "contact".chars() {
            d.handle_event(&key(KeyCode::Char(c)), now);
        }
        d.handle_event(&key(KeyCode::Enter), now);
        assert!(!d.palette.visible());
        assert!(d.wm.is_open(SectionId::Contact));
    }

    #[test]
    fn dock_chip_click_opens_a_section() {
        let mut d = desktop();
        let _ = render_to(&mut d, 100, 30);
        // Chips start at x=0: " ⌂ Home " is 8 wide, then a gap; the About
        // chip begins at column 9.
        d.handle_event(&click(10, 29), Instant::now());
        assert!(d.wm.is_open(SectionId::About));
        assert_eq!(d.wm.active(), Some(SectionId::About));
    }

    #[test]
    fn header_close_button_closes_the_window() {
        let mut d = desktop();
        let _ = render_to(&mut d, 100, 30);
        let geometry = d.wm.geometry_of(SectionId::Home).unwrap();
        let close_col = (geometry.right() - 1 - 2) as u16;
        let header_row = (geometry.top + 1) as u16;
        d.handle_event(&click(close_col, header_row), Instant::now());
        assert!(!d.wm.is_open(SectionId::Home));
    }

    #[test]
    fn double_click_on_the_header_maximizes() {
        let mut d = desktop();
        let _ = render_to(&mut d, 100, 30);
        let geometry = d.wm.geometry_of(SectionId::Home).unwrap();
        let header_row = (geometry.top + 1) as u16;
        let drag_col = (geometry.left + 5) as u16;
        let now = Instant::now();
        d.handle_event(&click(drag_col, header_row), now);
        d.handle_event(
            &Event::Mouse(MouseEvent {
                kind: MouseEventKind::Up(MouseButton::Left),
                column: drag_col,
                row: header_row,
                modifiers: KeyModifiers::NONE,
            }),
            now,
        );
        d.handle_event(&click(drag_col, header_row), now + Duration::from_millis(200));
        assert_eq!(
            d.wm.state_of(SectionId::Home),
            Some(WindowState::Maximized)
        );
    }

    #[test]
    fn header_drag_moves_the_window() {
        let mut d = desktop();
        let _ = render_to(&mut d, 100, 30);
        let geometry = d.wm.geometry_of(SectionId::Home).unwrap();
        let header_row = (geometry.top + 1) as u16;
        let grab_col = (geometry.left + 5) as u16;
        let now = Instant::now();
        d.handle_event(&click(grab_col, header_row), now);
        assert!(d.wm.is_dragging());
        d.handle_event(
            &Event::Mouse(MouseEvent {
                kind: MouseEventKind::Drag(MouseButton::Left),
                column: grab_col + 7,
                row: header_row + 3,
                modifiers: KeyModifiers::NONE,
            }),
            now,
        );
        d.handle_event(
            &Event::Mouse(MouseEvent {
                kind: MouseEventKind::Up(MouseButton::Left),
                column: grab_col + 7,
                row: header_row + 3,
                modifiers: KeyModifiers::NONE,
            }),
            now,
        );
        let moved = d.wm.geometry_of(SectionId::Home).unwrap();
        assert_eq!(moved.left, geometry.left + 7);
        assert_eq!(moved.top, geometry.top + 3);
    }

    #[test]
    fn mouse_indicator_click_requests_a_capture_change() {
        let mut d = desktop();
        let _ = render_to(&mut d, 120, 30);
        let hit = (0..120u16).find(|col| d.panel.hit_test_mouse_indicator(&click(*col, 0)));
        let col = hit.expect("indicator rendered");
        d.handle_event(&click(col, 0), Instant::now());
        assert_eq!(d.take_capture_request(), Some(false));
        assert_eq!(d.take_capture_request(), None);
    }

    #[test]
    fn menu_entry_restores_mouse_capture_without_the_mouse() {
        let mut d = desktop();
        d.set_mouse_capture(false);
        let _ = d.take_capture_request();
        let now = Instant::now();
        d.handle_event(&key(KeyCode::Esc), now);
        // Sections, theme, language, then the capture toggle.
        for _ in 0..8 {
            d.handle_event(&key(KeyCode::Down), now);
        }
        d.handle_event(&key(KeyCode::Enter), now);
        assert_eq!(d.take_capture_request(), Some(true));
    }

    #[test]
    fn maximized_windows_follow_terminal_resizes() {
        let mut d = desktop();
        let _ = render_to(&mut d, 100, 30);
        d.handle_event(&key(KeyCode::Char('f')), Instant::now());
        let _ = render_to(&mut d, 60, 20);
        let geometry = d.wm.geometry_of(SectionId::Home).unwrap();
        assert_eq!(geometry, Geometry::new(0, 1, 60, 18));
    }

    #[test]
    fn overlays_are_modal_over_the_desktop() {
        let mut d = desktop();
        let now = Instant::now();
        d.handle_event(&key(KeyCode::Char('?')), now);
        assert!(d.help.visible());
        let theme = d.theme();
        d.handle_event(&key(KeyCode::Char('t')), now);
        assert_eq!(d.theme(), theme);
        d.handle_event(&key(KeyCode::Esc), now);
        assert!(!d.help.visible());
        assert!(!d.menu_open);
    }
}

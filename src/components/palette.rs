use crossterm::event::{Event, KeyCode, KeyModifiers, MouseEventKind};
use ratatui::layout::{Position, Rect};
use ratatui::style::{Modifier, Style};

use crate::i18n::{Language, tr};
use crate::links;
use crate::profile::Profile;
use crate::sections::SectionId;
use crate::theme::Theme;
use crate::ui::{Surface, clip_width, dim_outside, fill_region, put_str};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PaletteAction {
    OpenSection(SectionId),
    ToggleTheme,
    ToggleLanguage,
    OpenUrl(String),
    ShowHelp,
    ShowLog,
    CloseAll,
    Quit,
}

#[derive(Debug, PartialEq, Eq)]
pub enum PaletteOutcome {
    Ignored,
    Consumed,
    Closed,
    Run(PaletteAction),
}

#[derive(Debug, Clone)]
struct PaletteCommand {
    title: String,
    action: PaletteAction,
}

/// The `/` command palette: type to filter, Enter to run.
///
/// Filtering is a case-insensitive substring match over command titles, the
/// selection snaps back to the top whenever the query changes, and Up/Down
/// wrap around the filtered list.
#[derive(Debug, Default)]
pub struct CommandPalette {
    visible: bool,
    input: String,
    selected: usize,
    commands: Vec<PaletteCommand>,
    bounds: Rect,
    item_hits: Vec<(usize, Rect)>,
}

impl CommandPalette {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn visible(&self) -> bool {
        self.visible
    }

    /// Open with a fresh command inventory; titles follow the current
    /// language and the link commands follow the profile.
    pub fn open(&mut self, profile: &Profile, language: Language) {
        let open_prefix = tr(language, "palette.open_prefix");
        let mut commands = Vec::new();
        for section in SectionId::ALL {
            commands.push(PaletteCommand {
                title: format!("{open_prefix} {}", section.label(language)),
                action: PaletteAction::OpenSection(section),
            });
        }
        commands.push(PaletteCommand {
            title: tr(language, "palette.toggle_theme").to_string(),
            action: PaletteAction::ToggleTheme,
        });
        commands.push(PaletteCommand {
            title: tr(language, "palette.toggle_language").to_string(),
            action: PaletteAction::ToggleLanguage,
        });
        for link in links::collect_profile_links(profile) {
            commands.push(PaletteCommand {
                title: format!("{open_prefix} {}", link.label),
                action: PaletteAction::OpenUrl(link.url),
            });
        }
        commands.push(PaletteCommand {
            title: tr(language, "menu.help").to_string(),
            action: PaletteAction::ShowHelp,
        });
        commands.push(PaletteCommand {
            title: tr(language, "menu.log").to_string(),
            action: PaletteAction::ShowLog,
        });
        commands.push(PaletteCommand {
            title: tr(language, "menu.close_all").to_string(),
            action: PaletteAction::CloseAll,
        });
        commands.push(PaletteCommand {
            title: tr(language, "menu.logout").to_string(),
            action: PaletteAction::Quit,
        });
        self.commands = commands;
        self.input.clear();
        self.selected = 0;
        self.visible = true;
    }

    pub fn close(&mut self) {
        self.visible = false;
    }

    fn filtered(&self) -> Vec<usize> {
        let needle = self.input.to_lowercase();
        self.commands
            .iter()
            .enumerate()
            .filter(|(_, cmd)| needle.is_empty() || cmd.title.to_lowercase().contains(&needle))
            .map(|(idx, _)| idx)
            .collect()
    }

    fn move_selection(&mut self, delta: isize) {
        let count = self.filtered().len();
        if count == 0 {
            return;
        }
        let count = count as isize;
        self.selected = (self.selected as isize + delta).rem_euclid(count) as usize;
    }

    fn run_selected(&mut self) -> PaletteOutcome {
        let filtered = self.filtered();
        let Some(&idx) = filtered.get(self.selected.min(filtered.len().saturating_sub(1)))
        else {
            return PaletteOutcome::Consumed;
        };
        let action = self.commands[idx].action.clone();
        self.close();
        PaletteOutcome::Run(action)
    }

    /// Modal event handling; every event is swallowed while the palette is
    /// open so nothing leaks through to the desktop underneath.
    pub fn handle(&mut self, event: &Event) -> PaletteOutcome {
        if !self.visible {
            return PaletteOutcome::Ignored;
        }
        match event {
            Event::Key(key) => match key.code {
                KeyCode::Esc => {
                    self.close();
                    PaletteOutcome::Closed
                }
                KeyCode::Up => {
                    self.move_selection(-1);
                    PaletteOutcome::Consumed
                }
                KeyCode::Down => {
                    self.move_selection(1);
                    PaletteOutcome::Consumed
                }
                KeyCode::Enter => self.run_selected(),
                KeyCode::Backspace => {
                    self.input.pop();
                    self.selected = 0;
                    PaletteOutcome::Consumed
                }
                KeyCode::Char(c)
                    if key.modifiers == KeyModifiers::NONE
                        || key.modifiers == KeyModifiers::SHIFT =>
                {
                    self.input.push(c);
                    self.selected = 0;
                    PaletteOutcome::Consumed
                }
                _ => PaletteOutcome::Consumed,
            },
            Event::Mouse(mouse) => match mouse.kind {
                MouseEventKind::Down(_) => {
                    let at = Position::new(mouse.column, mouse.row);
                    for (pos, rect) in &self.item_hits {
                        if rect.contains(at) {
                            self.selected = *pos;
                            return self.run_selected();
                        }
                    }
                    if !self.bounds.contains(at) {
                        self.close();
                        return PaletteOutcome::Closed;
                    }
                    PaletteOutcome::Consumed
                }
                MouseEventKind::ScrollUp => {
                    self.move_selection(-1);
                    PaletteOutcome::Consumed
                }
                MouseEventKind::ScrollDown => {
                    self.move_selection(1);
                    PaletteOutcome::Consumed
                }
                _ => PaletteOutcome::Consumed,
            },
            _ => PaletteOutcome::Consumed,
        }
    }

    pub fn render(
        &mut self,
        frame: &mut Surface<'_>,
        area: Rect,
        theme: Theme,
        language: Language,
    ) {
        self.item_hits.clear();
        self.bounds = Rect::default();
        if !self.visible || area.width < 10 || area.height < 6 {
            return;
        }
        let filtered = self.filtered();
        if self.selected >= filtered.len() {
            self.selected = filtered.len().saturating_sub(1);
        }

        let mut width = area.width.saturating_sub(6).min(56);
        if area.width >= 30 {
            width = width.max(24);
        }
        let list_rows = (filtered.len().max(1) as u16).min(area.height.saturating_sub(6));
        let height = list_rows + 4;
        let x = area.x + (area.width - width) / 2;
        let y = area.y + (area.height.saturating_sub(height)) / 3;
        let rect = Rect {
            x,
            y,
            width,
            height,
        };
        self.bounds = rect;

        dim_outside(frame.buffer_mut(), area, &[rect]);

        let base = Style::default().bg(theme.menu_bg()).fg(theme.menu_fg());
        let buffer = frame.buffer_mut();
        let bounds = rect.intersection(buffer.area);
        fill_region(buffer, bounds, base);

        let inner_x = rect.x + 2;
        let inner_width = rect.width.saturating_sub(4) as usize;
        let accent = Style::default().bg(theme.menu_bg()).fg(theme.accent());
        let dim = Style::default()
            .bg(theme.menu_bg())
            .fg(theme.panel_dim_fg());
        if self.input.is_empty() {
            let placeholder = format!("> {}", tr(language, "palette.placeholder"));
            put_str(
                buffer,
                bounds,
                inner_x,
                rect.y + 1,
                &clip_width(&placeholder, inner_width),
                dim,
            );
        } else {
            let query = format!("> {}▏", self.input);
            put_str(
                buffer,
                bounds,
                inner_x,
                rect.y + 1,
                &clip_width(&query, inner_width),
                accent,
            );
        }
        let separator = "─".repeat(rect.width.saturating_sub(2) as usize);
        put_str(
            buffer,
            bounds,
            rect.x + 1,
            rect.y + 2,
            &separator,
            Style::default().bg(theme.menu_bg()).fg(theme.window_border()),
        );

        if filtered.is_empty() {
            put_str(
                buffer,
                bounds,
                inner_x,
                rect.y + 3,
                &clip_width(tr(language, "palette.empty"), inner_width),
                dim,
            );
            return;
        }

        // Keep the selection on screen when the list is taller than the box.
        let view = list_rows as usize;
        let first = if self.selected >= view {
            self.selected + 1 - view
        } else {
            0
        };
        for (row, pos) in (first..filtered.len()).take(view).enumerate() {
            let command = &self.commands[filtered[pos]];
            let yy = rect.y + 3 + row as u16;
            let marker = if pos == self.selected { "> " } else { "  " };
            let line = clip_width(&format!("{marker}{}", command.title), inner_width);
            let style = if pos == self.selected {
                Style::default()
                    .bg(theme.menu_selected_bg())
                    .fg(theme.menu_selected_fg())
                    .add_modifier(Modifier::BOLD)
            } else {
                base
            };
            put_str(buffer, bounds, inner_x, yy, &line, style);
            self.item_hits.push((
                pos,
                Rect {
                    x: rect.x + 1,
                    y: yy,
                    width: rect.width.saturating_sub(2),
                    height: 1,
                },
            ));
        }
    }
}

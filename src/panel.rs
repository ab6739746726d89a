use crossterm::event::{Event, MouseEventKind};
use folio_wm::WindowState;
use ratatui::{
    layout::{Position, Rect},
    style::{Modifier, Style},
};

use crate::i18n::Language;
use crate::theme::Theme;
use crate::ui::{Surface, clip_width, dim_outside, fill_region, put_str};

/// One chip on the dock. `state` is `None` for a section with no open
/// window; clicking such a chip launches the section.
#[derive(Debug, Clone, Copy)]
pub struct DockChip<K> {
    pub key: K,
    pub state: Option<WindowState>,
    pub active: bool,
}

/// Everything on the bars a click can land on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Target<K> {
    MenuButton,
    MenuRow(usize),
    ThemeToggle,
    LanguageToggle,
    MouseToggle,
    Chip(K),
}

/// Desktop chrome: the one-row top bar and the one-row dock.
///
/// Clickable regions are collected into `hits` in paint order while
/// rendering, so hit testing is only valid against the most recently drawn
/// frame. `begin_frame` must run before the frame's render calls.
#[derive(Debug)]
pub struct Panel<K: Copy + Eq + Ord> {
    area: Rect,
    dock_area: Rect,
    hits: Vec<(Target<K>, Rect)>,
    menu_bounds: Option<Rect>,
    hostname: Option<String>,
}

impl<K: Copy + Eq + Ord> Panel<K> {
    pub fn new() -> Self {
        Self {
            area: Rect::default(),
            dock_area: Rect::default(),
            hits: Vec::new(),
            menu_bounds: None,
            hostname: None,
        }
    }

    pub fn begin_frame(&mut self) {
        self.hits.clear();
        self.menu_bounds = None;
    }

    /// Split `area` into the top bar, the dock row, and the desktop region
    /// between them. The desktop region is what the window manager sees as
    /// its viewport.
    pub fn split_area(&mut self, area: Rect) -> (Rect, Rect, Rect) {
        let top = Rect {
            height: area.height.min(1),
            ..area
        };
        let dock_height = area.height.saturating_sub(top.height).min(1);
        let dock = Rect {
            y: area.bottom().saturating_sub(dock_height),
            height: dock_height,
            ..area
        };
        let desktop = Rect {
            y: top.bottom(),
            height: area
                .height
                .saturating_sub(top.height)
                .saturating_sub(dock_height),
            ..area
        };
        self.area = top;
        self.dock_area = dock;
        (top, dock, desktop)
    }

    pub fn render_top(
        &mut self,
        frame: &mut Surface<'_>,
        title: &str,
        theme: Theme,
        language: Language,
        mouse_capture: bool,
        menu_open: bool,
    ) {
        let buffer = frame.buffer_mut();
        let bounds = self.area.intersection(buffer.area);
        if bounds.is_empty() {
            return;
        }
        let bar = Style::default().bg(theme.panel_bg()).fg(theme.panel_fg());
        fill_region(buffer, bounds, bar);

        let y = self.area.y;
        let max_x = self.area.right();
        let mut x = self.area.x;

        let badge = concat!("≡ ", env!("CARGO_PKG_NAME"));
        let badge_width = width_of(badge);
        if x.saturating_add(badge_width) <= max_x {
            let style = if menu_open {
                Style::default()
                    .bg(theme.menu_selected_bg())
                    .fg(theme.menu_selected_fg())
            } else {
                bar
            };
            put_str(buffer, bounds, x, y, badge, style);
            self.hits.push((
                Target::MenuButton,
                Rect {
                    x,
                    y,
                    width: badge_width,
                    height: 1,
                },
            ));
            x = x.saturating_add(badge_width).saturating_add(2);
        }

        // Right-aligned tray: clock first, then the theme, language, and
        // mouse toggles.
        let dim = Style::default()
            .bg(theme.panel_bg())
            .fg(theme.panel_dim_fg());
        let mouse_style = if mouse_capture {
            Style::default()
                .bg(theme.panel_bg())
                .fg(theme.success_fg())
                .add_modifier(Modifier::BOLD)
        } else {
            dim
        };
        let tray = [
            (
                chrono::Local::now().format("%a %b %-d  %H:%M").to_string(),
                bar,
                None,
            ),
            (
                format!("[ {} ]", theme.name()),
                bar,
                Some(Target::ThemeToggle),
            ),
            (
                format!("[ {} ]", language.tag()),
                bar,
                Some(Target::LanguageToggle),
            ),
            (
                "[ mouse ]".to_string(),
                mouse_style,
                Some(Target::MouseToggle),
            ),
        ];
        let tray_width = tray
            .iter()
            .map(|(text, ..)| width_of(text))
            .fold(tray.len() as u16 - 1, u16::saturating_add);
        if tray_width < max_x.saturating_sub(x) {
            let mut cursor = max_x.saturating_sub(tray_width);
            for (text, style, target) in &tray {
                put_str(buffer, bounds, cursor, y, text, *style);
                if let Some(target) = target {
                    self.hits.push((
                        *target,
                        Rect {
                            x: cursor,
                            y,
                            width: width_of(text),
                            height: 1,
                        },
                    ));
                }
                cursor = cursor.saturating_add(width_of(text)).saturating_add(1);
            }
            // The title gets whatever room remains between badge and tray.
            let title_end = max_x.saturating_sub(tray_width).saturating_sub(2);
            if title_end > x {
                let text = clip_width(title, title_end.saturating_sub(x) as usize);
                put_str(buffer, bounds, x, y, &text, bar);
            }
        } else if x < max_x {
            let text = clip_width(title, max_x.saturating_sub(x) as usize);
            put_str(buffer, bounds, x, y, &text, bar);
        }
    }

    /// Draw the dock: one chip per section, plus the host info right-aligned
    /// when chips leave room for it.
    pub fn render_dock<F>(
        &mut self,
        frame: &mut Surface<'_>,
        theme: Theme,
        chips: &[DockChip<K>],
        chip_label: F,
    ) where
        F: Fn(K) -> String,
    {
        let buffer = frame.buffer_mut();
        let bounds = self.dock_area.intersection(buffer.area);
        if bounds.is_empty() {
            return;
        }
        let bar = Style::default().bg(theme.panel_bg()).fg(theme.panel_fg());
        fill_region(buffer, bounds, bar);

        let y = self.dock_area.y;
        let max_x = self.dock_area.right();
        let mut x = self.dock_area.x;
        for chip in chips {
            let label = format!(" {} ", chip_label(chip.key));
            let label_width = width_of(&label);
            if x.saturating_add(label_width) > max_x {
                break;
            }
            let mut style = match (chip.active, chip.state) {
                (true, Some(_)) => Style::default()
                    .bg(theme.chip_active_bg())
                    .fg(theme.chip_active_fg())
                    .add_modifier(Modifier::BOLD),
                (_, Some(_)) => Style::default().bg(theme.chip_bg()).fg(theme.chip_fg()),
                (_, None) => Style::default()
                    .bg(theme.panel_bg())
                    .fg(theme.chip_closed_fg()),
            };
            if chip.state == Some(WindowState::Minimized) {
                style = style.add_modifier(Modifier::DIM);
            }
            put_str(buffer, bounds, x, y, &label, style);
            self.hits.push((
                Target::Chip(chip.key),
                Rect {
                    x,
                    y,
                    width: label_width,
                    height: 1,
                },
            ));
            x = x.saturating_add(label_width).saturating_add(1);
        }

        // Right side of the dock doubles as a status tray.
        let host = self.hostname.get_or_insert_with(|| {
            hostname::get()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_else(|_| String::from("unknown"))
        });
        let status = format!(
            "{} {} · {} · {host}",
            env!("CARGO_PKG_NAME"),
            env!("CARGO_PKG_VERSION"),
            std::env::consts::OS,
        );
        let status_width = width_of(&status);
        if status_width < max_x.saturating_sub(x) {
            let dim = Style::default()
                .bg(theme.panel_bg())
                .fg(theme.panel_dim_fg());
            put_str(
                buffer,
                bounds,
                max_x.saturating_sub(status_width),
                y,
                &status,
                dim,
            );
        }
    }

    pub fn render_menu(
        &mut self,
        frame: &mut Surface<'_>,
        open: bool,
        bounds: Rect,
        theme: Theme,
        items: &[(Option<&str>, &str)],
        selected: usize,
    ) {
        if !open || items.is_empty() {
            return;
        }
        let Some(anchor) = self.rect_of(Target::MenuButton) else {
            return;
        };
        let Some(menu) = drop_down_rect(anchor, bounds, items) else {
            return;
        };
        self.menu_bounds = Some(menu);

        let buffer = frame.buffer_mut();
        let bounds = bounds.intersection(buffer.area);
        let base = Style::default().bg(theme.menu_bg()).fg(theme.menu_fg());
        fill_region(buffer, menu.intersection(bounds), base);

        let highlight = Style::default()
            .bg(theme.menu_selected_bg())
            .fg(theme.menu_selected_fg())
            .add_modifier(Modifier::BOLD);
        let text_width = menu.width.saturating_sub(2).max(1) as usize;
        for (idx, (icon, label)) in items.iter().enumerate() {
            let y = menu.y.saturating_add(idx as u16).saturating_add(1);
            if y >= menu.bottom() || y >= bounds.bottom() {
                break;
            }
            let marker = if idx == selected { '>' } else { ' ' };
            let row = match icon {
                Some(icon) => format!("{marker} {icon} {label}"),
                None => format!("{marker}   {label}"),
            };
            let style = if idx == selected { highlight } else { base };
            put_str(
                buffer,
                bounds,
                menu.x.saturating_add(1),
                y,
                &clip_width(&row, text_width),
                style,
            );
            self.hits
                .push((Target::MenuRow(idx), Rect { y, height: 1, ..menu }));
        }
    }

    /// Dim everything outside the open menu and `exclude` (the top bar, so
    /// the menu button stays readable).
    pub fn render_menu_backdrop(
        &self,
        frame: &mut Surface<'_>,
        open: bool,
        bounds: Rect,
        exclude: Rect,
    ) {
        if !open {
            return;
        }
        let Some(menu) = self.menu_bounds else {
            return;
        };
        dim_outside(frame.buffer_mut(), bounds, &[menu, exclude]);
    }

    pub fn hit_test_menu(&self, event: &Event) -> bool {
        matches!(self.clicked(event), Some(Target::MenuButton))
    }

    pub fn hit_test_theme(&self, event: &Event) -> bool {
        matches!(self.clicked(event), Some(Target::ThemeToggle))
    }

    pub fn hit_test_language(&self, event: &Event) -> bool {
        matches!(self.clicked(event), Some(Target::LanguageToggle))
    }

    pub fn hit_test_mouse_indicator(&self, event: &Event) -> bool {
        matches!(self.clicked(event), Some(Target::MouseToggle))
    }

    pub fn hit_test_chip(&self, event: &Event) -> Option<K> {
        match self.clicked(event) {
            Some(Target::Chip(key)) => Some(key),
            _ => None,
        }
    }

    pub fn hit_test_menu_item(&self, event: &Event) -> Option<usize> {
        match self.clicked(event) {
            Some(Target::MenuRow(index)) => Some(index),
            _ => None,
        }
    }

    fn clicked(&self, event: &Event) -> Option<Target<K>> {
        let Event::Mouse(mouse) = event else {
            return None;
        };
        if !matches!(mouse.kind, MouseEventKind::Down(_)) {
            return None;
        }
        self.target_at(Position::new(mouse.column, mouse.row))
    }

    /// Latest-painted target wins, so menu rows shadow whatever they cover.
    fn target_at(&self, at: Position) -> Option<Target<K>> {
        self.hits
            .iter()
            .rev()
            .find(|(_, rect)| rect.contains(at))
            .map(|(target, _)| *target)
    }

    fn rect_of(&self, target: Target<K>) -> Option<Rect> {
        self.hits
            .iter()
            .find(|(candidate, _)| *candidate == target)
            .map(|(_, rect)| *rect)
    }
}

impl<K: Copy + Eq + Ord> Default for Panel<K> {
    fn default() -> Self {
        Self::new()
    }
}

/// Size the drop-down that hangs from `anchor`, clamped to `bounds`.
fn drop_down_rect(anchor: Rect, bounds: Rect, items: &[(Option<&str>, &str)]) -> Option<Rect> {
    let x = anchor.x;
    let y = anchor.bottom();
    if x < bounds.x || x >= bounds.right() {
        return None;
    }
    let label_cols = items
        .iter()
        .map(|(_, label)| width_of(label))
        .max()
        .unwrap_or(1);
    let icon_cols = items
        .iter()
        .filter_map(|(icon, _)| icon.map(width_of))
        .max()
        .unwrap_or(0);
    let width = label_cols
        .saturating_add(icon_cols)
        .saturating_add(6)
        .min(bounds.right().saturating_sub(x).max(1));
    let height = (items.len() as u16)
        .saturating_add(2)
        .min(bounds.bottom().saturating_sub(y).max(1));
    Some(Rect {
        x,
        y,
        width,
        height,
    })
}

fn width_of(text: &str) -> u16 {
    text.chars().count() as u16
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyModifiers, MouseButton, MouseEvent};
    use ratatui::buffer::Buffer;

    fn click(column: u16, row: u16) -> Event {
        Event::Mouse(MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column,
            row,
            modifiers: KeyModifiers::NONE,
        })
    }

    #[test]
    fn split_area_reserves_single_rows_top_and_bottom() {
        let mut p: Panel<u8> = Panel::new();
        let area = Rect {
            x: 0,
            y: 0,
            width: 40,
            height: 12,
        };
        let (top, dock, desktop) = p.split_area(area);
        assert_eq!(top, Rect::new(0, 0, 40, 1));
        assert_eq!(dock, Rect::new(0, 11, 40, 1));
        assert_eq!(desktop, Rect::new(0, 1, 40, 10));
    }

    #[test]
    fn hit_tests_are_empty_before_rendering() {
        let p: Panel<u8> = Panel::new();
        let ev = click(0, 0);
        assert!(!p.hit_test_menu(&ev));
        assert!(!p.hit_test_theme(&ev));
        assert!(!p.hit_test_language(&ev));
        assert!(!p.hit_test_mouse_indicator(&ev));
        assert!(p.hit_test_chip(&ev).is_none());
        assert!(p.hit_test_menu_item(&ev).is_none());
    }

    #[test]
    fn dock_chips_register_hit_rects() {
        let area = Rect {
            x: 0,
            y: 0,
            width: 60,
            height: 2,
        };
        let mut p: Panel<u8> = Panel::new();
        let _ = p.split_area(area);
        let mut buf = Buffer::empty(area);
        let mut ui = Surface::over(area, &mut buf);
        p.begin_frame();
        let chips = [
            DockChip {
                key: 1u8,
                state: Some(WindowState::Normal),
                active: true,
            },
            DockChip {
                key: 2u8,
                state: None,
                active: false,
            },
        ];
        p.render_dock(&mut ui, Theme::Dark, &chips, |k| format!("chip{k}"));
        // First chip " chip1 " starts at x=0 and is 7 wide.
        assert_eq!(p.hit_test_chip(&click(3, 1)), Some(1));
        // Second chip starts after a one-column gap.
        assert_eq!(p.hit_test_chip(&click(9, 1)), Some(2));
        assert_eq!(p.hit_test_chip(&click(3, 0)), None);
        // Closed chips take the muted launcher color.
        let cell = buf.cell((9, 1)).unwrap();
        assert_eq!(cell.style().fg, Some(Theme::Dark.chip_closed_fg()));
    }

    #[test]
    fn top_bar_registers_menu_and_indicator_rects() {
        let area = Rect {
            x: 0,
            y: 0,
            width: 100,
            height: 2,
        };
        let mut p: Panel<u8> = Panel::new();
        let _ = p.split_area(area);
        let mut buf = Buffer::empty(area);
        let mut ui = Surface::over(area, &mut buf);
        p.begin_frame();
        p.render_top(
            &mut ui,
            "Aditya Choudhry",
            Theme::Dark,
            Language::En,
            true,
            false,
        );
        assert!(p.hit_test_menu(&click(0, 0)));
        assert!(p.rect_of(Target::ThemeToggle).is_some());
        assert!(p.rect_of(Target::LanguageToggle).is_some());
        let mouse_rect = p.rect_of(Target::MouseToggle).unwrap();
        assert!(p.hit_test_mouse_indicator(&click(mouse_rect.x, 0)));
    }

    #[test]
    fn menu_renders_items_with_hit_rects() {
        let area = Rect {
            x: 0,
            y: 0,
            width: 40,
            height: 12,
        };
        let mut p: Panel<u8> = Panel::new();
        let _ = p.split_area(area);
        let mut buf = Buffer::empty(area);
        let mut ui = Surface::over(area, &mut buf);
        p.begin_frame();
        p.render_top(&mut ui, "", Theme::Dark, Language::En, false, true);
        p.render_menu(
            &mut ui,
            true,
            area,
            Theme::Dark,
            &[(Some("⌂"), "Home"), (None, "Quit")],
            0,
        );
        // Items start one row below the anchor, inside the frame.
        assert_eq!(p.hit_test_menu_item(&click(2, 2)), Some(0));
        assert_eq!(p.hit_test_menu_item(&click(2, 3)), Some(1));
        let body = p.menu_bounds.unwrap();
        assert!(body.contains(Position::new(1, 2)));
        assert!(!body.contains(Position::new(39, 11)));
    }

    #[test]
    fn dock_keeps_hostname_cached_between_frames() {
        let area = Rect {
            x: 0,
            y: 0,
            width: 80,
            height: 2,
        };
        let mut p: Panel<u8> = Panel::new();
        let _ = p.split_area(area);
        let mut buf = Buffer::empty(area);
        let mut ui = Surface::over(area, &mut buf);
        p.begin_frame();
        p.render_dock(&mut ui, Theme::Dark, &[], |_| String::new());
        assert!(p.hostname.is_some());
        let first = p.hostname.clone();
        p.begin_frame();
        p.render_dock(&mut ui, Theme::Dark, &[], |_| String::new());
        assert_eq!(p.hostname, first);
    }
}

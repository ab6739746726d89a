use crossterm::event::{Event, MouseEventKind};
use ratatui::layout::{Position, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::Text;
use ratatui::widgets::{Paragraph, Wrap};

use crate::keybindings::{Action, KeyBindings};
use crate::theme::Theme;
use crate::ui::{Surface, clip_width, dim_outside, fill_region, put_str};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfirmChoice {
    Accept,
    Cancel,
}

/// Modal yes/no dialog. Used by Log Out before closing every window.
#[derive(Debug, Default)]
pub struct ConfirmOverlay {
    visible: bool,
    title: String,
    body: String,
    accept_label: String,
    cancel_label: String,
    selected_accept: bool,
    accept_rect: Option<Rect>,
    cancel_rect: Option<Rect>,
}

impl ConfirmOverlay {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn open(&mut self, title: &str, body: &str, accept: &str, cancel: &str) {
        self.title = title.to_string();
        self.body = body.to_string();
        self.accept_label = format!("[ {accept} ]");
        self.cancel_label = format!("[ {cancel} ]");
        self.selected_accept = true;
        self.accept_rect = None;
        self.cancel_rect = None;
        self.visible = true;
    }

    pub fn close(&mut self) {
        self.visible = false;
    }

    pub fn visible(&self) -> bool {
        self.visible
    }

    /// Resolve the event into a choice, or `None` while the dialog stays
    /// open. The caller treats every event as consumed regardless.
    pub fn handle(&mut self, event: &Event) -> Option<ConfirmChoice> {
        match event {
            Event::Mouse(mouse) if matches!(mouse.kind, MouseEventKind::Down(_)) => {
                let at = Position::new(mouse.column, mouse.row);
                if self.accept_rect.is_some_and(|rect| rect.contains(at)) {
                    self.close();
                    return Some(ConfirmChoice::Accept);
                }
                if self.cancel_rect.is_some_and(|rect| rect.contains(at)) {
                    self.close();
                    return Some(ConfirmChoice::Cancel);
                }
                None
            }
            Event::Key(key) => {
                let kb = KeyBindings::default();
                if kb.matches(Action::ConfirmToggle, key) {
                    self.selected_accept = !self.selected_accept;
                    None
                } else if kb.matches(Action::ConfirmLeft, key) {
                    self.selected_accept = false;
                    None
                } else if kb.matches(Action::ConfirmRight, key) {
                    self.selected_accept = true;
                    None
                } else if kb.matches(Action::ConfirmAccept, key) {
                    self.close();
                    Some(if self.selected_accept {
                        ConfirmChoice::Accept
                    } else {
                        ConfirmChoice::Cancel
                    })
                } else if kb.matches(Action::ConfirmCancel, key) {
                    self.close();
                    Some(ConfirmChoice::Cancel)
                } else {
                    None
                }
            }
            _ => None,
        }
    }

    pub fn render(&mut self, frame: &mut Surface<'_>, area: Rect, theme: Theme) {
        self.accept_rect = None;
        self.cancel_rect = None;
        if !self.visible || area.width < 12 || area.height < 7 {
            return;
        }

        let width = area.width.saturating_sub(6).min(48);
        let inner_width = width.saturating_sub(4) as usize;
        let body_rows = (self.body.chars().count().div_ceil(inner_width.max(1)) as u16).max(1);
        let height = (body_rows + 6).min(area.height);
        let rect = Rect {
            x: area.x + (area.width - width) / 2,
            y: area.y + (area.height - height) / 2,
            width,
            height,
        };

        dim_outside(frame.buffer_mut(), area, &[rect]);

        let base = Style::default().bg(theme.dialog_bg()).fg(theme.dialog_fg());
        {
            let buffer = frame.buffer_mut();
            let bounds = rect.intersection(buffer.area);
            fill_region(buffer, bounds, base);
            let title_style = Style::default()
                .bg(theme.dialog_bg())
                .fg(theme.accent())
                .add_modifier(Modifier::BOLD);
            put_str(
                buffer,
                bounds,
                rect.x + 2,
                rect.y + 1,
                &clip_width(&self.title, inner_width),
                title_style,
            );
        }

        let body_rect = Rect {
            x: rect.x + 2,
            y: rect.y + 3,
            width: inner_width as u16,
            height: body_rows,
        };
        frame.render_widget(
            Paragraph::new(Text::raw(self.body.clone()))
                .style(base)
                .wrap(Wrap { trim: true }),
            body_rect,
        );

        let buffer = frame.buffer_mut();
        let bounds = rect.intersection(buffer.area);
        let separator_y = rect.y + height.saturating_sub(3);
        let separator_style = Style::default()
            .bg(theme.dialog_bg())
            .fg(theme.dialog_separator());
        let separator = "─".repeat(rect.width.saturating_sub(2) as usize);
        put_str(
            buffer,
            bounds,
            rect.x + 1,
            separator_y,
            &separator,
            separator_style,
        );

        let button_y = rect.y + height.saturating_sub(2);
        let selected = Style::default()
            .bg(theme.chip_active_bg())
            .fg(theme.chip_active_fg())
            .add_modifier(Modifier::BOLD);
        let unselected = base;
        let (cancel_style, accept_style) = if self.selected_accept {
            (unselected, selected)
        } else {
            (selected, unselected)
        };
        let total = self.cancel_label.chars().count() + 1 + self.accept_label.chars().count();
        let start_x = rect
            .x
            .saturating_add(rect.width.saturating_sub(total as u16 + 2));
        put_str(
            buffer,
            bounds,
            start_x,
            button_y,
            &self.cancel_label,
            cancel_style,
        );
        let accept_x = start_x + self.cancel_label.chars().count() as u16 + 1;
        put_str(
            buffer,
            bounds,
            accept_x,
            button_y,
            &self.accept_label,
            accept_style,
        );
        self.cancel_rect = Some(Rect {
            x: start_x,
            y: button_y,
            width: self.cancel_label.chars().count() as u16,
            height: 1,
        });
        self.accept_rect = Some(Rect {
            x: accept_x,
            y: button_y,
            width: self.accept_label.chars().count() as u16,
            height: 1,
        });
    }
}

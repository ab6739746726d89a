use crossterm::event::{Event, KeyCode, MouseEventKind};
use ratatui::layout::{Position, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Text};
use ratatui::widgets::{Paragraph, Scrollbar, ScrollbarOrientation, ScrollbarState};

use crate::i18n::{Language, tr};
use crate::keybindings::{Action, KeyBindings};
use crate::logbuf;
use crate::theme::Theme;
use crate::ui::{Surface, dim_outside, fill_region, put_str};

/// The activity log overlay. Shows the in-memory tracing buffer and
/// follows the tail until the user scrolls away from it; scrolling back
/// to the bottom re-engages following.
#[derive(Debug)]
pub struct LogOverlay {
    visible: bool,
    offset: usize,
    follow: bool,
    total: usize,
    view: usize,
    body: Rect,
}

impl Default for LogOverlay {
    fn default() -> Self {
        Self {
            visible: false,
            offset: 0,
            follow: true,
            total: 0,
            view: 0,
            body: Rect::default(),
        }
    }
}

impl LogOverlay {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn open(&mut self) {
        self.visible = true;
        self.follow = true;
    }

    pub fn close(&mut self) {
        self.visible = false;
    }

    pub fn visible(&self) -> bool {
        self.visible
    }

    fn max_offset(&self) -> usize {
        self.total.saturating_sub(self.view)
    }

    fn at_bottom(&self) -> bool {
        self.view == 0 || self.offset >= self.max_offset()
    }

    fn scroll_by(&mut self, delta: isize) {
        let next = self.offset.saturating_add_signed(delta);
        self.offset = next.min(self.max_offset());
    }

    /// Returns true while the overlay stays open; false means it closed.
    pub fn handle(&mut self, event: &Event) -> bool {
        match event {
            Event::Key(key) => {
                if matches!(key.code, KeyCode::Esc | KeyCode::Char('q')) {
                    self.close();
                    return false;
                }
                let kb = KeyBindings::default();
                if kb.matches(Action::ScrollUp, key) {
                    self.scroll_by(-1);
                } else if kb.matches(Action::ScrollDown, key) {
                    self.scroll_by(1);
                } else if kb.matches(Action::ScrollPageUp, key) {
                    self.scroll_by(-(self.view.max(1) as isize));
                } else if kb.matches(Action::ScrollPageDown, key) {
                    self.scroll_by(self.view.max(1) as isize);
                } else if kb.matches(Action::ScrollHome, key) {
                    self.offset = 0;
                } else if kb.matches(Action::ScrollEnd, key) {
                    self.offset = self.max_offset();
                }
                self.follow = self.at_bottom();
            }
            Event::Mouse(mouse) if self.body.contains(Position::new(mouse.column, mouse.row)) => {
                match mouse.kind {
                    MouseEventKind::ScrollUp => self.scroll_by(-3),
                    MouseEventKind::ScrollDown => self.scroll_by(3),
                    _ => {}
                }
                self.follow = self.at_bottom();
            }
            _ => {}
        }
        true
    }

    pub fn render(
        &mut self,
        frame: &mut Surface<'_>,
        area: Rect,
        theme: Theme,
        language: Language,
    ) {
        if !self.visible || area.width < 20 || area.height < 8 {
            return;
        }
        let lines: Vec<String> = logbuf::global_log()
            .map(|handle| handle.snapshot())
            .unwrap_or_default();

        let width = area.width.saturating_sub(6);
        let height = area.height.saturating_sub(4);
        let rect = Rect {
            x: area.x + (area.width - width) / 2,
            y: area.y + (area.height - height) / 2,
            width,
            height,
        };

        dim_outside(frame.buffer_mut(), area, &[rect]);

        let base = Style::default().bg(theme.window_bg()).fg(theme.window_fg());
        {
            let buffer = frame.buffer_mut();
            let bounds = rect.intersection(buffer.area);
            fill_region(buffer, bounds, base);
            put_str(
                buffer,
                bounds,
                rect.x + 2,
                rect.y + 1,
                tr(language, "log.title"),
                Style::default()
                    .bg(theme.window_bg())
                    .fg(theme.accent())
                    .add_modifier(Modifier::BOLD),
            );
            let count = format!("{} lines", lines.len());
            let count_width = count.chars().count() as u16;
            if count_width + 4 < rect.width {
                put_str(
                    buffer,
                    bounds,
                    rect.x + rect.width - 2 - count_width,
                    rect.y + 1,
                    &count,
                    Style::default()
                        .bg(theme.window_bg())
                        .fg(theme.window_dim_fg()),
                );
            }
        }

        self.body = Rect {
            x: rect.x + 2,
            y: rect.y + 3,
            width: rect.width.saturating_sub(4),
            height: rect.height.saturating_sub(4),
        };
        self.total = lines.len();
        self.view = self.body.height as usize;
        if self.follow {
            self.offset = self.max_offset();
        } else {
            self.offset = self.offset.min(self.max_offset());
        }

        if lines.is_empty() {
            let empty = Paragraph::new(Line::styled(
                tr(language, "log.empty"),
                Style::default().fg(theme.window_dim_fg()),
            ));
            frame.render_widget(empty, self.body);
            return;
        }

        let styled: Vec<Line<'static>> = lines
            .into_iter()
            .map(|line| {
                let style = line_style(theme, &line);
                Line::styled(line, style)
            })
            .collect();
        // Log lines clip at the right edge rather than wrapping, so the
        // line count maps one-to-one onto scroll positions.
        let mut content = self.body;
        if self.total > self.view && content.width > 1 {
            content.width -= 1;
        }
        let scroll_y = self.offset.min(u16::MAX as usize) as u16;
        let paragraph = Paragraph::new(Text::from(styled)).scroll((scroll_y, 0));
        frame.render_widget(paragraph, content);

        if self.total > self.view {
            let content_len = self.max_offset().saturating_add(1);
            let mut state = ScrollbarState::new(content_len)
                .position(self.offset.min(content_len.saturating_sub(1)))
                .viewport_content_length(self.view.max(1));
            frame.render_stateful_widget(
                Scrollbar::new(ScrollbarOrientation::VerticalRight),
                self.body,
                &mut state,
            );
        }
    }
}

fn line_style(theme: Theme, line: &str) -> Style {
    if line.contains(" ERROR ") {
        Style::default().fg(theme.error_fg())
    } else if line.contains(" WARN ") {
        Style::default().fg(theme.accent_soft())
    } else {
        Style::default().fg(theme.window_dim_fg())
    }
}

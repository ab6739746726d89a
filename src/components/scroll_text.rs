use crossterm::event::{Event, KeyEvent, MouseEvent, MouseEventKind};
use ratatui::layout::{Position, Rect};
use ratatui::text::Text;
use ratatui::widgets::{Paragraph, Scrollbar, ScrollbarOrientation, ScrollbarState, Wrap};

use crate::keybindings::{Action, KeyBindings};
use crate::ui::Surface;

/// Scrollable wrapped text, shared by the text-heavy windows and the
/// overlays. Content is set as styled lines; wrapping and the scrollbar
/// are recomputed from the render area every frame.
#[derive(Debug, Default)]
pub struct ScrollText {
    text: Text<'static>,
    offset: usize,
    total: usize,
    view: usize,
    area: Rect,
}

impl ScrollText {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_text(&mut self, text: Text<'static>) {
        self.text = text;
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn view(&self) -> usize {
        self.view
    }

    pub fn total(&self) -> usize {
        self.total
    }

    pub fn scroll_to_start(&mut self) {
        self.offset = 0;
    }

    pub fn scroll_to_end(&mut self) {
        self.offset = self.max_offset();
    }

    pub fn at_end(&self) -> bool {
        self.offset >= self.max_offset()
    }

    pub fn scroll_by(&mut self, delta: isize) {
        let next = self.offset.saturating_add_signed(delta);
        self.offset = next.min(self.max_offset());
    }

    fn max_offset(&self) -> usize {
        self.total.saturating_sub(self.view)
    }

    pub fn render(&mut self, frame: &mut Surface<'_>, area: Rect) {
        if area.width == 0 || area.height == 0 {
            return;
        }
        self.area = area;
        self.view = area.height as usize;

        self.total = display_line_count(&self.text, area.width);
        let content_width = if self.total > self.view && area.width > 1 {
            // Reserve the last column for the scrollbar and re-wrap.
            let narrowed = area.width - 1;
            self.total = display_line_count(&self.text, narrowed);
            narrowed
        } else {
            area.width
        };
        self.offset = self.offset.min(self.max_offset());

        let paragraph = Paragraph::new(self.text.clone())
            .wrap(Wrap { trim: false })
            .scroll((self.offset as u16, 0));
        frame.render_widget(
            paragraph,
            Rect {
                x: area.x,
                y: area.y,
                width: content_width,
                height: area.height,
            },
        );

        if self.total > self.view {
            let content_len = self.max_offset().saturating_add(1);
            let mut state = ScrollbarState::new(content_len)
                .position(self.offset.min(content_len.saturating_sub(1)))
                .viewport_content_length(self.view.max(1));
            frame.render_stateful_widget(
                Scrollbar::new(ScrollbarOrientation::VerticalRight),
                area,
                &mut state,
            );
        }
    }

    pub fn handle_key(&mut self, key: &KeyEvent) -> bool {
        if self.total <= self.view {
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
            self.scroll_to_start();
        } else if kb.matches(Action::ScrollEnd, key) {
            self.scroll_to_end();
        } else {
            return false;
        }
        true
    }

    pub fn handle_mouse(&mut self, mouse: &MouseEvent) -> bool {
        if self.total <= self.view {
            return false;
        }
        if !self.area.contains(Position::new(mouse.column, mouse.row)) {
            return false;
        }
        match mouse.kind {
            MouseEventKind::ScrollUp => {
                self.scroll_by(-3);
                true
            }
            MouseEventKind::ScrollDown => {
                self.scroll_by(3);
                true
            }
            _ => false,
        }
    }

    pub fn handle_event(&mut self, event: &Event) -> bool {
        match event {
            Event::Key(key) => self.handle_key(key),
            Event::Mouse(mouse) => self.handle_mouse(mouse),
            _ => false,
        }
    }
}

fn display_line_count(text: &Text<'_>, width: u16) -> usize {
    let columns = width.max(1) as usize;
    text.lines
        .iter()
        .map(|line| match line.width() {
            0 => 1,
            w => w.div_ceil(columns),
        })
        .sum::<usize>()
        .max(1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyModifiers};
    use ratatui::buffer::Buffer;
    use ratatui::text::Line;

    fn long_text(lines: usize) -> Text<'static> {
        Text::from(
            (0..lines)
                .map(|i| Line::from(format!("line {i}")))
                .collect::<Vec<_>>(),
        )
    }

    fn rendered(st: &mut ScrollText, area: Rect) -> Buffer {
        let mut buf = Buffer::empty(area);
        let mut frame = Surface::over(area, &mut buf);
        st.render(&mut frame, area);
        buf
    }

    #[test]
    fn wrapping_counts_display_lines() {
        let text = Text::from(vec![
            Line::from("abcdefghij"),
            Line::from(""),
            Line::from("abc"),
        ]);
        assert_eq!(display_line_count(&text, 5), 4);
        assert_eq!(display_line_count(&text, 10), 3);
    }

    #[test]
    fn keys_scroll_and_clamp() {
        let mut st = ScrollText::new();
        st.set_text(long_text(40));
        let area = Rect::new(0, 0, 20, 10);
        let _ = rendered(&mut st, area);
        assert_eq!(st.offset(), 0);

        let down = KeyEvent::new(KeyCode::Down, KeyModifiers::NONE);
        assert!(st.handle_key(&down));
        assert_eq!(st.offset(), 1);

        let end = KeyEvent::new(KeyCode::End, KeyModifiers::NONE);
        assert!(st.handle_key(&end));
        assert_eq!(st.offset(), 30);
        assert!(st.at_end());

        let next = KeyEvent::new(KeyCode::PageDown, KeyModifiers::NONE);
        assert!(st.handle_key(&next));
        assert_eq!(st.offset(), 30);
    }

    #[test]
    fn short_content_ignores_scroll_keys() {
        let mut st = ScrollText::new();
        st.set_text(long_text(3));
        let area = Rect::new(0, 0, 20, 10);
        let _ = rendered(&mut st, area);
        let down = KeyEvent::new(KeyCode::Down, KeyModifiers::NONE);
        assert!(!st.handle_key(&down));
        assert_eq!(st.offset(), 0);
    }

    #[test]
    fn wheel_scrolls_only_inside_the_area() {
        let mut st = ScrollText::new();
        st.set_text(long_text(40));
        let area = Rect::new(5, 5, 20, 10);
        let _ = rendered(&mut st, area);
        let inside = MouseEvent {
            kind: MouseEventKind::ScrollDown,
            column: 10,
            row: 8,
            modifiers: KeyModifiers::NONE,
        };
        assert!(st.handle_mouse(&inside));
        assert_eq!(st.offset(), 3);
        let outside = MouseEvent {
            kind: MouseEventKind::ScrollDown,
            column: 0,
            row: 0,
            modifiers: KeyModifiers::NONE,
        };
        assert!(!st.handle_mouse(&outside));
        assert_eq!(st.offset(), 3);
    }

    #[test]
    fn scrollbar_occupies_the_last_column_when_needed() {
        let mut st = ScrollText::new();
        st.set_text(long_text(40));
        let area = Rect::new(0, 0, 20, 10);
        let buf = rendered(&mut st, area);
        let mut scrollbar_glyphs = 0;
        for y in 0..area.height {
            if let Some(cell) = buf.cell((19, y))
                && cell.symbol() != " "
            {
                scrollbar_glyphs += 1;
            }
        }
        assert!(scrollbar_glyphs > 0);
    }
}

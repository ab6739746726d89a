use crossterm::event::{Event, KeyCode, KeyEvent, KeyModifiers, MouseEventKind};
use percent_encoding::{NON_ALPHANUMERIC, utf8_percent_encode};
use ratatui::layout::{Position, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::clipboard;
use crate::components::{Component, ViewContext};
use crate::i18n::tr;
use crate::links;
use crate::profile::Profile;
use crate::ui::{Surface, clip_width, put_str};

const FIELD_COUNT: usize = 4;
const SEND_FOCUS: usize = FIELD_COUNT;
const LABEL_WIDTH: usize = 14;

const FIELD_KEYS: [&str; FIELD_COUNT] = [
    "contact.name",
    "contact.email",
    "contact.subject",
    "contact.message",
];

/// The contact window: address card plus a mail form.
///
/// While this window is focused it owns the keyboard almost completely so
/// typed letters land in the form instead of triggering shortcuts. Escape
/// is the one key deliberately left unhandled.
#[derive(Debug)]
pub struct ContactWindow {
    email: String,
    github: Option<String>,
    linkedin: Option<String>,
    fields: [String; FIELD_COUNT],
    focus: usize,
    status: Option<(String, bool)>,
    field_rects: [Rect; FIELD_COUNT],
    send_rect: Rect,
}

impl ContactWindow {
    pub fn new(profile: &Profile) -> Self {
        Self {
            email: profile.personal.email.clone(),
            github: profile.personal.github.clone(),
            linkedin: profile.personal.linkedin.clone(),
            fields: Default::default(),
            focus: 0,
            status: None,
            field_rects: [Rect::default(); FIELD_COUNT],
            send_rect: Rect::default(),
        }
    }

    fn move_focus(&mut self, delta: isize) {
        let stops = (SEND_FOCUS + 1) as isize;
        let next = (self.focus as isize + delta).rem_euclid(stops);
        self.focus = next as usize;
    }

    fn submit(&mut self, ctx: &ViewContext) {
        let [name, from_email, _, message] = &self.fields;
        if name.trim().is_empty() || from_email.trim().is_empty() || message.trim().is_empty() {
            self.status = Some((tr(ctx.language(), "contact.missing").to_string(), false));
            return;
        }
        let url = build_mailto(
            &self.email,
            name,
            from_email,
            &self.fields[2],
            message,
        );
        match links::open_url(&url) {
            Ok(()) => self.status = Some((tr(ctx.language(), "contact.sent").to_string(), true)),
            Err(err) => {
                tracing::warn!(%err, "mail draft failed to open");
                self.status =
                    Some((tr(ctx.language(), "contact.send_failed").to_string(), false));
            }
        }
    }

    fn copy_email(&mut self, ctx: &ViewContext) {
        match clipboard::copy(&self.email) {
            Ok(()) => self.status = Some((tr(ctx.language(), "contact.copied").to_string(), true)),
            Err(err) => {
                tracing::warn!(%err, "clipboard copy failed");
                self.status =
                    Some((tr(ctx.language(), "contact.copy_failed").to_string(), false));
            }
        }
    }

    fn handle_key(&mut self, key: &KeyEvent, ctx: &ViewContext) -> bool {
        if key.modifiers == KeyModifiers::CONTROL {
            if key.code == KeyCode::Char('y') {
                self.copy_email(ctx);
                return true;
            }
            return false;
        }
        match key.code {
            KeyCode::Tab | KeyCode::Down => {
                self.move_focus(1);
                true
            }
            KeyCode::BackTab | KeyCode::Up => {
                self.move_focus(-1);
                true
            }
            KeyCode::Enter => {
                if self.focus == SEND_FOCUS {
                    self.submit(ctx);
                } else {
                    self.move_focus(1);
                }
                true
            }
            KeyCode::Backspace => {
                if self.focus < FIELD_COUNT {
                    self.fields[self.focus].pop();
                }
                true
            }
            KeyCode::Char(c)
                if key.modifiers == KeyModifiers::NONE
                    || key.modifiers == KeyModifiers::SHIFT =>
            {
                if self.focus < FIELD_COUNT {
                    self.fields[self.focus].push(c);
                    return true;
                }
                false
            }
            _ => false,
        }
    }
}

impl Component for ContactWindow {
    fn render(&mut self, frame: &mut Surface<'_>, area: Rect, ctx: &ViewContext) {
        if area.width < 8 || area.height == 0 {
            return;
        }
        let theme = ctx.theme();
        let lang = ctx.language();
        let heading = Style::default()
            .fg(theme.accent())
            .add_modifier(Modifier::BOLD);
        let dim = Style::default().fg(theme.window_dim_fg());
        let label_style = Style::default().fg(theme.window_fg());
        let link = links::link_style(Style::default(), theme);

        self.field_rects = [Rect::default(); FIELD_COUNT];
        self.send_rect = Rect::default();

        let mut head: Vec<Line> = Vec::new();
        head.push(Line::styled(tr(lang, "contact.title"), heading));
        head.push(Line::styled(
            clip_width(tr(lang, "contact.description"), area.width as usize),
            dim,
        ));
        head.push(Line::from(""));
        head.push(Line::from(vec![
            Span::styled("✉ ", Style::default().fg(theme.accent())),
            Span::styled(self.email.clone(), link),
            Span::styled("   Ctrl+Y", dim),
        ]));
        if let Some(github) = &self.github {
            head.push(Line::from(vec![
                Span::styled("⌁ ", Style::default().fg(theme.accent())),
                Span::styled(github.clone(), link),
            ]));
        }
        if let Some(linkedin) = &self.linkedin {
            head.push(Line::from(vec![
                Span::styled("⌁ ", Style::default().fg(theme.accent())),
                Span::styled(linkedin.clone(), link),
            ]));
        }
        head.push(Line::from(""));
        let head_rows = head.len() as u16;
        frame.render_widget(
            Paragraph::new(head),
            Rect {
                x: area.x,
                y: area.y,
                width: area.width,
                height: head_rows.min(area.height),
            },
        );

        let buffer = frame.buffer_mut();
        let bounds = area.intersection(buffer.area);
        let input_width = (area.width as usize).saturating_sub(LABEL_WIDTH + 1);
        let mut y = area.y + head_rows;
        let max_y = area.y + area.height;
        for (idx, value) in self.fields.iter().enumerate() {
            if y >= max_y {
                break;
            }
            let focused_field = ctx.focused() && self.focus == idx;
            let mut label = tr(lang, FIELD_KEYS[idx]).to_string();
            label = clip_width(&label, LABEL_WIDTH);
            while label.chars().count() < LABEL_WIDTH {
                label.push(' ');
            }
            put_str(buffer, bounds, area.x, y, &label, label_style);

            let input_bg = if focused_field {
                theme.input_focus_bg()
            } else {
                theme.input_bg()
            };
            let input_style = Style::default().bg(input_bg).fg(theme.input_fg());
            // Keep the tail visible while typing past the field width.
            let mut shown: String = value
                .chars()
                .rev()
                .take(input_width.saturating_sub(1))
                .collect::<Vec<_>>()
                .into_iter()
                .rev()
                .collect();
            if focused_field {
                shown.push('▏');
            }
            while shown.chars().count() < input_width {
                shown.push(' ');
            }
            let input_x = area.x + LABEL_WIDTH as u16 + 1;
            put_str(buffer, bounds, input_x, y, &shown, input_style);
            self.field_rects[idx] = Rect {
                x: input_x,
                y,
                width: input_width as u16,
                height: 1,
            };
            y += 2;
        }

        if y < max_y {
            let send = format!("[ {} ]", tr(lang, "contact.send"));
            let send_style = if ctx.focused() && self.focus == SEND_FOCUS {
                Style::default()
                    .bg(theme.chip_active_bg())
                    .fg(theme.chip_active_fg())
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().bg(theme.input_bg()).fg(theme.window_fg())
            };
            put_str(buffer, bounds, area.x, y, &send, send_style);
            self.send_rect = Rect {
                x: area.x,
                y,
                width: send.chars().count() as u16,
                height: 1,
            };
            y += 2;
        }

        if let Some((message, ok)) = &self.status
            && y < max_y
        {
            let style = if *ok {
                Style::default().fg(theme.success_fg())
            } else {
                Style::default().fg(theme.error_fg())
            };
            let text = clip_width(message, area.width as usize);
            put_str(buffer, bounds, area.x, y, &text, style);
        }
    }

    fn handle_event(&mut self, event: &Event, ctx: &ViewContext) -> bool {
        match event {
            Event::Key(key) => self.handle_key(key, ctx),
            Event::Mouse(mouse) if matches!(mouse.kind, MouseEventKind::Down(_)) => {
                let at = Position::new(mouse.column, mouse.row);
                for (idx, rect) in self.field_rects.iter().enumerate() {
                    if rect.contains(at) {
                        self.focus = idx;
                        return true;
                    }
                }
                if self.send_rect.contains(at) {
                    self.focus = SEND_FOCUS;
                    self.submit(ctx);
                    return true;
                }
                false
            }
            _ => false,
        }
    }
}

/// Builds the `mailto:` URL the way the site's contact form did: a default
/// subject naming the sender, and the sender's address repeated in the body
/// so replies work even when the mail client drops the form data.
pub fn build_mailto(
    to: &str,
    name: &str,
    from_email: &str,
    subject: &str,
    message: &str,
) -> String {
    let subject = if subject.trim().is_empty() {
        format!("Contact from {name}")
    } else {
        subject.to_string()
    };
    let body = format!("{message}\n\nFrom: {name} ({from_email})");
    format!(
        "mailto:{to}?subject={}&body={}",
        utf8_percent_encode(&subject, NON_ALPHANUMERIC),
        utf8_percent_encode(&body, NON_ALPHANUMERIC)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::buffer::Buffer;

    fn window() -> ContactWindow {
        ContactWindow::new(&Profile::load(None).unwrap())
    }

    fn key(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    #[test]
    fn mailto_percent_encodes_subject_and_body() {
        let url = build_mailto("a@b.dev", "Jo Doe", "jo@ex.com", "", "Hi there");
        assert!(url.starts_with("mailto:a@b.dev?subject="));
        assert!(url.contains("Contact%20from%20Jo%20Doe"));
        assert!(url.contains("Hi%20there%0A%0AFrom%3A%20Jo%20Doe%20%28jo%40ex%2Ecom%29"));
    }

    #[test]
    fn explicit_subject_wins_over_the_default() {
        let url = build_mailto("a@b.dev", "Jo", "jo@ex.com", "Question", "Hello");
        assert!(url.contains("subject=Question&"));
    }

    #[test]
    fn typing_fills_the_focused_field_and_tab_cycles() {
        let mut w = window();
        let ctx = ViewContext::default().with_focus(true);
        assert!(w.handle_event(&key(KeyCode::Char('J')), &ctx));
        assert!(w.handle_event(&key(KeyCode::Char('o')), &ctx));
        assert_eq!(w.fields[0], "Jo");
        assert!(w.handle_event(&key(KeyCode::Tab), &ctx));
        assert!(w.handle_event(&key(KeyCode::Char('x')), &ctx));
        assert_eq!(w.fields[1], "x");
        assert!(w.handle_event(&key(KeyCode::Backspace), &ctx));
        assert_eq!(w.fields[1], "");
    }

    #[test]
    fn focus_wraps_around_the_send_button() {
        let mut w = window();
        let ctx = ViewContext::default().with_focus(true);
        for _ in 0..FIELD_COUNT + 1 {
            w.handle_event(&key(KeyCode::Tab), &ctx);
        }
        assert_eq!(w.focus, 0);
        w.handle_event(&key(KeyCode::BackTab), &ctx);
        assert_eq!(w.focus, SEND_FOCUS);
    }

    #[test]
    fn escape_is_not_consumed() {
        let mut w = window();
        let ctx = ViewContext::default().with_focus(true);
        assert!(!w.handle_event(&key(KeyCode::Esc), &ctx));
    }

    #[test]
    fn submitting_empty_fields_reports_an_error() {
        let mut w = window();
        let ctx = ViewContext::default().with_focus(true);
        w.focus = SEND_FOCUS;
        assert!(w.handle_event(&key(KeyCode::Enter), &ctx));
        let (message, ok) = w.status.clone().expect("status set");
        assert!(!ok);
        assert!(!message.is_empty());
    }

    #[test]
    fn render_registers_field_and_send_rects() {
        let mut w = window();
        let area = Rect::new(0, 0, 60, 24);
        let mut buf = Buffer::empty(area);
        let mut frame = Surface::over(area, &mut buf);
        w.render(&mut frame, area, &ViewContext::default().with_focus(true));
        for rect in w.field_rects {
            assert!(rect.width > 0);
        }
        assert!(w.send_rect.width > 0);
        let click = Event::Mouse(crossterm::event::MouseEvent {
            kind: MouseEventKind::Down(crossterm::event::MouseButton::Left),
            column: w.field_rects[2].x,
            row: w.field_rects[2].y,
            modifiers: KeyModifiers::NONE,
        });
        assert!(w.handle_event(&click, &ViewContext::default().with_focus(true)));
        assert_eq!(w.focus, 2);
    }
}

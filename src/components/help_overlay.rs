use chrono::DateTime;
use crossterm::event::{Event, KeyCode};
use pulldown_cmark::{Event as MdEvent, Options, Parser, Tag, TagEnd};
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span, Text};

use crate::components::ScrollText;
use crate::help_asset::HELP_ASSET;
use crate::i18n::{Language, tr};
use crate::theme::Theme;
use crate::ui::{Surface, dim_outside, fill_region, put_str};

/// The `?` overlay: the embedded shortcut reference, rendered from
/// markdown.
#[derive(Debug, Default)]
pub struct HelpOverlay {
    visible: bool,
    scroll: ScrollText,
    styled_for: Option<Theme>,
}

impl HelpOverlay {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn open(&mut self) {
        self.visible = true;
        self.scroll.scroll_to_start();
    }

    pub fn close(&mut self) {
        self.visible = false;
    }

    pub fn visible(&self) -> bool {
        self.visible
    }

    /// Returns true while the overlay stays open; false means it closed.
    pub fn handle(&mut self, event: &Event) -> bool {
        if let Event::Key(key) = event
            && matches!(
                key.code,
                KeyCode::Esc | KeyCode::Char('?') | KeyCode::Char('q')
            )
        {
            self.close();
            return false;
        }
        self.scroll.handle_event(event);
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
        if self.styled_for != Some(theme) {
            self.scroll
                .set_text(Text::from(markdown_lines(HELP_ASSET.markdown, theme)));
            self.styled_for = Some(theme);
        }

        let width = area.width.saturating_sub(8).min(68);
        let height = area.height.saturating_sub(4);
        let rect = Rect {
            x: area.x + (area.width - width) / 2,
            y: area.y + (area.height - height) / 2,
            width,
            height,
        };

        let buffer = frame.buffer_mut();
        dim_outside(buffer, area, &[rect]);

        let base = Style::default().bg(theme.window_bg()).fg(theme.window_fg());
        let bounds = rect.intersection(buffer.area);
        fill_region(buffer, bounds, base);
        let title_style = Style::default()
            .bg(theme.window_bg())
            .fg(theme.accent())
            .add_modifier(Modifier::BOLD);
        put_str(
            buffer,
            bounds,
            rect.x + 2,
            rect.y + 1,
            tr(language, "help.title"),
            title_style,
        );
        if let Some(updated) = updated_stamp() {
            let stamp_width = updated.chars().count() as u16;
            if stamp_width + 4 < rect.width {
                put_str(
                    buffer,
                    bounds,
                    rect.x + rect.width - 2 - stamp_width,
                    rect.y + 1,
                    &updated,
                    Style::default()
                        .bg(theme.window_bg())
                        .fg(theme.window_dim_fg()),
                );
            }
        }

        let body = Rect {
            x: rect.x + 2,
            y: rect.y + 3,
            width: rect.width.saturating_sub(4),
            height: rect.height.saturating_sub(4),
        };
        self.scroll.render(frame, body);
    }
}

fn updated_stamp() -> Option<String> {
    let stamp = HELP_ASSET.modified_rfc3339;
    if stamp.is_empty() {
        return None;
    }
    let parsed = DateTime::parse_from_rfc3339(stamp).ok()?;
    Some(format!("updated {}", parsed.format("%b %-d, %Y")))
}

/// Flatten markdown into styled lines: headings in bold accent, inline
/// code in the soft accent, list items bulleted. Link destinations are
/// dropped; the visible text is what matters in a terminal.
fn markdown_lines(raw: &str, theme: Theme) -> Vec<Line<'static>> {
    let mut doc = LineBuilder::new(theme);
    for event in Parser::new_ext(raw, Options::all()) {
        match event {
            MdEvent::Start(tag) => doc.open(&tag),
            MdEvent::End(tag) => doc.close(tag),
            MdEvent::Text(text) => doc.text(&text),
            MdEvent::Code(code) => doc.code(&code),
            MdEvent::SoftBreak => doc.soft_break(),
            MdEvent::HardBreak => doc.end_line(),
            MdEvent::Rule => doc.rule(),
            _ => {}
        }
    }
    doc.finish()
}

/// Accumulates parser events into styled terminal lines. Inline markup
/// nests, so each kind is tracked as a depth rather than a flag.
struct LineBuilder {
    heading_style: Style,
    code_style: Style,
    body_style: Style,
    lines: Vec<Line<'static>>,
    current: Vec<Span<'static>>,
    heading_depth: usize,
    strong_depth: usize,
    emphasis_depth: usize,
    code_depth: usize,
    list_depth: usize,
}

impl LineBuilder {
    fn new(theme: Theme) -> Self {
        Self {
            heading_style: Style::default()
                .fg(theme.accent())
                .add_modifier(Modifier::BOLD),
            code_style: Style::default().fg(theme.accent_soft()),
            body_style: Style::default().fg(theme.window_fg()),
            lines: Vec::new(),
            current: Vec::new(),
            heading_depth: 0,
            strong_depth: 0,
            emphasis_depth: 0,
            code_depth: 0,
            list_depth: 0,
        }
    }

    fn open(&mut self, tag: &Tag<'_>) {
        match tag {
            Tag::Heading { .. } => self.heading_depth += 1,
            Tag::Strong => self.strong_depth += 1,
            Tag::Emphasis => self.emphasis_depth += 1,
            Tag::CodeBlock(_) => self.code_depth += 1,
            Tag::List(_) => {
                // A tight nested list starts mid-item; break the line so the
                // inner bullets land under their parent.
                if self.list_depth > 0 && !self.current.is_empty() {
                    self.end_line();
                }
                self.list_depth += 1;
            }
            Tag::Item => {
                let pad = "  ".repeat(self.list_depth.saturating_sub(1));
                self.current
                    .push(Span::styled(format!("{pad}• "), self.code_style));
            }
            _ => {}
        }
    }

    fn close(&mut self, tag: TagEnd) {
        match tag {
            TagEnd::Heading(_) => {
                self.heading_depth = self.heading_depth.saturating_sub(1);
                self.end_block();
            }
            TagEnd::Strong => self.strong_depth = self.strong_depth.saturating_sub(1),
            TagEnd::Emphasis => self.emphasis_depth = self.emphasis_depth.saturating_sub(1),
            TagEnd::CodeBlock => self.code_depth = self.code_depth.saturating_sub(1),
            TagEnd::List(_) => {
                self.list_depth = self.list_depth.saturating_sub(1);
                if self.list_depth == 0 {
                    self.lines.push(Line::default());
                }
            }
            TagEnd::Item => {
                if !self.current.is_empty() {
                    self.end_line();
                }
            }
            TagEnd::Paragraph => self.end_block(),
            _ => {}
        }
    }

    fn style(&self) -> Style {
        if self.heading_depth > 0 {
            return self.heading_style;
        }
        if self.code_depth > 0 {
            return self.code_style;
        }
        let mut style = self.body_style;
        if self.strong_depth > 0 {
            style = style.add_modifier(Modifier::BOLD);
        }
        if self.emphasis_depth > 0 {
            style = style.add_modifier(Modifier::ITALIC);
        }
        style
    }

    fn text(&mut self, text: &str) {
        self.current
            .push(Span::styled(text.to_owned(), self.style()));
    }

    fn code(&mut self, code: &str) {
        self.current
            .push(Span::styled(code.to_owned(), self.code_style));
    }

    fn soft_break(&mut self) {
        if self.code_depth > 0 {
            self.end_line();
        } else {
            self.current.push(Span::raw(" "));
        }
    }

    fn rule(&mut self) {
        self.lines
            .push(Line::styled("─".repeat(8), self.body_style));
    }

    /// Terminate the current line, empty or not.
    fn end_line(&mut self) {
        self.lines
            .push(Line::from(std::mem::take(&mut self.current)));
    }

    /// Terminate the current line and leave a blank one after it.
    fn end_block(&mut self) {
        self.end_line();
        self.lines.push(Line::default());
    }

    fn finish(mut self) -> Vec<Line<'static>> {
        if !self.current.is_empty() {
            self.end_line();
        }
        while self.lines.last().is_some_and(|line| line.spans.is_empty()) {
            self.lines.pop();
        }
        self.lines
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyEvent, KeyModifiers};

    fn flatten(lines: &[Line<'_>]) -> Vec<String> {
        lines
            .iter()
            .map(|l| l.spans.iter().map(|s| s.content.as_ref()).collect())
            .collect()
    }

    #[test]
    fn headings_keep_their_text_and_lists_get_bullets() {
        let lines = markdown_lines("# Title\n\n- one\n- two\n", Theme::Dark);
        let flat = flatten(&lines);
        assert_eq!(flat[0], "Title");
        assert!(flat.iter().any(|l| l == "• one"));
        assert!(flat.iter().any(|l| l == "• two"));
    }

    #[test]
    fn inline_code_becomes_its_own_span() {
        let lines = markdown_lines("press `q` now\n", Theme::Dark);
        assert!(lines[0].spans.iter().any(|s| s.content == "q"));
    }

    #[test]
    fn nested_lists_indent_their_bullets() {
        let lines = markdown_lines("- outer\n  - inner\n", Theme::Dark);
        let flat = flatten(&lines);
        assert!(flat.iter().any(|l| l == "• outer"));
        assert!(flat.iter().any(|l| l == "  • inner"));
    }

    #[test]
    fn embedded_document_produces_content() {
        let lines = markdown_lines(HELP_ASSET.markdown, Theme::Dark);
        assert!(lines.len() > 10);
    }

    #[test]
    fn escape_closes_and_scroll_keys_do_not() {
        let mut help = HelpOverlay::new();
        help.open();
        let down = Event::Key(KeyEvent::new(KeyCode::Down, KeyModifiers::NONE));
        assert!(help.handle(&down));
        assert!(help.visible());
        let esc = Event::Key(KeyEvent::new(KeyCode::Esc, KeyModifiers::NONE));
        assert!(!help.handle(&esc));
        assert!(!help.visible());
    }
}

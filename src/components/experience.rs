use crossterm::event::Event;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span, Text};

use crate::components::{Component, ScrollText, ViewContext};
use crate::i18n::tr;
use crate::profile::{ExperienceEntry, Profile};
use crate::ui::Surface;

/// Work history, newest first as authored in the profile.
#[derive(Debug)]
pub struct ExperienceWindow {
    entries: Vec<ExperienceEntry>,
    scroll: ScrollText,
}

impl ExperienceWindow {
    pub fn new(profile: &Profile) -> Self {
        Self {
            entries: profile.experience.clone(),
            scroll: ScrollText::new(),
        }
    }

    fn build(&self, ctx: &ViewContext) -> Text<'static> {
        let theme = ctx.theme();
        let heading = Style::default()
            .fg(theme.accent())
            .add_modifier(Modifier::BOLD);
        let role = Style::default()
            .fg(theme.window_fg())
            .add_modifier(Modifier::BOLD);
        let company = Style::default().fg(theme.accent_soft());
        let dim = Style::default().fg(theme.window_dim_fg());
        let body = Style::default().fg(theme.window_fg());

        let mut lines: Vec<Line> = Vec::new();
        lines.push(Line::styled(tr(ctx.language(), "experience.title"), heading));
        lines.push(Line::from(""));
        for entry in &self.entries {
            lines.push(Line::from(vec![
                Span::styled(entry.role.clone(), role),
                Span::raw("  "),
                Span::styled(format!("@ {}", entry.company), company),
            ]));
            let mut meta = entry.period.clone();
            if let Some(location) = &entry.location {
                meta.push_str(" · ");
                meta.push_str(location);
            }
            lines.push(Line::styled(meta, dim));
            for highlight in &entry.highlights {
                lines.push(Line::from(vec![
                    Span::styled("  • ", Style::default().fg(theme.accent())),
                    Span::styled(highlight.clone(), body),
                ]));
            }
            lines.push(Line::from(""));
        }
        Text::from(lines)
    }
}

impl Component for ExperienceWindow {
    fn render(&mut self, frame: &mut Surface<'_>, area: Rect, ctx: &ViewContext) {
        self.scroll.set_text(self.build(ctx));
        self.scroll.render(frame, area);
    }

    fn handle_event(&mut self, event: &Event, _ctx: &ViewContext) -> bool {
        self.scroll.handle_event(event)
    }
}

use crossterm::event::Event;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span, Text};

use crate::components::{Component, ScrollText, ViewContext};
use crate::i18n::tr;
use crate::profile::{Profile, SkillGroup};
use crate::ui::Surface;

const GAUGE_WIDTH: usize = 20;
const NAME_COLUMN: usize = 18;

#[derive(Debug)]
pub struct SkillsWindow {
    groups: Vec<SkillGroup>,
    scroll: ScrollText,
}

impl SkillsWindow {
    pub fn new(profile: &Profile) -> Self {
        Self {
            groups: profile.skills.clone(),
            scroll: ScrollText::new(),
        }
    }

    fn build(&self, ctx: &ViewContext) -> Text<'static> {
        let theme = ctx.theme();
        let heading = Style::default()
            .fg(theme.accent())
            .add_modifier(Modifier::BOLD);
        let category = Style::default()
            .fg(theme.window_fg())
            .add_modifier(Modifier::BOLD);
        let name_style = Style::default().fg(theme.window_fg());
        let dim = Style::default().fg(theme.window_dim_fg());

        let mut lines: Vec<Line> = Vec::new();
        lines.push(Line::styled(tr(ctx.language(), "skills.title"), heading));
        lines.push(Line::from(""));
        for group in &self.groups {
            lines.push(Line::styled(group.category.clone(), category));
            for skill in &group.entries {
                let level = skill.level.min(100);
                let filled = GAUGE_WIDTH * level as usize / 100;
                let mut name = skill.name.clone();
                if name.chars().count() < NAME_COLUMN {
                    name.extend(std::iter::repeat_n(' ', NAME_COLUMN - name.chars().count()));
                }
                lines.push(Line::from(vec![
                    Span::styled(format!("  {name}"), name_style),
                    Span::styled(
                        "█".repeat(filled),
                        Style::default().fg(theme.gauge_filled()),
                    ),
                    Span::styled(
                        "░".repeat(GAUGE_WIDTH - filled),
                        Style::default().fg(theme.gauge_empty()),
                    ),
                    Span::styled(format!(" {level:>3}%"), dim),
                ]));
            }
            lines.push(Line::from(""));
        }
        Text::from(lines)
    }
}

impl Component for SkillsWindow {
    fn render(&mut self, frame: &mut Surface<'_>, area: Rect, ctx: &ViewContext) {
        self.scroll.set_text(self.build(ctx));
        self.scroll.render(frame, area);
    }

    fn handle_event(&mut self, event: &Event, _ctx: &ViewContext) -> bool {
        self.scroll.handle_event(event)
    }
}

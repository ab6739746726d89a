use std::time::{Duration, Instant};

use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span, Text};
use ratatui::widgets::Paragraph;

use crate::components::{Component, ViewContext};
use crate::i18n::tr;
use crate::profile::Profile;
use crate::ui::Surface;

const WARMUP: Duration = Duration::from_millis(1000);
const TYPE_INTERVAL: Duration = Duration::from_millis(100);
const DELETE_INTERVAL: Duration = Duration::from_millis(50);
const HOLD: Duration = Duration::from_millis(2000);
const REST: Duration = Duration::from_millis(500);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Warmup,
    Typing,
    Holding,
    Deleting,
    Resting,
}

/// The looping type-and-delete line under the name banner.
///
/// Cadence per character: type every 100 ms, hold the full word for 2 s,
/// delete every 50 ms, rest half a second, then the next role. Driven by
/// wall-clock instants so the animation speed is independent of the frame
/// rate; slow tick rates catch up by typing several characters at once.
#[derive(Debug)]
pub struct TypingEffect {
    roles: Vec<String>,
    index: usize,
    shown: usize,
    phase: Phase,
    phase_started: Instant,
}

impl TypingEffect {
    pub fn new(roles: Vec<String>, start: Instant) -> Self {
        Self {
            roles,
            index: 0,
            shown: 0,
            phase: Phase::Warmup,
            phase_started: start,
        }
    }

    fn current(&self) -> &str {
        self.roles
            .get(self.index)
            .map(String::as_str)
            .unwrap_or_default()
    }

    /// The visible prefix of the current role.
    pub fn visible(&self) -> String {
        self.current().chars().take(self.shown).collect()
    }

    /// Advance to `now`. Returns true when the visible text changed.
    pub fn step(&mut self, now: Instant) -> bool {
        if self.roles.is_empty() {
            return false;
        }
        match self.phase {
            Phase::Warmup => {
                if now.duration_since(self.phase_started) >= WARMUP {
                    self.phase = Phase::Typing;
                    self.phase_started += WARMUP;
                }
                false
            }
            Phase::Typing => {
                let total = self.current().chars().count();
                let mut changed = false;
                while self.shown < total
                    && now.duration_since(self.phase_started) >= TYPE_INTERVAL
                {
                    self.shown += 1;
                    self.phase_started += TYPE_INTERVAL;
                    changed = true;
                }
                if self.shown >= total {
                    self.phase = Phase::Holding;
                }
                changed
            }
            Phase::Holding => {
                if now.duration_since(self.phase_started) >= HOLD {
                    self.phase = Phase::Deleting;
                    self.phase_started += HOLD;
                }
                false
            }
            Phase::Deleting => {
                let mut changed = false;
                while self.shown > 0
                    && now.duration_since(self.phase_started) >= DELETE_INTERVAL
                {
                    self.shown -= 1;
                    self.phase_started += DELETE_INTERVAL;
                    changed = true;
                }
                if self.shown == 0 {
                    self.phase = Phase::Resting;
                }
                changed
            }
            Phase::Resting => {
                if now.duration_since(self.phase_started) >= REST {
                    self.index = (self.index + 1) % self.roles.len();
                    self.phase = Phase::Typing;
                    self.phase_started += REST;
                }
                false
            }
        }
    }
}

/// The Home window: name banner, typing effect, stats row.
#[derive(Debug)]
pub struct HeroWindow {
    name: String,
    title: String,
    availability: Option<String>,
    stats: Vec<(String, String)>,
    typing: TypingEffect,
}

impl HeroWindow {
    pub fn new(profile: &Profile, start: Instant) -> Self {
        Self {
            name: profile.personal.name.clone(),
            title: profile.personal.title.clone(),
            availability: profile.personal.availability.clone(),
            stats: profile
                .stats
                .iter()
                .map(|s| (s.value.clone(), s.label.clone()))
                .collect(),
            typing: TypingEffect::new(profile.personal.hero_roles.clone(), start),
        }
    }
}

impl Component for HeroWindow {
    fn render(&mut self, frame: &mut Surface<'_>, area: Rect, ctx: &ViewContext) {
        if area.width == 0 || area.height == 0 {
            return;
        }
        let theme = ctx.theme();
        let dim = Style::default().fg(theme.window_dim_fg());
        let accent = Style::default()
            .fg(theme.accent())
            .add_modifier(Modifier::BOLD);

        let banner = banner(&self.name);
        let rule_width = banner.chars().count().min(area.width as usize);
        let mut lines: Vec<Line> = Vec::new();
        lines.push(Line::from(""));
        lines.push(Line::styled(tr(ctx.language(), "hero.greeting"), dim).centered());
        lines.push(Line::styled(banner, accent).centered());
        lines.push(Line::styled("─".repeat(rule_width), dim).centered());
        lines.push(
            Line::styled(self.title.clone(), Style::default().fg(theme.window_fg())).centered(),
        );
        lines.push(Line::from(""));
        lines.push(
            Line::from(vec![
                Span::styled(self.typing.visible(), Style::default().fg(theme.accent_soft())),
                Span::styled("▌", Style::default().fg(theme.accent())),
            ])
            .centered(),
        );
        lines.push(Line::from(""));

        if !self.stats.is_empty() {
            let mut spans: Vec<Span> = Vec::new();
            for (i, (value, label)) in self.stats.iter().enumerate() {
                if i > 0 {
                    spans.push(Span::raw("    "));
                }
                spans.push(Span::styled(value.clone(), accent));
                spans.push(Span::raw(" "));
                spans.push(Span::styled(label.clone(), dim));
            }
            lines.push(Line::from(spans).centered());
            lines.push(Line::from(""));
        }

        if let Some(availability) = &self.availability {
            lines.push(
                Line::from(vec![
                    Span::styled("● ", Style::default().fg(theme.success_fg())),
                    Span::styled(availability.clone(), Style::default().fg(theme.window_fg())),
                ])
                .centered(),
            );
            lines.push(Line::from(""));
        }

        lines.push(
            Line::styled(tr(ctx.language(), "hero.hint"), Style::default().fg(theme.hint_fg()))
                .centered(),
        );

        frame.render_widget(Paragraph::new(Text::from(lines)), area);
    }

    fn tick(&mut self, now: Instant) -> bool {
        self.typing.step(now)
    }
}

/// Letter-spaced uppercase rendition of the name.
fn banner(name: &str) -> String {
    let mut out = String::new();
    for (i, ch) in name.chars().enumerate() {
        if i > 0 {
            out.push(' ');
        }
        if ch == ' ' {
            out.push(' ');
        } else {
            out.extend(ch.to_uppercase());
        }
    }
    out
}

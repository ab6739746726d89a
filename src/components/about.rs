use crossterm::event::Event;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span, Text};

use crate::components::{Component, ScrollText, ViewContext};
use crate::i18n::tr;
use crate::links::UrlScanner;
use crate::profile::{Certification, EducationEntry, Expertise, Profile};
use crate::ui::Surface;

#[derive(Debug)]
pub struct AboutWindow {
    bio: String,
    expertise: Vec<Expertise>,
    education: Vec<EducationEntry>,
    certifications: Vec<Certification>,
    links: UrlScanner,
    scroll: ScrollText,
}

impl AboutWindow {
    pub fn new(profile: &Profile) -> Self {
        Self {
            bio: profile.personal.bio.clone(),
            expertise: profile.expertise.clone(),
            education: profile.education.clone(),
            certifications: profile.certifications.clone(),
            links: UrlScanner::new(),
            scroll: ScrollText::new(),
        }
    }

    fn build(&self, ctx: &ViewContext) -> Text<'static> {
        let theme = ctx.theme();
        let lang = ctx.language();
        let heading = Style::default()
            .fg(theme.accent())
            .add_modifier(Modifier::BOLD);
        let body = Style::default().fg(theme.window_fg());
        let strong = Style::default()
            .fg(theme.window_fg())
            .add_modifier(Modifier::BOLD);
        let dim = Style::default().fg(theme.window_dim_fg());

        let mut lines: Vec<Line> = Vec::new();
        lines.push(Line::styled(tr(lang, "about.title"), heading));
        lines.push(Line::from(""));
        if !self.bio.is_empty() {
            // Profiles are free to drop URLs into the bio; render them as links.
            lines.push(self.links.styled_line(&self.bio, body, theme));
            lines.push(Line::from(""));
        }

        if !self.expertise.is_empty() {
            lines.push(Line::styled(tr(lang, "about.expertise"), heading));
            for area in &self.expertise {
                lines.push(Line::from(vec![
                    Span::styled("▪ ", Style::default().fg(theme.accent())),
                    Span::styled(area.title.clone(), strong),
                ]));
                lines.push(self.links.styled_line(&format!("  {}", area.summary), dim, theme));
            }
            lines.push(Line::from(""));
        }

        if !self.education.is_empty() {
            lines.push(Line::styled(tr(lang, "about.education"), heading));
            for entry in &self.education {
                lines.push(Line::styled(entry.degree.clone(), strong));
                lines.push(Line::styled(
                    format!("  {} · {}", entry.school, entry.period),
                    dim,
                ));
            }
            lines.push(Line::from(""));
        }

        if !self.certifications.is_empty() {
            lines.push(Line::styled(tr(lang, "about.certifications"), heading));
            for cert in &self.certifications {
                lines.push(Line::styled(format!("• {}", cert.name), body));
            }
        }

        Text::from(lines)
    }
}

impl Component for AboutWindow {
    fn render(&mut self, frame: &mut Surface<'_>, area: Rect, ctx: &ViewContext) {
        self.scroll.set_text(self.build(ctx));
        self.scroll.render(frame, area);
    }

    fn handle_event(&mut self, event: &Event, _ctx: &ViewContext) -> bool {
        self.scroll.handle_event(event)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::buffer::Buffer;

    #[test]
    fn lists_every_content_block() {
        let profile = Profile::load(None).unwrap();
        let about = AboutWindow::new(&profile);
        let text = about.build(&ViewContext::default());
        let flat: Vec<String> = text
            .lines
            .iter()
            .map(|l| l.spans.iter().map(|s| s.content.to_string()).collect())
            .collect();
        assert!(flat.iter().any(|l| l.contains("About Me")));
        assert!(flat.iter().any(|l| l.contains("Areas of Expertise")));
        assert!(flat.iter().any(|l| l.contains("Education")));
        assert!(flat.iter().any(|l| l.contains("Certifications")));
    }

    #[test]
    fn urls_in_the_bio_render_as_links() {
        let mut profile = Profile::load(None).unwrap();
        profile.personal.bio = "Writing at https://example.dev about systems.".to_string();
        let about = AboutWindow::new(&profile);
        let text = about.build(&ViewContext::default());
        let bio = text
            .lines
            .iter()
            .find(|l| l.spans.iter().any(|s| s.content.contains("Writing at")))
            .expect("bio line present");
        let link = bio
            .spans
            .iter()
            .find(|s| s.content.as_ref() == "https://example.dev")
            .expect("url split into its own span");
        assert!(link.style.add_modifier.contains(Modifier::UNDERLINED));
    }

    #[test]
    fn scrolls_when_the_window_is_short() {
        let profile = Profile::load(None).unwrap();
        let mut about = AboutWindow::new(&profile);
        let area = Rect::new(0, 0, 50, 5);
        let mut buf = Buffer::empty(area);
        let mut frame = Surface::over(area, &mut buf);
        about.render(&mut frame, area, &ViewContext::default());
        assert!(about.scroll.total() > about.scroll.view());
        let down = Event::Key(crossterm::event::KeyEvent::new(
            crossterm::event::KeyCode::Down,
            crossterm::event::KeyModifiers::NONE,
        ));
        assert!(about.handle_event(&down, &ViewContext::default()));
        assert_eq!(about.scroll.offset(), 1);
    }
}

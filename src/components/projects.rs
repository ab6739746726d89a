use crossterm::event::{Event, KeyCode, KeyEvent, KeyModifiers, MouseEvent, MouseEventKind};
use ratatui::layout::{Position, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span, Text};
use ratatui::widgets::{Paragraph, Scrollbar, ScrollbarOrientation, ScrollbarState};

use crate::components::{Component, ViewContext};
use crate::i18n::tr;
use crate::links;
use crate::profile::{Profile, Project};
use crate::ui::{Surface, clip_width, put_str};

const HEADER_ROWS: u16 = 3;

/// Scrollable project cards with a cycling tag filter.
///
/// `f` cycles All → each tag → All; Enter or `o` opens the highlighted
/// project's page. The filter owns the `f` key while this window is
/// focused, shadowing the global maximize shortcut.
#[derive(Debug)]
pub struct ProjectsWindow {
    projects: Vec<Project>,
    tags: Vec<String>,
    filter: Option<usize>,
    selected: usize,
    offset: usize,
    list_area: Rect,
    owners: Vec<Option<usize>>,
}

impl ProjectsWindow {
    pub fn new(profile: &Profile) -> Self {
        Self {
            projects: profile.projects.clone(),
            tags: profile
                .project_tags()
                .into_iter()
                .map(str::to_string)
                .collect(),
            filter: None,
            selected: 0,
            offset: 0,
            list_area: Rect::default(),
            owners: Vec::new(),
        }
    }

    fn filter_label(&self, ctx: &ViewContext) -> String {
        match self.filter {
            Some(idx) => self.tags[idx].clone(),
            None => tr(ctx.language(), "projects.all").to_string(),
        }
    }

    fn filtered(&self) -> Vec<usize> {
        match self.filter {
            None => (0..self.projects.len()).collect(),
            Some(tag_idx) => {
                let tag = &self.tags[tag_idx];
                (0..self.projects.len())
                    .filter(|&i| self.projects[i].tags.iter().any(|t| t == tag))
                    .collect()
            }
        }
    }

    pub fn cycle_filter(&mut self) {
        self.filter = match self.filter {
            None if self.tags.is_empty() => None,
            None => Some(0),
            Some(idx) if idx + 1 < self.tags.len() => Some(idx + 1),
            Some(_) => None,
        };
        self.selected = 0;
        self.offset = 0;
    }

    pub fn open_selected(&self) {
        let filtered = self.filtered();
        if let Some(&project_idx) = filtered.get(self.selected)
            && let Some(url) = &self.projects[project_idx].url
            && let Err(err) = links::open_url(url)
        {
            tracing::warn!(%err, "project link failed to open");
        }
    }

    fn move_selection(&mut self, delta: isize) {
        let count = self.filtered().len();
        if count == 0 {
            return;
        }
        let next = self.selected.saturating_add_signed(delta);
        self.selected = next.min(count - 1);
    }

    fn hits_list(&self, mouse: &MouseEvent) -> bool {
        self.list_area.contains(Position::new(mouse.column, mouse.row))
    }

    fn build(&self, ctx: &ViewContext) -> (Vec<Line<'static>>, Vec<Option<usize>>) {
        let theme = ctx.theme();
        let strong = Style::default()
            .fg(theme.window_fg())
            .add_modifier(Modifier::BOLD);
        let selected_name = Style::default()
            .fg(theme.accent())
            .add_modifier(Modifier::BOLD);
        let dim = Style::default().fg(theme.window_dim_fg());
        let tag_style = Style::default().fg(theme.accent_soft());
        let url_style = links::link_style(Style::default(), theme);

        let mut lines: Vec<Line> = Vec::new();
        let mut owners: Vec<Option<usize>> = Vec::new();
        for (pos, &idx) in self.filtered().iter().enumerate() {
            let project = &self.projects[idx];
            let marker = if pos == self.selected { "> " } else { "  " };
            let name_style = if pos == self.selected {
                selected_name
            } else {
                strong
            };
            lines.push(Line::from(vec![
                Span::styled(marker, selected_name),
                Span::styled(project.name.clone(), name_style),
            ]));
            owners.push(Some(pos));
            lines.push(Line::styled(format!("  {}", project.summary), dim));
            owners.push(Some(pos));
            if !project.tags.is_empty() {
                let chips = project
                    .tags
                    .iter()
                    .map(|t| format!("[{t}]"))
                    .collect::<Vec<_>>()
                    .join(" ");
                lines.push(Line::styled(format!("  {chips}"), tag_style));
                owners.push(Some(pos));
            }
            if let Some(url) = &project.url {
                lines.push(Line::from(vec![
                    Span::raw("  "),
                    Span::styled(url.clone(), url_style),
                ]));
                owners.push(Some(pos));
            }
            lines.push(Line::from(""));
            owners.push(None);
        }
        (lines, owners)
    }

    fn scroll_selected_into_view(&mut self, view: usize) {
        if view == 0 {
            return;
        }
        let first = self.owners.iter().position(|o| *o == Some(self.selected));
        let last = self.owners.iter().rposition(|o| *o == Some(self.selected));
        if let (Some(first), Some(last)) = (first, last) {
            if first < self.offset {
                self.offset = first;
            } else if last >= self.offset + view {
                self.offset = last + 1 - view;
            }
        }
        self.offset = self.offset.min(self.owners.len().saturating_sub(view));
    }
}

impl Component for ProjectsWindow {
    fn render(&mut self, frame: &mut Surface<'_>, area: Rect, ctx: &ViewContext) {
        if area.width == 0 || area.height == 0 {
            return;
        }
        let theme = ctx.theme();
        let heading = Style::default()
            .fg(theme.accent())
            .add_modifier(Modifier::BOLD);

        let (lines, owners) = self.build(ctx);
        self.owners = owners;

        {
            let buffer = frame.buffer_mut();
            let bounds = area.intersection(buffer.area);
            if bounds.width == 0 || bounds.height == 0 {
                return;
            }
            put_str(
                buffer,
                bounds,
                area.x,
                area.y,
                tr(ctx.language(), "projects.title"),
                heading,
            );
            let filter = format!("⌕ {}", self.filter_label(ctx));
            let filter_width = filter.chars().count() as u16;
            if filter_width < area.width {
                put_str(
                    buffer,
                    bounds,
                    area.x + area.width - filter_width,
                    area.y,
                    &filter,
                    Style::default().fg(theme.accent_soft()),
                );
            }
            if area.height > 1 {
                let hint = clip_width(
                    tr(ctx.language(), "projects.hint"),
                    area.width as usize,
                );
                put_str(
                    buffer,
                    bounds,
                    area.x,
                    area.y + 1,
                    &hint,
                    Style::default().fg(theme.hint_fg()),
                );
            }
        }

        if area.height <= HEADER_ROWS {
            self.list_area = Rect::default();
            return;
        }
        let list_area = Rect {
            x: area.x,
            y: area.y + HEADER_ROWS,
            width: area.width,
            height: area.height - HEADER_ROWS,
        };
        self.list_area = list_area;
        let view = list_area.height as usize;
        self.scroll_selected_into_view(view);

        let visible: Vec<Line> = lines
            .iter()
            .skip(self.offset)
            .take(view)
            .cloned()
            .collect();
        let total = lines.len();
        let mut content_width = list_area.width;
        if total > view {
            content_width = content_width.saturating_sub(1);
        }
        frame.render_widget(
            Paragraph::new(Text::from(visible)),
            Rect {
                x: list_area.x,
                y: list_area.y,
                width: content_width,
                height: list_area.height,
            },
        );
        if total > view {
            let content_len = total - view + 1;
            let mut state = ScrollbarState::new(content_len)
                .position(self.offset.min(content_len - 1))
                .viewport_content_length(view);
            frame.render_stateful_widget(
                Scrollbar::new(ScrollbarOrientation::VerticalRight),
                list_area,
                &mut state,
            );
        }
    }

    fn handle_event(&mut self, event: &Event, _ctx: &ViewContext) -> bool {
        match event {
            Event::Key(key) => self.handle_key(key),
            Event::Mouse(mouse) if self.hits_list(mouse) => match mouse.kind {
                MouseEventKind::ScrollUp => {
                    self.move_selection(-1);
                    true
                }
                MouseEventKind::ScrollDown => {
                    self.move_selection(1);
                    true
                }
                MouseEventKind::Down(_) => {
                    let row = self.offset + (mouse.row - self.list_area.y) as usize;
                    if let Some(Some(pos)) = self.owners.get(row) {
                        self.selected = *pos;
                        return true;
                    }
                    false
                }
                _ => false,
            },
            _ => false,
        }
    }
}

impl ProjectsWindow {
    fn handle_key(&mut self, key: &KeyEvent) -> bool {
        if key.modifiers != KeyModifiers::NONE {
            return false;
        }
        match key.code {
            KeyCode::Up => {
                self.move_selection(-1);
                true
            }
            KeyCode::Down => {
                self.move_selection(1);
                true
            }
            KeyCode::PageUp => {
                self.move_selection(-(self.list_area.height.max(1) as isize));
                true
            }
            KeyCode::PageDown => {
                self.move_selection(self.list_area.height.max(1) as isize);
                true
            }
            KeyCode::Home => {
                self.selected = 0;
                true
            }
            KeyCode::End => {
                self.selected = self.filtered().len().saturating_sub(1);
                true
            }
            KeyCode::Enter | KeyCode::Char('o') => {
                self.open_selected();
                true
            }
            KeyCode::Char('f') => {
                self.cycle_filter();
                true
            }
            _ => false,
        }
    }
}

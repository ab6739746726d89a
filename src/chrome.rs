use folio_wm::Geometry;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};

use crate::theme::Theme;
use crate::ui::{Surface, clip_width, fill_region, put_str};

/// What a click on a window frame means.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeaderAction {
    Minimize,
    Maximize,
    Close,
    Drag,
    None,
}

const MINIMIZE_GLYPH: &str = "─";
const MAXIMIZE_GLYPH: &str = "□";
const RESTORE_GLYPH: &str = "❐";
const CLOSE_GLYPH: &str = "✕";

// Header layout, measured from the right border: ✕ at -2, □ at -4, ─ at -6.
const CLOSE_OFFSET: i32 = 2;
const MAXIMIZE_OFFSET: i32 = 4;
const MINIMIZE_OFFSET: i32 = 6;

/// Draws window frames and resolves clicks against them.
///
/// A frame is a box border with a one-row header inside it: the title
/// centered, the minimize/maximize/close controls right-aligned. Rendering
/// happens in the window's own offscreen buffer at origin zero; hit testing
/// happens in screen coordinates against the window's signed geometry.
#[derive(Debug)]
pub struct WindowChrome;

impl WindowChrome {
    /// Rows a frame consumes above the content (border + header).
    pub const TOP_INSET: u16 = 2;

    /// Content region inside the frame for a window buffer of `size`.
    pub fn content_area(size: Rect) -> Rect {
        if size.width <= 2 || size.height <= Self::TOP_INSET + 1 {
            return Rect::default();
        }
        Rect {
            x: size.x + 1,
            y: size.y + Self::TOP_INSET,
            width: size.width - 2,
            height: size.height - Self::TOP_INSET - 1,
        }
    }

    pub fn render(
        frame: &mut Surface<'_>,
        size: Rect,
        title: &str,
        focused: bool,
        maximized: bool,
        theme: Theme,
    ) {
        if size.width == 0 || size.height == 0 {
            return;
        }
        let buffer = frame.buffer_mut();
        let bounds = size.intersection(buffer.area);
        if bounds.width == 0 || bounds.height == 0 {
            return;
        }

        let body_style = Style::default().bg(theme.window_bg()).fg(theme.window_fg());
        fill_region(buffer, bounds, body_style);

        let border_style = Style::default()
            .fg(theme.window_border())
            .bg(theme.window_bg());
        let left = size.x;
        let top = size.y;
        let right = size.x.saturating_add(size.width).saturating_sub(1);
        let bottom = size.y.saturating_add(size.height).saturating_sub(1);

        for x in left..=right {
            if let Some(cell) = buffer.cell_mut((x, top)) {
                let glyph = if x == left {
                    "┌"
                } else if x == right {
                    "┐"
                } else {
                    "─"
                };
                cell.set_symbol(glyph);
                cell.set_style(border_style);
            }
            if bottom > top
                && let Some(cell) = buffer.cell_mut((x, bottom))
            {
                let glyph = if x == left {
                    "└"
                } else if x == right {
                    "┘"
                } else {
                    "─"
                };
                cell.set_symbol(glyph);
                cell.set_style(border_style);
            }
        }
        for y in top.saturating_add(1)..bottom {
            if let Some(cell) = buffer.cell_mut((left, y)) {
                cell.set_symbol("│");
                cell.set_style(border_style);
            }
            if let Some(cell) = buffer.cell_mut((right, y)) {
                cell.set_symbol("│");
                cell.set_style(border_style);
            }
        }

        // Header row sits just under the top border.
        let header_y = top.saturating_add(1);
        if header_y >= bottom || size.width <= 2 {
            return;
        }
        let header_style = if focused {
            Style::default()
                .bg(theme.header_active_bg())
                .fg(theme.header_active_fg())
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default()
                .bg(theme.header_inactive_bg())
                .fg(theme.header_inactive_fg())
        };
        for x in left.saturating_add(1)..right {
            if let Some(cell) = buffer.cell_mut((x, header_y)) {
                cell.set_symbol(" ");
                cell.set_style(header_style);
            }
        }

        let controls_width = MINIMIZE_OFFSET as u16;
        let title_space = size.width.saturating_sub(2).saturating_sub(controls_width) as usize;
        if title_space > 0 {
            let text = clip_width(title, title_space);
            let text_width = text.chars().count() as u16;
            let start = left
                .saturating_add(1)
                .saturating_add((title_space as u16).saturating_sub(text_width) / 2);
            put_str(buffer, bounds, start, header_y, &text, header_style);
        }

        let maximize_glyph = if maximized {
            RESTORE_GLYPH
        } else {
            MAXIMIZE_GLYPH
        };
        for (offset, glyph) in [
            (MINIMIZE_OFFSET, MINIMIZE_GLYPH),
            (MAXIMIZE_OFFSET, maximize_glyph),
            (CLOSE_OFFSET, CLOSE_GLYPH),
        ] {
            let x = size.x as i32 + size.width as i32 - 1 - offset;
            if x > left as i32 {
                put_str(buffer, bounds, x as u16, header_y, glyph, header_style);
            }
        }
    }

    /// Classify a screen-coordinate click against a window's frame.
    /// The caller has already established that the point is inside the
    /// window; everything below the header is reported as `None`.
    pub fn hit_test(geometry: Geometry, column: u16, row: u16) -> HeaderAction {
        let col = column as i32;
        let row = row as i32;
        let header_y = geometry.top + 1;
        if row == geometry.top || row > header_y {
            return HeaderAction::None;
        }
        if row != header_y {
            return HeaderAction::None;
        }
        let right = geometry.right() - 1;
        if col <= geometry.left || col >= right {
            return HeaderAction::None;
        }
        if col == right - CLOSE_OFFSET {
            HeaderAction::Close
        } else if col == right - MAXIMIZE_OFFSET {
            HeaderAction::Maximize
        } else if col == right - MINIMIZE_OFFSET {
            HeaderAction::Minimize
        } else {
            HeaderAction::Drag
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::buffer::Buffer;

    fn size(width: u16, height: u16) -> Rect {
        Rect {
            x: 0,
            y: 0,
            width,
            height,
        }
    }

    fn row_string(buf: &Buffer, y: u16, width: u16) -> String {
        (0..width)
            .map(|x| buf.cell((x, y)).unwrap().symbol().to_string())
            .collect()
    }

    #[test]
    fn frame_draws_border_header_and_controls() {
        let area = size(20, 8);
        let mut buf = Buffer::empty(area);
        let mut frame = Surface::over(area, &mut buf);
        WindowChrome::render(&mut frame, area, "home", true, false, Theme::Dark);

        let top = row_string(&buf, 0, 20);
        assert!(top.starts_with('┌'));
        assert!(top.ends_with('┐'));
        let header = row_string(&buf, 1, 20);
        assert!(header.contains("home"));
        assert!(header.contains(MINIMIZE_GLYPH));
        assert!(header.contains(MAXIMIZE_GLYPH));
        assert!(header.contains(CLOSE_GLYPH));
        let bottom = row_string(&buf, 7, 20);
        assert!(bottom.starts_with('└'));
        assert!(bottom.ends_with('┘'));
    }

    #[test]
    fn restore_glyph_replaces_maximize_when_maximized() {
        let area = size(20, 8);
        let mut buf = Buffer::empty(area);
        let mut frame = Surface::over(area, &mut buf);
        WindowChrome::render(&mut frame, area, "home", true, true, Theme::Dark);
        let header = row_string(&buf, 1, 20);
        assert!(header.contains(RESTORE_GLYPH));
        assert!(!header.contains(MAXIMIZE_GLYPH));
    }

    #[test]
    fn hit_test_resolves_each_control() {
        let geometry = Geometry::new(10, 5, 20, 8);
        // Right border at column 29; controls at 27, 25, 23.
        assert_eq!(WindowChrome::hit_test(geometry, 27, 6), HeaderAction::Close);
        assert_eq!(
            WindowChrome::hit_test(geometry, 25, 6),
            HeaderAction::Maximize
        );
        assert_eq!(
            WindowChrome::hit_test(geometry, 23, 6),
            HeaderAction::Minimize
        );
        assert_eq!(WindowChrome::hit_test(geometry, 15, 6), HeaderAction::Drag);
        assert_eq!(WindowChrome::hit_test(geometry, 15, 7), HeaderAction::None);
        assert_eq!(WindowChrome::hit_test(geometry, 15, 5), HeaderAction::None);
    }

    #[test]
    fn content_area_insets_past_border_and_header() {
        let area = WindowChrome::content_area(size(20, 8));
        assert_eq!(area, Rect::new(1, 2, 18, 5));
        assert_eq!(WindowChrome::content_area(size(2, 2)), Rect::default());
    }
}

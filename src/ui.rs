//! Clipped drawing over the terminal buffer.
//!
//! Windows carry signed origins and get composed from offscreen buffers, so
//! rectangles routinely poke past the visible area. `Surface` clips every
//! draw call to its bounds; writing out of bounds into a ratatui `Buffer`
//! panics, so all rendering in the crate goes through this type.

use folio_wm::Geometry;
use ratatui::Frame;
use ratatui::buffer::Buffer;
use ratatui::layout::{Position, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::widgets::{StatefulWidget, Widget};

pub struct Surface<'a> {
    area: Rect,
    buffer: &'a mut Buffer,
}

impl<'a> Surface<'a> {
    pub fn new(frame: &'a mut Frame<'_>) -> Self {
        let area = frame.area();
        Self {
            area,
            buffer: frame.buffer_mut(),
        }
    }

    /// A surface over an arbitrary buffer region. Components draw into
    /// their logical window size this way before being composed onto the
    /// terminal.
    pub fn over(area: Rect, buffer: &'a mut Buffer) -> Self {
        Self { area, buffer }
    }

    pub fn area(&self) -> Rect {
        self.area
    }

    pub fn buffer_mut(&mut self) -> &mut Buffer {
        self.buffer
    }

    fn visible(&self, rect: Rect) -> Option<Rect> {
        let rect = rect.intersection(self.area);
        (rect.width > 0 && rect.height > 0).then_some(rect)
    }

    pub fn render_widget<W>(&mut self, widget: W, area: Rect)
    where
        W: Widget,
    {
        if let Some(rect) = self.visible(area) {
            widget.render(rect, self.buffer);
        }
    }

    pub fn render_stateful_widget<W>(&mut self, widget: W, area: Rect, state: &mut W::State)
    where
        W: StatefulWidget,
    {
        if let Some(rect) = self.visible(area) {
            widget.render(rect, self.buffer, state);
        }
    }

    /// Copy an offscreen window buffer onto the surface at a signed
    /// destination, dropping the parts outside the surface bounds.
    pub fn compose(&mut self, src: &Buffer, dest: Geometry) {
        let left = dest.left.max(self.area.x as i32);
        let top = dest.top.max(self.area.y as i32);
        let right = dest.right().min(self.area.x as i32 + self.area.width as i32);
        let bottom = dest
            .bottom()
            .min(self.area.y as i32 + self.area.height as i32);
        for dy in top..bottom {
            let sy = (dy - dest.top) as u16;
            for dx in left..right {
                let sx = (dx - dest.left) as u16;
                if let (Some(from), Some(to)) = (
                    src.cell((sx, sy)),
                    self.buffer.cell_mut((dx as u16, dy as u16)),
                ) {
                    *to = from.clone();
                }
            }
        }
    }
}

/// Write `text` at (x, y), truncated at the right edge of `bounds` and
/// dropped entirely when the start cell falls outside it.
pub(crate) fn put_str(buffer: &mut Buffer, bounds: Rect, x: u16, y: u16, text: &str, style: Style) {
    if !bounds.contains(Position::new(x, y)) {
        return;
    }
    let room = bounds.right().saturating_sub(x);
    buffer.set_string(x, y, clip_width(text, room as usize), style);
}

pub(crate) fn clip_width(value: &str, width: usize) -> String {
    value.chars().take(width).collect()
}

/// Overwrite every cell of `region` with a styled blank. Whatever was drawn
/// underneath must not show through, modifiers included. Cells outside the
/// buffer are skipped, so callers may pass unclipped rects.
pub(crate) fn fill_region(buffer: &mut Buffer, region: Rect, style: Style) {
    for at in region.positions() {
        if let Some(cell) = buffer.cell_mut(at) {
            cell.reset();
            cell.set_symbol(" ");
            cell.set_style(style);
        }
    }
}

/// Apply a DIM overlay to `area`, leaving the cells inside any of the
/// `keep` rects untouched. Modal surfaces call this before painting so
/// the desktop behind them recedes.
pub(crate) fn dim_outside(buffer: &mut Buffer, area: Rect, keep: &[Rect]) {
    let dim = Style::default().add_modifier(Modifier::DIM);
    for at in area.intersection(buffer.area).positions() {
        if keep.iter().any(|rect| rect.contains(at)) {
            continue;
        }
        if let Some(cell) = buffer.cell_mut(at) {
            cell.set_style(dim);
        }
    }
}

/// Size of a window geometry as an origin-zero `Rect` for offscreen
/// rendering. Terminal cell counts never approach `u16::MAX`.
pub(crate) fn geometry_size_rect(geometry: Geometry) -> Rect {
    Rect {
        x: 0,
        y: 0,
        width: geometry.width.min(u16::MAX as u32) as u16,
        height: geometry.height.min(u16::MAX as u32) as u16,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::buffer::Buffer;
    use ratatui::layout::Rect;
    use ratatui::style::Style;

    fn filled(width: u16, height: u16) -> Buffer {
        let area = Rect {
            x: 0,
            y: 0,
            width,
            height,
        };
        let mut buf = Buffer::empty(area);
        for y in 0..height {
            for x in 0..width {
                if let Some(cell) = buf.cell_mut((x, y)) {
                    cell.set_symbol("#");
                }
            }
        }
        buf
    }

    #[test]
    fn compose_clips_negative_origins() {
        let frame_area = Rect {
            x: 0,
            y: 0,
            width: 4,
            height: 2,
        };
        let mut dest = Buffer::empty(frame_area);
        let mut surface = Surface::over(frame_area, &mut dest);
        let src = filled(3, 2);
        surface.compose(&src, Geometry::new(-1, 0, 3, 2));
        let buffer = surface.buffer;
        assert_eq!(buffer.cell((0, 0)).unwrap().symbol(), "#");
        assert_eq!(buffer.cell((1, 0)).unwrap().symbol(), "#");
        assert_eq!(buffer.cell((2, 0)).unwrap().symbol(), " ");
    }

    #[test]
    fn compose_ignores_fully_disjoint_destinations() {
        let frame_area = Rect {
            x: 0,
            y: 0,
            width: 3,
            height: 3,
        };
        let mut dest = Buffer::empty(frame_area);
        let mut surface = Surface::over(frame_area, &mut dest);
        let src = filled(2, 2);
        surface.compose(&src, Geometry::new(-5, -5, 2, 2));
        let buffer = surface.buffer;
        for y in 0..frame_area.height {
            for x in 0..frame_area.width {
                assert_eq!(buffer.cell((x, y)).unwrap().symbol(), " ");
            }
        }
    }

    #[test]
    fn clip_width_short_and_long() {
        assert_eq!(clip_width("abc", 5), "abc");
        assert_eq!(clip_width("abcdef", 3), "abc");
    }

    #[test]
    fn fill_region_blanks_cells_and_skips_out_of_buffer_parts() {
        let mut buf = filled(4, 2);
        let region = Rect {
            x: 2,
            y: 0,
            width: 4,
            height: 1,
        };
        fill_region(&mut buf, region, Style::default());
        assert_eq!(buf.cell((1, 0)).unwrap().symbol(), "#");
        assert_eq!(buf.cell((2, 0)).unwrap().symbol(), " ");
        assert_eq!(buf.cell((3, 0)).unwrap().symbol(), " ");
        assert_eq!(buf.cell((2, 1)).unwrap().symbol(), "#");
    }

    #[test]
    fn dim_outside_spares_the_kept_rects() {
        let mut buf = filled(5, 1);
        let area = buf.area;
        let keep = Rect {
            x: 1,
            y: 0,
            width: 3,
            height: 1,
        };
        dim_outside(&mut buf, area, &[keep]);
        let dimmed = |x: u16| {
            buf.cell((x, 0))
                .unwrap()
                .style()
                .add_modifier
                .contains(Modifier::DIM)
        };
        assert!(dimmed(0));
        assert!(!dimmed(1));
        assert!(!dimmed(3));
        assert!(dimmed(4));
    }

    #[test]
    fn put_str_stays_inside_bounds() {
        let area = Rect {
            x: 0,
            y: 0,
            width: 5,
            height: 2,
        };
        let mut buf = Buffer::empty(area);
        put_str(&mut buf, area, 3, 0, "wide", Style::default());
        assert_eq!(buf.cell((3, 0)).unwrap().symbol(), "w");
        assert_eq!(buf.cell((4, 0)).unwrap().symbol(), "i");
        // Past the right edge: dropped entirely.
        put_str(&mut buf, area, 5, 0, "x", Style::default());
        // Outside the row range: dropped entirely.
        put_str(&mut buf, area, 0, 2, "x", Style::default());
        assert_eq!(buf.cell((0, 0)).unwrap().symbol(), " ");
    }
}

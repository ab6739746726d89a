use std::f32::consts::TAU;

use ratatui::layout::Rect;
use ratatui::style::Style;

use crate::theme::Theme;
use crate::ui::{Surface, fill_region};

const WAVE_COUNT: usize = 3;
// Columns per radian; one full wave spans roughly 125 columns.
const WAVE_STRETCH: f32 = 20.0;

/// Animated sine-wave backdrop behind the desktop windows.
///
/// Three layers drift at staggered speeds and lean toward the pointer, each
/// filled from its surface line down to the bottom of the viewport. Painted
/// back to front so the nearest layer wins where they overlap.
#[derive(Debug)]
pub struct Wallpaper {
    steps_x: [f32; WAVE_COUNT],
    steps_y: [f32; WAVE_COUNT],
    pointer: Option<(u16, u16)>,
}

impl Default for Wallpaper {
    fn default() -> Self {
        Self::new()
    }
}

impl Wallpaper {
    pub fn new() -> Self {
        Self {
            steps_x: [0.0; WAVE_COUNT],
            steps_y: [0.0; WAVE_COUNT],
            pointer: None,
        }
    }

    /// Advance the animation one frame. Deeper layers move faster.
    pub fn tick(&mut self) {
        for i in 0..WAVE_COUNT {
            let rate = (i + 1) as f32;
            self.steps_x[i] = (self.steps_x[i] + 0.03 * rate).rem_euclid(TAU);
            self.steps_y[i] = (self.steps_y[i] + 0.04 * rate).rem_euclid(TAU);
        }
    }

    pub fn set_pointer(&mut self, column: u16, row: u16) {
        self.pointer = Some((column, row));
    }

    pub fn render(&mut self, frame: &mut Surface<'_>, area: Rect, theme: Theme) {
        if area.width == 0 || area.height == 0 {
            return;
        }
        let buffer = frame.buffer_mut();
        let bounds = area.intersection(buffer.area);
        if bounds.width == 0 || bounds.height == 0 {
            return;
        }
        let bg = Style::default()
            .bg(theme.desktop_bg())
            .fg(theme.desktop_bg());
        fill_region(buffer, bounds, bg);
        // Too short for a visible surface line; leave the flat fill.
        if area.height < 6 {
            return;
        }

        let mid = area.y as f32 + area.height as f32 / 2.0;
        let amp = (area.height as f32 / 6.0).max(1.0);
        let bottom = area.y.saturating_add(area.height);
        for layer in (0..WAVE_COUNT).rev() {
            let rate = (layer + 1) as f32;
            let wobble = self.steps_y[layer].cos() * amp * 0.4;
            let lean = match self.pointer {
                Some((_, row)) => (row as f32 - mid) * 0.05 * rate,
                None => 0.0,
            };
            let style = Style::default()
                .bg(theme.wave_color(layer))
                .fg(theme.wave_color(layer));
            for x in bounds.x..bounds.x.saturating_add(bounds.width) {
                let col = (x - area.x) as f32;
                let surface =
                    mid + (col / WAVE_STRETCH + self.steps_x[layer]).sin() * amp + wobble + lean;
                let start = surface.max(area.y as f32) as u16;
                for y in start..bottom {
                    if y < bounds.y || y >= bounds.y.saturating_add(bounds.height) {
                        continue;
                    }
                    if let Some(cell) = buffer.cell_mut((x, y)) {
                        cell.set_symbol(" ");
                        cell.set_style(style);
                    }
                }
            }
        }
    }
}

//! Terminal color capability mapping.
//!
//! The palette is authored in RGB. When the terminal advertises truecolor
//! (`COLORTERM` containing `truecolor` or `24bit`) the RGB passes through;
//! otherwise the nearest xterm-256 entry is chosen from the 6x6x6 color
//! cube and the gray ramp by squared channel distance.

use ratatui::style::Color;

pub type Rgb = (u8, u8, u8);

pub fn to_color(rgb: Rgb) -> Color {
    if truecolor_supported() {
        Color::Rgb(rgb.0, rgb.1, rgb.2)
    } else {
        Color::Indexed(nearest_xterm256(rgb))
    }
}

/// Alpha-composite `over` onto `base`, alpha in 0..=100 percent. The
/// wallpaper uses this to fake the translucency the terminal cannot do.
pub fn blend(base: Rgb, over: Rgb, alpha_pct: u8) -> Rgb {
    let a = alpha_pct.min(100) as u32;
    let mix = |b: u8, o: u8| ((b as u32 * (100 - a) + o as u32 * a) / 100) as u8;
    (
        mix(base.0, over.0),
        mix(base.1, over.1),
        mix(base.2, over.2),
    )
}

fn truecolor_supported() -> bool {
    std::env::var("COLORTERM").is_ok_and(|var| {
        let lv = var.to_lowercase();
        lv.contains("truecolor") || lv.contains("24bit")
    })
}

// Channel values of the xterm 6x6x6 cube (indices 16..=231). The levels
// are unevenly spaced, so the nearest coordinate needs thresholds rather
// than a linear scale.
const CUBE_LEVELS: [u8; 6] = [0, 95, 135, 175, 215, 255];

fn cube_coord(v: u8) -> usize {
    if v < 48 {
        0
    } else if v < 115 {
        1
    } else {
        (v as usize - 35) / 40
    }
}

fn nearest_xterm256(rgb: Rgb) -> u8 {
    let (r, g, b) = rgb;
    let (r6, g6, b6) = (cube_coord(r), cube_coord(g), cube_coord(b));
    let cube_index = (16 + 36 * r6 + 6 * g6 + b6) as u8;
    let cube_rgb = (CUBE_LEVELS[r6], CUBE_LEVELS[g6], CUBE_LEVELS[b6]);

    // Gray ramp: indices 232..=255 covering 24 levels.
    let avg = ((r as u16 + g as u16 + b as u16) / 3) as u8;
    let gray_step = ((avg as u16 * 23 + 127) / 255) as u8;
    let gray_value = (8 + gray_step as u16 * 10).min(255) as u8;
    let gray_rgb = (gray_value, gray_value, gray_value);

    if distance_sq(rgb, gray_rgb) < distance_sq(rgb, cube_rgb) {
        232 + gray_step
    } else {
        cube_index
    }
}

fn distance_sq(a: Rgb, b: Rgb) -> u32 {
    let d = |x: u8, y: u8| {
        let diff = x as i32 - y as i32;
        (diff * diff) as u32
    };
    d(a.0, b.0) + d(a.1, b.1) + d(a.2, b.2)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cube_levels_round_trip_through_their_coords() {
        for (i, &level) in CUBE_LEVELS.iter().enumerate() {
            assert_eq!(cube_coord(level), i);
        }
    }

    #[test]
    fn nearest_index_stays_in_extended_range() {
        for rgb in [(0, 0, 0), (255, 255, 255), (74, 144, 226), (10, 200, 30)] {
            assert!(nearest_xterm256(rgb) >= 16);
        }
    }

    #[test]
    fn pure_gray_prefers_the_gray_ramp() {
        let idx = nearest_xterm256((120, 120, 120));
        assert!((232..=255).contains(&idx));
    }

    #[test]
    fn saturated_color_prefers_the_cube() {
        let idx = nearest_xterm256((74, 144, 226));
        assert!((16..=231).contains(&idx));
    }

    #[test]
    fn blend_endpoints_and_midpoint() {
        let base = (10, 20, 30);
        let over = (210, 220, 230);
        assert_eq!(blend(base, over, 0), base);
        assert_eq!(blend(base, over, 100), over);
        assert_eq!(blend(base, over, 50), (110, 120, 130));
    }

    #[test]
    fn to_color_returns_rgb_or_indexed() {
        match to_color((12, 34, 56)) {
            Color::Rgb(..) | Color::Indexed(_) => {}
            other => panic!("unexpected color variant: {other:?}"),
        }
    }
}

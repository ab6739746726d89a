//! The two desktop palettes.
//!
//! Every color in the shell resolves through [`Theme`] so the `t` toggle
//! reskins everything in one frame. Colors are authored as RGB pairs
//! (dark first) and degraded to the terminal's capability in `term_color`.

use clap::ValueEnum;
use ratatui::style::Color;
use serde::{Deserialize, Serialize};

use crate::term_color::{Rgb, blend, to_color};

pub const ACCENT_RGB: Rgb = (74, 144, 226);

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Dark,
    Light,
}

impl Theme {
    pub fn toggle(self) -> Self {
        match self {
            Theme::Dark => Theme::Light,
            Theme::Light => Theme::Dark,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Theme::Dark => "dark",
            Theme::Light => "light",
        }
    }

    fn pick(self, dark: Rgb, light: Rgb) -> Color {
        to_color(self.pick_rgb(dark, light))
    }

    fn pick_rgb(self, dark: Rgb, light: Rgb) -> Rgb {
        match self {
            Theme::Dark => dark,
            Theme::Light => light,
        }
    }

    // Desktop / wallpaper

    pub fn desktop_bg_rgb(self) -> Rgb {
        self.pick_rgb((16, 18, 28), (235, 238, 243))
    }

    pub fn desktop_bg(self) -> Color {
        to_color(self.desktop_bg_rgb())
    }

    /// Fill of one wallpaper wave layer. Layers fake the original
    /// translucent waves by blending the accent into the backdrop at
    /// decreasing strength.
    pub fn wave_rgb(self, layer: usize) -> Rgb {
        let over = match layer {
            0 => (68, 144, 226),
            1 => (74, 174, 226),
            _ => (58, 124, 200),
        };
        let alpha = match self {
            Theme::Dark => [14, 10, 7],
            Theme::Light => [18, 13, 9],
        };
        blend(self.desktop_bg_rgb(), over, alpha[layer.min(2)])
    }

    pub fn wave_color(self, layer: usize) -> Color {
        to_color(self.wave_rgb(layer))
    }

    // Panel (top bar) and dock

    pub fn panel_bg(self) -> Color {
        self.pick((10, 12, 20), (214, 219, 228))
    }

    pub fn panel_fg(self) -> Color {
        self.pick((214, 219, 230), (32, 38, 48))
    }

    pub fn panel_dim_fg(self) -> Color {
        self.pick((128, 138, 154), (108, 118, 132))
    }

    pub fn chip_bg(self) -> Color {
        self.pick((24, 28, 40), (200, 207, 218))
    }

    pub fn chip_fg(self) -> Color {
        self.panel_fg()
    }

    pub fn chip_active_bg(self) -> Color {
        to_color(ACCENT_RGB)
    }

    pub fn chip_active_fg(self) -> Color {
        self.pick((245, 248, 252), (245, 248, 252))
    }

    pub fn chip_closed_fg(self) -> Color {
        self.panel_dim_fg()
    }

    // Menu dropdown

    pub fn menu_bg(self) -> Color {
        self.pick((22, 26, 38), (222, 226, 234))
    }

    pub fn menu_fg(self) -> Color {
        self.pick((220, 224, 234), (30, 36, 46))
    }

    pub fn menu_selected_bg(self) -> Color {
        to_color(ACCENT_RGB)
    }

    pub fn menu_selected_fg(self) -> Color {
        Color::White
    }

    // Window chrome and body

    pub fn header_active_bg(self) -> Color {
        to_color(ACCENT_RGB)
    }

    pub fn header_active_fg(self) -> Color {
        Color::White
    }

    pub fn header_inactive_bg(self) -> Color {
        self.pick((45, 52, 66), (198, 205, 216))
    }

    pub fn header_inactive_fg(self) -> Color {
        self.pick((170, 178, 192), (80, 90, 104))
    }

    pub fn window_bg(self) -> Color {
        self.pick((24, 28, 38), (250, 250, 252))
    }

    pub fn window_fg(self) -> Color {
        self.pick((216, 222, 232), (32, 38, 48))
    }

    pub fn window_dim_fg(self) -> Color {
        self.pick((140, 150, 165), (115, 124, 138))
    }

    pub fn window_border(self) -> Color {
        self.pick((62, 70, 88), (170, 178, 192))
    }

    pub fn accent(self) -> Color {
        to_color(ACCENT_RGB)
    }

    pub fn accent_soft(self) -> Color {
        self.pick((100, 181, 246), (37, 99, 195))
    }

    pub fn link_fg(self) -> Color {
        self.accent_soft()
    }

    pub fn success_fg(self) -> Color {
        self.pick((80, 200, 120), (34, 150, 83))
    }

    pub fn error_fg(self) -> Color {
        self.pick((226, 95, 95), (190, 40, 40))
    }

    pub fn hint_fg(self) -> Color {
        self.window_dim_fg()
    }

    // Gauges (skills window)

    pub fn gauge_filled(self) -> Color {
        self.accent()
    }

    pub fn gauge_empty(self) -> Color {
        self.pick((50, 56, 72), (205, 211, 222))
    }

    // Dialogs / overlays

    pub fn dialog_bg(self) -> Color {
        self.pick((18, 21, 32), (228, 232, 240))
    }

    pub fn dialog_fg(self) -> Color {
        self.menu_fg()
    }

    pub fn dialog_separator(self) -> Color {
        self.window_border()
    }

    // Form inputs

    pub fn input_bg(self) -> Color {
        self.pick((34, 40, 54), (236, 239, 245))
    }

    pub fn input_focus_bg(self) -> Color {
        self.pick((42, 52, 72), (222, 230, 244))
    }

    pub fn input_fg(self) -> Color {
        self.window_fg()
    }
}

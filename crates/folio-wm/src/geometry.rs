//! Geometry primitives shared by the window stack.
//!
//! Origins are signed: a drag may carry a window partly past a viewport
//! edge, and the renderer clips. Sizes are unsigned logical units; the
//! terminal shell uses cells, tests use whatever scale they like.

/// Position and size of one window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Geometry {
    pub left: i32,
    pub top: i32,
    pub width: u32,
    pub height: u32,
}

impl Geometry {
    pub const fn new(left: i32, top: i32, width: u32, height: u32) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    /// Exclusive right edge.
    pub const fn right(&self) -> i32 {
        self.left + self.width as i32
    }

    /// Exclusive bottom edge.
    pub const fn bottom(&self) -> i32 {
        self.top + self.height as i32
    }

    pub fn contains(&self, x: i32, y: i32) -> bool {
        x >= self.left && x < self.right() && y >= self.top && y < self.bottom()
    }
}

/// The managed desktop area, in the same units as [`Geometry`].
///
/// Fixed chrome (top bar, dock) lives outside this rect, so a maximized
/// window that fills the viewport already covers "everything but the
/// chrome" without the manager knowing what the chrome is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub left: i32,
    pub top: i32,
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    pub const fn new(width: u32, height: u32) -> Self {
        Self {
            left: 0,
            top: 0,
            width,
            height,
        }
    }

    pub const fn with_origin(left: i32, top: i32, width: u32, height: u32) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    pub const fn rect(&self) -> Geometry {
        Geometry::new(self.left, self.top, self.width, self.height)
    }
}

/// Units of a window that must remain inside the viewport once a drag ends
/// or the viewport shrinks, so the header stays reachable.
pub const MIN_VISIBLE_MARGIN: u32 = 4;

/// Sizing constants for newly opened windows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
    pub default_width: u32,
    pub default_height: u32,
    pub cascade_step: i32,
}

impl Default for Placement {
    fn default() -> Self {
        Self {
            default_width: 700,
            default_height: 500,
            cascade_step: 30,
        }
    }
}

impl Placement {
    /// Initial geometry for a window opened while `count` others are open:
    /// the default size, offset from the viewport origin by
    /// `cascade_step * count` on both axes. The offset is clamped axis-wise
    /// so the window lies fully inside the viewport whenever it fits, pinned
    /// to the far edge otherwise, and never placed above the origin.
    pub fn cascade(&self, viewport: Viewport, count: usize) -> Geometry {
        let width = self.default_width.min(viewport.width.max(1));
        let height = self.default_height.min(viewport.height.max(1));
        let offset = self.cascade_step.saturating_mul(count as i32);
        let max_left = viewport.left + viewport.width as i32 - width as i32;
        let max_top = viewport.top + viewport.height as i32 - height as i32;
        let left = (viewport.left + offset).min(max_left).max(viewport.left);
        let top = (viewport.top + offset).min(max_top).max(viewport.top);
        Geometry::new(left, top, width, height)
    }
}

/// Nudge `geometry` back so at least [`MIN_VISIBLE_MARGIN`] units overlap
/// the viewport horizontally and vertically. The top edge is additionally
/// floored at the viewport top so the header row can always be grabbed.
/// Geometry already satisfying both constraints is returned unchanged.
pub fn clamp_to_visible_margin(geometry: Geometry, viewport: Viewport) -> Geometry {
    if viewport.width == 0 || viewport.height == 0 {
        return geometry;
    }
    let vp = viewport.rect();
    let margin_x = MIN_VISIBLE_MARGIN.min(geometry.width) as i32;
    let margin_y = MIN_VISIBLE_MARGIN.min(geometry.height) as i32;

    let min_left = vp.left - geometry.width as i32 + margin_x;
    let max_left = vp.right() - margin_x;
    let min_top = vp.top;
    let max_top = vp.bottom() - margin_y;

    let mut out = geometry;
    out.left = out.left.clamp(min_left, max_left.max(min_left));
    out.top = out.top.clamp(min_top, max_top.max(min_top));
    out
}

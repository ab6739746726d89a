//! Render-free window management for the term-folio desktop.
//!
//! [`WindowManager`] owns every window opened over the portfolio's content
//! sections and applies the desktop's stacking rules: monotone z assignment,
//! cascade placement for new windows, minimize/maximize round-trips and
//! pointer drags. Nothing in this crate touches a terminal or a rendering
//! framework; the shell feeds it input intent and reads back the draw order
//! and the dock projection.

mod geometry;
mod manager;

pub use geometry::{Geometry, MIN_VISIBLE_MARGIN, Placement, Viewport, clamp_to_visible_margin};
pub use manager::{DockEntry, WindowManager, WindowRecord, WindowState};

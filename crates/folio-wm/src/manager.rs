//! The window stack: pure state transitions over section windows.
//!
//! Operations are infallible. Any key with no corresponding window is a
//! silent no-op, so callers never pre-validate. After every state-changing
//! operation the manager rebuilds the dock projection that the shell's
//! taskbar renders from; the dock never calls back in.

use std::collections::BTreeMap;
use std::fmt;

use tracing::debug;

use crate::geometry::{Geometry, Placement, Viewport, clamp_to_visible_margin};

/// Lifecycle of one window as observers see it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowState {
    Normal,
    Minimized,
    Maximized,
}

/// One open window.
///
/// `saved` doubles as the maximized flag: it holds the pre-maximize
/// geometry exactly while the window is maximized, so the "saved geometry
/// iff maximized" rule cannot be violated by construction. `minimized` is
/// orthogonal to that mode, which is what lets un-minimize restore the
/// prior visible state (normal or maximized) without bookkeeping.
#[derive(Debug, Clone)]
pub struct WindowRecord<K> {
    key: K,
    geometry: Geometry,
    z: u32,
    saved: Option<Geometry>,
    minimized: bool,
}

impl<K: Copy> WindowRecord<K> {
    pub fn key(&self) -> K {
        self.key
    }

    pub fn geometry(&self) -> Geometry {
        self.geometry
    }

    /// Stacking height. Larger is closer to the viewer; values are unique
    /// among live windows and never reused.
    pub fn z(&self) -> u32 {
        self.z
    }

    pub fn saved_geometry(&self) -> Option<Geometry> {
        self.saved
    }

    pub fn state(&self) -> WindowState {
        if self.minimized {
            WindowState::Minimized
        } else if self.saved.is_some() {
            WindowState::Maximized
        } else {
            WindowState::Normal
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct DragSession<K> {
    key: K,
    pointer_start: (i32, i32),
    origin: (i32, i32),
}

/// Read-only taskbar projection, rebuilt after every state change.
///
/// `active` marks the window holding the highest z, minimized or not; the
/// shell routes input by [`WindowManager::top_visible`] instead when the
/// active window is hidden.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DockEntry<K> {
    pub key: K,
    pub state: WindowState,
    pub active: bool,
}

/// Window stack over keys of type `K` (the shell uses its section enum;
/// tests use anything `Copy + Ord`). At most one window exists per key.
#[derive(Debug)]
pub struct WindowManager<K: Copy + Ord> {
    windows: BTreeMap<K, WindowRecord<K>>,
    /// Next z to hand out. Strictly monotone; closing windows never winds
    /// it back, so a reopened window always lands on top.
    next_z: u32,
    drag: Option<DragSession<K>>,
    viewport: Viewport,
    placement: Placement,
    dock: Vec<DockEntry<K>>,
}

impl<K: Copy + Ord + fmt::Debug> WindowManager<K> {
    pub fn new(viewport: Viewport) -> Self {
        Self {
            windows: BTreeMap::new(),
            next_z: 1,
            drag: None,
            viewport,
            placement: Placement::default(),
            dock: Vec::new(),
        }
    }

    pub fn with_placement(mut self, placement: Placement) -> Self {
        self.placement = placement;
        self
    }

    /// Open the window for `key`, or restore and raise it when it already
    /// exists. New windows get the cascade slot for the current open count.
    pub fn open(&mut self, key: K) {
        if self.windows.contains_key(&key) {
            if let Some(win) = self.windows.get_mut(&key) {
                win.minimized = false;
            }
            self.raise(key);
            debug!(?key, "open: restored existing window");
        } else {
            let geometry = self.placement.cascade(self.viewport, self.windows.len());
            let z = self.alloc_z();
            self.windows.insert(
                key,
                WindowRecord {
                    key,
                    geometry,
                    z,
                    saved: None,
                    minimized: false,
                },
            );
            debug!(?key, z, ?geometry, "open: created window");
        }
        self.refresh_dock();
    }

    /// Remove the window for `key`. The z counter is left alone.
    pub fn close(&mut self, key: K) {
        if self.windows.remove(&key).is_none() {
            return;
        }
        if self.drag.is_some_and(|d| d.key == key) {
            self.drag = None;
        }
        debug!(?key, "close");
        self.refresh_dock();
    }

    /// Remove every window and any live drag session.
    pub fn close_all(&mut self) {
        self.windows.clear();
        self.drag = None;
        debug!("close_all");
        self.refresh_dock();
    }

    /// Toggle the minimized flag. Geometry, z and the maximize mode are
    /// untouched, so restoring lands exactly where the window left off.
    pub fn minimize(&mut self, key: K) {
        let Some(win) = self.windows.get_mut(&key) else {
            return;
        };
        win.minimized = !win.minimized;
        debug!(?key, minimized = win.minimized, "minimize");
        self.refresh_dock();
    }

    /// Toggle between normal and viewport-filling geometry. The restore
    /// geometry survives minimize round-trips; z is untouched either way.
    pub fn maximize(&mut self, key: K) {
        let Some(win) = self.windows.get_mut(&key) else {
            return;
        };
        match win.saved.take() {
            Some(saved) => {
                win.geometry = saved;
                debug!(?key, "maximize: restored saved geometry");
            }
            None => {
                win.saved = Some(win.geometry);
                win.geometry = self.viewport.rect();
                if self.drag.is_some_and(|d| d.key == key) {
                    self.drag = None;
                }
                debug!(?key, "maximize: filled viewport");
            }
        }
        self.refresh_dock();
    }

    /// Raise the window to the top of the stack. The minimized flag is not
    /// cleared; dock clicks that should restore go through [`Self::open`].
    pub fn activate(&mut self, key: K) {
        if !self.windows.contains_key(&key) {
            return;
        }
        self.raise(key);
        self.refresh_dock();
    }

    /// Start a header drag at pointer position (`x`, `y`). Maximized
    /// windows do not drag; raising on grab is the caller's policy, not a
    /// side effect here.
    pub fn begin_drag(&mut self, key: K, x: i32, y: i32) {
        let Some(win) = self.windows.get(&key) else {
            return;
        };
        if win.state() == WindowState::Maximized {
            return;
        }
        self.drag = Some(DragSession {
            key,
            pointer_start: (x, y),
            origin: (win.geometry.left, win.geometry.top),
        });
        debug!(?key, x, y, "begin_drag");
    }

    /// Move the dragged window so its offset from the grab origin equals
    /// the pointer's offset from the grab point. Positions are computed
    /// from the original grab, never accumulated, so jittery intermediate
    /// events cannot drift the window. No viewport clamping happens while
    /// the drag is live.
    pub fn update_drag(&mut self, x: i32, y: i32) {
        let Some(drag) = self.drag else {
            return;
        };
        let Some(win) = self.windows.get_mut(&drag.key) else {
            return;
        };
        win.geometry.left = drag.origin.0 + (x - drag.pointer_start.0);
        win.geometry.top = drag.origin.1 + (y - drag.pointer_start.1);
    }

    /// End any live drag. The released window is nudged back just enough
    /// that a minimum margin of it stays on screen; a drag that never moved
    /// leaves geometry bit-for-bit unchanged.
    pub fn end_drag(&mut self) {
        let Some(drag) = self.drag.take() else {
            return;
        };
        if let Some(win) = self.windows.get_mut(&drag.key) {
            win.geometry = clamp_to_visible_margin(win.geometry, self.viewport);
        }
        debug!(key = ?drag.key, "end_drag");
        self.refresh_dock();
    }

    /// Adopt a new managed area. Maximized windows re-fill it; normal
    /// windows are pulled back inside the visibility margin.
    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.viewport = viewport;
        for win in self.windows.values_mut() {
            if win.saved.is_some() {
                win.geometry = viewport.rect();
            } else {
                win.geometry = clamp_to_visible_margin(win.geometry, viewport);
            }
        }
        self.refresh_dock();
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn placement(&self) -> Placement {
        self.placement
    }

    pub fn is_open(&self, key: K) -> bool {
        self.windows.contains_key(&key)
    }

    pub fn open_count(&self) -> usize {
        self.windows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.windows.is_empty()
    }

    pub fn state_of(&self, key: K) -> Option<WindowState> {
        self.windows.get(&key).map(WindowRecord::state)
    }

    pub fn geometry_of(&self, key: K) -> Option<Geometry> {
        self.windows.get(&key).map(|w| w.geometry)
    }

    pub fn z_of(&self, key: K) -> Option<u32> {
        self.windows.get(&key).map(|w| w.z)
    }

    pub fn saved_geometry_of(&self, key: K) -> Option<Geometry> {
        self.windows.get(&key).and_then(|w| w.saved)
    }

    /// The window holding the highest z, minimized or not. `None` only
    /// when no window is open.
    pub fn active(&self) -> Option<K> {
        self.windows.values().max_by_key(|w| w.z).map(|w| w.key)
    }

    /// The drawn window closest to the viewer, skipping minimized ones.
    pub fn top_visible(&self) -> Option<K> {
        self.visible_back_to_front().last().map(|w| w.key())
    }

    /// Draw order: ascending z, minimized windows excluded.
    pub fn visible_back_to_front(&self) -> Vec<&WindowRecord<K>> {
        let mut order: Vec<&WindowRecord<K>> =
            self.windows.values().filter(|w| !w.minimized).collect();
        order.sort_by_key(|w| w.z);
        order
    }

    /// Topmost visible window containing the point, if any.
    pub fn hit_test(&self, x: i32, y: i32) -> Option<K> {
        self.visible_back_to_front()
            .iter()
            .rev()
            .find(|w| w.geometry().contains(x, y))
            .map(|w| w.key())
    }

    pub fn dock(&self) -> &[DockEntry<K>] {
        &self.dock
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    pub fn drag_target(&self) -> Option<K> {
        self.drag.map(|d| d.key)
    }

    fn alloc_z(&mut self) -> u32 {
        let z = self.next_z;
        self.next_z += 1;
        z
    }

    fn raise(&mut self, key: K) {
        if !self.windows.contains_key(&key) {
            return;
        }
        let z = self.alloc_z();
        if let Some(win) = self.windows.get_mut(&key) {
            win.z = z;
        }
        debug!(?key, z, "raised");
    }

    fn refresh_dock(&mut self) {
        let active = self.active();
        self.dock = self
            .windows
            .values()
            .map(|w| DockEntry {
                key: w.key,
                state: w.state(),
                active: active == Some(w.key),
            })
            .collect();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::MIN_VISIBLE_MARGIN;

    #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
    enum Id {
        Home,
        About,
        Skills,
        Projects,
    }

    fn manager() -> WindowManager<Id> {
        WindowManager::new(Viewport::new(1280, 800))
    }

    #[test]
    fn z_trace_across_open_activate_minimize_close() {
        let mut wm = manager();
        wm.open(Id::About);
        assert_eq!(wm.z_of(Id::About), Some(1));
        wm.open(Id::Projects);
        assert_eq!(wm.z_of(Id::Projects), Some(2));
        assert_eq!(wm.active(), Some(Id::Projects));

        wm.activate(Id::About);
        assert_eq!(wm.z_of(Id::About), Some(3));
        assert_eq!(wm.active(), Some(Id::About));

        wm.minimize(Id::About);
        assert_eq!(wm.state_of(Id::About), Some(WindowState::Minimized));
        assert_eq!(wm.z_of(Id::About), Some(3));

        wm.close(Id::Projects);
        assert!(!wm.is_open(Id::Projects));
        assert!(wm.is_open(Id::About));

        wm.close_all();
        assert!(wm.is_empty());
        assert_eq!(wm.active(), None);
    }

    #[test]
    fn open_existing_restores_and_raises_without_duplicate() {
        let mut wm = manager();
        wm.open(Id::About);
        wm.open(Id::Projects);
        wm.minimize(Id::About);

        wm.open(Id::About);
        assert_eq!(wm.open_count(), 2);
        assert_eq!(wm.state_of(Id::About), Some(WindowState::Normal));
        assert_eq!(wm.active(), Some(Id::About));
        assert_eq!(wm.z_of(Id::About), Some(3));
    }

    #[test]
    fn open_assigns_cascade_slots() {
        let mut wm = manager();
        wm.open(Id::Home);
        wm.open(Id::About);
        wm.open(Id::Skills);
        assert_eq!(wm.geometry_of(Id::Home), Some(Geometry::new(0, 0, 700, 500)));
        assert_eq!(
            wm.geometry_of(Id::Skills),
            Some(Geometry::new(60, 60, 700, 500))
        );
    }

    #[test]
    fn closing_does_not_rewind_the_z_counter() {
        let mut wm = manager();
        wm.open(Id::Home);
        wm.open(Id::About);
        wm.close(Id::About);
        wm.open(Id::Skills);
        assert_eq!(wm.z_of(Id::Skills), Some(3));
    }

    #[test]
    fn ops_on_absent_keys_are_noops() {
        let mut wm = manager();
        wm.open(Id::Home);
        let before = wm.geometry_of(Id::Home);

        wm.close(Id::About);
        wm.minimize(Id::About);
        wm.maximize(Id::About);
        wm.activate(Id::About);
        wm.begin_drag(Id::About, 5, 5);
        wm.update_drag(50, 50);
        wm.end_drag();

        assert_eq!(wm.open_count(), 1);
        assert_eq!(wm.geometry_of(Id::Home), before);
        assert_eq!(wm.z_of(Id::Home), Some(1));
    }

    #[test]
    fn maximize_round_trip_restores_saved_geometry() {
        let mut wm = manager();
        wm.open(Id::Skills);
        wm.begin_drag(Id::Skills, 0, 0);
        wm.update_drag(150, 20);
        wm.end_drag();
        assert_eq!(
            wm.geometry_of(Id::Skills),
            Some(Geometry::new(150, 20, 700, 500))
        );

        wm.maximize(Id::Skills);
        assert_eq!(wm.state_of(Id::Skills), Some(WindowState::Maximized));
        assert_eq!(
            wm.geometry_of(Id::Skills),
            Some(Geometry::new(0, 0, 1280, 800))
        );
        assert_eq!(
            wm.saved_geometry_of(Id::Skills),
            Some(Geometry::new(150, 20, 700, 500))
        );

        wm.maximize(Id::Skills);
        assert_eq!(wm.state_of(Id::Skills), Some(WindowState::Normal));
        assert_eq!(
            wm.geometry_of(Id::Skills),
            Some(Geometry::new(150, 20, 700, 500))
        );
        assert_eq!(wm.saved_geometry_of(Id::Skills), None);
    }

    #[test]
    fn maximize_does_not_change_z() {
        let mut wm = manager();
        wm.open(Id::Home);
        wm.open(Id::About);
        wm.maximize(Id::Home);
        assert_eq!(wm.z_of(Id::Home), Some(1));
        assert_eq!(wm.active(), Some(Id::About));
    }

    #[test]
    fn minimize_round_trip_restores_prior_visible_state() {
        let mut wm = manager();
        wm.open(Id::Home);
        wm.maximize(Id::Home);
        let filled = wm.geometry_of(Id::Home);

        wm.minimize(Id::Home);
        assert_eq!(wm.state_of(Id::Home), Some(WindowState::Minimized));
        wm.minimize(Id::Home);
        assert_eq!(wm.state_of(Id::Home), Some(WindowState::Maximized));
        assert_eq!(wm.geometry_of(Id::Home), filled);

        wm.maximize(Id::Home);
        assert_eq!(wm.state_of(Id::Home), Some(WindowState::Normal));
        assert_eq!(wm.geometry_of(Id::Home), Some(Geometry::new(0, 0, 700, 500)));
    }

    #[test]
    fn activate_does_not_unminimize() {
        let mut wm = manager();
        wm.open(Id::Home);
        wm.open(Id::About);
        wm.minimize(Id::Home);
        wm.activate(Id::Home);
        assert_eq!(wm.state_of(Id::Home), Some(WindowState::Minimized));
        assert_eq!(wm.active(), Some(Id::Home));
        assert_eq!(wm.top_visible(), Some(Id::About));
    }

    #[test]
    fn activate_increments_z_even_when_already_on_top() {
        let mut wm = manager();
        wm.open(Id::Home);
        wm.activate(Id::Home);
        wm.activate(Id::Home);
        assert_eq!(wm.z_of(Id::Home), Some(3));
    }

    #[test]
    fn drag_moves_linearly_from_the_grab_point() {
        let mut wm = manager();
        wm.open(Id::About);
        wm.begin_drag(Id::About, 10, 10);

        wm.update_drag(15, 13);
        assert_eq!(wm.geometry_of(Id::About), Some(Geometry::new(5, 3, 700, 500)));

        // Not cumulative: a pointer jump back past the grab point lands the
        // window at the grab origin plus the new offset.
        wm.update_drag(8, 25);
        assert_eq!(
            wm.geometry_of(Id::About),
            Some(Geometry::new(-2, 15, 700, 500))
        );
    }

    #[test]
    fn drag_without_begin_and_on_maximized_is_refused() {
        let mut wm = manager();
        wm.open(Id::About);
        let before = wm.geometry_of(Id::About);

        wm.update_drag(50, 50);
        wm.end_drag();
        assert_eq!(wm.geometry_of(Id::About), before);

        wm.maximize(Id::About);
        wm.begin_drag(Id::About, 5, 5);
        assert!(!wm.is_dragging());
    }

    #[test]
    fn drag_with_no_movement_leaves_geometry_unchanged() {
        let mut wm = manager();
        wm.open(Id::About);
        wm.begin_drag(Id::About, 40, 12);
        wm.end_drag();
        assert_eq!(wm.geometry_of(Id::About), Some(Geometry::new(0, 0, 700, 500)));
        assert!(!wm.is_dragging());
    }

    #[test]
    fn end_drag_recovers_a_window_pushed_off_screen() {
        let mut wm = manager();
        wm.open(Id::About);
        wm.begin_drag(Id::About, 0, 0);
        wm.update_drag(-2000, 0);
        assert_eq!(wm.geometry_of(Id::About).map(|g| g.left), Some(-2000));

        wm.end_drag();
        let left = wm.geometry_of(Id::About).map(|g| g.left);
        assert_eq!(left, Some(-700 + MIN_VISIBLE_MARGIN as i32));
    }

    #[test]
    fn closing_the_dragged_window_clears_the_session() {
        let mut wm = manager();
        wm.open(Id::About);
        wm.begin_drag(Id::About, 0, 0);
        assert_eq!(wm.drag_target(), Some(Id::About));
        wm.close(Id::About);
        assert!(!wm.is_dragging());
        wm.update_drag(30, 30);
        wm.end_drag();
        assert!(wm.is_empty());
    }

    #[test]
    fn dock_projection_tracks_state_and_active_window() {
        let mut wm = manager();
        assert!(wm.dock().is_empty());
        wm.open(Id::Projects);
        wm.open(Id::About);
        wm.minimize(Id::Projects);

        let dock = wm.dock().to_vec();
        assert_eq!(dock.len(), 2);
        // BTreeMap order: About sorts before Projects.
        assert_eq!(dock[0].key, Id::About);
        assert_eq!(dock[0].state, WindowState::Normal);
        assert!(dock[0].active);
        assert_eq!(dock[1].key, Id::Projects);
        assert_eq!(dock[1].state, WindowState::Minimized);
        assert!(!dock[1].active);

        wm.close_all();
        assert!(wm.dock().is_empty());
    }

    #[test]
    fn maximized_windows_track_viewport_resizes() {
        let mut wm = manager();
        wm.open(Id::Home);
        wm.maximize(Id::Home);
        wm.set_viewport(Viewport::new(1000, 600));
        assert_eq!(
            wm.geometry_of(Id::Home),
            Some(Geometry::new(0, 0, 1000, 600))
        );

        wm.maximize(Id::Home);
        assert_eq!(wm.geometry_of(Id::Home), Some(Geometry::new(0, 0, 700, 500)));
    }

    #[test]
    fn shrinking_the_viewport_pulls_windows_back_inside() {
        let mut wm = manager();
        wm.open(Id::Home);
        wm.begin_drag(Id::Home, 0, 0);
        wm.update_drag(500, 250);
        wm.end_drag();
        assert_eq!(wm.geometry_of(Id::Home).map(|g| g.left), Some(500));

        wm.set_viewport(Viewport::new(300, 200));
        let g = wm.geometry_of(Id::Home).unwrap();
        assert_eq!(g.left, 300 - MIN_VISIBLE_MARGIN as i32);
        assert_eq!(g.top, 200 - MIN_VISIBLE_MARGIN as i32);
    }

    #[test]
    fn hit_test_finds_the_topmost_visible_window() {
        let mut wm = manager();
        wm.open(Id::Home);
        wm.open(Id::About);
        // Cascade puts About at (30, 30); both cover (100, 100).
        assert_eq!(wm.hit_test(100, 100), Some(Id::About));

        wm.activate(Id::Home);
        assert_eq!(wm.hit_test(100, 100), Some(Id::Home));

        wm.minimize(Id::Home);
        assert_eq!(wm.hit_test(100, 100), Some(Id::About));
        assert_eq!(wm.hit_test(-5, -5), None);
    }
}

use std::time::Instant;

use crossterm::event::{
    Event, KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use term_folio::desktop::Desktop;
use term_folio::prefs::{Prefs, PrefsStore};
use term_folio::profile::Profile;
use term_folio::ui::Surface;

fn desktop() -> Desktop {
    let dir = tempfile::tempdir().expect("tempdir");
    let store = PrefsStore::at(dir.path().join("prefs.toml"));
    let profile = Profile::load(None).expect("embedded profile parses");
    Desktop::new(profile, Prefs::default(), store, true, Instant::now())
}

fn key(code: KeyCode) -> Event {
    Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
}

fn mouse(kind: MouseEventKind, column: u16, row: u16) -> Event {
    Event::Mouse(MouseEvent {
        kind,
        column,
        row,
        modifiers: KeyModifiers::NONE,
    })
}

fn render(desktop: &mut Desktop, width: u16, height: u16) -> Buffer {
    let area = Rect {
        x: 0,
        y: 0,
        width,
        height,
    };
    let mut buf = Buffer::empty(area);
    let mut frame = Surface::over(area, &mut buf);
    desktop.render(&mut frame);
    buf
}

/// One string per screen row. Every glyph the desktop draws is one column
/// wide, so `chars().nth(x)` addresses column x.
fn rows(buf: &Buffer) -> Vec<String> {
    let area = *buf.area();
    (area.y..area.y + area.height)
        .map(|y| {
            (area.x..area.x + area.width)
                .filter_map(|x| buf.cell((x, y)))
                .map(|cell| cell.symbol())
                .collect()
        })
        .collect()
}

fn char_at(rows: &[String], x: usize, y: usize) -> Option<char> {
    rows.get(y).and_then(|row| row.chars().nth(x))
}

#[test]
fn maximized_window_refills_the_desktop_across_resizes() {
    let mut d = desktop();
    let _ = render(&mut d, 100, 30);
    d.handle_event(&key(KeyCode::Char('f')), Instant::now());

    // Shrink: the frame hugs the new desktop area under the bar and above
    // the dock.
    let small = rows(&render(&mut d, 60, 20));
    assert_eq!(char_at(&small, 0, 1), Some('┌'));
    assert_eq!(char_at(&small, 59, 1), Some('┐'));
    assert_eq!(char_at(&small, 0, 18), Some('└'));
    assert_eq!(char_at(&small, 59, 18), Some('┘'));
    assert!(small[19].contains("Home"), "dock row survives the resize");

    // Grow back: the frame follows.
    let big = rows(&render(&mut d, 100, 30));
    assert_eq!(char_at(&big, 0, 1), Some('┌'));
    assert_eq!(char_at(&big, 99, 1), Some('┐'));
    assert_eq!(char_at(&big, 99, 28), Some('┘'));
}

#[test]
fn normal_windows_clip_at_the_right_edge_after_a_shrink() {
    let mut d = desktop();
    let _ = render(&mut d, 100, 30);

    // The home window opened 72 wide; a 60-column terminal cannot show its
    // right border, and nothing may wrap or spill.
    let screen = rows(&render(&mut d, 60, 20));
    assert_eq!(char_at(&screen, 0, 1), Some('┌'));
    assert!(!screen[1].contains('┐'));
    assert_eq!(char_at(&screen, 0, 18), Some('└'));
    assert!(!screen[18].contains('┘'));
}

#[test]
fn second_window_cascades_below_and_right_of_the_first() {
    let mut d = desktop();
    let now = Instant::now();
    let _ = render(&mut d, 100, 30);
    d.handle_event(&key(KeyCode::Char('g')), now);
    d.handle_event(&key(KeyCode::Char('a')), now);

    let screen = rows(&render(&mut d, 100, 30));
    // Home keeps its corner at the desktop origin; About lands one cascade
    // step in.
    assert_eq!(char_at(&screen, 0, 1), Some('┌'));
    assert_eq!(char_at(&screen, 2, 3), Some('┌'));
    // Home's left border is still visible beside the new window.
    assert_eq!(char_at(&screen, 0, 3), Some('│'));
}

#[test]
fn drag_release_pulls_the_window_back_to_the_visible_margin() {
    let mut d = desktop();
    let _ = render(&mut d, 100, 30);
    let now = Instant::now();

    // Grab the header away from the controls and fling the window far past
    // the right edge.
    d.handle_event(&mouse(MouseEventKind::Down(MouseButton::Left), 5, 2), now);
    d.handle_event(&mouse(MouseEventKind::Drag(MouseButton::Left), 305, 2), now);
    d.handle_event(&mouse(MouseEventKind::Up(MouseButton::Left), 305, 2), now);

    // The release snaps it back so a grabbable sliver stays on screen.
    let screen = rows(&render(&mut d, 100, 30));
    assert_eq!(char_at(&screen, 96, 1), Some('┌'));
    assert_eq!(char_at(&screen, 97, 1), Some('─'));
    // Its controls sit beyond the edge now.
    assert!(!screen[2].contains('✕'));
}

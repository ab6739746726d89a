//! Terminal I/O behind small traits so the shell can run headless.
//!
//! [`EventSource`] and [`Screen`] are the only seams between the desktop and
//! a live terminal. Integration tests substitute scripted sources and plain
//! buffers for both.

use std::io::{self, Stdout};
use std::time::Duration;

use crossterm::event::{
    self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind, KeyModifiers,
};
use crossterm::execute;
use crossterm::terminal::{self, EnterAlternateScreen, LeaveAlternateScreen};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;

use crate::ui::Surface;

/// Where the shell's input events come from.
pub trait EventSource {
    fn poll(&mut self, timeout: Duration) -> io::Result<bool>;
    fn next_event(&mut self) -> io::Result<Event>;
    fn set_mouse_capture(&mut self, _on: bool) -> io::Result<()> {
        Ok(())
    }
}

/// Owns terminal setup and teardown, and hands out draw surfaces.
pub trait Screen {
    fn enter(&mut self) -> io::Result<()>;
    fn leave(&mut self) -> io::Result<()>;

    fn draw<F>(&mut self, render: F) -> io::Result<()>
    where
        F: FnOnce(Surface<'_>);
}

/// Live crossterm input with key-stream cleanup applied.
#[derive(Default)]
pub struct TerminalEvents {
    filter: KeyFilter,
}

impl TerminalEvents {
    pub fn new() -> Self {
        Self::default()
    }
}

impl EventSource for TerminalEvents {
    fn poll(&mut self, timeout: Duration) -> io::Result<bool> {
        event::poll(timeout)
    }

    fn next_event(&mut self) -> io::Result<Event> {
        loop {
            if let Some(evt) = self.filter.apply(event::read()?) {
                return Ok(evt);
            }
        }
    }

    fn set_mouse_capture(&mut self, on: bool) -> io::Result<()> {
        if on {
            execute!(io::stdout(), EnableMouseCapture)
        } else {
            execute!(io::stdout(), DisableMouseCapture)
        }
    }
}

/// Cleans up the raw key stream before the shell sees it.
///
/// Shift+Tab is folded into a plain `BackTab` since terminals disagree on
/// how to report it. Key releases never reach the shell, and the Windows
/// console additionally emits repeats and a doubled Esc press, both of
/// which are dropped here.
#[derive(Default)]
struct KeyFilter {
    esc_held: bool,
}

impl KeyFilter {
    fn apply(&mut self, evt: Event) -> Option<Event> {
        let Event::Key(mut key) = evt else {
            return Some(evt);
        };
        if key.code == KeyCode::Tab && key.modifiers.contains(KeyModifiers::SHIFT) {
            key.code = KeyCode::BackTab;
            key.modifiers.remove(KeyModifiers::SHIFT);
        }
        match key.kind {
            KeyEventKind::Release => {
                if cfg!(windows) && key.code == KeyCode::Esc {
                    self.esc_held = false;
                }
                return None;
            }
            KeyEventKind::Repeat if cfg!(windows) => return None,
            _ => {}
        }
        if cfg!(windows) {
            let doubled = key.code == KeyCode::Esc && self.esc_held;
            self.esc_held = key.code == KeyCode::Esc;
            if doubled {
                return None;
            }
        }
        Some(Event::Key(key))
    }
}

/// The real terminal, in raw mode on the alternate screen while entered.
pub struct TerminalScreen {
    terminal: Terminal<CrosstermBackend<Stdout>>,
    active: bool,
}

impl TerminalScreen {
    pub fn new() -> io::Result<Self> {
        let backend = CrosstermBackend::new(io::stdout());
        Ok(Self {
            terminal: Terminal::new(backend)?,
            active: false,
        })
    }
}

impl Screen for TerminalScreen {
    fn enter(&mut self) -> io::Result<()> {
        if self.active {
            return Ok(());
        }
        terminal::enable_raw_mode()?;
        execute!(self.terminal.backend_mut(), EnterAlternateScreen)?;
        self.terminal.hide_cursor()?;
        self.active = true;
        Ok(())
    }

    fn leave(&mut self) -> io::Result<()> {
        if !self.active {
            return Ok(());
        }
        terminal::disable_raw_mode()?;
        execute!(
            self.terminal.backend_mut(),
            LeaveAlternateScreen,
            DisableMouseCapture
        )?;
        self.terminal.show_cursor()?;
        self.active = false;
        Ok(())
    }

    fn draw<F>(&mut self, render: F) -> io::Result<()>
    where
        F: FnOnce(Surface<'_>),
    {
        self.terminal
            .draw(|frame| render(Surface::new(frame)))
            .map(|_| ())
            .map_err(|err| io::Error::other(err.to_string()))
    }
}

impl Drop for TerminalScreen {
    fn drop(&mut self) {
        let _ = self.leave();
    }
}

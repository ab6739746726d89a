use std::io;
use std::time::Duration;

use crossterm::event::Event;

use crate::term::EventSource;

/// Tells [`EventLoop::run`] whether to keep pumping.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoopControl {
    Continue,
    Quit,
}

/// Single-threaded pump between the event source and the shell.
///
/// The handler sees `Some(event)` for every input event and `None` once per
/// idle tick. Ticks advance the wallpaper phase and the hero typing effect,
/// so the tick length doubles as the idle redraw rate.
pub struct EventLoop<S> {
    source: S,
    tick: Duration,
}

impl<S: EventSource> EventLoop<S> {
    pub fn new(source: S, tick: Duration) -> Self {
        Self { source, tick }
    }

    pub fn source_mut(&mut self) -> &mut S {
        &mut self.source
    }

    /// Pumps events into `handler` until it asks to quit.
    pub fn run<F>(&mut self, mut handler: F) -> io::Result<()>
    where
        F: FnMut(&mut S, Option<Event>) -> io::Result<LoopControl>,
    {
        loop {
            if handler(&mut self.source, None)? == LoopControl::Quit {
                return Ok(());
            }
            if !self.source.poll(self.tick)? {
                continue;
            }
            // Drags and wheel scrolls arrive in bursts; the whole burst is
            // handled before the next render so input never falls behind.
            loop {
                let event = self.source.next_event()?;
                if handler(&mut self.source, Some(event))? == LoopControl::Quit {
                    return Ok(());
                }
                if !self.source.poll(Duration::ZERO)? {
                    break;
                }
            }
        }
    }
}

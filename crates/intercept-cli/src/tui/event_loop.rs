use std::{
    io,
    time::{Duration, Instant},
};

use crossterm::event::{self, Event};

#[derive(Debug, Clone, derive_more::IsVariant, derive_more::From)]
pub(super) enum TuiEvent {
    /// The tick interval elapsed.
    Tick,
    /// Something changed since the last frame.
    Render,
    Crossterm(Event),
}

/// Produces ticks at a fixed interval and a render after every other event.
///
/// Without a tick interval only terminal events wake the loop.
#[derive(Debug)]
pub(super) struct EventLoop {
    tick_interval: Option<Duration>,
    last_tick: Instant,
    dirty: bool,
}

impl Default for EventLoop {
    fn default() -> Self {
        Self {
            tick_interval: None,
            last_tick: Instant::now(),
            // the first frame is always drawn
            dirty: true,
        }
    }
}

impl EventLoop {
    pub(super) fn set_tick_interval(&mut self, interval: Option<Duration>) {
        self.tick_interval = interval;
        self.last_tick = Instant::now();
    }

    /// Blocks until the next tick, render or terminal event.
    pub(super) fn next(&mut self) -> io::Result<TuiEvent> {
        loop {
            if self.dirty {
                self.dirty = false;
                return Ok(TuiEvent::Render);
            }

            let now = Instant::now();
            if let Some(interval) = self.tick_interval {
                let next_tick = self.last_tick + interval;
                if now >= next_tick {
                    self.last_tick = now;
                    self.dirty = true;
                    return Ok(TuiEvent::Tick);
                }
                if !event::poll(next_tick - now)? {
                    continue;
                }
            }

            self.dirty = true;
            return Ok(event::read()?.into());
        }
    }
}

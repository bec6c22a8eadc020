use std::{io, time::Duration};

use crate::tui::{
    App,
    event_loop::{EventLoop, TuiEvent},
};

/// Owns the event loop and runs an [`App`] on the alternate screen.
#[derive(Default, Debug)]
pub struct Tui {
    events: EventLoop,
}

impl Tui {
    /// Creates a runner with ticking stopped.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the tick rate in ticks per second; `None` stops ticking.
    pub fn set_tick_rate(&mut self, rate: Option<f64>) {
        let interval = rate
            .filter(|rate| *rate > 0.0)
            .and_then(|rate| Duration::try_from_secs_f64(rate.recip()).ok());
        self.events.set_tick_interval(interval);
    }

    /// Runs `app` until it asks to exit.
    ///
    /// Ticks call [`App::update`], renders call [`App::draw`] and terminal events call
    /// [`App::handle_event`].
    pub fn run<A>(mut self, app: &mut A) -> io::Result<()>
    where
        A: App,
    {
        app.init(&mut self);

        ratatui::run(|terminal| {
            while !app.should_exit() {
                match self.events.next()? {
                    TuiEvent::Tick => app.update(&mut self),
                    TuiEvent::Render => {
                        terminal.draw(|f| app.draw(f))?;
                    }
                    TuiEvent::Crossterm(event) => app.handle_event(&mut self, &event),
                }
            }
            Ok(())
        })
    }
}

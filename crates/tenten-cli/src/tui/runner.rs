use std::time::Duration;

use crate::tui::{
    App,
    event_loop::{EventLoop, TuiEvent},
};

#[derive(Default, Debug)]
pub struct Tui {
    events: EventLoop,
}

impl Tui {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the number of ticks per second. A rate of zero stops ticking.
    pub fn set_tick_rate(&mut self, rate: f64) {
        let interval = (rate > 0.0).then(|| Duration::from_secs_f64(1.0 / rate));
        self.events.set_tick_interval(interval);
    }

    /// Runs `app` until it asks to exit.
    ///
    /// The terminal is switched to the alternate screen for the duration
    /// and restored afterwards, also on error.
    pub fn run<A>(mut self, app: &mut A) -> anyhow::Result<()>
    where
        A: App,
    {
        app.init(&mut self);

        ratatui::run(|terminal| {
            while !app.should_exit() {
                match self.events.next()? {
                    TuiEvent::Tick => app.update(&mut self),
                    TuiEvent::Render => {
                        terminal.draw(|frame| app.draw(frame))?;
                    }
                    TuiEvent::Crossterm(event) => app.handle_event(&mut self, &event),
                }
            }
            Ok(())
        })
    }
}

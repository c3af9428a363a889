use crossterm::event::Event;
use ratatui::Frame;

use crate::{
    command::play::screens::Screen,
    tui::{App, Tui},
};

#[derive(Debug)]
pub struct PlayApp {
    screen: Screen,
    tick_rate: f64,
}

impl PlayApp {
    pub fn new(screen: Screen) -> Self {
        Self {
            screen,
            tick_rate: 0.0,
        }
    }

    #[expect(clippy::float_cmp)]
    fn sync_tick_rate(&mut self, tui: &mut Tui) {
        let rate = self.screen.tick_rate();
        if rate != self.tick_rate {
            self.tick_rate = rate;
            tui.set_tick_rate(rate);
        }
    }
}

impl App for PlayApp {
    fn init(&mut self, tui: &mut Tui) {
        self.sync_tick_rate(tui);
    }

    fn should_exit(&self) -> bool {
        self.screen.should_exit()
    }

    fn handle_event(&mut self, tui: &mut Tui, event: &Event) {
        self.screen.handle_event(event);
        self.sync_tick_rate(tui);
    }

    fn draw(&self, frame: &mut Frame) {
        self.screen.draw(frame);
    }

    fn update(&mut self, _tui: &mut Tui) {
        if self.screen.is_playing() {
            self.screen.update();
        }
    }
}

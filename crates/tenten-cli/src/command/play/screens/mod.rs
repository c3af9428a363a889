use crossterm::event::Event;
use ratatui::Frame;
use tenten_engine::ShapeSeed;
use tenten_neural::Network;

use crate::command::play::screens::{auto::AutoPlayScreen, manual::ManualPlayScreen};

mod auto;
mod manual;

#[derive(Debug)]
pub enum Screen {
    Manual(ManualPlayScreen),
    Auto(AutoPlayScreen),
}

impl Screen {
    pub fn manual(seed: ShapeSeed) -> Self {
        Screen::Manual(ManualPlayScreen::new(seed))
    }

    pub fn auto(network: Network, seed: ShapeSeed, speed: f64) -> Self {
        Screen::Auto(AutoPlayScreen::new(network, seed, speed))
    }

    /// Moves per second made without user input, zero for manual play.
    pub fn tick_rate(&self) -> f64 {
        match self {
            Screen::Manual(_) => 0.0,
            Screen::Auto(screen) => screen.speed(),
        }
    }

    pub fn is_playing(&self) -> bool {
        match self {
            Screen::Manual(_) => false,
            Screen::Auto(screen) => screen.is_playing(),
        }
    }

    pub fn should_exit(&self) -> bool {
        match self {
            Screen::Manual(screen) => screen.should_exit(),
            Screen::Auto(screen) => screen.should_exit(),
        }
    }

    pub fn draw(&self, frame: &mut Frame<'_>) {
        match self {
            Screen::Manual(screen) => screen.draw(frame),
            Screen::Auto(screen) => screen.draw(frame),
        }
    }

    pub fn handle_event(&mut self, event: &Event) {
        match self {
            Screen::Manual(screen) => screen.handle_event(event),
            Screen::Auto(screen) => screen.handle_event(event),
        }
    }

    pub fn update(&mut self) {
        if let Screen::Auto(screen) = self {
            screen.update();
        }
    }
}

use crossterm::event::{Event, KeyCode};
use ratatui::{
    Frame,
    layout::{Constraint, Layout},
    style::{Color, Style},
    text::Text,
};
use tenten_engine::{GameError, GameState, PlaceOutcome, ShapeSeed};
use tenten_neural::Network;
use tenten_training::control::{self, Move};

use crate::ui::widgets::GameDisplay;

const MIN_SPEED: f64 = 0.5;
const MAX_SPEED: f64 = 64.0;

#[derive(Debug)]
pub struct AutoPlayScreen {
    game: GameState,
    network: Network,
    moves: usize,
    last_turn: Option<(Move, Result<PlaceOutcome, GameError>)>,
    speed: f64,
    paused: bool,
    is_exiting: bool,
}

impl AutoPlayScreen {
    pub fn new(network: Network, seed: ShapeSeed, speed: f64) -> Self {
        Self {
            game: GameState::with_seed(seed),
            network,
            moves: 0,
            last_turn: None,
            speed: speed.clamp(MIN_SPEED, MAX_SPEED),
            paused: false,
            is_exiting: false,
        }
    }

    pub fn is_playing(&self) -> bool {
        !self.is_exiting && !self.paused && !self.game.is_game_over()
    }

    pub fn should_exit(&self) -> bool {
        self.is_exiting
    }

    /// Moves per second.
    pub fn speed(&self) -> f64 {
        self.speed
    }

    pub fn draw(&self, frame: &mut Frame<'_>) {
        let display = GameDisplay::new(&self.game, self.moves);
        let help_text = if self.game.is_game_over() {
            "Controls: N (New Game) | Q (Quit)".to_owned()
        } else if self.paused {
            "Controls: P (Resume) | S (Step) | Q (Quit)".to_owned()
        } else {
            format!(
                "Controls: + - (Speed: {} moves/s) | P (Pause) | Q (Quit)",
                self.speed
            )
        };
        let help_text = Text::from(help_text)
            .style(Style::default().fg(Color::DarkGray))
            .centered();
        let last_turn = self
            .last_turn
            .as_ref()
            .map(|(m, result)| {
                let outcome = match result {
                    Ok(outcome) => format!("+{} points", outcome.points),
                    Err(e) => e.to_string(),
                };
                format!("slot {} at ({}, {}): {outcome}", m.slot, m.x, m.y)
            })
            .unwrap_or_default();
        let last_turn = Text::from(last_turn)
            .style(Style::default().fg(Color::Yellow))
            .centered();

        let [main_area, message_area, help_area] = Layout::vertical([
            Constraint::Length(GameDisplay::HEIGHT),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .areas::<3>(frame.area());
        frame.render_widget(display, main_area);
        frame.render_widget(last_turn, message_area);
        frame.render_widget(help_text, help_area);
    }

    pub fn handle_event(&mut self, event: &Event) {
        let is_over = self.game.is_game_over();
        if let Some(event) = event.as_key_event() {
            match event.code {
                KeyCode::Char('+') => self.speed = (self.speed * 2.0).min(MAX_SPEED),
                KeyCode::Char('-') => self.speed = (self.speed / 2.0).max(MIN_SPEED),
                KeyCode::Char('p') if !is_over => self.paused = !self.paused,
                KeyCode::Char('s') if self.paused && !is_over => self.play_turn(),
                KeyCode::Char('n') => {
                    self.game = GameState::with_seed(rand::random());
                    self.moves = 0;
                    self.last_turn = None;
                }
                KeyCode::Char('q') | KeyCode::Esc => self.is_exiting = true,
                _ => {}
            }
        }
    }

    pub fn update(&mut self) {
        self.play_turn();
    }

    fn play_turn(&mut self) {
        if self.game.is_game_over() {
            return;
        }
        let turn = control::play_turn(&mut self.network, &mut self.game);
        self.moves += 1;
        self.last_turn = Some(turn);
    }
}

#[cfg(test)]
mod tests {
    use crossterm::event::{KeyEvent, KeyModifiers};
    use rand::SeedableRng as _;

    use super::*;
    use crate::util;

    fn press(screen: &mut AutoPlayScreen, code: KeyCode) {
        screen.handle_event(&Event::Key(KeyEvent::new(code, KeyModifiers::NONE)));
    }

    fn screen() -> AutoPlayScreen {
        let mut rng = rand::rngs::StdRng::seed_from_u64(9);
        let network = Network::new(&util::network_layout(&[4]), &mut rng);
        AutoPlayScreen::new(network, ShapeSeed::from_u64(9), 4.0)
    }

    #[test]
    fn test_plays_until_game_over() {
        let mut screen = screen();
        while !screen.game.is_game_over() {
            assert!(screen.is_playing());
            screen.update();
        }
        let moves = screen.moves;
        screen.update();
        assert_eq!(screen.moves, moves);
        assert!(screen.last_turn.is_some());
    }

    #[test]
    fn test_speed_limits() {
        let mut screen = screen();
        for _ in 0..10 {
            press(&mut screen, KeyCode::Char('+'));
        }
        assert_eq!(screen.speed(), MAX_SPEED);
        for _ in 0..10 {
            press(&mut screen, KeyCode::Char('-'));
        }
        assert_eq!(screen.speed(), MIN_SPEED);
    }

    #[test]
    fn test_pause_and_step() {
        let mut screen = screen();
        press(&mut screen, KeyCode::Char('p'));
        assert!(!screen.is_playing());
        press(&mut screen, KeyCode::Char('s'));
        assert_eq!(screen.moves, 1);
    }
}

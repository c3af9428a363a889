use crossterm::event::{Event, KeyCode};
use ratatui::{
    Frame,
    layout::{Constraint, Layout},
    style::{Color, Style},
    text::Text,
};
use tenten_engine::{BOARD_SIZE, GameError, GameState, ShapeSeed, Slot};

use crate::ui::widgets::{GameDisplay, Preview};

#[derive(Debug)]
pub struct ManualPlayScreen {
    game: GameState,
    moves: usize,
    cursor: (usize, usize),
    selected: Slot,
    message: Option<String>,
    is_exiting: bool,
}

impl ManualPlayScreen {
    pub fn new(seed: ShapeSeed) -> Self {
        Self {
            game: GameState::with_seed(seed),
            moves: 0,
            cursor: (0, 0),
            selected: Slot::A,
            message: None,
            is_exiting: false,
        }
    }

    pub fn should_exit(&self) -> bool {
        self.is_exiting
    }

    pub fn draw(&self, frame: &mut Frame<'_>) {
        let piece = self.game.slot(self.selected);
        let (x, y) = self.cursor;
        let mut display = GameDisplay::new(&self.game, self.moves);
        if !self.game.is_game_over() {
            display = display.selected(self.selected);
            if !piece.is_empty() {
                display = display.preview(Preview {
                    piece,
                    x,
                    y,
                    fits: self.fits_at_cursor(),
                });
            }
        }

        let help_text = if self.game.is_game_over() {
            "Controls: N (New Game) | Q (Quit)"
        } else {
            "Controls: ← → ↑ ↓ (Move) | 1 2 3 (Slot) | Tab (Next Slot) | Enter (Place) | N (New Game) | Q (Quit)"
        };
        let help_text = Text::from(help_text)
            .style(Style::default().fg(Color::DarkGray))
            .centered();
        let message = Text::from(self.message.as_deref().unwrap_or_default())
            .style(Style::default().fg(Color::Yellow))
            .centered();

        let [main_area, message_area, help_area] = Layout::vertical([
            Constraint::Length(GameDisplay::HEIGHT),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .areas::<3>(frame.area());
        frame.render_widget(display, main_area);
        frame.render_widget(message, message_area);
        frame.render_widget(help_text, help_area);
    }

    pub fn handle_event(&mut self, event: &Event) {
        let is_playing = !self.game.is_game_over();
        if let Some(event) = event.as_key_event() {
            match event.code {
                KeyCode::Up if is_playing => self.move_cursor(-1, 0),
                KeyCode::Down if is_playing => self.move_cursor(1, 0),
                KeyCode::Left if is_playing => self.move_cursor(0, -1),
                KeyCode::Right if is_playing => self.move_cursor(0, 1),
                KeyCode::Char('1') if is_playing => self.selected = Slot::A,
                KeyCode::Char('2') if is_playing => self.selected = Slot::B,
                KeyCode::Char('3') if is_playing => self.selected = Slot::C,
                KeyCode::Tab if is_playing => self.select_next_filled(),
                KeyCode::Enter | KeyCode::Char(' ') if is_playing => self.place(),
                KeyCode::Char('n') => *self = Self::new(rand::random()),
                KeyCode::Char('q') | KeyCode::Esc => self.is_exiting = true,
                _ => {}
            }
        }
    }

    fn move_cursor(&mut self, dx: isize, dy: isize) {
        let step = |v: usize, d: isize| v.saturating_add_signed(d).min(BOARD_SIZE - 1);
        self.cursor = (step(self.cursor.0, dx), step(self.cursor.1, dy));
    }

    fn fits_at_cursor(&self) -> bool {
        let (x, y) = self.cursor;
        self.game
            .legal_placements(self.selected)
            .any(|origin| origin == (x, y))
    }

    fn select_next_filled(&mut self) {
        let start = self.selected.index();
        if let Some(slot) = (1..=Slot::ALL.len())
            .filter_map(|offset| Slot::from_index((start + offset) % Slot::ALL.len()))
            .find(|slot| !self.game.slot(*slot).is_empty())
        {
            self.selected = slot;
        }
    }

    /// Places the selected piece at the cursor.
    ///
    /// A move that would be illegal is refused here instead of being sent
    /// to the game, where it would end the session.
    fn place(&mut self) {
        if self.game.slot(self.selected).is_empty() {
            self.message = Some(format!("slot {} is empty", self.selected));
            return;
        }
        if !self.fits_at_cursor() {
            self.message = Some(format!("piece {} does not fit here", self.selected));
            return;
        }

        let (x, y) = self.cursor;
        #[expect(clippy::cast_possible_wrap)]
        let result = self.game.place(self.selected, x as isize, y as isize);
        self.moves += 1;
        self.message = match result {
            Ok(outcome) if outcome.cleared.count() > 0 => Some(format!(
                "+{} points, {} lines cleared",
                outcome.points,
                outcome.cleared.count()
            )),
            Ok(outcome) => Some(format!("+{} points", outcome.points)),
            Err(GameError::GameOver) => {
                Some(format!("no more moves, final score {}", self.game.score()))
            }
            Err(e) => Some(e.to_string()),
        };
        if self.game.slot(self.selected).is_empty() {
            self.select_next_filled();
        }
    }
}

#[cfg(test)]
mod tests {
    use crossterm::event::{KeyEvent, KeyModifiers};
    use tenten_engine::{Board, Shape};

    use super::*;

    fn press(screen: &mut ManualPlayScreen, code: KeyCode) {
        screen.handle_event(&Event::Key(KeyEvent::new(code, KeyModifiers::NONE)));
    }

    fn screen_with(slots: [Option<Shape>; 3]) -> ManualPlayScreen {
        let mut screen = ManualPlayScreen::new(ShapeSeed::from_u64(1));
        screen.game = GameState::with_layout(Board::EMPTY, slots, ShapeSeed::from_u64(1));
        screen
    }

    #[test]
    fn test_cursor_stays_on_board() {
        let mut screen = screen_with([Some(Shape::Dot), None, None]);
        press(&mut screen, KeyCode::Up);
        press(&mut screen, KeyCode::Left);
        assert_eq!(screen.cursor, (0, 0));
        for _ in 0..15 {
            press(&mut screen, KeyCode::Down);
            press(&mut screen, KeyCode::Right);
        }
        assert_eq!(screen.cursor, (9, 9));
    }

    #[test]
    fn test_place_and_select_next() {
        let mut screen = screen_with([Some(Shape::Dot), None, Some(Shape::TwoHorizontal)]);
        press(&mut screen, KeyCode::Down);
        press(&mut screen, KeyCode::Enter);

        assert_eq!(screen.game.score(), 1);
        assert!(screen.game.board().is_occupied(1, 0));
        assert_eq!(screen.moves, 1);
        assert_eq!(screen.selected, Slot::C);
    }

    #[test]
    fn test_illegal_move_is_refused() {
        let mut screen = screen_with([Some(Shape::FiveHorizontal), None, None]);
        press(&mut screen, KeyCode::Char('2'));
        press(&mut screen, KeyCode::Enter);
        assert_eq!(screen.message.as_deref(), Some("slot B is empty"));

        press(&mut screen, KeyCode::Char('1'));
        for _ in 0..6 {
            press(&mut screen, KeyCode::Right);
        }
        press(&mut screen, KeyCode::Enter);
        assert_eq!(screen.message.as_deref(), Some("piece A does not fit here"));
        assert!(!screen.game.is_game_over());
        assert_eq!(screen.game.score(), 0);
    }

    #[test]
    fn test_quit() {
        let mut screen = screen_with([Some(Shape::Dot), None, None]);
        press(&mut screen, KeyCode::Char('q'));
        assert!(screen.should_exit());
    }
}

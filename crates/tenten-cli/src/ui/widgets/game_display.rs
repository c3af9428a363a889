use ratatui::{
    layout::{Constraint, Flex, Layout},
    prelude::{Buffer, Rect},
    text::{Line, Text},
    widgets::{Block, Padding, Paragraph, Widget},
};
use tenten_engine::{GameState, Slot};

use crate::ui::widgets::{BoardDisplay, Preview, SlotDisplay, color, style};

/// The board, the three slots and a stats panel side by side.
#[derive(Debug)]
pub struct GameDisplay<'a> {
    game: &'a GameState,
    moves: usize,
    selected: Option<Slot>,
    preview: Option<Preview<'a>>,
}

impl<'a> GameDisplay<'a> {
    pub fn new(game: &'a GameState, moves: usize) -> Self {
        Self {
            game,
            moves,
            selected: None,
            preview: None,
        }
    }

    pub fn selected(self, slot: Slot) -> Self {
        Self {
            selected: Some(slot),
            ..self
        }
    }

    pub fn preview(self, preview: Preview<'a>) -> Self {
        Self {
            preview: Some(preview),
            ..self
        }
    }

    /// Rows needed to show the whole widget.
    pub const HEIGHT: u16 = 23;
}

impl Widget for GameDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Widget::render(&self, area, buf);
    }
}

impl Widget for &GameDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let border_style = if self.game.is_game_over() {
            color::RED
        } else {
            color::WHITE
        };
        let panel = |title: &'static str| {
            Block::bordered()
                .title(Line::from(title).centered())
                .padding(Padding::horizontal(1))
                .border_style(border_style)
                .style(style::DEFAULT)
        };

        let board = {
            let widget = BoardDisplay::new(self.game.board()).block(
                Block::bordered()
                    .border_style(border_style)
                    .style(style::DEFAULT),
            );
            match self.preview {
                Some(preview) => widget.preview(preview),
                None => widget,
            }
        };
        let slots = Slot::ALL.map(|slot| {
            let title = match slot {
                Slot::A => "A",
                Slot::B => "B",
                Slot::C => "C",
            };
            let block = panel(title);
            let block = if self.selected == Some(slot) {
                block.border_style(color::YELLOW)
            } else {
                block
            };
            SlotDisplay::new(self.game.slot(slot)).block(block)
        });
        let status = if self.game.is_game_over() {
            "GAME OVER"
        } else {
            "PLAYING"
        };
        let stats = Paragraph::new(Text::from(vec![
            Line::from("SCORE"),
            Line::from(format!("{:>9}", self.game.score())),
            Line::from(""),
            Line::from("MOVES"),
            Line::from(format!("{:>9}", self.moves)),
            Line::from(""),
            Line::from(status),
        ]))
        .block(panel("STATS"));

        let [stats_column, board_column, slots_column] = Layout::horizontal([
            Constraint::Length(13),
            Constraint::Length(board.width()),
            Constraint::Length(slots[0].width()),
        ])
        .flex(Flex::Center)
        .spacing(1)
        .areas(area);

        let [stats_area] = Layout::vertical([Constraint::Length(9)]).areas(stats_column);
        let [board_area] = Layout::vertical([Constraint::Length(board.height())]).areas(board_column);
        let slot_areas: [Rect; 3] =
            Layout::vertical(slots.iter().map(|s| Constraint::Length(s.height())))
                .spacing(1)
                .areas(slots_column);

        stats.render(stats_area, buf);
        board.render(board_area, buf);
        for (slot, slot_area) in slots.iter().zip(slot_areas) {
            slot.render(slot_area, buf);
        }
    }
}

use std::iter;

use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Flex, Layout, Rect},
    widgets::{Block as BlockWidget, BlockExt as _, Widget},
};
use tenten_engine::{PIECE_SIZE, PieceGrid};

use crate::ui::widgets::CellDisplay;

#[derive(Debug)]
pub struct SlotDisplay<'a> {
    piece: &'a PieceGrid,
    block: Option<BlockWidget<'a>>,
}

impl<'a> SlotDisplay<'a> {
    pub fn new(piece: &'a PieceGrid) -> Self {
        Self { piece, block: None }
    }

    pub fn block(self, block: BlockWidget<'a>) -> Self {
        Self {
            block: Some(block),
            ..self
        }
    }

    #[allow(clippy::cast_possible_truncation)]
    pub fn width(&self) -> u16 {
        PIECE_SIZE as u16 * CellDisplay::width() + super::block_horizontal_margin(self.block.as_ref())
    }

    #[allow(clippy::cast_possible_truncation)]
    pub fn height(&self) -> u16 {
        PIECE_SIZE as u16 * CellDisplay::height() + super::block_vertical_margin(self.block.as_ref())
    }
}

impl Widget for SlotDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Widget::render(&self, area, buf);
    }
}

impl Widget for &SlotDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        self.block.as_ref().render(area, buf);
        let area = self.block.inner_if_some(area);

        let col_constraints = (0..PIECE_SIZE).map(|_| Constraint::Length(CellDisplay::width()));
        let row_constraints = (0..PIECE_SIZE).map(|_| Constraint::Length(CellDisplay::height()));
        let horizontal = Layout::horizontal(col_constraints).flex(Flex::Center);
        let vertical = Layout::vertical(row_constraints);
        let grid_rows = area
            .layout::<PIECE_SIZE>(&vertical)
            .into_iter()
            .map(|row| row.layout::<PIECE_SIZE>(&horizontal));

        for (grid_row, cells) in iter::zip(grid_rows, self.piece.rows()) {
            for (grid_cell, element) in iter::zip(grid_row, cells) {
                CellDisplay::from_element(*element, false).render(grid_cell, buf);
            }
        }
    }
}

use std::iter;

use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Flex, Layout, Rect},
    widgets::{Block as BlockWidget, BlockExt as _, Widget},
};
use tenten_engine::{BOARD_SIZE, Board, BoardElement, PIECE_SIZE, PieceGrid};

use crate::ui::widgets::CellDisplay;

/// A piece drawn on top of the board at a prospective origin.
#[derive(Debug, Clone, Copy)]
pub struct Preview<'a> {
    pub piece: &'a PieceGrid,
    pub x: usize,
    pub y: usize,
    pub fits: bool,
}

impl Preview<'_> {
    fn element_at(&self, row: usize, col: usize) -> Option<BoardElement> {
        let dx = row.checked_sub(self.x)?;
        let dy = col.checked_sub(self.y)?;
        if dx >= PIECE_SIZE || dy >= PIECE_SIZE {
            return None;
        }
        self.piece.get(dx, dy).filter(|e| e.is_occupied())
    }
}

#[derive(Debug)]
pub struct BoardDisplay<'a> {
    board: &'a Board,
    preview: Option<Preview<'a>>,
    block: Option<BlockWidget<'a>>,
}

impl<'a> BoardDisplay<'a> {
    pub fn new(board: &'a Board) -> Self {
        Self {
            board,
            preview: None,
            block: None,
        }
    }

    pub fn preview(self, preview: Preview<'a>) -> Self {
        Self {
            preview: Some(preview),
            ..self
        }
    }

    pub fn block(self, block: BlockWidget<'a>) -> Self {
        Self {
            block: Some(block),
            ..self
        }
    }

    #[allow(clippy::cast_possible_truncation)]
    pub fn width(&self) -> u16 {
        BOARD_SIZE as u16 * CellDisplay::width() + super::block_horizontal_margin(self.block.as_ref())
    }

    #[allow(clippy::cast_possible_truncation)]
    pub fn height(&self) -> u16 {
        BOARD_SIZE as u16 * CellDisplay::height() + super::block_vertical_margin(self.block.as_ref())
    }

    fn cell(&self, row: usize, col: usize, element: BoardElement) -> CellDisplay {
        let previewed = self
            .preview
            .as_ref()
            .and_then(|p| Some((p.fits, p.element_at(row, col)?)));
        match previewed {
            Some((true, piece)) => CellDisplay::preview(piece),
            Some((false, _)) if element.is_occupied() => CellDisplay::blocked(),
            Some((false, piece)) => CellDisplay::preview(piece),
            None => CellDisplay::from_element(element, true),
        }
    }
}

impl Widget for BoardDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Widget::render(&self, area, buf);
    }
}

impl Widget for &BoardDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        self.block.as_ref().render(area, buf);
        let area = self.block.inner_if_some(area);

        let col_constraints = (0..BOARD_SIZE).map(|_| Constraint::Length(CellDisplay::width()));
        let row_constraints = (0..BOARD_SIZE).map(|_| Constraint::Length(CellDisplay::height()));
        let horizontal = Layout::horizontal(col_constraints).flex(Flex::Center);
        let vertical = Layout::vertical(row_constraints);

        let grid_cells = area
            .layout::<BOARD_SIZE>(&vertical)
            .into_iter()
            .map(|row| row.layout::<BOARD_SIZE>(&horizontal));

        for (row, (grid_row, cells)) in iter::zip(grid_cells, self.board.rows()).enumerate() {
            for (col, (grid_cell, element)) in iter::zip(grid_row, cells).enumerate() {
                self.cell(row, col, *element).render(grid_cell, buf);
            }
        }
    }
}

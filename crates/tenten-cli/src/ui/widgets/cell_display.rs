use ratatui::{
    prelude::{Buffer, Rect},
    style::Style,
    widgets::{Paragraph, Widget},
};
use tenten_engine::BoardElement;

use crate::ui::widgets::style;

/// One board or piece cell, two columns wide.
#[derive(Debug, Clone, Copy)]
pub struct CellDisplay {
    style: Style,
    symbol: &'static str,
}

impl CellDisplay {
    pub const fn new(style: Style, symbol: &'static str) -> Self {
        Self { style, symbol }
    }

    pub fn width() -> u16 {
        2
    }

    pub fn height() -> u16 {
        1
    }

    pub fn from_element(element: BoardElement, show_dots: bool) -> Self {
        match element {
            BoardElement::None if show_dots => Self::new(style::EMPTY_DOT, "."),
            element => Self::new(style::element(element), ""),
        }
    }

    pub fn preview(element: BoardElement) -> Self {
        Self::new(style::preview(element), "[]")
    }

    pub fn blocked() -> Self {
        Self::new(style::BLOCKED, "><")
    }
}

impl Widget for CellDisplay {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Widget::render(&self, area, buf);
    }
}

impl Widget for &CellDisplay {
    fn render(self, area: Rect, buf: &mut Buffer) {
        // Paragraph paints the whole area, not just the cells under the symbol
        Paragraph::new(self.symbol)
            .style(self.style)
            .centered()
            .render(area, buf);
    }
}

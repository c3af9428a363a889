use ratatui::{layout::Rect, widgets::Block as BlockWidget};

pub use self::{board_display::*, cell_display::*, game_display::*, slot_display::*};

mod board_display;
mod cell_display;
mod game_display;
mod slot_display;

mod color {
    use ratatui::style::Color;
    use tenten_engine::BoardElement;

    pub const RED: Color = Color::Rgb(255, 0, 0);
    pub const GREEN: Color = Color::Rgb(0, 255, 0);
    pub const YELLOW: Color = Color::Rgb(255, 255, 0);
    pub const BLUE: Color = Color::Rgb(0, 0, 255);
    pub const MAGENTA: Color = Color::Rgb(255, 0, 255);
    pub const CYAN: Color = Color::Rgb(0, 255, 255);
    pub const WHITE: Color = Color::Rgb(255, 255, 255);
    pub const GRAY: Color = Color::Rgb(127, 127, 127);
    pub const BLACK: Color = Color::Rgb(0, 0, 0);

    pub const fn of_element(element: BoardElement) -> Color {
        match element {
            BoardElement::None => BLACK,
            BoardElement::Red => RED,
            BoardElement::Green => GREEN,
            BoardElement::Yellow => YELLOW,
            BoardElement::Blue => BLUE,
            BoardElement::Magenta => MAGENTA,
            BoardElement::Cyan => CYAN,
            BoardElement::White => WHITE,
        }
    }
}

pub mod style {
    use ratatui::style::{Color, Style};
    use tenten_engine::BoardElement;

    use crate::ui::widgets::color;

    const fn fg_bg(fg: Color, bg: Color) -> Style {
        Style::new().fg(fg).bg(bg)
    }

    const fn bg_only(color: Color) -> Style {
        Style::new().fg(color).bg(color)
    }

    pub const DEFAULT: Style = fg_bg(color::WHITE, color::BLACK);
    pub const EMPTY_DOT: Style = fg_bg(color::GRAY, color::BLACK);
    pub const BLOCKED: Style = fg_bg(color::WHITE, color::RED);

    pub const fn element(element: BoardElement) -> Style {
        bg_only(color::of_element(element))
    }

    /// A piece hovering over the board before it is placed.
    pub const fn preview(element: BoardElement) -> Style {
        fg_bg(color::BLACK, color::of_element(element))
    }
}

fn block_vertical_margin(block: Option<&BlockWidget>) -> u16 {
    let dummy_rect = Rect::new(0, 0, 100, 100);
    let inner_rect = block.map_or(dummy_rect, |block| block.inner(dummy_rect));
    dummy_rect.height - inner_rect.height
}

fn block_horizontal_margin(block: Option<&BlockWidget>) -> u16 {
    let dummy_rect = Rect::new(0, 0, 100, 100);
    let inner_rect = block.map_or(dummy_rect, |block| block.inner(dummy_rect));
    dummy_rect.width - inner_rect.width
}

use std::{
    fmt::{self, Write as _},
    io::{self, Write},
};

use crossterm::{
    cursor::MoveTo,
    execute,
    style::{Color, Stylize as _},
    terminal::{Clear, ClearType},
};
use tenten_engine::{BoardElement, GameState, Grid};

/// How cells are painted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Palette {
    /// Two spaces on the element's background color.
    #[default]
    Colored,
    /// The element's letter twice, `..` for empty cells.
    Plain,
}

impl Palette {
    fn paint(self, out: &mut String, element: BoardElement) {
        match self {
            Palette::Colored => {
                let color = match element {
                    BoardElement::None => Color::Black,
                    BoardElement::Red => Color::DarkRed,
                    BoardElement::Green => Color::DarkGreen,
                    BoardElement::Yellow => Color::DarkYellow,
                    BoardElement::Blue => Color::DarkBlue,
                    BoardElement::Magenta => Color::DarkMagenta,
                    BoardElement::Cyan => Color::DarkCyan,
                    BoardElement::White => Color::Grey,
                };
                let _ = write!(out, "{}", "  ".on(color));
            }
            Palette::Plain => {
                let c = element.as_char();
                out.push(c);
                out.push(c);
            }
        }
    }
}

/// A block of text lines with a known on-screen width.
///
/// The width is tracked separately because colored lines contain escape
/// sequences that take no space on screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Drawing {
    lines: Vec<String>,
    width: usize,
}

impl Drawing {
    /// Places drawings next to each other, top-aligned.
    pub fn beside(drawings: &[Drawing], separator: &str) -> Drawing {
        let height = drawings.iter().map(|d| d.lines.len()).max().unwrap_or(0);
        let lines = (0..height)
            .map(|row| {
                let mut line = String::new();
                for (i, drawing) in drawings.iter().enumerate() {
                    if i > 0 {
                        line.push_str(separator);
                    }
                    match drawing.lines.get(row) {
                        Some(text) => line.push_str(text),
                        None => line.extend(std::iter::repeat_n(' ', drawing.width)),
                    }
                }
                line
            })
            .collect();
        let separators = separator.chars().count() * drawings.len().saturating_sub(1);
        Drawing {
            lines,
            width: drawings.iter().map(|d| d.width).sum::<usize>() + separators,
        }
    }

    /// Frames the drawing in a thin box with `title` in the top border.
    pub fn framed(&self, title: &str) -> Drawing {
        let title_width = title.chars().count();
        let inner = self.width.max(title_width + 5);
        let mut lines = Vec::with_capacity(self.lines.len() + 2);
        lines.push(format!(
            "┌─ {title} {}┐",
            "─".repeat(inner - title_width - 3)
        ));
        for line in &self.lines {
            lines.push(format!("│{line}{}│", " ".repeat(inner - self.width)));
        }
        lines.push(format!("└{}┘", "─".repeat(inner)));
        Drawing {
            lines,
            width: inner + 2,
        }
    }
}

impl fmt::Display for Drawing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for line in &self.lines {
            writeln!(f, "{line}")?;
        }
        Ok(())
    }
}

/// Draws a board or a piece with row and column numbers.
pub fn draw_grid<const N: usize>(grid: &Grid<N>, palette: Palette) -> Drawing {
    let mut lines = Vec::with_capacity(N + 3);

    let mut header = String::from("  ");
    for col in 0..N {
        let _ = write!(header, "{} ", col % 10);
    }
    header.push(' ');
    lines.push(header);

    lines.push(format!(" ┏{}┓", "━".repeat(2 * N)));
    for (row, cells) in grid.rows().enumerate() {
        let mut line = format!("{}┃", row % 10);
        for element in cells {
            palette.paint(&mut line, *element);
        }
        line.push('┃');
        lines.push(line);
    }
    lines.push(format!(" ┗{}┛", "━".repeat(2 * N)));

    Drawing {
        lines,
        width: 2 * N + 3,
    }
}

/// Draws the board and the three slots in a window titled with the score.
pub fn draw_game(game: &GameState, title: &str, palette: Palette) -> Drawing {
    let mut parts = Vec::with_capacity(4);
    parts.push(draw_grid(game.board(), palette));
    parts.extend(game.slots().iter().map(|slot| draw_grid(slot, palette)));

    let mut title = format!("{title} | score: {}", game.score());
    if game.is_game_over() {
        title.push_str(" - GAME OVER");
    }
    Drawing::beside(&parts, " ").framed(&title)
}

/// Lays out the windows of many games in a grid.
#[derive(Debug, Clone, Copy)]
pub struct Drawer {
    columns: usize,
    palette: Palette,
}

impl Drawer {
    pub fn new(columns: usize, palette: Palette) -> Self {
        Self {
            columns: columns.max(1),
            palette,
        }
    }

    pub fn palette(&self) -> Palette {
        self.palette
    }

    /// Draws one window per game, titled by its index in `games`.
    pub fn draw_games(&self, games: &[GameState]) -> String {
        let windows = games
            .iter()
            .enumerate()
            .map(|(i, game)| draw_game(game, &format!("Neural Network: {i}"), self.palette))
            .collect::<Vec<_>>();
        windows
            .chunks(self.columns)
            .map(|row| Drawing::beside(row, " ").to_string())
            .collect()
    }

    /// Clears the terminal and draws `text` from the top-left corner.
    pub fn redraw<W>(&self, out: &mut W, text: &str) -> io::Result<()>
    where
        W: Write,
    {
        if self.palette == Palette::Colored {
            execute!(out, Clear(ClearType::All), MoveTo(0, 0))?;
        }
        out.write_all(text.as_bytes())?;
        out.flush()
    }
}

#[cfg(test)]
mod tests {
    use tenten_engine::{Board, PieceGrid, Shape, ShapeSeed};

    use super::*;

    fn drawing(lines: &[&str]) -> Drawing {
        Drawing {
            lines: lines.iter().map(ToString::to_string).collect(),
            width: lines.iter().map(|l| l.chars().count()).max().unwrap_or(0),
        }
    }

    #[test]
    fn test_beside_pads_short_drawings() {
        let merged = Drawing::beside(
            &[drawing(&["1", "1", "1"]), drawing(&["22", "22"]), drawing(&["3"])],
            " ",
        );
        assert_eq!(merged.lines, ["1 22 3", "1 22  ", "1     "]);
        assert_eq!(merged.width, 6);
        assert!(Drawing::beside(&[], " ").lines.is_empty());
    }

    #[test]
    fn test_framed() {
        let content = drawing(&["333     ", "88888888", "1       "]);
        assert_eq!(
            content.framed("T").to_string(),
            "┌─ T ────┐\n│333     │\n│88888888│\n│1       │\n└────────┘\n"
        );
        assert_eq!(
            content.framed("very long text").lines,
            [
                "┌─ very long text ──┐",
                "│333                │",
                "│88888888           │",
                "│1                  │",
                "└───────────────────┘",
            ]
        );
    }

    #[test]
    fn test_draw_grid_plain() {
        let drawn = draw_grid(&Shape::SquareTwo.grid(), Palette::Plain);
        assert_eq!(
            drawn.lines,
            [
                "  0 1 2 3 4  ",
                " ┏━━━━━━━━━━┓",
                "0┃CCCC......┃",
                "1┃CCCC......┃",
                "2┃..........┃",
                "3┃..........┃",
                "4┃..........┃",
                " ┗━━━━━━━━━━┛",
            ]
        );
        assert_eq!(drawn.width, 13);
    }

    #[test]
    fn test_draw_grid_colored() {
        let drawn = draw_grid(&PieceGrid::EMPTY, Palette::Colored);
        assert!(drawn.lines[2].starts_with("0┃\u{1b}["));
        assert_eq!(drawn.width, 13);
    }

    #[test]
    fn test_draw_game_title() {
        let game = GameState::with_layout(
            Board::EMPTY,
            [Some(Shape::Dot), None, None],
            ShapeSeed::from_u64(0),
        );
        let drawn = draw_game(&game, "tenten", Palette::Plain);
        assert!(drawn.lines[0].starts_with("┌─ tenten | score: 0 ─"));
        // board (13 lines) is the tallest part, plus the frame
        assert_eq!(drawn.lines.len(), 15);
        // a 23 wide board, three 13 wide slots, three separators and the frame
        assert_eq!(drawn.width, 23 + 3 * 13 + 3 + 2);
        assert!(drawn.lines.iter().all(|l| l.chars().count() == drawn.width));
    }

    #[test]
    fn test_draw_games_grid() {
        let games = (0..3)
            .map(|i| GameState::with_seed(ShapeSeed::from_u64(i)))
            .collect::<Vec<_>>();
        let text = Drawer::new(2, Palette::Plain).draw_games(&games);
        assert_eq!(text.matches("Neural Network: ").count(), 3);
        // two rows of windows, 15 lines each
        assert_eq!(text.lines().count(), 30);
        assert!(text.lines().next().unwrap().contains("Neural Network: 1"));
    }
}

use std::io::{BufRead, Write};

use anyhow::Context as _;
use tenten_engine::{GameState, Slot};

use crate::view::{Drawer, draw_game};

const TITLE: &str = "tenten";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Prompt {
    Exit,
    Place { slot: Slot, x: isize, y: isize },
}

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
enum PromptError {
    #[display("provide 3 components: slot (A-C or 0-2), then the X and Y position of the piece")]
    ComponentCount,
    #[display("unknown slot `{_0}`, use A, B, C or 0, 1, 2")]
    UnknownSlot(#[error(not(source))] String),
    #[display("`{_0}` is not a position")]
    InvalidPosition(#[error(not(source))] String),
}

fn parse_prompt(line: &str) -> Result<Prompt, PromptError> {
    let line = line.trim();
    if line == "exit" || line == "e" {
        return Ok(Prompt::Exit);
    }

    let parts = line.split_whitespace().collect::<Vec<_>>();
    let [slot, x, y] = parts[..] else {
        return Err(PromptError::ComponentCount);
    };
    let slot = match slot {
        "0" | "a" | "A" => Slot::A,
        "1" | "b" | "B" => Slot::B,
        "2" | "c" | "C" => Slot::C,
        _ => return Err(PromptError::UnknownSlot(slot.to_owned())),
    };
    let position = |s: &str| {
        s.parse::<isize>()
            .map_err(|_| PromptError::InvalidPosition(s.to_owned()))
    };
    Ok(Prompt::Place {
        slot,
        x: position(x)?,
        y: position(y)?,
    })
}

/// Plays `game` with moves read line by line from `input`.
///
/// Stops at `exit`, at the end of the input, or when the game is over.
pub(crate) fn play_lines<R, W>(
    game: &mut GameState,
    mut input: R,
    out: &mut W,
    drawer: Drawer,
) -> anyhow::Result<()>
where
    R: BufRead,
    W: Write,
{
    drawer.redraw(out, &draw_game(game, TITLE, drawer.palette()).to_string())?;

    let mut line = String::new();
    loop {
        write!(out, "Next move: ")?;
        out.flush()?;
        line.clear();
        if input.read_line(&mut line).context("Failed to read move")? == 0 {
            break;
        }

        let (slot, x, y) = match parse_prompt(&line) {
            Ok(Prompt::Exit) => break,
            Ok(Prompt::Place { slot, x, y }) => (slot, x, y),
            Err(e) => {
                writeln!(out, "{e}")?;
                continue;
            }
        };

        let result = game.place(slot, x, y);
        log::debug!("move {slot} ({x}, {y}): {result:?}");
        drawer.redraw(out, &draw_game(game, TITLE, drawer.palette()).to_string())?;
        if let Err(e) = result {
            writeln!(out, "{e}")?;
        }
        if game.is_game_over() {
            writeln!(out, "GAME OVER")?;
            break;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use tenten_engine::{Board, Shape, ShapeSeed};

    use super::*;
    use crate::view::Palette;

    #[test]
    fn test_parse_prompt() {
        assert_eq!(parse_prompt("e\n"), Ok(Prompt::Exit));
        assert_eq!(parse_prompt("exit"), Ok(Prompt::Exit));
        assert_eq!(
            parse_prompt("0 3 4\n"),
            Ok(Prompt::Place {
                slot: Slot::A,
                x: 3,
                y: 4
            })
        );
        assert_eq!(
            parse_prompt("  c  -1 10 "),
            Ok(Prompt::Place {
                slot: Slot::C,
                x: -1,
                y: 10
            })
        );
        assert_eq!(parse_prompt("1 2"), Err(PromptError::ComponentCount));
        assert_eq!(parse_prompt(""), Err(PromptError::ComponentCount));
        assert_eq!(
            parse_prompt("3 0 0"),
            Err(PromptError::UnknownSlot("3".to_owned()))
        );
        assert_eq!(
            parse_prompt("a x 0"),
            Err(PromptError::InvalidPosition("x".to_owned()))
        );
    }

    #[test]
    fn test_play_lines_until_exit() {
        let mut game = GameState::with_layout(
            Board::EMPTY,
            [Some(Shape::Dot), Some(Shape::Dot), None],
            ShapeSeed::from_u64(1),
        );
        let input = Cursor::new("0 0 0\nbogus\nexit\n1 5 5\n");
        let mut out = Vec::new();

        play_lines(&mut game, input, &mut out, Drawer::new(1, Palette::Plain)).unwrap();

        assert_eq!(game.score(), 1);
        assert!(game.board().is_occupied(0, 0));
        assert!(!game.board().is_occupied(5, 5));
        let out = String::from_utf8(out).unwrap();
        assert!(out.contains("provide 3 components"));
        assert!(out.contains("┌─ tenten | score: 1 ─"));
    }

    #[test]
    fn test_play_lines_stops_at_game_over() {
        let mut game = GameState::with_layout(
            Board::EMPTY,
            [Some(Shape::Dot), None, None],
            ShapeSeed::from_u64(1),
        );
        let input = Cursor::new("b 0 0\n0 0 0\n");
        let mut out = Vec::new();

        play_lines(&mut game, input, &mut out, Drawer::new(1, Palette::Plain)).unwrap();

        assert!(game.is_game_over());
        assert_eq!(game.score(), 0);
        let out = String::from_utf8(out).unwrap();
        assert!(out.contains("selected block slot is empty"));
        assert!(out.ends_with("GAME OVER\n"));
    }
}

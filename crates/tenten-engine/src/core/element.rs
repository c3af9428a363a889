use std::fmt;

use serde::{Deserialize, Serialize};

/// A single cell of a board or a piece.
///
/// `None` marks an empty cell; every other variant is the color of an occupied one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize, Serialize)]
#[repr(u8)]
pub enum BoardElement {
    #[default]
    None = 0,
    Red = 1,
    Green = 2,
    Yellow = 3,
    Blue = 4,
    Magenta = 5,
    Cyan = 6,
    White = 7,
}

impl BoardElement {
    #[must_use]
    pub const fn is_empty(self) -> bool {
        matches!(self, BoardElement::None)
    }

    #[must_use]
    pub const fn is_occupied(self) -> bool {
        !self.is_empty()
    }

    /// Single character used by the plain-text snapshot.
    ///
    /// ```
    /// use tenten_engine::BoardElement;
    ///
    /// assert_eq!(BoardElement::None.as_char(), '.');
    /// assert_eq!(BoardElement::Magenta.as_char(), 'M');
    /// ```
    #[must_use]
    pub const fn as_char(self) -> char {
        match self {
            BoardElement::None => '.',
            BoardElement::Red => 'R',
            BoardElement::Green => 'G',
            BoardElement::Yellow => 'Y',
            BoardElement::Blue => 'B',
            BoardElement::Magenta => 'M',
            BoardElement::Cyan => 'C',
            BoardElement::White => 'W',
        }
    }
}

impl fmt::Display for BoardElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

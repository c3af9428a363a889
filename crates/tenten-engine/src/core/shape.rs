use rand::{Rng, distr::StandardUniform, prelude::Distribution};
use serde::{Deserialize, Serialize};

use super::{element::BoardElement, grid::PieceGrid};

/// One of the 19 piece shapes dealt into the slots.
///
/// Every shape is drawn inside a 5×5 frame anchored at its top-left corner and
/// painted in a single color. The set is closed: there is no index that maps
/// to an "empty" shape, an empty slot is represented by an empty grid instead.
///
/// # Example
///
/// ```
/// use tenten_engine::{BoardElement, Shape};
///
/// let grid = Shape::SmallCornerBottomRight.grid();
/// assert_eq!(grid.get(0, 0), Some(BoardElement::None));
/// assert_eq!(grid.get(0, 1), Some(BoardElement::White));
/// assert_eq!(Shape::SmallCornerBottomRight.cell_count(), 3);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[repr(u8)]
pub enum Shape {
    Dot = 0,
    TwoHorizontal = 1,
    TwoVertical = 2,
    ThreeHorizontal = 3,
    ThreeVertical = 4,
    FourHorizontal = 5,
    FourVertical = 6,
    FiveHorizontal = 7,
    FiveVertical = 8,
    SquareTwo = 9,
    SquareThree = 10,
    BigCornerTopLeft = 11,
    BigCornerTopRight = 12,
    BigCornerBottomRight = 13,
    BigCornerBottomLeft = 14,
    SmallCornerTopLeft = 15,
    SmallCornerTopRight = 16,
    SmallCornerBottomRight = 17,
    SmallCornerBottomLeft = 18,
}

impl Distribution<Shape> for StandardUniform {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Shape {
        Shape::ALL[rng.random_range(0..Shape::LEN)]
    }
}

impl Shape {
    /// Number of shapes (19).
    pub const LEN: usize = 19;

    pub const ALL: [Shape; Self::LEN] = [
        Shape::Dot,
        Shape::TwoHorizontal,
        Shape::TwoVertical,
        Shape::ThreeHorizontal,
        Shape::ThreeVertical,
        Shape::FourHorizontal,
        Shape::FourVertical,
        Shape::FiveHorizontal,
        Shape::FiveVertical,
        Shape::SquareTwo,
        Shape::SquareThree,
        Shape::BigCornerTopLeft,
        Shape::BigCornerTopRight,
        Shape::BigCornerBottomRight,
        Shape::BigCornerBottomLeft,
        Shape::SmallCornerTopLeft,
        Shape::SmallCornerTopRight,
        Shape::SmallCornerBottomRight,
        Shape::SmallCornerBottomLeft,
    ];

    /// Returns the shape with the given catalogue number.
    ///
    /// ```
    /// use tenten_engine::Shape;
    ///
    /// assert_eq!(Shape::from_index(8), Some(Shape::FiveVertical));
    /// assert_eq!(Shape::from_index(19), None);
    /// ```
    #[must_use]
    pub const fn from_index(index: usize) -> Option<Self> {
        if index < Self::LEN {
            Some(Self::ALL[index])
        } else {
            None
        }
    }

    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Returns the shape laid out in a fresh 5×5 piece buffer.
    #[must_use]
    pub const fn grid(self) -> PieceGrid {
        SHAPE_GRIDS[self as usize]
    }

    #[must_use]
    pub const fn color(self) -> BoardElement {
        match self {
            Shape::Dot => BoardElement::Red,
            Shape::TwoHorizontal | Shape::TwoVertical => BoardElement::Green,
            Shape::ThreeHorizontal | Shape::ThreeVertical => BoardElement::Yellow,
            Shape::FourHorizontal | Shape::FourVertical => BoardElement::Blue,
            Shape::FiveHorizontal | Shape::FiveVertical => BoardElement::Magenta,
            Shape::SquareTwo
            | Shape::BigCornerTopLeft
            | Shape::BigCornerTopRight
            | Shape::BigCornerBottomRight
            | Shape::BigCornerBottomLeft => BoardElement::Cyan,
            Shape::SquareThree
            | Shape::SmallCornerTopLeft
            | Shape::SmallCornerTopRight
            | Shape::SmallCornerBottomRight
            | Shape::SmallCornerBottomLeft => BoardElement::White,
        }
    }

    /// Number of colored cells, i.e. the points earned by placing the shape.
    #[must_use]
    pub fn cell_count(self) -> usize {
        self.grid().occupied_count()
    }
}

const SHAPE_GRIDS: [PieceGrid; Shape::LEN] = {
    use BoardElement::None as E;
    const R: BoardElement = BoardElement::Red;
    const G: BoardElement = BoardElement::Green;
    const Y: BoardElement = BoardElement::Yellow;
    const B: BoardElement = BoardElement::Blue;
    const M: BoardElement = BoardElement::Magenta;
    const C: BoardElement = BoardElement::Cyan;
    const W: BoardElement = BoardElement::White;
    const EEEEE: [BoardElement; 5] = [E; 5];
    [
        // Dot
        PieceGrid::from_rows([[R, E, E, E, E], EEEEE, EEEEE, EEEEE, EEEEE]),
        // TwoHorizontal
        PieceGrid::from_rows([[G, G, E, E, E], EEEEE, EEEEE, EEEEE, EEEEE]),
        // TwoVertical
        PieceGrid::from_rows([[G, E, E, E, E], [G, E, E, E, E], EEEEE, EEEEE, EEEEE]),
        // ThreeHorizontal
        PieceGrid::from_rows([[Y, Y, Y, E, E], EEEEE, EEEEE, EEEEE, EEEEE]),
        // ThreeVertical
        PieceGrid::from_rows([
            [Y, E, E, E, E],
            [Y, E, E, E, E],
            [Y, E, E, E, E],
            EEEEE,
            EEEEE,
        ]),
        // FourHorizontal
        PieceGrid::from_rows([[B, B, B, B, E], EEEEE, EEEEE, EEEEE, EEEEE]),
        // FourVertical
        PieceGrid::from_rows([
            [B, E, E, E, E],
            [B, E, E, E, E],
            [B, E, E, E, E],
            [B, E, E, E, E],
            EEEEE,
        ]),
        // FiveHorizontal
        PieceGrid::from_rows([[M, M, M, M, M], EEEEE, EEEEE, EEEEE, EEEEE]),
        // FiveVertical
        PieceGrid::from_rows([
            [M, E, E, E, E],
            [M, E, E, E, E],
            [M, E, E, E, E],
            [M, E, E, E, E],
            [M, E, E, E, E],
        ]),
        // SquareTwo
        PieceGrid::from_rows([[C, C, E, E, E], [C, C, E, E, E], EEEEE, EEEEE, EEEEE]),
        // SquareThree
        PieceGrid::from_rows([
            [W, W, W, E, E],
            [W, W, W, E, E],
            [W, W, W, E, E],
            EEEEE,
            EEEEE,
        ]),
        // BigCornerTopLeft
        PieceGrid::from_rows([
            [C, C, C, E, E],
            [C, E, E, E, E],
            [C, E, E, E, E],
            EEEEE,
            EEEEE,
        ]),
        // BigCornerTopRight
        PieceGrid::from_rows([
            [C, C, C, E, E],
            [E, E, C, E, E],
            [E, E, C, E, E],
            EEEEE,
            EEEEE,
        ]),
        // BigCornerBottomRight
        PieceGrid::from_rows([
            [E, E, C, E, E],
            [E, E, C, E, E],
            [C, C, C, E, E],
            EEEEE,
            EEEEE,
        ]),
        // BigCornerBottomLeft
        PieceGrid::from_rows([
            [C, E, E, E, E],
            [C, E, E, E, E],
            [C, C, C, E, E],
            EEEEE,
            EEEEE,
        ]),
        // SmallCornerTopLeft
        PieceGrid::from_rows([[W, W, E, E, E], [W, E, E, E, E], EEEEE, EEEEE, EEEEE]),
        // SmallCornerTopRight
        PieceGrid::from_rows([[W, W, E, E, E], [E, W, E, E, E], EEEEE, EEEEE, EEEEE]),
        // SmallCornerBottomRight
        PieceGrid::from_rows([[E, W, E, E, E], [W, W, E, E, E], EEEEE, EEEEE, EEEEE]),
        // SmallCornerBottomLeft
        PieceGrid::from_rows([[W, E, E, E, E], [W, W, E, E, E], EEEEE, EEEEE, EEEEE]),
    ]
};

#[cfg(test)]
mod tests {
    use rand::SeedableRng as _;
    use rand_pcg::Pcg32;

    use super::*;

    #[test]
    fn test_all_matches_discriminants() {
        for (i, shape) in Shape::ALL.iter().enumerate() {
            assert_eq!(shape.index(), i);
            assert_eq!(Shape::from_index(i), Some(*shape));
        }
    }

    #[test]
    fn test_shapes_are_single_colored() {
        for shape in Shape::ALL {
            let grid = shape.grid();
            assert!(!grid.is_empty(), "{shape:?} must not be empty");
            for (row, col, element) in grid.occupied_cells() {
                assert_eq!(
                    element,
                    shape.color(),
                    "{shape:?} has unexpected color at ({row}, {col})"
                );
            }
        }
    }

    #[test]
    fn test_cell_counts() {
        let counts = Shape::ALL.map(Shape::cell_count);
        assert_eq!(
            counts,
            [1, 2, 2, 3, 3, 4, 4, 5, 5, 4, 9, 5, 5, 5, 5, 3, 3, 3, 3]
        );
    }

    #[test]
    fn test_corner_layouts() {
        let grid = Shape::BigCornerBottomRight.grid();
        let cells = grid
            .occupied_cells()
            .map(|(row, col, _)| (row, col))
            .collect::<Vec<_>>();
        assert_eq!(cells, [(0, 2), (1, 2), (2, 0), (2, 1), (2, 2)]);

        let grid = Shape::SmallCornerTopRight.grid();
        let cells = grid
            .occupied_cells()
            .map(|(row, col, _)| (row, col))
            .collect::<Vec<_>>();
        assert_eq!(cells, [(0, 0), (0, 1), (1, 1)]);
    }

    #[test]
    fn test_random_shapes_cover_catalogue() {
        let mut rng = Pcg32::seed_from_u64(7);
        let mut seen = [false; Shape::LEN];
        for _ in 0..2000 {
            let shape: Shape = rng.random();
            seen[shape.index()] = true;
        }
        assert!(seen.iter().all(|s| *s));
    }
}

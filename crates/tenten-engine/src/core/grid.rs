use std::fmt;

use arrayvec::ArrayVec;

use crate::GameError;

use super::element::BoardElement;

/// Side length of the playing board.
pub const BOARD_SIZE: usize = 10;
/// Side length of the frame every piece is drawn in.
pub const PIECE_SIZE: usize = 5;
/// Points awarded for each cleared row and each cleared column.
pub const LINE_CLEAR_POINTS: u32 = 10;

/// The 10×10 playing board.
pub type Board = Grid<BOARD_SIZE>;
/// A 5×5 piece buffer held by a slot.
pub type PieceGrid = Grid<PIECE_SIZE>;

/// Square grid of cells addressed by `(row, column)`, both zero-based.
///
/// The grid is always square: its storage is a fixed `N×N` array, so rows can
/// never differ in length. Grids are plain values; copying one never aliases
/// the cells of another.
///
/// # Example
///
/// ```
/// use tenten_engine::{Board, BoardElement, Shape};
///
/// let mut board = Board::EMPTY;
/// let piece = Shape::SquareTwo.grid();
/// board.check_placement(&piece, 8, 8).unwrap();
/// assert_eq!(board.fill_piece(&piece, 8, 8), 4);
/// assert_eq!(board.get(9, 9), Some(BoardElement::Cyan));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Grid<const N: usize> {
    cells: [[BoardElement; N]; N],
}

impl<const N: usize> Default for Grid<N> {
    fn default() -> Self {
        Self::EMPTY
    }
}

impl<const N: usize> Grid<N> {
    pub const SIZE: usize = N;
    pub const EMPTY: Self = Self {
        cells: [[BoardElement::None; N]; N],
    };

    #[must_use]
    pub const fn from_rows(cells: [[BoardElement; N]; N]) -> Self {
        Self { cells }
    }

    /// Returns the cell at `(row, col)`, or `None` when outside the grid.
    #[must_use]
    pub fn get(&self, row: usize, col: usize) -> Option<BoardElement> {
        self.cells.get(row)?.get(col).copied()
    }

    #[must_use]
    pub fn is_occupied(&self, row: usize, col: usize) -> bool {
        self.get(row, col).is_some_and(BoardElement::is_occupied)
    }

    /// Overwrites a single cell.
    ///
    /// # Panics
    ///
    /// Panics if `(row, col)` lies outside the grid.
    pub fn set(&mut self, row: usize, col: usize, element: BoardElement) {
        self.cells[row][col] = element;
    }

    pub fn rows(&self) -> impl Iterator<Item = &[BoardElement; N]> {
        self.cells.iter()
    }

    /// Iterates over every cell in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = BoardElement> + '_ {
        self.cells.iter().flatten().copied()
    }

    /// Iterates over `(row, col, element)` for every non-empty cell.
    pub fn occupied_cells(&self) -> impl Iterator<Item = (usize, usize, BoardElement)> + '_ {
        self.cells.iter().enumerate().flat_map(|(row, cells)| {
            cells
                .iter()
                .enumerate()
                .filter(|(_, element)| element.is_occupied())
                .map(move |(col, element)| (row, col, *element))
        })
    }

    #[must_use]
    pub fn occupied_count(&self) -> usize {
        self.cells().filter(|e| e.is_occupied()).count()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cells().all(BoardElement::is_empty)
    }

    pub fn clear(&mut self) {
        *self = Self::EMPTY;
    }

    /// Checks whether `piece` can be stamped with its own `(0, 0)` cell at
    /// `(x, y)`, where `x` selects the row and `y` the column.
    ///
    /// Only non-empty piece cells are checked. On success the origin is
    /// returned as unsigned coordinates, ready for [`Self::fill_piece`].
    pub fn check_placement<const M: usize>(
        &self,
        piece: &Grid<M>,
        x: isize,
        y: isize,
    ) -> Result<(usize, usize), GameError> {
        let (Ok(x), Ok(y)) = (usize::try_from(x), usize::try_from(y)) else {
            return Err(GameError::IncorrectPosition);
        };
        if !self.fits_at(piece, x, y) {
            return Err(GameError::IncorrectPosition);
        }
        Ok((x, y))
    }

    fn fits_at<const M: usize>(&self, piece: &Grid<M>, x: usize, y: usize) -> bool {
        piece.occupied_cells().all(|(dx, dy, _)| {
            let (row, col) = (x + dx, y + dy);
            row < N && col < N && self.cells[row][col].is_empty()
        })
    }

    /// Stamps the non-empty cells of `piece` at `(x, y)` and returns how many
    /// cells were painted.
    ///
    /// The placement must have been validated with [`Self::check_placement`].
    ///
    /// # Panics
    ///
    /// Panics if a painted cell falls outside the grid.
    pub fn fill_piece<const M: usize>(&mut self, piece: &Grid<M>, x: usize, y: usize) -> usize {
        let mut painted = 0;
        for (dx, dy, element) in piece.occupied_cells() {
            self.cells[x + dx][y + dy] = element;
            painted += 1;
        }
        painted
    }

    /// Iterates over every origin in `[0, N)²` where `piece` fits.
    pub fn placements<'a, const M: usize>(
        &'a self,
        piece: &'a Grid<M>,
    ) -> impl Iterator<Item = (usize, usize)> + 'a {
        (0..N)
            .flat_map(|x| (0..N).map(move |y| (x, y)))
            .filter(move |&(x, y)| self.fits_at(piece, x, y))
    }

    /// Returns `true` if `piece` fits at least once anywhere on the grid.
    #[must_use]
    pub fn fits_anywhere<const M: usize>(&self, piece: &Grid<M>) -> bool {
        self.placements(piece).next().is_some()
    }

    /// Clears every full row and every full column.
    ///
    /// Fullness of rows and columns is decided on the same snapshot taken
    /// before anything is cleared, so a row and a column crossing each other
    /// are both cleared and both counted.
    pub fn clear_lines(&mut self) -> ClearedLines {
        let full_rows = (0..N)
            .filter(|&row| self.cells[row].iter().all(|e| e.is_occupied()))
            .collect::<ArrayVec<usize, N>>();
        let full_cols = (0..N)
            .filter(|&col| self.cells.iter().all(|cells| cells[col].is_occupied()))
            .collect::<ArrayVec<usize, N>>();

        for &row in &full_rows {
            self.cells[row] = [BoardElement::None; N];
        }
        for &col in &full_cols {
            for cells in &mut self.cells {
                cells[col] = BoardElement::None;
            }
        }

        ClearedLines {
            rows: full_rows.len(),
            columns: full_cols.len(),
        }
    }
}

impl<const N: usize> fmt::Display for Grid<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for cells in &self.cells {
            for element in cells {
                write!(f, "{element}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// Number of rows and columns removed by a single line-clear pass.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ClearedLines {
    pub rows: usize,
    pub columns: usize,
}

impl ClearedLines {
    #[must_use]
    pub const fn count(self) -> usize {
        self.rows + self.columns
    }

    /// Points for the pass: every line scores independently.
    #[must_use]
    pub fn points(self) -> u32 {
        u32::try_from(self.count()).map_or(u32::MAX, |n| n * LINE_CLEAR_POINTS)
    }
}

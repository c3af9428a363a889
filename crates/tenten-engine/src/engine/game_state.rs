use std::fmt;

use crate::{
    GameError,
    core::{Board, ClearedLines, PIECE_SIZE, PieceGrid, Shape},
};

use super::shape_generator::{ShapeGenerator, ShapeSeed};

/// One of the three piece slots offered every turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, derive_more::Display)]
pub enum Slot {
    A,
    B,
    C,
}

impl Slot {
    pub const ALL: [Slot; 3] = [Slot::A, Slot::B, Slot::C];

    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Maps `0`, `1`, `2` to `A`, `B`, `C`.
    #[must_use]
    pub const fn from_index(index: usize) -> Option<Self> {
        match index {
            0 => Some(Slot::A),
            1 => Some(Slot::B),
            2 => Some(Slot::C),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::IsVariant)]
pub enum GameStatus {
    Playing,
    GameOver,
}

/// What a successful placement earned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlaceOutcome {
    /// Cells painted by the piece, one point each.
    pub painted: usize,
    pub cleared: ClearedLines,
    /// Total points added to the score by this move.
    pub points: u32,
}

/// A single game: the board, the three slots and the score.
///
/// The game starts in [`GameStatus::Playing`] with three freshly drawn shapes.
/// Any failed placement ends the game, and a successful placement also ends
/// it when none of the remaining pieces fits anywhere. Once over, the state
/// is frozen; start a new game with [`GameState::new`].
///
/// # Example
///
/// ```
/// use tenten_engine::{GameError, GameState, ShapeSeed, Slot};
///
/// let mut game = GameState::with_seed(ShapeSeed::from_u64(1));
/// let result = game.place(Slot::A, 0, 0);
/// assert!(result.is_ok() || result == Err(GameError::GameOver));
/// assert!(game.score() > 0);
///
/// // Negative coordinates are never valid and end the game.
/// let mut game = GameState::with_seed(ShapeSeed::from_u64(1));
/// assert_eq!(game.place(Slot::B, -1, 0), Err(GameError::IncorrectPosition));
/// assert!(game.is_game_over());
/// ```
#[derive(Debug, Clone)]
pub struct GameState {
    board: Board,
    slots: [PieceGrid; 3],
    score: u32,
    status: GameStatus,
    generator: ShapeGenerator,
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}

impl GameState {
    /// Starts a game whose shapes are drawn from a random seed.
    #[must_use]
    pub fn new() -> Self {
        Self::from_generator(Board::EMPTY, [None; 3], ShapeGenerator::new())
    }

    #[must_use]
    pub fn with_seed(seed: ShapeSeed) -> Self {
        Self::from_generator(Board::EMPTY, [None; 3], ShapeGenerator::with_seed(seed))
    }

    /// Starts a game from an arbitrary board and slot layout.
    ///
    /// `None` leaves a slot empty. If all three are empty they are refilled
    /// immediately, as after a move.
    #[must_use]
    pub fn with_layout(board: Board, slots: [Option<Shape>; 3], seed: ShapeSeed) -> Self {
        Self::from_generator(board, slots, ShapeGenerator::with_seed(seed))
    }

    fn from_generator(board: Board, slots: [Option<Shape>; 3], generator: ShapeGenerator) -> Self {
        let mut this = Self {
            board,
            slots: slots.map(|shape| shape.map_or(PieceGrid::EMPTY, Shape::grid)),
            score: 0,
            status: GameStatus::Playing,
            generator,
        };
        if this.all_slots_empty() {
            this.refill_slots();
        }
        this
    }

    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[must_use]
    pub fn slot(&self, slot: Slot) -> &PieceGrid {
        &self.slots[slot.index()]
    }

    #[must_use]
    pub fn slots(&self) -> &[PieceGrid; 3] {
        &self.slots
    }

    #[must_use]
    pub fn score(&self) -> u32 {
        self.score
    }

    #[must_use]
    pub fn status(&self) -> GameStatus {
        self.status
    }

    #[must_use]
    pub fn is_game_over(&self) -> bool {
        self.status.is_game_over()
    }

    /// Stamps the piece in `slot` with its top-left cell at row `x`, column `y`.
    ///
    /// On success the board is updated, full rows and columns are cleared,
    /// the slot is emptied and the score grows by one point per painted cell
    /// plus [`LINE_CLEAR_POINTS`](crate::LINE_CLEAR_POINTS) per cleared line.
    /// When the last filled slot is used, all three are refilled.
    ///
    /// # Errors
    ///
    /// - [`GameError::GameOver`] if the game had already ended (nothing changes),
    ///   or if the move succeeded but left no legal move for the remaining pieces
    ///   (the move stays applied).
    /// - [`GameError::IncorrectBlock`] if the slot is empty.
    /// - [`GameError::IncorrectPosition`] if the piece leaves the board or
    ///   overlaps an occupied cell; the board is left untouched.
    ///
    /// Every error ends the game.
    pub fn place(&mut self, slot: Slot, x: isize, y: isize) -> Result<PlaceOutcome, GameError> {
        if self.is_game_over() {
            return Err(GameError::GameOver);
        }

        let outcome = match self.try_place(slot, x, y) {
            Ok(outcome) => outcome,
            Err(e) => {
                self.status = GameStatus::GameOver;
                return Err(e);
            }
        };

        if !self.has_legal_move() {
            self.status = GameStatus::GameOver;
            return Err(GameError::GameOver);
        }
        Ok(outcome)
    }

    fn try_place(&mut self, slot: Slot, x: isize, y: isize) -> Result<PlaceOutcome, GameError> {
        let piece = self.slots[slot.index()];
        if piece.is_empty() {
            return Err(GameError::IncorrectBlock);
        }
        let (x, y) = self.board.check_placement(&piece, x, y)?;

        let painted = self.board.fill_piece(&piece, x, y);
        let cleared = self.board.clear_lines();
        self.slots[slot.index()].clear();

        let points = u32::try_from(painted)
            .unwrap_or(u32::MAX)
            .saturating_add(cleared.points());
        self.score = self.score.saturating_add(points);

        if self.all_slots_empty() {
            self.refill_slots();
        }

        Ok(PlaceOutcome {
            painted,
            cleared,
            points,
        })
    }

    /// Returns `true` if at least one non-empty slot fits somewhere on the board.
    ///
    /// This is a pure query; the game is over exactly when it returns `false`
    /// after a move.
    #[must_use]
    pub fn has_legal_move(&self) -> bool {
        self.slots
            .iter()
            .filter(|piece| !piece.is_empty())
            .any(|piece| self.board.fits_anywhere(piece))
    }

    /// Iterates over every `(x, y)` origin where the piece in `slot` fits.
    pub fn legal_placements(&self, slot: Slot) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.board.placements(&self.slots[slot.index()])
    }

    fn all_slots_empty(&self) -> bool {
        self.slots.iter().all(PieceGrid::is_empty)
    }

    fn refill_slots(&mut self) {
        self.slots = self.generator.draw_triple().map(Shape::grid);
    }
}

/// Plain-text snapshot: a score line, then the board with the three slots
/// drawn to its right.
impl fmt::Display for GameState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "score: {}", self.score)?;
        if self.is_game_over() {
            write!(f, " - GAME OVER")?;
        }
        writeln!(f)?;
        for (row, cells) in self.board.rows().enumerate() {
            for element in cells {
                write!(f, "{element}")?;
            }
            if row < PIECE_SIZE {
                for piece in &self.slots {
                    write!(f, "  ")?;
                    for element in piece.rows().nth(row).into_iter().flatten() {
                        write!(f, "{element}")?;
                    }
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

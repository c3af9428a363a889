//! Network input encoding of a game state.

use tenten_engine::{BOARD_SIZE, GameState, PIECE_SIZE, PieceGrid};

/// Length of the input vector: the board followed by the three slots.
pub const FEATURE_COUNT: usize = BOARD_SIZE * BOARD_SIZE + 3 * PIECE_SIZE * PIECE_SIZE;

/// Encodes `game` as `1.0` for occupied and `0.0` for empty cells.
///
/// The board comes first, then slots A, B and C, each in row-major order.
/// Colors are not encoded.
#[must_use]
pub fn encode_state(game: &GameState) -> [f32; FEATURE_COUNT] {
    let cells = game
        .board()
        .cells()
        .chain(game.slots().iter().flat_map(PieceGrid::cells));
    let mut features = [0.0; FEATURE_COUNT];
    for (feature, cell) in features.iter_mut().zip(cells) {
        if cell.is_occupied() {
            *feature = 1.0;
        }
    }
    features
}

#[cfg(test)]
mod tests {
    use tenten_engine::{Board, BoardElement, Shape, ShapeSeed};

    use super::*;

    #[test]
    fn test_feature_layout() {
        let mut board = Board::EMPTY;
        board.set(0, 1, BoardElement::Red);
        board.set(9, 9, BoardElement::Blue);
        let game = GameState::with_layout(
            board,
            [Some(Shape::Dot), None, Some(Shape::TwoVertical)],
            ShapeSeed::from_u64(0),
        );

        let features = encode_state(&game);

        assert_eq!(FEATURE_COUNT, 175);
        let ones = features
            .iter()
            .enumerate()
            .filter(|(_, v)| **v == 1.0)
            .map(|(i, _)| i)
            .collect::<Vec<_>>();
        // board (0,1) and (9,9); slot A (0,0); slot C (0,0) and (1,0)
        assert_eq!(ones, [1, 99, 100, 150, 155]);
        assert!(features.iter().all(|v| *v == 0.0 || *v == 1.0));
    }
}

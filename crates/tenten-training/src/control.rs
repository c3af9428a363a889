//! Mapping from network output to a game move.

use tenten_engine::{BOARD_SIZE, GameError, GameState, PlaceOutcome, Slot};
use tenten_neural::Network;

use crate::features;

/// Number of network outputs: slot selector, row and column.
pub const OUTPUT_COUNT: usize = 3;

/// Boundary between the thirds of `[-1, 1]` that select a slot.
const SLOT_THRESHOLD: f32 = 0.3333;

/// A placement request derived from network output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Move {
    pub slot: Slot,
    pub x: isize,
    pub y: isize,
}

/// Decodes `[selector, row, column]` activations into a [`Move`].
///
/// The selector picks slot A below `-0.3333`, B below `0.3333` and C
/// otherwise. Row and column map `[-1, 1]` onto `[0, 10]` and are truncated
/// toward zero, so an activation of exactly `1.0` yields the off-board
/// coordinate `10`.
///
/// # Panics
///
/// Panics if `output` has fewer than [`OUTPUT_COUNT`] values.
#[must_use]
pub fn decode_output(output: &[f32]) -> Move {
    let slot = if output[0] < -SLOT_THRESHOLD {
        Slot::A
    } else if output[0] < SLOT_THRESHOLD {
        Slot::B
    } else {
        Slot::C
    };
    Move {
        slot,
        x: to_coordinate(output[1]),
        y: to_coordinate(output[2]),
    }
}

/// Lets `network` make one move in `game`.
///
/// Returns the move it chose together with the result of placing it.
pub fn play_turn(
    network: &mut Network,
    game: &mut GameState,
) -> (Move, Result<PlaceOutcome, GameError>) {
    let output = network.forward(&features::encode_state(game));
    let decision = decode_output(&output);
    let result = game.place(decision.slot, decision.x, decision.y);
    (decision, result)
}

#[expect(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
fn to_coordinate(activation: f32) -> isize {
    ((activation + 1.0) / 2.0 * BOARD_SIZE as f32) as isize
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slot_thirds() {
        let slot = |v| decode_output(&[v, 0.0, 0.0]).slot;
        assert_eq!(slot(-1.0), Slot::A);
        assert_eq!(slot(-0.34), Slot::A);
        assert_eq!(slot(-0.3333), Slot::B);
        assert_eq!(slot(0.0), Slot::B);
        assert_eq!(slot(0.3332), Slot::B);
        assert_eq!(slot(0.3333), Slot::C);
        assert_eq!(slot(1.0), Slot::C);
    }

    #[test]
    fn test_coordinates() {
        let coords = |x, y| {
            let m = decode_output(&[0.0, x, y]);
            (m.x, m.y)
        };
        assert_eq!(coords(-1.0, -1.0), (0, 0));
        assert_eq!(coords(0.0, 0.0), (5, 5));
        assert_eq!(coords(0.79, -0.81), (8, 0));
        assert_eq!(coords(1.0, 0.99), (10, 9));
    }

    #[test]
    fn test_play_turn_applies_decision() {
        use rand::SeedableRng as _;
        use tenten_engine::ShapeSeed;

        let mut rng = rand_pcg::Pcg32::seed_from_u64(11);
        let mut network = Network::new(&[features::FEATURE_COUNT, 4, OUTPUT_COUNT], &mut rng);
        let mut game = GameState::with_seed(ShapeSeed::from_u64(11));
        let before = game.clone();

        let (decision, result) = play_turn(&mut network, &mut game);

        let mut replay = before;
        assert_eq!(replay.place(decision.slot, decision.x, decision.y), result);
        assert_eq!(replay.score(), game.score());
        assert_eq!(replay.board(), game.board());
    }
}

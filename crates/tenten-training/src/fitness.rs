use serde::{Deserialize, Serialize};
use tenten_engine::{GameError, GameState, PlaceOutcome};

/// Turns a game's progress into a network's fitness.
///
/// ```text
/// fitness = score - penalty
/// ```
///
/// The penalty applies only when the last move was illegal (empty slot or
/// bad position). Game over after a legal move is not penalized. With the
/// default penalty of zero the fitness is the plain game score.
#[derive(Debug, Default, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FitnessPolicy {
    pub illegal_move_penalty: f32,
}

impl FitnessPolicy {
    #[expect(clippy::cast_precision_loss)]
    #[must_use]
    pub fn evaluate(&self, game: &GameState, result: &Result<PlaceOutcome, GameError>) -> f32 {
        let score = game.score() as f32;
        match result {
            Err(GameError::IncorrectBlock | GameError::IncorrectPosition) => {
                score - self.illegal_move_penalty
            }
            Ok(_) | Err(GameError::GameOver) => score,
        }
    }
}

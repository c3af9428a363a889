pub use self::{core::*, engine::*};

pub mod core;
pub mod engine;

/// Reasons a placement request can fail.
///
/// Every variant except [`GameError::GameOver`] raised by the terminal-state
/// guard also moves the game into its terminal state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error, derive_more::IsVariant)]
pub enum GameError {
    /// The selected slot holds no piece.
    #[display("selected block slot is empty")]
    IncorrectBlock,
    /// The piece would leave the board or overlap an occupied cell.
    #[display("block cannot be placed at the requested position")]
    IncorrectPosition,
    /// The game is over, either already or as a result of the move.
    #[display("game over")]
    GameOver,
}

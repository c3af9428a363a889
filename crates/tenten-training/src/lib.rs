//! Training loop that lets neural networks learn the block puzzle.
//!
//! Every network of a [`tenten_neural::NetworkManager`] population plays its
//! own [`tenten_engine::GameState`]. On each tick a network sees the board
//! and the three slots, and its output is turned into one placement.
//!
//! # Architecture
//!
//! ```text
//! GameState
//!     ↓ encoded by features (175 inputs: board, then slots A, B, C)
//! Network forward pass
//!     ↓ decoded by control (slot selector, row, column)
//! GameState::place
//!     ↓ scored by FitnessPolicy
//! Network fitness
//!     ↓ ranked by NetworkManager::advance_generation
//! Next generation
//! ```
//!
//! The [`Arena`] drives this cycle and starts a new generation once every
//! game of the current one is over. [`TrainingConfig`] gathers the tunable
//! parts of a run.

pub use self::{arena::*, config::*, fitness::*};

mod arena;
mod config;
pub mod control;
pub mod features;
mod fitness;

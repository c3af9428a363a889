//! Game flow on top of the core grid types.
//!
//! - [`GameState`] - one game: board, three slots, score and terminal flag
//! - [`Slot`] - names the slot a move takes its piece from
//! - [`ShapeGenerator`] - uniform shape dealer used to refill the slots
//! - [`ShapeSeed`] - seed for deterministic shape generation
//!
//! # Game Flow
//!
//! 1. Create a [`GameState`]; all three slots are dealt a random shape
//! 2. Place the piece from one slot at a board position
//! 3. Full rows and columns are cleared and scored
//! 4. Once all three slots are used, three new shapes are dealt
//! 5. The game ends on an illegal move or when no remaining piece fits
//!
//! # Example
//!
//! ```
//! use tenten_engine::{GameState, Slot};
//!
//! let mut game = GameState::new();
//! 'play: while !game.is_game_over() {
//!     for slot in Slot::ALL {
//!         let next = game.legal_placements(slot).next();
//!         if let Some((x, y)) = next {
//!             let _ = game.place(slot, x.cast_signed(), y.cast_signed());
//!             continue 'play;
//!         }
//!     }
//! }
//! println!("final score: {}", game.score());
//! ```

pub use self::{game_state::*, shape_generator::*};

mod game_state;
mod shape_generator;

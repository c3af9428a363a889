//! Neuroevolution of fixed-topology feed-forward networks.
//!
//! A [`NetworkManager`] owns a population of [`Network`]s that share one
//! topology. The caller scores each network (its fitness), then asks the
//! manager for the next generation. There is no gradient descent: the best
//! networks survive and are varied by random weight mutation.
//!
//! # How Training Works
//!
//! 1. **Population** - create `n` networks with weights drawn from `[-1, 1)`
//! 2. **Evaluation** - the caller plays games and records each network's fitness
//! 3. **Selection** - networks are ranked by fitness, best first
//! 4. **Reproduction** - the best network survives unchanged, mutants of the
//!    top three fill most remaining slots, fresh networks fill the rest
//! 5. **Repeat** - for as many generations as the caller likes
//!
//! The best network can be written to a text file and later loaded back
//! into the last slot of any population of the same topology (see
//! [`codec`] for the format).
//!
//! # Randomness
//!
//! All random draws go through [`RandomSource`], which every [`rand::Rng`]
//! implements. Seeding the RNG makes a whole training run reproducible.

pub use self::{manager::*, network::*, random::*, stats::*};

pub mod codec;
mod manager;
mod network;
mod random;
mod stats;

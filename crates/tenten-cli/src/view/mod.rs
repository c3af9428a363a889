//! Line-oriented rendering of games for the console modes.

pub use self::drawer::*;

mod drawer;

pub use self::{element::*, grid::*, shape::*};

pub(crate) mod element;
pub(crate) mod grid;
pub(crate) mod shape;

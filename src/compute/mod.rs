//! Compute module - Grid model, neighbor counting and the evolution engine.

mod engine;
mod grid;
mod neighbors;

pub use engine::*;
pub use grid::*;
pub use neighbors::*;

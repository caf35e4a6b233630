//! Conway's Game of Life with RLE pattern seeding.
//!
//! # Architecture
//!
//! - `rle`: Decoding run-length encoded pattern text into a dense grid
//! - `compute`: Grid model, neighbor counting and the evolution engine
//! - `schema`: Configuration and seeding types (JSON via serde)
//! - `render`: Text rendering used by the terminal driver
//!
//! # Example
//!
//! ```rust
//! use conway_life::{BoundaryMode, EvolutionEngine, rle};
//!
//! // Blinker: three cells in a row
//! let grid = rle::decode("x = 5, y = 5\n$$b3o!").unwrap();
//!
//! let mut engine = EvolutionEngine::new(grid, BoundaryMode::Periodic);
//! engine.evolve();
//!
//! // Now vertical
//! let state = engine.current_state();
//! assert!(state.get(1, 2).is_alive());
//! assert!(state.get(2, 2).is_alive());
//! assert!(state.get(3, 2).is_alive());
//! assert_eq!(state.population(), 3);
//! ```

pub mod compute;
pub mod render;
pub mod rle;
pub mod schema;

// Re-export commonly used types
pub use compute::{BoundaryMode, Cell, EvolutionEngine, Grid, GridError, SimulationStats};
pub use rle::{DecodeError, PatternDecoder};
pub use schema::{Pattern, Seed, SimulationConfig};

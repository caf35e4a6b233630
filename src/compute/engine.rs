//! Evolution engine - owns one grid and advances it one generation per call.

use rand::Rng;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use super::{BoundaryMode, Cell, Grid, GridError, neighbor_counts_into};

/// Conway's rule: born with 3 neighbors, survives with 2 or 3.
#[inline]
pub fn next_cell(current: Cell, neighbors: u8) -> Cell {
    Cell::from(neighbors == 3 || (current.is_alive() && neighbors == 2))
}

/// Game of Life engine under a fixed boundary policy.
pub struct EvolutionEngine {
    grid: Grid,
    boundary: BoundaryMode,
    /// Pre-allocated buffer for the next generation (reused each step).
    next: Grid,
    /// Pre-allocated buffer for neighbor counts.
    counts: Vec<u8>,
    generation: u64,
}

impl EvolutionEngine {
    /// Create a new engine, taking ownership of the initial grid.
    pub fn new(grid: Grid, boundary: BoundaryMode) -> Self {
        let next = grid.clone();
        let counts = vec![0u8; grid.area()];

        log::info!(
            "Engine created: {}x{} grid, {} boundary, population {}",
            grid.rows(),
            grid.columns(),
            boundary,
            grid.population()
        );

        Self {
            grid,
            boundary,
            next,
            counts,
            generation: 0,
        }
    }

    /// Create an engine over a `side` x `side` grid with uniformly random cells.
    pub fn init_random(side: usize, boundary: BoundaryMode) -> Result<Self, GridError> {
        Self::init_random_with_rng(side, boundary, &mut rand::thread_rng())
    }

    /// Same as [`init_random`](Self::init_random) with a caller-supplied RNG.
    pub fn init_random_with_rng<R: Rng>(
        side: usize,
        boundary: BoundaryMode,
        rng: &mut R,
    ) -> Result<Self, GridError> {
        Ok(Self::new(random_grid(side, rng)?, boundary))
    }

    /// Advance one generation.
    ///
    /// The next state is computed into a separate buffer and swapped in only
    /// once every cell is done, so `current_state` never sees a mix.
    pub fn evolve(&mut self) {
        neighbor_counts_into(&self.grid, self.boundary, &mut self.counts);

        let columns = self.grid.columns();
        let current = self.grid.cells();
        let counts = &self.counts;

        self.next
            .cells_mut()
            .par_chunks_mut(columns)
            .zip(current.par_chunks(columns))
            .zip(counts.par_chunks(columns))
            .for_each(|((next_row, current_row), count_row)| {
                for ((next, &cell), &n) in next_row.iter_mut().zip(current_row).zip(count_row) {
                    *next = next_cell(cell, n);
                }
            });

        // Swap grids (no allocation, just pointer swap)
        std::mem::swap(&mut self.grid, &mut self.next);
        self.generation += 1;

        log::trace!(
            "Generation {}: population {}",
            self.generation,
            self.grid.population()
        );
    }

    /// Run the simulation for the given number of generations.
    pub fn run(&mut self, steps: u64) {
        for _ in 0..steps {
            self.evolve();
        }
    }

    /// Read-only view of the current generation.
    pub fn current_state(&self) -> &Grid {
        &self.grid
    }

    /// Neighbor counts of the current generation.
    pub fn neighbor_counts(&self) -> Vec<u8> {
        super::neighbor_counts(&self.grid, self.boundary)
    }

    pub fn boundary(&self) -> BoundaryMode {
        self.boundary
    }

    /// Number of `evolve` calls so far.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn stats(&self) -> SimulationStats {
        SimulationStats::from_engine(self)
    }

    /// Consume the engine, returning the current grid.
    pub fn into_grid(self) -> Grid {
        self.grid
    }
}

/// Build a `side` x `side` grid with each cell drawn uniformly from {dead, alive}.
pub fn random_grid<R: Rng>(side: usize, rng: &mut R) -> Result<Grid, GridError> {
    let mut grid = Grid::new(side, side)?;
    for cell in grid.cells_mut() {
        *cell = Cell::from(rng.gen_bool(0.5));
    }
    Ok(grid)
}

/// Simulation statistics for monitoring.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimulationStats {
    pub generation: u64,
    pub population: usize,
    pub rows: usize,
    pub columns: usize,
}

impl SimulationStats {
    /// Compute statistics from an engine.
    pub fn from_engine(engine: &EvolutionEngine) -> Self {
        let grid = engine.current_state();
        Self {
            generation: engine.generation(),
            population: grid.population(),
            rows: grid.rows(),
            columns: grid.columns(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn block_grid() -> Grid {
        Grid::from_bits(&[
            &[0, 0, 0, 0, 0, 0],
            &[0, 0, 0, 0, 0, 0],
            &[0, 0, 1, 1, 0, 0],
            &[0, 0, 1, 1, 0, 0],
            &[0, 0, 0, 0, 0, 0],
            &[0, 0, 0, 0, 0, 0],
        ])
        .unwrap()
    }

    fn horizontal_blinker() -> Grid {
        Grid::from_bits(&[
            &[0, 0, 0, 0, 0],
            &[0, 0, 0, 0, 0],
            &[0, 1, 1, 1, 0],
            &[0, 0, 0, 0, 0],
            &[0, 0, 0, 0, 0],
        ])
        .unwrap()
    }

    #[test]
    fn test_rule_table() {
        for n in 0..=8u8 {
            let born = next_cell(Cell::Dead, n);
            let survives = next_cell(Cell::Alive, n);
            assert_eq!(born.is_alive(), n == 3, "dead cell with {} neighbors", n);
            assert_eq!(
                survives.is_alive(),
                n == 2 || n == 3,
                "live cell with {} neighbors",
                n
            );
        }
    }

    #[test]
    fn test_block_is_still_life() {
        let mut engine = EvolutionEngine::new(block_grid(), BoundaryMode::ZeroPadded);
        engine.evolve();
        assert_eq!(engine.current_state(), &block_grid());
        assert_eq!(engine.generation(), 1);
    }

    #[test]
    fn test_blinker_oscillates_on_torus() {
        let vertical = Grid::from_bits(&[
            &[0, 0, 0, 0, 0],
            &[0, 0, 1, 0, 0],
            &[0, 0, 1, 0, 0],
            &[0, 0, 1, 0, 0],
            &[0, 0, 0, 0, 0],
        ])
        .unwrap();

        let mut engine = EvolutionEngine::new(horizontal_blinker(), BoundaryMode::Periodic);
        engine.evolve();
        assert_eq!(engine.current_state(), &vertical);
        engine.evolve();
        assert_eq!(engine.current_state(), &horizontal_blinker());
    }

    #[test]
    fn test_glider_wraps_around_torus() {
        let glider = Grid::from_bits(&[
            &[0, 1, 0, 0, 0, 0],
            &[0, 0, 1, 0, 0, 0],
            &[1, 1, 1, 0, 0, 0],
            &[0, 0, 0, 0, 0, 0],
            &[0, 0, 0, 0, 0, 0],
            &[0, 0, 0, 0, 0, 0],
        ])
        .unwrap();

        // A glider moves one cell down-right every 4 generations, so on a
        // 6x6 torus it returns home after 24.
        let mut engine = EvolutionEngine::new(glider.clone(), BoundaryMode::Periodic);
        engine.run(4);

        let mut shifted = Grid::new(6, 6).unwrap();
        for r in 0..6 {
            for c in 0..6 {
                shifted.set((r + 1) % 6, (c + 1) % 6, glider.get(r, c));
            }
        }
        assert_eq!(engine.current_state(), &shifted);

        engine.run(20);
        assert_eq!(engine.current_state(), &glider);
        assert_eq!(engine.generation(), 24);
    }

    #[test]
    fn test_boundary_modes_diverge_at_edges() {
        // Vertical blinker touching the top edge: on the torus it keeps its
        // wrapped neighbor, with a dead border it loses it.
        let grid = Grid::from_bits(&[
            &[0, 0, 1, 0, 0],
            &[0, 0, 1, 0, 0],
            &[0, 0, 0, 0, 0],
            &[0, 0, 0, 0, 0],
            &[0, 0, 1, 0, 0],
        ])
        .unwrap();

        let mut periodic = EvolutionEngine::new(grid.clone(), BoundaryMode::Periodic);
        let mut padded = EvolutionEngine::new(grid, BoundaryMode::ZeroPadded);
        periodic.evolve();
        padded.evolve();

        assert_eq!(periodic.current_state().population(), 3);
        assert_eq!(padded.current_state().population(), 0);
    }

    #[test]
    fn test_all_dead_is_fixed_point() {
        for mode in [BoundaryMode::Periodic, BoundaryMode::ZeroPadded] {
            let mut engine = EvolutionEngine::new(Grid::new(7, 9).unwrap(), mode);
            engine.run(10);
            assert_eq!(engine.current_state().population(), 0);
            assert_eq!(engine.current_state().shape(), (7, 9));
        }
    }

    #[test]
    fn test_random_init_is_square_and_seeded() {
        let mut rng_a = StdRng::seed_from_u64(7);
        let mut rng_b = StdRng::seed_from_u64(7);

        let a = EvolutionEngine::init_random_with_rng(16, BoundaryMode::Periodic, &mut rng_a)
            .unwrap();
        let b = EvolutionEngine::init_random_with_rng(16, BoundaryMode::Periodic, &mut rng_b)
            .unwrap();

        assert_eq!(a.current_state().shape(), (16, 16));
        assert_eq!(a.current_state(), b.current_state());

        // 256 fair coin flips: far from all-dead or all-alive
        let population = a.current_state().population();
        assert!(population > 64 && population < 192, "population {}", population);
    }

    #[test]
    fn test_random_init_rejects_zero_side() {
        assert_eq!(
            EvolutionEngine::init_random(0, BoundaryMode::ZeroPadded).err(),
            Some(GridError::EmptyDimensions)
        );
        assert!(matches!(
            EvolutionEngine::init_random(1 << 32, BoundaryMode::Periodic),
            Err(GridError::TooLarge { .. })
        ));
    }

    #[test]
    fn test_stats_track_generation() {
        let mut engine = EvolutionEngine::new(horizontal_blinker(), BoundaryMode::Periodic);
        engine.run(3);

        let stats = engine.stats();
        assert_eq!(
            stats,
            SimulationStats {
                generation: 3,
                population: 3,
                rows: 5,
                columns: 5,
            }
        );
    }
}

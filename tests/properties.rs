//! Property tests for the decoder and the evolution engine.

use conway_life::{
    compute::{BoundaryMode, Cell, EvolutionEngine, Grid, neighbor_counts},
    rle::{self, DecodeError},
};
use proptest::prelude::*;

fn boundary_mode() -> impl Strategy<Value = BoundaryMode> {
    prop_oneof![Just(BoundaryMode::Periodic), Just(BoundaryMode::ZeroPadded)]
}

fn grid() -> impl Strategy<Value = Grid> {
    (1usize..12, 1usize..12).prop_flat_map(|(rows, columns)| {
        prop::collection::vec(any::<bool>(), rows * columns).prop_map(move |bits| {
            let cells = bits.into_iter().map(Cell::from).collect();
            Grid::from_cells(rows, columns, cells).unwrap()
        })
    })
}

/// Encode a grid as a well-formed RLE body, one row per `$`.
fn encode_body(grid: &Grid) -> String {
    let mut body = String::new();
    for (r, row) in grid.rows_iter().enumerate() {
        if r > 0 {
            body.push('$');
        }
        let mut i = 0;
        while i < row.len() {
            let cell = row[i];
            let run = row[i..].iter().take_while(|&&c| c == cell).count();
            if run > 1 {
                body.push_str(&run.to_string());
            }
            body.push(if cell.is_alive() { 'o' } else { 'b' });
            i += run;
        }
    }
    body.push('!');
    body
}

proptest! {
    #[test]
    fn decoded_shape_matches_header(
        columns in 1usize..40,
        rows in 1usize..40,
        runs in prop::collection::vec((0usize..4, any::<bool>()), 0..10),
    ) {
        // A single row that never exceeds the declared width
        let mut body = String::new();
        let mut used = 0;
        for (count, alive) in runs {
            if used + count > columns {
                break;
            }
            used += count;
            body.push_str(&format!("{}{}", count, if alive { 'o' } else { 'b' }));
        }
        body.push('!');

        let grid = rle::decode(&format!("x = {}, y = {}\n{}", columns, rows, body)).unwrap();
        prop_assert_eq!(grid.shape(), (rows, columns));
    }

    #[test]
    fn decode_reproduces_encoded_grid(grid in grid()) {
        let text = format!("x = {}, y = {}\n{}", grid.columns(), grid.rows(), encode_body(&grid));
        prop_assert_eq!(rle::decode(&text).unwrap(), grid);
    }

    #[test]
    fn overlong_rows_are_rejected(columns in 1usize..20, extra in 1usize..5) {
        let text = format!("x = {}, y = 1\n{}o!", columns, columns + extra);
        let is_overflow = matches!(rle::decode(&text), Err(DecodeError::RowOverflow { .. }));
        prop_assert!(is_overflow);
    }

    #[test]
    fn evolve_preserves_shape(grid in grid(), mode in boundary_mode(), steps in 1u64..8) {
        let shape = grid.shape();
        let mut engine = EvolutionEngine::new(grid, mode);
        for _ in 0..steps {
            engine.evolve();
            prop_assert_eq!(engine.current_state().shape(), shape);
        }
        prop_assert_eq!(engine.generation(), steps);
    }

    #[test]
    fn all_dead_stays_dead(
        rows in 1usize..16,
        columns in 1usize..16,
        mode in boundary_mode(),
        steps in 1u64..10,
    ) {
        let mut engine = EvolutionEngine::new(Grid::new(rows, columns).unwrap(), mode);
        engine.run(steps);
        prop_assert_eq!(engine.current_state().population(), 0);
    }

    #[test]
    fn neighbor_counts_in_range(grid in grid(), mode in boundary_mode()) {
        let counts = neighbor_counts(&grid, mode);
        prop_assert_eq!(counts.len(), grid.area());
        prop_assert!(counts.iter().all(|&n| n <= 8));
    }

    #[test]
    fn zero_padded_never_exceeds_periodic(grid in grid()) {
        // The dead border only removes neighbors the torus would count
        let periodic = neighbor_counts(&grid, BoundaryMode::Periodic);
        let padded = neighbor_counts(&grid, BoundaryMode::ZeroPadded);
        for (p, z) in periodic.iter().zip(&padded) {
            prop_assert!(z <= p);
        }
    }
}

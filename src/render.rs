//! Text rendering of grids for the terminal driver.

use std::io::{self, Write};

use crate::compute::{Grid, SimulationStats};
use crate::schema::RenderConfig;

/// ANSI sequence: clear screen and move the cursor home.
const CLEAR_SCREEN: &str = "\x1b[2J\x1b[H";

/// Render a grid as one text line per row.
pub fn render_grid(grid: &Grid, config: &RenderConfig) -> String {
    let mut out = String::with_capacity(grid.area() + grid.rows());
    for row in grid.rows_iter() {
        out.extend(row.iter().map(|cell| {
            if cell.is_alive() {
                config.alive
            } else {
                config.dead
            }
        }));
        out.push('\n');
    }
    out
}

/// Draws successive generations to a writer.
pub struct TerminalRenderer<W: Write> {
    writer: W,
    config: RenderConfig,
}

impl<W: Write> TerminalRenderer<W> {
    pub fn new(writer: W, config: RenderConfig) -> Self {
        Self { writer, config }
    }

    /// Draw one frame: optional clear, status line, grid.
    pub fn draw(&mut self, stats: &SimulationStats, grid: &Grid) -> io::Result<()> {
        if self.config.clear_screen {
            self.writer.write_all(CLEAR_SCREEN.as_bytes())?;
        }
        writeln!(
            self.writer,
            "generation {}  population {}  ({}x{})",
            stats.generation, stats.population, stats.rows, stats.columns
        )?;
        self.writer
            .write_all(render_grid(grid, &self.config).as_bytes())?;
        self.writer.flush()
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

//! Configuration types for Game of Life runs.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::compute::BoundaryMode;

fn default_frame_interval_ms() -> u64 {
    100
}

/// Top-level simulation configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimulationConfig {
    /// Boundary policy, fixed for the whole run.
    #[serde(default)]
    pub boundary: BoundaryMode,
    /// Number of generations to run (0 = until interrupted).
    #[serde(default)]
    pub generations: u64,
    /// Delay between rendered frames in milliseconds.
    #[serde(default = "default_frame_interval_ms")]
    pub frame_interval_ms: u64,
    /// Terminal rendering options.
    #[serde(default)]
    pub render: RenderConfig,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            boundary: BoundaryMode::Periodic,
            generations: 0,
            frame_interval_ms: default_frame_interval_ms(),
            render: RenderConfig::default(),
        }
    }
}

/// How a grid is drawn as text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderConfig {
    /// Glyph for live cells.
    pub alive: char,
    /// Glyph for dead cells.
    pub dead: char,
    /// Clear the terminal before each frame.
    pub clear_screen: bool,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            alive: '#',
            dead: '.',
            clear_screen: true,
        }
    }
}

impl RenderConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.alive == self.dead {
            return Err(ConfigError::InvalidRender(self.alive));
        }
        if self.alive.is_control() || self.dead.is_control() {
            return Err(ConfigError::ControlGlyph);
        }
        Ok(())
    }
}

impl SimulationConfig {
    /// Validate configuration parameters.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.render.validate()
    }

    /// Load and validate a JSON configuration file.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let config: SimulationConfig = serde_json::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Alive and dead glyphs must differ (both are '{0}')")]
    InvalidRender(char),
    #[error("Render glyphs must be printable characters")]
    ControlGlyph,
    #[error("Cannot read config file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("Cannot parse config: {0}")]
    Parse(#[from] serde_json::Error),
}

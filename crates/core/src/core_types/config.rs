//! Simulation configuration
//!
//! All options are fixed when a grid is built. Defaults reproduce the classic
//! 32×32 board: trees burn for 40 ticks, need 5 units of heat to catch, and
//! stay as ash for 80 ticks before regrowing.

use serde::{Deserialize, Serialize};

use super::error::ConfigError;

/// Default grid dimension (cells per side)
pub const DEFAULT_GRID_SIZE: usize = 32;
/// Default pixel size of one cell
pub const DEFAULT_CELL_SIZE: f32 = 20.0;
/// Default ticks a cell burns before it is extinguished
pub const DEFAULT_FUEL_CAPACITY: u32 = 40;
/// Default cumulative heat required to ignite
pub const DEFAULT_HEAT_TO_IGNITE: u32 = 5;
/// Default ticks an extinguished cell sits as ash before refreshing
pub const DEFAULT_ASH_TIME: u32 = 80;
/// Default driver pacing between ticks (ms)
pub const DEFAULT_TICK_INTERVAL_MS: u64 = 5;
/// Default cell count at which the compute phase goes parallel
pub const DEFAULT_PARALLEL_THRESHOLD: usize = 4096;

/// Parameters of the per-cell combustion state machine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CombustionParams {
    /// Fuel a fresh tree holds; one unit burns per tick
    pub fuel_capacity: u32,
    /// Heat at which a dormant cell ignites
    pub heat_to_ignite: u32,
    /// Ticks tolerated as ash; refresh fires once `time_as_ash` exceeds this
    pub ash_time: u32,
}

impl Default for CombustionParams {
    fn default() -> Self {
        Self {
            fuel_capacity: DEFAULT_FUEL_CAPACITY,
            heat_to_ignite: DEFAULT_HEAT_TO_IGNITE,
            ash_time: DEFAULT_ASH_TIME,
        }
    }
}

/// Full simulation configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// Cells per side of the square grid
    pub grid_size: usize,
    /// Pixel size of a cell (coordinate mapping only)
    pub cell_size: f32,
    /// Fuel, heat and ash timings
    pub combustion: CombustionParams,
    /// Driver pacing between ticks, in milliseconds
    pub tick_interval_ms: u64,
    /// Grids with at least this many cells compute ticks on the rayon pool
    pub parallel_threshold: usize,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            grid_size: DEFAULT_GRID_SIZE,
            cell_size: DEFAULT_CELL_SIZE,
            combustion: CombustionParams::default(),
            tick_interval_ms: DEFAULT_TICK_INTERVAL_MS,
            parallel_threshold: DEFAULT_PARALLEL_THRESHOLD,
        }
    }
}

impl SimConfig {
    /// Default configuration with a custom grid dimension
    pub fn with_grid_size(mut self, grid_size: usize) -> Self {
        self.grid_size = grid_size;
        self
    }

    pub fn with_cell_size(mut self, cell_size: f32) -> Self {
        self.cell_size = cell_size;
        self
    }

    pub fn with_fuel_capacity(mut self, fuel_capacity: u32) -> Self {
        self.combustion.fuel_capacity = fuel_capacity;
        self
    }

    pub fn with_heat_to_ignite(mut self, heat_to_ignite: u32) -> Self {
        self.combustion.heat_to_ignite = heat_to_ignite;
        self
    }

    pub fn with_ash_time(mut self, ash_time: u32) -> Self {
        self.combustion.ash_time = ash_time;
        self
    }

    pub fn with_tick_interval_ms(mut self, tick_interval_ms: u64) -> Self {
        self.tick_interval_ms = tick_interval_ms;
        self
    }

    pub fn with_parallel_threshold(mut self, parallel_threshold: usize) -> Self {
        self.parallel_threshold = parallel_threshold;
        self
    }

    /// Check every option, reporting the first invalid one
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.grid_size == 0 {
            return Err(ConfigError::EmptyGrid);
        }
        if !self.cell_size.is_finite() || self.cell_size <= 0.0 {
            return Err(ConfigError::InvalidCellSize(self.cell_size));
        }
        if self.combustion.fuel_capacity == 0 {
            return Err(ConfigError::ZeroFuelCapacity);
        }
        if self.combustion.heat_to_ignite == 0 {
            return Err(ConfigError::ZeroIgnitionHeat);
        }
        Ok(())
    }
}

//! Core types shared by the grid and the simulation driver

pub mod cell;
pub mod config;
pub mod error;

pub use cell::{Cell, CellState};
pub use config::{CombustionParams, SimConfig};
pub use error::{CellAction, ConfigError, GridError};

//! Fire Grid Core Library
//!
//! A cellular automaton of fire spreading through a square grid of trees.
//! Each cell cycles tree → burning → ash → tree, igniting once it has soaked
//! up enough heat from burning orthogonal neighbours. Walls block the fire.
//!
//! ## Layout
//!
//! - [`core_types`]: the per-cell state machine, configuration and errors
//! - [`grid`]: the N×N grid, its neighbour topology, the double-buffered tick
//!   and screen coordinate helpers
//! - [`simulation`]: a driver facade with an action queue and replay
//!
//! Rendering and input handling live outside this crate; drivers call
//! [`FireGrid::ignite_at`], [`FireGrid::toggle_wall_at`] and
//! [`FireGrid::advance_tick`], and read [`FireGrid::cell_state`] to draw.

// Core types and utilities
pub mod core_types;

pub mod grid;
pub mod simulation;

// Re-export core types
pub use core_types::{
    Cell, CellAction, CellState, CombustionParams, ConfigError, GridError, SimConfig,
};

// Re-export grid and driver types
pub use grid::{cell_center, pixel_to_cell, FireGrid, GridStats};
pub use simulation::{ActionOutcome, DriverAction, ExecutedAction, FireSimulation, SimulationStats};

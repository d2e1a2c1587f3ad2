//! Error taxonomy for the fire grid
//!
//! Every error here is caused by caller input. Drivers are expected to log
//! and carry on: clicking a burning cell is routine, not exceptional.

use thiserror::Error;

use super::cell::CellState;

/// Manual operation a driver can request on a single cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CellAction {
    Ignite,
    ToggleWall,
}

impl std::fmt::Display for CellAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Ignite => f.write_str("ignite"),
            Self::ToggleWall => f.write_str("toggle wall"),
        }
    }
}

/// Errors returned by grid operations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum GridError {
    /// The cell's current state does not permit the requested action
    #[error("cannot {action} cell ({row}, {col}) while it is {state}")]
    InvalidTransition {
        row: usize,
        col: usize,
        action: CellAction,
        state: CellState,
    },
    /// Coordinates fall outside the grid
    #[error("cell ({row}, {col}) is outside the {size}x{size} grid")]
    OutOfBounds { row: usize, col: usize, size: usize },
}

/// Errors raised by [`SimConfig::validate`](super::config::SimConfig::validate)
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum ConfigError {
    #[error("grid size must be at least 1")]
    EmptyGrid,
    #[error("cell size must be finite and positive, got {0}")]
    InvalidCellSize(f32),
    #[error("fuel capacity must be at least 1 tick")]
    ZeroFuelCapacity,
    #[error("heat to ignite must be at least 1")]
    ZeroIgnitionHeat,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = GridError::InvalidTransition {
            row: 2,
            col: 3,
            action: CellAction::Ignite,
            state: CellState::Ash,
        };
        assert_eq!(err.to_string(), "cannot ignite cell (2, 3) while it is ash");

        let err = GridError::OutOfBounds {
            row: 40,
            col: 0,
            size: 32,
        };
        assert_eq!(err.to_string(), "cell (40, 0) is outside the 32x32 grid");

        assert_eq!(
            ConfigError::InvalidCellSize(-2.0).to_string(),
            "cell size must be finite and positive, got -2"
        );
    }
}

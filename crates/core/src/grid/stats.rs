//! Per-state cell counts

use serde::{Deserialize, Serialize};

use crate::core_types::CellState;

/// Snapshot of how many cells are in each state
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridStats {
    pub dormant: usize,
    pub ignited: usize,
    pub ash: usize,
    pub walls: usize,
    /// Cells that caught fire during the most recent tick
    pub ignited_last_tick: usize,
}

impl GridStats {
    pub(crate) fn record(&mut self, state: CellState) {
        match state {
            CellState::Dormant => self.dormant += 1,
            CellState::Ignited => self.ignited += 1,
            CellState::Ash => self.ash += 1,
            CellState::Wall => self.walls += 1,
        }
    }

    pub fn total(&self) -> usize {
        self.dormant + self.ignited + self.ash + self.walls
    }

    /// No cell is burning
    pub fn is_extinguished(&self) -> bool {
        self.ignited == 0
    }
}

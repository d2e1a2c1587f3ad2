//! Fire grid: N×N cells advanced in lock-step
//!
//! Cells live in a flat row-major arena. Neighbour lists hold indices into that
//! arena and are built once, so nothing in a cell refers to another cell.
//!
//! A tick runs in three phases:
//! 1. every burning cell starts its burn step, dropping its fresh-ignition flag
//! 2. every non-wall cell computes its next value from the pre-tick buffer into
//!    the back buffer (parallel on large grids)
//! 3. the buffers swap
//!
//! Phase 2 never reads the back buffer, so a cell that ignites during a tick is
//! invisible to its neighbours until the next one, regardless of visit order.

use rayon::prelude::*;
use tracing::{info, trace};

use super::stats::GridStats;
use super::topology::{build_topology, Neighbourhood};
use crate::core_types::{
    Cell, CellAction, CellState, CombustionParams, ConfigError, GridError, SimConfig,
};

/// Square grid of cells with precomputed orthogonal topology
#[derive(Debug, Clone)]
pub struct FireGrid {
    size: usize,
    params: CombustionParams,
    parallel_threshold: usize,
    /// Current state, row-major: `row * size + col`
    cells: Vec<Cell>,
    /// Back buffer written during a tick, then swapped in
    next: Vec<Cell>,
    neighbours: Vec<Neighbourhood>,
}

impl FireGrid {
    /// All-dormant `size`×`size` grid using the default combustion timings.
    ///
    /// A zero size yields an empty grid on which every lookup is out of bounds.
    pub fn new(size: usize) -> Self {
        let config = SimConfig::default().with_grid_size(size);
        Self::build(size, config.combustion, config.parallel_threshold)
    }

    /// Grid built from a validated configuration
    pub fn with_config(config: &SimConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::build(
            config.grid_size,
            config.combustion,
            config.parallel_threshold,
        ))
    }

    fn build(size: usize, params: CombustionParams, parallel_threshold: usize) -> Self {
        let cells = vec![Cell::new(params.fuel_capacity); size * size];
        let next = cells.clone();
        let neighbours = build_topology(size);

        info!(
            "Fire grid initialized: {}x{} cells, fuel={}, heat_to_ignite={}, ash_time={}",
            size, size, params.fuel_capacity, params.heat_to_ignite, params.ash_time
        );

        Self {
            size,
            params,
            parallel_threshold,
            cells,
            next,
            neighbours,
        }
    }

    /// Cells per side
    pub fn size(&self) -> usize {
        self.size
    }

    pub fn params(&self) -> &CombustionParams {
        &self.params
    }

    #[inline]
    fn index(&self, row: usize, col: usize) -> usize {
        row * self.size + col
    }

    fn checked_index(&self, row: usize, col: usize) -> Result<usize, GridError> {
        if row < self.size && col < self.size {
            Ok(self.index(row, col))
        } else {
            Err(GridError::OutOfBounds {
                row,
                col,
                size: self.size,
            })
        }
    }

    /// Read-only access to one cell
    pub fn cell(&self, row: usize, col: usize) -> Option<&Cell> {
        self.checked_index(row, col).ok().map(|idx| &self.cells[idx])
    }

    /// State of one cell, for renderers picking an icon
    pub fn cell_state(&self, row: usize, col: usize) -> Result<CellState, GridError> {
        self.checked_index(row, col).map(|idx| self.cells[idx].state())
    }

    /// Every cell's state in row-major order
    pub fn states(&self) -> impl Iterator<Item = ((usize, usize), CellState)> + '_ {
        let size = self.size;
        self.cells
            .iter()
            .enumerate()
            .map(move |(idx, cell)| ((idx / size, idx % size), cell.state()))
    }

    /// Coordinates of the cells that exchange heat with `(row, col)`
    pub fn neighbours_of(&self, row: usize, col: usize) -> Result<Vec<(usize, usize)>, GridError> {
        let idx = self.checked_index(row, col)?;
        Ok(self.neighbours[idx]
            .as_slice()
            .iter()
            .map(|&n| (n / self.size, n % self.size))
            .collect())
    }

    /// Set a dormant cell alight.
    ///
    /// The cell starts heating its neighbours on the next tick.
    pub fn ignite_at(&mut self, row: usize, col: usize) -> Result<(), GridError> {
        let idx = self.checked_index(row, col)?;
        self.cells[idx]
            .ignite()
            .map_err(|state| GridError::InvalidTransition {
                row,
                col,
                action: CellAction::Ignite,
                state,
            })
    }

    /// Turn a dormant cell into a wall, or a wall back into a fresh tree.
    pub fn toggle_wall_at(&mut self, row: usize, col: usize) -> Result<(), GridError> {
        let idx = self.checked_index(row, col)?;
        let params = self.params;
        self.cells[idx]
            .toggle_wall(&params)
            .map_err(|state| GridError::InvalidTransition {
                row,
                col,
                action: CellAction::ToggleWall,
                state,
            })
    }

    /// Advance every non-wall cell by one tick.
    pub fn advance_tick(&mut self) {
        for cell in &mut self.cells {
            cell.begin_burn_step();
        }

        let params = self.params;
        let parallel = self.cells.len() >= self.parallel_threshold;
        let current = &self.cells;
        let neighbours = &self.neighbours;
        let next = &mut self.next;

        let step = |cell: &Cell, hood: &Neighbourhood| -> Cell {
            if cell.is_wall() {
                return cell.clone();
            }
            let burning = hood
                .as_slice()
                .iter()
                .filter(|&&n| current[n].is_spreading())
                .count() as u32;
            cell.next_tick(burning, &params)
        };

        if parallel {
            next.par_iter_mut()
                .zip(current.par_iter().zip(neighbours.par_iter()))
                .for_each(|(slot, (cell, hood))| *slot = step(cell, hood));
        } else {
            for (slot, (cell, hood)) in next.iter_mut().zip(current.iter().zip(neighbours.iter())) {
                *slot = step(cell, hood);
            }
        }

        std::mem::swap(&mut self.cells, &mut self.next);
        trace!(
            "Tick applied ({}), {} new ignitions",
            if parallel { "parallel" } else { "sequential" },
            self.ignited_last_tick()
        );
    }

    /// Cells whose fresh-ignition flag is still set: those that caught fire
    /// during the last tick plus any ignited manually since.
    pub fn ignited_last_tick(&self) -> usize {
        self.cells.iter().filter(|c| c.ignited_this_tick()).count()
    }

    /// Count cells per state
    pub fn stats(&self) -> GridStats {
        let mut stats = GridStats::default();
        for cell in &self.cells {
            stats.record(cell.state());
        }
        stats.ignited_last_tick = self.ignited_last_tick();
        stats
    }

    /// Render the grid as one line of glyphs per row
    pub fn to_text(&self) -> String {
        let mut out = String::with_capacity(self.size * (self.size + 1));
        for row in self.cells.chunks(self.size.max(1)) {
            out.extend(row.iter().map(|cell| cell.state().glyph()));
            out.push('\n');
        }
        out
    }
}

impl Default for FireGrid {
    fn default() -> Self {
        Self::new(SimConfig::default().grid_size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small_grid(size: usize, fuel: u32, heat: u32, ash: u32) -> FireGrid {
        let config = SimConfig::default()
            .with_grid_size(size)
            .with_fuel_capacity(fuel)
            .with_heat_to_ignite(heat)
            .with_ash_time(ash);
        FireGrid::with_config(&config).unwrap()
    }

    #[test]
    fn test_new_grid_is_all_dormant() {
        let grid = FireGrid::new(8);
        assert_eq!(grid.size(), 8);
        let stats = grid.stats();
        assert_eq!(stats.dormant, 64);
        assert_eq!(stats.total(), 64);
        assert!(grid
            .states()
            .all(|(_, state)| state == CellState::Dormant));
        assert_eq!(grid.cell(3, 3).unwrap().fuel_remaining(), 40);
    }

    #[test]
    fn test_with_config_rejects_invalid() {
        let config = SimConfig::default().with_grid_size(0);
        assert_eq!(
            FireGrid::with_config(&config).unwrap_err(),
            ConfigError::EmptyGrid
        );
    }

    #[test]
    fn test_empty_grid_lookups_are_out_of_bounds() {
        let mut grid = FireGrid::new(0);
        assert!(matches!(
            grid.ignite_at(0, 0),
            Err(GridError::OutOfBounds { size: 0, .. })
        ));
        grid.advance_tick();
        assert_eq!(grid.stats().total(), 0);
        assert_eq!(grid.to_text(), "");
    }

    #[test]
    fn test_out_of_bounds_operations() {
        let mut grid = FireGrid::new(4);
        let expected = GridError::OutOfBounds {
            row: 4,
            col: 1,
            size: 4,
        };
        assert_eq!(grid.ignite_at(4, 1), Err(expected));
        assert_eq!(grid.toggle_wall_at(4, 1), Err(expected));
        assert_eq!(grid.cell_state(4, 1), Err(expected));
        assert!(grid.cell(1, 4).is_none());
        assert!(grid.neighbours_of(9, 9).is_err());
    }

    #[test]
    fn test_invalid_transitions_report_state() {
        let mut grid = FireGrid::new(4);
        grid.ignite_at(1, 1).unwrap();
        assert_eq!(
            grid.ignite_at(1, 1),
            Err(GridError::InvalidTransition {
                row: 1,
                col: 1,
                action: CellAction::Ignite,
                state: CellState::Ignited,
            })
        );
        assert_eq!(
            grid.toggle_wall_at(1, 1),
            Err(GridError::InvalidTransition {
                row: 1,
                col: 1,
                action: CellAction::ToggleWall,
                state: CellState::Ignited,
            })
        );

        grid.toggle_wall_at(2, 2).unwrap();
        assert_eq!(
            grid.ignite_at(2, 2),
            Err(GridError::InvalidTransition {
                row: 2,
                col: 2,
                action: CellAction::Ignite,
                state: CellState::Wall,
            })
        );
    }

    #[test]
    fn test_neighbours_of_corner_and_centre() {
        let grid = FireGrid::new(3);
        let mut corner = grid.neighbours_of(0, 0).unwrap();
        corner.sort_unstable();
        assert_eq!(corner, vec![(0, 1), (1, 0)]);

        let mut centre = grid.neighbours_of(1, 1).unwrap();
        centre.sort_unstable();
        assert_eq!(centre, vec![(0, 1), (1, 0), (1, 2), (2, 1)]);
    }

    #[test]
    fn test_manual_ignition_spreads_on_next_tick() {
        let mut grid = small_grid(3, 10, 1, 5);
        grid.ignite_at(1, 1).unwrap();
        assert_eq!(grid.ignited_last_tick(), 1);

        grid.advance_tick();
        for (row, col) in [(0, 1), (1, 0), (1, 2), (2, 1)] {
            assert_eq!(grid.cell_state(row, col), Ok(CellState::Ignited));
        }
        for (row, col) in [(0, 0), (0, 2), (2, 0), (2, 2)] {
            assert_eq!(grid.cell_state(row, col), Ok(CellState::Dormant));
        }
        assert_eq!(grid.ignited_last_tick(), 4);
        assert_eq!(grid.cell(1, 1).unwrap().fuel_remaining(), 9);
    }

    #[test]
    fn test_fresh_ignitions_do_not_chain_within_a_tick() {
        // A single corridor of trees that ignite on the first burning
        // neighbour: the front must advance exactly one cell per tick.
        let mut grid = small_grid(9, 100, 1, 5);
        for row in (0..9).filter(|&row| row != 4) {
            for col in 0..9 {
                grid.toggle_wall_at(row, col).unwrap();
            }
        }
        grid.ignite_at(4, 0).unwrap();
        for tick in 1..=8 {
            grid.advance_tick();
            for col in 0..9 {
                let expected = if col <= tick {
                    CellState::Ignited
                } else {
                    CellState::Dormant
                };
                assert_eq!(grid.cell_state(4, col), Ok(expected), "tick {tick} col {col}");
            }
        }
    }

    #[test]
    fn test_wall_blocks_spread() {
        let mut grid = small_grid(3, 50, 1, 5);
        for row in 0..3 {
            grid.toggle_wall_at(row, 1).unwrap();
        }
        grid.ignite_at(1, 0).unwrap();
        for _ in 0..20 {
            grid.advance_tick();
        }
        for row in 0..3 {
            assert_eq!(grid.cell_state(row, 1), Ok(CellState::Wall));
            assert_eq!(grid.cell_state(row, 2), Ok(CellState::Dormant));
            assert_eq!(grid.cell(row, 2).unwrap().heat(), 0);
        }
    }

    #[test]
    fn test_parallel_and_sequential_ticks_agree() {
        let config = SimConfig::default()
            .with_grid_size(24)
            .with_fuel_capacity(6)
            .with_heat_to_ignite(2)
            .with_ash_time(4);
        let mut sequential = FireGrid::with_config(&config.clone().with_parallel_threshold(usize::MAX))
            .unwrap();
        let mut parallel = FireGrid::with_config(&config.with_parallel_threshold(0)).unwrap();

        for grid in [&mut sequential, &mut parallel] {
            for i in 0..24 {
                grid.toggle_wall_at(i, 12).unwrap();
            }
            grid.toggle_wall_at(12, 12).unwrap();
            grid.ignite_at(3, 3).unwrap();
            grid.ignite_at(20, 18).unwrap();
        }

        for _ in 0..60 {
            sequential.advance_tick();
            parallel.advance_tick();
            assert_eq!(sequential.cells, parallel.cells);
        }
    }

    #[test]
    fn test_to_text_glyphs() {
        let mut grid = FireGrid::new(2);
        grid.ignite_at(0, 0).unwrap();
        grid.toggle_wall_at(1, 1).unwrap();
        assert_eq!(grid.to_text(), "*T\nT#\n");
    }
}
